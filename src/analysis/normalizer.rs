use std::sync::LazyLock;
use regex::Regex;
use crate::analysis::token::{MoveList, MoveToken};

/// "12." / "12..." / a bare "..." at the start of a whitespace-separated piece
static MOVE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*\.+").expect("move number pattern is valid"));

/// Turn raw move text into at most `max_tokens` move tokens.
///
/// Move numbers are dropped (also when glued to the move, as in "1.e4"),
/// whitespace runs collapse, and check/mate markers stay in the stored
/// text. Splitting is lazy, so only the head of a long game is scanned.
pub fn normalize(raw: &str, max_tokens: usize) -> Vec<MoveToken> {
    raw.split_whitespace()
        .map(strip_move_number)
        .filter(|piece| !piece.is_empty())
        .take(max_tokens)
        .map(MoveToken::new)
        .collect()
}

fn strip_move_number(piece: &str) -> &str {
    match MOVE_NUMBER.find(piece) {
        Some(m) => &piece[m.end()..],
        None => piece,
    }
}

/// Normalizer bound to the session-wide move cap, shared by the indexer
/// (game move text) and the search engine (user notation).
#[derive(Debug, Clone, Copy)]
pub struct MoveNormalizer {
    pub max_tokens: usize,
}

impl MoveNormalizer {
    pub fn new(max_tokens: usize) -> Self {
        MoveNormalizer { max_tokens }
    }

    pub fn normalize(&self, raw: &str) -> MoveList {
        MoveList::new(normalize(raw, self.max_tokens))
    }

    /// Clean notation typed by a user, e.g. "1. e4 e5 2. Nf3+".
    pub fn normalize_query(&self, input: &str) -> Vec<MoveToken> {
        normalize(input, self.max_tokens)
    }
}
