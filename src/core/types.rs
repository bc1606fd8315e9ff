use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use chrono::{DateTime, Utc};

/// Stable position of a game in the loaded dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u32);

impl RecordId {
    pub fn new(id: u32) -> Self {
        RecordId(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        RecordId(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

/// Column names of the main dataset
pub mod fields {
    pub const WHITE_ELO: &str = "WhiteElo";
    pub const BLACK_ELO: &str = "BlackElo";
    pub const TERMINATION: &str = "Termination";
    pub const SCORE: &str = "Score";
    pub const OPENING: &str = "Opening";
    pub const NUMBER_MOVES: &str = "NumberMoves";
}

/// One played game. Metadata only: move lists live in the dataset store
/// and are attached once, when indexing completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "WhiteElo")]
    pub white_elo: u32,
    #[serde(rename = "BlackElo")]
    pub black_elo: u32,
    #[serde(rename = "Termination")]
    pub termination: String,
    /// 1 white win, 0.5 draw, 0 black win
    #[serde(rename = "Score")]
    pub score: f64,
    #[serde(rename = "Opening")]
    pub opening: String,
    #[serde(rename = "NumberMoves", default, skip_serializing_if = "Option::is_none")]
    pub number_moves: Option<u32>,
    #[serde(flatten)]
    pub extra: HashMap<String, FieldValue>,
}

impl GameRecord {
    pub fn new(white_elo: u32, black_elo: u32, termination: &str, score: f64, opening: &str) -> Self {
        GameRecord {
            white_elo,
            black_elo,
            termination: termination.to_string(),
            score,
            opening: opening.to_string(),
            number_moves: None,
            extra: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: FieldValue) -> Self {
        self.extra.insert(name.to_string(), value);
        self
    }

    /// Value of a column by name; unknown columns read as `Null`.
    pub fn field(&self, name: &str) -> FieldValue {
        match name {
            fields::WHITE_ELO => FieldValue::Number(self.white_elo as f64),
            fields::BLACK_ELO => FieldValue::Number(self.black_elo as f64),
            fields::TERMINATION => FieldValue::Text(self.termination.clone()),
            fields::SCORE => FieldValue::Number(self.score),
            fields::OPENING => FieldValue::Text(self.opening.clone()),
            fields::NUMBER_MOVES => self
                .number_moves
                .map(|n| FieldValue::Number(n as f64))
                .unwrap_or(FieldValue::Null),
            other => self.extra.get(other).cloned().unwrap_or(FieldValue::Null),
        }
    }
}

/// Row of the moves dataset: the game's move text in SAN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRow {
    #[serde(rename = "Moves")]
    pub moves: String,
}

impl AsRef<str> for MoveRow {
    fn as_ref(&self) -> &str {
        &self.moves
    }
}
