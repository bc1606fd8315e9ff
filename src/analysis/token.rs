use std::fmt;
use serde::{Serialize, Deserialize};

/// Move token as it appeared in the source text ("Nf3+", "Qxf7#").
/// Equality and hashing go through `key()`, which drops trailing check
/// and mate markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MoveToken {
    text: String,
    key_len: usize,
}

impl MoveToken {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let key_len = text.trim_end_matches(['+', '#']).len();
        MoveToken { text, key_len }
    }

    /// Stored text, decorations included
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Comparison key: the text without trailing '+' / '#'
    pub fn key(&self) -> &str {
        &self.text[..self.key_len]
    }

    pub fn matches(&self, other: &MoveToken) -> bool {
        self.key() == other.key()
    }

    pub fn is_decorated(&self) -> bool {
        self.key_len < self.text.len()
    }
}

impl PartialEq for MoveToken {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for MoveToken {}

impl std::hash::Hash for MoveToken {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for MoveToken {
    fn from(text: &str) -> Self {
        MoveToken::new(text)
    }
}

impl From<String> for MoveToken {
    fn from(text: String) -> Self {
        MoveToken::new(text)
    }
}

impl From<MoveToken> for String {
    fn from(token: MoveToken) -> Self {
        token.text
    }
}

/// Leading moves of one game, capped at `max_moves` when built
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveList(Vec<MoveToken>);

impl MoveList {
    pub fn new(tokens: Vec<MoveToken>) -> Self {
        MoveList(tokens)
    }

    pub fn get(&self, depth: usize) -> Option<&MoveToken> {
        self.0.get(depth)
    }

    /// Whether the token at `depth` exists and compares equal to `token`
    pub fn matches_at(&self, depth: usize, token: &MoveToken) -> bool {
        self.0.get(depth).is_some_and(|t| t.matches(token))
    }

    pub fn starts_with(&self, prefix: &[MoveToken]) -> bool {
        prefix.len() <= self.0.len()
            && prefix.iter().zip(&self.0).all(|(q, t)| q.matches(t))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> &[MoveToken] {
        &self.0
    }
}

impl From<Vec<MoveToken>> for MoveList {
    fn from(tokens: Vec<MoveToken>) -> Self {
        MoveList(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_strips_trailing_markers_only() {
        assert_eq!(MoveToken::new("Nf3+").key(), "Nf3");
        assert_eq!(MoveToken::new("Qxf7#").key(), "Qxf7");
        assert_eq!(MoveToken::new("e4").key(), "e4");
        assert_eq!(MoveToken::new("Nf3+").text(), "Nf3+");
        assert!(MoveToken::new("Rd8+").is_decorated());
    }

    #[test]
    fn decorated_tokens_compare_equal() {
        assert_eq!(MoveToken::from("Nf3+"), MoveToken::from("Nf3"));
        assert_ne!(MoveToken::from("Nf3"), MoveToken::from("Nc3"));
    }

    #[test]
    fn move_list_prefix() {
        let list = MoveList::new(vec!["e4".into(), "e5".into(), "Bc4".into(), "Nc6".into(), "Qh5".into()]);
        assert!(list.starts_with(&["e4".into(), "e5".into()]));
        assert!(!list.starts_with(&["d4".into()]));
        assert!(list.matches_at(4, &"Qh5+".into()));
        assert!(!list.matches_at(5, &"Nf6".into()));
    }
}
