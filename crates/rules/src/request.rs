use serde::Deserialize;
use serde::Serialize;

/// A move as the client states it: origin square, destination square, and an
/// optional promotion piece letter ("q", "r", "b", "n").
///
/// Nothing here is validated at parse time. Legality is decided by the
/// [`Board`](crate::Board) against the live position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

impl MoveRequest {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            promotion: None,
        }
    }
    pub fn promoting(from: &str, to: &str, piece: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            promotion: Some(piece.to_string()),
        }
    }
    /// Concatenated UCI form, e.g. "e2e4" or "a7a8q".
    pub fn uci(&self) -> String {
        match &self.promotion {
            Some(piece) => format!("{}{}{}", self.from, self.to, piece),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl std::fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uci())
    }
}
