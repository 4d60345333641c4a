/// Errors that can occur while interpreting moves and positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Square or promotion syntax did not parse as UCI.
    Unparsable(String),
    /// Syntactically fine, but not a legal move in this position.
    Illegal(String),
    /// The position is already terminal.
    Finished,
    /// FEN string rejected on import.
    BadFen(String),
}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unparsable(s) => write!(f, "unparsable move: {}", s),
            Self::Illegal(s) => write!(f, "illegal move: {}", s),
            Self::Finished => write!(f, "game is already over"),
            Self::BadFen(s) => write!(f, "invalid fen: {}", s),
        }
    }
}

impl std::error::Error for RulesError {}
