use super::*;

/// How a finished game ended on the board itself.
/// Endings decided off the board (resignation, abandonment) live upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    FiftyMoves,
}

impl Terminal {
    pub fn winner(&self) -> Option<Color> {
        match self {
            Self::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }
    pub fn is_draw(&self) -> bool {
        self.winner().is_none()
    }
}

impl std::fmt::Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Checkmate { .. } => write!(f, "checkmate"),
            Self::Stalemate => write!(f, "stalemate"),
            Self::InsufficientMaterial => write!(f, "insufficient material"),
            Self::FiftyMoves => write!(f, "fifty-move rule"),
        }
    }
}
