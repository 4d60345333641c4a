use arb_auth::Member;
use arb_core::ID;
use arb_rules::RulesError;

/// Rejections a live game can hand back to a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The acting member is not seated in this game.
    NotSeated(ID<Member>),
    /// The game already ended; nothing can change it.
    Finished,
    /// It is the other player's move.
    NotYourTurn,
    /// The rules engine refused the move.
    Rejected(RulesError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSeated(who) => write!(f, "not a participant: {}", who),
            Self::Finished => write!(f, "game is already over"),
            Self::NotYourTurn => write!(f, "not your turn"),
            Self::Rejected(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<RulesError> for SessionError {
    fn from(e: RulesError) -> Self {
        match e {
            RulesError::Finished => Self::Finished,
            other => Self::Rejected(other),
        }
    }
}

/// Violations of the one-game-per-player and unique-id invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    DuplicateGame(ID<crate::GameSession>),
    AlreadySeated(ID<Member>),
}

impl std::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateGame(id) => write!(f, "game already listed: {}", id),
            Self::AlreadySeated(who) => write!(f, "player already in a game: {}", who),
        }
    }
}

impl std::error::Error for DirectoryError {}
