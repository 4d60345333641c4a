use arb_auth::Identity;
use arb_core::ID;
use arb_core::Tourney;
use arb_rules::Terminal;
use async_trait::async_trait;

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoves,
    Resignation,
    Abandonment,
}

impl From<Terminal> for Reason {
    fn from(terminal: Terminal) -> Self {
        match terminal {
            Terminal::Checkmate { .. } => Self::Checkmate,
            Terminal::Stalemate => Self::Stalemate,
            Terminal::InsufficientMaterial => Self::InsufficientMaterial,
            Terminal::FiftyMoves => Self::FiftyMoves,
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Checkmate => write!(f, "checkmate"),
            Self::Stalemate => write!(f, "stalemate"),
            Self::InsufficientMaterial => write!(f, "insufficient material"),
            Self::FiftyMoves => write!(f, "fifty-move rule"),
            Self::Resignation => write!(f, "resignation"),
            Self::Abandonment => write!(f, "abandonment"),
        }
    }
}

/// Who got what out of a finished pairing. Byes never pass through a game,
/// but they score through the same shape inside tournaments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Decisive { winner: Identity, loser: Identity },
    Draw { players: [Identity; 2] },
    Bye { player: Identity },
}

impl Outcome {
    pub fn winner(&self) -> Option<&Identity> {
        match self {
            Self::Decisive { winner, .. } => Some(winner),
            Self::Bye { player } => Some(player),
            Self::Draw { .. } => None,
        }
    }
    pub fn is_draw(&self) -> bool {
        matches!(self, Self::Draw { .. })
    }
}

/// Which collaborator a session reports back to when it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Casual,
    Tournament(ID<Tourney>),
}

/// Exactly one of these is emitted per game, ever.
#[derive(Debug, Clone)]
pub struct Report {
    pub game: ID<crate::GameSession>,
    pub origin: Origin,
    pub reason: Reason,
    pub outcome: Outcome,
}

/// Seam for recording finished casual games to career statistics.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn record(&self, outcome: &Outcome);
}
