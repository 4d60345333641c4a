use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentError {
    /// Registration attempted while the tournament is past Waiting.
    Closed,
    /// Start attempted on a tournament that already left Waiting.
    NotWaiting,
    /// Start attempted with fewer entrants than a round needs.
    TooFewPlayers,
}

impl fmt::Display for TournamentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "registration is closed"),
            Self::NotWaiting => write!(f, "tournament has already started"),
            Self::TooFewPlayers => write!(f, "not enough players to start"),
        }
    }
}

impl Error for TournamentError {}
