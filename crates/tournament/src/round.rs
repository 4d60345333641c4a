use arb_auth::Identity;
use arb_core::ID;
use arb_session::GameSession;
use arb_session::MatchRecord;
use arb_session::Outcome;
use arb_session::RoundRecord;

/// A formed pairing and, once its game finishes, the outcome.
/// The first player listed always holds the white pieces.
pub struct Match {
    pub game: ID<GameSession>,
    pub white: Identity,
    pub black: Identity,
    pub result: Option<Outcome>,
}

impl Match {
    /// Chess scoreline relative to white, or None while still running.
    pub fn notation(&self) -> Option<String> {
        match self.result.as_ref()? {
            Outcome::Decisive { winner, .. } if winner.id == self.white.id => {
                Some("1-0".to_string())
            }
            Outcome::Decisive { .. } => Some("0-1".to_string()),
            Outcome::Draw { .. } => Some("1/2-1/2".to_string()),
            Outcome::Bye { .. } => None,
        }
    }

    pub fn record(&self) -> MatchRecord {
        MatchRecord {
            id: self.game,
            players: [self.white.id, self.black.id],
            result: self.notation(),
        }
    }
}

/// One completed or in-flight pairing pass.
pub struct Round {
    pub number: usize,
    pub matches: Vec<Match>,
    pub byes: Vec<Identity>,
}

impl Round {
    pub fn record(&self) -> RoundRecord {
        RoundRecord {
            round: self.number,
            games: self.matches.iter().map(Match::record).collect(),
            byes: self.byes.iter().map(|identity| identity.id).collect(),
        }
    }
}
