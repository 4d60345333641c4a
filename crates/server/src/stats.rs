use arb_auth::Roster;
use arb_session::Ledger;
use arb_session::Outcome;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Career-statistics sink backed by the shared member roster.
/// Only casual games flow through here; tournament results stay
/// inside their tournament's standings.
pub struct Stats {
    roster: Arc<RwLock<Roster>>,
}

impl Stats {
    pub fn new(roster: Arc<RwLock<Roster>>) -> Self {
        Self { roster }
    }
}

#[async_trait]
impl Ledger for Stats {
    async fn record(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Decisive { winner, loser } => {
                self.roster.write().await.record_win(winner.id, loser.id);
            }
            Outcome::Draw { players } => {
                self.roster
                    .write()
                    .await
                    .record_draw(players[0].id, players[1].id);
            }
            Outcome::Bye { .. } => {}
        }
    }
}
