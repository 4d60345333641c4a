use arb_core::ID;
use arb_core::ROUND_BREAK;
use arb_core::Tourney;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// The single deferred tick between rounds.
///
/// Holds at most one pending timer; scheduling again or cancelling aborts
/// the previous one, and dropping the breaker (tournament torn down) aborts
/// whatever is left. The receiver must still re-validate tournament status
/// when the tick arrives, since an abort can race an already-sent tick.
#[derive(Default)]
pub struct Breaker {
    pending: Option<JoinHandle<()>>,
}

impl Breaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, ticks: UnboundedSender<ID<Tourney>>, tournament: ID<Tourney>) {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(ROUND_BREAK).await;
            let _ = ticks.send(tournament);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl Drop for Breaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[tokio::test(start_paused = true)]
    async fn tick_arrives_after_the_break() {
        let (tx, mut rx) = unbounded_channel();
        let id = ID::default();
        let mut breaker = Breaker::new();
        breaker.schedule(tx, id);
        tokio::time::advance(ROUND_BREAK).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.try_recv().ok(), Some(id));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_suppresses_the_tick() {
        let (tx, mut rx) = unbounded_channel();
        let mut breaker = Breaker::new();
        breaker.schedule(tx, ID::default());
        breaker.cancel();
        tokio::time::advance(ROUND_BREAK).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_the_pending_tick() {
        let (tx, mut rx) = unbounded_channel();
        let (first, second) = (ID::default(), ID::default());
        let mut breaker = Breaker::new();
        breaker.schedule(tx.clone(), first);
        breaker.schedule(tx, second);
        tokio::time::advance(ROUND_BREAK).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.try_recv().ok(), Some(second));
        assert!(rx.try_recv().is_err());
    }
}
