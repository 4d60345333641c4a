use arb_auth::Identity;
use arb_auth::Member;
use arb_core::ID;
use std::collections::VecDeque;

/// FIFO matchmaking for casual games. No skill matching: the two players who
/// have waited longest get paired, full stop.
#[derive(Debug, Default)]
pub struct Queue {
    waiting: VecDeque<Identity>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a seeker and, if two or more are now waiting, pop the two oldest
    /// as a pairing. Re-enqueueing moves the seeker to the back rather than
    /// duplicating them. At most one pairing comes out per call.
    pub fn enqueue(&mut self, who: Identity) -> Option<(Identity, Identity)> {
        self.cancel(who.id);
        log::debug!("[queue] {} waiting ({} ahead)", who, self.waiting.len());
        self.waiting.push_back(who);
        if self.waiting.len() >= arb_core::SEATS {
            let first = self.waiting.pop_front()?;
            let second = self.waiting.pop_front()?;
            log::info!("[queue] paired {} vs {}", first, second);
            Some((first, second))
        } else {
            None
        }
    }

    /// Remove a seeker if present. Returns whether anything was removed.
    pub fn cancel(&mut self, who: ID<Member>) -> bool {
        let before = self.waiting.len();
        self.waiting.retain(|waiting| waiting.id != who);
        before != self.waiting.len()
    }

    pub fn contains(&self, who: ID<Member>) -> bool {
        self.waiting.iter().any(|waiting| waiting.id == who)
    }

    /// Put a seeker back at the front, ahead of everyone else.
    /// Used when a popped pairing cannot be fulfilled after all.
    pub fn requeue(&mut self, who: Identity) {
        self.cancel(who.id);
        self.waiting.push_front(who);
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}
