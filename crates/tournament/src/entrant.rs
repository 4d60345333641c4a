use arb_auth::Identity;
use arb_auth::Member;
use arb_core::BYE;
use arb_core::ID;
use arb_core::Points;
use arb_session::Outbox;
use arb_session::ServerMessage;
use std::collections::HashSet;

/// One registered player: their connection, running score, and the set of
/// opponents already faced (used to avoid repeat pairings).
pub struct Entrant {
    identity: Identity,
    outbox: Outbox,
    points: Points,
    byes: u16,
    opponents: HashSet<ID<Member>>,
}

impl Entrant {
    pub fn new(identity: Identity, outbox: Outbox) -> Self {
        Self {
            identity,
            outbox,
            points: 0,
            byes: 0,
            opponents: HashSet::new(),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn points(&self) -> Points {
        self.points
    }

    pub fn byes(&self) -> u16 {
        self.byes
    }

    pub fn outbox(&self) -> Outbox {
        self.outbox.clone()
    }

    pub fn has_met(&self, opponent: ID<Member>) -> bool {
        self.opponents.contains(&opponent)
    }

    /// Replace the connection after a reconnect while still Waiting.
    pub(crate) fn rebind(&mut self, outbox: Outbox) {
        self.outbox = outbox;
    }

    pub(crate) fn award(&mut self, points: Points) {
        self.points += points;
    }

    /// A round sat out for lack of an opponent still scores like a win.
    pub(crate) fn bye(&mut self) {
        self.byes += 1;
        self.points += BYE;
    }

    pub(crate) fn met(&mut self, opponent: ID<Member>) {
        self.opponents.insert(opponent);
    }

    pub fn send(&self, message: ServerMessage) {
        if let Err(e) = self.outbox.send(message) {
            log::debug!("[tournament] send to {} failed: {:?}", self.identity, e);
        }
    }
}
