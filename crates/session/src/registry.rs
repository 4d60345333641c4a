use super::*;
use arb_auth::Identity;
use arb_auth::Member;
use arb_core::ID;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

/// Marker for a single websocket connection. A member who reconnects gets a
/// fresh link id, which is how stale disconnects are told apart from live ones.
pub struct Link;

/// Per-connection outbound message queue, drained by that connection's bridge.
pub type Outbox = UnboundedSender<ServerMessage>;

struct Connection {
    link: ID<Link>,
    outbox: Outbox,
}

/// Maps each signed-in member to its current live connection.
/// Rebinding replaces the previous connection outright; the old bridge's
/// eventual disconnect is ignored because its link id no longer matches.
#[derive(Default)]
pub struct Registry {
    connections: HashMap<ID<Member>, Connection>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, who: &Identity, link: ID<Link>, outbox: Outbox) {
        log::info!("[registry] {} connected on link {}", who, link);
        self.connections.insert(who.id, Connection { link, outbox });
    }

    /// Remove the association, but only if it still belongs to this link.
    /// Returns whether the member actually went offline.
    pub fn unbind(&mut self, who: ID<Member>, link: ID<Link>) -> bool {
        match self.connections.get(&who) {
            Some(connection) if connection.link == link => {
                self.connections.remove(&who);
                log::info!("[registry] {} disconnected", who);
                true
            }
            Some(_) => {
                log::debug!("[registry] stale disconnect for {} ignored", who);
                false
            }
            None => false,
        }
    }

    pub fn lookup(&self, who: ID<Member>) -> Option<&Outbox> {
        self.connections.get(&who).map(|c| &c.outbox)
    }

    pub fn contains(&self, who: ID<Member>) -> bool {
        self.connections.contains_key(&who)
    }

    /// Sends a message to one member's connection, if any.
    pub fn send(&self, who: ID<Member>, message: ServerMessage) {
        match self.lookup(who).map(|outbox| outbox.send(message)) {
            Some(Ok(())) => {}
            Some(Err(e)) => log::warn!("[registry] send to {} failed: {:?}", who, e),
            None => log::debug!("[registry] send to {}: not connected", who),
        }
    }

    /// Sends a message to every live connection.
    pub fn broadcast(&self, message: ServerMessage) {
        for (who, connection) in self.connections.iter() {
            if let Err(e) = connection.outbox.send(message.clone()) {
                log::warn!("[registry] broadcast to {} failed: {:?}", who, e);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
