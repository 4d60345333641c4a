use super::*;
use arb_core::ID;
use arb_core::Unique;
use std::collections::HashMap;

/// In-memory member store, keyed by id with a username index.
/// Usernames are unique; the index and the member map never disagree.
#[derive(Debug, Default)]
pub struct Roster {
    members: HashMap<ID<Member>, Member>,
    names: HashMap<String, ID<Member>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    Taken(String),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Taken(name) => write!(f, "username already exists: {}", name),
        }
    }
}

impl std::error::Error for RosterError {}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new member under a unique username.
    /// The password must already be hashed.
    pub fn create(&mut self, username: &str, hashword: String) -> Result<Identity, RosterError> {
        if self.names.contains_key(username) {
            return Err(RosterError::Taken(username.to_string()));
        }
        let member = Member::new(ID::default(), username.to_string(), hashword);
        let identity = member.identity();
        self.names.insert(username.to_string(), member.id());
        self.members.insert(member.id(), member);
        Ok(identity)
    }

    /// Password check folded in so callers cannot distinguish a missing
    /// username from a wrong password.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Identity> {
        self.names
            .get(username)
            .and_then(|id| self.members.get(id))
            .filter(|member| member.verify(password))
            .map(|member| member.identity())
    }

    pub fn get(&self, id: ID<Member>) -> Option<&Member> {
        self.members.get(&id)
    }

    pub fn set_level(&mut self, id: ID<Member>, level: SkillLevel) -> bool {
        match self.members.get_mut(&id) {
            Some(member) => {
                member.set_level(level);
                true
            }
            None => false,
        }
    }

    /// Credit a decisive result to both sides. Unknown ids are skipped.
    pub fn record_win(&mut self, winner: ID<Member>, loser: ID<Member>) {
        if let Some(member) = self.members.get_mut(&winner) {
            member.tally_win();
        }
        if let Some(member) = self.members.get_mut(&loser) {
            member.tally_loss();
        }
    }

    pub fn record_draw(&mut self, one: ID<Member>, two: ID<Member>) {
        if let Some(member) = self.members.get_mut(&one) {
            member.tally_draw();
        }
        if let Some(member) = self.members.get_mut(&two) {
            member.tally_draw();
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
