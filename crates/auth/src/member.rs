use super::*;
use arb_core::ID;
use arb_core::Unique;

/// Starting rating for fresh accounts. Never recalculated yet.
const BASE_ELO: u16 = 1200;

/// Registered user with credentials and lifetime tallies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: ID<Self>,
    username: String,
    hashword: String,
    level: SkillLevel,
    elo: u16,
    wins: u32,
    losses: u32,
    draws: u32,
}

impl Member {
    pub fn new(id: ID<Self>, username: String, hashword: String) -> Self {
        Self {
            id,
            username,
            hashword,
            level: SkillLevel::default(),
            elo: BASE_ELO,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn level(&self) -> SkillLevel {
        self.level
    }
    pub fn elo(&self) -> u16 {
        self.elo
    }
    pub fn wins(&self) -> u32 {
        self.wins
    }
    pub fn losses(&self) -> u32 {
        self.losses
    }
    pub fn draws(&self) -> u32 {
        self.draws
    }
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.username.clone())
    }
    /// Check a plaintext password against the stored hash.
    pub fn verify(&self, password: &str) -> bool {
        password::verify(password, &self.hashword)
    }
    pub(crate) fn set_level(&mut self, level: SkillLevel) {
        self.level = level;
    }
    pub(crate) fn tally_win(&mut self) {
        self.wins += 1;
    }
    pub(crate) fn tally_loss(&mut self) {
        self.losses += 1;
    }
    pub(crate) fn tally_draw(&mut self) {
        self.draws += 1;
    }
}

impl Unique for Member {
    fn id(&self) -> ID<Self> {
        self.id
    }
}
