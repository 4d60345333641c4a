use super::*;
use arb_core::Arbitrary;
use arb_core::ID;
use arb_core::Unique;

/// Who a connection speaks for. Cheap to clone and safe to hand to every
/// layer: carries no credentials, only the routable id and display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub id: ID<Member>,
    pub username: String,
}

impl Identity {
    pub fn new(id: ID<Member>, username: String) -> Self {
        Self { id, username }
    }
}

impl Unique<Member> for Identity {
    fn id(&self) -> ID<Member> {
        self.id
    }
}

impl Arbitrary for Identity {
    fn random() -> Self {
        let id: ID<Member> = ID::default();
        let tag = id.to_string()[24..].to_string();
        Self {
            id,
            username: format!("player-{}", tag),
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_identities_are_distinct() {
        let a = Identity::random();
        let b = Identity::random();
        assert_ne!(a.id, b.id);
        assert_ne!(a.username, b.username);
    }
}
