use super::*;
use arb_auth::Member;
use arb_core::ID;
use arb_core::Unique;
use std::collections::HashMap;

/// Every live game on the server, indexed by game and by seat.
///
/// The seat index enforces one active game per member: an insert that would
/// double-book a seat is refused outright rather than silently shadowing the
/// earlier game.
#[derive(Default)]
pub struct Directory {
    games: HashMap<ID<GameSession>, GameSession>,
    seats: HashMap<ID<Member>, ID<GameSession>>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session: GameSession) -> Result<(), DirectoryError> {
        if self.games.contains_key(&session.id()) {
            return Err(DirectoryError::DuplicateGame(session.id()));
        }
        for player in [session.white().id, session.black().id] {
            if self.seats.contains_key(&player) {
                return Err(DirectoryError::AlreadySeated(player));
            }
        }
        self.seats.insert(session.white().id, session.id());
        self.seats.insert(session.black().id, session.id());
        self.games.insert(session.id(), session);
        Ok(())
    }

    /// Drops a game and frees its seats. Seat entries pointing elsewhere
    /// (a member already reseated in a newer game) are left alone.
    pub fn remove(&mut self, game: ID<GameSession>) -> Option<GameSession> {
        let session = self.games.remove(&game)?;
        for player in [session.white().id, session.black().id] {
            if self.seats.get(&player) == Some(&game) {
                self.seats.remove(&player);
            }
        }
        Some(session)
    }

    pub fn get(&self, game: ID<GameSession>) -> Option<&GameSession> {
        self.games.get(&game)
    }

    pub fn get_mut(&mut self, game: ID<GameSession>) -> Option<&mut GameSession> {
        self.games.get_mut(&game)
    }

    /// The game a member is currently seated in, if any.
    pub fn find(&self, player: ID<Member>) -> Option<ID<GameSession>> {
        self.seats.get(&player).copied()
    }

    pub fn playing(&self, player: ID<Member>) -> bool {
        self.seats.contains_key(&player)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arb_auth::Identity;
    use arb_core::Arbitrary;
    use tokio::sync::mpsc::unbounded_channel;

    fn session(white: &Identity, black: &Identity) -> GameSession {
        let (tx, _rx) = unbounded_channel();
        let (reports, _rx) = unbounded_channel();
        GameSession::new(
            Seat::new(white.clone(), tx.clone()),
            Seat::new(black.clone(), tx),
            Origin::Casual,
            reports,
        )
    }

    #[test]
    fn insert_indexes_both_seats() {
        let (a, b) = (Identity::random(), Identity::random());
        let game = session(&a, &b);
        let id = game.id();
        let mut directory = Directory::new();
        directory.insert(game).unwrap();
        assert_eq!(directory.find(a.id), Some(id));
        assert_eq!(directory.find(b.id), Some(id));
        assert!(directory.playing(a.id));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn seated_member_cannot_join_a_second_game() {
        let (a, b, c) = (Identity::random(), Identity::random(), Identity::random());
        let mut directory = Directory::new();
        directory.insert(session(&a, &b)).unwrap();
        let err = directory.insert(session(&a, &c)).unwrap_err();
        assert_eq!(err, DirectoryError::AlreadySeated(a.id));
        assert_eq!(directory.len(), 1);
        assert!(!directory.playing(c.id));
    }

    #[test]
    fn remove_frees_the_seats() {
        let (a, b) = (Identity::random(), Identity::random());
        let game = session(&a, &b);
        let id = game.id();
        let mut directory = Directory::new();
        directory.insert(game).unwrap();
        assert!(directory.remove(id).is_some());
        assert!(!directory.playing(a.id));
        assert!(!directory.playing(b.id));
        assert!(directory.remove(id).is_none());
        directory.insert(session(&a, &b)).unwrap();
    }

    #[test]
    fn stale_remove_spares_reseated_members() {
        let (a, b, c) = (Identity::random(), Identity::random(), Identity::random());
        let first = session(&a, &b);
        let stale = first.id();
        let mut directory = Directory::new();
        directory.insert(first).unwrap();
        directory.remove(stale).unwrap();
        // a sits down again, then the old game id comes back around
        let second = session(&a, &c);
        let current = second.id();
        directory.insert(second).unwrap();
        assert!(directory.remove(stale).is_none());
        assert_eq!(directory.find(a.id), Some(current));
        assert_eq!(directory.find(c.id), Some(current));
    }
}
