//! Core type aliases, traits, and constants for the arbiter platform.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the arbiter workspace.
#![allow(dead_code)]

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Tournament scores in half-point units (win = 2, draw = 1).
/// Integer storage keeps ordering exact; divide by 2 for display.
pub type Points = u16;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and color assignment.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    /// Useful for converting between marker types.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> std::str::FromStr for ID<T> {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self::from)
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

/// Marker for tournament identifiers.
/// Lives here so session-level code can route by tournament id without
/// depending on the tournament crate.
pub struct Tourney;

// ============================================================================
// SEATING AND MATCHMAKING
// ============================================================================
/// Players seated at a board.
pub const SEATS: usize = 2;
/// Minimum registered entrants required to start a tournament.
pub const MIN_ENTRANTS: usize = 2;

// ============================================================================
// SWISS SCHEDULE
// Round count is fixed at start time from the field size.
// ============================================================================
/// Fields at or below this size get the short schedule.
pub const SMALL_FIELD: usize = 4;
/// Rounds played when the field is small.
pub const ROUNDS_SMALL: usize = 3;
/// Rounds played when the field is large.
pub const ROUNDS_LARGE: usize = 5;
/// Repeat pairings are permitted when the roster shrinks below this.
pub const REMATCH_FLOOR: usize = 3;
/// Pause between a round completing and the next one pairing.
pub const ROUND_BREAK: std::time::Duration = std::time::Duration::from_secs(5);

// ============================================================================
// SCORING (half-point units)
// ============================================================================
/// Points awarded for a won game.
pub const WIN: Points = 2;
/// Points awarded to each side of a drawn game.
pub const DRAW: Points = 1;
/// Points awarded for sitting out an odd round.
pub const BYE: Points = 2;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
/// Use when you need hard shutdown without waiting for games to settle.
#[cfg(feature = "server")]
pub fn halt() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.unwrap();
        println!();
        log::warn!("violent interrupt received, exiting immediately");
        std::process::exit(0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha;
    struct Omega;

    #[test]
    fn id_cast_preserves_uuid() {
        let a: ID<Alpha> = ID::default();
        let o: ID<Omega> = a.cast();
        assert_eq!(a.inner(), o.inner());
    }

    #[test]
    fn id_roundtrips_through_string() {
        let a: ID<Alpha> = ID::default();
        let parsed: ID<Alpha> = a.to_string().parse().expect("parse uuid");
        assert_eq!(a, parsed);
    }

    #[test]
    fn id_rejects_garbage() {
        assert!("not-a-uuid".parse::<ID<Alpha>>().is_err());
    }

    #[test]
    fn fresh_ids_are_distinct() {
        let a: ID<Alpha> = ID::default();
        let b: ID<Alpha> = ID::default();
        assert_ne!(a, b);
    }

    #[test]
    fn id_serializes_as_bare_uuid() {
        let a: ID<Alpha> = ID::default();
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, format!("\"{}\"", a));
        let back: ID<Alpha> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn schedule_shortens_for_small_fields() {
        assert!(ROUNDS_SMALL < ROUNDS_LARGE);
        assert!(MIN_ENTRANTS <= SMALL_FIELD);
    }
}
