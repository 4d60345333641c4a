//! Authentication and identity management.
//!
//! JWT-based authentication with Argon2 password hashing, backed by an
//! in-memory member roster.
//!
//! ## Identity Types
//!
//! - [`Member`] — Registered user with profile and lifetime tallies
//! - [`Identity`] — Lightweight (id, username) handle passed between layers
//! - [`Roster`] — In-memory member store keyed by id and username
//! - [`SkillLevel`] — Self-declared strength shown on profiles
//!
//! ## Security
//!
//! - [`Crypto`] — JWT signing and verification
//! - [`Claims`] — JWT payload structure
//! - [`password`] — Argon2 hashing and verification
mod claims;
mod crypto;
mod dto;
mod identity;
mod level;
mod member;
pub mod password;
mod roster;

pub use claims::*;
pub use crypto::*;
pub use dto::*;
pub use identity::*;
pub use level::*;
pub use member::*;
pub use roster::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;
