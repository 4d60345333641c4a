//! Live game sessions and the machinery that routes players into them.
//!
//! Everything here is synchronous state plus channel sends: the owning task
//! (the server's lobby) mutates these structures one inbound event at a time,
//! so none of them lock.
//!
//! ## Components
//!
//! - [`Registry`] — Maps each signed-in member to its live connection
//! - [`Queue`] — FIFO matchmaking for casual 1v1 games
//! - [`GameSession`] — One pairwise game: seats, position, completion
//! - [`Directory`] — All active sessions, enforcing one game per player
//!
//! ## Reporting
//!
//! - [`Report`] / [`Outcome`] / [`Reason`] — Completion messages sessions emit
//! - [`Ledger`] — Seam for recording casual results to career stats
//!
//! ## Wire
//!
//! - [`ClientMessage`] / [`ServerMessage`] — Socket event vocabulary
//! - [`Protocol`] — JSON decode/encode boundary
mod directory;
mod error;
mod game;
mod message;
mod protocol;
mod queue;
mod registry;
mod report;

pub use directory::*;
pub use error::*;
pub use game::*;
pub use message::*;
pub use protocol::*;
pub use queue::*;
pub use registry::*;
pub use report::*;
