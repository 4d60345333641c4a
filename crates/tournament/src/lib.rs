//! Swiss-style tournament orchestration.
//!
//! A [`Tournament`] walks `Waiting -> Running -> Finished`, pairing its
//! roster each round by descending score, handing formed pairs to the
//! session directory as live games, and folding completion reports back
//! into scores and round history. Between rounds a [`Breaker`] holds a
//! single cancellable delay; when it fires, the owner feeds the tick back
//! in and the next pairing pass runs. All mutation happens on the owning
//! task, so nothing here locks.

mod entrant;
mod error;
mod round;
mod schedule;
mod tournament;

pub use entrant::*;
pub use error::*;
pub use round::*;
pub use schedule::*;
pub use tournament::*;
