//! Chess rules adapter over shakmaty.
//!
//! This crate owns everything about the game itself and nothing about who is
//! playing it: positions, move legality, and terminal detection. Session and
//! tournament layers treat it as an oracle.
//!
//! - [`Board`] — Position state machine with FEN import/export
//! - [`MoveRequest`] — Wire-shaped move payload (from/to/promotion)
//! - [`Color`] — Side to move, with random assignment for pairing
//! - [`Terminal`] — How a finished game ended on the board
mod board;
mod color;
mod error;
mod request;
mod terminal;

pub use board::*;
pub use color::*;
pub use error::*;
pub use request::*;
pub use terminal::*;
