//! `reversi-board` implements the rules of Reversi (Othello) on a square grid.
//!
//! This package implements two levels of abstraction:
//!
//!  - [`Board`] holds a grid of [`Cell`]s and knows which moves are legal, how a
//!    move flips discs and when a position is over. It never decides whose turn
//!    it is, so it is suitable for search code that tracks the side to move itself.
//!  - [`Game`] wraps a [`Board`] with the side to move, and handles forced passes
//!    and the winner. This is what the surrounding application plays with.

pub mod test_utils;

mod board;
mod error;
mod game;
mod moves;
mod player;
mod utils;

pub use board::*;
pub use error::*;
pub use game::*;
pub use moves::*;
pub use player::*;

/// The number of spaces on one edge of a standard Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The largest edge length a board can have; columns are lettered A to Z.
pub const MAX_EDGE_LENGTH: usize = 26;
