//! `reversi-player` searches game trees and plays Reversi with the result.
//!
//! The crate is split into two layers:
//!
//!  - [`tree`] and [`search`] are generic over any game that implements
//!    [`Position`]: a lazily expanded arena tree, plus minimax and alpha-beta
//!    traversals that leave the chosen move at the root.
//!  - [`ReversiPosition`], [`ReversiEvaluator`], [`AiPlayer`] and
//!    [`Controller`] bind that machinery to `reversi-board` and drive whole
//!    games between players, with observers notified of every turn.
//!
//! [`render_dot`] exports a searched tree as Graphviz for debugging.

pub mod search;
pub mod tree;

mod config;
mod controller;
mod evaluator;
mod graphviz;
mod player;
mod reversi;

pub use config::*;
pub use controller::*;
pub use evaluator::*;
pub use graphviz::*;
pub use player::*;
pub use reversi::*;
pub use search::{SearchAlgorithm, SearchStats};
pub use tree::{Evaluator, GameTree, NodeId, NodeType, Position};
