//! Errors reported by board operations.

use crate::{Move, Player};
use derive_more::{Display, Error};

/// A placement that the rules do not allow: the square is occupied, off the
/// board, or the disc would not flip any opponent run.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "invalid move for {} at ({}, {})", player, x, y)]
pub struct InvalidMove {
    pub x: usize,
    pub y: usize,
    pub player: Player,
}

impl From<Move> for InvalidMove {
    fn from(mv: Move) -> Self {
        Self {
            x: mv.x(),
            y: mv.y(),
            player: mv.player(),
        }
    }
}

/// Failure to read a board from its text form.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum ParseBoardError {
    #[display(fmt = "board string has no cells")]
    Empty,
    #[display(fmt = "{} cells do not form a square board", cells)]
    NotSquare { cells: usize },
    #[display(fmt = "board edge of {} is too large", dimension)]
    TooLarge { dimension: usize },
    #[display(fmt = "unrecognized cell character {:?}", found)]
    InvalidCharacter { found: char },
}
