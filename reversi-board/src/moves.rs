//! Code for working with [`Move`]s on the board.

use crate::utils::column_letter;
use crate::Player;
use std::fmt::{self, Display, Formatter};

/// A disc placement: a board coordinate plus the colour being placed.
///
/// Two moves are equal iff they name the same square and the same colour.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    x: usize,
    y: usize,
    player: Player,
}

impl Move {
    #[inline]
    pub fn new(x: usize, y: usize, player: Player) -> Self {
        Self { x, y, player }
    }

    /// Column, counted from the left.
    #[inline]
    pub fn x(self) -> usize {
        self.x
    }

    /// Row, counted from the top.
    #[inline]
    pub fn y(self) -> usize {
        self.y
    }

    #[inline]
    pub fn player(self) -> Player {
        self.player
    }
}

/// Convert this [`Move`] into string notation ("D3 (Black)").
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} ({})", column_letter(self.x), self.y + 1, self.player)
    }
}
