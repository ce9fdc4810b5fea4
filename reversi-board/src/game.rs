//! Implements game-level Reversi logic.
//!
//! For correctness, this higher-level interface is preferred: it tracks whose
//! turn it is and handles forced passes, which [`Board`] deliberately leaves to
//! its caller.

use crate::{Board, InvalidMove, Move, Player};
use std::cmp::Ordering;
use std::fmt;

/// The complete state of a Reversi game.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Game {
    pub board: Board,
    pub active_player: Player,
    pub just_passed: bool,
}

impl Default for Game {
    /// Gets the starting board, with the starting player to move.
    fn default() -> Self {
        Self::new(Board::new(), Player::default())
    }
}

impl Game {
    pub fn new(board: Board, active_player: Player) -> Self {
        Self {
            board,
            active_player,
            just_passed: false,
        }
    }

    /// Get the legal moves for the active player.
    #[inline]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves(self.active_player)
    }

    /// Returns whether the active player has no legal move but the game goes on.
    pub fn must_pass(&self) -> bool {
        !self.board.has_legal_move(self.active_player) && !self.is_finished()
    }

    /// Hand the turn to the opponent without placing a disc.
    pub fn pass(&self) -> Self {
        Self {
            board: self.board.clone(),
            active_player: !self.active_player,
            just_passed: true,
        }
    }

    /// Make a placement move for the active player.
    /// Moves for the wrong colour are rejected like any other illegal move.
    pub fn apply_move(&self, mv: Move) -> Result<Self, InvalidMove> {
        if mv.player() != self.active_player {
            return Err(mv.into());
        }

        Ok(Self {
            board: self.board.child(mv)?,
            active_player: !self.active_player,
            just_passed: false,
        })
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.board.is_terminal()
    }

    /// Get the winner of a finished game, or `None` for a draw or a game in progress.
    pub fn winner(&self) -> Option<Player> {
        if !self.is_finished() {
            return None;
        }

        let (black, white) = self.board.score();
        match black.cmp(&white) {
            Ordering::Greater => Some(Player::Black),
            Ordering::Less => Some(Player::White),
            Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        let (black, white) = self.board.score();
        write!(f, "Black {} - {} White", black, white)?;
        if self.is_finished() {
            f.write_str(", game over")?;
        } else {
            write!(f, ", {} to move", self.active_player)?;
        }
        if self.just_passed {
            f.write_str(" (last move was a pass)")?;
        }
        Ok(())
    }
}
