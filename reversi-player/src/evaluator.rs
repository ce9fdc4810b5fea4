//! Static evaluation of Reversi positions.
//!
//! Every heuristic adds the perspective player's mobility to one positional
//! term. The perspective is fixed when the evaluator is built and does not
//! follow the side to move: MAX/MIN alternation in the tree already accounts
//! for whose turn it is.

use crate::reversi::ReversiPosition;
use crate::tree::Evaluator;
use derive_more::{Display, Error};
use reversi_board::{Board, Cell, Player};
use std::fmt;

/// Weight of one corner disc relative to a single legal move.
const CORNER_WEIGHT: i32 = 100;

/// The positional term combined with mobility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EvaluationMethod {
    /// Mobility plus the disc-count difference.
    MovesAndTotalScore,
    /// Mobility plus the difference in non-corner edge discs.
    MovesAndSides,
    /// Mobility plus a heavily weighted corner difference.
    MovesAndCorners,
}

impl Default for EvaluationMethod {
    fn default() -> Self {
        Self::MovesAndCorners
    }
}

impl fmt::Display for EvaluationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationMethod::MovesAndTotalScore => f.write_str("total"),
            EvaluationMethod::MovesAndSides => f.write_str("sides"),
            EvaluationMethod::MovesAndCorners => f.write_str("corners"),
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "unknown evaluation method (expected total, sides or corners)")]
pub struct ParseEvaluationError;

impl std::str::FromStr for EvaluationMethod {
    type Err = ParseEvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "total" => Ok(EvaluationMethod::MovesAndTotalScore),
            "sides" => Ok(EvaluationMethod::MovesAndSides),
            "corners" => Ok(EvaluationMethod::MovesAndCorners),
            _ => Err(ParseEvaluationError),
        }
    }
}

/// Scores boards for one player with one [`EvaluationMethod`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReversiEvaluator {
    player: Player,
    method: EvaluationMethod,
}

impl ReversiEvaluator {
    pub fn new(player: Player, method: EvaluationMethod) -> Self {
        Self { player, method }
    }

    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    #[inline]
    pub fn method(&self) -> EvaluationMethod {
        self.method
    }

    pub fn evaluate_board(&self, board: &Board) -> i32 {
        let mobility = board.legal_moves(self.player).len() as i32;
        let positional = match self.method {
            EvaluationMethod::MovesAndTotalScore => self.disc_difference(board),
            EvaluationMethod::MovesAndSides => self.edge_difference(board),
            EvaluationMethod::MovesAndCorners => self.corner_difference(board) * CORNER_WEIGHT,
        };
        mobility + positional
    }

    /// +1 for our disc, -1 for theirs, 0 for an empty square.
    #[inline]
    fn weigh(&self, cell: Cell) -> i32 {
        match cell.owner() {
            Some(owner) if owner == self.player => 1,
            Some(_) => -1,
            None => 0,
        }
    }

    fn disc_difference(&self, board: &Board) -> i32 {
        board.cells().map(|cell| self.weigh(cell)).sum()
    }

    fn edge_difference(&self, board: &Board) -> i32 {
        let max = board.dimension() - 1;
        (1..max)
            .map(|i| {
                self.weigh(board.get(i, 0))
                    + self.weigh(board.get(0, i))
                    + self.weigh(board.get(i, max))
                    + self.weigh(board.get(max, i))
            })
            .sum()
    }

    fn corner_difference(&self, board: &Board) -> i32 {
        let max = board.dimension() - 1;
        [(0, 0), (max, 0), (0, max), (max, max)]
            .iter()
            .map(|&(x, y)| self.weigh(board.get(x, y)))
            .sum()
    }
}

impl Default for ReversiEvaluator {
    fn default() -> Self {
        Self::new(Player::default(), EvaluationMethod::default())
    }
}

impl Evaluator<ReversiPosition> for ReversiEvaluator {
    fn evaluate(&self, position: &ReversiPosition) -> i32 {
        self.evaluate_board(&position.board)
    }
}
