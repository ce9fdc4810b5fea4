//! Reversi as a [`Position`] for the generic search tree.

use crate::evaluator::ReversiEvaluator;
use crate::search::{self, SearchAlgorithm};
use crate::tree::{GameTree, Position};
use reversi_board::{Board, Move, Player};

/// A board snapshot together with the player to move on it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReversiPosition {
    pub board: Board,
    pub player: Player,
}

impl ReversiPosition {
    pub fn new(board: Board, player: Player) -> Self {
        Self { board, player }
    }
}

impl Position for ReversiPosition {
    type Move = Move;

    /// One child per legal move of the player to move, in board scan order;
    /// the opponent moves next in every child.
    fn expand(&self) -> Vec<(Move, Self)> {
        self.board
            .legal_moves(self.player)
            .into_iter()
            .filter_map(|mv| {
                let board = self.board.child(mv).ok()?;
                Some((mv, Self::new(board, !self.player)))
            })
            .collect()
    }

    fn is_end_position(&self) -> bool {
        self.board.is_terminal()
    }
}

/// Search `max_depth` plies ahead from `board` with `player` to move and
/// return the chosen move. Returns `None` when the position is already over
/// or `player` has nothing to play.
pub fn search(
    board: &Board,
    player: Player,
    max_depth: usize,
    algorithm: SearchAlgorithm,
    evaluator: &ReversiEvaluator,
) -> Option<Move> {
    let mut tree = GameTree::new(ReversiPosition::new(board.clone(), player));
    search::apply(&mut tree, max_depth, algorithm, evaluator);
    tree.best_move()
}
