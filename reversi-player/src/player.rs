//! A computer player that picks moves by searching a [`GameTree`].

use crate::config::PlayerConfig;
use crate::evaluator::ReversiEvaluator;
use crate::reversi::ReversiPosition;
use crate::search::{self, SearchStats};
use crate::tree::GameTree;
use async_std::task;
use reversi_board::{Board, Move, Player};
use std::time::{Duration, Instant};
use tracing::info;

/// The outcome of one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchReport {
    /// `None` if the position is over or the player has to pass.
    pub best_move: Option<Move>,
    /// The root's value, from the searching player's point of view.
    pub value: Option<i32>,
    pub stats: SearchStats,
    /// Time spent searching, excluding any think-time padding.
    pub elapsed: Duration,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AiPlayer {
    config: PlayerConfig,
}

impl AiPlayer {
    /// Panics if `config.max_depth` is zero.
    pub fn new(config: PlayerConfig) -> Self {
        assert!(config.max_depth > 0, "search depth must be at least 1");
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// The evaluator this player scores positions with when moving as `player`.
    pub fn evaluator(&self, player: Player) -> ReversiEvaluator {
        ReversiEvaluator::new(player, self.config.evaluation)
    }

    /// Search from `board` with `player` to move and hand back the whole tree,
    /// for inspection or export.
    pub fn search_tree(&self, board: &Board, player: Player) -> GameTree<ReversiPosition> {
        self.run(board, player).0
    }

    /// Search from `board` with `player` to move, blocking until done.
    pub fn choose_move(&self, board: &Board, player: Player) -> SearchReport {
        let start = Instant::now();
        let (tree, stats) = self.run(board, player);
        let report = SearchReport {
            best_move: tree.best_move(),
            value: tree.root_value(),
            stats,
            elapsed: start.elapsed(),
        };

        match report.best_move {
            Some(mv) => info!(
                %mv,
                value = ?report.value,
                nodes = stats.nodes_visited,
                elapsed_ms = report.elapsed.as_millis() as u64,
                "chose move"
            ),
            None => info!(%player, "no move to choose"),
        }
        report
    }

    /// Like [`choose_move`](Self::choose_move), but searches on a background
    /// task and does not resolve before the configured minimum think time.
    pub async fn think(&self, board: Board, player: Player) -> SearchReport {
        let start = Instant::now();
        let searcher = self.clone();
        let report = task::spawn(async move { searcher.choose_move(&board, player) }).await;

        if let Some(remaining) = self.config.min_think_time.checked_sub(start.elapsed()) {
            if remaining > Duration::from_millis(0) {
                task::sleep(remaining).await;
            }
        }
        report
    }

    fn run(&self, board: &Board, player: Player) -> (GameTree<ReversiPosition>, SearchStats) {
        let mut tree = GameTree::new(ReversiPosition::new(board.clone(), player));
        let stats = search::apply(
            &mut tree,
            self.config.max_depth,
            self.config.algorithm,
            &self.evaluator(player),
        );
        (tree, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::EvaluationMethod;
    use crate::search::SearchAlgorithm;

    #[test]
    fn opening_move_is_legal() {
        let player = AiPlayer::new(PlayerConfig::default().with_max_depth(3));
        let board = Board::new();
        let report = player.choose_move(&board, Player::Black);
        let mv = report.best_move.unwrap();
        assert!(board.legal_moves(Player::Black).contains(&mv));
        assert!(report.value.is_some());
        assert!(report.stats.nodes_visited > 1);
    }

    #[test]
    fn search_tree_matches_choose_move() {
        let player = AiPlayer::new(
            PlayerConfig::default()
                .with_max_depth(2)
                .with_algorithm(SearchAlgorithm::Minimax)
                .with_evaluation(EvaluationMethod::MovesAndTotalScore),
        );
        let board = Board::new();
        let tree = player.search_tree(&board, Player::Black);
        let report = player.choose_move(&board, Player::Black);
        assert_eq!(tree.best_move(), report.best_move);
        assert_eq!(tree.root_value(), report.value);
        assert_eq!(tree.len(), report.stats.nodes_created);
    }

    #[test]
    fn nothing_to_choose_on_a_full_board() {
        let board: Board = "X X X X X X X X X X X X X X X O".parse().unwrap();
        let report = AiPlayer::default().choose_move(&board, Player::White);
        assert_eq!(report.best_move, None);
        assert_eq!(report.value, None);
    }

    #[test]
    fn think_pads_to_the_minimum_time() {
        let player = AiPlayer::new(
            PlayerConfig::default()
                .with_max_depth(1)
                .with_min_think_time(Duration::from_millis(50)),
        );
        let start = Instant::now();
        let report = task::block_on(player.think(Board::new(), Player::Black));
        assert!(start.elapsed() >= Duration::from_millis(50));
        let direct = player.choose_move(&Board::new(), Player::Black);
        assert_eq!(report.best_move, direct.best_move);
        assert_eq!(report.stats, direct.stats);
    }

    #[test]
    #[should_panic]
    fn zero_depth_panics() {
        AiPlayer::new(PlayerConfig {
            max_depth: 0,
            ..PlayerConfig::default()
        });
    }
}
