//! Search settings for an [`AiPlayer`](crate::AiPlayer).

use crate::evaluator::EvaluationMethod;
use crate::search::SearchAlgorithm;
use std::time::Duration;

/// Search depth used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// How an [`AiPlayer`](crate::AiPlayer) searches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Plies to look ahead. Must be at least 1.
    pub max_depth: usize,
    pub algorithm: SearchAlgorithm,
    pub evaluation: EvaluationMethod,
    /// A move is never reported sooner than this after it was requested.
    pub min_think_time: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            algorithm: SearchAlgorithm::default(),
            evaluation: EvaluationMethod::default(),
            min_think_time: Duration::from_millis(0),
        }
    }
}

impl PlayerConfig {
    /// Panics if `max_depth` is zero.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        assert!(max_depth > 0, "search depth must be at least 1");
        self.max_depth = max_depth;
        self
    }

    pub fn with_algorithm(mut self, algorithm: SearchAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_evaluation(mut self, evaluation: EvaluationMethod) -> Self {
        self.evaluation = evaluation;
        self
    }

    pub fn with_min_think_time(mut self, min_think_time: Duration) -> Self {
        self.min_think_time = min_think_time;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PlayerConfig::default();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.algorithm, SearchAlgorithm::AlphaBeta);
        assert_eq!(config.evaluation, EvaluationMethod::MovesAndCorners);
        assert_eq!(config.min_think_time, Duration::from_millis(0));
    }

    #[test]
    fn builders() {
        let config = PlayerConfig::default()
            .with_max_depth(2)
            .with_algorithm(SearchAlgorithm::Minimax)
            .with_evaluation(EvaluationMethod::MovesAndSides)
            .with_min_think_time(Duration::from_millis(250));
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.algorithm, SearchAlgorithm::Minimax);
        assert_eq!(config.evaluation, EvaluationMethod::MovesAndSides);
        assert_eq!(config.min_think_time, Duration::from_millis(250));
    }

    #[test]
    #[should_panic]
    fn zero_depth_panics() {
        PlayerConfig::default().with_max_depth(0);
    }
}
