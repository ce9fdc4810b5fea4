//! Minimax and alpha-beta search over a [`GameTree`].
//!
//! Both algorithms walk the tree depth-first with an explicit stack instead of
//! recursion. A node is pushed back under its next child, so it is popped
//! again after each child resolves; children report upward through
//! [`GameTree::propagate`] and the root ends up holding the chosen move.

use crate::tree::{Evaluator, GameTree, NodeId, NodeType, Position};
use derive_more::{Display, Error};
use std::fmt;
use tracing::{debug, trace};

/// Which traversal to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchAlgorithm {
    Minimax,
    AlphaBeta,
}

impl Default for SearchAlgorithm {
    fn default() -> Self {
        Self::AlphaBeta
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchAlgorithm::Minimax => f.write_str("minimax"),
            SearchAlgorithm::AlphaBeta => f.write_str("alpha-beta"),
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "unknown search algorithm (expected minimax or alpha-beta)")]
pub struct ParseAlgorithmError;

impl std::str::FromStr for SearchAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(SearchAlgorithm::Minimax),
            "alpha-beta" | "alphabeta" | "ab" => Ok(SearchAlgorithm::AlphaBeta),
            _ => Err(ParseAlgorithmError),
        }
    }
}

/// Counters describing the work a search did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes allocated in the tree, including the root.
    pub nodes_created: usize,
    /// Distinct nodes popped off the search stack.
    pub nodes_visited: usize,
    /// Static evaluations performed.
    pub leaves_evaluated: usize,
    /// Nodes abandoned with children left unexplored.
    pub cutoffs: usize,
}

/// Run `algorithm` from the root of `tree` down to `max_depth` plies.
/// Afterwards [`GameTree::best_move`] holds the chosen move, if any.
pub fn apply<P, E>(
    tree: &mut GameTree<P>,
    max_depth: usize,
    algorithm: SearchAlgorithm,
    evaluator: &E,
) -> SearchStats
where
    P: Position,
    E: Evaluator<P>,
{
    match algorithm {
        SearchAlgorithm::Minimax => minimax(tree, max_depth, evaluator),
        SearchAlgorithm::AlphaBeta => alpha_beta(tree, max_depth, evaluator),
    }
}

/// Plain minimax: every node down to the depth bound is visited.
pub fn minimax<P, E>(tree: &mut GameTree<P>, max_depth: usize, evaluator: &E) -> SearchStats
where
    P: Position,
    E: Evaluator<P>,
{
    traverse(tree, max_depth, evaluator, false)
}

/// Minimax with pruning. Before descending into a further child, a node that
/// already holds a value is compared against its parent's value only: under a
/// MAX parent it continues while its value is `>=` the parent's, under a MIN
/// parent while it is `<=`. The chosen move is the same as [`minimax`]'s.
pub fn alpha_beta<P, E>(tree: &mut GameTree<P>, max_depth: usize, evaluator: &E) -> SearchStats
where
    P: Position,
    E: Evaluator<P>,
{
    traverse(tree, max_depth, evaluator, true)
}

fn traverse<P, E>(tree: &mut GameTree<P>, max_depth: usize, evaluator: &E, prune: bool) -> SearchStats
where
    P: Position,
    E: Evaluator<P>,
{
    let root = tree.root();
    let mut stats = SearchStats::default();

    if tree.is_end_position(root) {
        debug!("root is an end position, nothing to search");
        stats.nodes_created = tree.len();
        return stats;
    }

    debug!(max_depth, prune, "starting search");

    let mut stack: Vec<NodeId> = vec![root];
    while let Some(id) = stack.pop() {
        if !tree.get(id).is_visited() {
            stats.nodes_visited += 1;
        }

        if tree.is_terminal(id, max_depth) {
            evaluate(tree, id, evaluator);
            stats.leaves_evaluated += 1;
        } else if tree.has_more_children(id) {
            if !prune || may_descend(tree, id) {
                stack.push(id);
                if let Some(child) = tree.next_child(id) {
                    stack.push(child);
                }
            } else {
                trace!(node = %tree.describe(id), "cutoff");
                stats.cutoffs += 1;
            }
        } else {
            // A childless node that is not an end position (a forced pass)
            // holds no value, so it never competes at its parent.
            tree.propagate(id);
        }

        tree.mark_visited(id);
    }

    stats.nodes_created = tree.len();
    debug!(
        nodes_created = stats.nodes_created,
        nodes_visited = stats.nodes_visited,
        leaves_evaluated = stats.leaves_evaluated,
        cutoffs = stats.cutoffs,
        value = ?tree.root_value(),
        "search finished"
    );
    stats
}

/// Give a node its static value and report it to the parent.
fn evaluate<P, E>(tree: &mut GameTree<P>, id: NodeId, evaluator: &E)
where
    P: Position,
    E: Evaluator<P>,
{
    let value = evaluator.evaluate(tree.get(id).position());
    tree.propose_value(id, value);
    tree.propagate(id);
}

/// The pruning gate: whether a node may still improve on its parent's value.
fn may_descend<P: Position>(tree: &GameTree<P>, id: NodeId) -> bool {
    let node = tree.get(id);
    let (parent, value) = match (node.parent(), node.value()) {
        (Some(parent), Some(value)) => (tree.get(parent), value),
        _ => return true,
    };

    match (parent.value(), parent.node_type()) {
        (None, _) => true,
        (Some(bound), NodeType::Max) => value >= bound,
        (Some(bound), NodeType::Min) => value <= bound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::tests::{FixedTree, Leaves};
    use std::str::FromStr;

    /// Root (MAX) with three MIN children, each with three leaves.
    ///
    /// ```text
    ///              0
    ///      1       2        3
    ///   4  5  6  7 8 9  10 11 12
    ///   3 12  8  2 4 6  14  5  2
    /// ```
    fn textbook() -> GameTree<FixedTree> {
        GameTree::new(FixedTree {
            edges: &[
                &[1, 2, 3],
                &[4, 5, 6],
                &[7, 8, 9],
                &[10, 11, 12],
                &[],
                &[],
                &[],
                &[],
                &[],
                &[],
                &[],
                &[],
                &[],
            ],
            values: &[0, 0, 0, 0, 3, 12, 8, 2, 4, 6, 14, 5, 2],
            passes: &[],
            at: 0,
        })
    }

    #[test]
    fn minimax_textbook() {
        let mut tree = textbook();
        let stats = minimax(&mut tree, 2, &Leaves);
        assert_eq!(tree.root_value(), Some(3));
        assert_eq!(tree.best_move(), Some(1));
        assert_eq!(stats.nodes_visited, 13);
        assert_eq!(stats.leaves_evaluated, 9);
        assert_eq!(stats.cutoffs, 0);
        assert_eq!(tree.visited_count(), 13);
    }

    #[test]
    fn alpha_beta_textbook() {
        let mut tree = textbook();
        let stats = alpha_beta(&mut tree, 2, &Leaves);
        assert_eq!(tree.root_value(), Some(3));
        assert_eq!(tree.best_move(), Some(1));

        // Node 2 stops after its first leaf (2 < 3); node 3 needs all three.
        assert_eq!(stats.cutoffs, 1);
        assert_eq!(stats.leaves_evaluated, 7);
        assert!(!tree.get(NodeId(8)).is_visited());
        assert!(!tree.get(NodeId(9)).is_visited());
        assert!(tree.get(NodeId(12)).is_visited());
    }

    #[test]
    fn depth_bound_evaluates_interior_nodes() {
        let mut tree = textbook();
        let stats = minimax(&mut tree, 1, &Leaves);
        assert_eq!(stats.leaves_evaluated, 3);
        assert_eq!(tree.root_value(), Some(0));
        assert_eq!(tree.best_move(), Some(1));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn end_position_root_is_a_no_op() {
        let mut tree = GameTree::new(FixedTree {
            edges: &[&[]],
            values: &[5],
            passes: &[],
            at: 0,
        });
        let stats = apply(&mut tree, 3, SearchAlgorithm::AlphaBeta, &Leaves);
        assert_eq!(stats.nodes_visited, 0);
        assert_eq!(tree.best_move(), None);
        assert_eq!(tree.root_value(), None);
    }

    #[test]
    fn zero_depth_picks_nothing() {
        let mut tree = textbook();
        minimax(&mut tree, 0, &Leaves);
        assert_eq!(tree.best_move(), None);
        assert_eq!(tree.root_value(), Some(0));
    }

    #[test]
    fn ties_keep_the_first_child() {
        let mut tree = GameTree::new(FixedTree {
            edges: &[&[1, 2, 3], &[], &[], &[]],
            values: &[0, 7, 7, 7],
            passes: &[],
            at: 0,
        });
        minimax(&mut tree, 4, &Leaves);
        assert_eq!(tree.best_move(), Some(1));
    }

    #[test]
    fn forced_pass_below_the_root_never_competes() {
        // Node 1 is not over but has no move; node 2 is an end position.
        let tree = || {
            GameTree::new(FixedTree {
                edges: &[&[1, 2], &[], &[]],
                values: &[0, 10, 5],
                passes: &[1],
                at: 0,
            })
        };
        for &algorithm in &[SearchAlgorithm::Minimax, SearchAlgorithm::AlphaBeta] {
            let mut tree = tree();
            let stats = apply(&mut tree, 3, algorithm, &Leaves);
            assert_eq!(tree.best_move(), Some(2));
            assert_eq!(tree.root_value(), Some(5));
            assert_eq!(tree.get(NodeId(1)).value(), None);
            assert!(tree.get(NodeId(1)).is_visited());
            assert_eq!(stats.leaves_evaluated, 1);
        }
    }

    #[test]
    fn equal_value_keeps_descending() {
        // Node 2 first reaches 5, equal to the root's 5, so it must look at
        // leaf 5; that drops it to 1 and leaf 6 is cut.
        let mut tree = GameTree::new(FixedTree {
            edges: &[&[1, 2], &[3], &[4, 5, 6], &[], &[], &[], &[]],
            values: &[0, 0, 0, 5, 5, 1, 9],
            passes: &[],
            at: 0,
        });
        let stats = alpha_beta(&mut tree, 2, &Leaves);
        assert!(tree.get(NodeId(5)).is_visited());
        assert!(!tree.get(NodeId(6)).is_visited());
        assert_eq!(tree.get(NodeId(2)).value(), Some(1));
        assert_eq!(stats.cutoffs, 1);
        assert_eq!(tree.best_move(), Some(1));
        assert_eq!(tree.root_value(), Some(5));
    }

    #[test]
    fn algorithm_from_str() {
        assert_eq!(SearchAlgorithm::from_str("minimax"), Ok(SearchAlgorithm::Minimax));
        assert_eq!(SearchAlgorithm::from_str("Alpha-Beta"), Ok(SearchAlgorithm::AlphaBeta));
        assert_eq!(SearchAlgorithm::from_str("mcts"), Err(ParseAlgorithmError));
        assert_eq!(SearchAlgorithm::AlphaBeta.to_string(), "alpha-beta");
    }
}
