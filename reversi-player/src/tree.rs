//! Lazily expanded game tree with arena allocation.
//!
//! Nodes live in a contiguous `Vec` owned by the [`GameTree`] and refer to each
//! other by [`NodeId`]. Ownership runs strictly from the tree to its nodes; the
//! parent link is a plain index used only to propagate values upward, so a tree
//! and everything in it is dropped as one unit once a search is done with it.

use std::convert::TryFrom;
use std::fmt;

/// The game-specific capabilities a tree needs from a position.
pub trait Position: Sized {
    /// The action leading from one position to the next.
    type Move: Copy + Eq + fmt::Debug;

    /// Every successor of this position, paired with the move that reaches it,
    /// in a deterministic order.
    fn expand(&self) -> Vec<(Self::Move, Self)>;

    /// Returns whether the game is over in this position.
    fn is_end_position(&self) -> bool;
}

/// Static scoring of a position from one fixed point of view.
pub trait Evaluator<P> {
    fn evaluate(&self, position: &P) -> i32;
}

/// Whether a node takes the maximum or minimum over its children's values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Max,
    Min,
}

impl std::ops::Not for NodeType {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            NodeType::Max => NodeType::Min,
            NodeType::Min => NodeType::Max,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Max => f.write_str("MAX"),
            NodeType::Min => f.write_str("MIN"),
        }
    }
}

/// Index into the node arena of one [`GameTree`]. Ids are only meaningful for
/// the tree that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Panics past `u32::MAX` nodes, far beyond any depth-bounded search.
    #[inline]
    fn from_index(index: usize) -> Self {
        NodeId(u32::try_from(index).expect("game tree arena holds at most u32::MAX nodes"))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the game tree: a position snapshot plus search bookkeeping.
#[derive(Clone, Debug)]
pub struct Node<P: Position> {
    position: P,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    next_child: usize,

    /// Move that led to this node from its parent (`None` for the root).
    move_leading_here: Option<P::Move>,

    /// Move towards the child whose value this node currently holds.
    next_move: Option<P::Move>,

    value: Option<i32>,
    node_type: NodeType,
    depth: usize,
    visited: bool,
    expanded: bool,
    end_position: Option<bool>,
}

impl<P: Position> Node<P> {
    fn new_root(position: P) -> Self {
        Self {
            position,
            parent: None,
            children: Vec::new(),
            next_child: 0,
            move_leading_here: None,
            next_move: None,
            value: None,
            node_type: NodeType::Max,
            depth: 0,
            visited: false,
            expanded: false,
            end_position: None,
        }
    }

    fn new_child(parent_id: NodeId, parent: &Node<P>, mv: P::Move, position: P) -> Self {
        Self {
            parent: Some(parent_id),
            move_leading_here: Some(mv),
            node_type: !parent.node_type,
            depth: parent.depth + 1,
            ..Self::new_root(position)
        }
    }

    #[inline]
    pub fn position(&self) -> &P {
        &self.position
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Children generated so far; empty until the node is expanded.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn move_leading_here(&self) -> Option<P::Move> {
        self.move_leading_here
    }

    #[inline]
    pub fn next_move(&self) -> Option<P::Move> {
        self.next_move
    }

    #[inline]
    pub fn value(&self) -> Option<i32> {
        self.value
    }

    #[inline]
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Offer a new value to this node.
    ///
    /// An empty node accepts anything. Otherwise a MAX node accepts only a
    /// strictly greater value and a MIN node only a strictly smaller one.
    /// Returns whether the value was accepted.
    pub fn propose_value(&mut self, candidate: i32) -> bool {
        let accepted = match (self.value, self.node_type) {
            (None, _) => true,
            (Some(current), NodeType::Max) => candidate > current,
            (Some(current), NodeType::Min) => candidate < current,
        };

        if accepted {
            self.value = Some(candidate);
        }
        accepted
    }
}

/// Game tree with arena-based node storage. The root is always the first node.
#[derive(Clone, Debug)]
pub struct GameTree<P: Position> {
    nodes: Vec<Node<P>>,
}

impl<P: Position> GameTree<P> {
    /// Create a tree holding only a MAX root at depth zero.
    pub fn new(root: P) -> Self {
        Self {
            nodes: vec![Node::new_root(root)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<P> {
        &self.nodes[id.index()]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut Node<P> {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes created so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all node ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    /// Get the children of a node, expanding it on first access.
    pub fn children(&mut self, id: NodeId) -> &[NodeId] {
        self.expand(id);
        self.get(id).children()
    }

    /// Returns whether a node has children that have not been handed out by
    /// [`GameTree::next_child`] yet. Expands the node on first access.
    pub fn has_more_children(&mut self, id: NodeId) -> bool {
        self.expand(id);
        let node = self.get(id);
        node.next_child < node.children.len()
    }

    /// Hand out the next child of a node, left to right.
    pub fn next_child(&mut self, id: NodeId) -> Option<NodeId> {
        self.expand(id);
        let node = self.get_mut(id);
        let child = node.children.get(node.next_child).copied();
        if child.is_some() {
            node.next_child += 1;
        }
        child
    }

    /// Returns whether the game is over at this node. Cached after the first call.
    pub fn is_end_position(&mut self, id: NodeId) -> bool {
        let node = self.get_mut(id);
        match node.end_position {
            Some(end) => end,
            None => {
                let end = node.position.is_end_position();
                node.end_position = Some(end);
                end
            }
        }
    }

    /// A node is terminal when its game is over or it sits at the depth bound.
    pub fn is_terminal(&mut self, id: NodeId, max_depth: usize) -> bool {
        self.get(id).depth == max_depth || self.is_end_position(id)
    }

    /// Offer a value directly to a node. See [`Node::propose_value`].
    pub fn propose_value(&mut self, id: NodeId, candidate: i32) -> bool {
        self.get_mut(id).propose_value(candidate)
    }

    /// Propose a node's value to its parent; on acceptance the parent also
    /// records the move leading to this node as its best move.
    /// Returns false for the root or a node without a value.
    pub fn propagate(&mut self, id: NodeId) -> bool {
        let node = self.get(id);
        let (parent_id, value, mv) = match (node.parent, node.value) {
            (Some(parent_id), Some(value)) => (parent_id, value, node.move_leading_here),
            _ => return false,
        };

        let parent = self.get_mut(parent_id);
        if parent.propose_value(value) {
            parent.next_move = mv;
            true
        } else {
            false
        }
    }

    pub fn mark_visited(&mut self, id: NodeId) {
        self.get_mut(id).visited = true;
    }

    /// Number of nodes a search has visited.
    pub fn visited_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.visited).count()
    }

    /// The move the root currently prefers.
    #[inline]
    pub fn best_move(&self) -> Option<P::Move> {
        self.get(self.root()).next_move
    }

    #[inline]
    pub fn root_value(&self) -> Option<i32> {
        self.get(self.root()).value
    }

    /// One-line summary of a node: "id (V: value, T: type, D: depth)".
    pub fn describe(&self, id: NodeId) -> String {
        let node = self.get(id);
        let value = node
            .value
            .map_or_else(|| "null".to_string(), |value| value.to_string());
        format!("{} (V: {}, T: {}, D: {})", id, value, node.node_type, node.depth)
    }

    fn expand(&mut self, id: NodeId) {
        if self.get(id).expanded {
            return;
        }

        let successors = self.get(id).position.expand();
        let mut children = Vec::with_capacity(successors.len());
        for (mv, position) in successors {
            let child = Node::new_child(id, self.get(id), mv, position);
            let child_id = NodeId::from_index(self.nodes.len());
            self.nodes.push(child);
            children.push(child_id);
        }

        let node = self.get_mut(id);
        node.children = children;
        node.expanded = true;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A hand-built tree: node `i` has the children listed in `edges[i]` and
    /// is an end position when it has none, unless it is listed in `passes`.
    #[derive(Clone, Debug)]
    pub struct FixedTree {
        pub edges: &'static [&'static [usize]],
        pub values: &'static [i32],
        pub passes: &'static [usize],
        pub at: usize,
    }

    impl Position for FixedTree {
        type Move = usize;

        fn expand(&self) -> Vec<(usize, Self)> {
            self.edges[self.at]
                .iter()
                .map(|&child| (child, Self { at: child, ..self.clone() }))
                .collect()
        }

        fn is_end_position(&self) -> bool {
            self.edges[self.at].is_empty() && !self.passes.contains(&self.at)
        }
    }

    pub struct Leaves;

    impl Evaluator<FixedTree> for Leaves {
        fn evaluate(&self, position: &FixedTree) -> i32 {
            position.values[position.at]
        }
    }

    fn chain() -> GameTree<FixedTree> {
        GameTree::new(FixedTree {
            edges: &[&[1, 2], &[3], &[], &[]],
            values: &[0, 0, 0, 0],
            passes: &[],
            at: 0,
        })
    }

    #[test]
    fn node_ids_follow_creation_order() {
        let mut tree = chain();
        let root = tree.root();
        assert_eq!(tree.children(root), &[NodeId(1), NodeId(2)]);
        assert_eq!(tree.ids().collect::<Vec<_>>(), vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(NodeId::from_index(u32::MAX as usize), NodeId(u32::MAX));
    }

    #[test]
    #[should_panic]
    fn arena_index_past_u32_panics() {
        NodeId::from_index(u32::MAX as usize + 1);
    }

    #[test]
    fn root_is_max_at_depth_zero() {
        let tree = chain();
        let root = tree.get(tree.root());
        assert_eq!(root.node_type(), NodeType::Max);
        assert_eq!(root.depth(), 0);
        assert!(root.is_root());
        assert!(!root.is_expanded());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn expansion_is_lazy_and_idempotent() {
        let mut tree = chain();
        let root = tree.root();

        let children = tree.children(root).to_vec();
        assert_eq!(children.len(), 2);
        assert_eq!(tree.len(), 3);

        assert_eq!(tree.children(root).to_vec(), children);
        assert_eq!(tree.len(), 3);

        let first = tree.get(children[0]);
        assert_eq!(first.node_type(), NodeType::Min);
        assert_eq!(first.depth(), 1);
        assert_eq!(first.parent(), Some(root));
        assert_eq!(first.move_leading_here(), Some(1));

        let grandchild = tree.children(children[0])[0];
        assert_eq!(tree.get(grandchild).node_type(), NodeType::Max);
        assert_eq!(tree.get(grandchild).depth(), 2);
    }

    #[test]
    fn next_child_walks_left_to_right() {
        let mut tree = chain();
        let root = tree.root();
        assert!(tree.has_more_children(root));
        let first = tree.next_child(root).unwrap();
        let second = tree.next_child(root).unwrap();
        assert_eq!(tree.get(first).move_leading_here(), Some(1));
        assert_eq!(tree.get(second).move_leading_here(), Some(2));
        assert!(!tree.has_more_children(root));
        assert_eq!(tree.next_child(root), None);
    }

    #[test]
    fn terminal_at_depth_bound_or_end() {
        let mut tree = chain();
        let root = tree.root();
        assert!(!tree.is_terminal(root, 2));
        assert!(tree.is_terminal(root, 0));

        let children = tree.children(root).to_vec();
        assert!(tree.is_terminal(children[0], 1));
        assert!(!tree.is_terminal(children[0], 2));
        assert!(tree.is_terminal(children[1], 5));
    }

    #[test]
    fn max_node_value_never_decreases() {
        let mut node = Node::new_root(chain().get(NodeId(0)).position().clone());
        assert!(node.propose_value(3));
        assert!(!node.propose_value(3));
        assert!(!node.propose_value(-7));
        assert_eq!(node.value(), Some(3));
        assert!(node.propose_value(8));
        assert_eq!(node.value(), Some(8));
    }

    #[test]
    fn min_node_value_never_increases() {
        let mut tree = chain();
        let child = tree.children(tree.root())[0];
        assert!(tree.propose_value(child, 3));
        assert!(!tree.propose_value(child, 3));
        assert!(!tree.propose_value(child, 10));
        assert_eq!(tree.get(child).value(), Some(3));
        assert!(tree.propose_value(child, -2));
        assert_eq!(tree.get(child).value(), Some(-2));
    }

    #[test]
    fn propagate_records_best_move() {
        let mut tree = chain();
        let root = tree.root();
        let children = tree.children(root).to_vec();

        assert!(!tree.propagate(children[0]));
        assert_eq!(tree.best_move(), None);

        tree.propose_value(children[0], 4);
        assert!(tree.propagate(children[0]));
        assert_eq!(tree.best_move(), Some(1));

        tree.propose_value(children[1], 4);
        assert!(!tree.propagate(children[1]));
        assert_eq!(tree.best_move(), Some(1));

        tree.propose_value(children[1], -1);
        tree.propose_value(children[1], 9);
        assert!(!tree.propagate(children[1]));

        assert!(!tree.propagate(root));
        assert_eq!(tree.root_value(), Some(4));
        assert_eq!(tree.describe(root), "0 (V: 4, T: MAX, D: 0)");
        assert_eq!(tree.describe(children[1]), "2 (V: -1, T: MIN, D: 1)");
    }
}
