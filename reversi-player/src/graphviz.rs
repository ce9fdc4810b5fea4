//! Graphviz export of a searched tree, for debugging.

use crate::tree::{GameTree, NodeId, Position};
use std::borrow::Cow;
use std::fmt;
use std::io;

/// A parent-child link, drawn from the parent.
pub type TreeEdge = (NodeId, NodeId);

/// A borrowed [`GameTree`] viewed as a `dot` graph. Every expanded node is
/// drawn; nodes the search never reached are coloured.
pub struct TreeGraph<'t, P: Position> {
    tree: &'t GameTree<P>,
}

impl<'t, P: Position> TreeGraph<'t, P> {
    pub fn new(tree: &'t GameTree<P>) -> Self {
        Self { tree }
    }
}

impl<'a, 't: 'a, P> dot::Labeller<'a, NodeId, TreeEdge> for TreeGraph<'t, P>
where
    P: Position,
    P::Move: fmt::Display,
{
    fn graph_id(&'a self) -> dot::Id<'a> {
        dot::Id::new("GameTree").unwrap()
    }

    fn node_id(&'a self, node: &NodeId) -> dot::Id<'a> {
        dot::Id::new(format!("N{}", node)).unwrap()
    }

    fn node_label(&'a self, node: &NodeId) -> dot::LabelText<'a> {
        dot::LabelText::label(self.tree.describe(*node))
    }

    fn node_color(&'a self, node: &NodeId) -> Option<dot::LabelText<'a>> {
        if self.tree.get(*node).is_visited() {
            None
        } else {
            Some(dot::LabelText::label("crimson"))
        }
    }

    fn edge_label(&'a self, edge: &TreeEdge) -> dot::LabelText<'a> {
        match self.tree.get(edge.1).move_leading_here() {
            Some(mv) => dot::LabelText::label(mv.to_string()),
            None => dot::LabelText::label(""),
        }
    }
}

impl<'a, 't: 'a, P> dot::GraphWalk<'a, NodeId, TreeEdge> for TreeGraph<'t, P>
where
    P: Position,
{
    fn nodes(&'a self) -> dot::Nodes<'a, NodeId> {
        Cow::Owned(self.tree.ids().collect())
    }

    fn edges(&'a self) -> dot::Edges<'a, TreeEdge> {
        let edges = self
            .tree
            .ids()
            .flat_map(|parent| {
                self.tree
                    .get(parent)
                    .children()
                    .iter()
                    .map(move |&child| (parent, child))
            })
            .collect();
        Cow::Owned(edges)
    }

    fn source(&'a self, edge: &TreeEdge) -> NodeId {
        edge.0
    }

    fn target(&'a self, edge: &TreeEdge) -> NodeId {
        edge.1
    }
}

/// Write `tree` to `writer` in Graphviz dot format.
pub fn render_dot<P, W>(tree: &GameTree<P>, writer: &mut W) -> io::Result<()>
where
    P: Position,
    P::Move: fmt::Display,
    W: io::Write,
{
    dot::render(&TreeGraph::new(tree), writer)
}
