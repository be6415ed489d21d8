//! Depth-order tree node data structure

use crate::polygon::Triangle;

/// How far a node got through classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeState {
    /// Created but not yet classified against a pivot
    #[default]
    Unclassified,
    /// Triangles were classified against a pivot and something was deferred
    Split,
    /// Nothing left to defer; `ready` is final
    LeafReady,
}

/// A node of the depth-order tree: triangles ready to draw plus at most one
/// child holding everything that must be drawn before them.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitNode<S: Clone> {
    /// Ready-to-draw triangles, farthest first
    pub ready: Vec<Triangle<S>>,

    /// Triangles deferred behind this node's pivot
    pub child: Option<Box<SplitNode<S>>>,

    pub leaf: bool,
    pub state: NodeState,
}

impl<S: Clone> Default for SplitNode<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> SplitNode<S> {
    /// Create a new unclassified node
    pub const fn new() -> Self {
        Self {
            ready: Vec::new(),
            child: None,
            leaf: true,
            state: NodeState::Unclassified,
        }
    }

    /// A leaf with nothing to draw.
    pub const fn empty() -> Self {
        Self {
            ready: Vec::new(),
            child: None,
            leaf: true,
            state: NodeState::LeafReady,
        }
    }

    /// Record the outcome of classifying this node: its ready set, and
    /// whether anything was deferred to a child level.
    pub(crate) fn settle(&mut self, ready: Vec<Triangle<S>>, deferred: bool) {
        self.ready = ready;
        self.leaf = !deferred;
        self.state = if deferred {
            NodeState::Split
        } else {
            NodeState::LeafReady
        };
    }

    /// Number of nodes along the child chain, this one included.
    pub fn depth(&self) -> usize {
        self.chain().len()
    }

    fn chain(&self) -> Vec<&SplitNode<S>> {
        let mut nodes = vec![self];
        let mut current = self;
        while let Some(child) = current.child.as_deref() {
            nodes.push(child);
            current = child;
        }
        nodes
    }

    /// Triangles in drawing order: the child's (recursively) before this
    /// node's own ready set.
    pub fn traverse(&self) -> Vec<Triangle<S>> {
        self.chain()
            .into_iter()
            .rev()
            .flat_map(|node| node.ready.iter().cloned())
            .collect()
    }

    /// Consuming form of [`traverse`](Self::traverse).
    pub fn into_triangles(self) -> Vec<Triangle<S>> {
        let mut levels = Vec::new();
        let mut next = Some(self);
        while let Some(mut node) = next {
            next = node.child.take().map(|child| *child);
            levels.push(node.ready);
        }
        levels.into_iter().rev().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::Real;

    fn tri(depth: Real) -> Triangle<()> {
        Triangle::from_angles([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)], depth, None)
    }

    fn node(ready: Vec<Triangle<()>>, child: Option<SplitNode<()>>) -> SplitNode<()> {
        let mut node = SplitNode::new();
        node.settle(ready, child.is_some());
        node.child = child.map(Box::new);
        node
    }

    #[test]
    fn child_is_emitted_first() {
        let grandchild = node(vec![tri(9.0)], None);
        let child = node(vec![tri(5.0), tri(4.0)], Some(grandchild));
        let root = node(vec![tri(1.0)], Some(child));

        assert_eq!(root.state, NodeState::Split);
        assert!(!root.leaf);
        assert_eq!(root.depth(), 3);

        let depths: Vec<_> = root.traverse().iter().map(|t| t.depth).collect();
        assert_eq!(depths, vec![9.0, 5.0, 4.0, 1.0]);
        assert_eq!(root.clone().into_triangles(), root.traverse());
    }

    #[test]
    fn settling_moves_out_of_unclassified() {
        let mut fresh = SplitNode::<()>::default();
        assert_eq!(fresh.state, NodeState::Unclassified);
        assert!(fresh.traverse().is_empty());

        fresh.settle(vec![tri(2.0)], false);
        assert!(fresh.leaf);
        assert_eq!(fresh.state, NodeState::LeafReady);

        fresh.settle(Vec::new(), true);
        assert!(!fresh.leaf);
        assert_eq!(fresh.state, NodeState::Split);

        assert_eq!(SplitNode::<()>::empty().state, NodeState::LeafReady);
    }
}
