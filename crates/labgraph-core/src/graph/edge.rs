//! Directed, labeled edges.

use std::fmt;
use std::hash::{Hash, Hasher};
use super::node::{Assumed, EdgeLabel, Node, NodeName};

/// A directed pointer to a target node, carrying a label.
///
/// An edge keeps its target alive, so a node reachable only through an edge
/// still shows up in adjacency and graph closure. Edges are immutable;
/// replace an edge to change it.
///
/// Two edges are equal when their labels are equal and their targets are
/// structurally equal, so edges sharing a target can stop comparing equal to
/// a copy once that target is mutated.
///
/// # Example
///
/// ```rust
/// use labgraph_core::graph::{Edge, Node};
///
/// let target: Node<u32, &str> = Node::new(2);
/// let edge = Edge::new(&target, "next");
///
/// assert_eq!(edge.target_name(), &2);
/// assert_eq!(edge.label(), &"next");
/// assert!(edge.target().ptr_eq(&target));
/// ```
#[derive(Clone)]
pub struct Edge<K, L> {
    target: Node<K, L>,
    target_name: K,
    label: L,
}

impl<K: NodeName, L: EdgeLabel> Edge<K, L> {
    /// Creates an edge pointing at `target`.
    #[must_use]
    pub fn new(target: &Node<K, L>, label: L) -> Self {
        Self {
            target: target.clone(),
            target_name: target.name(),
            label,
        }
    }

    /// Returns the target node.
    #[must_use]
    pub fn target(&self) -> Node<K, L> {
        self.target.clone()
    }

    /// Returns the target's name.
    #[must_use]
    pub fn target_name(&self) -> &K {
        &self.target_name
    }

    /// Returns the edge label.
    #[must_use]
    pub fn label(&self) -> &L {
        &self.label
    }

    /// Returns true if this edge's target is structurally equal to `node`.
    pub(crate) fn points_at(&self, node: &Node<K, L>) -> bool {
        self.target == *node
    }

    pub(crate) fn structurally_eq(&self, other: &Self, assumed: &mut Assumed) -> bool {
        if self.label != other.label || self.target_name != other.target_name {
            return false;
        }
        self.target.structurally_eq(&other.target, assumed)
    }
}

impl<K, L> Edge<K, L> {
    pub(crate) fn target_node(&self) -> &Node<K, L> {
        &self.target
    }
}

impl<K: NodeName, L: EdgeLabel> PartialEq for Edge<K, L> {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other, &mut Assumed::new())
    }
}

impl<K: NodeName, L: EdgeLabel> Eq for Edge<K, L> {}

impl<K: NodeName, L: EdgeLabel> Hash for Edge<K, L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.target_name.hash(state);
        self.label.hash(state);
    }
}

impl<K: fmt::Debug, L: fmt::Debug> fmt::Debug for Edge<K, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("target", &self.target_name)
            .field("label", &self.label)
            .finish()
    }
}
