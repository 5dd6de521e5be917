//! Lazy depth-first traversal cursors.
//!
//! Both iterators keep an explicit stack instead of recursing, so deep or
//! cyclic graphs neither overflow the call stack nor loop forever. Each
//! distinct node (by structural equality) is produced at most once.
//!
//! Mutating the graph or its nodes while a cursor is live is unsupported:
//! the cursor may then skip or repeat nodes.

use std::collections::HashSet;
use std::iter::FusedIterator;

use tracing::trace;

use super::node::{EdgeLabel, Node, NodeName};

/// Stack and seen-set shared by both cursors.
struct Frontier<K, L> {
    stack: Vec<Node<K, L>>,
    seen: HashSet<Node<K, L>>,
}

impl<K: NodeName, L: EdgeLabel> Frontier<K, L> {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Pops until an unreported node is found, reports it and pushes its
    /// unreported neighbours.
    fn step(&mut self) -> Option<Node<K, L>> {
        while let Some(current) = self.stack.pop() {
            if !self.seen.insert(current.clone()) {
                continue;
            }
            for neighbour in current.adjacent_nodes() {
                if !self.seen.contains(&neighbour) {
                    self.stack.push(neighbour);
                }
            }
            trace!(node = ?current.name(), pending = self.stack.len(), "dfs visit");
            return Some(current);
        }
        None
    }
}

/// Nodes reachable from a start node, in depth-first order.
///
/// Created by [`Graph::depth_first_from`](super::Graph::depth_first_from).
/// The start node is always produced first.
pub struct DepthFirstFrom<K, L> {
    frontier: Frontier<K, L>,
}

impl<K: NodeName, L: EdgeLabel> DepthFirstFrom<K, L> {
    pub(crate) fn new(start: Node<K, L>) -> Self {
        let mut frontier = Frontier::new();
        frontier.stack.push(start);
        Self { frontier }
    }
}

impl<K: NodeName, L: EdgeLabel> Iterator for DepthFirstFrom<K, L> {
    type Item = Node<K, L>;

    fn next(&mut self) -> Option<Self::Item> {
        self.frontier.step()
    }
}

impl<K: NodeName, L: EdgeLabel> FusedIterator for DepthFirstFrom<K, L> {}

/// Every node of a graph, one component after another.
///
/// Created by [`Graph::depth_first_search`](super::Graph::depth_first_search).
/// Components are entered in graph insertion order; within a component the
/// order is that of [`DepthFirstFrom`]. Nodes reachable through edges added
/// after insertion are produced too, even if they are not graph members.
pub struct DepthFirstSearch<K, L> {
    roots: std::vec::IntoIter<Node<K, L>>,
    frontier: Frontier<K, L>,
}

impl<K: NodeName, L: EdgeLabel> DepthFirstSearch<K, L> {
    pub(crate) fn new(roots: Vec<Node<K, L>>) -> Self {
        Self {
            roots: roots.into_iter(),
            frontier: Frontier::new(),
        }
    }
}

impl<K: NodeName, L: EdgeLabel> Iterator for DepthFirstSearch<K, L> {
    type Item = Node<K, L>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.frontier.step() {
                return Some(node);
            }
            // Seen set spans the whole walk, so earlier components are skipped.
            let root = self
                .roots
                .by_ref()
                .find(|root| !self.frontier.seen.contains(root))?;
            trace!(root = ?root.name(), "dfs new component");
            self.frontier.stack.push(root);
        }
    }
}

impl<K: NodeName, L: EdgeLabel> FusedIterator for DepthFirstSearch<K, L> {}
