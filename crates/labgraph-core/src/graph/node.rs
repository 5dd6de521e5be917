//! Graph vertices.
//!
//! A [`Node`] is a shared handle: cloning it yields another reference to the
//! same vertex, so the graph, callers and other nodes' edges all observe the
//! same edge set.
//!
//! Edges hold their targets strongly. Dropping a [`Graph`](super::Graph)
//! breaks the cycles among nodes that nothing outside the graph can still
//! reach; a cycle of nodes that never joined a graph lives until it is
//! disconnected.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::rc::Rc;
#[cfg(test)]
use std::rc::Weak;

use crate::error::{Error, Result};

use super::edge::Edge;

/// Bound for node names.
pub trait NodeName: Eq + Hash + Clone + fmt::Debug {}
impl<T: Eq + Hash + Clone + fmt::Debug> NodeName for T {}

/// Bound for edge labels. Use `Option<L>` for edges that may be unlabeled.
pub trait EdgeLabel: Eq + Hash + Clone + fmt::Debug {}
impl<T: Eq + Hash + Clone + fmt::Debug> EdgeLabel for T {}

pub(crate) type NodeCell<K, L> = RefCell<NodeData<K, L>>;

pub(crate) struct NodeData<K, L> {
    name: K,
    /// Insertion-ordered set: `add_edge` rejects duplicates.
    edges: Vec<Edge<K, L>>,
}

/// Node-instance pairs currently under comparison.
pub(crate) type Assumed = HashSet<(*const (), *const ())>;

/// A named vertex owning a set of outgoing labeled edges.
///
/// Equality is structural: two nodes are equal when their names are equal and
/// their edge sets are equal, recursively through edge targets. Hashing only
/// uses the name, so a node's hash is stable while its edges change.
///
/// # Example
///
/// ```rust
/// use labgraph_core::graph::{Edge, Node};
///
/// let a = Node::new("a");
/// let b = Node::new("b");
/// a.add_edge(Edge::new(&b, "likes"));
///
/// assert_eq!(a.adjacent_nodes(), vec![b.clone()]);
/// assert_ne!(a, Node::new("a"));
/// ```
pub struct Node<K, L> {
    inner: Rc<NodeCell<K, L>>,
}

impl<K, L> Clone for Node<K, L> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K: NodeName, L: EdgeLabel> Node<K, L> {
    /// Creates a node with no edges.
    #[must_use]
    pub fn new(name: K) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NodeData {
                name,
                edges: Vec::new(),
            })),
        }
    }

    /// Returns the node name.
    #[must_use]
    pub fn name(&self) -> K {
        self.inner.borrow().name.clone()
    }

    /// Returns a snapshot of the outgoing edges.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge<K, L>> {
        self.inner.borrow().edges.clone()
    }

    /// Returns the number of outgoing edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.borrow().edges.len()
    }

    /// Returns true if an equal edge is already held.
    #[must_use]
    pub fn has_edge(&self, edge: &Edge<K, L>) -> bool {
        self.position(edge).is_some()
    }

    /// Adds an edge. Returns false (and leaves the set unchanged) if an equal
    /// edge is already present.
    pub fn add_edge(&self, edge: Edge<K, L>) -> bool {
        // Comparing may borrow this node again through a self-loop, so the
        // mutable borrow is only taken once the lookup is done.
        if self.has_edge(&edge) {
            return false;
        }
        self.inner.borrow_mut().edges.push(edge);
        true
    }

    /// Removes the edge equal to `edge`.
    ///
    /// # Errors
    ///
    /// Returns `Error::EdgeNotFound` if no equal edge is held.
    pub fn remove_edge(&self, edge: &Edge<K, L>) -> Result<Edge<K, L>> {
        let index = self.position(edge).ok_or_else(|| {
            Error::EdgeNotFound(format!(
                "{:?} -[{:?}]-> {:?}",
                self.name(),
                edge.label(),
                edge.target_name()
            ))
        })?;
        Ok(self.inner.borrow_mut().edges.remove(index))
    }

    /// Returns the distinct targets of the outgoing edges, in edge order.
    #[must_use]
    pub fn adjacent_nodes(&self) -> Vec<Node<K, L>> {
        let targets: Vec<Node<K, L>> = self
            .inner
            .borrow()
            .edges
            .iter()
            .map(Edge::target)
            .collect();

        let mut distinct: Vec<Node<K, L>> = Vec::with_capacity(targets.len());
        for target in targets {
            if !distinct.contains(&target) {
                distinct.push(target);
            }
        }
        distinct
    }

    /// Returns the outgoing edges whose target equals `node`.
    #[must_use]
    pub fn edges_to_node(&self, node: &Node<K, L>) -> Vec<Edge<K, L>> {
        self.inner
            .borrow()
            .edges
            .iter()
            .filter(|edge| edge.points_at(node))
            .cloned()
            .collect()
    }

    /// Removes every edge whose target equals `node`. Returns how many were removed.
    pub fn disconnect(&self, node: &Node<K, L>) -> usize {
        self.edges_to_node(node)
            .iter()
            .filter(|edge| self.remove_edge(edge).is_ok())
            .count()
    }

    /// Returns true if both handles refer to the same vertex instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn position(&self, edge: &Edge<K, L>) -> Option<usize> {
        self.inner.borrow().edges.iter().position(|held| held == edge)
    }

    /// Structural comparison that tolerates cycles.
    ///
    /// A pair already in `assumed` is treated as equal; any difference is
    /// still found on the path that first entered the pair. Assumptions made
    /// while trying a candidate edge are dropped if that candidate fails.
    pub(crate) fn structurally_eq(&self, other: &Self, assumed: &mut Assumed) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let pair = (self.addr(), other.addr());
        if !assumed.insert(pair) {
            return true;
        }

        let lhs = self.inner.borrow();
        let rhs = other.inner.borrow();
        lhs.name == rhs.name
            && lhs.edges.len() == rhs.edges.len()
            && lhs.edges.iter().all(|edge| {
                rhs.edges.iter().any(|candidate| {
                    let mut trial = assumed.clone();
                    let matched = edge.structurally_eq(candidate, &mut trial);
                    if matched {
                        *assumed = trial;
                    }
                    matched
                })
            })
    }
}

// Used while a graph is dropped, where no trait bounds are available.
// Skipping a node that is already borrowed only ever keeps memory alive.
impl<K, L> Node<K, L> {
    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.inner).cast()
    }

    /// Strong handles to this vertex, counting the ones held by edges.
    pub(crate) fn handle_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    pub(crate) fn targets(&self) -> Vec<Node<K, L>> {
        self.inner.try_borrow().map_or_else(
            |_| Vec::new(),
            |data| data.edges.iter().map(|edge| edge.target_node().clone()).collect(),
        )
    }

    pub(crate) fn target_addrs(&self) -> Vec<*const ()> {
        self.inner.try_borrow().map_or_else(
            |_| Vec::new(),
            |data| data.edges.iter().map(|edge| edge.target_node().addr()).collect(),
        )
    }

    /// Drops every outgoing edge. Returns how many were dropped.
    pub(crate) fn clear_edges(&self) -> usize {
        let edges = match self.inner.try_borrow_mut() {
            Ok(mut data) => mem::take(&mut data.edges),
            Err(_) => return 0,
        };
        edges.len()
    }

    #[cfg(test)]
    pub(crate) fn downgrade(&self) -> Weak<NodeCell<K, L>> {
        Rc::downgrade(&self.inner)
    }
}

impl<K: NodeName, L: EdgeLabel> PartialEq for Node<K, L> {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other, &mut Assumed::new())
    }
}

impl<K: NodeName, L: EdgeLabel> Eq for Node<K, L> {}

impl<K: NodeName, L: EdgeLabel> Hash for Node<K, L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.borrow().name.hash(state);
    }
}

impl<K: fmt::Debug, L: fmt::Debug> fmt::Debug for Node<K, L> {
    // Targets are printed by name only; recursing would not terminate on cycles.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        f.debug_struct("Node")
            .field("name", &data.name)
            .field("edges", &data.edges)
            .finish()
    }
}
