//! Keyed node collection with closure-on-insert and DFS.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::config::GraphConfig;
use crate::error::{Error, Result};

use super::edge::Edge;
use super::node::{EdgeLabel, Node, NodeName};
use super::traversal::{DepthFirstFrom, DepthFirstSearch};

/// A collection of nodes keyed by name.
///
/// Adding a node also adds every node reachable from it whose name is not yet
/// a member. Removing a node strips all edges between it and the remaining
/// members but leaves its former neighbours in place.
///
/// Dropping the graph clears the edges of every node that is no longer
/// reachable from outside it, so reference cycles among those nodes are
/// freed. Nodes still reachable from a live handle keep their edges.
///
/// # Example
///
/// ```rust
/// use labgraph_core::graph::Graph;
///
/// let graph = Graph::from_dict([
///     (1, vec![(2, "2"), (3, "3")]),
///     (3, vec![(4, "4")]),
/// ])
/// .unwrap();
///
/// assert_eq!(graph.len(), 4);
/// let order: Vec<i32> = graph
///     .depth_first_from(&graph.get_node(&1).unwrap())
///     .map(|node| node.name())
///     .collect();
/// assert_eq!(order[0], 1);
/// ```
#[derive(Debug)]
pub struct Graph<K, L> {
    nodes: IndexMap<K, Node<K, L>>,
    config: GraphConfig,
}

impl<K: NodeName, L: EdgeLabel> Default for Graph<K, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeName, L: EdgeLabel> Graph<K, L> {
    /// Creates an empty graph with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = GraphConfig::default();
        Self {
            nodes: IndexMap::with_capacity(config.initial_capacity),
            config,
        }
    }

    /// Creates an empty graph with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the configuration does not validate.
    pub fn with_config(config: GraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            nodes: IndexMap::with_capacity(config.initial_capacity),
            config,
        })
    }

    /// Builds a graph from `name -> [(neighbour, label), ..]` entries.
    ///
    /// Each distinct name maps to one shared node, so cross references resolve
    /// to the same instance. Neighbours that are never listed as a source still
    /// become members.
    pub fn from_dict<S, E>(entries: S) -> Result<Self>
    where
        S: IntoIterator<Item = (K, E)>,
        E: IntoIterator<Item = (K, L)>,
    {
        Self::from_dict_with_config(entries, GraphConfig::default())
    }

    /// [`from_dict`](Self::from_dict) with an explicit configuration.
    pub fn from_dict_with_config<S, E>(entries: S, config: GraphConfig) -> Result<Self>
    where
        S: IntoIterator<Item = (K, E)>,
        E: IntoIterator<Item = (K, L)>,
    {
        let mut graph = Self::with_config(config)?;
        let mut cache: HashMap<K, Node<K, L>> = HashMap::new();

        for (name, edges) in entries {
            let node = cached_node(&mut cache, name);
            for (neighbour, label) in edges {
                let target = cached_node(&mut cache, neighbour);
                node.add_edge(Edge::new(&target, label));
            }
            graph.add_node(&node)?;
        }

        Ok(graph)
    }

    /// Adds `node` and every node transitively reachable from it.
    ///
    /// A reachable node is skipped when its name is already a member, which is
    /// also what stops the walk on cycles. Re-adding a member picks up
    /// neighbours attached since it was first added.
    ///
    /// # Errors
    ///
    /// - `Error::Conflict` if a member with the same name is not equal to `node`.
    /// - `Error::CapacityExceeded` if the insertion would exceed `max_nodes`.
    ///
    /// Both are detected before the graph is touched.
    pub fn add_node(&mut self, node: &Node<K, L>) -> Result<()> {
        let name = node.name();
        if let Some(existing) = self.nodes.get(&name) {
            if existing != node {
                warn!(node = ?name, "rejected conflicting node");
                return Err(Error::Conflict {
                    name: format!("{name:?}"),
                });
            }
        }

        let pending = self.closure_of(node, name);
        let new_members = pending
            .keys()
            .filter(|key| !self.nodes.contains_key(*key))
            .count();
        if let Some(limit) = self.config.max_nodes {
            if self.nodes.len().saturating_add(new_members) > limit {
                warn!(limit, requested = new_members, "node limit reached");
                return Err(Error::CapacityExceeded { limit });
            }
        }

        self.nodes.extend(pending);
        debug!(
            node = ?node.name(),
            added = new_members,
            total = self.nodes.len(),
            "node added"
        );
        Ok(())
    }

    /// Returns `node` plus every reachable node whose name is not a member.
    fn closure_of(&self, node: &Node<K, L>, name: K) -> IndexMap<K, Node<K, L>> {
        let mut pending = IndexMap::new();
        pending.insert(name, node.clone());

        let mut worklist = vec![node.clone()];
        while let Some(current) = worklist.pop() {
            for neighbour in current.adjacent_nodes() {
                let key = neighbour.name();
                if self.nodes.contains_key(&key) || pending.contains_key(&key) {
                    continue;
                }
                pending.insert(key, neighbour.clone());
                worklist.push(neighbour);
            }
        }
        pending
    }

    /// Looks a node up by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if no member has that name.
    pub fn get_node(&self, name: &K) -> Result<Node<K, L>> {
        self.nodes
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NodeNotFound(format!("{name:?}")))
    }

    /// Removes `node`, severing edges in both directions between it and every
    /// member. Former neighbours stay in the graph.
    ///
    /// Inspects every member, so the cost grows with graph size.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if `node`'s name is not a member; no edge
    /// is touched in that case.
    pub fn remove_node(&mut self, node: &Node<K, L>) -> Result<Node<K, L>> {
        let name = node.name();
        if !self.nodes.contains_key(&name) {
            return Err(Error::NodeNotFound(format!("{name:?}")));
        }

        let mut severed = 0usize;
        for member in self.nodes.values() {
            severed += node.disconnect(member);
            severed += member.disconnect(node);
        }

        let removed = self
            .nodes
            .shift_remove(&name)
            .ok_or_else(|| Error::NodeNotFound(format!("{name:?}")))?;
        debug!(node = ?name, severed, total = self.nodes.len(), "node removed");
        Ok(removed)
    }

    /// Returns true if a member has the same name as `node`.
    ///
    /// Only the name is checked, not the edges.
    #[must_use]
    pub fn contains(&self, node: &Node<K, L>) -> bool {
        self.nodes.contains_key(&node.name())
    }

    /// Returns true if a member has this name.
    #[must_use]
    pub fn contains_name(&self, name: &K) -> bool {
        self.nodes.contains_key(name)
    }

    /// Lazily walks the nodes reachable from `start`, depth first.
    ///
    /// `start` need not be a member. Each call starts a fresh walk.
    #[must_use]
    pub fn depth_first_from(&self, start: &Node<K, L>) -> DepthFirstFrom<K, L> {
        DepthFirstFrom::new(start.clone())
    }

    /// [`depth_first_from`](Self::depth_first_from) starting at the member named `name`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if no member has that name.
    pub fn depth_first_from_name(&self, name: &K) -> Result<DepthFirstFrom<K, L>> {
        self.get_node(name).map(DepthFirstFrom::new)
    }

    /// Lazily walks every member exactly once, component by component.
    #[must_use]
    pub fn depth_first_search(&self) -> DepthFirstSearch<K, L> {
        DepthFirstSearch::new(self.nodes.values().cloned().collect())
    }

    /// Iterates over the members in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<K, L>> {
        self.nodes.values()
    }

    /// Iterates over the member names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &K> {
        self.nodes.keys()
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }
}

impl<K, L> Drop for Graph<K, L> {
    fn drop(&mut self) {
        let released = release_cycles(&self.nodes);
        if released > 0 {
            trace!(released, "graph dropped");
        }
    }
}

/// Clears the edges of every node reachable from `members` that no handle
/// outside this graph (members plus their edges) can reach. Returns how many
/// nodes were cleared.
fn release_cycles<K, L>(members: &IndexMap<K, Node<K, L>>) -> usize {
    let mut index: HashMap<*const (), usize> = HashMap::new();
    let mut reachable: Vec<Node<K, L>> = Vec::new();
    let mut stack: Vec<Node<K, L>> = members.values().cloned().collect();
    while let Some(node) = stack.pop() {
        if index.contains_key(&node.addr()) {
            continue;
        }
        index.insert(node.addr(), reachable.len());
        stack.extend(node.targets());
        reachable.push(node);
    }

    // Handles every node is known to have: one in `reachable`, one per
    // incoming edge from a reachable node, one more for each member entry.
    let mut internal = vec![1usize; reachable.len()];
    for member in members.values() {
        if let Some(&at) = index.get(&member.addr()) {
            internal[at] += 1;
        }
    }
    let edges: Vec<Vec<usize>> = reachable
        .iter()
        .map(|node| {
            node.target_addrs()
                .iter()
                .filter_map(|addr| index.get(addr).copied())
                .collect()
        })
        .collect();
    for &target in edges.iter().flatten() {
        internal[target] += 1;
    }

    let mut live = vec![false; reachable.len()];
    let mut stack: Vec<usize> = (0..reachable.len())
        .filter(|&at| reachable[at].handle_count() > internal[at])
        .collect();
    while let Some(at) = stack.pop() {
        if !live[at] {
            live[at] = true;
            stack.extend(edges[at].iter().copied());
        }
    }

    reachable
        .iter()
        .zip(&live)
        .filter(|(_, live)| !**live)
        .map(|(node, _)| node.clear_edges())
        .filter(|&cleared| cleared > 0)
        .count()
}

fn cached_node<K: NodeName, L: EdgeLabel>(
    cache: &mut HashMap<K, Node<K, L>>,
    name: K,
) -> Node<K, L> {
    cache
        .entry(name)
        .or_insert_with_key(|name| Node::new(name.clone()))
        .clone()
}
