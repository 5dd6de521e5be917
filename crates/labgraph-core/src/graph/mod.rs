//! In-memory directed, labeled multigraph.
//!
//! [`Node`] and [`Edge`] form the object graph; [`Graph`] keys nodes by name,
//! pulls in reachable nodes on insert and walks them depth first.
//!
//! # Example
//!
//! ```rust
//! use labgraph_core::graph::{Edge, Graph, Node};
//!
//! let a = Node::new("a");
//! let b = Node::new("b");
//! a.add_edge(Edge::new(&b, 1));
//! b.add_edge(Edge::new(&a, 2));
//!
//! let mut graph = Graph::new();
//! graph.add_node(&a).unwrap();
//! assert!(graph.contains(&b));
//!
//! let visited: Vec<&str> = graph.depth_first_search().map(|n| n.name()).collect();
//! assert_eq!(visited, vec!["a", "b"]);
//! ```

mod edge;
mod node;
mod store;
pub mod traversal;

#[cfg(test)]
mod edge_tests;

pub use edge::Edge;
pub use node::{EdgeLabel, Node, NodeName};
pub use store::Graph;
pub use traversal::{DepthFirstFrom, DepthFirstSearch};
