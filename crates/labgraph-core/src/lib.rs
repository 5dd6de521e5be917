//! # labgraph-core
//!
//! In-memory directed, labeled multigraph.
//!
//! - **Structural equality**: nodes compare by name and edge set, recursively,
//!   and cycles (including self-loops) compare without looping.
//! - **Closure on insert**: adding a node adds everything reachable from it.
//! - **Clean removal**: removing a node strips every edge to and from it.
//! - **Lazy DFS**: exactly-once depth-first cursors over a start node or the
//!   whole graph.
//!
//! ## Quick Start
//!
//! ```rust
//! use labgraph_core::graph::Graph;
//!
//! fn main() -> labgraph_core::Result<()> {
//!     let graph = Graph::from_dict([
//!         ("a", vec![("b", "ab"), ("c", "ac")]),
//!         ("c", vec![("a", "ca")]),
//!     ])?;
//!
//!     let start = graph.get_node(&"a")?;
//!     for node in graph.depth_first_from(&start) {
//!         println!("{:?}", node.name());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The types are single-threaded (`!Send`); wrap the graph in a lock owned by
//! one thread if it must be shared.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod graph;

pub use config::GraphConfig;
pub use error::{Error, Result};
pub use graph::{Edge, Graph, Node};
