//! Error types for labgraph-core.

use thiserror::Error;

/// Graph error types.
#[derive(Error, Debug)]
pub enum Error {
    /// A node with the same name but a different structure is already a member.
    #[error("Node conflict: {name} is already in the graph with different edges")]
    Conflict {
        /// Debug rendering of the conflicting name.
        name: String,
    },

    /// Lookup or removal of a name that is not a member of the graph.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// `remove_edge` on an edge that is not held by the node.
    #[error("Edge not found: {0}")]
    EdgeNotFound(String),

    /// A value of the wrong kind or range was supplied.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Inserting would grow the graph past its configured `max_nodes`.
    #[error("Capacity exceeded: graph is limited to {limit} nodes")]
    CapacityExceeded {
        /// Configured node limit.
        limit: usize,
    },

    /// Configuration could not be extracted.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns true for the two absence kinds (`NodeNotFound`, `EdgeNotFound`).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound(_) | Self::EdgeNotFound(_))
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;
