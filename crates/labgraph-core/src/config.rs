//! Graph configuration.
//!
//! Values are layered with `figment`: built-in defaults, then an optional
//! `labgraph.toml`, then `LABGRAPH_*` environment variables.
//!
//! ```toml
//! initial_capacity = 64
//! max_nodes = 10000
//! ```

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default file name picked up by [`GraphConfig::load`].
pub const CONFIG_FILE: &str = "labgraph.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "LABGRAPH_";

/// Tuning knobs for a [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Number of node slots reserved up front.
    pub initial_capacity: usize,
    /// Upper bound on graph membership (`None` = unbounded).
    pub max_nodes: Option<usize>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            max_nodes: None,
        }
    }
}

impl GraphConfig {
    /// Loads `labgraph.toml` from the working directory (if present) and
    /// `LABGRAPH_*` environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Same as [`load`](Self::load) with an explicit file path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = Self::figment()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document on top of the defaults, ignoring the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = Self::figment().merge(Toml::string(toml)).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values are usable together.
    pub fn validate(&self) -> Result<()> {
        match self.max_nodes {
            Some(0) => Err(Error::InvalidArgument(
                "max_nodes must be greater than zero".to_string(),
            )),
            Some(max) if self.initial_capacity > max => Err(Error::InvalidArgument(format!(
                "initial_capacity ({}) exceeds max_nodes ({max})",
                self.initial_capacity
            ))),
            _ => Ok(()),
        }
    }

    /// Sets the node limit (builder pattern).
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Sets the reserved capacity (builder pattern).
    #[must_use]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
    }
}
