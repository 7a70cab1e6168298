//! Per-network capability flags.
//!
//! Some networks publish more data than others. Ridership statistics, for
//! example, only exist for Rennes. Capabilities are keyed by network id and
//! can be loaded from a JSON file:
//!
//! ```json
//! { "Rennes": { "ridership_stats": true } }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Network with ridership data when no file is configured.
const DEFAULT_STATS_NETWORK: &str = "Rennes";

/// What a single network supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkCapabilities {
    /// Whether line cards can open the ridership chart panel.
    #[serde(default)]
    pub ridership_stats: bool,
}

/// Capability table keyed by network id. Unknown networks have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkFeatures {
    networks: HashMap<String, NetworkCapabilities>,
}

impl NetworkFeatures {
    /// A table where no network has any capability.
    pub fn none() -> Self {
        Self {
            networks: HashMap::new(),
        }
    }

    /// Set the capabilities of one network.
    pub fn with_network(
        mut self,
        network: impl Into<String>,
        capabilities: NetworkCapabilities,
    ) -> Self {
        self.networks.insert(network.into(), capabilities);
        self
    }

    /// Load the table from a JSON file. The file replaces the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Features {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        serde_json::from_str(&contents).map_err(|e| ConfigError::Features {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    pub fn capabilities(&self, network: &str) -> NetworkCapabilities {
        self.networks.get(network).copied().unwrap_or_default()
    }

    pub fn supports_ridership_stats(&self, network: &str) -> bool {
        self.capabilities(network).ridership_stats
    }
}

impl Default for NetworkFeatures {
    fn default() -> Self {
        Self::none().with_network(
            DEFAULT_STATS_NETWORK,
            NetworkCapabilities {
                ridership_stats: true,
            },
        )
    }
}
