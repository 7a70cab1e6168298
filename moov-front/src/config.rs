//! Application configuration.
//!
//! Read from environment variables at startup. Every variable is optional.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::api::MoovConfig;
use crate::features::NetworkFeatures;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default static assets directory.
const DEFAULT_STATIC_DIR: &str = "static";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds an unusable value
    #[error("invalid value for {var}: {message}")]
    InvalidVar { var: &'static str, message: String },

    /// The network features file could not be loaded
    #[error("features file: {message}")]
    Features { message: String },
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// moov API client settings
    pub api: MoovConfig,
    /// Address the web server listens on
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Optional JSON file with per-network capabilities
    pub features_file: Option<PathBuf>,
    /// Optional JSON fixture; when set the mock API is used
    pub mock_data: Option<PathBuf>,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut api = MoovConfig::new();
        if let Some(url) = get("MOOV_API_BASE_URL") {
            api = api.with_base_url(url);
        }
        if let Some(secs) = get("MOOV_API_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidVar {
                    var: "MOOV_API_TIMEOUT_SECS",
                    message: e.to_string(),
                })?;
            api = api.with_timeout(secs);
        }

        let bind_addr = get("MOOV_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidVar {
                var: "MOOV_BIND_ADDR",
                message: e.to_string(),
            })?;

        let static_dir = get("MOOV_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Self {
            api,
            bind_addr,
            static_dir,
            features_file: get("MOOV_FEATURES_FILE").map(PathBuf::from),
            mock_data: get("MOOV_MOCK_DATA").map(PathBuf::from),
        })
    }

    /// Network capabilities: the configured file, or the built-in defaults.
    pub fn load_features(&self) -> Result<NetworkFeatures, ConfigError> {
        match &self.features_file {
            Some(path) => NetworkFeatures::load(path),
            None => Ok(NetworkFeatures::default()),
        }
    }
}
