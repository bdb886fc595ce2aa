//! Runtime configuration for the terminal game.

use std::env;
use std::path::PathBuf;

use crate::store::StoreConfig;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// Fixed shuffle seed; `None` deals from entropy.
    pub seed: Option<u64>,
    /// Log file; `None` disables logging.
    pub log_path: Option<PathBuf>,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MEMORY_MATCH_SEED` - fixed shuffle seed (for reproducible deals)
    /// - `MEMORY_MATCH_LOG_PATH` - log file path (logging is off when unset)
    /// - plus everything read by [`StoreConfig::from_env`]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            seed: read("MEMORY_MATCH_SEED").and_then(|v| v.parse().ok()),
            log_path: read("MEMORY_MATCH_LOG_PATH").map(PathBuf::from),
            store: StoreConfig::from_lookup(&lookup),
        }
    }
}
