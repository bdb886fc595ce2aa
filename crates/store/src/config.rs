//! Score store configuration.
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::LEADERBOARD_SIZE;

/// Directory under the platform data dir holding local game data.
pub const APP_DIR: &str = "memory-match";

/// Fixed file name of the local leaderboard.
pub const LOCAL_SCORES_FILE: &str = "memory-game-scores.json";

/// Default bound on a single remote request.
pub const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 5_000;

/// Credentials for the hosted score table.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub url: String,
    pub api_key: String,
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Score store configuration.
///
/// Passed explicitly to [`crate::ScoreStore::from_config`]; nothing in the
/// store reads the environment on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// `None` selects the local store for every request.
    pub remote: Option<RemoteConfig>,
    pub local_path: PathBuf,
    pub remote_timeout: Duration,
    /// Records kept by the local store.
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            remote: None,
            local_path: default_local_path(),
            remote_timeout: Duration::from_millis(DEFAULT_REMOTE_TIMEOUT_MS),
            capacity: LEADERBOARD_SIZE,
        }
    }
}

impl StoreConfig {
    /// Construct store configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MEMORY_MATCH_REMOTE_URL` - hosted store base URL
    /// - `MEMORY_MATCH_REMOTE_KEY` - public API key (both needed to enable the remote store)
    /// - `MEMORY_MATCH_REMOTE_TIMEOUT_MS` - per-request timeout (default: 5000)
    /// - `MEMORY_MATCH_SCORES_PATH` - local leaderboard file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let (Some(url), Some(api_key)) =
            (read("MEMORY_MATCH_REMOTE_URL"), read("MEMORY_MATCH_REMOTE_KEY"))
        {
            config.remote = Some(RemoteConfig { url, api_key });
        }

        if let Some(ms) = read("MEMORY_MATCH_REMOTE_TIMEOUT_MS").and_then(|v| v.parse::<u64>().ok())
        {
            config.remote_timeout = Duration::from_millis(ms.max(1));
        }

        if let Some(path) = read("MEMORY_MATCH_SCORES_PATH") {
            config.local_path = PathBuf::from(path);
        }

        config
    }

    /// Use the local store only, at `path`.
    pub fn local_only(path: impl Into<PathBuf>) -> Self {
        Self {
            local_path: path.into(),
            ..Self::default()
        }
    }
}

/// `<data_local_dir>/memory-match/memory-game-scores.json`, or the working directory.
pub fn default_local_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOCAL_SCORES_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_selects_local() {
        let config = StoreConfig::from_lookup(lookup(&[]));
        assert!(config.remote.is_none());
        assert_eq!(config.capacity, 10);
        assert_eq!(config.remote_timeout, Duration::from_millis(5_000));
        assert!(config.local_path.ends_with(LOCAL_SCORES_FILE));
    }

    #[test]
    fn remote_needs_both_values() {
        let config = StoreConfig::from_lookup(lookup(&[("MEMORY_MATCH_REMOTE_URL", "http://x")]));
        assert!(config.remote.is_none());

        let config = StoreConfig::from_lookup(lookup(&[
            ("MEMORY_MATCH_REMOTE_URL", "http://x"),
            ("MEMORY_MATCH_REMOTE_KEY", "  "),
        ]));
        assert!(config.remote.is_none());

        let config = StoreConfig::from_lookup(lookup(&[
            ("MEMORY_MATCH_REMOTE_URL", "http://x"),
            ("MEMORY_MATCH_REMOTE_KEY", "anon"),
        ]));
        assert_eq!(
            config.remote,
            Some(RemoteConfig {
                url: "http://x".into(),
                api_key: "anon".into()
            })
        );
    }

    #[test]
    fn timeout_and_path_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("MEMORY_MATCH_REMOTE_TIMEOUT_MS", "250"),
            ("MEMORY_MATCH_SCORES_PATH", "/tmp/s.json"),
        ]));
        assert_eq!(config.remote_timeout, Duration::from_millis(250));
        assert_eq!(config.local_path, PathBuf::from("/tmp/s.json"));

        let config = StoreConfig::from_lookup(lookup(&[("MEMORY_MATCH_REMOTE_TIMEOUT_MS", "soon")]));
        assert_eq!(config.remote_timeout, Duration::from_millis(5_000));
    }

    #[test]
    fn debug_hides_api_key() {
        let remote = RemoteConfig {
            url: "http://x".into(),
            api_key: "secret".into(),
        };
        assert!(!format!("{remote:?}").contains("secret"));
    }
}
