//! Remote-first score store with local fallback.

use tracing::{info, warn};

use crate::backend::ScoreBackend;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::local::LocalStore;
use crate::record::{NewScore, ScoreRecord};
use crate::remote::RemoteStore;

/// Saves and lists scores, preferring the hosted table when one is configured.
///
/// Any remote failure (transport, timeout, status, decode) is logged and the
/// same request is replayed against the local backend. Only a local failure
/// reaches the caller.
pub struct ScoreStore {
    remote: Option<Box<dyn ScoreBackend>>,
    local: Box<dyn ScoreBackend>,
}

impl ScoreStore {
    pub fn new(remote: Option<Box<dyn ScoreBackend>>, local: Box<dyn ScoreBackend>) -> Self {
        Self { remote, local }
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let remote = match &config.remote {
            Some(remote) => Some(
                Box::new(RemoteStore::new(remote, config.remote_timeout)?) as Box<dyn ScoreBackend>
            ),
            None => None,
        };
        let local = LocalStore::with_capacity(&config.local_path, config.capacity);
        Ok(Self::new(remote, Box::new(local)))
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Validate and store a finished game's score.
    pub async fn submit(&self, score: NewScore) -> Result<ScoreRecord> {
        score.validate()?;

        if let Some(remote) = &self.remote {
            match remote.insert(&score).await {
                Ok(record) => {
                    info!(backend = remote.name(), id = %record.id, score = record.score, "score saved");
                    return Ok(record);
                }
                Err(e) => warn!(backend = remote.name(), error = %e, "remote save failed, using local store"),
            }
        }

        let record = self
            .local
            .insert(&score)
            .await
            .map_err(|e| StoreError::LocalSave(Box::new(e)))?;
        info!(backend = self.local.name(), id = %record.id, score = record.score, "score saved");
        Ok(record)
    }

    /// Best `limit` scores, ascending.
    pub async fn list_top(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
        if let Some(remote) = &self.remote {
            match remote.top(limit).await {
                Ok(records) => return Ok(records),
                Err(e) => warn!(backend = remote.name(), error = %e, "remote fetch failed, using local store"),
            }
        }

        self.local
            .top(limit)
            .await
            .map_err(|e| StoreError::LocalFetch(Box::new(e)))
    }
}
