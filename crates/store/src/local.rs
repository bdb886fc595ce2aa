//! On-device leaderboard kept in a single JSON file.
//!
//! The file holds a JSON array of [`ScoreRecord`]s, sorted ascending by score
//! and capped at the configured capacity. Every write re-reads the file,
//! appends, re-sorts and truncates, then replaces the file through a
//! temporary sibling so a crash never leaves half a list behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::backend::ScoreBackend;
use crate::error::Result;
use crate::record::{rank, NewScore, ScoreRecord};
use crate::types::LEADERBOARD_SIZE;

pub struct LocalStore {
    path: PathBuf,
    capacity: usize,
    // Serializes read-modify-write cycles from concurrent submissions.
    write_lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(path, LEADERBOARD_SIZE)
    }

    pub fn with_capacity(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity: capacity.max(1),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All stored records. A missing or empty file is an empty list.
    pub async fn load(&self) -> Result<Vec<ScoreRecord>> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&json)?)
    }

    async fn save(&self, records: &[ScoreRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl ScoreBackend for LocalStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn insert(&self, score: &NewScore) -> Result<ScoreRecord> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        let record = score
            .clone()
            .into_record(Uuid::new_v4().to_string(), Utc::now());
        records.push(record.clone());
        rank(&mut records, self.capacity);
        self.save(&records).await?;

        debug!(path = %self.path.display(), kept = records.len(), "local score saved");
        Ok(record)
    }

    async fn top(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
        let mut records = self.load().await?;
        rank(&mut records, limit);
        Ok(records)
    }
}
