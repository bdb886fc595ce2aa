use async_trait::async_trait;

use crate::error::Result;
use crate::record::{NewScore, ScoreRecord};

/// A place score records can be written to and ranked from.
#[async_trait]
pub trait ScoreBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Store a new record and return it with its id and timestamp.
    async fn insert(&self, score: &NewScore) -> Result<ScoreRecord>;

    /// Best `limit` records, ascending by score.
    async fn top(&self, limit: usize) -> Result<Vec<ScoreRecord>>;
}
