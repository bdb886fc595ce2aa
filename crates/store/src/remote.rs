//! Hosted score table reached over its REST interface.
//!
//! The table is `scores` with columns `id`, `player_name`, `score`,
//! `time_taken` and `created_at`; the server assigns `id` and `created_at`.
//! Requests authenticate with the public API key in both the `apikey` header
//! and a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use crate::backend::ScoreBackend;
use crate::config::RemoteConfig;
use crate::error::{Result, StoreError};
use crate::record::{NewScore, ScoreRecord};

/// Table holding leaderboard rows.
pub const SCORES_TABLE: &str = "scores";

pub struct RemoteStore {
    http: Client,
    base_url: String,
    api_key: String,
}

impl RemoteStore {
    /// Create a client whose every request is bounded by `timeout`.
    pub fn new(config: &RemoteConfig, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, SCORES_TABLE)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(StoreError::Status {
        status: status.as_u16(),
        body: resp.text().await.unwrap_or_default(),
    })
}

#[async_trait]
impl ScoreBackend for RemoteStore {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn insert(&self, score: &NewScore) -> Result<ScoreRecord> {
        let url = self.table_url();
        debug!(%url, player = %score.player_name, "inserting remote score");

        let resp = self
            .authorized(self.http.post(&url))
            .header("Prefer", "return=representation")
            .json(&[score])
            .send()
            .await?;

        let rows: Vec<ScoreRecord> = check_status(resp).await?.json().await?;
        rows.into_iter().next().ok_or(StoreError::EmptyResponse)
    }

    async fn top(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
        let url = self.table_url();
        debug!(%url, limit, "fetching remote leaderboard");

        let resp = self
            .authorized(self.http.get(&url))
            .query(&[
                ("select", "*".to_string()),
                ("order", "score.asc".to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        let rows: Vec<ScoreRecord> = check_status(resp).await?.json().await?;
        Ok(rows)
    }
}
