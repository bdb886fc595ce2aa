//! Score store error types.

use thiserror::Error;

/// Errors that can occur while validating, saving or fetching scores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Player name was blank after trimming.
    #[error("Please enter your name")]
    EmptyName,

    /// Player name is longer than the column allows.
    #[error("Name must be at most {max} characters")]
    NameTooLong { max: usize },

    /// HTTP request failed.
    #[error("Remote score request failed: {0}")]
    Request(String),

    /// Request timed out.
    #[error("Remote score request timed out")]
    Timeout,

    /// Remote store answered with a non-success status.
    #[error("Remote score store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Insert succeeded but no row came back.
    #[error("Remote score store returned no row")]
    EmptyResponse,

    /// Local file could not be read or written.
    #[error("Local score file error: {0}")]
    Io(#[from] std::io::Error),

    /// Local file did not hold a score list.
    #[error("Local score file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Local fallback failed while saving.
    #[error("Failed to save score locally")]
    LocalSave(#[source] Box<StoreError>),

    /// Local fallback failed while fetching.
    #[error("Failed to fetch scores locally")]
    LocalFetch(#[source] Box<StoreError>),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Timeout
        } else {
            StoreError::Request(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
