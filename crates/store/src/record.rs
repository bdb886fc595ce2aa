//! Leaderboard record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{calculate_score, GameFinished};
use crate::error::{Result, StoreError};
use crate::types::PLAYER_NAME_MAX_CHARS;

/// A stored leaderboard entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Assigned by whichever backend stored the record.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub player_name: String,
    pub score: u32,
    /// Seconds.
    pub time_taken: u32,
    pub created_at: DateTime<Utc>,
}

/// A score about to be submitted (no id, no timestamp yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewScore {
    pub player_name: String,
    pub score: u32,
    pub time_taken: u32,
}

impl NewScore {
    /// Build a submission for a game finished in `elapsed_secs` with `moves` attempts.
    ///
    /// The name is trimmed; blank or over-long names are rejected.
    pub fn new(player_name: &str, elapsed_secs: u32, moves: u32) -> Result<Self> {
        Ok(Self {
            player_name: validate_player_name(player_name)?,
            score: calculate_score(elapsed_secs, moves),
            time_taken: elapsed_secs,
        })
    }

    pub fn from_finished(player_name: &str, finished: &GameFinished) -> Result<Self> {
        Self::new(player_name, finished.elapsed_secs, finished.moves)
    }

    /// Re-check the name of a submission built by hand.
    pub fn validate(&self) -> Result<()> {
        validate_player_name(&self.player_name).map(|_| ())
    }

    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> ScoreRecord {
        ScoreRecord {
            id,
            player_name: self.player_name,
            score: self.score,
            time_taken: self.time_taken,
            created_at,
        }
    }
}

/// Trim a player name and check it fits the leaderboard column.
pub fn validate_player_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyName);
    }
    if trimmed.chars().count() > PLAYER_NAME_MAX_CHARS {
        return Err(StoreError::NameTooLong {
            max: PLAYER_NAME_MAX_CHARS,
        });
    }
    Ok(trimmed.to_string())
}

/// Sort ascending by score (stable) and keep the best `limit`.
pub fn rank(records: &mut Vec<ScoreRecord>, limit: usize) {
    records.sort_by_key(|r| r.score);
    records.truncate(limit);
}

// Hosted tables may use integer primary keys.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
    })
}
