//! Leaderboard persistence for memory-match.
//!
//! Scores go to a hosted `scores` table when credentials are configured and
//! to a JSON file on the device otherwise, or whenever the hosted table is
//! unreachable.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`record`] | `ScoreRecord`, `NewScore`, name validation, ranking |
//! | [`backend`] | `ScoreBackend` trait shared by both stores |
//! | [`remote`] | REST client for the hosted table |
//! | [`local`] | JSON file store |
//! | [`store`] | Remote-first facade with local fallback |
//! | [`runtime`] | Background worker polled by the game loop |
//! | [`config`] | Environment-driven configuration |
//! | [`error`] | `StoreError` |

pub use memory_match_core as core;
pub use memory_match_types as types;

pub mod backend;
pub mod config;
pub mod error;
pub mod local;
pub mod record;
pub mod remote;
pub mod runtime;
pub mod store;

pub use backend::ScoreBackend;
pub use config::{default_local_path, RemoteConfig, StoreConfig};
pub use error::{Result, StoreError};
pub use local::LocalStore;
pub use record::{rank, validate_player_name, NewScore, ScoreRecord};
pub use remote::RemoteStore;
pub use runtime::{RequestId, StoreReply, StoreRequest, StoreWorker};
pub use store::ScoreStore;
