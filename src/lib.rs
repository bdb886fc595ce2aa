//! Memory Match (workspace facade crate).
//!
//! The game lives in dedicated crates under `crates/`; this package re-exports
//! them as `memory_match::{core,input,store,term,types}` and adds the pieces
//! that only the terminal binary needs: screen state, configuration and
//! logging.

pub use memory_match_core as core;
pub use memory_match_input as input;
pub use memory_match_store as store;
pub use memory_match_term as term;
pub use memory_match_types as types;

pub mod app;
pub mod config;
pub mod logging;

pub use app::{App, Control, Dialog, GameOverDialog, LeaderboardDialog, SavePhase};
pub use config::AppConfig;
