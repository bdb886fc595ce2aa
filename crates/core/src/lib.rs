//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, session state, and scoring.
//! It has **zero dependencies** on UI, storage, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical deals
//! - **Testable**: Every rule is exercised by plain unit tests
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`deck`]: seeded, unbiased deal of the six symbol pairs
//! - [`game_state`]: flip/match state machine, move counter, session clock
//! - [`scoring`]: leaderboard score formula
//! - [`snapshot`]: render-facing view with derived per-card flags
//!
//! # Game Rules
//!
//! - Twelve cards, six symbols, each symbol twice
//! - Flip two cards per move; a match keeps both face-up for good
//! - A mismatch stays visible for one second, then both turn back
//! - The game completes when all six pairs are found
//!
//! # Example
//!
//! ```
//! use memory_match_core::{FlipOutcome, GameState};
//! use memory_match_types::GameStatus;
//!
//! let mut game = GameState::new(12345);
//!
//! let partner = game.partner_of(0).unwrap();
//! assert_eq!(game.flip(0), FlipOutcome::Revealed);
//! assert_eq!(game.flip(partner), FlipOutcome::Matched);
//!
//! assert_eq!(game.moves(), 1);
//! assert_eq!(game.status(), GameStatus::Playing);
//! ```
//!
//! # Timing
//!
//! The game uses a fixed timestep system: call
//! [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. The session clock and the mismatch revert both count
//! down inside the state, so they stop with the session and reset with it.

pub mod deck;
pub mod game_state;
pub mod scoring;
pub mod snapshot;

pub use memory_match_types as types;

// Re-export commonly used types for convenience
pub use deck::{is_valid_layout, ordered_layout, Dealer, Layout};
pub use game_state::{FlipOutcome, GameFinished, GameState};
pub use scoring::{calculate_score, calculate_score_f64};
pub use snapshot::GameSnapshot;
