//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, score storage).
//!
//! # Deck
//!
//! - **Size**: 12 cards (indexed 0-11)
//! - **Pairs**: 6 distinct symbols, each appearing exactly twice
//! - **Layout**: 4 columns by 3 rows on screen
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Fixed timestep interval of the game loop |
//! | `SECOND_MS` | 1000 | Clock granularity for elapsed seconds |
//! | `MISMATCH_REVEAL_MS` | 1000 | How long a non-matching pair stays face-up |
//!
//! # Scoring
//!
//! `score = round(seconds * TIME_WEIGHT + moves * MOVE_WEIGHT)`, lower is better.
//!
//! # Examples
//!
//! ```
//! use memory_match_types::{GameStatus, CARD_SYMBOLS, DECK_SIZE, PAIR_COUNT};
//!
//! assert_eq!(DECK_SIZE, PAIR_COUNT * 2);
//! assert_eq!(CARD_SYMBOLS.len(), PAIR_COUNT);
//! assert_eq!(GameStatus::default(), GameStatus::Playing);
//! ```

/// Number of cards on the table.
pub const DECK_SIZE: usize = 12;

/// Number of distinct symbols (each appears twice).
pub const PAIR_COUNT: usize = 6;

/// Cards that may be face-up and unresolved at once.
pub const MAX_FACE_UP: usize = 2;

/// Grid columns used by the presentation layer.
pub const GRID_COLUMNS: u8 = 4;

/// Grid rows used by the presentation layer.
pub const GRID_ROWS: u8 = 3;

/// Fixed timestep interval in milliseconds.
pub const TICK_MS: u32 = 50;

/// One clock second in milliseconds.
pub const SECOND_MS: u32 = 1000;

/// Delay before a non-matching pair is turned face-down again.
pub const MISMATCH_REVEAL_MS: u32 = 1000;

/// Score points per elapsed second.
pub const TIME_WEIGHT: u32 = 100;

/// Score points per move (pair-attempt).
pub const MOVE_WEIGHT: u32 = 10;

/// Number of records kept on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

/// Longest accepted player name, in characters.
pub const PLAYER_NAME_MAX_CHARS: usize = 20;

/// The six card faces. Each is a single two-column-wide glyph.
pub const CARD_SYMBOLS: [&str; PAIR_COUNT] = ["🎮", "🎲", "🎯", "🎪", "🎨", "🎭"];

/// Card identity. Assigned at shuffle time as the position index.
pub type CardId = u8;

/// One tile on the table with its derived visibility flags.
///
/// `is_flipped` and `is_matched` are computed from the engine's face-up and
/// matched sets when a snapshot is taken; the engine never stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: CardId,
    pub symbol: &'static str,
    /// Face-up, either awaiting resolution or already matched.
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Card {
    /// A face-down, unmatched card.
    pub const fn hidden(id: CardId, symbol: &'static str) -> Self {
        Self {
            id,
            symbol,
            is_flipped: false,
            is_matched: false,
        }
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::hidden(0, CARD_SYMBOLS[0])
    }
}

/// Session status.
///
/// - **Playing**: accepting flips, clock running
/// - **Completed**: every pair found (terminal)
/// - **Paused**: reserved; no current behavior enters it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    Completed,
    Paused,
}

/// Game actions that can be applied to modify game state.
///
/// Produced by the presentation layer from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Turn a card face-up
    Flip(CardId),
    /// Discard the session and deal a fresh one
    NewGame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_constants_are_consistent() {
        assert_eq!(DECK_SIZE, PAIR_COUNT * 2);
        assert_eq!(GRID_COLUMNS as usize * GRID_ROWS as usize, DECK_SIZE);
        assert_eq!(MAX_FACE_UP, 2);
    }

    #[test]
    fn symbols_are_distinct() {
        for (i, a) in CARD_SYMBOLS.iter().enumerate() {
            for b in CARD_SYMBOLS.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn symbols_are_single_glyphs() {
        for s in CARD_SYMBOLS {
            assert_eq!(s.chars().count(), 1, "{s} should be one code point");
        }
    }

    #[test]
    fn hidden_card_has_no_flags() {
        let c = Card::hidden(3, "🎲");
        assert!(!c.is_flipped);
        assert!(!c.is_matched);
        assert_eq!(c.id, 3);
    }
}
