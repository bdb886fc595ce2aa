//! Terminal input module.
//!
//! Maps `crossterm` key events into board actions (cursor, flip, new game,
//! leaderboard) and dialog actions (text entry, confirm, cancel, retry, play
//! again). It knows nothing about game state; the caller decides which map
//! applies.

pub mod map;

pub use memory_match_types as types;

pub use map::{is_interrupt, map_board_key, map_dialog_key, should_quit, BoardAction, DialogAction, Direction};
