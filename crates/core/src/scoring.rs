//! Scoring module - leaderboard score for a finished game
//!
//! `score = round(seconds * 100 + moves * 10)`. Lower is better.
//! With whole seconds and whole moves the rounding is a no-op; the `f64`
//! variant exists for callers that carry fractional inputs and rounds half
//! away from zero.

use crate::types::{MOVE_WEIGHT, TIME_WEIGHT};

/// Calculate the score for a game finished in `elapsed_secs` with `moves` attempts.
pub fn calculate_score(elapsed_secs: u32, moves: u32) -> u32 {
    let time_points = elapsed_secs.saturating_mul(TIME_WEIGHT);
    let move_points = moves.saturating_mul(MOVE_WEIGHT);
    time_points.saturating_add(move_points)
}

/// Fractional form of the formula, rounded half away from zero.
pub fn calculate_score_f64(elapsed_secs: f64, moves: f64) -> f64 {
    (elapsed_secs * TIME_WEIGHT as f64 + moves * MOVE_WEIGHT as f64).round()
}
