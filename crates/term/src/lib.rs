//! Terminal presentation for the memory game.
//!
//! Scenes are drawn into a [`FrameBuffer`] by [`GameView`] and flushed by
//! [`TerminalRenderer`], which repaints only the cells that changed. No
//! widget toolkit is involved.
//!
//! Card symbols are emoji, so the framebuffer tracks two-column glyphs and the
//! renderer never splits one across a repaint.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use memory_match_core as core;
pub use memory_match_store as store;
pub use memory_match_types as types;

pub use fb::{char_width, str_width, Cell, CellStyle, FrameBuffer, Rgb, WIDE_CONTINUATION};
pub use game_view::{
    status_message, DialogView, GameOverView, GameView, LeaderboardView,
    SaveView, Scene, Viewport,
};
pub use renderer::{
    changed_spans, encode_diff_into, encode_full_into, ChangedSpans, Span, TerminalRenderer,
};
