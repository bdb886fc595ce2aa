//! GameView: maps a game snapshot plus dialog state into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use chrono::Datelike;

use crate::core::GameSnapshot;
use crate::fb::{char_width, str_width, CellStyle, FrameBuffer, Rgb};
use crate::store::ScoreRecord;
use crate::types::{
    Card, CardId, GameStatus, DECK_SIZE, GRID_COLUMNS, GRID_ROWS, PLAYER_NAME_MAX_CHARS,
};

pub const TITLE: &str = "Memory Card Game";

/// Card face width in terminal columns.
pub const CARD_W: u16 = 8;
/// Card face height in terminal rows.
pub const CARD_H: u16 = 3;
const GAP_X: u16 = 2;
const GAP_Y: u16 = 1;
const HEADER_H: u16 = 5;

const GRID_W: u16 = (GRID_COLUMNS as u16) * CARD_W + (GRID_COLUMNS as u16 - 1) * GAP_X;
const GRID_H: u16 = (GRID_ROWS as u16) * CARD_H + (GRID_ROWS as u16 - 1) * GAP_Y;
const FRAME_W: u16 = GRID_W + 4;
const FRAME_H: u16 = GRID_H + 4;

const BLACK: Rgb = Rgb::new(0, 0, 0);
const PANEL_BG: Rgb = Rgb::new(24, 24, 34);
const RED: Rgb = Rgb::new(235, 90, 90);
const GREEN: Rgb = Rgb::new(110, 210, 130);
const YELLOW: Rgb = Rgb::new(245, 210, 80);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Progress of the score form in the game-over dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveView<'a> {
    /// Name being typed; `error` is the last failure, shown under the field.
    Editing { error: Option<&'a str> },
    Saving,
    Saved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverView<'a> {
    pub elapsed_secs: u32,
    pub moves: u32,
    pub score: u32,
    pub name: &'a str,
    pub save: SaveView<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardView<'a> {
    Loading,
    Failed(&'a str),
    Loaded(&'a [ScoreRecord]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogView<'a> {
    GameOver(GameOverView<'a>),
    Leaderboard(LeaderboardView<'a>),
}

/// Everything drawn in one frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub snap: &'a GameSnapshot,
    /// Card under the cursor; hidden while a dialog is open.
    pub cursor: CardId,
    pub dialog: Option<DialogView<'a>>,
}

impl<'a> Scene<'a> {
    pub fn board(snap: &'a GameSnapshot, cursor: CardId) -> Self {
        Self {
            snap,
            cursor,
            dialog: None,
        }
    }
}

/// A lightweight terminal renderer for the card table.
///
/// Header and board are centered as one block in the viewport.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Top-left corner of the board frame for `viewport`.
    pub fn board_origin(&self, viewport: Viewport) -> (u16, u16) {
        let start_x = viewport.width.saturating_sub(FRAME_W) / 2;
        let start_y = viewport.height.saturating_sub(HEADER_H + FRAME_H) / 2;
        (start_x, start_y + HEADER_H)
    }

    /// Top-left terminal cell of card `id`.
    pub fn card_origin(&self, viewport: Viewport, id: CardId) -> (u16, u16) {
        let (bx, by) = self.board_origin(viewport);
        let col = (id % GRID_COLUMNS) as u16;
        let row = (id / GRID_COLUMNS) as u16;
        (
            bx + 2 + col * (CARD_W + GAP_X),
            by + 2 + row * (CARD_H + GAP_Y),
        )
    }

    /// Render a scene into an existing framebuffer.
    ///
    /// Does not allocate once `fb` has the viewport's size, so callers keep one
    /// framebuffer across frames.
    pub fn render_into(&self, scene: &Scene<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (bx, by) = self.board_origin(viewport);
        self.draw_header(fb, scene.snap, bx, by - HEADER_H);

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PANEL_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        fb.fill_rect(bx + 1, by + 1, FRAME_W - 2, FRAME_H - 2, ' ', bg);
        draw_border(fb, bx, by, FRAME_W, FRAME_H, border);

        for id in 0..DECK_SIZE as CardId {
            if let Some(card) = scene.snap.card(id) {
                let (x, y) = self.card_origin(viewport, id);
                draw_card(fb, x, y, card);
            }
        }

        match scene.dialog {
            None => {
                if scene.snap.playable() {
                    let (x, y) = self.card_origin(viewport, scene.cursor);
                    draw_cursor(fb, x, y);
                }
            }
            Some(DialogView::GameOver(view)) => draw_game_over(fb, viewport, &view),
            Some(DialogView::Leaderboard(view)) => draw_leaderboard(fb, viewport, &view),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, scene: &Scene<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let title = CellStyle::new(Rgb::new(140, 170, 255), BLACK).bold();
        let text = CellStyle::new(Rgb::new(170, 170, 180), BLACK);
        let label = CellStyle::new(Rgb::new(220, 220, 220), BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        let hint = CellStyle::new(Rgb::new(120, 120, 130), BLACK).dim();

        fb.put_str(x, y, TITLE, title);
        fb.put_str(x, y + 1, status_message(snap.status), text);

        let mut cx = fb.put_str(x, y + 2, "Time ", label);
        cx = put_clock(fb, cx, y + 2, snap.elapsed_secs, value);
        cx = fb.put_str(cx + 3, y + 2, "Moves ", label);
        fb.put_u32(cx, y + 2, snap.moves, value);

        fb.put_str(x, y + 3, "[n] New Game  [b] Leaderboard  [q] Quit", hint);
    }
}

pub fn status_message(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Playing => "Find all matching pairs!",
        GameStatus::Completed => "🎉 Congratulations! You completed the game!",
        GameStatus::Paused => "Game paused",
    }
}

// `m:ss`, minutes unpadded.
fn put_clock(fb: &mut FrameBuffer, x: u16, y: u16, secs: u32, style: CellStyle) -> u16 {
    let cx = fb.put_u32(x, y, secs / 60, style);
    fb.put_char(cx, y, ':', style);
    put_two_digits(fb, cx + 1, y, secs % 60, style)
}

// `YYYY-MM-DD` in UTC.
fn put_date(fb: &mut FrameBuffer, x: u16, y: u16, record: &ScoreRecord, style: CellStyle) -> u16 {
    let date = record.created_at.date_naive();
    let mut cx = fb.put_u32(x, y, date.year().max(0) as u32, style);
    fb.put_char(cx, y, '-', style);
    cx = put_two_digits(fb, cx + 1, y, date.month(), style);
    fb.put_char(cx, y, '-', style);
    put_two_digits(fb, cx + 1, y, date.day(), style)
}

fn put_two_digits(fb: &mut FrameBuffer, x: u16, y: u16, value: u32, style: CellStyle) -> u16 {
    let mut cx = x;
    if value < 10 {
        fb.put_char(cx, y, '0', style);
        cx += 1;
    }
    fb.put_u32(cx, y, value, style)
}

// Write `s` without exceeding `max_cols` columns.
fn put_str_max(fb: &mut FrameBuffer, x: u16, y: u16, s: &str, max_cols: u16, style: CellStyle) -> u16 {
    let mut cx = x;
    for ch in s.chars() {
        let w = char_width(ch);
        if cx - x + w > max_cols {
            break;
        }
        fb.put_char(cx, y, ch, style);
        cx += w;
    }
    cx
}

fn put_centered(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, s: &str, style: CellStyle) {
    let sw = str_width(s).min(w);
    put_str_max(fb, x + (w - sw) / 2, y, s, w, style);
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_card(fb: &mut FrameBuffer, x: u16, y: u16, card: &Card) {
    let glyph_x = x + (CARD_W - 2) / 2;
    let glyph_y = y + CARD_H / 2;

    if card.is_matched {
        let style = CellStyle::new(Rgb::new(200, 240, 210), Rgb::new(40, 110, 60)).dim();
        fb.fill_rect(x, y, CARD_W, CARD_H, ' ', style);
        fb.put_str(glyph_x, glyph_y, card.symbol, style);
    } else if card.is_flipped {
        let style = CellStyle::new(Rgb::new(30, 30, 30), Rgb::new(235, 235, 225));
        fb.fill_rect(x, y, CARD_W, CARD_H, ' ', style);
        fb.put_str(glyph_x, glyph_y, card.symbol, style);
    } else {
        let style = CellStyle::new(Rgb::new(230, 230, 255), Rgb::new(70, 80, 160)).bold();
        fb.fill_rect(x, y, CARD_W, CARD_H, ' ', style);
        fb.put_char(glyph_x, glyph_y, '?', style);
    }
}

fn draw_cursor(fb: &mut FrameBuffer, x: u16, y: u16) {
    let style = CellStyle::new(YELLOW, PANEL_BG).bold();
    let mid = y + CARD_H / 2;
    fb.put_char(x.saturating_sub(1), mid, '▶', style);
    fb.put_char(x + CARD_W, mid, '◀', style);
}

// Blank, bordered box centered in the viewport. Returns its top-left corner.
fn draw_dialog_box(fb: &mut FrameBuffer, viewport: Viewport, w: u16, h: u16) -> (u16, u16) {
    let w = w.min(viewport.width);
    let h = h.min(viewport.height);
    let x = (viewport.width - w) / 2;
    let y = (viewport.height - h) / 2;
    let fill = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG);
    fb.fill_rect(x, y, w, h, ' ', fill);
    draw_border(fb, x, y, w, h, CellStyle::new(Rgb::new(140, 170, 255), PANEL_BG).bold());
    (x, y)
}

const GAME_OVER_W: u16 = 44;
const GAME_OVER_H: u16 = 14;

fn draw_game_over(fb: &mut FrameBuffer, viewport: Viewport, view: &GameOverView<'_>) {
    let (x, y) = draw_dialog_box(fb, viewport, GAME_OVER_W, GAME_OVER_H);
    let inner_x = x + 1;
    let inner_w = GAME_OVER_W - 2;

    let heading = CellStyle::new(Rgb::new(140, 170, 255), PANEL_BG).bold();
    let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
    let value = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG);
    let hint = CellStyle::new(Rgb::new(150, 150, 160), PANEL_BG);

    put_centered(fb, inner_x, inner_w, y + 1, "🎉 Game Complete! 🎉", heading);

    // "Time: m:ss" / "Moves: N" / "Score: N", left-aligned on a shared column.
    let col = x + (GAME_OVER_W - 14) / 2;
    let cx = fb.put_str(col, y + 3, "Time: ", label);
    put_clock(fb, cx, y + 3, view.elapsed_secs, value);
    let cx = fb.put_str(col, y + 4, "Moves: ", label);
    fb.put_u32(cx, y + 4, view.moves, value);
    let cx = fb.put_str(col, y + 5, "Score: ", label);
    fb.put_u32(cx, y + 5, view.score, value);

    let field_x = x + (GAME_OVER_W - (PLAYER_NAME_MAX_CHARS as u16 + 2)) / 2;
    match view.save {
        SaveView::Editing { error } => {
            put_centered(fb, inner_x, inner_w, y + 7, "Enter your name for the leaderboard:", value);
            draw_name_field(fb, field_x, y + 8, view.name, true);
            if let Some(msg) = error {
                put_centered(fb, inner_x, inner_w, y + 10, msg, CellStyle::new(RED, PANEL_BG));
            }
            put_centered(fb, inner_x, inner_w, y + 12, "[Enter] Save Score   [Esc] Cancel", hint);
        }
        SaveView::Saving => {
            put_centered(fb, inner_x, inner_w, y + 7, "Saving...", value);
            draw_name_field(fb, field_x, y + 8, view.name, false);
        }
        SaveView::Saved => {
            put_centered(
                fb,
                inner_x,
                inner_w,
                y + 8,
                "Score saved successfully! 🎯",
                CellStyle::new(GREEN, PANEL_BG).bold(),
            );
            put_centered(fb, inner_x, inner_w, y + 12, "[p] Play Again   [Esc] Close", hint);
        }
    }
}

fn draw_name_field(fb: &mut FrameBuffer, x: u16, y: u16, name: &str, focused: bool) {
    let frame = CellStyle::new(Rgb::new(150, 150, 160), PANEL_BG);
    let text = CellStyle::new(Rgb::new(250, 250, 250), Rgb::new(50, 50, 64));
    let width = PLAYER_NAME_MAX_CHARS as u16 + 1;

    fb.put_char(x, y, '[', frame);
    fb.fill_rect(x + 1, y, width, 1, ' ', text);
    let end = put_str_max(fb, x + 1, y, name, width - 1, text);
    if focused {
        fb.put_char(end, y, '_', text.bold());
    }
    fb.put_char(x + 1 + width, y, ']', frame);
}

const LEADERBOARD_W: u16 = 56;
const LEADERBOARD_H: u16 = 18;

fn draw_leaderboard(fb: &mut FrameBuffer, viewport: Viewport, view: &LeaderboardView<'_>) {
    let (x, y) = draw_dialog_box(fb, viewport, LEADERBOARD_W, LEADERBOARD_H);
    let inner_x = x + 1;
    let inner_w = LEADERBOARD_W - 2;

    let heading = CellStyle::new(Rgb::new(140, 170, 255), PANEL_BG).bold();
    let text = CellStyle::new(Rgb::new(200, 200, 210), PANEL_BG);
    let hint = CellStyle::new(Rgb::new(150, 150, 160), PANEL_BG);

    put_centered(fb, inner_x, inner_w, y + 1, "🏆 Leaderboard", heading);

    match view {
        LeaderboardView::Loading => {
            put_centered(fb, inner_x, inner_w, y + 4, "Loading scores...", text);
            put_centered(fb, inner_x, inner_w, y + LEADERBOARD_H - 2, "[Esc] Close", hint);
        }
        LeaderboardView::Failed(msg) => {
            put_centered(fb, inner_x, inner_w, y + 4, msg, CellStyle::new(RED, PANEL_BG));
            put_centered(fb, inner_x, inner_w, y + LEADERBOARD_H - 2, "[r] Try Again   [Esc] Close", hint);
        }
        LeaderboardView::Loaded([]) => {
            put_centered(fb, inner_x, inner_w, y + 4, "No scores yet. Be the first to play!", text);
            put_centered(fb, inner_x, inner_w, y + LEADERBOARD_H - 2, "[Esc] Start Playing", hint);
        }
        LeaderboardView::Loaded(rows) => {
            draw_score_table(fb, x + 2, y + 3, rows);
            put_centered(fb, inner_x, inner_w, y + LEADERBOARD_H - 2, "[r] Refresh   [Esc] Close", hint);
        }
    }
}

fn draw_score_table(fb: &mut FrameBuffer, x: u16, y: u16, rows: &[ScoreRecord]) {
    let header = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
    let name = CellStyle::new(Rgb::new(240, 240, 240), PANEL_BG);
    let score = CellStyle::new(Rgb::new(140, 170, 255), PANEL_BG).bold();
    let plain = CellStyle::new(Rgb::new(190, 190, 200), PANEL_BG);
    let date = plain.dim();

    const RANK: u16 = 0;
    const PLAYER: u16 = 6;
    const SCORE: u16 = 28;
    const TIME: u16 = 35;
    const DATE: u16 = 42;

    fb.put_str(x + RANK, y, "Rank", header);
    fb.put_str(x + PLAYER, y, "Player", header);
    fb.put_str(x + SCORE, y, "Score", header);
    fb.put_str(x + TIME, y, "Time", header);
    fb.put_str(x + DATE, y, "Date", header);

    for (i, record) in rows.iter().take(LEADERBOARD_H as usize - 6).enumerate() {
        let ry = y + 1 + i as u16;
        fb.put_u32(x + RANK + 1, ry, i as u32 + 1, rank_style(i));
        put_str_max(fb, x + PLAYER, ry, &record.player_name, PLAYER_NAME_MAX_CHARS as u16, name);
        fb.put_u32(x + SCORE, ry, record.score, score);
        put_clock(fb, x + TIME, ry, record.time_taken, plain);
        put_date(fb, x + DATE, ry, record, date);
    }
}

fn rank_style(index: usize) -> CellStyle {
    let fg = match index {
        0 => YELLOW,
        1 => Rgb::new(200, 200, 210),
        2 => Rgb::new(230, 150, 80),
        _ => Rgb::new(120, 160, 240),
    };
    CellStyle::new(fg, PANEL_BG).bold()
}
