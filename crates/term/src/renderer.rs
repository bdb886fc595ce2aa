//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed against the previous one and only changed spans are
//! written. Wide glyphs are printed once from their lead cell and the cursor
//! is repositioned explicitly after them, so a terminal that disagrees about
//! glyph width cannot shift the rest of the row.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Horizontal stretch of cells on one row that must be repainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

impl Span {
    fn end(&self) -> u16 {
        self.x + self.len
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    front: Option<FrameBuffer>,
    scratch: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            front: None,
            scratch: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.scratch.clear();
        self.scratch
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush_scratch()
    }

    /// Undo everything [`enter`](Self::enter) did. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.scratch.clear();
        self.scratch
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        let flushed = self.flush_scratch();
        terminal::disable_raw_mode()?;
        flushed
    }

    /// Forget the on-screen frame so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Paint `fb`, then hand the previous frame back through `fb`.
    ///
    /// The caller keeps rendering into the same buffer every frame; the two
    /// buffers trade places instead of being cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.scratch.clear();
        let mut back = match self.front.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.scratch)?;
                prev
            }
            Some(mut prev) => {
                encode_full_into(fb, &mut self.scratch)?;
                prev.resize(fb.width(), fb.height());
                prev
            }
            None => {
                encode_full_into(fb, &mut self.scratch)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_scratch()?;

        std::mem::swap(&mut back, fb);
        self.front = Some(back);
        Ok(())
    }

    fn flush_scratch(&mut self) -> Result<()> {
        self.stdout.write_all(&self.scratch)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a complete repaint of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::new(out);
    for y in 0..fb.height() {
        pen.paint(
            fb,
            Span {
                x: 0,
                y,
                len: fb.width(),
            },
        )?;
    }
    pen.finish()
}

/// Encode only the spans of `next` that differ from `prev`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::new(out);
    for span in changed_spans(prev, next) {
        pen.paint(next, span)?;
    }
    pen.finish()
}

/// Spans where `next` differs from `prev`, widened so no wide glyph is split.
///
/// A size mismatch marks every row dirty. The iterator borrows both frames
/// and does not allocate.
pub fn changed_spans<'a>(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> ChangedSpans<'a> {
    ChangedSpans {
        prev,
        next,
        all_dirty: prev.width() != next.width() || prev.height() != next.height(),
        x: 0,
        y: 0,
    }
}

/// Iterator returned by [`changed_spans`].
#[derive(Debug, Clone)]
pub struct ChangedSpans<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    all_dirty: bool,
    x: u16,
    y: u16,
}

impl ChangedSpans<'_> {
    fn differs(&self, x: u16, y: u16) -> bool {
        self.prev.get(x, y) != self.next.get(x, y)
    }

    fn continuation(&self, x: u16, y: u16) -> bool {
        self.next.get(x, y).is_some_and(|c| c.is_continuation())
    }
}

impl Iterator for ChangedSpans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let (w, h) = (self.next.width(), self.next.height());

        if self.all_dirty {
            if self.y >= h {
                return None;
            }
            let y = self.y;
            self.y += 1;
            return Some(Span { x: 0, y, len: w });
        }

        while self.y < h {
            let y = self.y;
            while self.x < w && !self.differs(self.x, y) {
                self.x += 1;
            }
            if self.x >= w {
                self.x = 0;
                self.y += 1;
                continue;
            }

            let mut start = self.x;
            while self.x < w && self.differs(self.x, y) {
                self.x += 1;
            }
            if self.continuation(start, y) {
                start = start.saturating_sub(1);
            }
            if self.x < w && self.continuation(self.x, y) {
                self.x += 1;
            }
            return Some(Span {
                x: start,
                y,
                len: self.x - start,
            });
        }
        None
    }
}

/// Tracks the active terminal style so attributes are only re-sent on change.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn paint(&mut self, fb: &FrameBuffer, span: Span) -> Result<()> {
        let end = span.end().min(fb.width());
        self.out.queue(cursor::MoveTo(span.x, span.y))?;

        let mut x = span.x;
        while x < end {
            let cell = fb.get(x, span.y).unwrap_or_default();
            self.set_style(cell.style)?;

            if cell.is_continuation() {
                // Lead half lies outside the span.
                self.out.queue(Print(' '))?;
                x += 1;
                continue;
            }

            self.out.queue(Print(cell.ch))?;
            if is_wide_lead(fb, x, span.y) {
                x += 2;
                if x < end {
                    self.out.queue(cursor::MoveTo(x, span.y))?;
                }
            } else {
                x += 1;
            }
        }
        Ok(())
    }

    fn set_style(&mut self, style: CellStyle) -> Result<()> {
        if self.style == Some(style) {
            return Ok(());
        }
        self.out
            .queue(SetAttribute(Attribute::Reset))?
            .queue(SetForegroundColor(to_color(style.fg)))?
            .queue(SetBackgroundColor(to_color(style.bg)))?;
        if style.bold {
            self.out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.style = Some(style);
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn is_wide_lead(fb: &FrameBuffer, x: u16, y: u16) -> bool {
    fb.get(x + 1, y).is_some_and(|c: Cell| c.is_continuation())
}

fn to_color(rgb: Rgb) -> Color {
    let Rgb { r, g, b } = rgb;
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(x: u16, y: u16, len: u16) -> Span {
        Span { x, y, len }
    }

    fn spans(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Span> {
        changed_spans(prev, next).collect()
    }

    #[test]
    fn colors_are_sent_as_truecolor() {
        assert_eq!(
            to_color(Rgb::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn adjacent_changes_form_one_span() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(5, 1);
        let mut b = FrameBuffer::new(5, 1);
        for x in 1..=3 {
            b.set(x, 0, Cell { ch: 'X', style });
        }
        assert_eq!(spans(&a, &b), vec![span(1, 0, 3)]);
    }

    #[test]
    fn separate_changes_form_separate_spans() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = a.clone();
        b.set(0, 0, Cell { ch: 'a', style });
        b.set(4, 0, Cell { ch: 'b', style });
        b.set(2, 1, Cell { ch: 'c', style });
        assert_eq!(
            spans(&a, &b),
            vec![span(0, 0, 1), span(4, 0, 1), span(2, 1, 1)]
        );
    }

    #[test]
    fn span_covers_whole_wide_glyph() {
        let style = CellStyle::default();
        let mut a = FrameBuffer::new(6, 1);
        a.put_char(2, 0, '🎮', style);

        let mut tail_changed = a.clone();
        let tail = tail_changed.get(3, 0).unwrap();
        tail_changed.set(3, 0, Cell { style: style.bold(), ..tail });
        assert_eq!(spans(&a, &tail_changed), vec![span(2, 0, 2)]);

        let mut lead_changed = a.clone();
        let lead = lead_changed.get(2, 0).unwrap();
        lead_changed.set(2, 0, Cell { style: style.dim(), ..lead });
        assert_eq!(spans(&a, &lead_changed), vec![span(2, 0, 2)]);
    }

    #[test]
    fn resized_frame_is_all_dirty() {
        let a = FrameBuffer::new(4, 2);
        let b = FrameBuffer::new(5, 3);
        assert_eq!(
            spans(&a, &b),
            vec![span(0, 0, 5), span(0, 1, 5), span(0, 2, 5)]
        );
    }

    #[test]
    fn wide_glyph_printed_once() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "🎲ab", CellStyle::default());

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('🎲').count(), 1);
        assert!(!text.contains('\0'));
        assert!(text.contains('a') && text.contains('b'));
    }

    #[test]
    fn identical_frames_have_nothing_to_paint() {
        let mut a = FrameBuffer::new(8, 2);
        a.put_str(0, 1, "🎯 ok", CellStyle::default());
        let b = a.clone();
        assert_eq!(changed_spans(&a, &b).count(), 0);

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains('o'));
    }

    #[test]
    fn style_is_sent_once_per_change() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "abc", CellStyle::default().bold());

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // Bold is SGR 1.
        assert_eq!(text.matches("\x1b[1m").count(), 1);
    }
}
