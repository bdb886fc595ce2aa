//! Framebuffer and style types for terminal rendering.
//!
//! Card symbols are emoji, which terminals draw two columns wide. A wide
//! glyph occupies its own cell plus a trailing [`WIDE_CONTINUATION`] cell
//! that the renderer never prints.

/// Marks the right half of a two-column glyph.
pub const WIDE_CONTINUATION: char = '\0';

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub fn is_continuation(&self) -> bool {
        self.ch == WIDE_CONTINUATION
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Terminal columns taken by `ch`.
///
/// Covers the emoji and CJK blocks this game can show; everything else is
/// treated as one column.
pub fn char_width(ch: char) -> u16 {
    let c = ch as u32;
    let wide = matches!(c,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x1F300..=0x1F64F
        | 0x1F680..=0x1F6FF
        | 0x1F900..=0x1F9FF
        | 0x1FA70..=0x1FAFF
        | 0x20000..=0x3FFFD);
    if wide {
        2
    } else {
        1
    }
}

/// Terminal columns taken by `s`.
pub fn str_width(s: &str) -> u16 {
    s.chars().map(char_width).fold(0u16, u16::saturating_add)
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Raw cell write. Prefer [`FrameBuffer::put_char`], which keeps wide
    /// glyphs consistent.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write one glyph. Wide glyphs also claim the cell to their right; a wide
    /// glyph that would not fit is replaced by a space.
    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        if self.idx(x, y).is_none() {
            return;
        }
        self.break_wide_at(x, y);

        if char_width(ch) == 2 {
            if x + 1 >= self.width {
                self.set(x, y, Cell { ch: ' ', style });
                return;
            }
            self.break_wide_at(x + 1, y);
            self.set(x, y, Cell { ch, style });
            self.set(x + 1, y, Cell { ch: WIDE_CONTINUATION, style });
        } else {
            self.set(x, y, Cell { ch, style });
        }
    }

    // Blank the other half of any wide glyph that covers (x, y).
    fn break_wide_at(&mut self, x: u16, y: u16) {
        let Some(cell) = self.get(x, y) else {
            return;
        };
        if cell.is_continuation() {
            if x > 0 {
                if let Some(lead) = self.get(x - 1, y) {
                    self.set(x - 1, y, Cell { ch: ' ', ..lead });
                }
            }
        } else if char_width(cell.ch) == 2 {
            if let Some(tail) = self.get(x + 1, y) {
                if tail.is_continuation() {
                    self.set(x + 1, y, Cell { ch: ' ', ..tail });
                }
            }
        }
    }

    /// Write `s` left to right, clipped at the right edge. Returns the column
    /// after the last glyph written.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            let w = char_width(ch);
            if cx.saturating_add(w) > self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += w;
        }
        cx
    }

    /// Decimal `value` without allocating. Returns the column after the last digit.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) -> u16 {
        let mut digits = [0u8; 10];
        let mut n = value;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        let mut cx = x;
        for &d in digits[..len].iter().rev() {
            self.put_char(cx, y, d as char, style);
            cx = cx.saturating_add(1);
        }
        cx
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Text of row `y` with continuation cells removed. Test helper.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoji_take_two_columns() {
        assert_eq!(char_width('🎮'), 2);
        assert_eq!(char_width('🎭'), 2);
        assert_eq!(char_width('?'), 1);
        assert_eq!(char_width('─'), 1);
        assert_eq!(str_width("a🎲b"), 4);
    }

    #[test]
    fn wide_glyph_claims_next_cell() {
        let mut fb = FrameBuffer::new(4, 1);
        let end = fb.put_str(0, 0, "🎯x", CellStyle::default());
        assert_eq!(end, 3);
        assert_eq!(fb.get(0, 0).unwrap().ch, '🎯');
        assert!(fb.get(1, 0).unwrap().is_continuation());
        assert_eq!(fb.get(2, 0).unwrap().ch, 'x');
        assert_eq!(fb.row_text(0), "🎯x ");
    }

    #[test]
    fn overwriting_half_a_wide_glyph_blanks_the_other_half() {
        let style = CellStyle::default();
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_char(1, 0, '🎨', style);
        fb.put_char(2, 0, 'z', style);
        assert_eq!(fb.get(1, 0).unwrap().ch, ' ');
        assert_eq!(fb.get(2, 0).unwrap().ch, 'z');

        fb.put_char(1, 0, '🎨', style);
        fb.put_char(1, 0, 'y', style);
        assert_eq!(fb.get(2, 0).unwrap().ch, ' ');
    }

    #[test]
    fn wide_glyph_at_right_edge_is_dropped() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_char(2, 0, '🎪', CellStyle::default());
        assert_eq!(fb.get(2, 0).unwrap().ch, ' ');
        assert_eq!(fb.put_str(1, 0, "🎪🎪", CellStyle::default()), 3);
    }

    #[test]
    fn put_u32_writes_digits() {
        let mut fb = FrameBuffer::new(12, 1);
        assert_eq!(fb.put_u32(0, 0, 0, CellStyle::default()), 1);
        assert_eq!(fb.put_u32(2, 0, 7065, CellStyle::default()), 6);
        assert_eq!(fb.row_text(0), "0 7065      ");
    }
}
