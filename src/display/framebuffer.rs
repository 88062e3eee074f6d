//! The in-memory, page-packed pixel buffer and the drawing primitives that operate on it.
//!
//! The buffer mirrors the SSD1306 display RAM in page addressing mode: byte `[page][column]` holds
//! 8 vertically stacked pixels, bit 0 on top. Drawing never touches hardware and never fails;
//! anything outside the buffer is silently cropped.

use itertools::iproduct;

use crate::font::{self, GLYPH_PITCH};

/// Clip a value between some low and high limit.
fn clip<T: PartialOrd>(lo: T, x: T, hi: T) -> T {
    match () {
        _ if x > hi => hi,
        _ if x < lo => lo,
        _ => x,
    }
}

/// A 1 bit per pixel framebuffer `W` pixels wide and `PAGES * 8` pixels tall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer<const W: usize, const PAGES: usize> {
    pages: [[u8; W]; PAGES],
}

impl<const W: usize, const PAGES: usize> Default for FrameBuffer<W, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const PAGES: usize> FrameBuffer<W, PAGES> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = PAGES * 8;

    /// Create a cleared buffer.
    pub fn new() -> Self {
        Self {
            pages: [[0; W]; PAGES],
        }
    }

    /// The raw page-major contents, in the order they are written to display RAM.
    pub fn pages(&self) -> &[[u8; W]; PAGES] {
        &self.pages
    }

    /// Set every byte to `byte`, i.e. the same 8-pixel column pattern everywhere.
    pub fn fill(&mut self, byte: u8) {
        for page in self.pages.iter_mut() {
            for seg in page.iter_mut() {
                *seg = byte;
            }
        }
    }

    pub fn clear(&mut self) {
        self.fill(0x00);
    }

    /// Find the byte and bit holding pixel `(x, y)`, if it lies within the buffer.
    fn locate(x: i32, y: i32) -> Option<(usize, usize, u8)> {
        if x < 0 || y < 0 || x as usize >= W || y as usize >= Self::HEIGHT {
            return None;
        }
        Some((y as usize / 8, x as usize, 1 << (y % 8)))
    }

    fn put(&mut self, x: i32, y: i32, on: bool) {
        if let Some((page, col, mask)) = Self::locate(x, y) {
            let seg = &mut self.pages[page][col];
            *seg = if on { *seg | mask } else { *seg & !mask };
        }
    }

    /// OR `bits` into the byte at `page`, `col`, if it exists.
    fn merge(&mut self, page: i32, col: i32, bits: u8) {
        if page < 0 || col < 0 || page as usize >= PAGES || col as usize >= W {
            return;
        }
        self.pages[page as usize][col as usize] |= bits;
    }

    /// Turn one pixel on or off, leaving the other 7 pixels of its byte untouched. Coordinates
    /// outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i16, y: i16, on: bool) {
        self.put(x.into(), y.into(), on)
    }

    /// Whether a pixel is on. Pixels outside the buffer read as off.
    pub fn get_pixel(&self, x: i16, y: i16) -> bool {
        match Self::locate(x.into(), y.into()) {
            Some((page, col, mask)) => self.pages[page][col] & mask != 0,
            None => false,
        }
    }

    /// The span `[start, start + len)` clipped to `[0, limit)`, as inclusive bounds.
    fn visible_span(start: i32, len: i32, limit: usize) -> Option<(i32, i32)> {
        let lo = clip(0, start, limit as i32);
        let hi = clip(0, start + len, limit as i32);
        if lo < hi {
            Some((lo, hi - 1))
        } else {
            None
        }
    }

    /// Draw the outline of a `w` x `h` rectangle whose top left pixel is `(x, y)`.
    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (x, y, w, h) = (i32::from(x), i32::from(y), i32::from(w), i32::from(h));
        let (right, bottom) = (x + w - 1, y + h - 1);
        let cols = Self::visible_span(x, w, W);
        let rows = Self::visible_span(y, h, Self::HEIGHT);
        if let (Some((x0, x1)), Some((y0, y1))) = (cols, rows) {
            for (px, py) in iproduct!(x0..=x1, y0..=y1) {
                if px == x || px == right || py == y || py == bottom {
                    self.put(px, py, on);
                }
            }
        }
    }

    /// Fill a `w` x `h` rectangle whose top left pixel is `(x, y)`.
    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        if w <= 0 || h <= 0 {
            return;
        }
        let cols = Self::visible_span(x.into(), w.into(), W);
        let rows = Self::visible_span(y.into(), h.into(), Self::HEIGHT);
        if let (Some((x0, x1)), Some((y0, y1))) = (cols, rows) {
            for (px, py) in iproduct!(x0..=x1, y0..=y1) {
                self.put(px, py, on);
            }
        }
    }

    fn draw_glyph(&mut self, x: i32, y: i32, c: char) {
        let glyph = font::glyph(c);
        let page = y.div_euclid(8);
        let shift = y.rem_euclid(8) as u32;
        for (i, &bits) in glyph.iter().enumerate() {
            let col = x + i as i32;
            if col >= W as i32 {
                break;
            }
            self.merge(page, col, bits << shift);
            if shift != 0 {
                // The rows pushed below the bottom of this page land at the top of the next one.
                self.merge(page + 1, col, bits >> (8 - shift));
            }
        }
    }

    /// Draw a character with its top left corner at `(x, y)`. The glyph is ORed into the buffer, so
    /// pixels already on stay on. Characters without a glyph draw nothing.
    pub fn draw_char(&mut self, x: i16, y: i16, c: char) {
        self.draw_glyph(x.into(), y.into(), c)
    }

    /// Draw `text` left to right at a 6 pixel pitch, stopping at the end of the string or at the
    /// first NUL character.
    pub fn draw_str(&mut self, x: i16, y: i16, text: &str) {
        let mut cursor = i32::from(x);
        for c in text.chars().take_while(|&c| c != '\0') {
            if cursor >= W as i32 {
                break;
            }
            self.draw_glyph(cursor, y.into(), c);
            cursor += i32::from(GLYPH_PITCH);
        }
    }

    /// Overlay a bitmap of `w` x `h` pixels at `(x, y)`.
    ///
    /// `source` is packed in bands of 8 rows: byte `(row / 8) * w + col` holds rows `row & !7` to
    /// `row | 7` of column `col`, with the most significant bit at the top. Only set bits are
    /// drawn; clear bits leave the buffer as it was. Bytes missing from the end of `source` count
    /// as clear.
    pub fn draw_bitmap(&mut self, x: i16, y: i16, w: i16, h: i16, source: &[u8]) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (w, h) = (w as usize, h as usize);
        for (col, row) in iproduct!(0..w, 0..h) {
            let byte = source.get((row / 8) * w + col).copied().unwrap_or(0);
            if (byte << (row % 8)) & 0x80 != 0 {
                self.put(i32::from(x) + col as i32, i32::from(y) + row as i32, true);
            }
        }
    }

    /// Draw `value` in decimal at `(x, y)` and return the x coordinate just after the last digit.
    ///
    /// Leading zeros are skipped unless `zero_fill` is set, in which case all 5 digits are drawn.
    /// The units digit is always drawn, so 0 shows as "0".
    pub fn draw_number(&mut self, x: i16, y: i16, value: u16, zero_fill: bool) -> i16 {
        let mut cursor = i32::from(x);
        let mut significant = zero_fill;
        let mut div = 10_000u16;
        while div > 0 {
            let digit = (value / div % 10) as u8;
            if digit != 0 || significant || div == 1 {
                significant = true;
                self.draw_glyph(cursor, y.into(), char::from(b'0' + digit));
                cursor += i32::from(GLYPH_PITCH);
            }
            div /= 10;
        }
        clip(i32::from(i16::MIN), cursor, i32::from(i16::MAX)) as i16
    }
}
