//! Terminal drawing primitive.
//!
//! Every cell the program paints goes through [`Screen::draw_region`]:
//! position, fixed column width, text, style. The screen pads or truncates
//! to exactly the requested width, so painting a region also erases
//! whatever was there before. Nothing is flushed implicitly; callers batch
//! their draws and flush once.
//!
//! The writer is generic so tests can render into a `Vec<u8>` and inspect
//! the byte stream.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Color, Colors, Print, ResetColor, SetColors, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthChar;

/// Visual treatment of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStyle {
    Normal,
    /// Highlight for the selected file row.
    Selected,
    /// Muted text for static hints.
    Dim,
}

pub struct Screen<W: Write> {
    out: W,
    width: u16,
    height: u16,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self { out, width, height }
    }

    /// Record a new terminal size. Subsequent draws clip against it.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))
    }

    /// Paint `text` at `(x, y)`, padded or truncated to exactly `width`
    /// display columns. Regions that start outside the live terminal are
    /// dropped; regions that overhang the right edge are clipped.
    pub fn draw_region(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        text: &str,
        style: RegionStyle,
    ) -> io::Result<()> {
        if y >= self.height || x >= self.width || width == 0 {
            return Ok(());
        }
        let width = width.min(self.width - x);
        let cell = fit_to_width(text, usize::from(width));
        match style {
            RegionStyle::Normal => queue!(self.out, MoveTo(x, y), Print(cell)),
            RegionStyle::Selected => queue!(
                self.out,
                MoveTo(x, y),
                SetColors(Colors::new(Color::White, Color::DarkBlue)),
                Print(cell),
                ResetColor
            ),
            RegionStyle::Dim => queue!(
                self.out,
                MoveTo(x, y),
                SetForegroundColor(Color::DarkGrey),
                Print(cell),
                ResetColor
            ),
        }
    }

    /// Park the cursor, clamped inside the terminal.
    pub fn move_cursor(&mut self, x: u16, y: u16) -> io::Result<()> {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        queue!(self.out, MoveTo(x, y))
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Show)
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Pad or truncate to exactly `width` display columns. A wide character
/// that would straddle the boundary is dropped and the gap padded with a
/// space. Control characters are skipped because they would desync the
/// column count.
fn fit_to_width(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut cols = 0;
    for ch in text.chars() {
        if ch.is_control() {
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if cols + w > width {
            break;
        }
        out.push(ch);
        cols += w;
    }
    for _ in cols..width {
        out.push(' ');
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
