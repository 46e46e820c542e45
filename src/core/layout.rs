//! # Pane Layout
//!
//! Pure geometry for the three-pane screen. Given a terminal size, computes
//! the column extents of the hotkey, log, and file panes plus the two
//! single-column dividers between them:
//!
//! ```text
//!  ┌──────────┬──────────────────────┬────────────────┐
//!  │ hotkeys  │ log                  │ files          │
//!  │ (20%)    │ (45%)                │ (remainder)    │
//!  │          │                      │                │
//!  │          │ > prompt row         │                │
//!  └──────────┴──────────────────────┴────────────────┘
//! ```
//!
//! Degenerate terminal sizes are clamped to usable floors rather than
//! rejected; the result of [`compute`] is always renderable. Recomputation
//! is idempotent: the same size always yields the same geometry.

/// Smallest terminal width the layout will target.
pub const MIN_WIDTH: u16 = 60;
/// Smallest terminal height the layout will target.
pub const MIN_HEIGHT: u16 = 10;
/// No pane is ever computed narrower than this.
pub const MIN_PANE_WIDTH: u16 = 10;

const HOTKEY_FRACTION: f32 = 0.20;
const LOG_FRACTION: f32 = 0.45;

/// Horizontal extent of one pane. All panes span the full terminal height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneRect {
    pub x: u16,
    pub width: u16,
}

/// Complete screen geometry for one terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
    pub hotkey: PaneRect,
    pub log: PaneRect,
    pub files: PaneRect,
    /// Divider columns, one between each adjacent pane pair.
    pub dividers: [u16; 2],
}

impl Geometry {
    /// List rows visible in the file pane (top row is the `Dir:` header).
    pub fn viewport_height(&self) -> usize {
        usize::from(self.height - 1)
    }

    /// Log rows visible above the reserved prompt row.
    pub fn log_height(&self) -> usize {
        usize::from(self.height - 1)
    }

    /// The row the line editor draws into.
    pub fn prompt_row(&self) -> u16 {
        self.height - 1
    }
}

/// Compute pane geometry for a terminal of `width` x `height` cells.
///
/// The hotkey and log panes take fixed fractions of the width (subject to
/// the per-pane floor); the file pane absorbs the integer-rounding
/// remainder so pane widths plus the two dividers sum exactly to `width`.
pub fn compute(width: u16, height: u16) -> Geometry {
    let width = width.max(MIN_WIDTH);
    let height = height.max(MIN_HEIGHT);

    let hotkey_w = ((f32::from(width) * HOTKEY_FRACTION) as u16).max(MIN_PANE_WIDTH);
    let log_w = ((f32::from(width) * LOG_FRACTION) as u16).max(MIN_PANE_WIDTH);
    let files_w = width - hotkey_w - log_w - 2;

    let divider1 = hotkey_w;
    let divider2 = hotkey_w + 1 + log_w;

    Geometry {
        width,
        height,
        hotkey: PaneRect {
            x: 0,
            width: hotkey_w,
        },
        log: PaneRect {
            x: divider1 + 1,
            width: log_w,
        },
        files: PaneRect {
            x: divider2 + 1,
            width: files_w,
        },
        dividers: [divider1, divider2],
    }
}
