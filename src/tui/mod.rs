//! # TUI Adapter
//!
//! Terminal I/O for the three-pane browser. This is the only layer that
//! knows about crossterm; everything under `core` is plain data and
//! arithmetic that could back a different front end.
//!
//! ```text
//!  ┌──────────┬──────────────────────┬────────────────┐
//!  │ hotkeys  │ activity log         │ Dir: <name>    │
//!  │          │                      │ [DIR]  src     │
//!  │          │                      │ [FILE] a.txt   │
//!  │          │ > prompt row         │                │
//!  └──────────┴──────────────────────┴────────────────┘
//! ```
//!
//! ## Redraw Strategy
//!
//! No frame loop. The session blocks on input and repaints only in
//! response to it:
//!
//! - **Full render** (clear + all panes): startup, resize, and any log
//!   append, since new lines reflow the whole log pane.
//! - **Row render**: selection moves that keep the scroll offset repaint
//!   just the two affected file rows; offset changes repaint the file
//!   pane alone.
//!
//! Raw mode, the alternate screen, and cursor visibility are owned by
//! `TerminalModeGuard`, restored on drop even when the session errors.

mod event;
pub mod logbuf;
pub mod prompt;
pub mod render;
pub mod screen;
pub mod session;

use std::io::{self, stdout};
use std::path::PathBuf;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::info;

use crate::core::config::ResolvedConfig;
use crate::core::layout;
use crate::fs::DiskFileService;
use crate::tui::screen::Screen;
use crate::tui::session::Session;

/// RAII guard for terminal state. Construction enters raw mode, the
/// alternate screen, and hides the cursor; drop restores all three so a
/// panicking session still leaves the shell usable.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide)?;
        info!("Terminal raw mode enabled (alternate screen, cursor hidden)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Hand the terminal to a child process: cooked mode, primary screen,
/// visible cursor.
pub(crate) fn suspend() -> io::Result<()> {
    execute!(stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()
}

/// Reclaim the terminal after [`suspend`].
pub(crate) fn resume() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, Hide)
}

/// Set up the terminal and run the browser until the user exits.
pub fn run(config: &ResolvedConfig) -> io::Result<()> {
    let fs = DiskFileService::new();
    let start_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let (width, height) =
        crossterm::terminal::size().unwrap_or((layout::MIN_WIDTH, layout::MIN_HEIGHT));

    let _guard = TerminalModeGuard::new()?;
    let screen = Screen::new(stdout(), width, height);
    let mut session = Session::new(screen, &fs, config, start_dir);
    session.run()
}
