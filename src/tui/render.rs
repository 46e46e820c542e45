//! Pane painting.
//!
//! Two redraw paths, chosen by the session:
//!
//! - [`full`]: clear and repaint dividers plus all three panes. Used on
//!   startup, resize, and whenever the log gains a line.
//! - [`draw_selection_change`]: repaint exactly the two file rows whose
//!   highlight changed. Used for selection moves that kept the same
//!   scroll offset; offset changes repaint the file pane alone via
//!   [`draw_file_pane`].
//!
//! Everything here only queues terminal commands. Callers flush.

use std::io::{self, Write};

use crate::core::keymap::Keymap;
use crate::core::layout::Geometry;
use crate::core::listing::DirectoryListing;
use crate::fs::base_name;
use crate::tui::logbuf::LogBuffer;
use crate::tui::screen::{RegionStyle, Screen};

pub const BANNER: &str = "=== Quick File Manager ===";
const SEPARATOR: &str = "------------------------";
const DIVIDER: &str = "│";

/// Static navigation help shown under the hotkey list.
const NAV_HINTS: [&str; 4] = [
    "  Navigate:",
    "   Up/Down or k/j",
    "   PgUp/PgDn, Home/End",
    "   Enter: open",
];

/// Clear and repaint the whole frame. The prompt row is left blank; the
/// line editor owns it while a prompt is active.
pub fn full<W: Write>(
    screen: &mut Screen<W>,
    geometry: &Geometry,
    keymap: &Keymap,
    log: &LogBuffer,
    listing: &DirectoryListing,
) -> io::Result<()> {
    screen.clear()?;
    draw_dividers(screen, geometry)?;
    draw_hotkey_pane(screen, geometry, keymap)?;
    draw_log_pane(screen, geometry, log)?;
    draw_file_pane(screen, geometry, listing)
}

fn draw_dividers<W: Write>(screen: &mut Screen<W>, geometry: &Geometry) -> io::Result<()> {
    for y in 0..geometry.height {
        for x in geometry.dividers {
            screen.draw_region(x, y, 1, DIVIDER, RegionStyle::Normal)?;
        }
    }
    Ok(())
}

fn draw_hotkey_pane<W: Write>(
    screen: &mut Screen<W>,
    geometry: &Geometry,
    keymap: &Keymap,
) -> io::Result<()> {
    let mut lines = vec![BANNER.to_string(), "Hotkeys:".to_string()];
    if keymap.is_empty() {
        lines.push("  (No hotkeys configured.)".to_string());
    } else {
        for (key, action) in keymap.bindings() {
            lines.push(format!("  {key} : {}", action.name()));
        }
    }
    lines.push(SEPARATOR.to_string());

    let pane = geometry.hotkey;
    let mut y = 0u16;
    for line in &lines {
        if y >= geometry.height {
            return Ok(());
        }
        screen.draw_region(pane.x, y, pane.width, line, RegionStyle::Normal)?;
        y += 1;
    }
    for hint in NAV_HINTS {
        if y >= geometry.height {
            return Ok(());
        }
        screen.draw_region(pane.x, y, pane.width, hint, RegionStyle::Dim)?;
        y += 1;
    }
    Ok(())
}

fn draw_log_pane<W: Write>(
    screen: &mut Screen<W>,
    geometry: &Geometry,
    log: &LogBuffer,
) -> io::Result<()> {
    let pane = geometry.log;
    for (i, line) in log.tail(geometry.log_height()).enumerate() {
        screen.draw_region(pane.x, i as u16, pane.width, line, RegionStyle::Normal)?;
    }
    Ok(())
}

/// Repaint the directory pane: header row plus every viewport row, blank
/// rows included so stale text under a shrinking listing is erased.
pub fn draw_file_pane<W: Write>(
    screen: &mut Screen<W>,
    geometry: &Geometry,
    listing: &DirectoryListing,
) -> io::Result<()> {
    let pane = geometry.files;
    let header = format!("Dir: {}", base_name(listing.dir()));
    screen.draw_region(pane.x, 0, pane.width, &header, RegionStyle::Normal)?;

    let viewport = geometry.viewport_height();
    for i in 0..viewport {
        let idx = listing.offset() + i;
        let y = (i + 1) as u16;
        match listing.entries().get(idx) {
            Some(entry) => {
                let style = if listing.selected() == Some(idx) {
                    RegionStyle::Selected
                } else {
                    RegionStyle::Normal
                };
                screen.draw_region(pane.x, y, pane.width, &entry.display(), style)?;
            }
            None => screen.draw_region(pane.x, y, pane.width, "", RegionStyle::Normal)?,
        }
    }
    Ok(())
}

/// Repaint only the rows that lost and gained the highlight. Both indices
/// must be inside the current scroll window; rows that are not are
/// skipped.
pub fn draw_selection_change<W: Write>(
    screen: &mut Screen<W>,
    geometry: &Geometry,
    listing: &DirectoryListing,
    old_index: usize,
    new_index: usize,
) -> io::Result<()> {
    let pane = geometry.files;
    let viewport = geometry.viewport_height();
    for idx in [old_index, new_index] {
        if idx < listing.offset() || idx >= listing.offset() + viewport {
            continue;
        }
        let Some(entry) = listing.entries().get(idx) else {
            continue;
        };
        let style = if listing.selected() == Some(idx) {
            RegionStyle::Selected
        } else {
            RegionStyle::Normal
        };
        let y = (idx - listing.offset() + 1) as u16;
        screen.draw_region(pane.x, y, pane.width, &entry.display(), style)?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout;
    use crate::core::listing::DirectoryListing;
    use crate::test_support::MemoryFs;
    use std::path::{Path, PathBuf};

    fn sample_listing(fs: &MemoryFs) -> DirectoryListing {
        let mut listing = DirectoryListing::new(PathBuf::from("/depot"));
        listing.load(fs, Path::new("/depot"));
        listing
    }

    fn render_full(listing: &DirectoryListing, keymap: &Keymap, log: &LogBuffer) -> String {
        let geometry = layout::compute(100, 24);
        let mut screen = Screen::new(Vec::new(), 100, 24);
        full(&mut screen, &geometry, keymap, log, listing).unwrap();
        String::from_utf8_lossy(&screen.into_inner()).into_owned()
    }

    #[test]
    fn test_full_render_paints_all_panes() {
        let fs = MemoryFs::new();
        fs.add_dir("/depot/src");
        fs.add_file("/depot/notes.txt", "hello");
        let listing = sample_listing(&fs);
        let keymap = Keymap::from_pairs([("Exit", "Ctrl+E")]);
        let mut log = LogBuffer::new();
        log.push("session started");

        let output = render_full(&listing, &keymap, &log);
        assert!(output.contains(BANNER));
        assert!(output.contains("Hotkeys:"));
        assert!(output.contains("  CTRL+E : Exit"));
        assert!(output.contains(SEPARATOR));
        assert!(output.contains("session started"));
        assert!(output.contains("Dir: depot"));
        assert!(output.contains("[DIR]  src"));
        assert!(output.contains("[FILE] notes.txt"));
        assert!(output.contains(DIVIDER));
    }

    #[test]
    fn test_empty_keymap_renders_placeholder() {
        let fs = MemoryFs::new();
        let listing = sample_listing(&fs);
        let keymap = Keymap::from_pairs(Vec::<(&str, &str)>::new());
        let log = LogBuffer::new();

        let output = render_full(&listing, &keymap, &log);
        assert!(output.contains("(No hotkeys configured.)"));
    }

    #[test]
    fn test_note_rows_render_verbatim() {
        let fs = MemoryFs::new();
        let mut listing = DirectoryListing::new(PathBuf::from("/gone"));
        listing.load(&fs, Path::new("/gone"));
        let keymap = Keymap::from_pairs(Vec::<(&str, &str)>::new());
        let log = LogBuffer::new();

        let output = render_full(&listing, &keymap, &log);
        assert!(output.contains("Cannot list:"));
    }

    #[test]
    fn test_selection_change_repaints_both_rows() {
        let fs = MemoryFs::new();
        fs.add_file("/depot/a.txt", "");
        fs.add_file("/depot/b.txt", "");
        let mut listing = sample_listing(&fs);
        listing.move_selection(1);
        listing.reconcile(22);

        let geometry = layout::compute(100, 24);
        let mut screen = Screen::new(Vec::new(), 100, 24);
        draw_selection_change(&mut screen, &geometry, &listing, 0, 1).unwrap();
        let output = String::from_utf8_lossy(&screen.into_inner()).into_owned();
        assert!(output.contains("[FILE] a.txt"));
        assert!(output.contains("[FILE] b.txt"));
    }

    #[test]
    fn test_selection_change_skips_rows_outside_window() {
        let fs = MemoryFs::new();
        for i in 0..30 {
            fs.add_file(&format!("/depot/f{i:02}.txt"), "");
        }
        let geometry = layout::compute(100, 24);
        let mut listing = sample_listing(&fs);
        listing.jump_end();
        listing.reconcile(geometry.viewport_height());

        let mut screen = Screen::new(Vec::new(), 100, 24);
        // row 0 scrolled out long ago
        draw_selection_change(&mut screen, &geometry, &listing, 0, 29).unwrap();
        let output = String::from_utf8_lossy(&screen.into_inner()).into_owned();
        assert!(!output.contains("[FILE] f00.txt"));
        assert!(output.contains("[FILE] f29.txt"));
    }
}
