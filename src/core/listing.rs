//! # Directory Listing Model
//!
//! Selection and scroll state for the file pane. The model owns the
//! viewport arithmetic; it knows nothing about how rows reach the screen.
//!
//! Two invariants hold after every operation:
//!
//! - `selected` is `None` exactly when there are no entries, otherwise it
//!   indexes a real entry.
//! - once [`DirectoryListing::reconcile`] has run, the selection lies
//!   inside the scroll window and the offset never exceeds
//!   `len - viewport` (clamped at zero).
//!
//! Scroll correction is minimal: the offset moves only as far as needed to
//! bring the selection back into view. It never re-centers.

use std::path::{Path, PathBuf};

use crate::fs::{FileService, base_name};

/// One row of the file pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Dir(PathBuf),
    File(PathBuf),
    /// Diagnostic row standing in for real entries, e.g. when enumeration
    /// failed. Not activatable.
    Note(String),
}

impl ListEntry {
    /// Text shown in the file pane for this entry.
    pub fn display(&self) -> String {
        match self {
            ListEntry::Dir(path) => format!("[DIR]  {}", base_name(path)),
            ListEntry::File(path) => format!("[FILE] {}", base_name(path)),
            ListEntry::Note(text) => text.clone(),
        }
    }

    /// The backing path, when the entry refers to one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ListEntry::Dir(path) | ListEntry::File(path) => Some(path),
            ListEntry::Note(_) => None,
        }
    }
}

/// The file pane's backing state: directory, entries, cursor, scroll.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    dir: PathBuf,
    entries: Vec<ListEntry>,
    selected: Option<usize>,
    offset: usize,
}

impl DirectoryListing {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            entries: Vec::new(),
            selected: None,
            offset: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry under the cursor, if any.
    pub fn selected_entry(&self) -> Option<&ListEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    /// Rebuild the listing from `dir`. Enumeration failure produces a
    /// single diagnostic row instead of propagating. Selection and scroll
    /// reset to the top either way.
    pub fn load(&mut self, fs: &dyn FileService, dir: &Path) {
        self.entries = match fs.list_entries(dir) {
            Ok(found) => found
                .into_iter()
                .map(|e| {
                    if e.is_dir {
                        ListEntry::Dir(e.path)
                    } else {
                        ListEntry::File(e.path)
                    }
                })
                .collect(),
            Err(err) => vec![ListEntry::Note(format!("Cannot list: {err}"))],
        };
        self.dir = dir.to_path_buf();
        self.selected = if self.entries.is_empty() { None } else { Some(0) };
        self.offset = 0;
    }

    /// Re-enumerate the current directory.
    pub fn reload(&mut self, fs: &dyn FileService) {
        let dir = self.dir.clone();
        self.load(fs, &dir);
    }

    /// Move the cursor by `delta`, clamped at both ends. No-op on an empty
    /// listing; already idempotent at the boundaries.
    pub fn move_selection(&mut self, delta: isize) {
        if let Some(sel) = self.selected {
            let last = (self.entries.len() - 1) as isize;
            let next = (sel as isize + delta).clamp(0, last);
            self.selected = Some(next as usize);
        }
    }

    pub fn jump_home(&mut self) {
        if self.selected.is_some() {
            self.selected = Some(0);
        }
    }

    pub fn jump_end(&mut self) {
        if !self.entries.is_empty() {
            self.selected = Some(self.entries.len() - 1);
        }
    }

    /// Page step is one row short of the viewport so one row of context
    /// stays visible across the jump.
    pub fn page_up(&mut self, viewport: usize) {
        self.move_selection(-(viewport.saturating_sub(1) as isize));
    }

    pub fn page_down(&mut self, viewport: usize) {
        self.move_selection(viewport.saturating_sub(1) as isize);
    }

    /// Pull the scroll offset the minimum distance that puts the selection
    /// back inside the viewport, then clamp the offset to the scrollable
    /// range. Call after any mutation that may move the selection or
    /// change the viewport, before rendering.
    pub fn reconcile(&mut self, viewport: usize) {
        if viewport == 0 {
            return;
        }
        let Some(sel) = self.selected else {
            self.offset = 0;
            return;
        };
        if sel < self.offset {
            self.offset = sel;
        }
        if sel >= self.offset + viewport {
            self.offset = sel + 1 - viewport;
        }
        let max_offset = self.entries.len().saturating_sub(viewport);
        self.offset = self.offset.min(max_offset);
    }
}
