//! # Session Loop
//!
//! The single blocking loop behind the whole UI:
//!
//! ```text
//!   next_event ──► resize? ──► recompute layout, full render
//!              └─► key? ─┬─► navigation (plain presses) ─► row/pane redraw
//!                        └─► canonical encode ─► keymap lookup
//!                                 │                  │
//!                            unknown: log      action handler
//!                                              (prompts, fs calls,
//!                                               log lines, reload)
//! ```
//!
//! Action handlers never abort the session: every failure is converted to
//! a log line here and the loop keeps reading keys. The current directory
//! is carried in the listing; the process working directory is never
//! changed, so relative input is resolved against the pane the user sees.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{info, warn};

use crate::clipboard;
use crate::core::config::ResolvedConfig;
use crate::core::keymap::{Action, Keymap};
use crate::core::keys::{self, Key, KeyPress};
use crate::core::layout::{self, Geometry};
use crate::core::listing::{DirectoryListing, ListEntry};
use crate::editor;
use crate::fs::{FileService, FsError, base_name, expand_tilde};
use crate::tui::event::{self, InputEvent};
use crate::tui::logbuf::LogBuffer;
use crate::tui::prompt;
use crate::tui::render;
use crate::tui::screen::Screen;

// ============================================================================
// Error Type
// ============================================================================

/// Failure of one user action. Caught at the dispatch boundary and turned
/// into a log line; never propagates out of the session.
#[derive(Debug)]
pub enum ActionError {
    Fs { op: &'static str, source: FsError },
    Launch { op: &'static str, source: io::Error },
    Clipboard { source: arboard::Error },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Fs { op, source } => write!(f, "{op} failed: {source}"),
            ActionError::Launch { op, source } => write!(f, "{op} failed: {source}"),
            ActionError::Clipboard { source } => write!(f, "Copy failed: {source}"),
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActionError::Fs { source, .. } => Some(source),
            ActionError::Launch { source, .. } => Some(source),
            ActionError::Clipboard { source } => Some(source),
        }
    }
}

fn fs_fail(op: &'static str) -> impl FnOnce(FsError) -> ActionError {
    move |source| ActionError::Fs { op, source }
}

// ============================================================================
// Session
// ============================================================================

pub struct Session<'a, W: Write> {
    screen: Screen<W>,
    geometry: Geometry,
    keymap: Keymap,
    log: LogBuffer,
    listing: DirectoryListing,
    fs: &'a dyn FileService,
    config: &'a ResolvedConfig,
    bookmarks: Vec<String>,
    bookmark_cursor: usize,
    previous_dir: Option<PathBuf>,
    running: bool,
}

impl<'a, W: Write> Session<'a, W> {
    pub fn new(
        screen: Screen<W>,
        fs: &'a dyn FileService,
        config: &'a ResolvedConfig,
        start_dir: PathBuf,
    ) -> Self {
        let keymap =
            Keymap::from_pairs(config.hotkeys.iter().map(|(a, k)| (a.as_str(), k.as_str())));
        let mut listing = DirectoryListing::new(start_dir.clone());
        listing.load(fs, &start_dir);
        let (width, height) = screen.size();
        Self {
            screen,
            geometry: layout::compute(width, height),
            keymap,
            log: LogBuffer::new(),
            listing,
            fs,
            config,
            bookmarks: config.bookmarks.clone(),
            bookmark_cursor: 0,
            previous_dir: None,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    pub fn listing(&self) -> &DirectoryListing {
        &self.listing
    }

    /// Drive the session until an Exit action. Blocks on terminal input.
    pub fn run(&mut self) -> io::Result<()> {
        info!("Session started in {}", self.listing.dir().display());
        self.full_render()?;
        while self.running {
            match event::next_event()? {
                InputEvent::Resize(width, height) => {
                    self.screen.set_size(width, height);
                    self.full_render()?;
                }
                InputEvent::Key(press) => self.handle_press(&press)?,
            }
        }
        info!("Session ended");
        Ok(())
    }

    /// Route one key press: navigation first, then hotkey dispatch.
    pub fn handle_press(&mut self, press: &KeyPress) -> io::Result<()> {
        if self.handle_nav(press)? {
            return Ok(());
        }
        let canonical = keys::encode(press);
        if canonical == "CTRL+S" || canonical == "CTRL+Q" {
            self.push_log(&format!(
                "Note: {canonical} may be intercepted by the terminal. Use another key or run: stty -ixon"
            ))?;
        }
        match self.keymap.lookup(&canonical) {
            Some(action) => {
                info!("Dispatching {} for {canonical}", action.name());
                self.perform(action)
            }
            None => self.push_log(&format!("Unknown hotkey: {canonical}")),
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Handle browse keys. Only plain presses navigate; a modified arrow
    /// or letter falls through to hotkey dispatch. Returns true when the
    /// press was consumed.
    pub fn handle_nav(&mut self, press: &KeyPress) -> io::Result<bool> {
        if !press.mods.is_empty() {
            return Ok(false);
        }
        let viewport = self.geometry.viewport_height();
        let old_selected = self.listing.selected();
        let old_offset = self.listing.offset();

        match press.key {
            Key::Up | Key::Char('k') => self.listing.move_selection(-1),
            Key::Down | Key::Char('j') => self.listing.move_selection(1),
            Key::PageUp => self.listing.page_up(viewport),
            Key::PageDown => self.listing.page_down(viewport),
            Key::Home => self.listing.jump_home(),
            Key::End => self.listing.jump_end(),
            Key::Enter => {
                self.activate_selection()?;
                return Ok(true);
            }
            _ => return Ok(false),
        }

        self.listing.reconcile(viewport);
        if self.listing.offset() != old_offset {
            // window moved, repaint the whole pane
            render::draw_file_pane(&mut self.screen, &self.geometry, &self.listing)?;
            self.screen.flush()?;
        } else if self.listing.selected() != old_selected {
            if let (Some(old), Some(new)) = (old_selected, self.listing.selected()) {
                render::draw_selection_change(
                    &mut self.screen,
                    &self.geometry,
                    &self.listing,
                    old,
                    new,
                )?;
                self.screen.flush()?;
            }
        }
        Ok(true)
    }

    /// Enter on the selected row: directories are entered, files open in
    /// the editor, diagnostic rows do nothing.
    fn activate_selection(&mut self) -> io::Result<()> {
        let Some(entry) = self.listing.selected_entry().cloned() else {
            return Ok(());
        };
        match entry {
            ListEntry::Dir(path) => {
                if !self.fs.is_directory(&path) {
                    // stale row; reload will surface the truth
                    return Ok(());
                }
                self.previous_dir = Some(self.listing.dir().to_path_buf());
                self.listing.load(self.fs, &path);
                self.push_log(&format!("Changed directory to: {}", path.display()))
            }
            ListEntry::File(path) => match self.run_editor(&path)? {
                Ok(()) => self.push_log(&format!("Opened: {}", path.display())),
                Err(e) => self.fail(ActionError::Launch {
                    op: "Open",
                    source: e,
                }),
            },
            ListEntry::Note(_) => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Hotkey dispatch
    // ------------------------------------------------------------------

    fn perform(&mut self, action: Action) -> io::Result<()> {
        match action {
            Action::CreateFile => {
                let raw = self.prompt("Enter file path to create:")?;
                if raw.is_empty() {
                    return self.push_log("Path cannot be empty.");
                }
                self.create_file(&raw)
            }
            Action::ReadFile => {
                let raw = self.prompt("Enter file path to read:")?;
                if raw.is_empty() {
                    return self.push_log("Path cannot be empty.");
                }
                self.read_file(&raw)
            }
            Action::AppendFile => {
                let raw = self.prompt("Enter file path to append to:")?;
                if raw.is_empty() {
                    return self.push_log("Path cannot be empty.");
                }
                self.push_log(
                    "Enter text to append. Finish with a single line containing only '::end'",
                )?;
                let mut lines = Vec::new();
                loop {
                    let line = self.prompt("")?;
                    if line == "::end" {
                        break;
                    }
                    lines.push(line);
                }
                let mut text = lines.join("\n");
                text.push('\n');
                self.append_file(&raw, &text)
            }
            Action::DeleteFile => {
                let raw = self.prompt("Enter file path to delete:")?;
                if raw.is_empty() {
                    return self.push_log("Path cannot be empty.");
                }
                let shown = self.resolve_input(&raw);
                let answer = self.prompt(&format!(
                    "Are you sure you want to delete {}? (y/N):",
                    shown.display()
                ))?;
                self.delete_file(&raw, answer.eq_ignore_ascii_case("y"))
            }
            Action::ListFiles => {
                let raw = self.prompt("Enter directory path (leave empty for current):")?;
                self.list_files(&raw)
            }
            Action::SearchFiles => {
                let raw = self.prompt("Enter file path to search:")?;
                if raw.is_empty() {
                    return self.push_log("Path cannot be empty.");
                }
                let term = self.prompt("Enter search text:")?;
                self.search_file(&raw, &term)
            }
            Action::OpenInEditor => {
                let raw = self.prompt("Enter file path to open in editor:")?;
                if raw.is_empty() {
                    return self.push_log("Path cannot be empty.");
                }
                self.open_in_editor(&raw)
            }
            Action::ChangeDirectory => {
                let raw = self.prompt("cd to (.., ~/Documents, absolute or relative):")?;
                if raw.is_empty() {
                    return Ok(());
                }
                self.change_directory(&raw)
            }
            Action::GoBackDirectory => self.go_back(),
            Action::JumpToDefault => self.jump_to_default(),
            Action::AddBookmark => {
                let raw = self.prompt("Enter directory to bookmark:")?;
                self.add_bookmark(&raw)
            }
            Action::CycleBookmarks => self.cycle_bookmarks(),
            Action::MoveFile => {
                let from = self.prompt("Enter source path to move:")?;
                if from.is_empty() {
                    return self.push_log("Path cannot be empty.");
                }
                let to = self.prompt("Enter destination path:")?;
                if to.is_empty() {
                    return self.push_log("Path cannot be empty.");
                }
                self.move_file(&from, &to)
            }
            Action::CopyFile => {
                let from = self.prompt("Enter source path to copy:")?;
                if from.is_empty() {
                    return self.push_log("Path cannot be empty.");
                }
                let to = self.prompt("Enter destination path:")?;
                if to.is_empty() {
                    return self.push_log("Path cannot be empty.");
                }
                self.copy_file(&from, &to)
            }
            Action::FileInfo => {
                let raw = self.prompt("Enter file path (leave empty for selected):")?;
                self.file_info(&raw)
            }
            Action::CopyFilePath => {
                let raw = self.prompt("Enter file path to copy:")?;
                if raw.is_empty() {
                    return self.push_log("Empty.");
                }
                self.copy_file_path(&raw)
            }
            Action::CreateFromTemplate => {
                let name = self.prompt("Enter template name:")?;
                if name.is_empty() {
                    return self.push_log("Name cannot be empty.");
                }
                let dest = self.prompt("Enter file path to create:")?;
                if dest.is_empty() {
                    return self.push_log("Path cannot be empty.");
                }
                self.create_from_template(&name, &dest)
            }
            Action::AppendSnippet => {
                let name = self.prompt("Enter snippet name:")?;
                if name.is_empty() {
                    return self.push_log("Name cannot be empty.");
                }
                let raw = self.prompt("Enter file path to append to:")?;
                if raw.is_empty() {
                    return self.push_log("Path cannot be empty.");
                }
                self.append_snippet(&name, &raw)
            }
            Action::Exit => self.request_exit(),
        }
    }

    // ------------------------------------------------------------------
    // Action handlers
    // ------------------------------------------------------------------

    pub fn create_file(&mut self, raw: &str) -> io::Result<()> {
        let path = self.resolve_input(raw);
        if self.fs.exists(&path) {
            self.push_log("File already exists.")?;
        } else {
            match self.fs.create_file(&path).map_err(fs_fail("Create")) {
                Ok(()) => self.push_log(&format!("File created: {}", path.display()))?,
                Err(e) => self.fail(e)?,
            }
        }
        self.reload_listing()
    }

    pub fn read_file(&mut self, raw: &str) -> io::Result<()> {
        let path = self.resolve_input(raw);
        match self.fs.read_text(&path).map_err(fs_fail("Read")) {
            Ok(contents) => {
                self.push_log("--- File contents start ---")?;
                self.push_log(&contents)?;
                self.push_log("--- File contents end ---")
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn append_file(&mut self, raw: &str, text: &str) -> io::Result<()> {
        let path = self.resolve_input(raw);
        match self.fs.append_text(&path, text).map_err(fs_fail("Append")) {
            Ok(()) => self.push_log("Append complete.")?,
            Err(e) => self.fail(e)?,
        }
        self.reload_listing()
    }

    pub fn delete_file(&mut self, raw: &str, confirmed: bool) -> io::Result<()> {
        if confirmed {
            let path = self.resolve_input(raw);
            match self.fs.delete(&path).map_err(fs_fail("Delete")) {
                Ok(()) => self.push_log("File deleted (if existed).")?,
                Err(e) => self.fail(e)?,
            }
        } else {
            self.push_log("Delete cancelled.")?;
        }
        self.reload_listing()
    }

    /// Empty input lists the current directory. Directories are skipped;
    /// only plain files are printed, full paths as enumerated.
    pub fn list_files(&mut self, raw: &str) -> io::Result<()> {
        let dir = if raw.is_empty() {
            self.listing.dir().to_path_buf()
        } else {
            self.resolve_input(raw)
        };
        match self.fs.list_entries(&dir).map_err(fs_fail("List")) {
            Ok(entries) => {
                self.push_log(&format!("Files in {}:", dir.display()))?;
                for entry in entries.iter().filter(|e| !e.is_dir) {
                    self.push_log(&entry.path.display().to_string())?;
                }
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn search_file(&mut self, raw: &str, term: &str) -> io::Result<()> {
        let path = self.resolve_input(raw);
        match self.fs.search(&path, term).map_err(fs_fail("Search")) {
            Ok(hits) => {
                self.push_log(&format!("Found {} matching lines:", hits.len()))?;
                for (line_no, line) in hits {
                    self.push_log(&format!("{line_no}: {line}"))?;
                }
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn open_in_editor(&mut self, raw: &str) -> io::Result<()> {
        let path = self.resolve_input(raw);
        match self.run_editor(&path)? {
            Ok(()) => self.push_log(&format!("Opened in editor: {}", path.display())),
            Err(e) => self.fail(ActionError::Launch {
                op: "Open editor",
                source: e,
            }),
        }
    }

    pub fn change_directory(&mut self, raw: &str) -> io::Result<()> {
        let target = self.resolve_input(raw);
        if self.fs.is_directory(&target) {
            let target = std::fs::canonicalize(&target).unwrap_or(target);
            self.previous_dir = Some(self.listing.dir().to_path_buf());
            self.listing.load(self.fs, &target);
            self.push_log(&format!("Directory changed to: {}", target.display()))
        } else {
            self.push_log(&format!("Directory does not exist: {}", target.display()))
        }
    }

    /// Swap with the previous directory so repeated presses toggle back
    /// and forth.
    pub fn go_back(&mut self) -> io::Result<()> {
        match self.previous_dir.take() {
            Some(prev) if self.fs.is_directory(&prev) => {
                self.previous_dir = Some(self.listing.dir().to_path_buf());
                self.listing.load(self.fs, &prev);
                self.push_log(&format!("Returned to: {}", prev.display()))
            }
            other => {
                self.previous_dir = other;
                self.push_log("No previous directory to return to.")
            }
        }
    }

    pub fn jump_to_default(&mut self) -> io::Result<()> {
        let configured = self.config.default_directory.clone();
        let target = self.resolve_input(&configured);
        if self.fs.is_directory(&target) {
            let target = std::fs::canonicalize(&target).unwrap_or(target);
            self.previous_dir = Some(self.listing.dir().to_path_buf());
            self.listing.load(self.fs, &target);
            self.push_log(&format!("Changed directory: {}", target.display()))
        } else {
            self.push_log(&format!("Directory not found: {}", target.display()))
        }
    }

    /// Empty input bookmarks the current directory.
    pub fn add_bookmark(&mut self, raw: &str) -> io::Result<()> {
        let path = if raw.is_empty() {
            self.listing.dir().to_path_buf()
        } else {
            self.resolve_input(raw)
        };
        let display = path.display().to_string();
        if self.bookmarks.contains(&display) {
            self.push_log("Bookmark exists.")
        } else {
            self.bookmarks.push(display.clone());
            self.push_log(&format!("Bookmark added: {display}"))
        }
    }

    pub fn cycle_bookmarks(&mut self) -> io::Result<()> {
        if self.bookmarks.is_empty() {
            return self.push_log("No bookmarks.");
        }
        self.bookmark_cursor = (self.bookmark_cursor + 1) % self.bookmarks.len();
        let stored = self.bookmarks[self.bookmark_cursor].clone();
        let target = expand_tilde(&stored);
        self.previous_dir = Some(self.listing.dir().to_path_buf());
        self.listing.load(self.fs, &target);
        self.push_log(&format!("Jumped to: {stored}"))
    }

    pub fn move_file(&mut self, from_raw: &str, to_raw: &str) -> io::Result<()> {
        let from = self.resolve_input(from_raw);
        let to = self.resolve_input(to_raw);
        match self.fs.rename(&from, &to).map_err(fs_fail("Move")) {
            Ok(()) => self.push_log(&format!("File moved: {}", to.display()))?,
            Err(e) => self.fail(e)?,
        }
        self.reload_listing()
    }

    pub fn copy_file(&mut self, from_raw: &str, to_raw: &str) -> io::Result<()> {
        let from = self.resolve_input(from_raw);
        let to = self.resolve_input(to_raw);
        match self.fs.copy(&from, &to).map_err(fs_fail("Copy")) {
            Ok(()) => self.push_log(&format!("File copied: {}", to.display()))?,
            Err(e) => self.fail(e)?,
        }
        self.reload_listing()
    }

    /// Empty input falls back to the entry selected in the file pane.
    pub fn file_info(&mut self, raw: &str) -> io::Result<()> {
        let target = if !raw.trim().is_empty() {
            self.resolve_input(raw)
        } else if let Some(path) = self.listing.selected_entry().and_then(ListEntry::path) {
            let path = path.to_path_buf();
            self.push_log(&format!("Inspecting selected: {}", base_name(&path)))?;
            path
        } else {
            return self.push_log("Nothing selected and no path provided.");
        };

        match self.fs.stat(&target).map_err(fs_fail("Info")) {
            Ok(stat) => {
                self.push_log(&format!("--- Info: {} ---", base_name(&target)))?;
                if stat.is_dir {
                    self.push_log("Type: Directory")?;
                    self.push_log(&format!("Modified: {}", format_time(stat.modified)))
                } else {
                    self.push_log("Type: File")?;
                    self.push_log(&format!("Size: {} bytes", stat.size))?;
                    self.push_log(&format!("Modified: {}", format_time(stat.modified)))?;
                    let ext = target
                        .extension()
                        .map(|e| format!(".{}", e.to_string_lossy()))
                        .unwrap_or_default();
                    self.push_log(&format!("Extension: {ext}"))
                }
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn copy_file_path(&mut self, raw: &str) -> io::Result<()> {
        let path = self.resolve_input(raw);
        let text = path.display().to_string();
        match clipboard::copy_text(&text) {
            Ok(()) => self.push_log("Copied to clipboard."),
            Err(source) => self.fail(ActionError::Clipboard { source }),
        }
    }

    pub fn create_from_template(&mut self, name: &str, dest_raw: &str) -> io::Result<()> {
        let Some(body) = self.config.templates.get(name).cloned() else {
            return self.push_log(&format!("No template named: {name}"));
        };
        let dest = self.resolve_input(dest_raw);
        if self.fs.exists(&dest) {
            return self.push_log("File already exists.");
        }
        match self.fs.append_text(&dest, &body).map_err(fs_fail("Create")) {
            Ok(()) => self.push_log(&format!("Created from template: {}", dest.display()))?,
            Err(e) => self.fail(e)?,
        }
        self.reload_listing()
    }

    pub fn append_snippet(&mut self, name: &str, raw: &str) -> io::Result<()> {
        let Some(body) = self.config.snippets.get(name).cloned() else {
            return self.push_log(&format!("No snippet named: {name}"));
        };
        let path = self.resolve_input(raw);
        match self.fs.append_text(&path, &body).map_err(fs_fail("Append")) {
            Ok(()) => self.push_log(&format!("Snippet appended: {}", path.display()))?,
            Err(e) => self.fail(e)?,
        }
        self.reload_listing()
    }

    pub fn request_exit(&mut self) -> io::Result<()> {
        info!("Exit requested");
        self.running = false;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Shared plumbing
    // ------------------------------------------------------------------

    /// Expand `~` and root relative input against the displayed directory.
    fn resolve_input(&self, raw: &str) -> PathBuf {
        let expanded = expand_tilde(raw);
        if expanded.is_absolute() {
            expanded
        } else {
            self.listing.dir().join(expanded)
        }
    }

    /// Append to the transcript and repaint. Rendering after every line
    /// keeps the log pane current without any dirty tracking.
    fn push_log(&mut self, text: &str) -> io::Result<()> {
        self.log.push(text);
        self.full_render()
    }

    fn fail(&mut self, err: ActionError) -> io::Result<()> {
        warn!("{err}");
        self.push_log(&err.to_string())
    }

    fn prompt(&mut self, text: &str) -> io::Result<String> {
        let reply = prompt::run_prompt(&mut self.screen, &mut self.geometry, text)?;
        self.log.push(&reply.exchange);
        self.full_render()?;
        Ok(reply.input)
    }

    fn reload_listing(&mut self) -> io::Result<()> {
        self.listing.reload(self.fs);
        self.full_render()
    }

    /// Clear and repaint everything from the live size.
    fn full_render(&mut self) -> io::Result<()> {
        let (width, height) = self.screen.size();
        self.geometry = layout::compute(width, height);
        self.listing.reconcile(self.geometry.viewport_height());
        render::full(
            &mut self.screen,
            &self.geometry,
            &self.keymap,
            &self.log,
            &self.listing,
        )?;
        self.screen.flush()
    }

    /// Drop out of the UI, run the editor, restore the UI. The outer
    /// result is terminal plumbing; the inner one is the editor's.
    fn run_editor(&mut self, path: &Path) -> io::Result<io::Result<()>> {
        super::suspend()?;
        let launched = editor::launch(&self.config.editor, path);
        super::resume()?;
        self.full_render()?;
        Ok(launched)
    }
}

fn format_time(time: Option<SystemTime>) -> String {
    match time {
        Some(t) => chrono::DateTime::<chrono::Local>::from(t)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "unknown".to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryFs;
    use std::collections::BTreeMap;

    fn test_config() -> ResolvedConfig {
        let mut hotkeys = BTreeMap::new();
        hotkeys.insert("Exit".to_string(), "Ctrl+E".to_string());
        hotkeys.insert("GoBackDirectory".to_string(), "Ctrl+B".to_string());
        hotkeys.insert("JumpToDefault".to_string(), "Ctrl+U".to_string());
        hotkeys.insert("CycleBookmarks".to_string(), "Ctrl+P".to_string());
        let mut templates = BTreeMap::new();
        templates.insert("note".to_string(), "# Notes\n".to_string());
        let mut snippets = BTreeMap::new();
        snippets.insert("sig".to_string(), "-- sig\n".to_string());
        ResolvedConfig {
            hotkeys,
            default_directory: "/depot/home".to_string(),
            editor: "true".to_string(),
            bookmarks: Vec::new(),
            templates,
            snippets,
        }
    }

    fn seed_fs() -> MemoryFs {
        let fs = MemoryFs::new();
        fs.add_dir("/depot");
        fs.add_dir("/depot/home");
        fs.add_dir("/depot/sub");
        fs.add_file("/depot/alpha.txt", "one\ntwo Alpha\nthree");
        fs.add_file("/depot/beta.txt", "beta body");
        fs
    }

    fn session<'a>(fs: &'a MemoryFs, config: &'a ResolvedConfig) -> Session<'a, Vec<u8>> {
        let screen = Screen::new(Vec::new(), 80, 24);
        Session::new(screen, fs, config, PathBuf::from("/depot"))
    }

    fn log_contains(session: &Session<'_, Vec<u8>>, needle: &str) -> bool {
        session.log().iter().any(|line| line.contains(needle))
    }

    #[test]
    fn test_exit_binding_stops_session() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        assert!(s.is_running());
        s.handle_press(&KeyPress::ctrl(Key::Char('e'))).unwrap();
        assert!(!s.is_running());
    }

    #[test]
    fn test_unknown_hotkey_logs_and_keeps_running() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.handle_press(&KeyPress::ctrl(Key::Char('x'))).unwrap();
        assert!(log_contains(&s, "Unknown hotkey: CTRL+X"));
        assert!(s.is_running());
    }

    #[test]
    fn test_ctrl_s_warns_about_flow_control() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.handle_press(&KeyPress::ctrl(Key::Char('s'))).unwrap();
        assert!(log_contains(
            &s,
            "Note: CTRL+S may be intercepted by the terminal"
        ));
        // unbound, so dispatch still reports it
        assert!(log_contains(&s, "Unknown hotkey: CTRL+S"));
    }

    #[test]
    fn test_plain_keys_navigate_modified_keys_dispatch() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        // plain j moves the selection
        s.handle_press(&KeyPress::plain(Key::Char('j'))).unwrap();
        assert_eq!(s.listing().selected(), Some(1));
        // ctrl+j is not navigation, it reaches dispatch
        s.handle_press(&KeyPress::ctrl(Key::Char('j'))).unwrap();
        assert_eq!(s.listing().selected(), Some(1));
        assert!(log_contains(&s, "Unknown hotkey: CTRL+J"));
    }

    #[test]
    fn test_nav_keys_on_empty_listing_are_consumed() {
        let fs = MemoryFs::new();
        fs.add_dir("/depot");
        let config = test_config();
        let mut s = session(&fs, &config);
        for key in [Key::Up, Key::Down, Key::PageDown, Key::Home, Key::End, Key::Enter] {
            s.handle_press(&KeyPress::plain(key)).unwrap();
        }
        assert_eq!(s.listing().selected(), None);
        // nothing was reported as an unknown hotkey
        assert!(!log_contains(&s, "Unknown hotkey"));
    }

    #[test]
    fn test_enter_on_directory_descends_and_back_returns() {
        let fs = seed_fs();
        fs.add_file("/depot/home/readme.md", "hi");
        let config = test_config();
        let mut s = session(&fs, &config);
        // dirs sort first: home, sub, then files
        s.handle_press(&KeyPress::plain(Key::Enter)).unwrap();
        assert_eq!(s.listing().dir(), Path::new("/depot/home"));
        assert!(log_contains(&s, "Changed directory to: /depot/home"));

        s.handle_press(&KeyPress::ctrl(Key::Char('b'))).unwrap();
        assert_eq!(s.listing().dir(), Path::new("/depot"));
        assert!(log_contains(&s, "Returned to: /depot"));

        // back again toggles forward
        s.handle_press(&KeyPress::ctrl(Key::Char('b'))).unwrap();
        assert_eq!(s.listing().dir(), Path::new("/depot/home"));
    }

    #[test]
    fn test_go_back_without_history() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.go_back().unwrap();
        assert!(log_contains(&s, "No previous directory to return to."));
        assert_eq!(s.listing().dir(), Path::new("/depot"));
    }

    #[test]
    fn test_create_file_and_duplicate() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.create_file("notes.txt").unwrap();
        assert!(log_contains(&s, "File created: /depot/notes.txt"));
        assert!(fs.contents(Path::new("/depot/notes.txt")).is_some());
        // listing picked the new file up
        assert!(s.listing().entries().iter().any(|e| {
            matches!(e, ListEntry::File(p) if p == Path::new("/depot/notes.txt"))
        }));

        s.create_file("notes.txt").unwrap();
        assert!(log_contains(&s, "File already exists."));
    }

    #[test]
    fn test_read_file_brackets_contents() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.read_file("beta.txt").unwrap();
        let lines: Vec<&str> = s.log().iter().collect();
        let start = lines
            .iter()
            .position(|l| *l == "--- File contents start ---")
            .unwrap();
        assert_eq!(lines[start + 1], "beta body");
        assert_eq!(lines[start + 2], "--- File contents end ---");
    }

    #[test]
    fn test_read_missing_file_reports_error() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.read_file("ghost.txt").unwrap();
        assert!(log_contains(&s, "Read failed:"));
        assert!(s.is_running());
    }

    #[test]
    fn test_append_creates_missing_file() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.append_file("fresh.txt", "line one\n").unwrap();
        assert!(log_contains(&s, "Append complete."));
        assert_eq!(
            fs.contents(Path::new("/depot/fresh.txt")).as_deref(),
            Some("line one\n")
        );
    }

    #[test]
    fn test_delete_confirmation_gate() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.delete_file("beta.txt", false).unwrap();
        assert!(log_contains(&s, "Delete cancelled."));
        assert!(fs.contents(Path::new("/depot/beta.txt")).is_some());

        s.delete_file("beta.txt", true).unwrap();
        assert!(log_contains(&s, "File deleted (if existed)."));
        assert!(fs.contents(Path::new("/depot/beta.txt")).is_none());
    }

    #[test]
    fn test_list_files_prints_files_only() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.list_files("").unwrap();
        assert!(log_contains(&s, "Files in /depot:"));
        assert!(log_contains(&s, "/depot/alpha.txt"));
        assert!(log_contains(&s, "/depot/beta.txt"));
        assert!(!log_contains(&s, "/depot/home"));
    }

    #[test]
    fn test_search_reports_numbered_hits() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.search_file("alpha.txt", "alpha").unwrap();
        assert!(log_contains(&s, "Found 1 matching lines:"));
        assert!(log_contains(&s, "2: two Alpha"));
    }

    #[test]
    fn test_change_directory_and_missing_target() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.change_directory("sub").unwrap();
        assert_eq!(s.listing().dir(), Path::new("/depot/sub"));
        assert!(log_contains(&s, "Directory changed to: /depot/sub"));

        s.change_directory("/depot/nope").unwrap();
        assert_eq!(s.listing().dir(), Path::new("/depot/sub"));
        assert!(log_contains(&s, "Directory does not exist: /depot/nope"));
    }

    #[test]
    fn test_jump_to_default_directory() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.handle_press(&KeyPress::ctrl(Key::Char('u'))).unwrap();
        assert_eq!(s.listing().dir(), Path::new("/depot/home"));
        assert!(log_contains(&s, "Changed directory: /depot/home"));
    }

    #[test]
    fn test_bookmarks_add_duplicate_and_cycle() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.add_bookmark("").unwrap();
        assert!(log_contains(&s, "Bookmark added: /depot"));
        s.add_bookmark("/depot").unwrap();
        assert!(log_contains(&s, "Bookmark exists."));

        s.add_bookmark("/depot/sub").unwrap();
        // cursor starts at 0, first cycle lands on the second bookmark
        s.handle_press(&KeyPress::ctrl(Key::Char('p'))).unwrap();
        assert_eq!(s.listing().dir(), Path::new("/depot/sub"));
        assert!(log_contains(&s, "Jumped to: /depot/sub"));
    }

    #[test]
    fn test_cycle_without_bookmarks() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.cycle_bookmarks().unwrap();
        assert!(log_contains(&s, "No bookmarks."));
    }

    #[test]
    fn test_move_file_leaves_no_source() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.move_file("beta.txt", "sub/beta.txt").unwrap();
        assert!(log_contains(&s, "File moved: /depot/sub/beta.txt"));
        assert!(fs.contents(Path::new("/depot/beta.txt")).is_none());
        assert_eq!(
            fs.contents(Path::new("/depot/sub/beta.txt")).as_deref(),
            Some("beta body")
        );
    }

    #[test]
    fn test_move_missing_source_fails() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.move_file("ghost.txt", "sub/ghost.txt").unwrap();
        assert!(log_contains(&s, "Move failed:"));
    }

    #[test]
    fn test_copy_file_keeps_source() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.copy_file("beta.txt", "beta-copy.txt").unwrap();
        assert!(log_contains(&s, "File copied: /depot/beta-copy.txt"));
        assert!(fs.contents(Path::new("/depot/beta.txt")).is_some());
        assert!(fs.contents(Path::new("/depot/beta-copy.txt")).is_some());
    }

    #[test]
    fn test_file_info_explicit_path() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.file_info("beta.txt").unwrap();
        assert!(log_contains(&s, "--- Info: beta.txt ---"));
        assert!(log_contains(&s, "Type: File"));
        assert!(log_contains(&s, "Size: 9 bytes"));
        assert!(log_contains(&s, "Extension: .txt"));
    }

    #[test]
    fn test_file_info_falls_back_to_selection() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        // selection starts on the first entry, directory "home"
        s.file_info("").unwrap();
        assert!(log_contains(&s, "Inspecting selected: home"));
        assert!(log_contains(&s, "Type: Directory"));
    }

    #[test]
    fn test_file_info_nothing_selected() {
        let fs = MemoryFs::new();
        fs.add_dir("/depot");
        let config = test_config();
        let mut s = session(&fs, &config);
        s.file_info("  ").unwrap();
        assert!(log_contains(&s, "Nothing selected and no path provided."));
    }

    #[test]
    fn test_create_from_template() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.create_from_template("note", "today.md").unwrap();
        assert!(log_contains(&s, "Created from template: /depot/today.md"));
        assert_eq!(
            fs.contents(Path::new("/depot/today.md")).as_deref(),
            Some("# Notes\n")
        );

        s.create_from_template("missing", "x.md").unwrap();
        assert!(log_contains(&s, "No template named: missing"));
    }

    #[test]
    fn test_append_snippet() {
        let fs = seed_fs();
        let config = test_config();
        let mut s = session(&fs, &config);
        s.append_snippet("sig", "beta.txt").unwrap();
        assert!(log_contains(&s, "Snippet appended: /depot/beta.txt"));
        assert_eq!(
            fs.contents(Path::new("/depot/beta.txt")).as_deref(),
            Some("beta body-- sig\n")
        );

        s.append_snippet("missing", "beta.txt").unwrap();
        assert!(log_contains(&s, "No snippet named: missing"));
    }

    #[test]
    fn test_scroll_offset_follows_selection() {
        let fs = MemoryFs::new();
        fs.add_dir("/depot");
        for i in 0..40 {
            fs.add_file(format!("/depot/f{i:02}.txt"), "");
        }
        let config = test_config();
        let mut s = session(&fs, &config);
        let viewport = layout::compute(80, 24).viewport_height();

        s.handle_press(&KeyPress::plain(Key::End)).unwrap();
        assert_eq!(s.listing().selected(), Some(39));
        assert_eq!(s.listing().offset(), 40 - viewport);

        // moving up within the window leaves the offset alone
        s.handle_press(&KeyPress::plain(Key::Up)).unwrap();
        assert_eq!(s.listing().offset(), 40 - viewport);

        s.handle_press(&KeyPress::plain(Key::Home)).unwrap();
        assert_eq!(s.listing().offset(), 0);
    }

    #[test]
    fn test_action_error_display() {
        let err = ActionError::Fs {
            op: "Read",
            source: FsError::NotFound(PathBuf::from("/depot/x")),
        };
        assert_eq!(err.to_string(), "Read failed: no such path: /depot/x");
    }
}
