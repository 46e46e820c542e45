//! # Filesystem Collaborator
//!
//! Everything the browser wants from a filesystem, behind one trait. The
//! session and listing code only see [`FileService`]; real disk I/O lives
//! in [`disk::DiskFileService`], and tests substitute an in-memory double.
//!
//! Operations carry no retry or recovery logic. Each either succeeds or
//! returns an [`FsError`] with a reason; the caller decides what a failure
//! means for the UI.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub mod disk;

pub use disk::DiskFileService;

/// One entry reported by directory enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Metadata snapshot for a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Why a filesystem operation failed.
#[derive(Debug)]
pub enum FsError {
    NotFound(PathBuf),
    NotADirectory(PathBuf),
    IsADirectory(PathBuf),
    Io(std::io::Error),
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::NotFound(p) => write!(f, "no such path: {}", p.display()),
            FsError::NotADirectory(p) => write!(f, "not a directory: {}", p.display()),
            FsError::IsADirectory(p) => write!(f, "is a directory: {}", p.display()),
            FsError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(e: std::io::Error) -> Self {
        FsError::Io(e)
    }
}

/// The filesystem operations the browser is built on.
pub trait FileService {
    /// Enumerate `dir`: directories first, then files, each group ordered
    /// case-insensitively by name.
    fn list_entries(&self, dir: &Path) -> Result<Vec<FsEntry>, FsError>;

    fn exists(&self, path: &Path) -> bool;

    fn is_directory(&self, path: &Path) -> bool;

    /// Create (or truncate) a file, creating missing parent directories.
    fn create_file(&self, path: &Path) -> Result<(), FsError>;

    fn read_text(&self, path: &Path) -> Result<String, FsError>;

    /// Append to a file, creating it if missing.
    fn append_text(&self, path: &Path, text: &str) -> Result<(), FsError>;

    /// Remove a file. Deleting a path that does not exist is not an error.
    fn delete(&self, path: &Path) -> Result<(), FsError>;

    /// Move a file, creating missing parent directories at the destination.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError>;

    /// Copy a file, creating missing parent directories at the destination.
    fn copy(&self, from: &Path, to: &Path) -> Result<(), FsError>;

    /// Case-insensitive substring search. Returns `(1-based line, text)`
    /// for every matching line.
    fn search(&self, path: &Path, term: &str) -> Result<Vec<(usize, String)>, FsError>;

    fn stat(&self, path: &Path) -> Result<FileStat, FsError>;
}

/// Final path component as display text; falls back to the whole path for
/// roots like `/`.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Expand a leading `~` or `~/` against the home directory. Anything else
/// passes through untouched (after trimming).
pub fn expand_tilde(input: &str) -> PathBuf {
    let trimmed = input.trim();
    if trimmed == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(trimmed)
}
