//! Disk-backed [`FileService`]: thin wrappers over `std::fs` plus the
//! existence and parent-directory guards the UI relies on.

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use super::{FileService, FileStat, FsEntry, FsError};

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFileService;

impl DiskFileService {
    pub fn new() -> Self {
        Self
    }
}

fn ensure_parent(path: &Path) -> Result<(), FsError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn lower_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

impl FileService for DiskFileService {
    fn list_entries(&self, dir: &Path) -> Result<Vec<FsEntry>, FsError> {
        if !dir.exists() {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }
        if !dir.is_dir() {
            return Err(FsError::NotADirectory(dir.to_path_buf()));
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let is_dir = entry.file_type()?.is_dir();
            entries.push(FsEntry {
                path: entry.path(),
                is_dir,
            });
        }
        entries.sort_by_key(|e| (!e.is_dir, lower_name(&e.path)));
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_file(&self, path: &Path) -> Result<(), FsError> {
        ensure_parent(path)?;
        fs::File::create(path)?;
        Ok(())
    }

    fn read_text(&self, path: &Path) -> Result<String, FsError> {
        if !path.exists() {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        if path.is_dir() {
            return Err(FsError::IsADirectory(path.to_path_buf()));
        }
        Ok(fs::read_to_string(path)?)
    }

    fn append_text(&self, path: &Path, text: &str) -> Result<(), FsError> {
        ensure_parent(path)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<(), FsError> {
        if !path.exists() {
            return Ok(());
        }
        if path.is_dir() {
            return Err(FsError::IsADirectory(path.to_path_buf()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        if !from.exists() {
            return Err(FsError::NotFound(from.to_path_buf()));
        }
        ensure_parent(to)?;
        fs::rename(from, to)?;
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        if !from.exists() {
            return Err(FsError::NotFound(from.to_path_buf()));
        }
        if from.is_dir() {
            return Err(FsError::IsADirectory(from.to_path_buf()));
        }
        ensure_parent(to)?;
        fs::copy(from, to)?;
        Ok(())
    }

    fn search(&self, path: &Path, term: &str) -> Result<Vec<(usize, String)>, FsError> {
        let contents = self.read_text(path)?;
        let needle = term.to_lowercase();
        Ok(contents
            .lines()
            .enumerate()
            .filter(|(_, line)| line.to_lowercase().contains(&needle))
            .map(|(i, line)| (i + 1, line.to_string()))
            .collect())
    }

    fn stat(&self, path: &Path) -> Result<FileStat, FsError> {
        if !path.exists() {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        let meta = fs::metadata(path)?;
        Ok(FileStat {
            is_dir: meta.is_dir(),
            size: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}
