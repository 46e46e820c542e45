//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use crate::fs::{FileService, FileStat, FsEntry, FsError};

/// An in-memory filesystem for tests that don't need real disk I/O.
///
/// Directories exist implicitly for every file's ancestors; empty
/// directories can be added explicitly with [`MemoryFs::add_dir`].
#[derive(Default)]
pub struct MemoryFs {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<Vec<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, contents: &str) {
        let path = path.into();
        for ancestor in path.ancestors().skip(1) {
            if !ancestor.as_os_str().is_empty() {
                self.add_dir(ancestor.to_path_buf());
            }
        }
        self.files.lock().unwrap().insert(path, contents.to_string());
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut dirs = self.dirs.lock().unwrap();
        if !dirs.contains(&path) {
            dirs.push(path);
        }
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(&path.to_path_buf())
    }
}

fn lower_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

impl FileService for MemoryFs {
    fn list_entries(&self, dir: &Path) -> Result<Vec<FsEntry>, FsError> {
        if !self.is_dir(dir) {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }
        let mut entries: Vec<FsEntry> = Vec::new();
        for sub in self.dirs.lock().unwrap().iter() {
            if sub.parent() == Some(dir) {
                entries.push(FsEntry {
                    path: sub.clone(),
                    is_dir: true,
                });
            }
        }
        for file in self.files.lock().unwrap().keys() {
            if file.parent() == Some(dir) {
                entries.push(FsEntry {
                    path: file.clone(),
                    is_dir: false,
                });
            }
        }
        entries.sort_by_key(|e| (!e.is_dir, lower_name(&e.path)));
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.is_dir(path)
    }

    fn create_file(&self, path: &Path) -> Result<(), FsError> {
        self.add_file(path.to_path_buf(), "");
        Ok(())
    }

    fn read_text(&self, path: &Path) -> Result<String, FsError> {
        if self.is_dir(path) {
            return Err(FsError::IsADirectory(path.to_path_buf()));
        }
        self.contents(path)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn append_text(&self, path: &Path, text: &str) -> Result<(), FsError> {
        let mut files = self.files.lock().unwrap();
        files.entry(path.to_path_buf()).or_default().push_str(text);
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<(), FsError> {
        if self.is_dir(path) {
            return Err(FsError::IsADirectory(path.to_path_buf()));
        }
        self.files.lock().unwrap().remove(path);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let mut files = self.files.lock().unwrap();
        let Some(contents) = files.remove(from) else {
            return Err(FsError::NotFound(from.to_path_buf()));
        };
        files.insert(to.to_path_buf(), contents);
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let mut files = self.files.lock().unwrap();
        let Some(contents) = files.get(from).cloned() else {
            return Err(FsError::NotFound(from.to_path_buf()));
        };
        files.insert(to.to_path_buf(), contents);
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
        if self.is_dir(path) {
            return Ok(FileStat {
                is_dir: true,
                size: 0,
                modified: Some(SystemTime::now()),
            });
        }
        match self.contents(path) {
            Some(contents) => Ok(FileStat {
                is_dir: false,
                size: contents.len() as u64,
                modified: Some(SystemTime::now()),
            }),
            None => Err(FsError::NotFound(path.to_path_buf())),
        }
    }
}
