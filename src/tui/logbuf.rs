//! Bounded transcript backing the log pane.
//!
//! Every user-visible message lands here; rendering shows the newest lines
//! that fit the pane. The buffer is capped so week-long sessions cannot
//! grow without bound.

use std::collections::VecDeque;

/// Retained line cap. Oldest lines fall off first.
pub const MAX_LINES: usize = 2000;

#[derive(Debug)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    cap: usize,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LINES)
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            cap,
        }
    }

    /// Append `text`, splitting on line breaks. Empty fragments are
    /// dropped, so pushing a blank string is a no-op.
    pub fn push(&mut self, text: &str) {
        for line in text.lines() {
            if line.is_empty() {
                continue;
            }
            if self.lines.len() == self.cap {
                self.lines.pop_front();
            }
            self.lines.push_back(line.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The `count` most recent lines, oldest first.
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &str> {
        let skip = self.lines.len().saturating_sub(count);
        self.lines.iter().skip(skip).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
