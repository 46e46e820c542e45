//! qfm library exports for testing

pub mod clipboard;
pub mod core;
pub mod editor;
pub mod fs;
pub mod tui;

#[cfg(test)]
pub mod test_support;
