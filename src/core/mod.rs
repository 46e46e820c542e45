//! # Core Logic
//!
//! This module contains the browser's pure state and arithmetic.
//! It draws nothing and reads no keys.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │          CORE            │
//!                 │  (this module)           │
//!                 │                          │
//!                 │  • layout geometry       │
//!                 │  • listing cursor/scroll │
//!                 │  • hotkey canon + table  │
//!                 │  • config resolution     │
//!                 │                          │
//!                 │  No terminal. No I/O.*   │
//!                 └────────────┬─────────────┘
//!                              │
//!                   ┌──────────┴──────────┐
//!                   ▼                     ▼
//!            ┌────────────┐        ┌────────────┐
//!            │    TUI     │        │     fs     │
//!            │ (crossterm)│        │ (disk ops) │
//!            └────────────┘        └────────────┘
//! ```
//!
//! *`config` touches the config file and `listing::load` calls through the
//! `fs::FileService` trait; neither knows about the terminal.
//!
//! ## Modules
//!
//! - [`layout`]: pane geometry derived from the terminal size
//! - [`listing`]: the file pane's selection/scroll model
//! - [`keys`]: canonical hotkey spelling for config strings and live presses
//! - [`keymap`]: canonical key → [`keymap::Action`] dispatch table
//! - [`config`]: settings with defaults → file → env layering

pub mod config;
pub mod keymap;
pub mod keys;
pub mod layout;
pub mod listing;
