//! # Canonical Key Encoding
//!
//! Hotkeys arrive from two directions: configuration strings written by a
//! person (`"Control + n"`) and live key events reported by the terminal.
//! Both are funnelled into one canonical spelling so the dispatch table is
//! a plain exact-match lookup.
//!
//! Canonical form: active modifiers in the fixed order `CTRL`, `SHIFT`,
//! `ALT`, then the upper-cased character or key name, joined with `+`.
//! A bare `n` press is `N`; Ctrl+Shift+F5 is `CTRL+SHIFT+F5`.
//!
//! This module knows nothing about crossterm. Terminal events are
//! translated into [`KeyPress`] at the TUI boundary.

/// A key reported by the terminal, stripped of backend-specific detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    F(u8),
}

/// Modifier state carried by a single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// True when no modifier is held.
    pub fn is_empty(&self) -> bool {
        !(self.ctrl || self.shift || self.alt)
    }
}

/// One decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub mods: Modifiers,
}

impl KeyPress {
    pub fn new(key: Key, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    pub fn plain(key: Key) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            mods: Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
        }
    }

    pub fn alt(key: Key) -> Self {
        Self {
            key,
            mods: Modifiers {
                alt: true,
                ..Modifiers::NONE
            },
        }
    }
}

/// Canonical spelling of a live key press.
///
/// Total over every representable press: the result is never empty and
/// the function never fails.
pub fn encode(press: &KeyPress) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(4);
    if press.mods.ctrl {
        parts.push("CTRL".to_string());
    }
    if press.mods.shift {
        parts.push("SHIFT".to_string());
    }
    if press.mods.alt {
        parts.push("ALT".to_string());
    }
    parts.push(key_name(press.key));
    parts.join("+")
}

fn key_name(key: Key) -> String {
    match key {
        Key::Char(c) => c.to_uppercase().collect(),
        Key::Enter => "ENTER".to_string(),
        Key::Esc => "ESCAPE".to_string(),
        Key::Backspace => "BACKSPACE".to_string(),
        Key::Tab => "TAB".to_string(),
        Key::Up => "UPARROW".to_string(),
        Key::Down => "DOWNARROW".to_string(),
        Key::Left => "LEFTARROW".to_string(),
        Key::Right => "RIGHTARROW".to_string(),
        Key::PageUp => "PAGEUP".to_string(),
        Key::PageDown => "PAGEDOWN".to_string(),
        Key::Home => "HOME".to_string(),
        Key::End => "END".to_string(),
        Key::Insert => "INSERT".to_string(),
        Key::Delete => "DELETE".to_string(),
        Key::F(n) => format!("F{n}"),
    }
}

/// Canonical spelling of a configuration key expression.
///
/// Forgiving about human spellings: all whitespace is dropped, case is
/// ignored, and the long form `CONTROL+` collapses to `CTRL+`, so
/// `"Control + n"` and a live Ctrl+n press both canonicalize to `CTRL+N`.
/// Modifier order is not rearranged; expressions are expected in the
/// canonical `CTRL`, `SHIFT`, `ALT` order.
pub fn normalize_expr(expr: &str) -> String {
    let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
    compact.to_uppercase().replace("CONTROL+", "CTRL+")
}
