//! Terminal input translation.
//!
//! Bridges crossterm's event stream to the session's two-variant world:
//! a key press or a resize. Everything else (key release/repeat, mouse,
//! focus, paste) is skipped inside the blocking read loop.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::keys::{Key, KeyPress, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyPress),
    Resize(u16, u16),
}

/// Block until a key press or resize arrives.
pub fn next_event() -> io::Result<InputEvent> {
    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(press) = translate_key(&key) {
                    log::debug!("Key press: {press:?}");
                    return Ok(InputEvent::Key(press));
                }
            }
            Event::Resize(width, height) => return Ok(InputEvent::Resize(width, height)),
            _ => {}
        }
    }
}

fn translate_key(key: &KeyEvent) -> Option<KeyPress> {
    let code = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(KeyPress::new(code, translate_modifiers(key.modifiers)))
}

fn translate_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        shift: mods.contains(KeyModifiers::SHIFT),
        alt: mods.contains(KeyModifiers::ALT),
    }
}

// ============================================================================
// Tests
// ============================================================================
