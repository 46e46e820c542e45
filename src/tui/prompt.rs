//! # Line Editor
//!
//! Blocking single-line input drawn into the log pane's reserved bottom
//! row. While a prompt is up the session loop is parked inside
//! [`run_prompt`]; the rest of the screen is left untouched. Resizes are
//! still honored: the layout is recomputed and the prompt row repainted
//! in place, preserving the in-progress input.
//!
//! The editing rules live in [`PromptState`], which is pure and easy to
//! test; the driver owns the terminal plumbing around it.

use std::io::{self, Write};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::keys::{Key, KeyPress};
use crate::core::layout::{self, Geometry};
use crate::tui::event::{self, InputEvent};
use crate::tui::screen::{RegionStyle, Screen};

/// Result of feeding one key press to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Still editing.
    Pending,
    /// Enter pressed; carries the trimmed input.
    Committed(String),
    /// Escape pressed; the input was discarded.
    Cancelled,
}

/// What a finished prompt hands back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptReply {
    /// Trimmed input, empty when cancelled.
    pub input: String,
    /// Transcript line for the log, `"> {prompt}{raw input}"`.
    pub exchange: String,
}

/// One in-progress prompt. The prompt text always carries a trailing
/// space so the cursor never sits flush against it.
#[derive(Debug)]
pub struct PromptState {
    prompt: String,
    input: String,
    limit: usize,
}

impl PromptState {
    pub fn new(prompt: &str) -> Self {
        let prompt = if prompt.ends_with(' ') {
            prompt.to_string()
        } else {
            format!("{prompt} ")
        };
        Self {
            prompt,
            input: String::new(),
            limit: usize::MAX,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Cap on the input's display width. Recomputed by the driver when
    /// the terminal resizes.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    /// Advance the editor by one key press.
    pub fn handle_key(&mut self, press: &KeyPress) -> PromptOutcome {
        match press.key {
            Key::Enter => PromptOutcome::Committed(self.input.trim().to_string()),
            Key::Esc => {
                self.input.clear();
                PromptOutcome::Cancelled
            }
            Key::Backspace => {
                self.input.pop();
                PromptOutcome::Pending
            }
            Key::Char(c) if !press.mods.ctrl && !press.mods.alt && !c.is_control() => {
                let incoming = c.width().unwrap_or(0);
                if self.input.as_str().width() + incoming <= self.limit {
                    self.input.push(c);
                }
                PromptOutcome::Pending
            }
            _ => PromptOutcome::Pending,
        }
    }

    /// Transcript line recorded once per interaction.
    pub fn exchange_line(&self) -> String {
        format!("> {}{}", self.prompt, self.input)
    }
}

/// Run a prompt to completion against the live terminal. Returns the
/// trimmed input (empty on cancel) together with the transcript line;
/// the caller owns appending it to the log.
pub fn run_prompt<W: Write>(
    screen: &mut Screen<W>,
    geometry: &mut Geometry,
    text: &str,
) -> io::Result<PromptReply> {
    let mut state = PromptState::new(text);
    state.set_limit(input_limit(geometry, state.prompt()));
    draw_prompt_row(screen, geometry, &state)?;
    screen.show_cursor()?;
    screen.flush()?;

    let outcome = loop {
        match event::next_event()? {
            InputEvent::Resize(width, height) => {
                screen.set_size(width, height);
                *geometry = layout::compute(width, height);
                state.set_limit(input_limit(geometry, state.prompt()));
                draw_prompt_row(screen, geometry, &state)?;
                screen.flush()?;
            }
            InputEvent::Key(press) => match state.handle_key(&press) {
                PromptOutcome::Pending => {
                    draw_prompt_row(screen, geometry, &state)?;
                    screen.flush()?;
                }
                outcome => break outcome,
            },
        }
    };

    screen.hide_cursor()?;
    screen.flush()?;
    let input = match outcome {
        PromptOutcome::Committed(input) => input,
        _ => String::new(),
    };
    Ok(PromptReply {
        input,
        exchange: state.exchange_line(),
    })
}

/// Columns left for input once the prompt and one spare column are taken
/// out of the log pane.
fn input_limit(geometry: &Geometry, prompt: &str) -> usize {
    usize::from(geometry.log.width).saturating_sub(prompt.width() + 1)
}

fn draw_prompt_row<W: Write>(
    screen: &mut Screen<W>,
    geometry: &Geometry,
    state: &PromptState,
) -> io::Result<()> {
    let row = geometry.prompt_row();
    let text = format!("{}{}", state.prompt(), state.input());
    screen.draw_region(geometry.log.x, row, geometry.log.width, &text, RegionStyle::Normal)?;
    let cols = text.as_str().width().min(usize::from(geometry.log.width.saturating_sub(1)));
    screen.move_cursor(geometry.log.x + cols as u16, row)
}

// ============================================================================
// Tests
// ============================================================================
