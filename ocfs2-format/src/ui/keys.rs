//! Key handling for the dialogs, kept free of terminal I/O.

use crate::format::{DialogResponse, FormatForm};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of a key press in the option dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    Continue,
    Respond(DialogResponse),
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

pub fn handle_form_key(
    form: &mut FormatForm,
    key: KeyEvent,
    default_response: DialogResponse,
) -> FormInput {
    if is_interrupt(&key) {
        return FormInput::Respond(DialogResponse::Cancel);
    }

    match key.code {
        KeyCode::Esc => return FormInput::Respond(DialogResponse::Cancel),
        KeyCode::Enter => return FormInput::Respond(default_response),
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        _ => {
            let field = form.focused_mut();
            if let Some(input) = field.text_input_mut() {
                input.handle_key(key);
            } else {
                match key.code {
                    KeyCode::Right | KeyCode::Char('+') | KeyCode::Char(' ') => field.step(true),
                    KeyCode::Left | KeyCode::Char('-') => field.step(false),
                    KeyCode::PageUp => (0..10).for_each(|_| field.step(true)),
                    KeyCode::PageDown => (0..10).for_each(|_| field.step(false)),
                    _ => {}
                }
            }
        }
    }
    FormInput::Continue
}

/// Handle a key in the Yes/No question. `Some(answer)` once the user decides.
pub fn handle_question_key(key: KeyEvent, yes_selected: &mut bool) -> Option<bool> {
    if is_interrupt(&key) {
        return Some(false);
    }
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
            *yes_selected = !*yes_selected;
            None
        }
        KeyCode::Enter => Some(*yes_selected),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorBoxInput {
    Close,
    Scroll(i32),
    Ignore,
}

pub fn handle_error_key(key: KeyEvent) -> ErrorBoxInput {
    match key.code {
        KeyCode::Up => ErrorBoxInput::Scroll(-1),
        KeyCode::Down => ErrorBoxInput::Scroll(1),
        KeyCode::PageUp => ErrorBoxInput::Scroll(-10),
        KeyCode::PageDown => ErrorBoxInput::Scroll(10),
        KeyCode::Modifier(_) => ErrorBoxInput::Ignore,
        _ => ErrorBoxInput::Close,
    }
}

/// Apply a scroll delta without running past the last wrapped row of the message.
pub fn scroll_by(current: u16, delta: i32, row_count: usize) -> u16 {
    let max = row_count.saturating_sub(1).min(u16::MAX as usize) as i32;
    (current as i32 + delta).clamp(0, max) as u16
}
