//! Single-line text input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A text input field with cursor support and an optional length cap.
#[derive(Debug, Clone)]
pub struct InputField {
    /// Current input value.
    value: String,
    /// Cursor position (byte index).
    cursor: usize,
    /// Maximum number of characters accepted.
    max_chars: Option<usize>,
}

impl InputField {
    pub fn new(default: impl Into<String>) -> Self {
        let value = default.into();
        let cursor = value.len();
        Self {
            value,
            cursor,
            max_chars: None,
        }
    }

    /// Cap the field at `max` characters, truncating the current value if needed.
    pub fn with_max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        let value = std::mem::take(&mut self.value);
        self.set_value(value);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    pub fn set_value(&mut self, value: String) {
        self.value = match self.max_chars {
            Some(max) => value.chars().take(max).collect(),
            None => value,
        };
        self.cursor = self.value.len();
    }

    /// Handle a key event, returns true if the event was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('a') if ctrl => {
                self.cursor = 0;
                true
            }
            KeyCode::Char('e') if ctrl => {
                self.cursor = self.value.len();
                true
            }
            // Clear line.
            KeyCode::Char('u') if ctrl => {
                self.value.clear();
                self.cursor = 0;
                true
            }
            KeyCode::Char('w') if ctrl => {
                self.delete_word_backward();
                true
            }
            KeyCode::Char(_) if ctrl => false,
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => {
                self.delete_char_backward();
                true
            }
            KeyCode::Delete => {
                self.delete_char_forward();
                true
            }
            KeyCode::Left => {
                self.move_cursor_left();
                true
            }
            KeyCode::Right => {
                self.move_cursor_right();
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                true
            }
            _ => false,
        }
    }

    fn insert_char(&mut self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        if let Some(max) = self.max_chars {
            if self.value.chars().count() >= max {
                return true;
            }
        }
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn delete_char_backward(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    fn delete_char_forward(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    fn move_cursor_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    fn move_cursor_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn delete_word_backward(&mut self) {
        let head = &self.value[..self.cursor];
        let trimmed = head.trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.value.drain(start..self.cursor);
        self.cursor = start;
    }
}
