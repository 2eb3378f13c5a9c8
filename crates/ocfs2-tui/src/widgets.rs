//! Small, reusable UI helpers used by multiple dialogs.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A selection over a fixed list, like a combo box.
///
/// The list is never empty and the selection never wraps.
#[derive(Debug, Clone)]
pub struct Choice<T> {
    items: Vec<T>,
    selected: usize,
}

impl<T> Choice<T> {
    /// Returns `None` for an empty list.
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self { items, selected: 0 })
    }

    /// A list that starts with `first`, selected.
    pub fn with_first(first: T, rest: impl IntoIterator<Item = T>) -> Self {
        let mut items = vec![first];
        items.extend(rest);
        Self { items, selected: 0 }
    }

    /// Select the first item matching `pred`, keeping the current selection if none does.
    pub fn select_where(&mut self, pred: impl Fn(&T) -> bool) -> bool {
        match self.items.iter().position(pred) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> &T {
        &self.items[self.selected]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Indeterminate progress indicator.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    tick: usize,
}

impl Spinner {
    const FRAMES: [&'static str; 4] = ["|", "/", "-", "\\"];

    pub fn pulse(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn frame(&self) -> &'static str {
        Self::FRAMES[self.tick % Self::FRAMES.len()]
    }
}

/// A rect of `percent_x` width and fixed `height`, centered in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x.min(100)) / 2),
            Constraint::Percentage(percent_x.min(100)),
            Constraint::Percentage((100 - percent_x.min(100)) / 2),
        ])
        .split(vertical[1])[1]
}
