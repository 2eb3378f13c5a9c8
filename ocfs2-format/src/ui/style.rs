//! Shared colours and styles for the dialogs.

use ratatui::style::{Color, Modifier, Style};

pub fn border() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn error_border() -> Style {
    Style::default().fg(Color::Red)
}

pub fn title() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn focused() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn default_button() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

pub fn hint() -> Style {
    Style::default().fg(Color::DarkGray)
}
