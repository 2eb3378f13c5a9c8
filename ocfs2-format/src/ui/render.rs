//! Drawing for the Format dialog, the Yes/No question, error boxes and progress.

use super::style;
use crate::config::DialogConfig;
use crate::format::{DialogResponse, FormatForm};
use ocfs2_tui::centered_rect;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub label: String,
    pub value: String,
    /// Character offset of the cursor for text fields.
    pub cursor: Option<usize>,
}

/// Snapshot of the Format dialog, enough to draw it without the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub rows: Vec<FieldRow>,
    pub focus: usize,
    pub ok_label: String,
    pub cancel_label: String,
    pub default_response: DialogResponse,
}

impl FormView {
    pub fn capture(form: &FormatForm, config: &DialogConfig) -> Self {
        let rows = form
            .fields()
            .iter()
            .map(|field| FieldRow {
                label: format!("{}:", field.label()),
                value: field.display_value(),
                cursor: field.text_input().map(|input| input.cursor_column()),
            })
            .collect();
        Self {
            title: config.title.clone(),
            rows,
            focus: form.focus(),
            ok_label: config.ok_label.clone(),
            cancel_label: config.cancel_label.clone(),
            default_response: config.default_response,
        }
    }

    fn label_width(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0)
    }

    fn row_text(&self, idx: usize) -> (String, String) {
        let row = &self.rows[idx];
        let label = format!("{:<width$} ", row.label, width = self.label_width());
        let value = if idx == self.focus && row.cursor.is_none() {
            format!("< {} >", row.value)
        } else {
            row.value.clone()
        };
        (label, value)
    }

    fn buttons(&self) -> Line<'static> {
        let button = |label: &str, response: DialogResponse| {
            let text = format!("[ {} ]", label);
            if response == self.default_response {
                Span::styled(text, style::default_button())
            } else {
                Span::raw(text)
            }
        };
        Line::from(vec![
            button(&self.ok_label, DialogResponse::Ok),
            Span::raw("  "),
            button(&self.cancel_label, DialogResponse::Cancel),
        ])
    }

    /// Plain-text rendering, one line per field, focus marked with `>`.
    pub fn dump(&self) -> String {
        let mut out = format!("== {} ==\n", self.title);
        for idx in 0..self.rows.len() {
            let (label, value) = self.row_text(idx);
            let marker = if idx == self.focus { '>' } else { ' ' };
            out.push_str(&format!("{} {}{}\n", marker, label, value));
        }
        out.push_str(&format!("[ {} ]  [ {} ]\n", self.ok_label, self.cancel_label));
        out
    }
}

/// Draw the option dialog. An inactive dialog is drawn as a backdrop for other popups.
pub fn draw_form(f: &mut Frame, view: &FormView, active: bool) {
    let height = view.rows.len() as u16 + 5;
    let popup = centered_rect(70, height, f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", view.title), style::title()))
        .border_style(style::border());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(view.rows.len() as u16),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let lines: Vec<Line> = (0..view.rows.len())
        .map(|idx| {
            let (label, value) = view.row_text(idx);
            let value = if active && idx == view.focus {
                Span::styled(value, style::focused())
            } else {
                Span::raw(value)
            };
            Line::from(vec![Span::raw(label), value])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), chunks[0]);
    f.render_widget(
        Paragraph::new(view.buttons()).alignment(Alignment::Center),
        chunks[2],
    );

    if active {
        let enter = match view.default_response {
            DialogResponse::Ok => &view.ok_label,
            DialogResponse::Cancel => &view.cancel_label,
        };
        let hint = format!("Tab/↑↓: Field | ←→: Change | Enter: {} | Esc: Cancel", enter);
        f.render_widget(
            Paragraph::new(Span::styled(hint, style::hint())).alignment(Alignment::Center),
            chunks[3],
        );

        if let Some(cursor) = view.rows.get(view.focus).and_then(|r| r.cursor) {
            let x = inner.x + (view.label_width() + 1 + cursor) as u16;
            let y = chunks[0].y + view.focus as u16;
            f.set_cursor_position(Position::new(x.min(inner.right().saturating_sub(1)), y));
        }
    }
}

pub fn draw_question(f: &mut Frame, backdrop: Option<&FormView>, prompt: &str, yes_selected: bool) {
    if let Some(view) = backdrop {
        draw_form(f, view, false);
    }

    let popup = centered_rect(60, 7, f.area());
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Question ", style::title()))
        .border_style(style::border());

    let button = |text: &str, selected: bool| {
        if selected {
            Span::styled(format!("[ {} ]", text), style::focused())
        } else {
            Span::raw(format!("[ {} ]", text))
        }
    };
    let lines = vec![
        Line::from(prompt.to_string()),
        Line::from(""),
        Line::from(vec![
            button("Yes", yes_selected),
            Span::raw("  "),
            button("No", !yes_selected),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(block),
        popup,
    );
}

/// Split `message` into the rows drawn in a box `width` columns wide.
///
/// Long lines are broken at `width` characters and nothing is trimmed, so the
/// scroll offset of the error box counts exactly these rows.
pub fn wrap_message(message: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    for line in message.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            rows.push(String::new());
        } else {
            rows.extend(chars.chunks(width).map(|chunk| chunk.iter().collect::<String>()));
        }
    }
    rows
}

fn error_popup(area: Rect, message: &str) -> (Rect, Vec<String>) {
    let text_width = centered_rect(80, area.height, area).width.saturating_sub(2);
    let rows = wrap_message(message, text_width);
    let wanted = u16::try_from(rows.len())
        .unwrap_or(u16::MAX)
        .saturating_add(4);
    let max_height = area.height.saturating_sub(2).max(6);
    (centered_rect(80, wanted.clamp(6, max_height), area), rows)
}

/// Error box showing `message` verbatim, scrolled down by `scroll` rows.
///
/// Returns the number of wrapped rows so the caller can bound scrolling.
pub fn draw_error(
    f: &mut Frame,
    backdrop: Option<&FormView>,
    title: &str,
    message: &str,
    scroll: u16,
) -> usize {
    if let Some(view) = backdrop {
        draw_form(f, view, false);
    }

    let (popup, rows) = error_popup(f.area(), message);
    let row_count = rows.len();
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", title), style::title()))
        .border_style(style::error_border());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), chunks[0]);
    f.render_widget(
        Paragraph::new(Span::styled("Enter: Close | ↑↓: Scroll", style::hint()))
            .alignment(Alignment::Center),
        chunks[1],
    );
    row_count
}

pub fn draw_progress(f: &mut Frame, title: &str, message: &str, frame: &str) {
    let popup = centered_rect(50, 5, f.area());
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", title), style::title()))
        .border_style(style::border());
    f.render_widget(
        Paragraph::new(vec![
            Line::from(format!("{}...", message)),
            Line::from(frame.to_string()),
        ])
        .alignment(Alignment::Center)
        .block(block),
        popup,
    );
}
