use super::keys::{self, ErrorBoxInput, FormInput};
use super::render::{self, FormView};
use crate::config::DialogConfig;
use crate::format::{DialogResponse, DialogSurface, FormatForm};
use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ocfs2_tui::Spinner;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

/// Dialogs drawn on the alternate screen. The terminal is restored on drop.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Last state of the option dialog, drawn behind the question and error popups.
    backdrop: Option<FormView>,
    spinner: Spinner,
    progress_visible: bool,
}

impl TerminalSurface {
    pub fn new() -> anyhow::Result<Self> {
        super::ensure_interactive_terminal()?;

        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err).context("Failed to enter the alternate screen");
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(err).context("Failed to set up the terminal");
            }
        };

        Ok(Self {
            terminal,
            backdrop: None,
            spinner: Spinner::default(),
            progress_visible: false,
        })
    }

    /// Next key press; `None` for anything else (resize, release, focus).
    fn read_key(&mut self) -> anyhow::Result<Option<KeyEvent>> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }

    /// Drop keys typed while the formatter was running.
    fn drain_input(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let _ = event::read()?;
        }
        Ok(())
    }

    fn restore(&mut self) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::warn!("failed to restore terminal: {:#}", err);
        }
    }
}

impl DialogSurface for TerminalSurface {
    fn show_error(&mut self, title: &str, message: &str) -> anyhow::Result<()> {
        let mut scroll = 0u16;
        loop {
            let backdrop = self.backdrop.as_ref();
            // Row count depends on the current width, so it is refreshed on every draw.
            let mut row_count = 0;
            self.terminal.draw(|f| {
                row_count = render::draw_error(f, backdrop, title, message, scroll);
            })?;
            let Some(key) = self.read_key()? else {
                continue;
            };
            match keys::handle_error_key(key) {
                ErrorBoxInput::Close => return Ok(()),
                ErrorBoxInput::Scroll(delta) => {
                    scroll = keys::scroll_by(scroll, delta, row_count)
                }
                ErrorBoxInput::Ignore => {}
            }
        }
    }

    fn run_format_dialog(
        &mut self,
        form: &mut FormatForm,
        config: &DialogConfig,
    ) -> anyhow::Result<DialogResponse> {
        loop {
            let view = FormView::capture(form, config);
            self.terminal.draw(|f| render::draw_form(f, &view, true))?;
            let Some(key) = self.read_key()? else {
                continue;
            };
            if let FormInput::Respond(response) =
                keys::handle_form_key(form, key, config.default_response)
            {
                self.backdrop = Some(FormView::capture(form, config));
                return Ok(response);
            }
        }
    }

    fn close_format_dialog(&mut self) -> anyhow::Result<()> {
        self.backdrop = None;
        self.terminal.clear()?;
        Ok(())
    }

    fn ask_yes_no(&mut self, prompt: &str) -> anyhow::Result<bool> {
        let mut yes_selected = false;
        loop {
            let backdrop = self.backdrop.as_ref();
            self.terminal
                .draw(|f| render::draw_question(f, backdrop, prompt, yes_selected))?;
            let Some(key) = self.read_key()? else {
                continue;
            };
            if let Some(answer) = keys::handle_question_key(key, &mut yes_selected) {
                return Ok(answer);
            }
        }
    }

    fn pulse_progress(&mut self, title: &str, message: &str) -> anyhow::Result<()> {
        if self.progress_visible {
            self.spinner.pulse();
        }
        self.progress_visible = true;
        let frame = self.spinner.frame();
        self.terminal
            .draw(|f| render::draw_progress(f, title, message, frame))?;
        Ok(())
    }

    fn finish_progress(&mut self) -> anyhow::Result<()> {
        if !self.progress_visible {
            return Ok(());
        }
        self.progress_visible = false;
        self.spinner = Spinner::default();
        self.terminal.clear()?;
        self.drain_input()?;
        Ok(())
    }
}
