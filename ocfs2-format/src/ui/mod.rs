//! Terminal presentation of the Format dialog.

use std::io::IsTerminal;

pub mod keys;
pub mod render;
pub mod style;
pub mod terminal;

pub use terminal::TerminalSurface;

pub fn ensure_interactive_terminal() -> anyhow::Result<()> {
    if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
        return Ok(());
    }

    anyhow::bail!(
        "No TTY detected. The Format dialog requires an interactive terminal.\n\
         Use `ocfs2-format list` for scripting, or run directly in a terminal."
    );
}
