pub mod cli;
pub mod config;
pub mod errors;
pub mod format;
pub mod logging;
pub mod ui;

use clap::Parser;
use ocfs2_hal::{LinuxHal, ProbeOps};
use std::io::Write;

/// Parse the command line and run it. `Ok(false)` means the user-facing
/// operation did not succeed (cancelled, nothing to format, formatter failed).
pub fn run() -> anyhow::Result<bool> {
    let cli = cli::Cli::parse();
    let mut config = config::Config::load(cli.config.as_deref())?;

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.log_file.clone())
        .unwrap_or_else(logging::default_log_path);
    logging::init_with(&log_file, cli.verbose);
    log::debug!("configuration: {:?}", config);

    let hal = LinuxHal::new();
    match cli.command {
        cli::Command::Format { device, dry_run } => {
            config.formatter.dry_run |= dry_run;
            if config.formatter.dry_run {
                log::info!("dry run: {} will not be executed", config.formatter.program);
            }
            let formatted = {
                let mut surface = ui::TerminalSurface::new()?;
                format::format_partition(&mut surface, &hal, device.as_deref(), &config)
            };
            // The terminal is restored by now, so this lands on the normal screen.
            if formatted && config.formatter.dry_run {
                println!(
                    "Dry run: nothing was formatted; the command was logged to {}",
                    log_file.display()
                );
            }
            Ok(formatted)
        }
        cli::Command::List => {
            let mut candidates = hal.unmounted_partitions()?;
            format::controller::sort_candidates(&mut candidates);
            let mut stdout = std::io::stdout().lock();
            if candidates.is_empty() {
                writeln!(stdout, "{}", format::controller::NO_CANDIDATES_MESSAGE)?;
                return Ok(false);
            }
            for candidate in &candidates {
                writeln!(stdout, "{}", candidate.display_label())?;
            }
            Ok(true)
        }
    }
}
