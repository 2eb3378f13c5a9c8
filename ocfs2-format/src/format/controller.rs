//! The Format dialog flow: pick a device, confirm, run mkfs.ocfs2, report.

use super::command::FormatCommand;
use super::options::FormatForm;
use crate::config::{Config, DialogConfig};
use crate::errors::FormatError;
use ocfs2_hal::{CommandOutcome, FormatOptions, HalError, PartitionCandidate, SystemHal};
use serde::Deserialize;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// How often the progress indicator is pulsed while the formatter runs.
pub const PULSE_INTERVAL: Duration = Duration::from_millis(100);

pub const NO_CANDIDATES_MESSAGE: &str = "No unmounted partitions";

/// How the user left the Format dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogResponse {
    Ok,
    Cancel,
}

/// Where the flow is presented.
///
/// Dialogs are modal: each call returns once the user has answered. The format
/// dialog stays open across `run_format_dialog` calls until
/// `close_format_dialog`.
pub trait DialogSurface {
    /// Show a modal error box and wait for it to be dismissed.
    fn show_error(&mut self, title: &str, message: &str) -> anyhow::Result<()>;

    /// Present the option dialog, letting the user edit `form` in place.
    fn run_format_dialog(
        &mut self,
        form: &mut FormatForm,
        config: &DialogConfig,
    ) -> anyhow::Result<DialogResponse>;

    fn close_format_dialog(&mut self) -> anyhow::Result<()>;

    /// Modal Yes/No question. `true` means Yes.
    fn ask_yes_no(&mut self, prompt: &str) -> anyhow::Result<bool>;

    /// Advance the indeterminate progress indicator, showing it if needed.
    fn pulse_progress(&mut self, title: &str, message: &str) -> anyhow::Result<()>;

    fn finish_progress(&mut self) -> anyhow::Result<()>;
}

/// How a format flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The formatter ran and exited zero.
    Formatted { command: FormatCommand },
    /// The user dismissed the option dialog.
    Cancelled,
    /// Nothing to format; no dialog was shown.
    NoCandidates,
    /// The formatter could not be run or exited unsuccessfully.
    Failed { command: FormatCommand, output: String },
}

impl FormatOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, FormatOutcome::Formatted { .. })
    }
}

/// Sort ascending by device path, comparing raw bytes.
pub fn sort_candidates(candidates: &mut [PartitionCandidate]) {
    candidates.sort_by(|a, b| {
        a.device
            .as_os_str()
            .as_bytes()
            .cmp(b.device.as_os_str().as_bytes())
    });
}

pub fn confirm_prompt(device: &Path) -> String {
    format!("Are you sure you want to format {}?", device.display())
}

/// Run the Format dialog and report whether the device was formatted.
///
/// Every failure is shown on `surface` and folded into `false`.
pub fn format_partition<S, H>(
    surface: &mut S,
    hal: &H,
    preselected: Option<&Path>,
    config: &Config,
) -> bool
where
    S: DialogSurface + ?Sized,
    H: SystemHal + ?Sized,
{
    match run_format_flow(surface, hal, preselected, config) {
        Ok(outcome) => outcome.succeeded(),
        Err(err) => {
            log::error!("format flow aborted: {}", err);
            if let Err(show_err) = surface.show_error(&config.dialog.error_title, &err.to_string())
            {
                log::warn!("unable to display error: {:#}", show_err);
            }
            false
        }
    }
}

/// The format flow with its outcome spelled out.
pub fn run_format_flow<S, H>(
    surface: &mut S,
    hal: &H,
    preselected: Option<&Path>,
    config: &Config,
) -> Result<FormatOutcome, FormatError>
where
    S: DialogSurface + ?Sized,
    H: SystemHal + ?Sized,
{
    let mut candidates = hal.unmounted_partitions().map_err(FormatError::Probe)?;
    candidates.retain(|c| {
        let keep = !c.device.as_os_str().is_empty();
        if !keep {
            log::warn!("ignoring partition candidate without a device path");
        }
        keep
    });
    sort_candidates(&mut candidates);

    let Some(mut form) = FormatForm::new(candidates, preselected, &config.formatter) else {
        log::info!("{}", NO_CANDIDATES_MESSAGE);
        surface
            .show_error(&config.dialog.error_title, NO_CANDIDATES_MESSAGE)
            .map_err(FormatError::Surface)?;
        return Ok(FormatOutcome::NoCandidates);
    };

    let confirmed = match confirm_loop(surface, &mut form, config) {
        Ok(device) => device,
        Err(err) => {
            if let Err(close_err) = surface.close_format_dialog() {
                log::warn!("unable to close format dialog: {:#}", close_err);
            }
            return Err(FormatError::Surface(err));
        }
    };

    let Some(device) = confirmed else {
        log::info!("format cancelled");
        surface.close_format_dialog().map_err(FormatError::Surface)?;
        return Ok(FormatOutcome::Cancelled);
    };

    let command = FormatCommand::assemble(&config.formatter, &form, &device);
    surface.close_format_dialog().map_err(FormatError::Surface)?;

    log::info!("running: {}", command);
    let result = run_with_progress(surface, hal, &command, config);

    match result {
        Ok(outcome) if outcome.success => {
            log::info!("formatted {}", command.device());
            Ok(FormatOutcome::Formatted { command })
        }
        Ok(outcome) => report_failure(surface, config, command, outcome.output),
        Err(err) => report_failure(surface, config, command, err.to_string()),
    }
}

/// Loop until the user confirms a device (`Some`) or cancels (`None`).
///
/// Answering No returns to the option dialog with every field as it was.
fn confirm_loop<S>(
    surface: &mut S,
    form: &mut FormatForm,
    config: &Config,
) -> anyhow::Result<Option<PathBuf>>
where
    S: DialogSurface + ?Sized,
{
    loop {
        if surface.run_format_dialog(form, &config.dialog)? != DialogResponse::Ok {
            return Ok(None);
        }

        let device = form.device().to_path_buf();
        if surface.ask_yes_no(&confirm_prompt(&device))? {
            return Ok(Some(device));
        }
        log::debug!("format of {} not confirmed", device.display());
    }
}

/// Run the formatter on a worker thread, pulsing the surface until it exits.
///
/// There is no timeout and no cancellation once started.
fn run_with_progress<S, H>(
    surface: &mut S,
    hal: &H,
    command: &FormatCommand,
    config: &Config,
) -> Result<CommandOutcome, HalError>
where
    S: DialogSurface + ?Sized,
    H: SystemHal + ?Sized,
{
    let opts = FormatOptions::new(config.formatter.dry_run, true);
    let title = &config.dialog.progress_title;
    let message = &config.dialog.progress_message;

    let result = thread::scope(|scope| {
        let (tx, rx) = mpsc::channel();
        scope.spawn(move || {
            let _ = tx.send(hal.mkfs(command.program(), command.args(), &opts));
        });

        // A surface that cannot draw progress stops being pulsed; the wait goes on.
        let pulse = |surface: &mut S| match surface.pulse_progress(title, message) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("progress display failed: {:#}", err);
                false
            }
        };
        let mut pulsing = pulse(surface);

        loop {
            let received = if pulsing {
                rx.recv_timeout(PULSE_INTERVAL)
            } else {
                rx.recv().map_err(|_| mpsc::RecvTimeoutError::Disconnected)
            };
            match received {
                Ok(result) => break result,
                Err(mpsc::RecvTimeoutError::Timeout) => pulsing = pulse(surface),
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    break Err(HalError::Other(
                        "formatter worker exited without a result".to_string(),
                    ))
                }
            }
        }
    });

    if let Err(err) = surface.finish_progress() {
        log::warn!("unable to close progress display: {:#}", err);
    }
    result
}

fn report_failure<S>(
    surface: &mut S,
    config: &Config,
    command: FormatCommand,
    output: String,
) -> Result<FormatOutcome, FormatError>
where
    S: DialogSurface + ?Sized,
{
    log::error!("{} failed: {}", command.program(), output.trim_end());
    surface
        .show_error(&config.dialog.error_title, &output)
        .map_err(FormatError::Surface)?;
    Ok(FormatOutcome::Failed { command, output })
}
