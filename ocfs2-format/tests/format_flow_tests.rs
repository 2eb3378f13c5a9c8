use ocfs2_format::config::{Config, DialogConfig};
use ocfs2_format::format::{
    format_partition, run_format_flow, DialogResponse, DialogSurface, FormatForm, FormatOutcome,
};
use ocfs2_hal::{
    CommandOutcome, FakeHal, FormatOps, FormatOptions, HalError, HalResult, Operation,
    PartitionCandidate, ProbeOps, ProcessOps,
};
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

type DialogStep = Box<dyn FnMut(&mut FormatForm) -> anyhow::Result<DialogResponse>>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Shown {
    Dialog { devices: Vec<PathBuf>, selected: PathBuf },
    Close,
    Question(String),
    Error { title: String, message: String },
    Pulse,
    Finish,
}

/// Surface that answers every dialog from a script and records what was shown.
#[derive(Default)]
struct ScriptedSurface {
    dialogs: VecDeque<DialogStep>,
    answers: VecDeque<bool>,
    shown: Vec<Shown>,
}

impl ScriptedSurface {
    fn new() -> Self {
        Self::default()
    }

    fn dialog(
        mut self,
        step: impl FnMut(&mut FormatForm) -> anyhow::Result<DialogResponse> + 'static,
    ) -> Self {
        self.dialogs.push_back(Box::new(step));
        self
    }

    fn ok(self) -> Self {
        self.dialog(|_| Ok(DialogResponse::Ok))
    }

    fn answer(mut self, yes: bool) -> Self {
        self.answers.push_back(yes);
        self
    }

    fn errors(&self) -> Vec<(String, String)> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Error { title, message } => Some((title.clone(), message.clone())),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Shown) -> bool) -> usize {
        self.shown.iter().filter(|s| pred(s)).count()
    }
}

impl DialogSurface for ScriptedSurface {
    fn show_error(&mut self, title: &str, message: &str) -> anyhow::Result<()> {
        self.shown.push(Shown::Error {
            title: title.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn run_format_dialog(
        &mut self,
        form: &mut FormatForm,
        _config: &DialogConfig,
    ) -> anyhow::Result<DialogResponse> {
        self.shown.push(Shown::Dialog {
            devices: form
                .device_selector()
                .candidates()
                .iter()
                .map(|c| c.device.clone())
                .collect(),
            selected: form.device().to_path_buf(),
        });
        match self.dialogs.pop_front() {
            Some(mut step) => step(form),
            None => anyhow::bail!("dialog shown more often than scripted"),
        }
    }

    fn close_format_dialog(&mut self) -> anyhow::Result<()> {
        self.shown.push(Shown::Close);
        Ok(())
    }

    fn ask_yes_no(&mut self, prompt: &str) -> anyhow::Result<bool> {
        self.shown.push(Shown::Question(prompt.to_string()));
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected question: {}", prompt))
    }

    fn pulse_progress(&mut self, _title: &str, _message: &str) -> anyhow::Result<()> {
        self.shown.push(Shown::Pulse);
        Ok(())
    }

    fn finish_progress(&mut self) -> anyhow::Result<()> {
        self.shown.push(Shown::Finish);
        Ok(())
    }
}

fn two_partitions() -> FakeHal {
    FakeHal::new().with_partitions(vec![
        PartitionCandidate::new("/dev/sdb1", "unknown"),
        PartitionCandidate::new("/dev/sda1", "ext4"),
    ])
}

#[test]
fn no_partitions_shows_error_without_dialog() {
    let hal = FakeHal::new();
    let mut surface = ScriptedSurface::new();

    assert!(!format_partition(&mut surface, &hal, None, &Config::default()));
    assert_eq!(
        surface.shown,
        vec![Shown::Error {
            title: "Format error".to_string(),
            message: "No unmounted partitions".to_string(),
        }]
    );
    assert!(hal.mkfs_invocations().is_empty());
}

#[test]
fn candidates_are_sorted_and_first_selected() {
    let hal = two_partitions();
    let mut surface = ScriptedSurface::new().dialog(|_| Ok(DialogResponse::Cancel));

    format_partition(&mut surface, &hal, None, &Config::default());

    assert_eq!(
        surface.shown[0],
        Shown::Dialog {
            devices: vec![PathBuf::from("/dev/sda1"), PathBuf::from("/dev/sdb1")],
            selected: PathBuf::from("/dev/sda1"),
        }
    );
}

#[test]
fn preselected_device_is_honored() {
    let hal = two_partitions();
    let mut surface = ScriptedSurface::new().dialog(|_| Ok(DialogResponse::Cancel));

    format_partition(
        &mut surface,
        &hal,
        Some(Path::new("/dev/sdb1")),
        &Config::default(),
    );

    assert!(matches!(
        &surface.shown[0],
        Shown::Dialog { selected, .. } if selected == Path::new("/dev/sdb1")
    ));
}

#[test]
fn unknown_preselection_falls_back_to_first() {
    let hal = two_partitions();
    let mut surface = ScriptedSurface::new().dialog(|_| Ok(DialogResponse::Cancel));

    format_partition(
        &mut surface,
        &hal,
        Some(Path::new("/dev/sdq9")),
        &Config::default(),
    );

    assert!(matches!(
        &surface.shown[0],
        Shown::Dialog { selected, .. } if selected == Path::new("/dev/sda1")
    ));
}

#[test]
fn cancel_runs_nothing_and_closes_dialog() {
    let hal = two_partitions();
    let mut surface = ScriptedSurface::new().dialog(|_| Ok(DialogResponse::Cancel));

    let outcome = run_format_flow(&mut surface, &hal, None, &Config::default()).unwrap();

    assert_eq!(outcome, FormatOutcome::Cancelled);
    assert!(hal.mkfs_invocations().is_empty());
    assert_eq!(surface.shown.last(), Some(&Shown::Close));
    assert!(surface.errors().is_empty());
}

#[test]
fn answering_no_returns_to_dialog_with_values_kept() {
    let hal = two_partitions();
    let mut surface = ScriptedSurface::new()
        .dialog(|form| {
            assert!(form.select_device(Path::new("/dev/sdb1")));
            form.set_label("shared");
            form.set_slots(Some(8));
            Ok(DialogResponse::Ok)
        })
        .dialog(|form| {
            assert_eq!(form.device(), Path::new("/dev/sdb1"));
            assert_eq!(form.label(), "shared");
            Ok(DialogResponse::Ok)
        })
        .answer(false)
        .answer(true);

    assert!(format_partition(&mut surface, &hal, None, &Config::default()));

    assert_eq!(
        surface.count(|s| matches!(s, Shown::Question(q) if q == "Are you sure you want to format /dev/sdb1?")),
        2
    );
    assert_eq!(
        hal.mkfs_invocations(),
        vec![vec!["mkfs.ocfs2", "-x", "-L", "shared", "-N", "8", "/dev/sdb1"]]
    );
}

#[test]
fn full_command_line_is_passed_to_formatter() {
    let hal = two_partitions();
    let mut surface = ScriptedSurface::new()
        .dialog(|form| {
            form.select_device(Path::new("/dev/sdb1"));
            form.set_label("data");
            form.set_cluster_size(Some(4096));
            form.set_slots(Some(4));
            form.set_block_size(Some(4096));
            Ok(DialogResponse::Ok)
        })
        .answer(true);

    let outcome = run_format_flow(&mut surface, &hal, None, &Config::default()).unwrap();

    assert!(outcome.succeeded());
    assert_eq!(
        hal.mkfs_invocations(),
        vec![vec![
            "mkfs.ocfs2", "-x", "-L", "data", "-C", "4096", "-N", "4", "-b", "4096", "/dev/sdb1"
        ]]
    );
}

#[test]
fn defaults_produce_label_and_slots_only() {
    let hal = two_partitions();
    let mut surface = ScriptedSurface::new().ok().answer(true);

    assert!(format_partition(&mut surface, &hal, None, &Config::default()));
    assert_eq!(
        hal.mkfs_invocations(),
        vec![vec!["mkfs.ocfs2", "-x", "-L", "oracle", "-N", "4", "/dev/sda1"]]
    );
}

#[test]
fn failure_shows_output_verbatim() {
    let output = "mkfs.ocfs2 1.8.7\nCannot open /dev/sda1: Device or resource busy\n\n";
    let hal = two_partitions().with_command_outcome(CommandOutcome::failed(1, output));
    let mut surface = ScriptedSurface::new().ok().answer(true);

    assert!(!format_partition(&mut surface, &hal, None, &Config::default()));
    assert_eq!(
        surface.errors(),
        vec![("Format error".to_string(), output.to_string())]
    );
}

#[test]
fn failure_outcome_carries_command_and_output() {
    let hal = two_partitions().with_command_outcome(CommandOutcome::failed(2, "bad"));
    let mut surface = ScriptedSurface::new().ok().answer(true);

    match run_format_flow(&mut surface, &hal, None, &Config::default()).unwrap() {
        FormatOutcome::Failed { command, output } => {
            assert_eq!(output, "bad");
            assert_eq!(command.device(), "/dev/sda1");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn success_shows_no_error() {
    let hal = two_partitions().with_command_outcome(CommandOutcome::succeeded("done\n"));
    let mut surface = ScriptedSurface::new().ok().answer(true);

    assert!(format_partition(&mut surface, &hal, None, &Config::default()));
    assert!(surface.errors().is_empty());
}

#[test]
fn dialog_is_closed_before_progress_is_shown() {
    let hal = two_partitions();
    let mut surface = ScriptedSurface::new().ok().answer(true);

    format_partition(&mut surface, &hal, None, &Config::default());

    let close = surface.shown.iter().position(|s| *s == Shown::Close).unwrap();
    let pulse = surface.shown.iter().position(|s| *s == Shown::Pulse).unwrap();
    assert!(close < pulse);
    assert_eq!(surface.count(|s| *s == Shown::Close), 1);
    assert_eq!(surface.shown.last(), Some(&Shown::Finish));
}

#[test]
fn dry_run_is_forwarded_to_hal() {
    let hal = two_partitions().with_command_outcome(CommandOutcome::failed(1, "unused"));
    let mut surface = ScriptedSurface::new().ok().answer(true);
    let mut config = Config::default();
    config.formatter.dry_run = true;

    assert!(format_partition(&mut surface, &hal, None, &config));
    assert!(hal.has_operation(|op| matches!(op, Operation::Mkfs { dry_run: true, .. })));
}

#[test]
fn configured_program_and_force_flag_are_used() {
    let hal = two_partitions();
    let mut surface = ScriptedSurface::new().ok().answer(true);
    let config = Config::parse(
        "[formatter]\nprogram = \"/usr/sbin/mkfs.ocfs2\"\nforce_flag = \"\"\ndefault_label = \"\"\n",
    )
    .unwrap();

    assert!(format_partition(&mut surface, &hal, None, &config));
    assert_eq!(
        hal.mkfs_invocations(),
        vec![vec!["/usr/sbin/mkfs.ocfs2", "-N", "4", "/dev/sda1"]]
    );
}

#[test]
fn device_path_with_spaces_is_one_argument() {
    let hal = FakeHal::new()
        .with_partitions(vec![PartitionCandidate::new("/dev/disk/by-label/my disk", "xfs")]);
    let mut surface = ScriptedSurface::new().ok().answer(true);

    assert!(format_partition(&mut surface, &hal, None, &Config::default()));
    let calls = hal.mkfs_invocations();
    assert_eq!(calls[0].last().unwrap(), "/dev/disk/by-label/my disk");
}

#[test]
fn surface_failure_closes_dialog_and_returns_false() {
    let hal = two_partitions();
    let mut surface =
        ScriptedSurface::new().dialog(|_| Err(anyhow::anyhow!("terminal went away")));

    assert!(!format_partition(&mut surface, &hal, None, &Config::default()));
    assert!(surface.shown.contains(&Shown::Close));
    let errors = surface.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].1.contains("terminal went away"));
    assert!(hal.mkfs_invocations().is_empty());
}

struct BrokenProbe;

impl ProbeOps for BrokenProbe {
    fn unmounted_partitions(&self) -> HalResult<Vec<PartitionCandidate>> {
        Err(HalError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "/proc/partitions",
        )))
    }
}

impl ProcessOps for BrokenProbe {
    fn run_combined(&self, _program: &str, _args: &[String]) -> HalResult<CommandOutcome> {
        unreachable!("nothing runs without a device")
    }
}

impl FormatOps for BrokenProbe {
    fn mkfs(
        &self,
        _program: &str,
        _args: &[String],
        _opts: &FormatOptions,
    ) -> HalResult<CommandOutcome> {
        unreachable!("nothing runs without a device")
    }
}

#[test]
fn probe_failure_is_reported() {
    let mut surface = ScriptedSurface::new();

    assert!(!format_partition(&mut surface, &BrokenProbe, None, &Config::default()));
    let errors = surface.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].1.starts_with("Unable to list unmounted partitions"));
}

struct MissingFormatter(FakeHal);

impl ProbeOps for MissingFormatter {
    fn unmounted_partitions(&self) -> HalResult<Vec<PartitionCandidate>> {
        self.0.unmounted_partitions()
    }
}

impl ProcessOps for MissingFormatter {
    fn run_combined(&self, program: &str, _args: &[String]) -> HalResult<CommandOutcome> {
        Err(HalError::CommandNotFound(program.to_string()))
    }
}

impl FormatOps for MissingFormatter {
    fn mkfs(
        &self,
        program: &str,
        args: &[String],
        _opts: &FormatOptions,
    ) -> HalResult<CommandOutcome> {
        self.run_combined(program, args)
    }
}

#[test]
fn missing_formatter_is_a_failure_not_a_crash() {
    let hal = MissingFormatter(two_partitions());
    let mut surface = ScriptedSurface::new().ok().answer(true);

    let outcome = run_format_flow(&mut surface, &hal, None, &Config::default()).unwrap();

    assert!(matches!(outcome, FormatOutcome::Failed { .. }));
    assert_eq!(surface.errors().len(), 1);
    assert!(surface.errors()[0].1.contains("mkfs.ocfs2"));
}
