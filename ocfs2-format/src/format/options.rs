//! Fields of the Format dialog and the mkfs.ocfs2 arguments each one contributes.

use crate::config::FormatterConfig;
use ocfs2_hal::PartitionCandidate;
use ocfs2_tui::{Choice, InputField};
use std::path::Path;

pub const MAX_VOL_LABEL_LEN: usize = 64;
pub const MIN_CLUSTER_SIZE: u64 = 4 * 1024;
pub const MAX_CLUSTER_SIZE: u64 = 1024 * 1024;
pub const MIN_BLOCK_SIZE: u64 = 512;
pub const MAX_BLOCK_SIZE: u64 = 4 * 1024;
pub const MAX_SLOTS: u16 = 255;
pub const DEFAULT_SLOTS: u16 = 4;

const SUFFIXES: [&str; 4] = ["K", "MB", "GB", "TB"];

/// Human-readable byte size: `1 byte`, `512 bytes`, `4 K`, `1 MB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 1 {
        return "1 byte".to_string();
    }
    if bytes < 1024 {
        return format!("{} bytes", bytes);
    }

    let mut value = bytes as f64;
    let mut idx = 0;
    value /= 1024.0;
    while idx < SUFFIXES.len() - 1 && value >= 1024.0 {
        value /= 1024.0;
        idx += 1;
    }
    format!("{:.0} {}", value, SUFFIXES[idx])
}

/// Choice among the unmounted partitions.
///
/// The candidate itself is kept, so the selected path is used as-is even if it
/// contains spaces.
#[derive(Debug, Clone)]
pub struct DeviceSelector {
    choice: Choice<PartitionCandidate>,
}

impl DeviceSelector {
    /// `None` when there is nothing to choose from. Falls back to the first
    /// candidate when `preselected` is absent or not in the list.
    pub fn new(candidates: Vec<PartitionCandidate>, preselected: Option<&Path>) -> Option<Self> {
        let mut choice = Choice::new(candidates)?;
        if let Some(device) = preselected {
            choice.select_where(|c| c.device == device);
        }
        Some(Self { choice })
    }

    pub fn device(&self) -> &Path {
        self.choice.selected().device()
    }

    pub fn candidates(&self) -> &[PartitionCandidate] {
        self.choice.items()
    }

    pub fn select(&mut self, device: &Path) -> bool {
        self.choice.select_where(|c| c.device == device)
    }
}

/// Free-text volume label.
#[derive(Debug, Clone)]
pub struct VolumeLabel {
    input: InputField,
}

impl VolumeLabel {
    pub fn new(default: &str) -> Self {
        Self {
            input: InputField::new(default).with_max_chars(MAX_VOL_LABEL_LEN),
        }
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn input_mut(&mut self) -> &mut InputField {
        &mut self.input
    }
}

/// `Auto` or a power-of-two size passed through to the formatter.
#[derive(Debug, Clone)]
pub struct SizeChoice {
    flag: &'static str,
    choice: Choice<Option<u64>>,
}

impl SizeChoice {
    fn new(flag: &'static str, min: u64, max: u64) -> Self {
        let sizes = std::iter::successors(Some(min), |s| s.checked_mul(2))
            .take_while(|s| *s <= max)
            .map(Some);
        Self {
            flag,
            choice: Choice::with_first(None, sizes),
        }
    }

    pub fn cluster_size() -> Self {
        Self::new("-C", MIN_CLUSTER_SIZE, MAX_CLUSTER_SIZE)
    }

    pub fn block_size() -> Self {
        Self::new("-b", MIN_BLOCK_SIZE, MAX_BLOCK_SIZE)
    }

    pub fn value(&self) -> Option<u64> {
        *self.choice.selected()
    }

    /// Select `size` (or `Auto` for `None`); false if it is not one of the choices.
    pub fn set(&mut self, size: Option<u64>) -> bool {
        self.choice.select_where(|v| *v == size)
    }

    fn display(&self) -> String {
        match self.value() {
            Some(bytes) => format_bytes(bytes),
            None => "Auto".to_string(),
        }
    }
}

/// Maximum number of nodes that may mount the volume concurrently.
#[derive(Debug, Clone, Copy)]
pub struct NumberOfSlots {
    value: Option<u16>,
}

impl Default for NumberOfSlots {
    fn default() -> Self {
        Self {
            value: Some(DEFAULT_SLOTS),
        }
    }
}

impl NumberOfSlots {
    pub fn value(&self) -> Option<u16> {
        self.value
    }

    /// Out-of-range counts are clamped to `1..=MAX_SLOTS`.
    pub fn set(&mut self, value: Option<u16>) {
        self.value = value.map(|v| v.clamp(1, MAX_SLOTS));
    }

    pub fn step(&mut self, delta: i32) {
        let current = self.value.map(i32::from).unwrap_or(0);
        let next = (current + delta).clamp(0, i32::from(MAX_SLOTS));
        // Stepping below one lands on `Auto`.
        self.value = u16::try_from(next).ok().filter(|v| *v > 0);
    }
}

/// One field of the Format dialog, in display order.
#[derive(Debug, Clone)]
pub enum FormatOption {
    Device(DeviceSelector),
    VolumeLabel(VolumeLabel),
    ClusterSize(SizeChoice),
    NumberOfSlots(NumberOfSlots),
    BlockSize(SizeChoice),
}

impl FormatOption {
    pub fn label(&self) -> &'static str {
        match self {
            FormatOption::Device(_) => "Available devices",
            FormatOption::VolumeLabel(_) => "Volume label",
            FormatOption::ClusterSize(_) => "Cluster size",
            FormatOption::NumberOfSlots(_) => "Number of node slots",
            FormatOption::BlockSize(_) => "Block size",
        }
    }

    pub fn display_value(&self) -> String {
        match self {
            FormatOption::Device(sel) => sel.choice.selected().display_label(),
            FormatOption::VolumeLabel(label) => label.text().to_string(),
            FormatOption::ClusterSize(size) | FormatOption::BlockSize(size) => size.display(),
            FormatOption::NumberOfSlots(slots) => match slots.value() {
                Some(n) => n.to_string(),
                None => "Auto".to_string(),
            },
        }
    }

    /// Tokens this field adds to the formatter command line.
    ///
    /// The device selector contributes nothing; the device is appended last by
    /// the command builder.
    pub fn contribute_arguments(&self) -> Vec<String> {
        match self {
            FormatOption::Device(_) => Vec::new(),
            FormatOption::VolumeLabel(label) => {
                if label.text().is_empty() {
                    Vec::new()
                } else {
                    vec!["-L".to_string(), label.text().to_string()]
                }
            }
            FormatOption::ClusterSize(size) | FormatOption::BlockSize(size) => match size.value() {
                Some(bytes) => vec![size.flag.to_string(), bytes.to_string()],
                None => Vec::new(),
            },
            FormatOption::NumberOfSlots(slots) => match slots.value() {
                Some(n) => vec!["-N".to_string(), n.to_string()],
                None => Vec::new(),
            },
        }
    }

    /// Move a choice or counter one step; text fields are unaffected.
    pub fn step(&mut self, forward: bool) {
        match self {
            FormatOption::Device(sel) => {
                if forward {
                    sel.choice.select_next()
                } else {
                    sel.choice.select_prev()
                }
            }
            FormatOption::ClusterSize(size) | FormatOption::BlockSize(size) => {
                if forward {
                    size.choice.select_next()
                } else {
                    size.choice.select_prev()
                }
            }
            FormatOption::NumberOfSlots(slots) => slots.step(if forward { 1 } else { -1 }),
            FormatOption::VolumeLabel(_) => {}
        }
    }

    pub fn text_input_mut(&mut self) -> Option<&mut InputField> {
        match self {
            FormatOption::VolumeLabel(label) => Some(label.input_mut()),
            _ => None,
        }
    }

    pub fn text_input(&self) -> Option<&InputField> {
        match self {
            FormatOption::VolumeLabel(label) => Some(&label.input),
            _ => None,
        }
    }
}

/// The Format dialog's fields in their fixed order plus keyboard focus.
#[derive(Debug, Clone)]
pub struct FormatForm {
    fields: Vec<FormatOption>,
    focus: usize,
}

impl FormatForm {
    /// `None` when `candidates` is empty.
    pub fn new(
        candidates: Vec<PartitionCandidate>,
        preselected: Option<&Path>,
        formatter: &FormatterConfig,
    ) -> Option<Self> {
        let device = DeviceSelector::new(candidates, preselected)?;
        Some(Self {
            fields: vec![
                FormatOption::Device(device),
                FormatOption::VolumeLabel(VolumeLabel::new(&formatter.default_label)),
                FormatOption::ClusterSize(SizeChoice::cluster_size()),
                FormatOption::NumberOfSlots(NumberOfSlots::default()),
                FormatOption::BlockSize(SizeChoice::block_size()),
            ],
            focus: 0,
        })
    }

    pub fn fields(&self) -> &[FormatOption] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> &FormatOption {
        &self.fields[self.focus]
    }

    pub fn focused_mut(&mut self) -> &mut FormatOption {
        &mut self.fields[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn device(&self) -> &Path {
        self.device_selector().device()
    }

    pub fn device_selector(&self) -> &DeviceSelector {
        match &self.fields[0] {
            FormatOption::Device(sel) => sel,
            _ => unreachable!("device selector is always the first field"),
        }
    }

    /// Arguments of every field after the device selector, in field order.
    pub fn option_arguments(&self) -> Vec<String> {
        self.fields
            .iter()
            .skip(1)
            .flat_map(FormatOption::contribute_arguments)
            .collect()
    }

    pub fn select_device(&mut self, device: &Path) -> bool {
        match &mut self.fields[0] {
            FormatOption::Device(sel) => sel.select(device),
            _ => false,
        }
    }

    pub fn label(&self) -> &str {
        self.fields
            .iter()
            .find_map(|f| match f {
                FormatOption::VolumeLabel(label) => Some(label.text()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn set_label(&mut self, text: &str) {
        for field in &mut self.fields {
            if let FormatOption::VolumeLabel(label) = field {
                label.input_mut().set_value(text.to_string());
            }
        }
    }

    pub fn set_cluster_size(&mut self, size: Option<u64>) -> bool {
        self.fields.iter_mut().any(|f| match f {
            FormatOption::ClusterSize(choice) => choice.set(size),
            _ => false,
        })
    }

    pub fn set_block_size(&mut self, size: Option<u64>) -> bool {
        self.fields.iter_mut().any(|f| match f {
            FormatOption::BlockSize(choice) => choice.set(size),
            _ => false,
        })
    }

    pub fn set_slots(&mut self, slots: Option<u16>) {
        for field in &mut self.fields {
            if let FormatOption::NumberOfSlots(n) = field {
                n.set(slots);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn candidates() -> Vec<PartitionCandidate> {
        vec![
            PartitionCandidate::new("/dev/sda1", "ext4"),
            PartitionCandidate::new("/dev/sdb1", "unknown"),
        ]
    }

    fn form() -> FormatForm {
        FormatForm::new(candidates(), None, &FormatterConfig::default()).unwrap()
    }

    #[test]
    fn format_bytes_matches_console_output() {
        assert_eq!(format_bytes(1), "1 byte");
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(4096), "4 K");
        assert_eq!(format_bytes(1024 * 1024), "1 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn fields_are_in_fixed_order() {
        let labels: Vec<_> = form().fields().iter().map(FormatOption::label).collect();
        assert_eq!(
            labels,
            vec![
                "Available devices",
                "Volume label",
                "Cluster size",
                "Number of node slots",
                "Block size"
            ]
        );
    }

    #[test]
    fn defaults_contribute_label_and_slots_only() {
        assert_eq!(form().option_arguments(), vec!["-L", "oracle", "-N", "4"]);
    }

    #[test]
    fn empty_label_contributes_nothing() {
        let mut f = form();
        f.set_label("");
        f.set_slots(None);
        assert!(f.option_arguments().is_empty());
    }

    #[test]
    fn preselected_device_is_selected() {
        let f = FormatForm::new(
            candidates(),
            Some(Path::new("/dev/sdb1")),
            &FormatterConfig::default(),
        )
        .unwrap();
        assert_eq!(f.device(), Path::new("/dev/sdb1"));
    }

    #[test]
    fn unknown_preselection_falls_back_to_first() {
        let f = FormatForm::new(
            candidates(),
            Some(Path::new("/dev/sdz9")),
            &FormatterConfig::default(),
        )
        .unwrap();
        assert_eq!(f.device(), Path::new("/dev/sda1"));
    }

    #[test]
    fn no_candidates_no_form() {
        assert!(FormatForm::new(Vec::new(), None, &FormatterConfig::default()).is_none());
    }

    #[test]
    fn size_choices_cover_ocfs2_range() {
        let cluster = SizeChoice::cluster_size();
        let values: Vec<_> = cluster.choice.items().to_vec();
        assert_eq!(values.first(), Some(&None));
        assert_eq!(values.get(1), Some(&Some(4096)));
        assert_eq!(values.last(), Some(&Some(1024 * 1024)));
        assert_eq!(values.len(), 1 + 9);

        let block = SizeChoice::block_size();
        assert_eq!(block.choice.items().len(), 1 + 4);
    }

    #[test]
    fn size_values_outside_choices_are_rejected() {
        let mut f = form();
        assert!(!f.set_cluster_size(Some(3000)));
        assert!(f.set_cluster_size(Some(8192)));
        assert_eq!(f.option_arguments(), vec!["-L", "oracle", "-C", "8192", "-N", "4"]);
    }

    #[test]
    fn stepping_cycles_choices_and_counters() {
        let mut f = form();
        f.step_focused_n(0, true);
        assert_eq!(f.device(), Path::new("/dev/sdb1"));

        f.step_focused_n(2, true);
        assert_eq!(f.fields()[2].display_value(), "4 K");

        f.step_focused_n(3, false);
        assert_eq!(f.fields()[3].display_value(), "3");

        f.set_slots(Some(1));
        f.step_focused_n(3, false);
        assert_eq!(f.fields()[3].display_value(), "Auto");
        assert!(f.fields()[3].contribute_arguments().is_empty());

        f.set_slots(Some(MAX_SLOTS));
        f.step_focused_n(3, true);
        assert_eq!(f.fields()[3].display_value(), "255");
    }

    #[test]
    fn label_is_capped() {
        let mut f = form();
        f.set_label(&"x".repeat(100));
        assert_eq!(f.label().len(), MAX_VOL_LABEL_LEN);
    }

    #[test]
    fn focus_wraps() {
        let mut f = form();
        f.focus_prev();
        assert_eq!(f.focus(), 4);
        f.focus_next();
        assert_eq!(f.focus(), 0);
    }

    #[test]
    fn device_paths_with_spaces_survive() {
        let f = FormatForm::new(
            vec![PartitionCandidate::new("/dev/disk/by-label/my disk", "xfs")],
            None,
            &FormatterConfig::default(),
        )
        .unwrap();
        assert_eq!(f.device(), PathBuf::from("/dev/disk/by-label/my disk"));
    }

    impl FormatForm {
        fn step_focused_n(&mut self, idx: usize, forward: bool) {
            self.focus = idx;
            self.focused_mut().step(forward);
        }
    }
}
