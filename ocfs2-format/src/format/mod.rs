//! Formatting a partition with OCFS2.

pub mod command;
pub mod controller;
pub mod options;

pub use command::FormatCommand;
pub use controller::{
    format_partition, run_format_flow, DialogResponse, DialogSurface, FormatOutcome,
};
pub use options::{FormatForm, FormatOption};
