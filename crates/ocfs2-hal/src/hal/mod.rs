//! HAL trait definitions and implementations.
//!
//! This module defines the core traits for system operations and provides
//! both real (LinuxHal) and fake (FakeHal) implementations.

pub mod fake_hal;
pub mod format_ops;
pub mod linux_hal;
pub mod probe_ops;
pub mod process_ops;

pub use fake_hal::{FakeHal, Operation};
pub use format_ops::{FormatOps, FormatOptions};
pub use linux_hal::LinuxHal;
pub use probe_ops::{PartitionCandidate, ProbeOps};
pub use process_ops::{CommandOutcome, ProcessOps};

/// Complete HAL combining all system operation traits.
pub trait SystemHal: ProbeOps + ProcessOps + FormatOps + Send + Sync {}

/// Automatically implement SystemHal for any type implementing all required traits.
impl<T> SystemHal for T where T: ProbeOps + ProcessOps + FormatOps + Send + Sync {}
