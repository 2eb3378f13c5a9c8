//! Hardware abstraction layer for ocfs2-format.
//!
//! Everything that touches the host (reading `/proc`, opening block devices,
//! spawning `blkid` or `mkfs.ocfs2`) goes through the traits in [`hal`] so the
//! dialog flow can be exercised against [`FakeHal`] without root or real disks.

pub mod error;
pub mod hal;
pub mod procfs;
pub mod sysfs;

pub use error::{HalError, HalResult};
pub use hal::{
    CommandOutcome, FakeHal, FormatOps, FormatOptions, LinuxHal, Operation, PartitionCandidate,
    ProbeOps, ProcessOps, SystemHal,
};
