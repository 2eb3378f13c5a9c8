//! Device probing operations.

use crate::HalResult;
use std::fmt;
use std::path::{Path, PathBuf};

/// A block device that may be formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionCandidate {
    pub device: PathBuf,
    /// Filesystem type reported by blkid, `unknown` when nothing was detected.
    pub fstype: String,
}

impl PartitionCandidate {
    pub fn new(device: impl Into<PathBuf>, fstype: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            fstype: fstype.into(),
        }
    }

    pub fn device(&self) -> &Path {
        &self.device
    }

    /// Label shown in selectors, e.g. `/dev/sdb1 (ext4)`.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.device.display(), self.fstype)
    }
}

impl fmt::Display for PartitionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_label())
    }
}

/// Probing operations trait.
pub trait ProbeOps {
    /// Return every block device that is not mounted, not active swap and not
    /// otherwise held open. Order is unspecified.
    fn unmounted_partitions(&self) -> HalResult<Vec<PartitionCandidate>>;
}
