//! Filesystem formatting operations trait.

use super::CommandOutcome;
use crate::HalResult;

/// Trait for running the filesystem formatter against a block device.
pub trait FormatOps {
    /// Run a fully assembled formatter command line.
    ///
    /// # Arguments
    /// * `program` - Formatter executable (e.g. `mkfs.ocfs2`)
    /// * `args` - Every remaining token, the target device last
    /// * `opts` - Dry-run and confirmation state
    ///
    /// Implementations must refuse with [`crate::HalError::SafetyLock`] unless
    /// `opts.confirmed` is set.
    fn mkfs(&self, program: &str, args: &[String], opts: &FormatOptions)
        -> HalResult<CommandOutcome>;
}

/// Options for formatting operations.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// If true, log the operation but don't execute it
    pub dry_run: bool,
    /// If true, the user has confirmed the destructive operation
    pub confirmed: bool,
}

impl FormatOptions {
    pub fn new(dry_run: bool, confirmed: bool) -> Self {
        Self { dry_run, confirmed }
    }
}
