//! Fake HAL implementation for testing.
//!
//! This implementation records all operations without executing them,
//! allowing for CI-safe testing without root privileges or real hardware.

use super::{
    CommandOutcome, FormatOps, FormatOptions, PartitionCandidate, ProbeOps, ProcessOps,
};
use crate::{HalError, HalResult};
use std::sync::{Arc, Mutex};

/// Operation records for testing and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Probe,
    Command {
        program: String,
        args: Vec<String>,
    },
    Mkfs {
        program: String,
        args: Vec<String>,
        dry_run: bool,
    },
}

/// Shared state for FakeHal operations.
#[derive(Debug, Clone)]
struct FakeHalState {
    /// All operations that were recorded
    operations: Vec<Operation>,
    /// What `unmounted_partitions` returns
    partitions: Vec<PartitionCandidate>,
    /// What every spawned command reports
    outcome: CommandOutcome,
}

impl Default for FakeHalState {
    fn default() -> Self {
        Self {
            operations: Vec::new(),
            partitions: Vec::new(),
            outcome: CommandOutcome::succeeded(String::new()),
        }
    }
}

/// Fake HAL implementation that records operations without executing them.
///
/// This is designed for testing and CI environments where real system
/// operations would fail or be dangerous.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

impl FakeHal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the partitions reported by the probe.
    pub fn with_partitions(self, partitions: Vec<PartitionCandidate>) -> Self {
        self.state.lock().unwrap().partitions = partitions;
        self
    }

    /// Script the result of every command run through this HAL.
    pub fn with_command_outcome(self, outcome: CommandOutcome) -> Self {
        self.state.lock().unwrap().outcome = outcome;
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.state.lock().unwrap().operations.clone()
    }

    /// Get the number of operations recorded.
    pub fn operation_count(&self) -> usize {
        self.state.lock().unwrap().operations.len()
    }

    /// Check if a specific operation was recorded.
    pub fn has_operation(&self, check: impl Fn(&Operation) -> bool) -> bool {
        self.state.lock().unwrap().operations.iter().any(check)
    }

    /// Command lines passed to `mkfs`, program first.
    pub fn mkfs_invocations(&self) -> Vec<Vec<String>> {
        self.state
            .lock()
            .unwrap()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::Mkfs { program, args, .. } => {
                    let mut line = vec![program.clone()];
                    line.extend(args.iter().cloned());
                    Some(line)
                }
                _ => None,
            })
            .collect()
    }

    /// Clear all recorded operations.
    pub fn clear(&self) {
        self.state.lock().unwrap().operations.clear();
    }

    fn record_operation(&self, op: Operation) {
        self.state.lock().unwrap().operations.push(op);
    }
}

impl ProbeOps for FakeHal {
    fn unmounted_partitions(&self) -> HalResult<Vec<PartitionCandidate>> {
        self.record_operation(Operation::Probe);
        Ok(self.state.lock().unwrap().partitions.clone())
    }
}

impl ProcessOps for FakeHal {
    fn run_combined(&self, program: &str, args: &[String]) -> HalResult<CommandOutcome> {
        self.record_operation(Operation::Command {
            program: program.to_string(),
            args: args.to_vec(),
        });
        Ok(self.state.lock().unwrap().outcome.clone())
    }
}

impl FormatOps for FakeHal {
    fn mkfs(
        &self,
        program: &str,
        args: &[String],
        opts: &FormatOptions,
    ) -> HalResult<CommandOutcome> {
        if !opts.confirmed {
            return Err(HalError::SafetyLock);
        }

        log::info!("FAKE HAL: {} {}", program, args.join(" "));
        self.record_operation(Operation::Mkfs {
            program: program.to_string(),
            args: args.to_vec(),
            dry_run: opts.dry_run,
        });

        if opts.dry_run {
            return Ok(CommandOutcome::succeeded(String::new()));
        }
        Ok(self.state.lock().unwrap().outcome.clone())
    }
}
