//! Process execution helpers.
//!
//! External commands are considered "world-touching" and must go through the HAL so we can
//! test workflows without spawning real processes.

use crate::HalResult;

/// Result of running an external command to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit status zero.
    pub success: bool,
    /// Combined stdout and stderr, in the order the child wrote them.
    pub output: String,
    pub code: Option<i32>,
    /// Terminating signal, if the child was killed.
    pub signal: Option<i32>,
}

impl CommandOutcome {
    pub fn succeeded(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            code: Some(0),
            signal: None,
        }
    }

    pub fn failed(code: i32, output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
            code: Some(code),
            signal: None,
        }
    }
}

/// Process execution trait (external command runner).
pub trait ProcessOps {
    /// Run `program` with `args`, capturing stdout and stderr through one pipe.
    ///
    /// There is no timeout: the call blocks until the child exits. A non-zero exit
    /// is reported through [`CommandOutcome::success`], not as an error.
    fn run_combined(&self, program: &str, args: &[String]) -> HalResult<CommandOutcome>;
}
