use ocfs2_hal::HalError;
use thiserror::Error;

/// Result type alias for application-level operations
pub type Result<T> = anyhow::Result<T>;

/// Faults that abort the format flow before it reaches a user-visible outcome.
///
/// Cancellation, an empty partition list and a failing formatter are not errors;
/// they are reported through [`crate::format::FormatOutcome`].
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Unable to list unmounted partitions: {0}")]
    Probe(#[source] HalError),

    #[error("Dialog failure: {0:#}")]
    Surface(anyhow::Error),
}
