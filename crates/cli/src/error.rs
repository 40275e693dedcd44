use std::io;

use matching::MalformedDelta;
use thiserror::Error;

/// Exit code reported for usage, input and output failures.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code reported when a delta does not rebuild the updated text.
pub const EXIT_MISMATCH: i32 = 2;

/// Failures surfaced by [`run`](crate::run) after arguments were parsed.
#[derive(Debug, Error)]
pub enum CliError {
    /// A required operand was not supplied.
    #[error("missing {0} operand")]
    MissingOperand(&'static str),
    /// An input file could not be read.
    #[error("failed to read {what}: {source}")]
    Read {
        /// Description of the input, including its path.
        what: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Standard input or output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The delta text could not be parsed or does not fit the old text.
    #[error("invalid delta: {0}")]
    Delta(#[from] MalformedDelta),
    /// Applying the computed delta did not yield the updated text.
    #[error("reconstructed text differs from the updated text (hash collision?)")]
    ReconstructionMismatch,
}

impl CliError {
    /// Process exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ReconstructionMismatch => EXIT_MISMATCH,
            _ => EXIT_FAILURE,
        }
    }
}
