//! Error type for the per-file pipeline.
//!
//! Everything here is recoverable at the job boundary: the driver logs
//! the failure with its file path and moves to the next file. Nothing
//! crosses a job boundary uncaught.

use std::io;

use thiserror::Error;

use crate::process::EncoderError;

/// Error from one stage of a single file's pipeline.
#[derive(Error, Debug)]
pub enum JobError {
    /// The external encoder could not be spawned or exited non-zero
    /// where success was required.
    #[error(transparent)]
    Encoder(#[from] EncoderError),

    /// Diagnostic output did not have the expected shape.
    #[error("failed to parse {what}: {message}")]
    Parse { what: String, message: String },

    /// The loudness measurement produced no recognizable statistics.
    #[error("loudness statistics not found in encoder output")]
    MissingStats,

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl JobError {
    /// Create a parse error.
    pub fn parse(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            what: what.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for per-file pipeline stages.
pub type JobResult<T> = Result<T, JobError>;
