//! Batch processing: discovery, worker pool, and the driver that
//! wires them together.

mod discovery;
mod driver;
mod pool;

pub use discovery::{
    discover_audio_files, is_supported_audio_file, mirror_directory_tree, SUPPORTED_EXTENSIONS,
};
pub use driver::{run_batch, BatchOptions, BatchReport};
pub use pool::WorkerPool;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal batch-level errors.
///
/// These abort before any job is dispatched; per-file failures never
/// surface here.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("input dir is not valid: {0}")]
    InvalidInputDir(PathBuf),

    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl BatchError {
    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;
