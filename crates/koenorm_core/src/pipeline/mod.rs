//! Per-file pipeline: detect → measure → encode.
//!
//! Every failure is contained here and turned into a typed
//! [`JobOutcome`]; the batch driver only counts and reports. No error
//! crosses a job boundary.

mod errors;

pub use errors::{JobError, JobResult};

use std::path::PathBuf;

use crate::encode;
use crate::loudness;
use crate::models::BatchJob;
use crate::silence;

/// Result of processing a single file.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// Source file that was processed.
    pub file: PathBuf,
    /// Whether the file was encoded.
    pub success: bool,
    /// Path of the encoded file (if successful).
    pub output_path: Option<PathBuf>,
    /// Error message (if failed).
    pub error: Option<String>,
}

impl JobOutcome {
    /// Create a successful outcome.
    pub fn success(file: PathBuf, output_path: PathBuf) -> Self {
        Self {
            file,
            success: true,
            output_path: Some(output_path),
            error: None,
        }
    }

    /// Create a failed outcome.
    pub fn failure(file: PathBuf, error: impl Into<String>) -> Self {
        Self {
            file,
            success: false,
            output_path: None,
            error: Some(error.into()),
        }
    }
}

/// Run the full pipeline for one job.
///
/// A failed stage fails this file only: the error is logged with the
/// file path and recorded in the outcome, and the batch moves on.
pub fn run_job(job: &BatchJob) -> JobOutcome {
    match run_stages(job) {
        Ok(output_path) => {
            tracing::debug!(
                "encoded {} -> {}",
                job.file.path.display(),
                output_path.display()
            );
            JobOutcome::success(job.file.path.clone(), output_path)
        }
        Err(err) => {
            tracing::error!("error on file {}: {}", job.file.path.display(), err);
            JobOutcome::failure(job.file.path.clone(), err.to_string())
        }
    }
}

/// The three sequential stages of one file's processing.
fn run_stages(job: &BatchJob) -> JobResult<PathBuf> {
    let window = if job.trim_silence {
        Some(silence::detect_window(&job.file.path, &job.config)?)
    } else {
        None
    };

    let stats = if job.normalize {
        Some(loudness::measure_loudness(
            &job.file.path,
            window.as_ref(),
            &job.config,
        )?)
    } else {
        None
    };

    encode::encode_file(job, window.as_ref(), stats.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use crate::config::EncoderConfig;
    use crate::models::{AudioFile, TargetCodec};

    fn job_with_encoder(encoder: &str) -> BatchJob {
        let config = EncoderConfig {
            encoder: encoder.to_string(),
            global_flags: String::new(),
            ..EncoderConfig::default()
        };
        BatchJob {
            file: AudioFile::new(PathBuf::from("/in/clip.wav"), Path::new("/in")),
            codec: TargetCodec::Mp3,
            dest_root: PathBuf::from("/out"),
            quality: String::new(),
            config: Arc::new(config),
            normalize: false,
            trim_silence: false,
        }
    }

    #[test]
    fn outcome_constructors_fill_fields() {
        let ok = JobOutcome::success(PathBuf::from("/in/a.wav"), PathBuf::from("/out/a.mp3"));
        assert!(ok.success);
        assert_eq!(ok.output_path, Some(PathBuf::from("/out/a.mp3")));
        assert!(ok.error.is_none());

        let bad = JobOutcome::failure(PathBuf::from("/in/b.wav"), "boom");
        assert!(!bad.success);
        assert!(bad.output_path.is_none());
        assert_eq!(bad.error.as_deref(), Some("boom"));
    }

    #[cfg(unix)]
    #[test]
    fn failed_encoder_yields_a_failure_outcome() {
        // `false` exits non-zero; the outcome records it instead of panicking.
        let outcome = run_job(&job_with_encoder("false"));
        assert!(!outcome.success);
        assert!(outcome.error.is_some());
        assert_eq!(outcome.file, PathBuf::from("/in/clip.wav"));
    }

    #[cfg(unix)]
    #[test]
    fn trivially_successful_encoder_yields_success() {
        // With trimming and normalization off, the pipeline is a single
        // encoder invocation; `true` stands in for it.
        let outcome = run_job(&job_with_encoder("true"));
        assert!(outcome.success);
        assert_eq!(outcome.output_path, Some(PathBuf::from("/out/clip.mp3")));
    }
}
