//! Batch driver: discovery → fan-out → fan-in → report.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::discovery::{discover_audio_files, mirror_directory_tree};
use super::pool::WorkerPool;
use super::{BatchError, BatchResult};
use crate::config::EncoderConfig;
use crate::models::{BatchJob, TargetCodec};
use crate::pipeline::JobOutcome;

/// Parameters for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Codec to encode into.
    pub codec: TargetCodec,
    /// Directory scanned recursively for audio files.
    pub input_root: PathBuf,
    /// Root of the mirrored output tree.
    pub dest_root: PathBuf,
    /// Quality arguments; `None` uses the codec's default.
    pub quality: Option<String>,
    /// Run the loudness measurement + normalization passes.
    pub normalize: bool,
    /// Run silence detection and trimming.
    pub trim_silence: bool,
    /// Worker count; `None` sizes to available cores minus one.
    pub workers: Option<usize>,
}

/// Aggregate result of a batch run.
#[derive(Debug)]
pub struct BatchReport {
    /// Number of jobs dispatched.
    pub attempted: usize,
    /// Number of files encoded.
    pub succeeded: usize,
    /// Failed files with their error messages.
    pub failed: Vec<(PathBuf, String)>,
    /// Total wall-clock time, discovery included.
    pub elapsed: Duration,
}

/// Run the full batch.
///
/// Fatal errors (invalid input directory, unable to prepare the output
/// tree) abort before dispatch; per-file failures are collected into
/// the report and never stop the batch. Returns once every in-flight
/// job has finished.
pub fn run_batch(config: Arc<EncoderConfig>, options: BatchOptions) -> BatchResult<BatchReport> {
    if !options.input_root.is_dir() {
        return Err(BatchError::InvalidInputDir(options.input_root.clone()));
    }

    let started = Instant::now();

    mirror_directory_tree(&options.input_root, &options.dest_root)?;

    let files = discover_audio_files(&options.input_root);
    let total = files.len();
    tracing::info!("discovered {} audio files under {}", total, options.input_root.display());

    let quality = options
        .quality
        .clone()
        .unwrap_or_else(|| options.codec.default_quality().to_string());

    let jobs: Vec<BatchJob> = files
        .into_iter()
        .map(|file| BatchJob {
            file,
            codec: options.codec,
            dest_root: options.dest_root.clone(),
            quality: quality.clone(),
            config: Arc::clone(&config),
            normalize: options.normalize,
            trim_silence: options.trim_silence,
        })
        .collect();

    let pool = options
        .workers
        .map(WorkerPool::new)
        .unwrap_or_else(WorkerPool::with_default_size);
    tracing::info!("dispatching {} jobs across {} workers", total, pool.worker_count());

    let mut completed = 0usize;
    let outcomes = pool.run(jobs, |_outcome: &JobOutcome| {
        completed += 1;
        tracing::info!("progress: {}/{}", completed, total);
    });

    let elapsed = started.elapsed();
    let report = BatchReport {
        attempted: outcomes.len(),
        succeeded: outcomes.iter().filter(|o| o.success).count(),
        failed: outcomes
            .into_iter()
            .filter(|o| !o.success)
            .map(|o| {
                let error = o.error.unwrap_or_else(|| "unknown error".to_string());
                (o.file, error)
            })
            .collect(),
        elapsed,
    };

    tracing::info!(
        "batch finished: {}/{} files encoded in {:.1?}",
        report.succeeded,
        report.attempted,
        report.elapsed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn stub_config(encoder: &str) -> Arc<EncoderConfig> {
        Arc::new(EncoderConfig {
            encoder: encoder.to_string(),
            global_flags: String::new(),
            ..EncoderConfig::default()
        })
    }

    fn options(input: PathBuf, dest: PathBuf) -> BatchOptions {
        BatchOptions {
            codec: TargetCodec::Mp3,
            input_root: input,
            dest_root: dest,
            quality: None,
            normalize: false,
            trim_silence: false,
            workers: Some(2),
        }
    }

    #[test]
    fn nonexistent_input_dir_is_fatal() {
        let dest = tempdir().unwrap();
        let result = run_batch(
            stub_config("true"),
            options(PathBuf::from("/nonexistent/input"), dest.path().to_path_buf()),
        );
        assert!(matches!(result, Err(BatchError::InvalidInputDir(_))));
    }

    #[cfg(unix)]
    #[test]
    fn batch_mirrors_tree_and_counts_successes() {
        let input = tempdir().unwrap();
        fs::create_dir(input.path().join("a")).unwrap();
        fs::write(input.path().join("a/clip.wav"), b"x").unwrap();
        fs::write(input.path().join("a/notes.txt"), b"x").unwrap();

        let dest_parent = tempdir().unwrap();
        let dest = dest_parent.path().join("out");

        let report = run_batch(
            stub_config("true"),
            options(input.path().to_path_buf(), dest.clone()),
        )
        .unwrap();

        // The text file is excluded before dispatch.
        assert_eq!(report.attempted, 1);
        assert_eq!(report.succeeded, 1);
        assert!(report.failed.is_empty());
        assert!(dest.join("a").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn per_file_failures_do_not_stop_the_batch() {
        let input = tempdir().unwrap();
        fs::write(input.path().join("one.wav"), b"x").unwrap();
        fs::write(input.path().join("two.wav"), b"x").unwrap();

        let dest_parent = tempdir().unwrap();
        let dest = dest_parent.path().join("out");

        // `echo` exits zero but emits no loudness statistics, so the
        // measurement stage fails every file; the batch still finishes.
        let mut opts = options(input.path().to_path_buf(), dest);
        opts.normalize = true;

        let report = run_batch(stub_config("echo"), opts).unwrap();

        assert_eq!(report.attempted, 2);
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed.len(), 2);
        for (_, error) in &report.failed {
            assert!(error.contains("loudness"));
        }
    }
}
