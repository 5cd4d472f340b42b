//! Final encode-and-normalize pass.

use std::path::PathBuf;

use crate::loudness::LoudnessStats;
use crate::models::BatchJob;
use crate::pipeline::JobResult;
use crate::process;
use crate::silence::SilenceWindow;

/// Encode one file into its mirrored output path.
///
/// Composes global flags, the trim window, the input, the measured
/// normalization filter (omitted entirely when normalization is off),
/// and the quality flags. Output is discarded; a successful exit is
/// the only success signal.
pub fn encode_file(
    job: &BatchJob,
    window: Option<&SilenceWindow>,
    stats: Option<&LoudnessStats>,
) -> JobResult<PathBuf> {
    let output_path = job.file.output_path(&job.dest_root, job.codec);
    let args = build_args(job, window, stats, &output_path);

    process::run_discarding(&job.config.encoder, &args)?;
    Ok(output_path)
}

/// Assemble the full argument list for the final pass.
fn build_args(
    job: &BatchJob,
    window: Option<&SilenceWindow>,
    stats: Option<&LoudnessStats>,
    output_path: &std::path::Path,
) -> Vec<String> {
    let mut args: Vec<String> = split_flags(&job.config.global_flags);
    if let Some(window) = window {
        args.extend(window.seek_args());
    }
    args.push("-i".to_string());
    args.push(job.file.path.display().to_string());
    if let Some(stats) = stats {
        args.push("-af".to_string());
        args.push(format!("{}{}", job.config.normalize_filter, stats.filter_args()));
    }
    args.extend(split_flags(&job.quality));
    args.push(output_path.display().to_string());
    args
}

/// Split a configured flag string into arguments.
///
/// None of the recognized flag strings carry quoting, so whitespace
/// splitting is the whole grammar.
fn split_flags(flags: &str) -> Vec<String> {
    flags.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use crate::config::EncoderConfig;
    use crate::models::{AudioFile, TargetCodec};

    fn job(normalize: bool) -> BatchJob {
        BatchJob {
            file: AudioFile::new(PathBuf::from("/in/a/clip.wav"), Path::new("/in")),
            codec: TargetCodec::Mp3,
            dest_root: PathBuf::from("/out"),
            quality: "-map_metadata -1 -q:a 3".to_string(),
            config: Arc::new(EncoderConfig::default()),
            normalize,
            trim_silence: true,
        }
    }

    #[test]
    fn args_compose_in_invocation_order() {
        let job = job(true);
        let window = SilenceWindow {
            start_secs: 0.25,
            end_secs: Some(7.5),
        };
        let stats = LoudnessStats {
            integrated: -23.5,
            true_peak: -7.0,
            range: 4.0,
            threshold: -34.0,
            target_offset: 0.5,
        };
        let out = PathBuf::from("/out/a/clip.mp3");
        let args = build_args(&job, Some(&window), Some(&stats), &out);

        let joined = args.join(" ");
        assert!(joined.starts_with(&job.config.global_flags));
        assert!(joined.contains("-ss 0.250000 -to 7.500000 -i /in/a/clip.wav"));
        assert!(joined.contains(":measured_I=-23.5:"));
        assert!(joined.ends_with("-q:a 3 /out/a/clip.mp3"));
    }

    #[test]
    fn normalization_off_means_no_filter_argument() {
        let job = job(false);
        let args = build_args(&job, None, None, Path::new("/out/a/clip.mp3"));
        assert!(!args.contains(&"-af".to_string()));
        assert!(!args.contains(&"-ss".to_string()));
    }

    #[test]
    fn split_flags_handles_empty_strings() {
        assert!(split_flags("").is_empty());
        assert_eq!(split_flags("  -y  -v error "), vec!["-y", "-v", "error"]);
    }
}
