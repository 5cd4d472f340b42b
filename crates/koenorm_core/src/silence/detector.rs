//! Trim-window derivation from detection output.

use std::path::Path;

use crate::config::EncoderConfig;
use crate::pipeline::JobResult;
use crate::process;
use crate::silence::parser::{first_value, last_value, Marker, MarkerValue};

/// The region of a clip kept after trimming.
///
/// `start_secs` is clamped to ≥ 0. `end_secs` is present only when the
/// clip provably ends in trailing silence (see [`detect_window`]).
#[derive(Debug, Clone, PartialEq)]
pub struct SilenceWindow {
    /// Seek point in seconds; speech before this is trimmed.
    pub start_secs: f64,
    /// Stop point in seconds; trailing silence after this is trimmed.
    pub end_secs: Option<f64>,
}

impl SilenceWindow {
    /// A window that trims nothing.
    pub fn none() -> Self {
        Self {
            start_secs: 0.0,
            end_secs: None,
        }
    }

    /// Input-seek arguments for the encoder (`-ss`, and `-to` when an
    /// end trim applies), placed before the input on the command line.
    pub fn seek_args(&self) -> Vec<String> {
        let mut args = vec!["-ss".to_string(), format!("{:.6}", self.start_secs)];
        if let Some(end) = self.end_secs {
            args.push("-to".to_string());
            args.push(format!("{:.6}", end));
        }
        args
    }
}

/// Detect the trim window for one file.
///
/// Runs the encoder with the cleanup + silence-detection chain against
/// a null output and folds the diagnostic text into a window. Parse
/// oddities degrade to "no trim" for the affected boundary; only a
/// failure to spawn the encoder is an error.
pub fn detect_window(file: &Path, config: &EncoderConfig) -> JobResult<SilenceWindow> {
    let args = vec![
        "-i".to_string(),
        file.display().to_string(),
        "-af".to_string(),
        config.silence_chain(),
        "-f".to_string(),
        "null".to_string(),
        "-".to_string(),
    ];

    let output = process::capture_diagnostics(&config.encoder, &args)?;
    let window = window_from_diagnostics(&output.stdout, config.silence_compensate);
    tracing::debug!(
        "silence window for {}: start {:.3}s, end {:?}",
        file.display(),
        window.start_secs,
        window.end_secs
    );
    Ok(window)
}

/// Fold diagnostic text into a trim window.
///
/// Start trim: the first `silence_end` timestamp minus the
/// compensation padding, clamped to ≥ 0 (detected boundaries are
/// imprecise; the padding keeps premature cuts off the speech).
/// Absent, sentinel, or malformed values mean no start trim.
///
/// End trim: the clip ends in silence only when the last
/// `silence_start` comes after the last `silence_end` — a trailing
/// start/end pair means the final silence was followed by more speech.
/// Both timestamps must be present for the comparison; if either is
/// absent the clip is left untouched at the tail. The end point is
/// padded outward by the compensation value.
pub(crate) fn window_from_diagnostics(text: &str, compensate: f64) -> SilenceWindow {
    let start_secs = match first_value(text, Marker::SilenceEnd) {
        MarkerValue::Seconds(v) => (v - compensate).max(0.0),
        _ => 0.0,
    };

    let last_start = last_value(text, Marker::SilenceStart);
    let last_end = last_value(text, Marker::SilenceEnd);
    let end_secs = match (last_start.seconds(), last_end.seconds()) {
        (Some(start), Some(end)) if start > end => Some(start + compensate),
        _ => None,
    };

    SilenceWindow { start_secs, end_secs }
}
