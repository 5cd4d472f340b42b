//! Encoder configuration value.
//!
//! Loaded once at startup and threaded through every stage by
//! reference (or `Arc` across workers). Never mutated after load.

use serde::{Deserialize, Serialize};

/// Immutable configuration for the external encoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncoderConfig {
    /// Encoder executable (name resolved via PATH, or an absolute path).
    #[serde(default = "default_encoder")]
    pub encoder: String,

    /// Flags prepended to every final encode invocation.
    #[serde(default = "default_global_flags")]
    pub global_flags: String,

    /// Loudness-normalization filter. Targets chosen for speech clips
    /// sourced from broadcast material, which tends to sit well below
    /// the loudness voice-assistant playback expects.
    #[serde(default = "default_normalize_filter")]
    pub normalize_filter: String,

    /// Cleanup chain applied before silence detection to improve its
    /// accuracy on noisy recordings.
    #[serde(default = "default_pass_filter")]
    pub pass_filter: String,

    /// Silence-detection filter. The metadata-print element routes the
    /// detection events to the diagnostic stream where the parser
    /// expects them.
    #[serde(default = "default_silence_detect_filter")]
    pub silence_detect_filter: String,

    /// Seconds of padding applied around detected silence boundaries.
    /// Detected edges are imprecise; too small cuts into voices, too
    /// big leaves most of the silence in place.
    #[serde(default = "default_silence_compensate")]
    pub silence_compensate: f64,
}

fn default_encoder() -> String {
    "ffmpeg".to_string()
}

fn default_global_flags() -> String {
    "-hide_banner -nostdin -y".to_string()
}

fn default_normalize_filter() -> String {
    "loudnorm=I=-18:TP=-2:LRA=11".to_string()
}

fn default_pass_filter() -> String {
    "highpass=f=200,lowpass=f=3000,afftdn=nf=-25".to_string()
}

fn default_silence_detect_filter() -> String {
    "silencedetect=noise=-35dB:d=0.5,ametadata=print:file=-".to_string()
}

fn default_silence_compensate() -> f64 {
    0.2
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            encoder: default_encoder(),
            global_flags: default_global_flags(),
            normalize_filter: default_normalize_filter(),
            pass_filter: default_pass_filter(),
            silence_detect_filter: default_silence_detect_filter(),
            silence_compensate: default_silence_compensate(),
        }
    }
}

impl EncoderConfig {
    /// The composed filter chain used by the silence-detection pass:
    /// the cleanup chain followed by the detection filter.
    pub fn silence_chain(&self) -> String {
        if self.pass_filter.is_empty() {
            self.silence_detect_filter.clone()
        } else {
            format!("{},{}", self.pass_filter, self.silence_detect_filter)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg: EncoderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.encoder, "ffmpeg");
        assert!(cfg.normalize_filter.starts_with("loudnorm="));
        assert!(cfg.silence_compensate > 0.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = serde_json::from_str::<EncoderConfig>(r#"{"encodr": "ffmpeg"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn silence_chain_composes_both_filters() {
        let cfg = EncoderConfig::default();
        let chain = cfg.silence_chain();
        assert!(chain.starts_with(&cfg.pass_filter));
        assert!(chain.ends_with(&cfg.silence_detect_filter));
    }

    #[test]
    fn silence_chain_without_pass_filter() {
        let cfg = EncoderConfig {
            pass_filter: String::new(),
            ..EncoderConfig::default()
        };
        assert_eq!(cfg.silence_chain(), cfg.silence_detect_filter);
    }

    #[test]
    fn config_round_trips() {
        let cfg = EncoderConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed: EncoderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.encoder, cfg.encoder);
        assert_eq!(parsed.silence_compensate, cfg.silence_compensate);
    }
}
