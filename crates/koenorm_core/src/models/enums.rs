//! Target codec selection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Codec the batch re-encodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetCodec {
    Opus,
    Mp3,
    Aac,
    Flac,
}

impl TargetCodec {
    /// Output file extension (no leading dot).
    pub fn extension(&self) -> &'static str {
        match self {
            TargetCodec::Opus => "opus",
            TargetCodec::Mp3 => "mp3",
            TargetCodec::Aac => "aac",
            TargetCodec::Flac => "flac",
        }
    }

    /// Default quality arguments for the final encode pass.
    ///
    /// AAC intentionally ships no default; the encoder's own defaults
    /// vary too much between builds to pick one here.
    pub fn default_quality(&self) -> &'static str {
        match self {
            TargetCodec::Opus => "-map_metadata -1 -application voip -b:a 32k",
            TargetCodec::Mp3 => "-map_metadata -1 -q:a 3",
            TargetCodec::Aac => "",
            TargetCodec::Flac => "-map_metadata -1 -sample_fmt s16",
        }
    }

    /// All selectable codecs.
    pub fn all() -> &'static [TargetCodec] {
        &[
            TargetCodec::Opus,
            TargetCodec::Mp3,
            TargetCodec::Aac,
            TargetCodec::Flac,
        ]
    }
}

impl std::fmt::Display for TargetCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for TargetCodec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "opus" => Ok(TargetCodec::Opus),
            "mp3" => Ok(TargetCodec::Mp3),
            "aac" => Ok(TargetCodec::Aac),
            "flac" => Ok(TargetCodec::Flac),
            other => Err(format!(
                "unknown codec '{}' (expected one of: opus, mp3, aac, flac)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_serializes_lowercase() {
        let json = serde_json::to_string(&TargetCodec::Opus).unwrap();
        assert_eq!(json, "\"opus\"");
    }

    #[test]
    fn codec_parses_case_insensitively() {
        assert_eq!("MP3".parse::<TargetCodec>().unwrap(), TargetCodec::Mp3);
        assert_eq!("flac".parse::<TargetCodec>().unwrap(), TargetCodec::Flac);
        assert!("wma".parse::<TargetCodec>().is_err());
    }

    #[test]
    fn every_codec_has_an_extension() {
        for codec in TargetCodec::all() {
            assert!(!codec.extension().is_empty());
        }
    }
}
