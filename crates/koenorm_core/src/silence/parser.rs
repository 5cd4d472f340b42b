//! Marker/value grammar over the encoder's diagnostic text.
//!
//! The detection filter prints lines such as
//! `lavfi.silence_end=0.541813`; the detector element itself logs
//! `silence_end: 0.541813 | silence_duration: ...`. Both spellings are
//! accepted: a marker name, `=` or `:`, optional whitespace, then a
//! value token running to the next whitespace.
//!
//! A value token that is literally `0` is the tool's convention for a
//! zero-duration detection event carrying no timestamp payload; it is
//! an explicit "no value" outcome here, never the number zero.

use std::sync::OnceLock;

use regex::Regex;

/// Which detection marker to scan for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    SilenceStart,
    SilenceEnd,
}

impl Marker {
    /// Marker name as it appears in the diagnostic text.
    pub fn name(&self) -> &'static str {
        match self {
            Marker::SilenceStart => "silence_start",
            Marker::SilenceEnd => "silence_end",
        }
    }

    fn regex(&self) -> &'static Regex {
        static START_RE: OnceLock<Regex> = OnceLock::new();
        static END_RE: OnceLock<Regex> = OnceLock::new();

        let cell = match self {
            Marker::SilenceStart => &START_RE,
            Marker::SilenceEnd => &END_RE,
        };
        cell.get_or_init(|| {
            Regex::new(&format!(r"{}\s*[:=][ \t]*(\S*)", self.name()))
                .expect("marker pattern is valid")
        })
    }
}

/// Outcome of extracting one marker's timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerValue {
    /// The marker does not occur in the text.
    Absent,
    /// The marker occurs with the zero-duration sentinel payload.
    NoValue,
    /// A parsed timestamp in seconds.
    Seconds(f64),
    /// The value token was not a number; logged, treated as no value.
    Invalid,
}

impl MarkerValue {
    /// The timestamp, when one was parsed.
    pub fn seconds(self) -> Option<f64> {
        match self {
            MarkerValue::Seconds(v) => Some(v),
            _ => None,
        }
    }
}

/// Value of the first occurrence of `marker` in `text`.
pub fn first_value(text: &str, marker: Marker) -> MarkerValue {
    match marker.regex().captures(text) {
        Some(caps) => token_value(marker, &caps[1]),
        None => MarkerValue::Absent,
    }
}

/// Value of the last occurrence of `marker` in `text`.
pub fn last_value(text: &str, marker: Marker) -> MarkerValue {
    match marker.regex().captures_iter(text).last() {
        Some(caps) => token_value(marker, &caps[1]),
        None => MarkerValue::Absent,
    }
}

/// Classify one captured value token.
fn token_value(marker: Marker, token: &str) -> MarkerValue {
    if token == "0" {
        return MarkerValue::NoValue;
    }
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => MarkerValue::Seconds(v),
        _ => {
            tracing::warn!(
                "malformed value after {} marker: {:?}",
                marker.name(),
                token
            );
            MarkerValue::Invalid
        }
    }
}
