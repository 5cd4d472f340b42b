//! Loudness measurement invocation and output recovery.

use std::path::Path;

use serde_json::Value;

use crate::config::EncoderConfig;
use crate::pipeline::{JobError, JobResult};
use crate::process;
use crate::silence::SilenceWindow;

use super::stats::{clamp_measurement, LoudnessStats};

/// First key of the statistics block; everything before it is banner
/// text the tool prints on the same stream.
const STATS_KEY: &str = "\"input_i\"";

/// Every field the measurement is expected to report. All nine are
/// validated and clamped even though only five feed the final pass.
const MEASURED_FIELDS: [&str; 9] = [
    "input_i",
    "input_tp",
    "input_lra",
    "input_thresh",
    "output_i",
    "output_tp",
    "output_lra",
    "output_thresh",
    "target_offset",
];

/// Measure the loudness of one file over its trim window.
///
/// A missing statistics block or malformed JSON fails this file only;
/// the caller catches it at the job boundary.
pub fn measure_loudness(
    file: &Path,
    window: Option<&SilenceWindow>,
    config: &EncoderConfig,
) -> JobResult<LoudnessStats> {
    let mut args = vec!["-hide_banner".to_string()];
    if let Some(window) = window {
        args.extend(window.seek_args());
    }
    args.extend([
        "-i".to_string(),
        file.display().to_string(),
        "-af".to_string(),
        format!("{}:print_format=json", config.normalize_filter),
        "-f".to_string(),
        "null".to_string(),
        "-".to_string(),
    ]);

    let output = process::capture_diagnostics(&config.encoder, &args)?;
    stats_from_diagnostics(&output.stderr)
}

/// Recover and parse the statistics block from diagnostic text.
///
/// The tool prefixes its structured output with banner text; the block
/// is located by its first key and cut at the closing brace.
pub fn stats_from_diagnostics(text: &str) -> JobResult<LoudnessStats> {
    let key_index = text.find(STATS_KEY).ok_or(JobError::MissingStats)?;
    let body = &text[key_index..];
    let close = body
        .find('}')
        .ok_or_else(|| JobError::parse("loudness JSON", "no closing brace after statistics key"))?;
    let fragment = format!("{{{}", &body[..=close]);

    let value: Value = serde_json::from_str(&fragment)
        .map_err(|e| JobError::parse("loudness JSON", e.to_string()))?;

    let mut fields = [0.0_f64; MEASURED_FIELDS.len()];
    for (slot, key) in fields.iter_mut().zip(MEASURED_FIELDS) {
        *slot = measured_field(&value, key)?;
    }
    let [input_i, input_tp, input_lra, input_thresh, _, _, _, _, target_offset] = fields;

    Ok(LoudnessStats {
        integrated: input_i,
        true_peak: input_tp,
        range: input_lra,
        threshold: input_thresh,
        target_offset,
    })
}

/// Extract one numeric field, accepting the tool's string-encoded
/// numbers (including literal `inf`/`-inf`) and clamping infinities.
fn measured_field(value: &Value, key: &str) -> JobResult<f64> {
    let field = value
        .get(key)
        .ok_or_else(|| JobError::parse("loudness JSON", format!("missing field {:?}", key)))?;

    let number = match field {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(v) if !v.is_nan() => Ok(clamp_measurement(v)),
        _ => Err(JobError::parse(
            "loudness JSON",
            format!("field {:?} is not a usable number: {}", key, field),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_output(input_i: &str, input_tp: &str) -> String {
        format!(
            concat!(
                "size=N/A time=00:00:04.25 bitrate=N/A speed= 112x\n",
                "[Parsed_loudnorm_0 @ 0x55d1c3a0] \n{{\n",
                "\t\"input_i\" : \"{}\",\n",
                "\t\"input_tp\" : \"{}\",\n",
                "\t\"input_lra\" : \"4.30\",\n",
                "\t\"input_thresh\" : \"-34.42\",\n",
                "\t\"output_i\" : \"-17.93\",\n",
                "\t\"output_tp\" : \"-2.00\",\n",
                "\t\"output_lra\" : \"3.90\",\n",
                "\t\"output_thresh\" : \"-28.28\",\n",
                "\t\"normalization_type\" : \"dynamic\",\n",
                "\t\"target_offset\" : \"0.58\"\n",
                "}}\n"
            ),
            input_i, input_tp
        )
    }

    #[test]
    fn statistics_block_is_recovered_from_banner_text() {
        let stats = stats_from_diagnostics(&sample_output("-23.59", "-7.11")).unwrap();
        assert_eq!(stats.integrated, -23.59);
        assert_eq!(stats.true_peak, -7.11);
        assert_eq!(stats.range, 4.30);
        assert_eq!(stats.threshold, -34.42);
        assert_eq!(stats.target_offset, 0.58);
    }

    #[test]
    fn negative_infinity_clamps_to_minus_99() {
        let stats = stats_from_diagnostics(&sample_output("-inf", "-7.11")).unwrap();
        assert_eq!(stats.integrated, -99.0);
    }

    #[test]
    fn positive_infinity_clamps_to_zero() {
        let stats = stats_from_diagnostics(&sample_output("-23.59", "inf")).unwrap();
        assert_eq!(stats.true_peak, 0.0);
    }

    #[test]
    fn missing_statistics_key_is_its_own_error() {
        let result = stats_from_diagnostics("just banner noise\n");
        assert!(matches!(result, Err(JobError::MissingStats)));
    }

    #[test]
    fn missing_field_is_a_parse_error() {
        let text = "{\"input_i\" : \"-23.59\"}";
        let result = stats_from_diagnostics(text);
        assert!(matches!(result, Err(JobError::Parse { .. })));
    }

    #[test]
    fn nan_field_is_a_parse_error() {
        let result = stats_from_diagnostics(&sample_output("nan", "-7.11"));
        assert!(matches!(result, Err(JobError::Parse { .. })));
    }

    #[test]
    fn unquoted_numbers_are_accepted() {
        let text = "{\"input_i\" : -23.5, \"input_tp\" : -7.0, \"input_lra\" : 4.0, \
                    \"input_thresh\" : -34.0, \"output_i\" : -18.0, \"output_tp\" : -2.0, \
                    \"output_lra\" : 3.9, \"output_thresh\" : -28.0, \"target_offset\" : 0.5}";
        let stats = stats_from_diagnostics(text).unwrap();
        assert_eq!(stats.integrated, -23.5);
    }
}
