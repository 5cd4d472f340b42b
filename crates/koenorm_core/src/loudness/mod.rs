//! Loudness measurement pass.
//!
//! Runs the normalization filter in measurement mode against a null
//! output, recovers the JSON statistics block from the diagnostic
//! stream, and renders the measured values back into filter arguments
//! for the final pass.

mod measurer;
mod stats;

pub use measurer::{measure_loudness, stats_from_diagnostics};
pub use stats::LoudnessStats;
