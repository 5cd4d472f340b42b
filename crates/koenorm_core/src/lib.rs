//! koenorm core - batch loudness normalization and silence trimming.
//!
//! This crate contains all business logic with zero CLI dependencies.
//! The pipeline walks a directory of speech clips and, per file, runs
//! the external encoder three times: silence detection, loudness
//! measurement, and the final normalize-and-encode pass into a
//! mirrored output tree.

pub mod batch;
pub mod config;
pub mod encode;
pub mod logging;
pub mod loudness;
pub mod models;
pub mod pipeline;
pub mod process;
pub mod silence;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
