//! Data models for the batch pipeline.
//!
//! - Target codec enum with per-codec output extension and quality defaults
//! - Audio file identity (path plus position under the input root)
//! - The per-file job parameter tuple dispatched to workers

mod enums;
mod jobs;

pub use enums::TargetCodec;
pub use jobs::{AudioFile, BatchJob};
