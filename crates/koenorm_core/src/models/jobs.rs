//! Per-file job structures.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::enums::TargetCodec;
use crate::config::EncoderConfig;

/// One discovered audio file: its path plus its position relative to
/// the input root, used to mirror the directory structure into the
/// output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    /// Full path of the source file.
    pub path: PathBuf,
    /// Path relative to the input root.
    pub relative: PathBuf,
}

impl AudioFile {
    /// Create an audio file entry for `path` discovered under `input_root`.
    ///
    /// Falls back to the bare file name when `path` is not under the
    /// root (the batch driver never produces such entries; this keeps
    /// hand-built jobs from panicking).
    pub fn new(path: PathBuf, input_root: &Path) -> Self {
        let relative = path
            .strip_prefix(input_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(path.file_name().unwrap_or_default()));
        Self { path, relative }
    }

    /// Mirrored output path: the relative position under `dest_root`
    /// with the extension replaced by the target codec's.
    pub fn output_path(&self, dest_root: &Path, codec: TargetCodec) -> PathBuf {
        dest_root.join(&self.relative).with_extension(codec.extension())
    }
}

/// Full parameter tuple for one worker invocation.
///
/// Jobs are independent: no shared mutable state, no ordering
/// requirement between them. One job produces exactly one output file
/// or one logged failure.
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// The file to process.
    pub file: AudioFile,
    /// Codec to encode into.
    pub codec: TargetCodec,
    /// Root of the mirrored output tree.
    pub dest_root: PathBuf,
    /// Quality arguments for the final pass.
    pub quality: String,
    /// Shared encoder configuration.
    pub config: Arc<EncoderConfig>,
    /// Run the loudness measurement + normalization passes.
    pub normalize: bool,
    /// Run silence detection and trim the window.
    pub trim_silence: bool,
}
