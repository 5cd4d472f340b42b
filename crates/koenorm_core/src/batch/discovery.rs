//! Input discovery and output-tree preparation.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use super::{BatchError, BatchResult};
use crate::models::AudioFile;

/// Audio container formats the pipeline accepts. Matches the formats
/// browsers play back, minus webm (typically video).
pub const SUPPORTED_EXTENSIONS: [&str; 8] =
    ["mp3", "m4a", "aac", "ogg", "oga", "opus", "flac", "wav"];

/// Whether `path` names a file the pipeline can process, judged by
/// extension alone (case-insensitive).
pub fn is_supported_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Recursively discover supported audio files under `input_root`.
///
/// Unsupported files are logged and discarded; unreadable directory
/// entries are logged and skipped rather than aborting the walk.
pub fn discover_audio_files(input_root: &Path) -> Vec<AudioFile> {
    let mut files = Vec::new();

    for entry in WalkDir::new(input_root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if !is_supported_audio_file(entry.path()) {
            tracing::info!("skipping non-audio file: {}", entry.path().display());
            continue;
        }
        files.push(AudioFile::new(entry.path().to_path_buf(), input_root));
    }

    files
}

/// Pre-create the mirrored directory tree under `dest_root`.
///
/// Directories only, no files, and only when the destination does not
/// yet exist; workers must not race to create the same directory.
pub fn mirror_directory_tree(input_root: &Path, dest_root: &Path) -> BatchResult<()> {
    if dest_root.is_dir() {
        return Ok(());
    }

    tracing::info!("creating destination directories under {}", dest_root.display());
    fs::create_dir_all(dest_root)
        .map_err(|e| BatchError::io(format!("creating {}", dest_root.display()), e))?;

    for entry in WalkDir::new(input_root) {
        let entry = entry.map_err(|e| {
            BatchError::io(
                format!("walking {}", input_root.display()),
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("walk error")),
            )
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(input_root)
            .expect("walk stays under its root");
        let mirrored = dest_root.join(relative);
        fs::create_dir_all(&mirrored)
            .map_err(|e| BatchError::io(format!("creating {}", mirrored.display()), e))?;
    }

    Ok(())
}
