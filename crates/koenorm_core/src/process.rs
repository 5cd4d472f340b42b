//! External encoder invocation.
//!
//! Single choke point for spawning the configured encoder. The
//! detection and measurement passes read the tool's diagnostic text;
//! the final encode pass discards all output and is judged by exit
//! status alone.

use std::io;
use std::process::Command;

use thiserror::Error;

/// Captured text streams from one encoder invocation.
#[derive(Debug)]
pub struct EncoderOutput {
    /// Captured stdout (metadata-print stream).
    pub stdout: String,
    /// Captured stderr (the tool's log channel).
    pub stderr: String,
    /// Whether the process exited successfully.
    pub success: bool,
}

/// Errors from spawning or running the external encoder.
#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with code {exit_code}: {detail}")]
    Exited {
        tool: String,
        exit_code: i32,
        detail: String,
    },
}

/// Run the encoder and capture both text streams.
///
/// A non-zero exit is logged but not an error here: the diagnostic
/// passes parse whatever the tool emitted, and a genuinely unreadable
/// file surfaces as missing markers or missing stats downstream.
pub fn capture_diagnostics(encoder: &str, args: &[String]) -> Result<EncoderOutput, EncoderError> {
    tracing::debug!("running: {} {}", encoder, args.join(" "));

    let output = Command::new(encoder)
        .args(args)
        .output()
        .map_err(|source| EncoderError::Spawn {
            tool: encoder.to_string(),
            source,
        })?;

    if !output.status.success() {
        tracing::warn!(
            "{} exited with code {:?} during a diagnostic pass",
            encoder,
            output.status.code()
        );
    }

    Ok(EncoderOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    })
}

/// Run the encoder, discard its output, and require a successful exit.
pub fn run_discarding(encoder: &str, args: &[String]) -> Result<(), EncoderError> {
    tracing::debug!("running: {} {}", encoder, args.join(" "));

    let output = Command::new(encoder)
        .args(args)
        .output()
        .map_err(|source| EncoderError::Spawn {
            tool: encoder.to_string(),
            source,
        })?;

    if !output.status.success() {
        let detail: String = String::from_utf8_lossy(&output.stderr)
            .chars()
            .take(500)
            .collect();
        return Err(EncoderError::Exited {
            tool: encoder.to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            detail,
        });
    }

    Ok(())
}
