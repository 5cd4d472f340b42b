//! Layered config loading: base document plus optional override.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use super::settings::EncoderConfig;

/// Base configuration file name. Required.
pub const DEFAULT_CONFIG_FILE: &str = "default_config.json";

/// User override file name. Optional; its keys win over the base.
pub const USER_CONFIG_FILE: &str = "config.json";

/// Errors that can occur while loading configuration.
///
/// All of these are fatal: the pipeline refuses to start without a
/// valid configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] io::Error),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("base config not found: {0}")]
    NotFound(PathBuf),

    #[error("config document {0} must be a JSON object")]
    NotAnObject(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load the layered configuration from `dir`.
///
/// Reads `default_config.json` (missing or malformed is fatal), then,
/// if `config.json` exists next to it, merges the override key-wise
/// over the base: override keys replace base keys outright, unset keys
/// fall back to the base document.
pub fn load_layered(dir: &Path) -> ConfigResult<EncoderConfig> {
    let base_path = dir.join(DEFAULT_CONFIG_FILE);
    if !base_path.is_file() {
        return Err(ConfigError::NotFound(base_path));
    }
    let mut document = read_document(&base_path)?;

    let user_path = dir.join(USER_CONFIG_FILE);
    if user_path.is_file() {
        tracing::info!(
            "{} keys will override their counterparts in {}",
            USER_CONFIG_FILE,
            DEFAULT_CONFIG_FILE
        );
        let overrides = read_document(&user_path)?;
        merge_documents(&mut document, overrides);
    }

    serde_json::from_value(Value::Object(document)).map_err(|source| ConfigError::Parse {
        path: base_path,
        source,
    })
}

/// Read one config file as a JSON object.
fn read_document(path: &Path) -> ConfigResult<serde_json::Map<String, Value>> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject(path.to_path_buf())),
    }
}

/// Key-wise shallow merge: every override key replaces the base key.
fn merge_documents(base: &mut serde_json::Map<String, Value>, overrides: serde_json::Map<String, Value>) {
    for (key, value) in overrides {
        base.insert(key, value);
    }
}
