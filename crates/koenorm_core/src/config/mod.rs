//! Layered JSON configuration for the encoder pipeline.
//!
//! Two documents in one directory: `default_config.json` (required)
//! and `config.json` (optional). The override document may supply any
//! subset of keys; they replace their counterparts in the base
//! document key by key, with no deep merge.
//!
//! # Example
//!
//! ```no_run
//! use koenorm_core::config;
//!
//! let cfg = config::load_layered(std::path::Path::new(".")).unwrap();
//! println!("encoder: {}", cfg.encoder);
//! ```

mod loader;
mod settings;

pub use loader::{load_layered, ConfigError, ConfigResult, DEFAULT_CONFIG_FILE, USER_CONFIG_FILE};
pub use settings::EncoderConfig;
