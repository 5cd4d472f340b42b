//! Logging bootstrap.
//!
//! The library logs through `tracing` everywhere; the binary installs
//! one global subscriber at startup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG`, falling back to `default_filter`. Output goes
/// to stderr so batch summaries on stdout stay clean. Should be called
/// once at application startup.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
