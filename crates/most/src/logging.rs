// File: src/logging.rs
// Purpose: tracing subscriber setup for binaries

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Installs a `fmt` subscriber
///
/// `RUST_LOG` wins over the configured level. A subscriber that is already
/// installed is left in place.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
