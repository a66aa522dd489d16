//! Startup helpers.

use crate::config::Config;

/// Sets up the tracing subscriber, honoring `RUST_LOG` over the configured
/// level.
pub fn setup_logging(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.clone()));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
