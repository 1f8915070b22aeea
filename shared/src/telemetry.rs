//! Tracing setup shared by every binary.

use tracing_subscriber::EnvFilter;

use crate::Config;

/// Install the JSON tracing subscriber.
///
/// Verbosity comes from `RUST_LOG` when set, otherwise from the deployment
/// environment (`debug` outside production, `error` in production).
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(config.log_filter())
        .unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_level()));

    tracing_subscriber::fmt().with_env_filter(filter).json().init();
}
