//! Logging and tracing infrastructure for filesift.
//!
//! Structured logging via the tracing crate with env-filter support and an
//! optional JSON output mode.

use std::sync::Once;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber.
///
/// Called once at program startup; subsequent calls are ignored. The filter
/// defaults to `warn` and is overridden by `RUST_LOG` or `default_level`.
pub fn init_tracing(default_level: &str) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let fmt_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    });
}

/// Initialize tracing with JSON output for structured logging.
pub fn init_tracing_json(default_level: &str) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let fmt_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    });
}
