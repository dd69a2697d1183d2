pub use tracing::{debug, error, info, instrument, trace, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

fn env_filter() -> (EnvFilter, bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let is_debug = env_filter.to_string().contains("debug") ||
                   std::env::var("RUST_LOG").unwrap_or_default().contains("debug");

    (env_filter, is_debug)
}

/// Installs the global subscriber, failing if one is already set.
pub fn try_init() -> Result<(), TryInitError> {
    let (env_filter, is_debug) = env_filter();

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(if is_debug {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
}

/// # Panics
///
/// Panics if a global subscriber was already installed.
pub fn init() {
    if let Err(e) = try_init() {
        panic!("failed to install tracing subscriber: {}", e);
    }
}
