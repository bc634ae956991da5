// src/infra/logger.rs — Structured logging with tracing

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Filter precedence: LESSONSMITH_LOG, then RUST_LOG, then the given default.
pub fn init_logging(default_level: &str) {
    let filter = std::env::var("LESSONSMITH_LOG")
        .ok()
        .and_then(|v| v.parse::<EnvFilter>().ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
