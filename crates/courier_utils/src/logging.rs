//! Logging initialization.
//!
//! Maps the configured `log.level` string onto a global tracing subscriber.

use tracing::level_filters::LevelFilter;

/// Initialize tracing at the given severity.
///
/// Unknown level strings fall back to `info`. Uses `try_init` so tests and
/// embedding applications can call this multiple times without panicking.
pub fn init(default_level: &str) {
    let filter = match default_level.to_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "error" => LevelFilter::ERROR,
        "warn" | "warning" => LevelFilter::WARN,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        _ => LevelFilter::INFO,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .try_init();
}
