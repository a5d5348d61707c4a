// ==========================================
// Class Assign - logging
// ==========================================
// tracing + tracing-subscriber, level from RUST_LOG
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Env var selecting the output format ("json" or plain text)
pub const LOG_FORMAT_ENV: &str = "CLASS_ASSIGN_LOG_FORMAT";

/// Install the global subscriber
///
/// - RUST_LOG: filter (default: info), e.g. RUST_LOG=class_assign=debug
/// - CLASS_ASSIGN_LOG_FORMAT=json: one JSON object per event
///
/// ```no_run
/// use class_assign::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // stderr keeps stdout free for command output
    if json {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(true)
            .init();
    }
}

/// Debug-level subscriber for tests; safe to call repeatedly
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
