//! Logging setup
//!
//! Diagnostics go to stderr so stdout only carries the alarm's status lines.
//! Set `DEBUG_LOGGING=1` to enable debug output for the chime crates.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        "warn,chime=debug,chime_cli=debug,chime_core=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Safe to call once per process.
pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let filter = EnvFilter::new(filter_directive(debug_logging));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    tracing::debug!(debug_logging, "logging initialized");
}
