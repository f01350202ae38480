//! Logging setup for the namesieve binary.
//!
//! Logs go to stderr so that JSON documents written to stdout stay clean.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with a default filter.
///
/// Sets up tracing-subscriber with:
/// - Environment filter (RUST_LOG), falling back to `default_filter`
/// - Compact format on stderr
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
