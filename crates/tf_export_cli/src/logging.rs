//! Log output for the exporters.
//!
//! Standard output carries the generated configuration, so all log output goes
//! to standard error.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

/// Environment variable holding the log filter, such as `debug` or
/// `github_client=trace`.
pub const LOG_ENV_VAR: &str = "TF_EXPORT_LOG";

/// Filter used when the environment variable is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Builds the filter from a directive, falling back to [`DEFAULT_LOG_FILTER`].
pub fn build_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber. Call once, at the start of `main`.
pub fn init() {
    let directive = std::env::var(LOG_ENV_VAR).ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(build_filter(directive.as_deref()))
        .init();
}
