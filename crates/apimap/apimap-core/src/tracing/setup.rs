//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::DEFAULT_LOG_FILTER;

static INIT: Once = Once::new();

/// Initialize the apimap tracing/logging system.
///
/// `directive` uses `EnvFilter` syntax, e.g. `apimap=debug` or
/// `apimap_analysis::walker=trace,warn`. A bare level such as `debug` is
/// scoped to the apimap crates. The filter is never read from the
/// environment.
///
/// Falls back to `apimap=warn` if `directive` is empty or invalid.
/// Output goes to stderr so stdout stays reserved for reports.
///
/// Idempotent: later calls are no-ops.
pub fn init_tracing(directive: &str) {
    INIT.call_once(|| {
        let filter = build_filter(directive);

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

/// Build the filter for `directive`, expanding bare levels.
pub fn build_filter(directive: &str) -> EnvFilter {
    let directive = directive.trim();
    if directive.is_empty() {
        return EnvFilter::new(DEFAULT_LOG_FILTER);
    }
    let expanded = match directive {
        // Target directives match by prefix, so `apimap` covers every crate.
        "error" | "warn" | "info" | "debug" | "trace" | "off" => format!("apimap={}", directive),
        other => other.to_string(),
    };
    EnvFilter::try_new(expanded).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
