/*!
 * Structured Tracing
 * Subscriber setup for ownership lifecycle events using the tracing crate
 */

use crate::core::config::{TraceConfig, TraceFormat};
use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize structured tracing from the environment
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: OWNERSHIP_LOG, then info)
/// - OWNERSHIP_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() -> bool {
    init_tracing_with(&TraceConfig::from_env())
}

/// Initialize structured tracing with an explicit configuration
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing_with(config: &TraceConfig) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match config.format {
        TraceFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
            .is_ok(),
        TraceFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .is_ok(),
    };

    if installed {
        info!(json = config.is_json(), "Structured tracing initialized");
    }
    installed
}
