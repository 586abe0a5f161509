/*!
 * Tracing Configuration
 *
 * Runtime configuration for log output selection
 */

use super::limits::{DEFAULT_LOG_FILTER, LOG_FILTER_ENV, TRACE_JSON_ENV};

/// Output format for the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceFormat {
    /// Human-readable compact lines
    Compact,
    /// One JSON object per event
    Json,
}

/// Tracing configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceConfig {
    /// Output format
    pub format: TraceFormat,
    /// Filter directive used when `RUST_LOG` is unset
    pub default_filter: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            format: TraceFormat::Compact,
            default_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl TraceConfig {
    /// Read configuration from the environment
    ///
    /// Environment variables:
    /// - OWNERSHIP_TRACE_JSON: `1` or `true` enables JSON output (default: false)
    /// - OWNERSHIP_LOG: fallback filter when RUST_LOG is unset (default: info)
    pub fn from_env() -> Self {
        let json = std::env::var(TRACE_JSON_ENV)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let default_filter = std::env::var(LOG_FILTER_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            format: if json {
                TraceFormat::Json
            } else {
                TraceFormat::Compact
            },
            default_filter,
        }
    }

    /// Configuration for verbose lifecycle tracing
    pub fn verbose() -> Self {
        Self {
            format: TraceFormat::Compact,
            default_filter: "ownership_core=trace".to_string(),
        }
    }

    #[inline]
    pub fn with_format(mut self, format: TraceFormat) -> Self {
        self.format = format;
        self
    }

    #[inline]
    pub fn is_json(&self) -> bool {
        self.format == TraceFormat::Json
    }
}
