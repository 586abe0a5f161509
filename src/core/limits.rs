/*!
 * Ownership Limits and Constants
 *
 * Centralized location for reference-count bounds and tracing defaults.
 */

// =============================================================================
// REFERENCE COUNT LIMITS
// =============================================================================

/// Highest strong or weak count a control block will hold
/// Incrementing past this aborts the process, matching `std::rc::Rc`
/// [SECURITY] A wrapped counter would free a payload that is still referenced
pub const MAX_REF_COUNT: usize = isize::MAX as usize;

/// Strong count of a freshly allocated control block
pub const INITIAL_STRONG_COUNT: usize = 1;

/// Weak count of a freshly allocated control block
pub const INITIAL_WEAK_COUNT: usize = 0;

// =============================================================================
// TRACING DEFAULTS
// =============================================================================

/// Filter used when neither `RUST_LOG` nor `OWNERSHIP_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Environment variable enabling JSON trace output
pub const TRACE_JSON_ENV: &str = "OWNERSHIP_TRACE_JSON";

/// Environment variable holding the fallback log filter
pub const LOG_FILTER_ENV: &str = "OWNERSHIP_LOG";
