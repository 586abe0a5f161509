/*!
 * Monitoring Module
 * Tracing setup and lifecycle counters
 */

pub mod stats;
pub mod tracer;

pub use stats::{snapshot, OwnershipStats};
pub use tracer::{init_tracing, init_tracing_with};
