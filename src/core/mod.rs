/*!
 * Core Module
 * Error handling, limits, and configuration shared by every handle
 */

pub mod config;
pub mod errors;
pub mod limits;

// Re-export for convenience
pub use config::{TraceConfig, TraceFormat};
pub use errors::*;
