/*!
 * Ownership Core Library
 * Exclusive, shared, and weak ownership handles with lifecycle tracing
 */

pub mod core;
pub mod monitoring;
pub mod ownership;

// Re-exports
pub use crate::core::errors::{OwnershipError, OwnershipResult};
pub use crate::core::{TraceConfig, TraceFormat};
pub use monitoring::{init_tracing, init_tracing_with, OwnershipStats};
pub use ownership::{BlockState, ExclusiveOwner, Handle, RefCounted, SharedOwner, WeakObserver};
