/*!
 * Handle Traits
 *
 * Core abstractions shared by the ownership handles
 */

use super::control::BlockState;

/// Core handle trait
///
/// All handles implement this to provide:
/// - Handle kind identification
/// - Emptiness check
pub trait Handle {
    /// Handle kind name for logging/debugging
    fn handle_kind(&self) -> &'static str;

    /// Whether the handle refers to nothing
    fn is_empty(&self) -> bool;
}

/// Handles backed by a control block
///
/// Counts are diagnostic snapshots, never a basis for ownership decisions.
pub trait RefCounted: Handle {
    /// Current strong count, 0 when empty
    fn strong_count(&self) -> usize;

    /// Current weak count, 0 when empty
    fn weak_count(&self) -> usize;

    /// Lifecycle of the referenced block, `None` when empty
    fn block_state(&self) -> Option<BlockState>;

    /// Check if this is the last strong reference
    fn is_last_ref(&self) -> bool {
        self.strong_count() == 1
    }
}
