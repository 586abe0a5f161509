/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// Ownership operation result
pub type OwnershipResult<T> = Result<T, OwnershipError>;

/// Errors surfaced by the ownership handles
///
/// Stale weak observers are not errors: `lock()` hands back an empty
/// `SharedOwner` instead.
#[derive(Error, Debug, Clone, Serialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum OwnershipError {
    #[error("Allocation failed: {size} bytes with alignment {align}")]
    #[diagnostic(
        code(ownership::allocation_failed),
        help("The global allocator refused the request. Nothing was left half-constructed.")
    )]
    AllocationFailed { size: usize, align: usize },

    #[error("{kind} handle is empty")]
    #[diagnostic(
        code(ownership::empty_handle),
        help("The handle owns nothing. It was moved from, reset, or created empty.")
    )]
    EmptyHandle { kind: &'static str },
}

impl OwnershipError {
    /// Build an allocation error from the layout that could not be satisfied
    #[inline]
    pub fn allocation_failed(layout: std::alloc::Layout) -> Self {
        Self::AllocationFailed {
            size: layout.size(),
            align: layout.align(),
        }
    }

    /// Whether the error came from the allocator
    #[inline]
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}
