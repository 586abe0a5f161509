/*!
 * Exclusive Ownership
 *
 * Move-only handle that owns its payload outright, with no control block
 */

use super::alloc::{boxed, try_box};
use super::shared::SharedOwner;
use super::traits::Handle;
use crate::core::errors::{OwnershipError, OwnershipResult};
use crate::monitoring::stats;
use std::fmt;
use std::ops::{Deref, DerefMut};
use tracing::trace;

/// Sole owner of a heap payload
///
/// There is no `Clone`: two owners of one payload can't be expressed.
/// Moving transfers ownership; `take()` does the same while leaving an
/// empty owner behind.
///
/// # Example
///
/// ```
/// use ownership_core::ExclusiveOwner;
///
/// let mut a = ExclusiveOwner::new(String::from("resource"));
/// let b = a.take();
/// assert!(a.is_empty());
/// assert_eq!(*b, "resource");
/// ```
///
/// Copying is rejected at compile time. `a.clone()` alone would auto-deref
/// and clone the `String`, so the bound is spelled out:
///
/// ```compile_fail,E0277
/// use ownership_core::ExclusiveOwner;
///
/// fn duplicate<T: Clone>(owner: &T) -> T {
///     owner.clone()
/// }
///
/// let a = ExclusiveOwner::new(String::from("resource"));
/// let b = duplicate(&a);
/// ```
///
/// With no shared count to race on, the owner is `Send` whenever `T` is.
pub struct ExclusiveOwner<T> {
    payload: Option<Box<T>>,
}

impl<T> ExclusiveOwner<T> {
    /// Owner that holds nothing
    #[inline]
    pub const fn empty() -> Self {
        Self { payload: None }
    }

    /// Allocate `value` and own it
    pub fn new(value: T) -> Self {
        Self::from_box(boxed(value))
    }

    /// Allocate `value` and own it, reporting allocator failure
    pub fn try_new(value: T) -> OwnershipResult<Self> {
        try_box(value).map(Self::from_box)
    }

    /// Adopt an existing heap payload
    #[inline]
    pub fn from_box(payload: Box<T>) -> Self {
        Self {
            payload: Some(payload),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.payload.as_deref()
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.payload.as_deref_mut()
    }

    /// Move ownership out, leaving `self` empty
    #[inline]
    pub fn take(&mut self) -> Self {
        Self {
            payload: self.payload.take(),
        }
    }

    /// Give up ownership without destroying the payload
    #[inline]
    pub fn release(&mut self) -> Option<Box<T>> {
        self.payload.take()
    }

    /// Destroy the current payload (if any) and adopt `payload`
    pub fn reset(&mut self, payload: Option<Box<T>>) {
        let old = std::mem::replace(&mut self.payload, payload);
        destroy(old);
    }

    /// Unwrap the payload by value
    pub fn into_inner(mut self) -> OwnershipResult<T> {
        self.payload
            .take()
            .map(|b| *b)
            .ok_or(OwnershipError::EmptyHandle { kind: "exclusive" })
    }

    /// Hand the payload to a new control block with strong=1
    ///
    /// One-way: nothing converts a `SharedOwner` back. An empty owner becomes
    /// an empty `SharedOwner` without allocating.
    pub fn into_shared(mut self) -> OwnershipResult<SharedOwner<T>> {
        match self.payload.take() {
            Some(payload) => SharedOwner::try_from_box(payload),
            None => Ok(SharedOwner::empty()),
        }
    }
}

fn destroy<T>(payload: Option<Box<T>>) {
    if let Some(payload) = payload {
        drop(payload);
        stats::record_exclusive_payload_destroyed();
        trace!(
            type_name = std::any::type_name::<T>(),
            "exclusive payload destroyed"
        );
    }
}

impl<T> Drop for ExclusiveOwner<T> {
    fn drop(&mut self) {
        destroy(self.payload.take());
    }
}

impl<T> Default for ExclusiveOwner<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Box<T>> for ExclusiveOwner<T> {
    fn from(payload: Box<T>) -> Self {
        Self::from_box(payload)
    }
}

impl<T> Deref for ExclusiveOwner<T> {
    type Target = T;

    /// # Panics
    ///
    /// Panics if the owner is empty.
    #[inline]
    #[track_caller]
    fn deref(&self) -> &T {
        match self.payload.as_deref() {
            Some(value) => value,
            None => panic!("dereferenced an empty ExclusiveOwner"),
        }
    }
}

impl<T> DerefMut for ExclusiveOwner<T> {
    #[inline]
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match self.payload.as_deref_mut() {
            Some(value) => value,
            None => panic!("dereferenced an empty ExclusiveOwner"),
        }
    }
}

impl<T> Handle for ExclusiveOwner<T> {
    fn handle_kind(&self) -> &'static str {
        "exclusive"
    }

    fn is_empty(&self) -> bool {
        self.payload.is_none()
    }
}

impl<T: fmt::Debug> fmt::Debug for ExclusiveOwner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExclusiveOwner").field(&self.get()).finish()
    }
}
