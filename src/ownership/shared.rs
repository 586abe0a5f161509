/*!
 * Shared Ownership
 *
 * Reference-counted handle; the payload dies with the last strong reference
 */

use super::alloc::boxed;
use super::control::{BlockState, ControlBlock};
use super::exclusive::ExclusiveOwner;
use super::traits::{Handle, RefCounted};
use super::weak::WeakObserver;
use crate::core::errors::OwnershipResult;
use std::alloc::{handle_alloc_error, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::ptr::NonNull;

/// Payload pointer and control block, always present or absent together
pub(crate) struct SharedParts<T> {
    pub(crate) payload: NonNull<T>,
    pub(crate) block: NonNull<ControlBlock<T>>,
}

impl<T> Clone for SharedParts<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SharedParts<T> {}

/// Strong, clonable handle to a reference-counted payload
///
/// Every clone holds one strong reference. Dropping the last one destroys the
/// payload; the control block stays around for as long as `WeakObserver`s
/// point at it.
///
/// # Example
///
/// ```
/// use ownership_core::SharedOwner;
///
/// let a = SharedOwner::new(42);
/// let b = a.clone();
/// assert_eq!(a.use_count(), 2);
/// drop(b);
/// assert_eq!(a.use_count(), 1);
/// ```
///
/// Counts are not atomic, so the handle never crosses threads:
///
/// ```compile_fail,E0277
/// use ownership_core::SharedOwner;
///
/// let a = SharedOwner::new(42);
/// std::thread::spawn(move || drop(a));
/// ```
///
/// ```compile_fail,E0277
/// use ownership_core::SharedOwner;
///
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<SharedOwner<u32>>();
/// ```
pub struct SharedOwner<T> {
    parts: Option<SharedParts<T>>,
    _owns: PhantomData<T>,
}

impl<T> SharedOwner<T> {
    /// Handle that owns nothing
    #[inline]
    pub const fn empty() -> Self {
        Self {
            parts: None,
            _owns: PhantomData,
        }
    }

    /// Allocate `value` under a fresh control block
    pub fn new(value: T) -> Self {
        Self::from_box(boxed(value))
    }

    /// Allocate `value` under a fresh control block, reporting allocator failure
    ///
    /// Either both allocations succeed or nothing is left behind.
    pub fn try_new(value: T) -> OwnershipResult<Self> {
        let payload = super::alloc::try_box(value)?;
        Self::try_from_box(payload)
    }

    /// Adopt a heap payload under a fresh control block
    pub fn from_box(payload: Box<T>) -> Self {
        match Self::try_from_box(payload) {
            Ok(shared) => shared,
            Err(_) => handle_alloc_error(Layout::new::<ControlBlock<T>>()),
        }
    }

    /// Adopt a heap payload, reporting control block allocation failure
    ///
    /// On failure the payload is destroyed along with the error.
    pub fn try_from_box(payload: Box<T>) -> OwnershipResult<Self> {
        let (block, payload) = ControlBlock::try_allocate(payload)?;
        Ok(Self::from_parts(Some(SharedParts { payload, block })))
    }

    /// Adopt a raw payload pointer
    ///
    /// A null pointer yields an empty handle.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `Box::into_raw` (for instance on a box handed out
    /// by `ExclusiveOwner::release`) and nothing else may own it. Wrapping the
    /// same pointer twice builds two unrelated control blocks that will both
    /// destroy the payload; this is not detected.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        if ptr.is_null() {
            return Self::empty();
        }
        Self::from_box(Box::from_raw(ptr))
    }

    /// Wrap parts whose strong reference the caller already owns
    #[inline]
    pub(crate) fn from_parts(parts: Option<SharedParts<T>>) -> Self {
        Self {
            parts,
            _owns: PhantomData,
        }
    }

    #[inline]
    fn block(&self) -> Option<&ControlBlock<T>> {
        // SAFETY: our strong reference keeps the block live
        self.parts.as_ref().map(|p| unsafe { p.block.as_ref() })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_none()
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        // SAFETY: strong > 0 while we hold a reference, so the payload is alive
        self.parts.as_ref().map(|p| unsafe { p.payload.as_ref() })
    }

    /// Mutable access, only while this is the single handle of any kind
    pub fn get_mut(&mut self) -> Option<&mut T> {
        let parts = self.parts?;
        // SAFETY: block is live while we hold a strong reference
        let block = unsafe { parts.block.as_ref() };
        if block.strong() == 1 && block.weak() == 0 {
            // SAFETY: no other SharedOwner or WeakObserver can reach the payload
            Some(unsafe { &mut *parts.payload.as_ptr() })
        } else {
            None
        }
    }

    /// Current strong count, 0 for an empty handle
    ///
    /// Diagnostic only.
    #[inline]
    pub fn use_count(&self) -> usize {
        self.block().map_or(0, ControlBlock::strong)
    }

    /// Current weak count, 0 for an empty handle
    #[inline]
    pub fn weak_count(&self) -> usize {
        self.block().map_or(0, ControlBlock::weak)
    }

    #[inline]
    pub fn is_unique(&self) -> bool {
        self.use_count() == 1
    }

    /// Weak observer of the same control block
    ///
    /// An empty handle yields an empty observer.
    pub fn get_weak(&self) -> WeakObserver<T> {
        match self.parts {
            Some(parts) => {
                // SAFETY: block is live while we hold a strong reference
                unsafe { parts.block.as_ref() }.acquire_weak();
                WeakObserver::from_block(Some(parts.block))
            }
            None => WeakObserver::new(),
        }
    }

    /// Alias of [`SharedOwner::get_weak`]
    #[inline]
    pub fn downgrade(&self) -> WeakObserver<T> {
        self.get_weak()
    }

    /// Move ownership out, leaving `self` empty with counts unchanged
    #[inline]
    pub fn take(&mut self) -> Self {
        Self::from_parts(self.parts.take())
    }

    /// Drop this strong reference now and become empty
    #[inline]
    pub fn reset(&mut self) {
        drop(self.take());
    }

    /// Whether both handles share one control block (or are both empty)
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self.parts, other.parts) {
            (Some(a), Some(b)) => a.block == b.block,
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Clone for SharedOwner<T> {
    fn clone(&self) -> Self {
        if let Some(block) = self.block() {
            block.acquire_strong();
        }
        Self::from_parts(self.parts)
    }
}

impl<T> Drop for SharedOwner<T> {
    fn drop(&mut self) {
        if let Some(parts) = self.parts.take() {
            // SAFETY: we own one strong reference to a live block
            unsafe { ControlBlock::release_strong(parts.block) };
        }
    }
}

impl<T> Default for SharedOwner<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<ExclusiveOwner<T>> for SharedOwner<T> {
    fn from(owner: ExclusiveOwner<T>) -> Self {
        match owner.into_shared() {
            Ok(shared) => shared,
            Err(_) => handle_alloc_error(Layout::new::<ControlBlock<T>>()),
        }
    }
}

impl<T> From<Box<T>> for SharedOwner<T> {
    fn from(payload: Box<T>) -> Self {
        Self::from_box(payload)
    }
}

impl<T> Deref for SharedOwner<T> {
    type Target = T;

    /// # Panics
    ///
    /// Panics if the handle is empty.
    #[inline]
    #[track_caller]
    fn deref(&self) -> &T {
        match self.get() {
            Some(value) => value,
            None => panic!("dereferenced an empty SharedOwner"),
        }
    }
}

impl<T> Handle for SharedOwner<T> {
    fn handle_kind(&self) -> &'static str {
        "shared"
    }

    fn is_empty(&self) -> bool {
        self.parts.is_none()
    }
}

impl<T> RefCounted for SharedOwner<T> {
    fn strong_count(&self) -> usize {
        self.use_count()
    }

    fn weak_count(&self) -> usize {
        SharedOwner::weak_count(self)
    }

    fn block_state(&self) -> Option<BlockState> {
        self.block().map(ControlBlock::state)
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedOwner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedOwner")
            .field("value", &self.get())
            .field("strong", &self.use_count())
            .field("weak", &self.weak_count())
            .finish()
    }
}
