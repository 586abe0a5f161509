/*!
 * Weak Observation
 *
 * Non-owning handle that detects destruction of the payload it observes
 */

use super::control::{BlockState, ControlBlock};
use super::shared::{SharedOwner, SharedParts};
use super::traits::{Handle, RefCounted};
use std::fmt;
use std::ptr::NonNull;

/// Observer that never keeps the payload alive
///
/// Holds one weak reference to the control block, which keeps the block (not
/// the payload) allocated. `lock()` is the only way back to the payload.
///
/// # Example
///
/// ```
/// use ownership_core::{SharedOwner, WeakObserver};
///
/// let owner = SharedOwner::new("resource");
/// let observer = WeakObserver::from(&owner);
/// assert_eq!(*observer.lock(), "resource");
///
/// drop(owner);
/// assert!(observer.expired());
/// assert!(observer.lock().is_empty());
/// ```
///
/// Like `SharedOwner`, an observer is confined to its thread:
///
/// ```compile_fail,E0277
/// use ownership_core::SharedOwner;
///
/// let owner = SharedOwner::new(42);
/// let observer = owner.get_weak();
/// std::thread::spawn(move || observer.expired());
/// ```
///
/// ```compile_fail,E0277
/// use ownership_core::WeakObserver;
///
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<WeakObserver<u32>>();
/// ```
pub struct WeakObserver<T> {
    block: Option<NonNull<ControlBlock<T>>>,
}

impl<T> WeakObserver<T> {
    /// Observer of nothing; always expired
    #[inline]
    pub const fn new() -> Self {
        Self { block: None }
    }

    /// Wrap a block whose weak reference the caller already owns
    #[inline]
    pub(crate) fn from_block(block: Option<NonNull<ControlBlock<T>>>) -> Self {
        Self { block }
    }

    #[inline]
    fn control(&self) -> Option<&ControlBlock<T>> {
        // SAFETY: our weak reference keeps the block allocated
        self.block.as_ref().map(|b| unsafe { b.as_ref() })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.block.is_none()
    }

    /// True when there is no block or its payload is gone
    #[inline]
    pub fn expired(&self) -> bool {
        self.control().map_or(true, |b| b.strong() == 0)
    }

    /// Strong reference to the payload, or an empty handle if it is gone
    ///
    /// A non-empty result always refers to a live payload and has already
    /// been counted.
    pub fn lock(&self) -> SharedOwner<T> {
        let Some(block) = self.block else {
            return SharedOwner::empty();
        };
        // SAFETY: our weak reference keeps the block allocated
        match unsafe { block.as_ref() }.try_acquire_strong_for_lock() {
            Some(payload) => SharedOwner::from_parts(Some(SharedParts { payload, block })),
            None => SharedOwner::empty(),
        }
    }

    /// [`WeakObserver::lock`] with the empty case as `None`
    pub fn upgrade(&self) -> Option<SharedOwner<T>> {
        let shared = self.lock();
        (!shared.is_empty()).then_some(shared)
    }

    /// Strong count of the observed block, 0 when empty or expired
    #[inline]
    pub fn use_count(&self) -> usize {
        self.control().map_or(0, ControlBlock::strong)
    }

    /// Weak count of the observed block, 0 when empty
    #[inline]
    pub fn weak_count(&self) -> usize {
        self.control().map_or(0, ControlBlock::weak)
    }

    /// Move the observation out, leaving `self` empty with counts unchanged
    #[inline]
    pub fn take(&mut self) -> Self {
        Self {
            block: self.block.take(),
        }
    }

    /// Whether both observers watch one control block (or are both empty)
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.block == other.block
    }
}

impl<T> Clone for WeakObserver<T> {
    fn clone(&self) -> Self {
        if let Some(block) = self.control() {
            block.acquire_weak();
        }
        Self { block: self.block }
    }
}

impl<T> Drop for WeakObserver<T> {
    fn drop(&mut self) {
        if let Some(block) = self.block.take() {
            // SAFETY: we own one weak reference to a live block
            unsafe { ControlBlock::release_weak(block) };
        }
    }
}

impl<T> Default for WeakObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<&SharedOwner<T>> for WeakObserver<T> {
    fn from(owner: &SharedOwner<T>) -> Self {
        owner.get_weak()
    }
}

impl<T> Handle for WeakObserver<T> {
    fn handle_kind(&self) -> &'static str {
        "weak"
    }

    fn is_empty(&self) -> bool {
        self.block.is_none()
    }
}

impl<T> RefCounted for WeakObserver<T> {
    fn strong_count(&self) -> usize {
        self.use_count()
    }

    fn weak_count(&self) -> usize {
        WeakObserver::weak_count(self)
    }

    fn block_state(&self) -> Option<BlockState> {
        self.control().map(ControlBlock::state)
    }
}

impl<T> fmt::Debug for WeakObserver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakObserver")
            .field("strong", &self.use_count())
            .field("weak", &self.weak_count())
            .field("expired", &self.expired())
            .finish()
    }
}
