/*!
 * Control Block
 *
 * Strong/weak bookkeeping shared by every `SharedOwner` and `WeakObserver`
 * of one payload. Counts are private to this module and only move through
 * the acquire/release operations below.
 */

use super::alloc::try_box;
use crate::core::errors::OwnershipResult;
use crate::core::limits::{INITIAL_STRONG_COUNT, INITIAL_WEAK_COUNT, MAX_REF_COUNT};
use crate::monitoring::stats;
use std::cell::Cell;
use std::ptr::NonNull;
use tracing::{debug, error, instrument, trace};

/// Observable lifecycle of a control block
///
/// The terminal `Freed` state has no variant: once a block is freed no
/// handle refers to it any more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// strong > 0, payload alive
    Live,
    /// strong == 0 and weak > 0, payload destroyed
    PayloadDestroyed,
}

impl std::fmt::Display for BlockState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BlockState::Live => write!(f, "LIVE"),
            BlockState::PayloadDestroyed => write!(f, "PAYLOAD_DESTROYED"),
        }
    }
}

pub(crate) struct ControlBlock<T> {
    strong: Cell<usize>,
    weak: Cell<usize>,
    payload: Cell<Option<NonNull<T>>>,
}

impl<T> ControlBlock<T> {
    /// Allocate a block with strong=1, weak=0 that takes over `payload`
    ///
    /// Returns the block and the payload pointer it now owns. If the block
    /// cannot be allocated the payload is dropped with the error, so no
    /// half-built block or orphaned payload remains.
    #[instrument(level = "trace", skip_all, fields(type_name = std::any::type_name::<T>()))]
    pub(crate) fn try_allocate(payload: Box<T>) -> OwnershipResult<(NonNull<Self>, NonNull<T>)> {
        let block = try_box(ControlBlock {
            strong: Cell::new(INITIAL_STRONG_COUNT),
            weak: Cell::new(INITIAL_WEAK_COUNT),
            payload: Cell::new(None),
        })?;

        let payload = NonNull::from(Box::leak(payload));
        block.payload.set(Some(payload));

        stats::record_block_allocated();
        trace!("control block allocated");

        Ok((NonNull::from(Box::leak(block)), payload))
    }

    #[inline]
    pub(crate) fn strong(&self) -> usize {
        self.strong.get()
    }

    #[inline]
    pub(crate) fn weak(&self) -> usize {
        self.weak.get()
    }

    /// Payload pointer, present exactly while strong > 0
    #[inline]
    pub(crate) fn payload(&self) -> Option<NonNull<T>> {
        self.payload.get()
    }

    #[inline]
    pub(crate) fn state(&self) -> BlockState {
        if self.strong.get() > 0 {
            BlockState::Live
        } else {
            BlockState::PayloadDestroyed
        }
    }

    #[inline]
    pub(crate) fn acquire_strong(&self) {
        debug_assert!(self.strong.get() > 0, "acquire_strong on a dead payload");
        increment(&self.strong, "strong");
    }

    #[inline]
    pub(crate) fn acquire_weak(&self) {
        increment(&self.weak, "weak");
    }

    /// Take a strong reference only if the payload is still alive
    ///
    /// Returns the payload pointer on success. On failure nothing is mutated.
    pub(crate) fn try_acquire_strong_for_lock(&self) -> Option<NonNull<T>> {
        if self.strong.get() == 0 {
            stats::record_failed_lock();
            trace!(
                type_name = std::any::type_name::<T>(),
                weak = self.weak.get(),
                "lock failed: payload already destroyed"
            );
            return None;
        }
        increment(&self.strong, "strong");
        self.payload.get()
    }

    /// Drop one strong reference, destroying the payload on 1 -> 0
    ///
    /// # Safety
    ///
    /// `block` must be live and the caller must own one strong reference,
    /// which is consumed. The block may be freed before this returns.
    pub(crate) unsafe fn release_strong(block: NonNull<Self>) {
        let this = block.as_ref();
        let strong = this.strong.get();
        debug_assert!(strong > 0, "strong count underflow");
        this.strong.set(strong - 1);
        if strong != 1 {
            return;
        }

        // Pin the block across the payload destructor. Weak observers held by
        // the payload itself get released while it is being destroyed.
        // A panicking destructor unwinds past the matching release below and
        // leaks the block, as std::rc::Rc does.
        increment(&this.weak, "weak");

        if let Some(payload) = this.payload.take() {
            drop(Box::from_raw(payload.as_ptr()));
            stats::record_shared_payload_destroyed();
            debug!(
                type_name = std::any::type_name::<T>(),
                weak = this.weak.get() - 1,
                "shared payload destroyed"
            );
        }

        Self::release_weak(block);
    }

    /// Drop one weak reference, freeing the block once both counts are zero
    ///
    /// # Safety
    ///
    /// `block` must be live and the caller must own one weak reference,
    /// which is consumed. The block may be freed before this returns.
    pub(crate) unsafe fn release_weak(block: NonNull<Self>) {
        let this = block.as_ref();
        let weak = this.weak.get();
        debug_assert!(weak > 0, "weak count underflow");
        this.weak.set(weak - 1);

        if weak == 1 && this.strong.get() == 0 {
            debug_assert!(this.payload.get().is_none());
            drop(Box::from_raw(block.as_ptr()));
            stats::record_block_freed();
            trace!(type_name = std::any::type_name::<T>(), "control block freed");
        }
    }
}

#[inline]
fn increment(count: &Cell<usize>, which: &'static str) {
    let n = count.get();
    if n >= MAX_REF_COUNT {
        error!(count = which, "reference count overflow, aborting");
        std::process::abort();
    }
    count.set(n + 1);
}
