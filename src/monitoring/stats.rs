/*!
 * Ownership Statistics
 *
 * Thread-local lifecycle counters. The handles are single-threaded, so every
 * control block is created and freed on the thread that counts it.
 */

use serde::{Deserialize, Serialize};
use std::cell::Cell;

thread_local! {
    static BLOCKS_ALLOCATED: Cell<u64> = const { Cell::new(0) };
    static BLOCKS_FREED: Cell<u64> = const { Cell::new(0) };
    static SHARED_PAYLOADS_DESTROYED: Cell<u64> = const { Cell::new(0) };
    static EXCLUSIVE_PAYLOADS_DESTROYED: Cell<u64> = const { Cell::new(0) };
    static FAILED_LOCKS: Cell<u64> = const { Cell::new(0) };
}

#[inline]
fn bump(counter: &'static std::thread::LocalKey<Cell<u64>>) {
    counter.with(|c| c.set(c.get() + 1));
}

#[inline]
pub(crate) fn record_block_allocated() {
    bump(&BLOCKS_ALLOCATED);
}

#[inline]
pub(crate) fn record_block_freed() {
    bump(&BLOCKS_FREED);
}

#[inline]
pub(crate) fn record_shared_payload_destroyed() {
    bump(&SHARED_PAYLOADS_DESTROYED);
}

#[inline]
pub(crate) fn record_exclusive_payload_destroyed() {
    bump(&EXCLUSIVE_PAYLOADS_DESTROYED);
}

#[inline]
pub(crate) fn record_failed_lock() {
    bump(&FAILED_LOCKS);
}

/// Point-in-time copy of the current thread's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipStats {
    pub control_blocks_allocated: u64,
    pub control_blocks_freed: u64,
    pub shared_payloads_destroyed: u64,
    pub exclusive_payloads_destroyed: u64,
    pub failed_locks: u64,
}

impl OwnershipStats {
    /// Control blocks allocated but not yet freed
    #[inline]
    pub fn live_control_blocks(&self) -> u64 {
        self.control_blocks_allocated - self.control_blocks_freed
    }

    /// Payloads owned by a control block that are still alive
    #[inline]
    pub fn live_shared_payloads(&self) -> u64 {
        self.control_blocks_allocated - self.shared_payloads_destroyed
    }

    /// Counter deltas accumulated after `earlier` was taken
    pub fn since(&self, earlier: &OwnershipStats) -> OwnershipStats {
        OwnershipStats {
            control_blocks_allocated: self.control_blocks_allocated - earlier.control_blocks_allocated,
            control_blocks_freed: self.control_blocks_freed - earlier.control_blocks_freed,
            shared_payloads_destroyed: self.shared_payloads_destroyed
                - earlier.shared_payloads_destroyed,
            exclusive_payloads_destroyed: self.exclusive_payloads_destroyed
                - earlier.exclusive_payloads_destroyed,
            failed_locks: self.failed_locks - earlier.failed_locks,
        }
    }
}

/// Read the current thread's counters
pub fn snapshot() -> OwnershipStats {
    OwnershipStats {
        control_blocks_allocated: BLOCKS_ALLOCATED.with(Cell::get),
        control_blocks_freed: BLOCKS_FREED.with(Cell::get),
        shared_payloads_destroyed: SHARED_PAYLOADS_DESTROYED.with(Cell::get),
        exclusive_payloads_destroyed: EXCLUSIVE_PAYLOADS_DESTROYED.with(Cell::get),
        failed_locks: FAILED_LOCKS.with(Cell::get),
    }
}

/// Zero the current thread's counters
///
/// Only meaningful when no control block is alive on this thread, otherwise
/// `live_control_blocks` underflows once those blocks are freed.
pub fn reset() {
    for counter in [
        &BLOCKS_ALLOCATED,
        &BLOCKS_FREED,
        &SHARED_PAYLOADS_DESTROYED,
        &EXCLUSIVE_PAYLOADS_DESTROYED,
        &FAILED_LOCKS,
    ] {
        counter.with(|c| c.set(0));
    }
}
