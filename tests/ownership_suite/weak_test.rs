/*!
 * Weak Observer Tests
 * Expiry, locking, and control block lifetime
 */

use crate::common::{drop_counter, Resource};
use ownership_core::monitoring::stats;
use ownership_core::{BlockState, RefCounted, SharedOwner, WeakObserver};
use pretty_assertions::assert_eq;

#[test]
fn test_scenario_weak_expiry() {
    let drops = drop_counter();
    let a = SharedOwner::new(Resource::new(1, &drops));
    let w = WeakObserver::from(&a);
    assert!(!w.expired());

    drop(a);
    assert_eq!(drops.get(), 1);
    assert!(w.expired());
    assert!(w.lock().is_empty());
}

#[test]
fn test_scenario_lock_then_release() {
    let drops = drop_counter();
    let before = stats::snapshot();

    let a = SharedOwner::new(Resource::new(2, &drops));
    let w = WeakObserver::from(&a);
    let locked = w.lock();
    assert!(!locked.is_empty());
    assert_eq!(locked.use_count(), 2);
    assert_eq!(locked.id, 2);

    drop(a);
    assert_eq!(drops.get(), 0);
    drop(locked);
    assert_eq!(drops.get(), 1);
    assert_eq!(stats::snapshot().since(&before).live_control_blocks(), 1);

    drop(w);
    let delta = stats::snapshot().since(&before);
    assert_eq!(delta.control_blocks_freed, 1);
    assert_eq!(delta.live_control_blocks(), 0);
}

#[test]
fn test_weak_observers_do_not_keep_payload() {
    let drops = drop_counter();
    let a = SharedOwner::new(Resource::new(3, &drops));
    let b = a.clone();
    let observers: Vec<_> = (0..5).map(|_| a.get_weak()).collect();
    assert_eq!(a.weak_count(), 5);

    drop(a);
    drop(b);
    assert_eq!(drops.get(), 1);
    assert!(observers.iter().all(WeakObserver::expired));
    assert!(observers
        .iter()
        .all(|w| w.block_state() == Some(BlockState::PayloadDestroyed)));
}

#[test]
fn test_lock_increments_by_exactly_one() {
    let a = SharedOwner::new(0u8);
    let w = a.downgrade();
    let mut held = Vec::new();
    for expected in 2..6 {
        let before = a.use_count();
        let locked = w.lock();
        assert_eq!(locked.use_count(), before + 1);
        assert_eq!(locked.use_count(), expected);
        held.push(locked);
    }
    drop(held);
    assert_eq!(a.use_count(), 1);
}

#[test]
fn test_failed_lock_leaves_counts_unchanged() {
    let before = stats::snapshot();
    let a = SharedOwner::new(1u8);
    let w = a.get_weak();
    drop(a);

    assert!(w.upgrade().is_none());
    assert_eq!(w.use_count(), 0);
    assert_eq!(w.weak_count(), 1);
    assert_eq!(stats::snapshot().since(&before).failed_locks, 1);
}

#[test]
fn test_weak_dropped_first_then_owner() {
    let before = stats::snapshot();
    let a = SharedOwner::new(String::from("order"));
    let w = a.get_weak();
    let w2 = w.clone();

    drop(w);
    drop(w2);
    assert_eq!(a.weak_count(), 0);
    assert_eq!(stats::snapshot().since(&before).control_blocks_freed, 0);

    drop(a);
    let delta = stats::snapshot().since(&before);
    assert_eq!(delta.control_blocks_freed, 1);
    assert_eq!(delta.live_control_blocks(), 0);
}

#[test]
fn test_observer_assignment_moves_block() {
    let a = SharedOwner::new(1u16);
    let b = SharedOwner::new(2u16);

    let mut w = a.get_weak();
    assert!(!w.expired());
    assert_eq!(a.weak_count(), 1);
    w = b.get_weak();
    assert_eq!(a.weak_count(), 0);
    assert_eq!(b.weak_count(), 1);
    assert_eq!(*w.lock(), 2);
}
