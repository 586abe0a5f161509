/*!
 * Exclusive Owner Tests
 * Move-only transfer, destruction, and conversion to shared ownership
 */

use crate::common::{drop_counter, Resource};
use ownership_core::monitoring::stats;
use ownership_core::{ExclusiveOwner, Handle, SharedOwner};
use pretty_assertions::assert_eq;

#[test]
fn test_move_transfers_ownership() {
    let drops = drop_counter();
    let mut a = ExclusiveOwner::new(Resource::new(1, &drops));

    let b = a.take();
    assert!(a.is_empty());
    assert_eq!(b.id, 1);

    // Destroying the moved-from owner leaves the payload alone
    drop(a);
    assert_eq!(drops.get(), 0);

    drop(b);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_rust_move_then_drop() {
    let drops = drop_counter();
    let a = ExclusiveOwner::new(Resource::new(2, &drops));
    let owners = vec![a];
    assert_eq!(drops.get(), 0);
    drop(owners);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_exclusive_destruction_is_counted() {
    let drops = drop_counter();
    let before = stats::snapshot();
    {
        let _a = ExclusiveOwner::new(Resource::new(3, &drops));
        let _empty: ExclusiveOwner<Resource> = ExclusiveOwner::empty();
    }
    let delta = stats::snapshot().since(&before);
    assert_eq!(delta.exclusive_payloads_destroyed, 1);
    assert_eq!(delta.control_blocks_allocated, 0);
}

#[test]
fn test_into_shared_empties_source_and_counts_one() {
    let drops = drop_counter();
    let before = stats::snapshot();
    let owner = ExclusiveOwner::new(Resource::new(4, &drops));

    let shared = owner.into_shared().unwrap();
    assert_eq!(shared.use_count(), 1);
    assert_eq!(shared.id, 4);
    assert_eq!(stats::snapshot().since(&before).control_blocks_allocated, 1);

    drop(shared);
    assert_eq!(drops.get(), 1);

    let delta = stats::snapshot().since(&before);
    assert_eq!(delta.shared_payloads_destroyed, 1);
    assert_eq!(delta.exclusive_payloads_destroyed, 0);
    assert_eq!(delta.live_control_blocks(), 0);
}

#[test]
fn test_empty_into_shared_does_not_allocate() {
    let before = stats::snapshot();
    let shared = ExclusiveOwner::<u8>::empty().into_shared().unwrap();
    assert!(shared.is_empty());
    assert_eq!(stats::snapshot().since(&before).control_blocks_allocated, 0);
}

#[test]
fn test_from_conversion() {
    let shared: SharedOwner<&str> = ExclusiveOwner::new("converted").into();
    assert_eq!(*shared, "converted");
    assert_eq!(shared.handle_kind(), "shared");
}

#[test]
fn test_try_new_succeeds() {
    let owner = ExclusiveOwner::try_new([0u8; 64]).unwrap();
    assert_eq!(owner.len(), 64);
}
