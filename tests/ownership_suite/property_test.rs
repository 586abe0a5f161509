/*!
 * Property Tests
 * Random handle operations checked against a counting model
 */

use crate::common::{drop_counter, Resource};
use ownership_core::monitoring::stats;
use ownership_core::{ExclusiveOwner, SharedOwner, WeakObserver};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    CloneStrong(usize),
    DropStrong(usize),
    Downgrade(usize),
    CloneWeak(usize),
    DropWeak(usize),
    Lock(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<usize>().prop_map(Op::CloneStrong),
        any::<usize>().prop_map(Op::DropStrong),
        any::<usize>().prop_map(Op::Downgrade),
        any::<usize>().prop_map(Op::CloneWeak),
        any::<usize>().prop_map(Op::DropWeak),
        any::<usize>().prop_map(Op::Lock),
    ]
}

proptest! {
    #[test]
    fn prop_counts_follow_model(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let drops = drop_counter();
        let before = stats::snapshot();
        let mut strong = vec![SharedOwner::new(Resource::new(0, &drops))];
        let mut weak: Vec<WeakObserver<Resource>> = Vec::new();

        for op in ops {
            match op {
                Op::CloneStrong(i) if !strong.is_empty() => {
                    let copy = strong[i % strong.len()].clone();
                    strong.push(copy);
                }
                Op::DropStrong(i) if !strong.is_empty() => {
                    strong.swap_remove(i % strong.len());
                }
                Op::Downgrade(i) if !strong.is_empty() => {
                    weak.push(strong[i % strong.len()].get_weak());
                }
                Op::CloneWeak(i) if !weak.is_empty() => {
                    let copy = weak[i % weak.len()].clone();
                    weak.push(copy);
                }
                Op::DropWeak(i) if !weak.is_empty() => {
                    weak.swap_remove(i % weak.len());
                }
                Op::Lock(i) if !weak.is_empty() => {
                    let locked = weak[i % weak.len()].lock();
                    if strong.is_empty() {
                        prop_assert!(locked.is_empty());
                    } else {
                        prop_assert_eq!(locked.use_count(), strong.len() + 1);
                        strong.push(locked);
                    }
                }
                _ => {}
            }

            if strong.is_empty() {
                prop_assert_eq!(drops.get(), 1);
                for w in &weak {
                    prop_assert!(w.expired());
                }
            } else {
                prop_assert_eq!(drops.get(), 0);
                for s in &strong {
                    prop_assert_eq!(s.use_count(), strong.len());
                    prop_assert_eq!(s.weak_count(), weak.len());
                }
            }
        }

        drop(strong);
        drop(weak);

        let delta = stats::snapshot().since(&before);
        prop_assert_eq!(drops.get(), 1);
        prop_assert_eq!(delta.control_blocks_allocated, 1);
        prop_assert_eq!(delta.control_blocks_freed, 1);
    }

    #[test]
    fn prop_exclusive_take_chain(hops in 1usize..32) {
        let drops = drop_counter();
        let mut chain = vec![ExclusiveOwner::new(Resource::new(7, &drops))];

        for _ in 0..hops {
            let last = chain.len() - 1;
            let moved = chain[last].take();
            chain.push(moved);
        }

        let owner = chain.pop().unwrap();
        prop_assert_eq!(owner.id, 7);
        prop_assert!(chain.iter().all(ExclusiveOwner::is_empty));

        // Dropping every moved-from owner leaves the payload alone
        chain.clear();
        prop_assert_eq!(drops.get(), 0);
        drop(owner);
        prop_assert_eq!(drops.get(), 1);
    }
}
