//! Property-based tests for AvlSet laws.
//!
//! These tests verify the structural guarantees of the container —
//! strictly sorted iteration, the AVL depth bound, idempotent mutation,
//! and agreement with the standard library's ordered set — over arbitrary
//! inputs.

use std::collections::BTreeSet;

use proptest::prelude::*;
use threadset::AvlSet;

// =============================================================================
// Sorted Iteration Law
// Description: iteration always yields a strictly increasing sequence
// =============================================================================

proptest! {
    #[test]
    fn prop_iteration_is_strictly_increasing(
        elements in prop::collection::vec(any::<i32>(), 0..200)
    ) {
        let set: AvlSet<i32> = elements.into_iter().collect();
        let in_order: Vec<&i32> = set.iter().collect();

        for pair in in_order.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }
}

// =============================================================================
// Depth Bound Law
// Description: the tree depth stays within the AVL bound ~1.44·log2(n + 2)
// =============================================================================

proptest! {
    #[test]
    fn prop_depth_is_logarithmic(
        elements in prop::collection::vec(any::<i32>(), 0..500)
    ) {
        let set: AvlSet<i32> = elements.into_iter().collect();

        #[allow(clippy::cast_precision_loss)]
        let bound = 1.4405 * ((set.len() + 2) as f64).log2();
        #[allow(clippy::cast_precision_loss)]
        let depth = set.depth() as f64;
        prop_assert!(
            depth <= bound,
            "depth {} exceeds AVL bound {} for {} elements",
            set.depth(), bound, set.len()
        );
    }
}

// =============================================================================
// Round-Trip Law
// Description: inserting a fresh element then removing it restores the
// exact count and ordered sequence
// =============================================================================

proptest! {
    #[test]
    fn prop_insert_then_remove_round_trips(
        elements in prop::collection::vec(any::<i32>(), 0..100),
        fresh: i32
    ) {
        let mut set: AvlSet<i32> = elements.into_iter().collect();
        prop_assume!(!set.contains(&fresh));
        let before: Vec<i32> = set.iter().copied().collect();

        set.insert(fresh);
        set.remove(&fresh);

        let after: Vec<i32> = set.iter().copied().collect();
        prop_assert_eq!(before, after);
    }
}

// =============================================================================
// Idempotence Laws
// Description: duplicate insertion changes the count by exactly one in
// total; removing an absent element changes nothing
// =============================================================================

proptest! {
    #[test]
    fn prop_double_insert_counts_once(
        elements in prop::collection::vec(any::<i32>(), 0..100),
        element: i32
    ) {
        let mut set: AvlSet<i32> = elements.into_iter().collect();
        let without = set.len() - usize::from(set.remove(&element));

        set.insert(element);
        set.insert(element);

        prop_assert_eq!(set.len(), without + 1);
    }

    #[test]
    fn prop_remove_absent_changes_nothing(
        elements in prop::collection::vec(any::<i32>(), 0..100),
        absent: i32
    ) {
        let mut set: AvlSet<i32> = elements.into_iter().collect();
        set.remove(&absent);
        let before: Vec<i32> = set.iter().copied().collect();

        let removed = set.remove(&absent);

        prop_assert!(!removed);
        let after: Vec<i32> = set.iter().copied().collect();
        prop_assert_eq!(before, after);
    }
}

// =============================================================================
// Clone Independence Law
// Description: mutating a clone never changes the original, and vice versa
// =============================================================================

proptest! {
    #[test]
    fn prop_clone_is_independent(
        elements in prop::collection::vec(any::<i32>(), 0..100),
        mutations in prop::collection::vec(any::<i32>(), 0..50)
    ) {
        let original: AvlSet<i32> = elements.into_iter().collect();
        let snapshot: Vec<i32> = original.iter().copied().collect();
        let mut copied = original.clone();

        for element in mutations {
            if !copied.remove(&element) {
                copied.insert(element);
            }
        }

        let unchanged: Vec<i32> = original.iter().copied().collect();
        prop_assert_eq!(snapshot, unchanged);
    }
}

// =============================================================================
// Lower Bound Minimality Law
// Description: lower_bound returns the minimum element not less than the
// query, and the end position exactly when no element qualifies
// =============================================================================

proptest! {
    #[test]
    fn prop_lower_bound_returns_minimum_qualifying(
        elements in prop::collection::vec(any::<i32>(), 0..100),
        query: i32
    ) {
        let set: AvlSet<i32> = elements.iter().copied().collect();
        let expected = elements.iter().filter(|&&e| e >= query).min();

        prop_assert_eq!(set.lower_bound(&query).value(), expected);
    }
}

// =============================================================================
// Reverse Iteration Law
// Description: backward iteration is the exact reverse of forward
// iteration
// =============================================================================

proptest! {
    #[test]
    fn prop_backward_iteration_reverses_forward(
        elements in prop::collection::vec(any::<i32>(), 0..200)
    ) {
        let set: AvlSet<i32> = elements.into_iter().collect();

        let forward: Vec<&i32> = set.iter().collect();
        let mut backward: Vec<&i32> = set.iter().rev().collect();
        backward.reverse();

        prop_assert_eq!(forward, backward);
    }
}

// =============================================================================
// Model Agreement Law
// Description: an arbitrary interleaving of inserts and removes leaves
// AvlSet in exactly the state of the standard library's ordered set
// =============================================================================

proptest! {
    #[test]
    fn prop_agrees_with_btree_set_model(
        operations in prop::collection::vec((any::<bool>(), -50..50_i32), 0..300)
    ) {
        let mut set: AvlSet<i32> = AvlSet::new();
        let mut model: BTreeSet<i32> = BTreeSet::new();

        for (is_insert, element) in operations {
            if is_insert {
                prop_assert_eq!(set.insert(element), model.insert(element));
            } else {
                prop_assert_eq!(set.remove(&element), model.remove(&element));
            }
        }

        prop_assert_eq!(set.len(), model.len());
        let ours: Vec<&i32> = set.iter().collect();
        let theirs: Vec<&i32> = model.iter().collect();
        prop_assert_eq!(ours, theirs);
        prop_assert_eq!(set.first(), model.first());
        prop_assert_eq!(set.last(), model.last());
    }
}
