//! Property-based tests for SequentialSet laws.
//!
//! These tests verify that SequentialSet satisfies the algebraic identities
//! expected of a set, and that its algebra agrees with
//! `std::collections::HashSet`.

use std::collections::HashSet;

use lockset::SequentialSet;
use proptest::prelude::*;

fn to_std(set: &SequentialSet<i32>) -> HashSet<i32> {
    set.iter().copied().collect()
}

// =============================================================================
// Union Identity Law
// Description: Union with no other operands is a copy
// =============================================================================

proptest! {
    #[test]
    fn prop_union_identity_law(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let set: SequentialSet<i32> = elements.into_iter().collect();

        prop_assert_eq!(set.union(&[]), set.copy());
    }
}

// =============================================================================
// Union Commutativity Law
// Description: A ∪ B = B ∪ A
// =============================================================================

proptest! {
    #[test]
    fn prop_union_commutativity_law(
        elements_a in prop::collection::vec(any::<i32>(), 0..30),
        elements_b in prop::collection::vec(any::<i32>(), 0..30)
    ) {
        let set_a: SequentialSet<i32> = elements_a.into_iter().collect();
        let set_b: SequentialSet<i32> = elements_b.into_iter().collect();

        prop_assert_eq!(set_a.union(&[&set_b]), set_b.union(&[&set_a]));
    }
}

// =============================================================================
// Intersection Idempotence Law
// Description: A ∩ A = A
// =============================================================================

proptest! {
    #[test]
    fn prop_intersection_self_law(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let set: SequentialSet<i32> = elements.into_iter().collect();

        prop_assert_eq!(set.intersection(&[&set]), set);
    }
}

// =============================================================================
// Difference Self Law
// Description: A - A = ∅
// =============================================================================

proptest! {
    #[test]
    fn prop_difference_self_law(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let set: SequentialSet<i32> = elements.into_iter().collect();

        prop_assert!(set.difference(&[&set]).is_empty());
    }
}

// =============================================================================
// Symmetric Difference Self Law
// Description: A △ A = ∅
// =============================================================================

proptest! {
    #[test]
    fn prop_symmetric_difference_self_law(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let set: SequentialSet<i32> = elements.into_iter().collect();

        prop_assert!(set.symmetric_difference(&set).is_empty());
    }
}

// =============================================================================
// Symmetric Difference Decomposition Law
// Description: A △ B = (A - B) ∪ (B - A)
// =============================================================================

proptest! {
    #[test]
    fn prop_symmetric_difference_decomposition_law(
        elements_a in prop::collection::vec(0..40i32, 0..30),
        elements_b in prop::collection::vec(0..40i32, 0..30)
    ) {
        let set_a: SequentialSet<i32> = elements_a.into_iter().collect();
        let set_b: SequentialSet<i32> = elements_b.into_iter().collect();

        let decomposed = set_a.difference(&[&set_b]).union(&[&set_b.difference(&[&set_a])]);

        prop_assert_eq!(set_a.symmetric_difference(&set_b), decomposed);
    }
}

// =============================================================================
// Subset/Superset Mirror Law
// Description: A ⊆ B ⇔ B ⊇ A
// =============================================================================

proptest! {
    #[test]
    fn prop_subset_superset_mirror_law(
        elements_a in prop::collection::vec(0..20i32, 0..10),
        elements_b in prop::collection::vec(0..20i32, 0..20)
    ) {
        let set_a: SequentialSet<i32> = elements_a.into_iter().collect();
        let set_b: SequentialSet<i32> = elements_b.into_iter().collect();

        prop_assert_eq!(set_a.is_subset(&set_b), set_b.is_superset(&set_a));
        prop_assert_eq!(
            set_a.is_subset(&set_b),
            set_a.intersection(&[&set_b]).len() == set_a.len()
        );
    }
}

// =============================================================================
// Disjoint Law
// Description: disjoint(A, B) ⇔ A ∩ B = ∅
// =============================================================================

proptest! {
    #[test]
    fn prop_disjoint_law(
        elements_a in prop::collection::vec(0..30i32, 0..10),
        elements_b in prop::collection::vec(0..30i32, 0..10)
    ) {
        let set_a: SequentialSet<i32> = elements_a.into_iter().collect();
        let set_b: SequentialSet<i32> = elements_b.into_iter().collect();

        prop_assert_eq!(
            set_a.is_disjoint(&set_b),
            set_a.intersection(&[&set_b]).is_empty()
        );
    }
}

// =============================================================================
// Model Agreement
// Description: the algebra agrees with std::collections::HashSet
// =============================================================================

proptest! {
    #[test]
    fn prop_agrees_with_std_hash_set(
        elements_a in prop::collection::vec(0..50i32, 0..40),
        elements_b in prop::collection::vec(0..50i32, 0..40)
    ) {
        let set_a: SequentialSet<i32> = elements_a.iter().copied().collect();
        let set_b: SequentialSet<i32> = elements_b.iter().copied().collect();
        let model_a: HashSet<i32> = elements_a.into_iter().collect();
        let model_b: HashSet<i32> = elements_b.into_iter().collect();

        prop_assert_eq!(set_a.len(), model_a.len());
        prop_assert_eq!(to_std(&set_a.union(&[&set_b])), &model_a | &model_b);
        prop_assert_eq!(to_std(&set_a.intersection(&[&set_b])), &model_a & &model_b);
        prop_assert_eq!(to_std(&set_a.difference(&[&set_b])), &model_a - &model_b);
        prop_assert_eq!(to_std(&set_a.symmetric_difference(&set_b)), &model_a ^ &model_b);
        prop_assert_eq!(set_a.is_subset(&set_b), model_a.is_subset(&model_b));
        prop_assert_eq!(set_a.is_disjoint(&set_b), model_a.is_disjoint(&model_b));
        prop_assert_eq!(set_a.equal(&set_b), model_a == model_b);
    }
}

// =============================================================================
// Pop Drains Law
// Description: popping until EmptySet yields every item exactly once
// =============================================================================

proptest! {
    #[test]
    fn prop_pop_drains_law(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let mut set: SequentialSet<i32> = elements.iter().copied().collect();
        let expected: HashSet<i32> = elements.into_iter().collect();

        let mut drained = HashSet::new();
        while let Ok(item) = set.pop() {
            prop_assert!(drained.insert(item));
        }

        prop_assert_eq!(drained, expected);
        prop_assert!(set.is_empty());
    }
}
