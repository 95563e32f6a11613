use bptree_index::{BPlusTree, Comparator};
use proptest::prelude::*;

fn build(branching_factor: usize, keys: &[u8]) -> BPlusTree<u8, usize> {
    let mut tree = BPlusTree::new(branching_factor).unwrap();
    for (value, key) in keys.iter().enumerate() {
        tree.insert(*key, value);
    }
    tree
}

fn naive(keys: &[u8], target: u8, comparator: Comparator) -> Vec<usize> {
    keys.iter()
        .enumerate()
        .filter(|(_, key)| comparator.matches(*key, &target))
        .map(|(value, _)| value)
        .collect()
}

proptest! {
    #[test]
    fn invariants_hold_after_every_insert(
        branching_factor in 3usize..8,
        keys in prop::collection::vec(0u8..24, 0..120),
    ) {
        let mut tree = BPlusTree::new(branching_factor).unwrap();
        for (value, key) in keys.iter().enumerate() {
            tree.insert(*key, value);
            prop_assert!(tree.check_invariants_detailed().is_ok(), "{}", tree);
        }
        prop_assert_eq!(tree.len(), keys.len());
    }

    #[test]
    fn searches_match_naive_filter(
        branching_factor in 3usize..8,
        keys in prop::collection::vec(0u8..24, 1..150),
        target in 0u8..26,
    ) {
        let tree = build(branching_factor, &keys);
        for comparator in Comparator::ALL {
            let mut found: Vec<usize> = tree
                .range_search_by(&target, comparator)
                .into_iter()
                .copied()
                .collect();
            found.sort_unstable();
            prop_assert_eq!(found, naive(&keys, target, comparator), "{}", comparator);
        }
    }

    #[test]
    fn iteration_is_sorted_and_complete(
        branching_factor in 3usize..8,
        keys in prop::collection::vec(any::<u8>(), 0..150),
    ) {
        let tree = build(branching_factor, &keys);

        let walked: Vec<u8> = tree.keys().copied().collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        prop_assert_eq!(walked, sorted);

        let (leaves, _) = tree.count_nodes_in_tree();
        prop_assert_eq!(leaves, tree.leaf_sizes().len());
        prop_assert_eq!(tree.dump_structure().lines().count(), tree.height());
    }

    #[test]
    fn comparators_partition_the_tree(
        branching_factor in 3usize..6,
        keys in prop::collection::vec(0u8..4, 1..80),
        target in 0u8..4,
    ) {
        let tree = build(branching_factor, &keys);
        let below = tree.range_le(&target).len();
        let equal = tree.range_eq(&target).len();
        let above = tree.range_ge(&target).len();
        prop_assert_eq!(below + above - equal, tree.len());
    }
}
