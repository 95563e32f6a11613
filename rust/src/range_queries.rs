//! Comparator range search for BPlusTree.
//!
//! A search descends once, to the leftmost leaf that can hold the search key,
//! and then walks the leaf chain. Splits balance leaves by entry count, so a
//! run of equal keys may straddle any number of leaf boundaries; the walks
//! below never assume a run ends with its leaf.

use crate::comparator::Comparator;
use crate::types::{BPlusTree, NodeId, NULL_NODE};
use tracing::debug;

impl<K: Ord, V> BPlusTree<K, V> {
    /// Values whose key satisfies `key <comparator> target`, where
    /// `comparator` is one of `"<="`, `"=="` or `">="`.
    ///
    /// Any other comparator yields an empty result. Values come back in leaf
    /// chain encounter order, which is not necessarily key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree_index::BPlusTree;
    ///
    /// let mut tree = BPlusTree::new(3).unwrap();
    /// for key in [5, 1, 1, 9, 3] {
    ///     tree.insert(key, key);
    /// }
    ///
    /// let mut at_most = tree.range_search(&3, "<=");
    /// at_most.sort();
    /// assert_eq!(at_most, [&1, &1, &3]);
    /// assert!(tree.range_search(&3, "<").is_empty());
    /// ```
    pub fn range_search(&self, target: &K, comparator: &str) -> Vec<&V> {
        match comparator.parse::<Comparator>() {
            Ok(comparator) => self.range_search_by(target, comparator),
            Err(err) => {
                debug!(%err, "rejected range search");
                Vec::new()
            }
        }
    }

    /// Typed form of [`range_search`](Self::range_search).
    pub fn range_search_by(&self, target: &K, comparator: Comparator) -> Vec<&V> {
        let leaf_id = self.find_leaf(target);
        let start = self.leaf_arena[leaf_id].lower_bound(target);

        let mut found = Vec::new();
        match comparator {
            Comparator::Equal => self.collect_equal(leaf_id, start, target, &mut found),
            Comparator::GreaterOrEqual => self.collect_forward(leaf_id, start, &mut found),
            Comparator::LessOrEqual => {
                // Equal keys may continue right of `start`, past this leaf
                self.collect_equal(leaf_id, start, target, &mut found);
                self.collect_backward(leaf_id, start, &mut found);
            }
        }
        found
    }

    // ============================================================================
    // LEAF CHAIN WALKS
    // ============================================================================

    /// Collect the run of entries equal to `target` beginning at `start`.
    fn collect_equal<'a>(
        &'a self,
        mut leaf_id: NodeId,
        mut start: usize,
        target: &K,
        found: &mut Vec<&'a V>,
    ) {
        while leaf_id != NULL_NODE {
            let leaf = &self.leaf_arena[leaf_id];
            for (key, value) in leaf.keys[start..].iter().zip(&leaf.values[start..]) {
                if key != target {
                    return;
                }
                found.push(value);
            }
            leaf_id = leaf.next;
            start = 0;
        }
    }

    /// Collect every entry from `start` to the end of the chain.
    fn collect_forward<'a>(
        &'a self,
        mut leaf_id: NodeId,
        mut start: usize,
        found: &mut Vec<&'a V>,
    ) {
        while leaf_id != NULL_NODE {
            let leaf = &self.leaf_arena[leaf_id];
            found.extend(&leaf.values[start..]);
            leaf_id = leaf.next;
            start = 0;
        }
    }

    /// Collect every entry before `end`, walking toward the head of the
    /// chain.
    fn collect_backward<'a>(&'a self, mut leaf_id: NodeId, mut end: usize, found: &mut Vec<&'a V>) {
        while leaf_id != NULL_NODE {
            let leaf = &self.leaf_arena[leaf_id];
            found.extend(leaf.values[..end].iter().rev());
            leaf_id = leaf.previous;
            if leaf_id != NULL_NODE {
                end = self.leaf_arena[leaf_id].values.len();
            }
        }
    }
}
