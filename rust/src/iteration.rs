//! Iterator implementations for BPlusTree.
//!
//! All iterators follow the leaf chain from the leftmost leaf, so they yield
//! entries in ascending key order, duplicates in insertion order within a
//! leaf.

use crate::types::{BPlusTree, LeafNode, NodeId, NULL_NODE};

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Iterator over key-value pairs in the B+ tree using the leaf linked list.
pub struct ItemIterator<'a, K, V> {
    tree: &'a BPlusTree<K, V>,
    current_leaf: Option<&'a LeafNode<K, V>>,
    current_leaf_index: usize,
}

/// Iterator over keys in the B+ tree.
pub struct KeyIterator<'a, K, V> {
    items: ItemIterator<'a, K, V>,
}

/// Iterator over values in the B+ tree.
pub struct ValueIterator<'a, K, V> {
    items: ItemIterator<'a, K, V>,
}

// ============================================================================
// BPLUSTREE ITERATOR METHODS
// ============================================================================

impl<K, V> BPlusTree<K, V> {
    /// Returns an iterator over all key-value pairs in sorted order.
    pub fn items(&self) -> ItemIterator<'_, K, V> {
        ItemIterator::new(self)
    }

    /// Returns an iterator over all keys in sorted order.
    pub fn keys(&self) -> KeyIterator<'_, K, V> {
        KeyIterator {
            items: self.items(),
        }
    }

    /// Returns an iterator over all values in key order.
    pub fn values(&self) -> ValueIterator<'_, K, V> {
        ValueIterator {
            items: self.items(),
        }
    }
}

// ============================================================================
// ITEMITERATOR IMPLEMENTATION
// ============================================================================

impl<'a, K, V> ItemIterator<'a, K, V> {
    pub fn new(tree: &'a BPlusTree<K, V>) -> Self {
        Self {
            tree,
            current_leaf: tree.leaf_arena.get(tree.first_leaf_id()),
            current_leaf_index: 0,
        }
    }

    fn advance_leaf(&mut self, next: NodeId) {
        self.current_leaf = if next == NULL_NODE {
            None
        } else {
            self.tree.leaf_arena.get(next)
        };
        self.current_leaf_index = 0;
    }
}

impl<'a, K, V> Iterator for ItemIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let leaf = self.current_leaf?;
            let index = self.current_leaf_index;

            if let (Some(key), Some(value)) = (leaf.keys.get(index), leaf.values.get(index)) {
                self.current_leaf_index += 1;
                return Some((key, value));
            }
            self.advance_leaf(leaf.next);
        }
    }
}

impl<'a, K, V> Iterator for KeyIterator<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(key, _)| key)
    }
}

impl<'a, K, V> Iterator for ValueIterator<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(_, value)| value)
    }
}

impl<'a, K, V> IntoIterator for &'a BPlusTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = ItemIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items()
    }
}

#[cfg(test)]
mod tests {
    use crate::types::BPlusTree;

    #[test]
    fn test_items_follow_leaf_chain_in_order() {
        let mut tree = BPlusTree::new(3).unwrap();
        for key in [8, 3, 5, 1, 9, 2, 7, 4, 6] {
            tree.insert(key, key * 100);
        }

        let items: Vec<(i32, i32)> = tree.items().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(i32, i32)> = (1..=9).map(|k| (k, k * 100)).collect();
        assert_eq!(items, expected);
        assert!(tree.leaf_count() > 1);
    }

    #[test]
    fn test_duplicates_keep_insertion_order_within_run() {
        let mut tree = BPlusTree::new(8).unwrap();
        tree.insert(2, 'a');
        tree.insert(1, 'b');
        tree.insert(2, 'c');

        assert_eq!(tree.values().copied().collect::<String>(), "bac");
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 2, 2]);
    }

    #[test]
    fn test_empty_iteration() {
        let tree = BPlusTree::<i32, i32>::new(3).unwrap();
        assert_eq!(tree.items().count(), 0);
        assert_eq!((&tree).into_iter().count(), 0);
    }
}
