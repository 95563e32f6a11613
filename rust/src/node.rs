//! Node implementations for BPlusTree.
//!
//! This module contains the node-local halves of insertion and splitting for
//! LeafNode and InternalNode. Anything that has to follow a handle into the
//! arena (relinking the leaf chain, re-parenting, replacing the root) lives on
//! the tree in `insert_operations.rs`.

use crate::types::{InternalNode, LeafNode, NodeRef, NULL_NODE};

// ============================================================================
// LEAF NODE IMPLEMENTATION
// ============================================================================

impl<K: Ord, V> LeafNode<K, V> {
    // ============================================================================
    // SEARCH HELPERS
    // ============================================================================

    /// Index of the first key `>= key`, i.e. the start of the run of `key`.
    pub fn lower_bound(&self, key: &K) -> usize {
        self.keys.partition_point(|probe| probe < key)
    }

    /// Index just past the run of `key`.
    pub fn upper_bound(&self, key: &K) -> usize {
        self.keys.partition_point(|probe| probe <= key)
    }

    /// Returns the number of entries in this leaf.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if this leaf holds no entries.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sorted keys of this leaf.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Values of this leaf, parallel to `keys()`.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// First key of this leaf.
    pub fn first_key(&self) -> Option<&K> {
        self.keys.first()
    }

    // ============================================================================
    // INSERT OPERATIONS
    // ============================================================================

    /// Insert a pair after any entries with an equal key.
    pub fn insert(&mut self, key: K, value: V) {
        let index = self.upper_bound(&key);
        self.keys.insert(index, key);
        self.values.insert(index, value);
    }

    /// Split off the upper half of this leaf.
    ///
    /// The returned sibling inherits this leaf's `next` pointer; its
    /// `previous` pointer and this leaf's `next` pointer are left for the
    /// caller to set once the sibling has an ID.
    pub fn split(&mut self) -> LeafNode<K, V> {
        let start = self.keys.len() / 2;

        LeafNode {
            branching_factor: self.branching_factor,
            keys: self.keys.split_off(start),
            values: self.values.split_off(start),
            next: self.next,
            previous: NULL_NODE,
        }
    }

    // ============================================================================
    // STATUS CHECKS
    // ============================================================================

    /// Returns true if this leaf holds more than `branching_factor - 1` entries.
    pub fn is_overflow(&self) -> bool {
        self.values.len() > self.branching_factor - 1
    }
}

// ============================================================================
// INTERNAL NODE IMPLEMENTATION
// ============================================================================

impl<K: Ord> InternalNode<K> {
    /// Index of the child a search for `key` descends into.
    ///
    /// A key equal to a separator routes to the child left of that
    /// separator, so the descent lands on the leftmost leaf that can hold
    /// `key`.
    pub fn find_child_index(&self, key: &K) -> usize {
        self.keys.partition_point(|separator| separator < key)
    }

    /// The child a search for `key` descends into.
    pub fn child_for(&self, key: &K) -> NodeRef {
        self.children[self.find_child_index(key)]
    }

    /// Returns the number of separator keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if this node has no separator keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Insert `separator` and `new_child` directly after `existing`.
    ///
    /// The position is found by identity because separators may repeat.
    ///
    /// # Panics
    ///
    /// Panics if `existing` is not a child of this node. Splits only ever
    /// insert beside the node that split, which its parent always holds.
    pub fn insert_child_after(&mut self, existing: NodeRef, separator: K, new_child: NodeRef) {
        let position = self
            .children
            .iter()
            .position(|child| *child == existing)
            .expect("split node is a child of its parent");

        self.keys.insert(position, separator);
        self.children.insert(position + 1, new_child);
    }

    /// Split off the upper half of this node, returning it with the key to
    /// push into the parent.
    ///
    /// The promoted key is taken out of the sibling rather than copied, so
    /// the sibling ends up with one key fewer than it has children. The
    /// sibling's `parent` is left for the caller.
    pub fn split(&mut self) -> (InternalNode<K>, K) {
        let start = self.keys.len() / 2;

        let mut keys = self.keys.split_off(start);
        let children = self.children.split_off(start + 1);
        let promoted = keys.remove(0);

        let sibling = InternalNode {
            branching_factor: self.branching_factor,
            keys,
            children,
            parent: NULL_NODE,
        };
        (sibling, promoted)
    }

    /// Returns true if this node has more than `branching_factor` children.
    pub fn is_overflow(&self) -> bool {
        self.children.len() > self.branching_factor
    }

    /// Smallest number of children a non-root node keeps after a split.
    pub fn min_children(&self) -> usize {
        self.branching_factor.div_ceil(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_with(branching_factor: usize, keys: &[i32]) -> LeafNode<i32, i32> {
        let mut leaf = LeafNode::new(branching_factor);
        for &key in keys {
            leaf.insert(key, key * 10);
        }
        leaf
    }

    #[test]
    fn test_leaf_insert_keeps_order() {
        let leaf = leaf_with(8, &[5, 1, 9, 3]);
        assert_eq!(leaf.keys(), &[1, 3, 5, 9]);
        assert_eq!(leaf.values(), &[10, 30, 50, 90]);
    }

    #[test]
    fn test_leaf_insert_duplicate_goes_right_of_run() {
        let mut leaf = LeafNode::new(8);
        leaf.insert(1, "first");
        leaf.insert(2, "two");
        leaf.insert(1, "second");
        leaf.insert(1, "third");

        assert_eq!(leaf.keys(), &[1, 1, 1, 2]);
        assert_eq!(leaf.values(), &["first", "second", "third", "two"]);
        assert_eq!(leaf.lower_bound(&1), 0);
        assert_eq!(leaf.upper_bound(&1), 3);
    }

    #[test]
    fn test_leaf_overflow_threshold() {
        let mut leaf = leaf_with(3, &[1, 2]);
        assert!(!leaf.is_overflow());
        leaf.insert(3, 30);
        assert!(leaf.is_overflow());
    }

    #[test]
    fn test_leaf_split_moves_upper_half() {
        let mut leaf = leaf_with(4, &[1, 2, 3, 4, 5]);
        leaf.next = 7;

        let sibling = leaf.split();

        assert_eq!(leaf.keys(), &[1, 2]);
        assert_eq!(sibling.keys(), &[3, 4, 5]);
        assert_eq!(sibling.values(), &[30, 40, 50]);
        assert_eq!(sibling.next, 7);
        assert_eq!(sibling.previous, NULL_NODE);
    }

    #[test]
    fn test_find_child_index_routes_ties_left() {
        let mut node = InternalNode::new(4);
        node.keys = vec![10, 20, 20, 30];

        assert_eq!(node.find_child_index(&5), 0);
        assert_eq!(node.find_child_index(&10), 0);
        assert_eq!(node.find_child_index(&15), 1);
        assert_eq!(node.find_child_index(&20), 1);
        assert_eq!(node.find_child_index(&25), 3);
        assert_eq!(node.find_child_index(&99), 4);
    }

    #[test]
    fn test_insert_child_after_uses_identity() {
        let mut node = InternalNode::new(4);
        node.keys = vec![1, 1];
        node.children = vec![NodeRef::Leaf(0), NodeRef::Leaf(1), NodeRef::Leaf(2)];

        node.insert_child_after(NodeRef::Leaf(2), 1, NodeRef::Leaf(3));

        assert_eq!(node.keys, vec![1, 1, 1]);
        assert_eq!(
            node.children,
            vec![
                NodeRef::Leaf(0),
                NodeRef::Leaf(1),
                NodeRef::Leaf(2),
                NodeRef::Leaf(3),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "split node is a child of its parent")]
    fn test_insert_child_after_rejects_foreign_child() {
        let mut node = InternalNode::new(4);
        node.keys = vec![5];
        node.children = vec![NodeRef::Leaf(0), NodeRef::Leaf(1)];

        node.insert_child_after(NodeRef::Leaf(9), 7, NodeRef::Leaf(2));
    }

    #[test]
    fn test_internal_split_promotes_middle_key() {
        let mut node = InternalNode::new(3);
        node.keys = vec![10, 20, 30];
        node.children = (0..4).map(NodeRef::Leaf).collect();
        assert!(node.is_overflow());

        let (sibling, promoted) = node.split();

        assert_eq!(promoted, 20);
        assert_eq!(node.keys, vec![10]);
        assert_eq!(node.children, vec![NodeRef::Leaf(0), NodeRef::Leaf(1)]);
        assert_eq!(sibling.keys, vec![30]);
        assert_eq!(sibling.children, vec![NodeRef::Leaf(2), NodeRef::Leaf(3)]);
        assert!(node.children.len() >= node.min_children());
        assert!(sibling.children.len() >= sibling.min_children());
    }

    #[test]
    fn test_internal_split_even_branching_factor() {
        let mut node = InternalNode::new(4);
        node.keys = vec![10, 20, 30, 40];
        node.children = (0..5).map(NodeRef::Internal).collect();

        let (sibling, promoted) = node.split();

        assert_eq!(promoted, 30);
        assert_eq!(node.children.len(), 3);
        assert_eq!(sibling.keys, vec![40]);
        assert_eq!(sibling.children.len(), 2);
        assert_eq!(sibling.min_children(), 2);
    }
}
