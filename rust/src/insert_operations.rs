//! INSERT operations for BPlusTree.
//!
//! This module contains insertion, leaf and internal node splitting, leaf
//! chain relinking, parent maintenance and root growth.

use crate::types::{BPlusTree, InternalNode, NodeId, NodeRef, NULL_NODE};
use tracing::{debug, trace};

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    /// Insert a key-value pair.
    ///
    /// Insertion always succeeds. An existing key is not replaced: the new
    /// pair is stored after the entries already present under that key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree_index::BPlusTree;
    ///
    /// let mut tree = BPlusTree::new(3).unwrap();
    /// tree.insert("apple", 1);
    /// tree.insert("apple", 2);
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.range_search(&"apple", "==").len(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        let (leaf_id, parent) = self.find_leaf_with_parent(&key);

        let leaf = &mut self.leaf_arena[leaf_id];
        leaf.insert(key, value);
        if !leaf.is_overflow() {
            return;
        }

        let (sibling_id, promoted) = self.split_leaf(leaf_id);
        match parent {
            None => self.grow_root(NodeRef::Leaf(leaf_id), promoted, NodeRef::Leaf(sibling_id)),
            Some(parent_id) => {
                self.internal_arena[parent_id].insert_child_after(
                    NodeRef::Leaf(leaf_id),
                    promoted,
                    NodeRef::Leaf(sibling_id),
                );
                self.split_overflowing_ancestors(parent_id);
            }
        }
    }

    // ============================================================================
    // HELPERS FOR INSERT OPERATIONS
    // ============================================================================

    /// Split a leaf, link the sibling into the chain right after it, and
    /// return the sibling's ID with its first key.
    fn split_leaf(&mut self, leaf_id: NodeId) -> (NodeId, K) {
        let sibling = self.leaf_arena[leaf_id].split();
        let promoted = sibling.keys[0].clone();
        let old_next = sibling.next;

        let sibling_id = self.leaf_arena.allocate(sibling);
        self.leaf_arena[sibling_id].previous = leaf_id;
        self.leaf_arena[leaf_id].next = sibling_id;
        if old_next != NULL_NODE {
            self.leaf_arena[old_next].previous = sibling_id;
        }

        trace!(
            leaf = leaf_id,
            sibling = sibling_id,
            "split overflowing leaf"
        );
        (sibling_id, promoted)
    }

    /// Walk up from `node_id`, splitting every internal node that holds too
    /// many children, until one fits or a new root is made.
    fn split_overflowing_ancestors(&mut self, mut node_id: NodeId) {
        while self.internal_arena[node_id].is_overflow() {
            let (sibling, promoted) = self.internal_arena[node_id].split();
            let parent_id = self.internal_arena[node_id].parent;

            let sibling_id = self.internal_arena.allocate(sibling);
            self.adopt_children(sibling_id);
            trace!(
                node = node_id,
                sibling = sibling_id,
                "split overflowing internal node"
            );

            if parent_id == NULL_NODE {
                self.grow_root(
                    NodeRef::Internal(node_id),
                    promoted,
                    NodeRef::Internal(sibling_id),
                );
                return;
            }

            self.internal_arena[sibling_id].parent = parent_id;
            self.internal_arena[parent_id].insert_child_after(
                NodeRef::Internal(node_id),
                promoted,
                NodeRef::Internal(sibling_id),
            );
            node_id = parent_id;
        }
    }

    /// Point every internal child of `parent_id` back at it.
    fn adopt_children(&mut self, parent_id: NodeId) {
        let orphans: Vec<NodeId> = self.internal_arena[parent_id]
            .children
            .iter()
            .filter_map(|child| match child {
                NodeRef::Internal(id) => Some(*id),
                NodeRef::Leaf(_) => None,
            })
            .collect();

        for child_id in orphans {
            self.internal_arena[child_id].parent = parent_id;
        }
    }

    /// Replace the root with a new internal node over `left` and `right`.
    fn grow_root(&mut self, left: NodeRef, separator: K, right: NodeRef) {
        let mut new_root = InternalNode::new(self.branching_factor);
        new_root.keys.push(separator);
        new_root.children.push(left);
        new_root.children.push(right);

        let root_id = self.internal_arena.allocate(new_root);
        self.adopt_children(root_id);
        self.root = NodeRef::Internal(root_id);

        debug!(
            root = root_id,
            height = self.height(),
            "tree grew a new root"
        );
    }
}

impl<K: Ord + Clone, V> Extend<(K, V)> for BPlusTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
