//! Read-side navigation for BPlusTree.
//!
//! This module contains the descent from the root to a leaf and the helper
//! methods for reaching nodes through their handles.

use crate::types::{BPlusTree, InternalNode, LeafNode, NodeId, NodeRef, NULL_NODE};

impl<K: Ord, V> BPlusTree<K, V> {
    // ============================================================================
    // DESCENT
    // ============================================================================

    /// Find the leaf where entries with `key` start.
    ///
    /// Every leaf to the left of the returned one holds only smaller keys.
    pub(crate) fn find_leaf(&self, key: &K) -> NodeId {
        self.find_leaf_with_parent(key).0
    }

    /// Find the leaf for `key` together with the internal node it hangs off.
    pub(crate) fn find_leaf_with_parent(&self, key: &K) -> (NodeId, Option<NodeId>) {
        let mut current = self.root;
        let mut parent = None;

        loop {
            match current {
                NodeRef::Leaf(leaf_id) => return (leaf_id, parent),
                NodeRef::Internal(internal_id) => {
                    current = self.internal_arena[internal_id].child_for(key);
                    parent = Some(internal_id);
                }
            }
        }
    }

    /// Key of the leftmost leaf entry under `node`.
    pub fn first_leaf_key(&self, node: NodeRef) -> Option<&K> {
        match node {
            NodeRef::Leaf(id) => self.leaf_arena.get(id)?.first_key(),
            NodeRef::Internal(id) => {
                let first_child = *self.internal_arena.get(id)?.children.first()?;
                self.first_leaf_key(first_child)
            }
        }
    }
}

impl<K, V> BPlusTree<K, V> {
    /// Get the ID of the first (leftmost) leaf in the tree
    pub(crate) fn first_leaf_id(&self) -> NodeId {
        self.edge_leaf_id(|children| children.first())
    }

    /// Get the ID of the last (rightmost) leaf in the tree
    pub(crate) fn last_leaf_id(&self) -> NodeId {
        self.edge_leaf_id(|children| children.last())
    }

    fn edge_leaf_id(&self, pick: impl Fn(&[NodeRef]) -> Option<&NodeRef>) -> NodeId {
        let mut current = self.root;
        loop {
            match current {
                NodeRef::Leaf(leaf_id) => return leaf_id,
                NodeRef::Internal(internal_id) => {
                    match pick(&self.internal_arena[internal_id].children) {
                        Some(child) => current = *child,
                        // Only reachable on a corrupted tree; validation reports it
                        None => return NULL_NODE,
                    }
                }
            }
        }
    }

    /// Get a leaf node by ID.
    pub fn get_leaf(&self, id: NodeId) -> Option<&LeafNode<K, V>> {
        self.leaf_arena.get(id)
    }

    /// Get an internal node by ID.
    pub fn get_internal(&self, id: NodeId) -> Option<&InternalNode<K>> {
        self.internal_arena.get(id)
    }

    /// The current root handle.
    pub fn root(&self) -> NodeRef {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{BPlusTree, NodeRef, NULL_NODE};

    fn scenario_tree() -> BPlusTree<i32, i32> {
        let mut tree = BPlusTree::new(3).unwrap();
        for key in [5, 1, 1, 9, 3] {
            tree.insert(key, key);
        }
        tree
    }

    #[test]
    fn test_find_leaf_lands_on_leftmost_candidate() {
        let tree = scenario_tree();

        let leaf = tree.get_leaf(tree.find_leaf(&1)).unwrap();
        assert_eq!(leaf.keys(), &[1]);
        assert_eq!(leaf.previous, NULL_NODE);

        let leaf = tree.get_leaf(tree.find_leaf(&4)).unwrap();
        assert_eq!(leaf.keys(), &[1, 3]);
    }

    #[test]
    fn test_find_leaf_reports_parent() {
        let tree = scenario_tree();
        let (_, parent) = tree.find_leaf_with_parent(&9);
        assert_eq!(parent.map(NodeRef::Internal), Some(tree.root()));

        let single = BPlusTree::<i32, i32>::new(3).unwrap();
        assert_eq!(single.find_leaf_with_parent(&9).1, None);
    }

    #[test]
    fn test_first_leaf_key() {
        let tree = scenario_tree();
        assert_eq!(tree.first_leaf_key(tree.root()), Some(&1));

        let empty = BPlusTree::<i32, i32>::new(3).unwrap();
        assert_eq!(empty.first_leaf_key(empty.root()), None);
    }

    #[test]
    fn test_edge_leaves() {
        let tree = scenario_tree();
        assert_eq!(tree.get_leaf(tree.first_leaf_id()).unwrap().keys(), &[1]);
        assert_eq!(tree.get_leaf(tree.last_leaf_id()).unwrap().keys(), &[5, 9]);
        assert!(tree.get_leaf(NULL_NODE).is_none());
        assert!(tree.get_internal(NULL_NODE).is_none());
    }
}
