//! Tree structure operations for BPlusTree.
//!
//! Size queries, node counting and the breadth-first structure dump.

use std::fmt;

use crate::arena::ArenaStats;
use crate::types::{BPlusTree, NodeRef};

impl<K, V> BPlusTree<K, V> {
    /// Returns the number of entries in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len_recursive(self.root)
    }

    fn len_recursive(&self, node: NodeRef) -> usize {
        match node {
            NodeRef::Leaf(id) => self.leaf_arena[id].keys.len(),
            NodeRef::Internal(id) => self.internal_arena[id]
                .children
                .iter()
                .map(|child| self.len_recursive(*child))
                .sum(),
        }
    }

    /// Returns true if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the root is a leaf node.
    pub fn is_leaf_root(&self) -> bool {
        self.root.is_leaf()
    }

    /// Number of levels, counting the leaf level. A fresh tree has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.root;
        while let NodeRef::Internal(id) = current {
            match self.internal_arena[id].children.first() {
                Some(child) => current = *child,
                None => break,
            }
            height += 1;
        }
        height
    }

    /// Returns the number of leaf nodes reachable from the root.
    pub fn leaf_count(&self) -> usize {
        self.count_nodes_in_tree().0
    }

    /// Count the `(leaf, internal)` nodes reachable from the root.
    pub fn count_nodes_in_tree(&self) -> (usize, usize) {
        self.count_nodes_recursive(self.root)
    }

    fn count_nodes_recursive(&self, node: NodeRef) -> (usize, usize) {
        match node {
            NodeRef::Leaf(_) => (1, 0),
            NodeRef::Internal(id) => self.internal_arena[id].children.iter().fold(
                (0, 1),
                |(leaves, internals), child| {
                    let (child_leaves, child_internals) = self.count_nodes_recursive(*child);
                    (leaves + child_leaves, internals + child_internals)
                },
            ),
        }
    }

    /// Returns the sizes of all leaf nodes in chain order (for testing/debugging).
    pub fn leaf_sizes(&self) -> Vec<usize> {
        self.leaf_keys().iter().map(Vec::len).collect()
    }

    /// Returns the keys of every leaf in chain order (for testing/debugging).
    pub fn leaf_keys(&self) -> Vec<Vec<&K>> {
        let mut leaves = Vec::new();
        let mut current = self.leaf_arena.get(self.first_leaf_id());
        while let Some(leaf) = current {
            leaves.push(leaf.keys.iter().collect());
            current = self.leaf_arena.get(leaf.next);
        }
        leaves
    }

    /// Get statistics for the leaf node arena.
    pub fn leaf_arena_stats(&self) -> ArenaStats {
        self.leaf_arena.stats()
    }

    /// Get statistics for the internal node arena.
    pub fn internal_arena_stats(&self) -> ArenaStats {
        self.internal_arena.stats()
    }

    fn write_node_keys(&self, out: &mut String, node: NodeRef)
    where
        K: fmt::Display,
    {
        let keys = match node {
            NodeRef::Leaf(id) => &self.leaf_arena[id].keys,
            NodeRef::Internal(id) => &self.internal_arena[id].keys,
        };

        out.push('[');
        for (index, key) in keys.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            out.push_str(&key.to_string());
        }
        out.push(']');
    }

    /// Render the tree level by level, breadth-first from the root.
    ///
    /// Each line is one level. Nodes sharing a parent are grouped in braces,
    /// and each node is shown as its key list. Keys render with `Display`, so
    /// string keys appear unquoted:
    ///
    /// ```
    /// use bptree_index::BPlusTree;
    ///
    /// let mut tree = BPlusTree::new(3).unwrap();
    /// for key in [5, 1, 1, 9, 3] {
    ///     tree.insert(key, ());
    /// }
    /// assert_eq!(tree.dump_structure(), "{[1, 5]}\n{[1], [1, 3], [5, 9]}\n");
    /// ```
    pub fn dump_structure(&self) -> String
    where
        K: fmt::Display,
    {
        let mut out = String::new();
        let mut level: Vec<Vec<NodeRef>> = vec![vec![self.root]];

        while !level.is_empty() {
            let mut next_level = Vec::new();
            for (group_index, group) in level.iter().enumerate() {
                if group_index > 0 {
                    out.push_str(", ");
                }
                out.push('{');
                for (node_index, node) in group.iter().enumerate() {
                    if node_index > 0 {
                        out.push_str(", ");
                    }
                    self.write_node_keys(&mut out, *node);
                    if let NodeRef::Internal(id) = node {
                        next_level.push(self.internal_arena[*id].children.clone());
                    }
                }
                out.push('}');
            }
            out.push('\n');
            level = next_level;
        }
        out
    }
}

impl<K: fmt::Display, V> fmt::Display for BPlusTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump_structure())
    }
}
