//! Validation and debugging utilities for BPlusTree.
//!
//! This module contains invariant checking for the tree structure and the
//! leaf chain.

use crate::error::{BPlusTreeError, BTreeResult, TreeResult};
use crate::types::{BPlusTree, NodeId, NodeRef, NULL_NODE};

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<K: Ord, V> BPlusTree<K, V> {
    /// Check if the tree maintains B+ tree invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    ///
    /// Verifies, in order: per-node ordering, occupancy, separator bounds,
    /// parent links and uniform leaf depth; then that the leaf chain visits
    /// exactly the leaves of the tree, in tree order, with `previous` and
    /// `next` mutually inverse.
    pub fn check_invariants_detailed(&self) -> BTreeResult<()> {
        let mut leaves = Vec::new();
        let mut leaf_depth = None;
        self.check_node(
            self.root,
            NodeBounds::default(),
            NULL_NODE,
            1,
            &mut leaf_depth,
            &mut leaves,
        )?;

        self.check_leaf_chain(&leaves)
    }

    /// Recursively check invariants for a node and its children.
    fn check_node<'a>(
        &'a self,
        node: NodeRef,
        bounds: NodeBounds<'a, K>,
        expected_parent: NodeId,
        depth: usize,
        leaf_depth: &mut Option<usize>,
        leaves: &mut Vec<NodeId>,
    ) -> TreeResult<()> {
        match node {
            NodeRef::Leaf(id) => {
                let leaf = self.leaf_arena.get(id).ok_or_else(|| {
                    BPlusTreeError::corrupted_tree("Arena", &format!("missing leaf {}", id))
                })?;
                let context = format!("Leaf {}", id);

                if leaf.keys.len() != leaf.values.len() {
                    return Err(BPlusTreeError::data_integrity(
                        &context,
                        &format!("{} keys but {} values", leaf.keys.len(), leaf.values.len()),
                    ));
                }
                if leaf.is_overflow() {
                    return Err(BPlusTreeError::data_integrity(
                        &context,
                        &format!(
                            "{} entries exceed branching factor {}",
                            leaf.len(),
                            self.branching_factor
                        ),
                    ));
                }
                if expected_parent != NULL_NODE && leaf.is_empty() {
                    return Err(BPlusTreeError::data_integrity(
                        &context,
                        "non-root leaf is empty",
                    ));
                }
                check_sorted(&leaf.keys, &context)?;
                bounds.check(&leaf.keys, &context)?;

                match *leaf_depth {
                    None => *leaf_depth = Some(depth),
                    Some(expected) if expected != depth => {
                        return Err(BPlusTreeError::data_integrity(
                            &context,
                            &format!("leaf at depth {} but others at depth {}", depth, expected),
                        ));
                    }
                    Some(_) => {}
                }

                leaves.push(id);
                Ok(())
            }
            NodeRef::Internal(id) => {
                let internal = self.internal_arena.get(id).ok_or_else(|| {
                    BPlusTreeError::corrupted_tree(
                        "Arena",
                        &format!("missing internal node {}", id),
                    )
                })?;
                let context = format!("Internal node {}", id);

                if internal.parent != expected_parent {
                    return Err(BPlusTreeError::data_integrity(
                        &context,
                        &format!(
                            "parent is {} but expected {}",
                            internal.parent, expected_parent
                        ),
                    ));
                }
                if internal.keys.len() + 1 != internal.children.len() {
                    return Err(BPlusTreeError::data_integrity(
                        &context,
                        &format!(
                            "{} keys but {} children",
                            internal.keys.len(),
                            internal.children.len()
                        ),
                    ));
                }
                if internal.is_overflow() {
                    return Err(BPlusTreeError::data_integrity(
                        &context,
                        &format!(
                            "{} children exceed branching factor",
                            internal.children.len()
                        ),
                    ));
                }
                let is_root = expected_parent == NULL_NODE;
                if !is_root && internal.children.len() < internal.min_children() {
                    return Err(BPlusTreeError::data_integrity(
                        &context,
                        &format!(
                            "{} children, minimum is {}",
                            internal.children.len(),
                            internal.min_children()
                        ),
                    ));
                }
                check_sorted(&internal.keys, &context)?;
                bounds.check(&internal.keys, &context)?;

                for (i, child) in internal.children.iter().enumerate() {
                    if i > 0 && self.first_leaf_key(*child) != Some(&internal.keys[i - 1]) {
                        return Err(BPlusTreeError::data_integrity(
                            &context,
                            &format!(
                                "separator {} is not the first key of its right subtree",
                                i - 1
                            ),
                        ));
                    }

                    let child_bounds = NodeBounds {
                        lower: if i == 0 {
                            bounds.lower
                        } else {
                            Some(&internal.keys[i - 1])
                        },
                        upper: internal.keys.get(i).or(bounds.upper),
                    };
                    self.check_node(*child, child_bounds, id, depth + 1, leaf_depth, leaves)?;
                }
                Ok(())
            }
        }
    }

    /// Check that following `next` from the leftmost leaf visits `tree_leaves`
    /// in order, with consistent back-links and non-decreasing keys.
    fn check_leaf_chain(&self, tree_leaves: &[NodeId]) -> TreeResult<()> {
        let mut previous = NULL_NODE;
        let mut current = self.first_leaf_id();
        let mut last_key: Option<&K> = None;

        for (position, &expected) in tree_leaves.iter().enumerate() {
            if current != expected {
                return Err(BPlusTreeError::corrupted_tree(
                    "Leaf chain",
                    &format!(
                        "position {} holds leaf {} but tree order has {}",
                        position, current, expected
                    ),
                ));
            }
            let leaf = &self.leaf_arena[current];
            if leaf.previous != previous {
                return Err(BPlusTreeError::corrupted_tree(
                    "Leaf chain",
                    &format!(
                        "leaf {} points back to {} instead of {}",
                        current, leaf.previous, previous
                    ),
                ));
            }
            if let (Some(last), Some(first)) = (last_key, leaf.keys.first()) {
                if first < last {
                    return Err(BPlusTreeError::corrupted_tree(
                        "Leaf chain",
                        &format!("keys decrease entering leaf {}", current),
                    ));
                }
            }
            last_key = leaf.keys.last().or(last_key);
            previous = current;
            current = leaf.next;
        }

        if current != NULL_NODE {
            return Err(BPlusTreeError::corrupted_tree(
                "Leaf chain",
                &format!(
                    "continues to leaf {} past the last leaf {}",
                    current, previous
                ),
            ));
        }
        Ok(())
    }
}

/// Inclusive key range a subtree must stay within.
struct NodeBounds<'a, K> {
    lower: Option<&'a K>,
    upper: Option<&'a K>,
}

impl<K> Default for NodeBounds<'_, K> {
    fn default() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }
}

impl<K> Clone for NodeBounds<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeBounds<'_, K> {}

impl<K: Ord> NodeBounds<'_, K> {
    fn check(&self, keys: &[K], context: &str) -> TreeResult<()> {
        if let (Some(lower), Some(first)) = (self.lower, keys.first()) {
            if first < lower {
                return Err(BPlusTreeError::data_integrity(
                    context,
                    "key below parent separator",
                ));
            }
        }
        if let (Some(upper), Some(last)) = (self.upper, keys.last()) {
            if last > upper {
                return Err(BPlusTreeError::data_integrity(
                    context,
                    "key above parent separator",
                ));
            }
        }
        Ok(())
    }
}

fn check_sorted<K: Ord>(keys: &[K], context: &str) -> TreeResult<()> {
    match keys.windows(2).position(|pair| pair[0] > pair[1]) {
        Some(index) => Err(BPlusTreeError::data_integrity(
            context,
            &format!("keys out of order at index {}", index + 1),
        )),
        None => Ok(()),
    }
}
