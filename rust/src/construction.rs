//! Construction and initialization logic for BPlusTree and nodes.
//!
//! This module contains branching factor validation, arena setup and the
//! default implementations.

use crate::arena::Arena;
use crate::error::{BPlusTreeError, InitResult};
use crate::types::{
    BPlusTree, InternalNode, LeafNode, NodeRef, DEFAULT_BRANCHING_FACTOR, MIN_BRANCHING_FACTOR,
    NULL_NODE,
};
use tracing::debug;

impl<K, V> BPlusTree<K, V> {
    /// Create a B+ tree with the given branching factor.
    ///
    /// # Arguments
    ///
    /// * `branching_factor` - Maximum number of children per internal node
    ///   (leaves hold at most `branching_factor - 1` entries). Must be at
    ///   least 3.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree_index::BPlusTree;
    ///
    /// let tree = BPlusTree::<i32, String>::new(3).unwrap();
    /// assert!(tree.is_empty());
    ///
    /// let err = BPlusTree::<i32, String>::new(2).unwrap_err();
    /// assert!(err.is_configuration_error());
    /// ```
    pub fn new(branching_factor: usize) -> InitResult<Self> {
        validation::validate_branching_factor(branching_factor)?;
        debug!(branching_factor, "created B+ tree");
        Ok(Self::with_root_leaf(branching_factor))
    }

    /// Create a B+ tree with `DEFAULT_BRANCHING_FACTOR`.
    pub fn with_default_branching_factor() -> Self {
        Self::with_root_leaf(DEFAULT_BRANCHING_FACTOR)
    }

    /// A tree whose root is a single empty leaf; the caller validated the factor.
    fn with_root_leaf(branching_factor: usize) -> Self {
        let mut leaf_arena = Arena::new();
        let root_id = leaf_arena.allocate(LeafNode::new(branching_factor));

        Self {
            branching_factor,
            root: NodeRef::Leaf(root_id),
            leaf_arena,
            internal_arena: Arena::new(),
        }
    }

    /// Returns the branching factor chosen at construction.
    pub fn branching_factor(&self) -> usize {
        self.branching_factor
    }
}

impl<K, V> LeafNode<K, V> {
    /// Creates an empty, unlinked leaf.
    pub fn new(branching_factor: usize) -> Self {
        // One slot of headroom: a leaf briefly holds `branching_factor` entries before splitting
        Self {
            branching_factor,
            keys: Vec::with_capacity(branching_factor),
            values: Vec::with_capacity(branching_factor),
            next: NULL_NODE,
            previous: NULL_NODE,
        }
    }
}

impl<K> InternalNode<K> {
    /// Creates an empty internal node with no parent.
    pub fn new(branching_factor: usize) -> Self {
        Self {
            branching_factor,
            keys: Vec::with_capacity(branching_factor),
            children: Vec::with_capacity(branching_factor + 1),
            parent: NULL_NODE,
        }
    }
}

impl<K, V> Default for BPlusTree<K, V> {
    fn default() -> Self {
        Self::with_default_branching_factor()
    }
}

/// Validation utilities for construction
pub mod validation {
    use super::*;

    /// Validate that a branching factor can build a B+ tree.
    pub fn validate_branching_factor(branching_factor: usize) -> InitResult<()> {
        if branching_factor < MIN_BRANCHING_FACTOR {
            Err(BPlusTreeError::invalid_branching_factor(
                branching_factor,
                MIN_BRANCHING_FACTOR,
            ))
        } else {
            Ok(())
        }
    }
}
