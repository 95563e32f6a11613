//! Core types and data structures for BPlusTree.
//!
//! This module contains the fundamental data structures, type definitions,
//! and constants used throughout the B+ tree implementation.

use crate::arena::Arena;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest branching factor a tree accepts.
pub const MIN_BRANCHING_FACTOR: usize = 3;

/// Branching factor used by `with_default_branching_factor` and `Default`.
pub const DEFAULT_BRANCHING_FACTOR: usize = 16;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

pub use crate::arena::{NodeId, NULL_NODE};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// B+ tree index mapping ordered keys to any number of values.
///
/// Unlike a map, the tree keeps every inserted pair: inserting the same key
/// twice stores two entries. All values live in the leaves, which are chained
/// in both directions so that a range query descends once and then walks
/// sideways.
///
/// # Examples
///
/// ```
/// use bptree_index::BPlusTree;
///
/// let mut tree = BPlusTree::new(3).unwrap();
/// for key in [5, 1, 1, 9, 3] {
///     tree.insert(key, key * 10);
/// }
///
/// let mut equal = tree.range_search(&1, "==");
/// equal.sort();
/// assert_eq!(equal, [&10, &10]);
///
/// let mut at_least = tree.range_search(&5, ">=");
/// at_least.sort();
/// assert_eq!(at_least, [&50, &90]);
///
/// assert!(tree.range_search(&5, "!=").is_empty());
/// ```
///
/// # Performance Characteristics
///
/// - **Insertion**: O(log n)
/// - **Range search**: O(log n + k) where k is the number of matches
/// - **Iteration**: O(n)
#[derive(Debug)]
pub struct BPlusTree<K, V> {
    /// Maximum number of children of an internal node.
    pub(crate) branching_factor: usize,
    /// The current root; replaced when a split reaches the top.
    pub(crate) root: NodeRef,
    /// Storage for every leaf ever created.
    pub(crate) leaf_arena: Arena<LeafNode<K, V>>,
    /// Storage for every internal node ever created.
    pub(crate) internal_arena: Arena<InternalNode<K>>,
}

/// Leaf node holding parallel key and value vectors.
#[derive(Debug, Clone)]
pub struct LeafNode<K, V> {
    /// Branching factor of the owning tree.
    pub(crate) branching_factor: usize,
    /// Sorted keys, duplicates adjacent.
    pub(crate) keys: Vec<K>,
    /// Values, `values[i]` belongs to `keys[i]`.
    pub(crate) values: Vec<V>,
    /// Next leaf in key order.
    pub(crate) next: NodeId,
    /// Previous leaf in key order.
    pub(crate) previous: NodeId,
}

/// Internal node containing separator keys and child references.
#[derive(Debug, Clone)]
pub struct InternalNode<K> {
    /// Branching factor of the owning tree.
    pub(crate) branching_factor: usize,
    /// Sorted separator keys.
    pub(crate) keys: Vec<K>,
    /// One more child than there are keys.
    pub(crate) children: Vec<NodeRef>,
    /// Parent internal node, `NULL_NODE` for the root.
    pub(crate) parent: NodeId,
}

// ============================================================================
// ENUMS
// ============================================================================

/// Handle to either kind of node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Leaf(NodeId),
    Internal(NodeId),
}

impl NodeRef {
    /// Return the raw node ID.
    pub fn id(&self) -> NodeId {
        match *self {
            NodeRef::Leaf(id) => id,
            NodeRef::Internal(id) => id,
        }
    }

    /// Returns true if this reference points to a leaf node.
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeRef::Leaf(_))
    }
}
