//! B+ tree attribute index in Rust.
//!
//! This crate provides a B+ tree that maps ordered keys to any number of
//! values, built for answering "every record whose attribute is `<=`, `==`
//! or `>=` some value". Leaves are chained in both directions, so a range
//! search descends once and then walks sideways.
//!
//! The tree is append-only: there is no removal, and nodes are never freed.
//! Nodes live in arenas and refer to each other (children, parent, leaf
//! neighbours) by `NodeId` handle.
//!
//! ```
//! use bptree_index::{BPlusTree, Comparator};
//!
//! let mut calories = BPlusTree::new(4).unwrap();
//! calories.insert(120, "apple");
//! calories.insert(95, "banana");
//! calories.insert(120, "pear");
//!
//! let mut light = calories.range_search_by(&100, Comparator::LessOrEqual);
//! assert_eq!(light, [&"banana"]);
//!
//! light = calories.range_search(&120, "==");
//! light.sort();
//! assert_eq!(light, [&"apple", &"pear"]);
//! ```

mod arena;
mod comparator;
mod construction;
mod error;
mod get_operations;
mod insert_operations;
mod iteration;
mod macros;
mod node;
mod range_queries;
mod tree_structure;
mod types;
mod validation;

pub use arena::ArenaStats;
pub use comparator::Comparator;
pub use construction::validation::validate_branching_factor;
pub use error::{BPlusTreeError, BTreeResult, InitResult};
pub use iteration::{ItemIterator, KeyIterator, ValueIterator};
pub use types::{
    BPlusTree, InternalNode, LeafNode, NodeId, NodeRef, DEFAULT_BRANCHING_FACTOR,
    MIN_BRANCHING_FACTOR, NULL_NODE,
};
