//! Append-only arena addressed by `NodeId`.
//!
//! Nodes are never freed, so a handle handed out by `allocate` stays valid for
//! the life of the arena and indexing with it cannot fail.

use std::convert::TryFrom;
use std::ops::{Index, IndexMut};

pub type NodeId = u32;
pub const NULL_NODE: NodeId = u32::MAX;

/// Statistics for an arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaStats {
    pub total_capacity: usize,
    pub allocated_count: usize,
    pub utilization: f64,
}

/// Vec-backed node storage.
#[derive(Debug)]
pub struct Arena<T> {
    storage: Vec<T>,
}

impl<T> Arena<T> {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
        }
    }

    /// Store an item and return its ID
    #[inline]
    pub fn allocate(&mut self, item: T) -> NodeId {
        let index = self.storage.len();
        let id = NodeId::try_from(index)
            .ok()
            .filter(|id| *id != NULL_NODE)
            .expect("arena exhausted the NodeId space");
        self.storage.push(item);
        id
    }

    /// Get a reference to an item, `None` for `NULL_NODE` or unknown IDs
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        if id == NULL_NODE {
            return None;
        }
        self.storage.get(usize::try_from(id).ok()?)
    }

    /// Get the number of allocated items
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Get arena statistics
    pub fn stats(&self) -> ArenaStats {
        let total_capacity = self.storage.capacity();
        let allocated_count = self.len();
        let utilization = if self.is_empty() {
            0.0
        } else {
            allocated_count as f64 / total_capacity as f64
        };

        ArenaStats {
            total_capacity,
            allocated_count,
            utilization,
        }
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: NodeId) -> &T {
        &self.storage[id as usize]
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.storage[id as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_basic_operations() {
        let mut arena = Arena::new();

        let id1 = arena.allocate(42);
        let id2 = arena.allocate(84);
        let id3 = arena.allocate(126);

        assert_eq!((id1, id2, id3), (0, 1, 2));
        assert_eq!(arena.get(id1), Some(&42));
        assert_eq!(arena[id2], 84);
        assert_eq!(arena.get(id3), Some(&126));

        assert!(arena.get(NULL_NODE).is_none());
        assert!(arena.get(3).is_none());

        let stats = arena.stats();
        assert_eq!(stats.allocated_count, 3);
    }

    #[test]
    fn test_arena_mutation_through_handle() {
        let mut arena = Arena::new();
        let id = arena.allocate(String::from("leaf"));

        arena[id].push_str("-split");

        assert_eq!(arena[id], "leaf-split");
        assert_eq!(arena.get(id).map(String::len), Some(10));
    }

    #[test]
    fn test_empty_arena_stats() {
        let arena: Arena<u8> = Arena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.stats().utilization, 0.0);
    }
}
