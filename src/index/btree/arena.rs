//! Node storage.
//!
//! Every node of a tree lives in one [`NodeArena`]. Parent→child edges and
//! the reverse parent links are both stored as [`NodeId`]s, so the tree has
//! no reference cycles and no `Rc<RefCell<_>>` bookkeeping.

use slab::Slab;

use crate::common::{Error, NodeId, Result};
use crate::index::btree::Node;

/// Slab-backed slot storage for nodes.
///
/// Freed slots are recycled by the slab on the next allocation, so ids
/// of dead nodes may be reused.
#[derive(Debug, Clone)]
pub struct NodeArena<K, V> {
    slots: Slab<Node<K, V>>,
}

impl<K, V> NodeArena<K, V> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { slots: Slab::new() }
    }

    /// Store a node and return its id.
    pub fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        NodeId::new(self.slots.insert(node))
    }

    /// Remove a node, returning it.
    ///
    /// # Errors
    /// - `Error::NodeNotFound` if `id` is not live
    pub fn free(&mut self, id: NodeId) -> Result<Node<K, V>> {
        self.slots.try_remove(id.0).ok_or(Error::NodeNotFound(id))
    }

    /// Borrow a node.
    ///
    /// # Errors
    /// - `Error::NodeNotFound` if `id` is not live
    #[inline]
    pub fn get(&self, id: NodeId) -> Result<&Node<K, V>> {
        self.slots.get(id.0).ok_or(Error::NodeNotFound(id))
    }

    /// Mutably borrow a node.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node<K, V>> {
        self.slots.get_mut(id.0).ok_or(Error::NodeNotFound(id))
    }

    /// Mutably borrow two distinct nodes at once.
    ///
    /// [`BTreeCore::join`](super::BTreeCore::join) drains the dissolving
    /// node straight into its left sibling through this.
    ///
    /// # Errors
    /// - `Error::NodeNotFound` if either id is not live, or both ids are equal
    pub fn get2_mut(
        &mut self,
        a: NodeId,
        b: NodeId,
    ) -> Result<(&mut Node<K, V>, &mut Node<K, V>)> {
        // Slab panics on aliased keys
        if a == b || !self.slots.contains(a.0) {
            return Err(Error::NodeNotFound(a));
        }
        self.slots.get2_mut(a.0, b.0).ok_or(Error::NodeNotFound(b))
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.contains(id.0)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over live nodes in slot order (not tree order).
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<K, V>)> + '_ {
        self.slots.iter().map(|(i, node)| (NodeId::new(i), node))
    }
}

impl<K, V> Default for NodeArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::Degree;

    fn empty_node() -> Node<u32, u32> {
        Node::new(Degree::default())
    }

    #[test]
    fn test_alloc_and_get() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(empty_node());
        let b = arena.alloc(empty_node());

        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);

        arena.get_mut(a).unwrap().insert_entry(1, 10);
        assert_eq!(arena.get(a).unwrap().get(&1), Some(&10));
        assert!(arena.get(b).unwrap().is_empty());
    }

    #[test]
    fn test_free_and_stale_id() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(empty_node());

        assert!(arena.free(a).is_ok());
        assert!(!arena.contains(a));
        assert!(matches!(arena.get(a), Err(Error::NodeNotFound(id)) if id == a));
        assert!(matches!(arena.free(a), Err(Error::NodeNotFound(_))));
    }

    #[test]
    fn test_slot_reuse() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(empty_node());
        let _b = arena.alloc(empty_node());
        arena.free(a).unwrap();

        // Slab hands the vacated slot out again
        let c = arena.alloc(empty_node());
        assert_eq!(a, c);
    }

    #[test]
    fn test_get2_mut() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(empty_node());
        let b = arena.alloc(empty_node());

        {
            let (na, nb) = arena.get2_mut(a, b).unwrap();
            na.push_entry(1, 1);
            nb.push_entry(2, 2);
        }
        assert_eq!(arena.get(a).unwrap().len(), 1);
        assert_eq!(arena.get(b).unwrap().len(), 1);

        assert!(arena.get2_mut(a, a).is_err());
        assert!(arena.get2_mut(a, NodeId::new(99)).is_err());
    }
}
