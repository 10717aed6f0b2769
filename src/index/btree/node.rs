//! Node - one vertex of a B-tree.
//!
//! A [`Node`] holds:
//! - Ordered `(key, value)` entries (strictly increasing keys)
//! - Child ids (one more than the entries for internal nodes, none for leaves)
//! - A non-owning parent link
//!
//! Nodes never touch other nodes. Anything that needs both sides of an
//! edge (re-parenting, sibling lookups) lives on
//! [`BTreeCore`](super::BTreeCore).

use crate::common::config::Degree;
use crate::common::{Error, NodeId, Result};

/// A single B-tree node.
///
/// The node knows its [`Degree`] so the fullness predicates can be answered
/// locally. Entry and child vectors may temporarily exceed or fall short of
/// the bounds while an insert or delete is in progress; only the
/// predicates tell the policy that a repair is due.
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    /// Sorted entries.
    entries: Vec<(K, V)>,

    /// Child ids in key order. Empty for leaves.
    children: Vec<NodeId>,

    /// Navigational link only, never ownership. `None` for the root.
    parent: Option<NodeId>,

    degree: Degree,
}

impl<K: Ord, V> Node<K, V> {
    /// Create an empty, parentless leaf.
    pub fn new(degree: Degree) -> Self {
        Self {
            entries: Vec::with_capacity(degree.max_keys() + 1),
            children: Vec::new(),
            parent: None,
            degree,
        }
    }

    /// Create a node from parts. Used by splitting policies.
    pub fn from_parts(
        degree: Degree,
        entries: Vec<(K, V)>,
        children: Vec<NodeId>,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            entries,
            children,
            parent,
            degree,
        }
    }

    // ========================================================================
    // Entry access
    // ========================================================================

    /// Number of keys in the node.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn degree(&self) -> Degree {
        self.degree
    }

    pub fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Binary search for `key`.
    ///
    /// Returns `Ok(index)` when present, `Err(index)` with the insertion
    /// point (equivalently, the child to descend into) otherwise.
    #[inline]
    pub fn position(&self, key: &K) -> std::result::Result<usize, usize> {
        self.entries.binary_search_by(|(k, _)| k.cmp(key))
    }

    /// Key at `index`.
    ///
    /// # Errors
    /// - `Error::KeyIndexOutOfRange` if `index >= len()`
    pub fn key_at(&self, index: usize) -> Result<&K> {
        self.entries
            .get(index)
            .map(|(k, _)| k)
            .ok_or(Error::KeyIndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Value at `index`.
    pub fn value_at(&self, index: usize) -> Result<&V> {
        self.entries
            .get(index)
            .map(|(_, v)| v)
            .ok_or(Error::KeyIndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Mutable value at `index`.
    pub fn value_at_mut(&mut self, index: usize) -> Result<&mut V> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .map(|(_, v)| v)
            .ok_or(Error::KeyIndexOutOfRange { index, len })
    }

    /// Value stored under `key`, if this node holds it.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.position(key).ok().map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.position(key) {
            Ok(i) => Some(&mut self.entries[i].1),
            Err(_) => None,
        }
    }

    /// Smallest entry in this node (not the subtree).
    pub fn min_entry(&self) -> Option<&(K, V)> {
        self.entries.first()
    }

    /// Largest entry in this node (not the subtree).
    pub fn max_entry(&self) -> Option<&(K, V)> {
        self.entries.last()
    }

    // ========================================================================
    // Entry mutation
    // ========================================================================

    /// Insert keeping sort order.
    ///
    /// If the key is already present its value is replaced and the old
    /// value returned; the key count is unchanged in that case.
    pub fn insert_entry(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Ok(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            Err(i) => {
                self.entries.insert(i, (key, value));
                None
            }
        }
    }

    /// Insert at an explicit slot. The caller guarantees order.
    ///
    /// # Errors
    /// - `Error::KeyIndexOutOfRange` if `index > len()`
    pub fn insert_entry_at(&mut self, index: usize, key: K, value: V) -> Result<()> {
        if index > self.entries.len() {
            return Err(Error::KeyIndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        self.entries.insert(index, (key, value));
        Ok(())
    }

    /// Append as the new maximum. The caller guarantees order.
    pub fn push_entry(&mut self, key: K, value: V) {
        self.entries.push((key, value));
    }

    /// Remove the entry stored under `key`.
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if the node does not hold `key`
    pub fn remove_entry(&mut self, key: &K) -> Result<(K, V)> {
        match self.position(key) {
            Ok(i) => Ok(self.entries.remove(i)),
            Err(_) => Err(Error::KeyNotFound),
        }
    }

    /// Remove the entry at `index`.
    pub fn remove_entry_at(&mut self, index: usize) -> Result<(K, V)> {
        if index >= self.entries.len() {
            return Err(Error::KeyIndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Swap in a new entry at `index`, returning the old one.
    pub fn replace_entry_at(&mut self, index: usize, key: K, value: V) -> Result<(K, V)> {
        let len = self.entries.len();
        let slot = self
            .entries
            .get_mut(index)
            .ok_or(Error::KeyIndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, (key, value)))
    }

    pub fn pop_min_entry(&mut self) -> Option<(K, V)> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    pub fn pop_max_entry(&mut self) -> Option<(K, V)> {
        self.entries.pop()
    }

    /// Split off entries `[at, len)` and children `[at, ..)`.
    ///
    /// The entry at `at - 1` stays in `self` next to its left child;
    /// splitting policies pop it afterwards as the median, which leaves
    /// `self` with one more child than keys again.
    pub fn split_off(&mut self, at: usize) -> (Vec<(K, V)>, Vec<NodeId>) {
        let entries = self.entries.split_off(at);
        let children = if self.children.is_empty() {
            Vec::new()
        } else {
            self.children.split_off(at)
        };
        (entries, children)
    }

    /// Move out every entry and child, leaving an empty detached node.
    pub fn take_contents(&mut self) -> (Vec<(K, V)>, Vec<NodeId>) {
        self.parent = None;
        (
            std::mem::take(&mut self.entries),
            std::mem::take(&mut self.children),
        )
    }

    /// Append entries that are all greater than the current maximum.
    pub fn extend_entries(&mut self, entries: Vec<(K, V)>) {
        self.entries.extend(entries);
    }

    /// Drop all entries and children and detach from the parent.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.children.clear();
        self.parent = None;
    }

    // ========================================================================
    // Children
    // ========================================================================

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Child id at `index`.
    ///
    /// # Errors
    /// - `Error::ChildIndexOutOfRange` if `index >= children().len()`
    pub fn child_at(&self, index: usize) -> Result<NodeId> {
        self.children
            .get(index)
            .copied()
            .ok_or(Error::ChildIndexOutOfRange {
                index,
                len: self.children.len(),
            })
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.children.first().copied()
    }

    pub fn last_child(&self) -> Option<NodeId> {
        self.children.last().copied()
    }

    /// Position of `child` among this node's children.
    pub fn child_position(&self, child: NodeId) -> Option<usize> {
        self.children.iter().position(|&c| c == child)
    }

    /// Insert a child id at `index`.
    ///
    /// This only edits the child list; the child's parent link is updated
    /// by `BTreeCore::attach_child`.
    pub fn insert_child(&mut self, index: usize, child: NodeId) -> Result<()> {
        if index > self.children.len() {
            return Err(Error::ChildIndexOutOfRange {
                index,
                len: self.children.len(),
            });
        }
        self.children.insert(index, child);
        Ok(())
    }

    pub fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub fn remove_child(&mut self, index: usize) -> Result<NodeId> {
        if index >= self.children.len() {
            return Err(Error::ChildIndexOutOfRange {
                index,
                len: self.children.len(),
            });
        }
        Ok(self.children.remove(index))
    }

    pub fn extend_children(&mut self, children: Vec<NodeId>) {
        self.children.extend(children);
    }

    // ========================================================================
    // Parent link
    // ========================================================================

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exactly `min_keys` keys: one more removal would underflow.
    #[inline]
    pub fn is_min_full(&self) -> bool {
        self.entries.len() == self.degree.min_keys()
    }

    /// Exactly `max_keys` keys: one more insert would overflow.
    #[inline]
    pub fn is_max_full(&self) -> bool {
        self.entries.len() == self.degree.max_keys()
    }

    /// Fewer than `min_keys` keys.
    #[inline]
    pub fn is_underflow(&self) -> bool {
        self.entries.len() < self.degree.min_keys()
    }

    /// More than `max_keys` keys.
    #[inline]
    pub fn is_overflow(&self) -> bool {
        self.entries.len() > self.degree.max_keys()
    }

    /// At least one key above `min_keys`, so a sibling may borrow from it.
    #[inline]
    pub fn has_spare_key(&self) -> bool {
        self.entries.len() > self.degree.min_keys()
    }
}
