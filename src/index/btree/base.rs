//! BTreeCore - node storage plus the shared rebalancing primitives.
//!
//! The core owns every node and the root id, and implements the
//! mechanical operations that any balancing policy composes:
//! - Edge maintenance: [`BTreeCore::attach_child`], [`BTreeCore::detach_child`]
//! - Navigation: [`BTreeCore::get_min_node`], [`BTreeCore::get_max_node`],
//!   [`BTreeCore::index_at_parent`]
//! - Underflow repair: [`BTreeCore::rotate_left`], [`BTreeCore::rotate_right`],
//!   [`BTreeCore::join`]
//!
//! Deciding *when* to split, rotate or join is the job of a
//! [`BalancePolicy`](super::BalancePolicy).

use tracing::{debug, trace};

use crate::common::config::Degree;
use crate::common::{Error, NodeId, Result};
use crate::index::btree::{Node, NodeArena, RebalanceStats};

/// Root, degree and node storage of one tree.
///
/// # Structure
/// ```text
/// ┌────────────────────────────────────────────────────────┐
/// │                      BTreeCore                         │
/// │  root: NodeId ──┐    degree: Degree (immutable)        │
/// │                 ▼                                      │
/// │  arena: NodeArena  [N0] [N1] [N2] [N3] ...             │
/// │           children: Vec<NodeId>   (owning edges)       │
/// │           parent:   Option<NodeId> (navigation only)   │
/// └────────────────────────────────────────────────────────┘
/// ```
///
/// The core always has a root; an empty tree is a root leaf with no keys.
#[derive(Debug, Clone)]
pub struct BTreeCore<K, V> {
    arena: NodeArena<K, V>,
    root: NodeId,
    degree: Degree,
    stats: RebalanceStats,
}

impl<K: Ord, V> BTreeCore<K, V> {
    /// Create a core holding a single empty root leaf.
    pub fn new(degree: Degree) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::new(degree));
        Self {
            arena,
            root,
            degree,
            stats: RebalanceStats::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Replace the root. The new root's parent link is cleared.
    pub fn set_root(&mut self, root: NodeId) -> Result<()> {
        self.node_mut(root)?.set_parent(None);
        self.root = root;
        Ok(())
    }

    #[inline]
    pub fn degree(&self) -> Degree {
        self.degree
    }

    pub fn arena(&self) -> &NodeArena<K, V> {
        &self.arena
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Result<&Node<K, V>> {
        self.arena.get(id)
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<K, V>> {
        self.arena.get_mut(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    /// Store a new node and return its id. Edges are not touched.
    pub fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        self.arena.alloc(node)
    }

    /// Remove a node from storage.
    pub fn free(&mut self, id: NodeId) -> Result<Node<K, V>> {
        self.arena.free(id)
    }

    pub fn stats(&self) -> &RebalanceStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut RebalanceStats {
        &mut self.stats
    }

    /// Number of levels (1 for a lone root leaf).
    pub fn height(&self) -> Result<usize> {
        let mut height = 1;
        let mut current = self.node(self.root)?;
        while let Some(child) = current.first_child() {
            current = self.node(child)?;
            height += 1;
        }
        Ok(height)
    }

    // ========================================================================
    // Edge maintenance
    // ========================================================================

    /// Insert `child` into `parent`'s children at `index` and point the
    /// child's parent link back at `parent`.
    pub fn attach_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        if !self.contains(child) {
            return Err(Error::NodeNotFound(child));
        }
        self.node_mut(parent)?.insert_child(index, child)?;
        self.node_mut(child)?.set_parent(Some(parent));
        Ok(())
    }

    /// Remove the child at `index` from `parent` and clear its parent link.
    pub fn detach_child(&mut self, parent: NodeId, index: usize) -> Result<NodeId> {
        let child = self.node_mut(parent)?.remove_child(index)?;
        self.node_mut(child)?.set_parent(None);
        Ok(child)
    }

    /// Point every id in `children` at `parent`.
    pub fn reparent(&mut self, children: &[NodeId], parent: NodeId) -> Result<()> {
        for &child in children {
            self.node_mut(child)?.set_parent(Some(parent));
        }
        Ok(())
    }

    /// This node's index among its parent's children.
    ///
    /// # Errors
    /// - `Error::Detached` if `id` is the root (or otherwise parentless)
    /// - `Error::NotAChild` if the parent link and child list disagree
    pub fn index_at_parent(&self, id: NodeId) -> Result<usize> {
        let parent = self.node(id)?.parent().ok_or(Error::Detached(id))?;
        self.node(parent)?
            .child_position(id)
            .ok_or(Error::NotAChild { parent, child: id })
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Leftmost leaf of the subtree rooted at `id`.
    ///
    /// O(depth); O(1) when `id` is already a leaf.
    pub fn get_min_node(&self, id: NodeId) -> Result<NodeId> {
        let mut current = id;
        while let Some(child) = self.node(current)?.first_child() {
            current = child;
        }
        Ok(current)
    }

    /// Rightmost leaf of the subtree rooted at `id`.
    pub fn get_max_node(&self, id: NodeId) -> Result<NodeId> {
        let mut current = id;
        while let Some(child) = self.node(current)?.last_child() {
            current = child;
        }
        Ok(current)
    }

    // ========================================================================
    // Underflow repair primitives
    // ========================================================================

    /// Borrow one key from `right_sibling` through the shared parent.
    ///
    /// ```text
    ///        [.. S ..]                  [.. m ..]
    ///        /      \        ==>        /      \
    ///    [node]   [m x y]          [node S]   [x y]
    /// ```
    ///
    /// The separator `S` at `separator_index` moves down into `node`, the
    /// sibling's minimum `m` moves up, and the sibling's first child (if
    /// any) becomes `node`'s last child.
    ///
    /// Returns the parent, which the caller re-checks for underflow.
    ///
    /// # Errors
    /// - `Error::Detached` if `node` has no parent
    /// - `Error::NotAChild` if the nodes are not the children at
    ///   `separator_index` and `separator_index + 1`
    /// - `Error::KeyNotFound` if `right_sibling` has nothing to lend
    ///
    /// # Panics
    /// Panics if afterwards `node` is not exactly min-full or the sibling
    /// underflows. That means the policy rotated on the wrong node.
    pub fn rotate_left(
        &mut self,
        node: NodeId,
        right_sibling: NodeId,
        separator_index: usize,
    ) -> Result<NodeId> {
        let parent = self.node(node)?.parent().ok_or(Error::Detached(node))?;
        self.check_adjacent(parent, node, right_sibling, separator_index)?;
        if self.node(right_sibling)?.is_empty() {
            return Err(Error::KeyNotFound);
        }

        let (sep_key, sep_value) = self.node_mut(parent)?.remove_entry_at(separator_index)?;
        self.node_mut(node)?.push_entry(sep_key, sep_value);

        let (min_key, min_value) = self
            .node_mut(right_sibling)?
            .pop_min_entry()
            .ok_or(Error::KeyNotFound)?;
        self.node_mut(parent)?
            .insert_entry_at(separator_index, min_key, min_value)?;

        if !self.node(right_sibling)?.is_leaf() {
            let child = self.detach_child(right_sibling, 0)?;
            let at = self.node(node)?.children().len();
            self.attach_child(node, at, child)?;
        }

        self.assert_rotated(node, right_sibling, "rotate_left")?;
        self.stats.rotations_left += 1;
        trace!(%node, %right_sibling, %parent, "rotated key left");

        Ok(parent)
    }

    /// Borrow one key from `left_sibling` through the shared parent.
    ///
    /// Mirror image of [`rotate_left`](Self::rotate_left): the sibling's
    /// maximum moves up, the separator moves down to the front of `node`,
    /// and the sibling's last child becomes `node`'s first child.
    pub fn rotate_right(
        &mut self,
        node: NodeId,
        left_sibling: NodeId,
        separator_index: usize,
    ) -> Result<NodeId> {
        let parent = self.node(node)?.parent().ok_or(Error::Detached(node))?;
        self.check_adjacent(parent, left_sibling, node, separator_index)?;
        if self.node(left_sibling)?.is_empty() {
            return Err(Error::KeyNotFound);
        }

        let (sep_key, sep_value) = self.node_mut(parent)?.remove_entry_at(separator_index)?;
        self.node_mut(node)?.insert_entry_at(0, sep_key, sep_value)?;

        let (max_key, max_value) = self
            .node_mut(left_sibling)?
            .pop_max_entry()
            .ok_or(Error::KeyNotFound)?;
        self.node_mut(parent)?
            .insert_entry_at(separator_index, max_key, max_value)?;

        if !self.node(left_sibling)?.is_leaf() {
            let last = self.node(left_sibling)?.children().len() - 1;
            let child = self.detach_child(left_sibling, last)?;
            self.attach_child(node, 0, child)?;
        }

        self.assert_rotated(node, left_sibling, "rotate_right")?;
        self.stats.rotations_right += 1;
        trace!(%node, %left_sibling, %parent, "rotated key right");

        Ok(parent)
    }

    /// Merge `node` into its left neighbour `left_sibling`.
    ///
    /// ```text
    ///      [.. S ..]                 [.. ..]
    ///      /      \       ==>           |
    ///   [a b]   [node]             [a b S node..]
    /// ```
    ///
    /// The separator between the two moves down onto `left_sibling`,
    /// followed by all of `node`'s entries and children. `node` is freed.
    ///
    /// Returns `Some(parent)` for the caller's cascading underflow check,
    /// or `None` when the parent was the root and became empty: the tree
    /// then shrinks by one level and `left_sibling` is the new root.
    ///
    /// # Errors
    /// - `Error::Detached` if `left_sibling` has no parent
    /// - `Error::NotAChild` if `node` is not directly right of `left_sibling`
    ///
    /// # Panics
    /// Panics if `left_sibling` overflows, i.e. the policy joined nodes
    /// that should have rotated.
    pub fn join(&mut self, node: NodeId, left_sibling: NodeId) -> Result<Option<NodeId>> {
        let index = self.index_at_parent(left_sibling)?;
        let parent = self
            .node(left_sibling)?
            .parent()
            .ok_or(Error::Detached(left_sibling))?;
        self.check_adjacent(parent, left_sibling, node, index)?;

        let (sep_key, sep_value) = self.node_mut(parent)?.remove_entry_at(index)?;
        self.node_mut(parent)?.remove_child(index + 1)?;

        let (merged, dissolved) = self.arena.get2_mut(left_sibling, node)?;
        let (entries, children) = dissolved.take_contents();
        merged.push_entry(sep_key, sep_value);
        merged.extend_entries(entries);
        merged.extend_children(children.clone());
        assert!(
            !merged.is_overflow(),
            "join: {} overflowed with {} keys",
            left_sibling,
            merged.len()
        );
        self.reparent(&children, left_sibling)?;
        self.free(node)?;
        self.stats.joins += 1;
        trace!(%node, %left_sibling, %parent, "joined into left sibling");

        let parent_node = self.node(parent)?;
        if parent_node.is_empty() && parent_node.is_root() {
            self.free(parent)?;
            self.set_root(left_sibling)?;
            self.stats.root_shrinks += 1;
            debug!(new_root = %left_sibling, "root collapsed, tree shrank one level");
            return Ok(None);
        }

        Ok(Some(parent))
    }

    /// Verify `left` and `right` sit either side of `separator_index`.
    fn check_adjacent(
        &self,
        parent: NodeId,
        left: NodeId,
        right: NodeId,
        separator_index: usize,
    ) -> Result<()> {
        let parent_node = self.node(parent)?;
        parent_node.key_at(separator_index)?;
        if parent_node.child_at(separator_index)? != left {
            return Err(Error::NotAChild {
                parent,
                child: left,
            });
        }
        if parent_node.child_at(separator_index + 1)? != right {
            return Err(Error::NotAChild {
                parent,
                child: right,
            });
        }
        Ok(())
    }

    fn assert_rotated(&self, node: NodeId, sibling: NodeId, op: &str) -> Result<()> {
        let (n, s) = (self.node(node)?, self.node(sibling)?);
        assert!(
            n.is_min_full() && !s.is_underflow(),
            "{}: {} has {} keys and sibling {} has {} keys (min {})",
            op,
            node,
            n.len(),
            sibling,
            s.len(),
            self.degree.min_keys()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Core = BTreeCore<i32, i32>;

    /// Allocate a node holding `keys` and append it to `parent`'s children.
    fn add(core: &mut Core, parent: NodeId, keys: &[i32]) -> NodeId {
        let id = core.alloc(Node::new(core.degree()));
        for &k in keys {
            core.node_mut(id).unwrap().push_entry(k, k * 10);
        }
        let at = core.node(parent).unwrap().children().len();
        core.attach_child(parent, at, id).unwrap();
        id
    }

    fn set_keys(core: &mut Core, id: NodeId, keys: &[i32]) {
        let node = core.node_mut(id).unwrap();
        while node.pop_max_entry().is_some() {}
        for &k in keys {
            node.push_entry(k, k * 10);
        }
    }

    fn keys(core: &Core, id: NodeId) -> Vec<i32> {
        core.node(id).unwrap().keys().copied().collect()
    }

    /// Degree 4 (min 1): root [20] over [10] and [30 40].
    fn two_level() -> (Core, NodeId, NodeId) {
        let mut core = Core::new(Degree::new(4).unwrap());
        let root = core.root();
        set_keys(&mut core, root, &[20]);
        let left = add(&mut core, root, &[10]);
        let right = add(&mut core, root, &[30, 40]);
        (core, left, right)
    }

    /// Degree 3 (min 1, max 2):
    /// ```text
    ///                [40]
    ///        [20]             [60 80]
    ///    [10]    [30]     [50]  [70]  [90]
    /// ```
    fn three_level() -> (Core, Vec<NodeId>) {
        let mut core = Core::new(Degree::new(3).unwrap());
        let root = core.root();
        set_keys(&mut core, root, &[40]);
        let a = add(&mut core, root, &[20]);
        let b = add(&mut core, root, &[60, 80]);
        let a0 = add(&mut core, a, &[10]);
        let a1 = add(&mut core, a, &[30]);
        let b0 = add(&mut core, b, &[50]);
        let b1 = add(&mut core, b, &[70]);
        let b2 = add(&mut core, b, &[90]);
        (core, vec![root, a, b, a0, a1, b0, b1, b2])
    }

    #[test]
    fn test_new_core_is_empty_root_leaf() {
        let core = Core::new(Degree::default());
        let root = core.node(core.root()).unwrap();
        assert!(root.is_leaf());
        assert!(root.is_root());
        assert!(root.is_empty());
        assert_eq!(core.height().unwrap(), 1);
    }

    #[test]
    fn test_attach_sets_parent_link() {
        let (core, left, right) = two_level();
        assert_eq!(core.node(left).unwrap().parent(), Some(core.root()));
        assert_eq!(core.index_at_parent(left).unwrap(), 0);
        assert_eq!(core.index_at_parent(right).unwrap(), 1);
        assert_eq!(
            core.index_at_parent(core.root()),
            Err(Error::Detached(core.root()))
        );
    }

    #[test]
    fn test_detach_clears_parent_link() {
        let (mut core, left, _) = two_level();
        let root = core.root();
        let detached = core.detach_child(root, 0).unwrap();
        assert_eq!(detached, left);
        assert!(core.node(left).unwrap().is_root());
    }

    #[test]
    fn test_min_max_node_three_levels() {
        let (core, ids) = three_level();
        let root = ids[0];
        assert_eq!(core.get_min_node(root).unwrap(), ids[3]);
        assert_eq!(core.get_max_node(root).unwrap(), ids[7]);
        assert_eq!(keys(&core, core.get_min_node(root).unwrap()), vec![10]);
        assert_eq!(keys(&core, core.get_max_node(root).unwrap()), vec![90]);

        // Already a leaf: returns itself
        assert_eq!(core.get_min_node(ids[5]).unwrap(), ids[5]);
        assert_eq!(core.height().unwrap(), 3);
    }

    #[test]
    fn test_rotate_left_leaves() {
        let (mut core, left, right) = two_level();
        set_keys(&mut core, left, &[]);

        let parent = core.rotate_left(left, right, 0).unwrap();
        assert_eq!(parent, core.root());
        assert_eq!(keys(&core, left), vec![20]);
        assert_eq!(keys(&core, core.root()), vec![30]);
        assert_eq!(keys(&core, right), vec![40]);
        assert!(core.node(left).unwrap().is_min_full());
        assert!(core.node(right).unwrap().is_min_full());
        assert_eq!(core.stats().rotations_left, 1);
    }

    #[test]
    fn test_rotate_left_lender_keeps_spare() {
        // Degree 5 (min 2, max 4): root [30] over [10] and [40 50 60 70]
        let mut core = Core::new(Degree::new(5).unwrap());
        let root = core.root();
        set_keys(&mut core, root, &[30]);
        let left = add(&mut core, root, &[10]);
        let right = add(&mut core, root, &[40, 50, 60, 70]);

        core.rotate_left(left, right, 0).unwrap();
        assert_eq!(keys(&core, left), vec![10, 30]);
        assert_eq!(keys(&core, root), vec![40]);
        assert_eq!(keys(&core, right), vec![50, 60, 70]);

        let (node, lender) = (core.node(left).unwrap(), core.node(right).unwrap());
        assert!(node.is_min_full());
        assert!(!lender.is_min_full());
        assert!(lender.has_spare_key());
    }

    #[test]
    fn test_rotate_right_leaves() {
        let (mut core, left, right) = two_level();
        set_keys(&mut core, left, &[5, 10]);
        set_keys(&mut core, right, &[]);

        core.rotate_right(right, left, 0).unwrap();
        assert_eq!(keys(&core, left), vec![5]);
        assert_eq!(keys(&core, core.root()), vec![10]);
        assert_eq!(keys(&core, right), vec![20]);
        // Values travel with their keys
        assert_eq!(core.node(right).unwrap().get(&20), Some(&200));
        assert_eq!(core.stats().rotations_right, 1);
    }

    #[test]
    fn test_rotate_rejects_non_adjacent() {
        let (mut core, left, right) = two_level();
        set_keys(&mut core, left, &[]);
        assert_eq!(
            core.rotate_left(right, left, 0),
            Err(Error::NotAChild {
                parent: core.root(),
                child: right
            })
        );
        let root = core.root();
        assert_eq!(core.rotate_left(root, left, 0), Err(Error::Detached(root)));
        // Nothing moved
        assert_eq!(keys(&core, core.root()), vec![20]);
    }

    #[test]
    fn test_join_collapses_root() {
        let (mut core, left, right) = two_level();
        let old_root = core.root();
        set_keys(&mut core, right, &[]);

        let next = core.join(right, left).unwrap();
        assert_eq!(next, None);
        assert_eq!(core.root(), left);
        assert!(core.node(left).unwrap().is_root());
        assert_eq!(keys(&core, left), vec![10, 20]);
        assert!(!core.contains(right));
        assert!(!core.contains(old_root));
        assert_eq!(core.stats().root_shrinks, 1);
        assert_eq!(core.height().unwrap(), 1);
    }

    #[test]
    fn test_join_internal_reparents_children() {
        let (mut core, ids) = three_level();
        let (root, a, b, a0, b0, b1) = (ids[0], ids[1], ids[2], ids[3], ids[5], ids[6]);

        // Shrink b to [60] over b0 b1, and empty a down to its first child
        core.detach_child(b, 2).unwrap();
        set_keys(&mut core, b, &[60]);
        core.detach_child(a, 1).unwrap();
        set_keys(&mut core, a, &[]);

        let next = core.join(b, a).unwrap();
        assert_eq!(next, None);
        assert_eq!(core.root(), a);
        assert!(!core.contains(b));
        assert!(!core.contains(root));
        assert_eq!(keys(&core, a), vec![40, 60]);
        assert_eq!(core.node(a).unwrap().children(), &[a0, b0, b1]);
        assert_eq!(core.node(b0).unwrap().parent(), Some(a));
        assert_eq!(core.node(b1).unwrap().parent(), Some(a));
    }

    #[test]
    fn test_join_then_rotate_internal_cascade() {
        let (mut core, ids) = three_level();
        let (root, a, b, a0, a1, b0, b1, b2) =
            (ids[0], ids[1], ids[2], ids[3], ids[4], ids[5], ids[6], ids[7]);

        // Delete 10: a0 underflows, a1 has no spare key -> join
        set_keys(&mut core, a0, &[]);
        let next = core.join(a1, a0).unwrap();
        assert_eq!(next, Some(a));
        assert_eq!(keys(&core, a0), vec![20, 30]);
        assert!(core.node(a).unwrap().is_empty());
        assert!(!core.contains(a1));

        // a underflows, b has a spare key -> rotate left, b0 moves across
        let parent = core.rotate_left(a, b, 0).unwrap();
        assert_eq!(parent, root);
        assert_eq!(keys(&core, root), vec![60]);
        assert_eq!(keys(&core, a), vec![40]);
        assert_eq!(keys(&core, b), vec![80]);
        assert_eq!(core.node(a).unwrap().children(), &[a0, b0]);
        assert_eq!(core.node(b).unwrap().children(), &[b1, b2]);
        assert_eq!(core.node(b0).unwrap().parent(), Some(a));
    }

    #[test]
    fn test_rotate_right_moves_last_child() {
        let (mut core, ids) = three_level();
        let (root, a, b, b2) = (ids[0], ids[1], ids[2], ids[7]);

        // a underflows with a single child; borrow from b first
        let a1 = core.detach_child(a, 1).unwrap();
        core.free(a1).unwrap();
        set_keys(&mut core, a, &[]);
        core.rotate_left(a, b, 0).unwrap();
        assert_eq!(keys(&core, root), vec![60]);

        let b_children_before = core.node(b).unwrap().children().to_vec();
        assert_eq!(b_children_before.last(), Some(&b2));

        // Give a a spare key and a third child, then let b underflow
        set_keys(&mut core, a, &[40, 55]);
        let extra = core.alloc(Node::new(core.degree()));
        core.node_mut(extra).unwrap().push_entry(58, 580);
        let at = core.node(a).unwrap().children().len();
        core.attach_child(a, at, extra).unwrap();
        let b1 = core.detach_child(b, 0).unwrap();
        core.free(b1).unwrap();
        set_keys(&mut core, b, &[]);

        core.rotate_right(b, a, 0).unwrap();
        assert_eq!(keys(&core, a), vec![40]);
        assert_eq!(keys(&core, root), vec![55]);
        assert_eq!(keys(&core, b), vec![60]);
        assert_eq!(core.node(b).unwrap().first_child(), Some(extra));
        assert_eq!(core.node(extra).unwrap().parent(), Some(b));
    }

    #[test]
    #[should_panic(expected = "rotate_left")]
    fn test_rotate_on_healthy_node_panics() {
        let (mut core, left, right) = two_level();
        // left is not underflowing, so after the rotation it holds 2 keys
        core.rotate_left(left, right, 0).unwrap();
    }
}
