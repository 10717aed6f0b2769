//! ClassicPolicy - the textbook B-tree.
//!
//! # Insert
//! Insert into the leaf, then split bottom-up while a node overflows:
//! ```text
//!   degree 4, insert 4:
//!   [1 2 3 4]   ==>      [3]
//!                       /   \
//!                   [1 2]   [4]
//! ```
//! The median moves into the parent; splitting the root adds a level.
//!
//! # Delete
//! Internal keys are swapped with their in-order predecessor so removal
//! always happens in a leaf. While the node underflows:
//! 1. rotate right from a left sibling with a spare key, else
//! 2. rotate left from a right sibling with a spare key, else
//! 3. join with a sibling and re-check the parent.

use tracing::{debug, trace};

use crate::common::{Error, NodeId, Result};
use crate::index::btree::{BTreeCore, BalancePolicy, Node};

/// General B-tree policy for any degree ≥ 3.
///
/// Degree 3 gives a 2-3 tree and degree 4 a 2-3-4 tree. Duplicate keys
/// replace the stored value in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassicPolicy;

impl ClassicPolicy {
    pub fn new() -> Self {
        ClassicPolicy
    }
}

impl<K: Ord, V> BalancePolicy<K, V> for ClassicPolicy {
    fn find_leaf_to_insert_key(&self, core: &BTreeCore<K, V>, key: &K) -> Result<NodeId> {
        let (node, _) = descend(core, key)?;
        Ok(node)
    }

    fn insert_in_leaf(
        &self,
        core: &mut BTreeCore<K, V>,
        leaf: NodeId,
        key: K,
        value: V,
    ) -> Result<Option<V>> {
        if let Some(old) = core.node_mut(leaf)?.insert_entry(key, value) {
            return Ok(Some(old));
        }

        let mut current = leaf;
        while core.node(current)?.is_overflow() {
            current = split(core, current)?;
        }
        Ok(None)
    }

    fn delete(&self, core: &mut BTreeCore<K, V>, node: NodeId, key: &K) -> Result<(K, V)> {
        let index = core
            .node(node)?
            .position(key)
            .map_err(|_| Error::KeyNotFound)?;

        let (removed, leaf) = if core.node(node)?.is_leaf() {
            (core.node_mut(node)?.remove_entry_at(index)?, node)
        } else {
            // Swap with the in-order predecessor, the max of the left subtree
            let left_child = core.node(node)?.child_at(index)?;
            let leaf = core.get_max_node(left_child)?;
            let (pred_key, pred_value) = core
                .node_mut(leaf)?
                .pop_max_entry()
                .ok_or(Error::KeyNotFound)?;
            let removed = core
                .node_mut(node)?
                .replace_entry_at(index, pred_key, pred_value)?;
            (removed, leaf)
        };

        repair_underflow(core, leaf)?;
        Ok(removed)
    }

    fn search(&self, core: &BTreeCore<K, V>, key: &K) -> Result<Option<NodeId>> {
        let (node, found) = descend(core, key)?;
        Ok(found.then_some(node))
    }

    fn sorted_key_values<'a>(
        &self,
        core: &'a BTreeCore<K, V>,
        subtree_root: NodeId,
    ) -> Result<Vec<(&'a K, &'a V)>> {
        let mut out = Vec::new();
        collect_in_order(core, subtree_root, &mut out)?;
        Ok(out)
    }
}

/// Walk from the root towards `key`.
///
/// Returns the node holding `key` and `true`, or the leaf where the
/// search ended and `false`.
fn descend<K: Ord, V>(core: &BTreeCore<K, V>, key: &K) -> Result<(NodeId, bool)> {
    let mut current = core.root();
    loop {
        let node = core.node(current)?;
        match node.position(key) {
            Ok(_) => return Ok((current, true)),
            Err(_) if node.is_leaf() => return Ok((current, false)),
            Err(i) => current = node.child_at(i)?,
        }
    }
}

/// Split an overflowing node around its median. Returns the parent.
fn split<K: Ord, V>(core: &mut BTreeCore<K, V>, id: NodeId) -> Result<NodeId> {
    let degree = core.degree();
    let node = core.node_mut(id)?;
    let mid = node.len() / 2;
    let (right_entries, right_children) = node.split_off(mid + 1);
    let (median_key, median_value) = node.pop_max_entry().ok_or(Error::KeyNotFound)?;
    let parent = node.parent();

    let right = core.alloc(Node::from_parts(
        degree,
        right_entries,
        right_children,
        None,
    ));
    let moved = core.node(right)?.children().to_vec();
    core.reparent(&moved, right)?;

    let parent = match parent {
        Some(parent) => {
            let index = core.index_at_parent(id)?;
            core.node_mut(parent)?
                .insert_entry_at(index, median_key, median_value)?;
            core.attach_child(parent, index + 1, right)?;
            parent
        }
        None => {
            let new_root = core.alloc(Node::from_parts(
                degree,
                vec![(median_key, median_value)],
                Vec::new(),
                None,
            ));
            core.attach_child(new_root, 0, id)?;
            core.attach_child(new_root, 1, right)?;
            core.set_root(new_root)?;
            core.stats_mut().root_grows += 1;
            debug!(%new_root, "root split, tree grew one level");
            new_root
        }
    };

    core.stats_mut().splits += 1;
    trace!(node = %id, %right, %parent, "split");
    Ok(parent)
}

/// Rotate or join upwards from `start` until nothing underflows.
fn repair_underflow<K: Ord, V>(core: &mut BTreeCore<K, V>, start: NodeId) -> Result<()> {
    let mut current = start;
    loop {
        let node = core.node(current)?;
        // The root may hold any number of keys
        let Some(parent) = node.parent() else {
            return Ok(());
        };
        if !node.is_underflow() {
            return Ok(());
        }

        let index = core.index_at_parent(current)?;
        let siblings = core.node(parent)?.children();
        let left = index.checked_sub(1).map(|i| siblings[i]);
        let right = siblings.get(index + 1).copied();

        if let Some(left) = left {
            if core.node(left)?.has_spare_key() {
                core.rotate_right(current, left, index - 1)?;
                return Ok(());
            }
        }
        if let Some(right) = right {
            if core.node(right)?.has_spare_key() {
                core.rotate_left(current, right, index)?;
                return Ok(());
            }
        }

        let next = match (left, right) {
            (Some(left), _) => core.join(current, left)?,
            (None, Some(right)) => core.join(right, current)?,
            (None, None) => {
                return Err(Error::InvariantViolation(format!(
                    "{} underflows but has no siblings",
                    current
                )))
            }
        };

        match next {
            Some(parent) => current = parent,
            None => return Ok(()),
        }
    }
}

fn collect_in_order<'a, K: Ord, V>(
    core: &'a BTreeCore<K, V>,
    id: NodeId,
    out: &mut Vec<(&'a K, &'a V)>,
) -> Result<()> {
    let node = core.node(id)?;
    let children = node.children();
    for (i, (key, value)) in node.entries().iter().enumerate() {
        if let Some(&child) = children.get(i) {
            collect_in_order(core, child, out)?;
        }
        out.push((key, value));
    }
    if let Some(&last) = children.get(node.len()) {
        collect_in_order(core, last, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::Degree;

    fn core_with(degree: usize, keys: &[i32]) -> BTreeCore<i32, i32> {
        let mut core = BTreeCore::new(Degree::new(degree).unwrap());
        let policy = ClassicPolicy;
        for &k in keys {
            let leaf = policy.find_leaf_to_insert_key(&core, &k).unwrap();
            policy.insert_in_leaf(&mut core, leaf, k, k * 10).unwrap();
        }
        core
    }

    fn in_order(core: &BTreeCore<i32, i32>) -> Vec<i32> {
        ClassicPolicy
            .sorted_key_values(core, core.root())
            .unwrap()
            .into_iter()
            .map(|(k, _)| *k)
            .collect()
    }

    #[test]
    fn test_split_root_degree_4() {
        let core = core_with(4, &[1, 2, 3, 4]);
        let root = core.node(core.root()).unwrap();
        assert_eq!(root.keys().copied().collect::<Vec<_>>(), vec![3]);
        assert_eq!(root.children().len(), 2);

        let left = core.node(root.children()[0]).unwrap();
        let right = core.node(root.children()[1]).unwrap();
        assert_eq!(left.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(right.keys().copied().collect::<Vec<_>>(), vec![4]);
        assert_eq!(left.parent(), Some(core.root()));
        assert_eq!(core.stats().root_grows, 1);
    }

    #[test]
    fn test_duplicate_insert_replaces() {
        let mut core = core_with(3, &[1, 2, 3]);
        let policy = ClassicPolicy;
        let node = policy.find_leaf_to_insert_key(&core, &2).unwrap();
        let old = policy.insert_in_leaf(&mut core, node, 2, 99).unwrap();
        assert_eq!(old, Some(20));
        assert_eq!(in_order(&core), vec![1, 2, 3]);

        let holder = policy.search(&core, &2).unwrap().unwrap();
        assert_eq!(core.node(holder).unwrap().get(&2), Some(&99));
    }

    #[test]
    fn test_search_absent() {
        let core = core_with(4, &[10, 20, 30]);
        assert_eq!(ClassicPolicy.search(&core, &15).unwrap(), None);
    }

    #[test]
    fn test_delete_internal_uses_predecessor() {
        let mut core = core_with(4, &[1, 2, 3, 4, 5]);
        // root [3], leaves [1 2] [4 5]
        let policy = ClassicPolicy;
        let holder = policy.search(&core, &3).unwrap().unwrap();
        assert_eq!(holder, core.root());

        let removed = policy.delete(&mut core, holder, &3).unwrap();
        assert_eq!(removed, (3, 30));
        assert_eq!(
            core.node(core.root()).unwrap().keys().copied().collect::<Vec<_>>(),
            vec![2]
        );
        assert_eq!(in_order(&core), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_delete_triggers_rotation() {
        // degree 4: root [3], leaves [1 2] [4]
        let mut core = core_with(4, &[1, 2, 3, 4]);
        let policy = ClassicPolicy;
        let holder = policy.search(&core, &4).unwrap().unwrap();
        policy.delete(&mut core, holder, &4).unwrap();

        assert_eq!(core.stats().rotations_right, 1);
        assert_eq!(in_order(&core), vec![1, 2, 3]);
        assert_eq!(core.height().unwrap(), 2);
    }

    #[test]
    fn test_delete_triggers_join_and_shrink() {
        // degree 3: root [2], leaves [1] [3]
        let mut core = core_with(3, &[1, 2, 3]);
        let policy = ClassicPolicy;
        let holder = policy.search(&core, &1).unwrap().unwrap();
        policy.delete(&mut core, holder, &1).unwrap();

        assert_eq!(core.stats().joins, 1);
        assert_eq!(core.stats().root_shrinks, 1);
        assert_eq!(core.height().unwrap(), 1);
        assert_eq!(in_order(&core), vec![2, 3]);
    }

    #[test]
    fn test_delete_missing_key_in_node() {
        let mut core = core_with(4, &[1]);
        let root = core.root();
        assert_eq!(
            ClassicPolicy.delete(&mut core, root, &7),
            Err(Error::KeyNotFound)
        );
    }
}
