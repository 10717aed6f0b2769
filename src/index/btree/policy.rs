//! Balancing policy hooks.
//!
//! [`BTree`](super::BTree) handles the public API and bookkeeping;
//! everything that depends on *which* kind of tree is being built (2-3,
//! 2-3-4, general B-tree, ...) lives behind [`BalancePolicy`]. A policy
//! drives the [`BTreeCore`] primitives to split, rotate and join.

use crate::common::{NodeId, Result};
use crate::index::btree::BTreeCore;

/// The five hooks a concrete tree variant implements.
///
/// Policies are stateless strategy objects; all tree state is in the
/// [`BTreeCore`] they are handed.
pub trait BalancePolicy<K: Ord, V> {
    /// Descend from the root to the node where `key` should be inserted.
    fn find_leaf_to_insert_key(&self, core: &BTreeCore<K, V>, key: &K) -> Result<NodeId>;

    /// Insert into the node returned by
    /// [`find_leaf_to_insert_key`](Self::find_leaf_to_insert_key),
    /// splitting upwards as needed.
    ///
    /// Returns the replaced value when the key was already present.
    fn insert_in_leaf(
        &self,
        core: &mut BTreeCore<K, V>,
        leaf: NodeId,
        key: K,
        value: V,
    ) -> Result<Option<V>>;

    /// Remove `key` from `node` (which holds it) and repair any underflow.
    fn delete(&self, core: &mut BTreeCore<K, V>, node: NodeId, key: &K) -> Result<(K, V)>;

    /// The node holding `key`, if any.
    fn search(&self, core: &BTreeCore<K, V>, key: &K) -> Result<Option<NodeId>>;

    /// All entries of the subtree rooted at `subtree_root`, in key order.
    fn sorted_key_values<'a>(
        &self,
        core: &'a BTreeCore<K, V>,
        subtree_root: NodeId,
    ) -> Result<Vec<(&'a K, &'a V)>>;
}
