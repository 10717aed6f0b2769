//! BTree - the public orchestrator.
//!
//! [`BTree`] owns a [`BTreeCore`] and a [`BalancePolicy`]. Every public
//! operation is a short script over the policy hooks:
//! - `insert` = `find_leaf_to_insert_key` + `insert_in_leaf`
//! - `delete` = `search` + `delete` hook
//! - `get_sorted_key_values` = `sorted_key_values` hook

use tracing::trace;

use crate::common::config::Degree;
use crate::common::{Error, NodeId, Result};
use crate::index::btree::{
    validate, BTreeCore, BalancePolicy, ClassicPolicy, Node, RebalanceStats,
};

/// A generic B-tree map.
///
/// # Concurrency
/// Single writer, no internal locking: every mutation takes `&mut self`.
/// Wrap in [`SharedBTree`](super::SharedBTree) to share across threads.
///
/// # Example
/// ```
/// use classics::BTree;
///
/// let mut tree = BTree::new(4).unwrap();
/// tree.build([(10, "ten"), (20, "twenty"), (5, "five")]).unwrap();
///
/// assert_eq!(tree.get(&20), Some(&"twenty"));
/// assert!(tree.delete(&10).unwrap());
/// assert!(!tree.delete(&10).unwrap());
///
/// let keys: Vec<i32> = tree
///     .sorted_key_values()
///     .unwrap()
///     .into_iter()
///     .map(|(k, _)| *k)
///     .collect();
/// assert_eq!(keys, vec![5, 20]);
/// ```
#[derive(Debug, Clone)]
pub struct BTree<K, V, P = ClassicPolicy> {
    core: BTreeCore<K, V>,
    policy: P,
    len: usize,
}

impl<K: Ord, V> BTree<K, V, ClassicPolicy> {
    /// Create an empty tree using [`ClassicPolicy`].
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if `max_branching_degree < 3`
    pub fn new(max_branching_degree: usize) -> Result<Self> {
        Self::with_policy(max_branching_degree, ClassicPolicy)
    }
}

impl<K: Ord, V, P: BalancePolicy<K, V>> BTree<K, V, P> {
    /// Create an empty tree driven by `policy`.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if `max_branching_degree < 3`
    pub fn with_policy(max_branching_degree: usize, policy: P) -> Result<Self> {
        let degree = Degree::new(max_branching_degree)?;
        Ok(Self {
            core: BTreeCore::new(degree),
            policy,
            len: 0,
        })
    }

    // ========================================================================
    // Public API: Mutation
    // ========================================================================

    /// Insert every pair in iteration order. Returns the final root.
    ///
    /// Not atomic: on error, pairs inserted so far stay in the tree.
    pub fn build<I>(&mut self, key_values: I) -> Result<NodeId>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in key_values {
            self.insert(key, value)?;
        }
        Ok(self.core.root())
    }

    /// Insert a pair. Returns the (possibly new) root.
    pub fn insert(&mut self, key: K, value: V) -> Result<NodeId> {
        self.upsert(key, value)?;
        Ok(self.core.root())
    }

    /// Insert a pair, returning the value it replaced.
    ///
    /// Whether an equal key is replaced is up to the policy;
    /// [`ClassicPolicy`] replaces.
    pub fn upsert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let leaf = self.policy.find_leaf_to_insert_key(&self.core, &key)?;
        trace!(%leaf, "inserting into node");
        let replaced = self.policy.insert_in_leaf(&mut self.core, leaf, key, value)?;
        if replaced.is_none() {
            self.len += 1;
        }
        Ok(replaced)
    }

    /// Delete `key`. Returns `Ok(false)` if it was not present.
    pub fn delete(&mut self, key: &K) -> Result<bool> {
        Ok(self.remove(key)?.is_some())
    }

    /// Delete `key`, returning its value.
    ///
    /// An absent key is `Ok(None)`, never an error.
    pub fn remove(&mut self, key: &K) -> Result<Option<V>> {
        let Some(node) = self.policy.search(&self.core, key)? else {
            return Ok(None);
        };
        match self.policy.delete(&mut self.core, node, key) {
            Ok((_, value)) => {
                self.len -= 1;
                Ok(Some(value))
            }
            Err(Error::KeyNotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // ========================================================================
    // Public API: Lookup
    // ========================================================================

    /// The node holding `key`, if any.
    pub fn search(&self, key: &K) -> Result<Option<NodeId>> {
        self.policy.search(&self.core, key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let node = self.search(key).ok().flatten()?;
        self.core.node(node).ok()?.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node = self.search(key).ok().flatten()?;
        self.core.node_mut(node).ok()?.get_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// In-order entries of the subtree rooted at `subtree_root`.
    pub fn get_sorted_key_values(&self, subtree_root: NodeId) -> Result<Vec<(&K, &V)>> {
        self.policy.sorted_key_values(&self.core, subtree_root)
    }

    /// In-order entries of the whole tree.
    pub fn sorted_key_values(&self) -> Result<Vec<(&K, &V)>> {
        self.get_sorted_key_values(self.core.root())
    }

    /// Smallest entry in the tree.
    pub fn first(&self) -> Option<(&K, &V)> {
        let leaf = self.core.get_min_node(self.core.root()).ok()?;
        self.core.node(leaf).ok()?.min_entry().map(|(k, v)| (k, v))
    }

    /// Largest entry in the tree.
    pub fn last(&self) -> Option<(&K, &V)> {
        let leaf = self.core.get_max_node(self.core.root()).ok()?;
        self.core.node(leaf).ok()?.max_entry().map(|(k, v)| (k, v))
    }

    // ========================================================================
    // Public API: Introspection
    // ========================================================================

    pub fn root(&self) -> NodeId {
        self.core.root()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node<K, V>> {
        self.core.node(id)
    }

    /// The underlying core, for driving primitives directly.
    pub fn core(&self) -> &BTreeCore<K, V> {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut BTreeCore<K, V> {
        &mut self.core
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn degree(&self) -> Degree {
        self.core.degree()
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels (1 for a lone root leaf).
    pub fn height(&self) -> Result<usize> {
        self.core.height()
    }

    pub fn stats(&self) -> &RebalanceStats {
        self.core.stats()
    }

    /// Check ordering, depth, fullness and parent-link invariants.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first broken rule
    pub fn validate(&self) -> Result<()> {
        validate::check(&self.core)
    }
}
