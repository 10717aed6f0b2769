//! Thread-safe wrapper around [`BTree`].
//!
//! The tree itself has no locking discipline. [`SharedBTree`] adds the
//! simplest correct one: a single reader-writer lock around the whole
//! tree. Lookups run in parallel; any insert or delete excludes everyone.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::common::{NodeId, Result};
use crate::index::btree::{BTree, BalancePolicy, ClassicPolicy};

/// A cloneable handle to a tree behind one `RwLock`.
///
/// # Thread Safety
/// - `inner`: `RwLock`, many readers or one writer, whole-tree granularity
///
/// Guards returned by [`read`](Self::read) and [`write`](Self::write) must
/// not be held across calls that take the lock again on the same thread.
///
/// # Example
/// ```
/// use classics::SharedBTree;
/// use std::thread;
///
/// let tree = SharedBTree::new(4).unwrap();
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let tree = tree.clone();
///         thread::spawn(move || {
///             for k in 0..25 {
///                 tree.insert(t * 100 + k, k).unwrap();
///             }
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(tree.len(), 100);
/// ```
pub struct SharedBTree<K, V, P = ClassicPolicy> {
    inner: Arc<RwLock<BTree<K, V, P>>>,
}

impl<K: Ord, V> SharedBTree<K, V, ClassicPolicy> {
    /// Create an empty shared tree using [`ClassicPolicy`].
    pub fn new(max_branching_degree: usize) -> Result<Self> {
        Ok(Self::from_tree(BTree::new(max_branching_degree)?))
    }
}

impl<K: Ord, V, P: BalancePolicy<K, V>> SharedBTree<K, V, P> {
    /// Wrap an existing tree.
    pub fn from_tree(tree: BTree<K, V, P>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    pub fn insert(&self, key: K, value: V) -> Result<NodeId> {
        self.inner.write().insert(key, value)
    }

    pub fn delete(&self, key: &K) -> Result<bool> {
        self.inner.write().delete(key)
    }

    pub fn remove(&self, key: &K) -> Result<Option<V>> {
        self.inner.write().remove(key)
    }

    /// Copy of the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Acquire the shared lock for several reads in one critical section.
    pub fn read(&self) -> RwLockReadGuard<'_, BTree<K, V, P>> {
        self.inner.read()
    }

    /// Acquire the exclusive lock for a batch of mutations.
    pub fn write(&self) -> RwLockWriteGuard<'_, BTree<K, V, P>> {
        self.inner.write()
    }
}

impl<K, V, P> Clone for SharedBTree<K, V, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
