//! Rebalancing statistics.

use std::fmt;

/// Counts of the structural operations a tree has performed.
///
/// The core primitives bump the rotation/join/shrink counters themselves;
/// splits and root growth are recorded by the policy that performs them.
/// Counters are plain integers because every mutation already holds
/// `&mut` access to the tree.
///
/// # Example
/// ```
/// use classics::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// for k in 0..10 {
///     tree.insert(k, ()).unwrap();
/// }
/// assert!(tree.stats().splits > 0);
/// println!("{}", tree.stats());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebalanceStats {
    /// Overflowing nodes split in two.
    pub splits: u64,

    /// Splits that reached the root and added a level.
    pub root_grows: u64,

    /// Keys borrowed from a right sibling.
    pub rotations_left: u64,

    /// Keys borrowed from a left sibling.
    pub rotations_right: u64,

    /// Underflowing nodes merged into a sibling.
    pub joins: u64,

    /// Joins that emptied the root and removed a level.
    pub root_shrinks: u64,
}

impl RebalanceStats {
    /// Create a tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rotations in either direction.
    pub fn rotations(&self) -> u64 {
        self.rotations_left + self.rotations_right
    }

    /// Fraction of underflow repairs resolved by rotation (0.0 to 1.0).
    ///
    /// Rotations are cheaper than joins and never cascade, so a higher
    /// ratio means shallower repair work.
    pub fn rotation_ratio(&self) -> f64 {
        let total = self.rotations() + self.joins;
        if total == 0 {
            0.0
        } else {
            self.rotations() as f64 / total as f64
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for RebalanceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {}, grows: {}, rotations: {}, joins: {}, shrinks: {}, rotation_ratio: {:.2}% }}",
            self.splits,
            self.root_grows,
            self.rotations(),
            self.joins,
            self.root_shrinks,
            self.rotation_ratio() * 100.0
        )
    }
}
