//! Configuration constants and the validated branching degree.

use crate::common::{Error, Result};

/// Smallest accepted maximum branching degree.
///
/// A degree of 2 allows one key per node. Splitting an overflowing node
/// (two keys) then leaves one side empty, so the tree degenerates into a
/// linked list. Degree 3 is the 2-3 tree, the smallest real B-tree.
pub const MIN_BRANCHING_DEGREE: usize = 3;

/// Degree used by [`Degree::default`]: a 2-3-4 tree.
pub const DEFAULT_BRANCHING_DEGREE: usize = 4;

/// Maximum number of children a node may have, with the derived key bounds.
///
/// # Key bounds
/// For a maximum branching degree `m`:
/// - `max_keys = m - 1`
/// - `min_keys = ceil(m / 2) - 1` (the root is exempt)
///
/// | degree | min_keys | max_keys |
/// |--------|----------|----------|
/// | 3      | 1        | 2        |
/// | 4      | 1        | 3        |
/// | 5      | 2        | 4        |
///
/// # Example
/// ```
/// use classics::common::config::Degree;
///
/// let degree = Degree::new(5).unwrap();
/// assert_eq!(degree.max_keys(), 4);
/// assert_eq!(degree.min_keys(), 2);
/// assert!(Degree::new(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Degree(usize);

impl Degree {
    /// Validate a maximum branching degree.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if `max_branching_degree < MIN_BRANCHING_DEGREE`
    pub fn new(max_branching_degree: usize) -> Result<Self> {
        if max_branching_degree < MIN_BRANCHING_DEGREE {
            return Err(Error::InvalidDegree(max_branching_degree));
        }
        Ok(Degree(max_branching_degree))
    }

    /// The maximum number of children per node.
    #[inline]
    pub fn get(&self) -> usize {
        self.0
    }

    /// Maximum keys a node may hold at rest.
    #[inline]
    pub fn max_keys(&self) -> usize {
        self.0 - 1
    }

    /// Minimum keys a non-root node must hold at rest.
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.0.div_ceil(2) - 1
    }
}

impl Default for Degree {
    fn default() -> Self {
        Degree(DEFAULT_BRANCHING_DEGREE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_bounds() {
        let d3 = Degree::new(3).unwrap();
        assert_eq!((d3.min_keys(), d3.max_keys()), (1, 2));

        let d4 = Degree::new(4).unwrap();
        assert_eq!((d4.min_keys(), d4.max_keys()), (1, 3));

        let d6 = Degree::new(6).unwrap();
        assert_eq!((d6.min_keys(), d6.max_keys()), (2, 5));
    }

    #[test]
    fn test_degree_rejects_degenerate() {
        assert!(matches!(Degree::new(0), Err(Error::InvalidDegree(0))));
        assert!(matches!(Degree::new(2), Err(Error::InvalidDegree(2))));
    }

    #[test]
    fn test_default_is_2_3_4() {
        assert_eq!(Degree::default().get(), DEFAULT_BRANCHING_DEGREE);
        assert_eq!(Degree::default().max_keys(), 3);
    }

    #[test]
    fn test_split_halves_respect_min_keys() {
        // Splitting an overflowing node at len / 2 must leave both
        // halves at or above min_keys.
        for m in MIN_BRANCHING_DEGREE..32 {
            let degree = Degree::new(m).unwrap();
            let len = degree.max_keys() + 1;
            let mid = len / 2;
            let right = len - mid - 1;
            assert!(mid >= degree.min_keys(), "degree {}", m);
            assert!(right >= degree.min_keys(), "degree {}", m);
        }
    }
}
