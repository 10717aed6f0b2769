//! Suffix array built with merge sort.
//!
//! A suffix array lists the start offsets of every suffix of a text in
//! lexicographic order. All occurrences of a pattern are then one
//! contiguous run, found with two binary searches.
//!
//! # Complexity
//! - Build: O(n log n) comparisons, each O(n) bytes → O(n² log n) worst case
//! - Lookup: O(m log n) for a pattern of length m
//! - Space: O(n) offsets

use crate::algorithms::sorting::merge_sort_by;

/// Sorted suffix offsets of a borrowed byte string.
///
/// # Example
/// ```
/// use classics::algorithms::SuffixArray;
///
/// let sa = SuffixArray::new("banana");
/// assert_eq!(sa.suffixes(), &[5, 3, 1, 0, 4, 2]);
/// assert_eq!(sa.find_all("ana"), vec![1, 3]);
/// assert!(!sa.contains("nab"));
/// ```
#[derive(Debug, Clone)]
pub struct SuffixArray<'a> {
    text: &'a [u8],
    suffixes: Vec<usize>,
}

impl<'a> SuffixArray<'a> {
    /// Build the array for a UTF-8 string (compared byte-wise).
    pub fn new(text: &'a str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    pub fn from_bytes(text: &'a [u8]) -> Self {
        let mut suffixes: Vec<usize> = (0..text.len()).collect();
        merge_sort_by(&mut suffixes, |&a, &b| text[a..].cmp(&text[b..]));
        Self { text, suffixes }
    }

    /// Suffix start offsets in lexicographic order of the suffixes.
    pub fn suffixes(&self) -> &[usize] {
        &self.suffixes
    }

    /// The suffix with the given rank (0 = smallest).
    pub fn suffix(&self, rank: usize) -> Option<&'a [u8]> {
        self.suffixes.get(rank).map(|&start| &self.text[start..])
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// Every offset where `pattern` occurs, ascending.
    ///
    /// The empty pattern matches at every offset.
    pub fn find_all(&self, pattern: &str) -> Vec<usize> {
        let mut hits = self.matching_run(pattern.as_bytes()).to_vec();
        hits.sort_unstable();
        hits
    }

    pub fn contains(&self, pattern: &str) -> bool {
        !self.matching_run(pattern.as_bytes()).is_empty()
    }

    /// Number of occurrences of `pattern`.
    pub fn count(&self, pattern: &str) -> usize {
        self.matching_run(pattern.as_bytes()).len()
    }

    /// The contiguous run of suffixes that start with `pattern`.
    fn matching_run(&self, pattern: &[u8]) -> &[usize] {
        let text = self.text;
        let start = self
            .suffixes
            .partition_point(|&s| &text[s..] < pattern);
        let len = self.suffixes[start..].partition_point(|&s| text[s..].starts_with(pattern));
        &self.suffixes[start..start + len]
    }
}
