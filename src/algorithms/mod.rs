//! Classic algorithms over slices and strings.
//!
//! - [`searching`] - Interpolation and ternary search on sorted slices
//! - [`sorting`] - Quicksort, heap sort, stable merge sort
//! - [`suffix_array`] - Suffix array with substring lookup

pub mod searching;
pub mod sorting;
pub mod suffix_array;

pub use searching::{interpolation_search, ternary_search, Distance};
pub use sorting::{heap_sort, merge_sort, merge_sort_by, quick_sort};
pub use suffix_array::SuffixArray;
