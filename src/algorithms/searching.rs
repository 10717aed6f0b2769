//! Searching sorted slices.
//!
//! - [`interpolation_search`] - probes where the target *should* be
//! - [`ternary_search`] - splits the range into thirds
//!
//! Both return the index of *an* element equal to the target, or `None`.

use std::cmp::Ordering;

/// Signed numeric distance between two values.
///
/// Interpolation search estimates a position from how far the target lies
/// between the range ends, so keys must say how far apart they are.
/// `a.distance(&b)` is `b - a` as an `f64`.
///
/// # Example
/// ```
/// use classics::algorithms::searching::Distance;
///
/// assert_eq!(3u8.distance(&10), 7.0);
/// assert_eq!(10i32.distance(&3), -7.0);
/// assert_eq!('a'.distance(&'d'), 3.0);
/// ```
pub trait Distance {
    fn distance(&self, other: &Self) -> f64;
}

macro_rules! impl_distance_numeric {
    ($($t:ty),*) => {
        $(
            impl Distance for $t {
                #[inline]
                fn distance(&self, other: &Self) -> f64 {
                    // Convert first: subtracting in the source type can overflow
                    *other as f64 - *self as f64
                }
            }
        )*
    };
}

impl_distance_numeric!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Distance for char {
    #[inline]
    fn distance(&self, other: &Self) -> f64 {
        *other as u32 as f64 - *self as u32 as f64
    }
}

/// Interpolation search over an ascending slice.
///
/// # Complexity
/// - O(log log n) probes on average for uniformly distributed keys
/// - O(n) worst case (e.g. exponentially growing keys)
/// - O(1) extra space
///
/// # Example
/// ```
/// use classics::algorithms::searching::interpolation_search;
///
/// let data = [10, 20, 30, 40, 50, 60];
/// assert_eq!(interpolation_search(&data, &40), Some(3));
/// assert_eq!(interpolation_search(&data, &45), None);
/// ```
pub fn interpolation_search<T: Distance + Ord>(arr: &[T], target: &T) -> Option<usize> {
    if arr.is_empty() {
        return None;
    }

    let (mut lo, mut hi) = (0usize, arr.len() - 1);
    while lo <= hi && *target >= arr[lo] && *target <= arr[hi] {
        if arr[lo] == arr[hi] {
            // The whole range holds one value
            return (arr[lo] == *target).then_some(lo);
        }

        // Wide integers can differ yet round to the same f64; bisect then
        let span = arr[lo].distance(&arr[hi]);
        let pos = if span > 0.0 {
            let offset = arr[lo].distance(target);
            let estimate = lo + ((offset / span) * (hi - lo) as f64) as usize;
            estimate.min(hi)
        } else {
            lo + (hi - lo) / 2
        };

        match arr[pos].cmp(target) {
            Ordering::Equal => return Some(pos),
            Ordering::Less => lo = pos + 1,
            Ordering::Greater => {
                // target >= arr[lo] guarantees pos > lo here
                hi = pos - 1;
            }
        }
    }
    None
}

/// Ternary search over an ascending slice.
///
/// Compares against two probes per round and keeps one third of the range.
///
/// # Complexity
/// - O(log₃ n) rounds, at most two comparisons each
/// - O(1) extra space
///
/// # Example
/// ```
/// use classics::algorithms::searching::ternary_search;
///
/// let words = ["ant", "bee", "cat", "dog", "eel"];
/// assert_eq!(ternary_search(&words, &"dog"), Some(3));
/// assert_eq!(ternary_search(&words, &"fox"), None);
/// ```
pub fn ternary_search<T: Ord>(arr: &[T], target: &T) -> Option<usize> {
    // Half-open range [lo, hi)
    let (mut lo, mut hi) = (0usize, arr.len());
    while lo < hi {
        let third = (hi - lo) / 3;
        let m1 = lo + third;
        let m2 = hi - 1 - third;

        match target.cmp(&arr[m1]) {
            Ordering::Equal => return Some(m1),
            Ordering::Less => {
                hi = m1;
                continue;
            }
            Ordering::Greater => {}
        }
        match target.cmp(&arr[m2]) {
            Ordering::Equal => return Some(m2),
            Ordering::Greater => {
                lo = m2 + 1;
                continue;
            }
            Ordering::Less => {}
        }

        lo = m1 + 1;
        hi = m2;
    }
    None
}
