//! In-place and merge-based comparison sorts.
//!
//! | Function            | Time (avg / worst)     | Extra space | Stable |
//! |---------------------|------------------------|-------------|--------|
//! | [`quick_sort`]      | O(n log n) / O(n²)     | O(log n)    | no     |
//! | [`heap_sort`]       | O(n log n) / O(n log n)| O(1)        | no     |
//! | [`merge_sort_by`]   | O(n log n) / O(n log n)| O(n)        | yes    |

use std::cmp::Ordering;

/// Quicksort with a Lomuto partition around the middle element.
///
/// Recurses into the smaller partition and loops on the larger one, so
/// the call stack stays O(log n) even on adversarial input.
///
/// # Example
/// ```
/// use classics::algorithms::sorting::quick_sort;
///
/// let mut data = [5, 2, 9, 1, 5, 6];
/// quick_sort(&mut data);
/// assert_eq!(data, [1, 2, 5, 5, 6, 9]);
/// ```
pub fn quick_sort<T: Ord>(arr: &mut [T]) {
    let mut rest = arr;
    while rest.len() > 1 {
        let pivot = partition(rest);
        let (left, right) = std::mem::take(&mut rest).split_at_mut(pivot);
        let right = &mut right[1..];
        if left.len() < right.len() {
            quick_sort(left);
            rest = right;
        } else {
            quick_sort(right);
            rest = left;
        }
    }
}

/// Partition around the middle element; returns its final index.
fn partition<T: Ord>(arr: &mut [T]) -> usize {
    let last = arr.len() - 1;
    arr.swap(arr.len() / 2, last);

    let mut store = 0;
    for j in 0..last {
        if arr[j] <= arr[last] {
            arr.swap(store, j);
            store += 1;
        }
    }
    arr.swap(store, last);
    store
}

/// Heap sort: build a max-heap in place, then repeatedly move the root
/// behind the shrinking heap.
///
/// # Example
/// ```
/// use classics::algorithms::sorting::heap_sort;
///
/// let mut data = vec!["pear", "apple", "fig"];
/// heap_sort(&mut data);
/// assert_eq!(data, vec!["apple", "fig", "pear"]);
/// ```
pub fn heap_sort<T: Ord>(arr: &mut [T]) {
    let len = arr.len();
    for i in (0..len / 2).rev() {
        sift_down(arr, len, i);
    }
    for end in (1..len).rev() {
        arr.swap(0, end);
        sift_down(arr, end, 0);
    }
}

/// Restore the heap property below `root` within `arr[..n]`.
fn sift_down<T: Ord>(arr: &mut [T], n: usize, mut root: usize) {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;

        if left < n && arr[left] > arr[largest] {
            largest = left;
        }
        if right < n && arr[right] > arr[largest] {
            largest = right;
        }
        if largest == root {
            return;
        }
        arr.swap(root, largest);
        root = largest;
    }
}

/// Stable top-down merge sort with a caller-supplied comparator.
///
/// Allocates one scratch buffer of `arr.len()` elements.
///
/// # Example
/// ```
/// use classics::algorithms::sorting::merge_sort_by;
///
/// let mut pairs = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
/// merge_sort_by(&mut pairs, |x, y| x.0.cmp(&y.0));
/// assert_eq!(pairs, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
/// ```
pub fn merge_sort_by<T, F>(arr: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if arr.len() <= 1 {
        return;
    }
    let mut scratch = arr.to_vec();
    merge_sort_rec(arr, &mut scratch, &mut compare);
}

/// Sorts `arr`; `scratch` is a same-length buffer.
fn merge_sort_rec<T, F>(arr: &mut [T], scratch: &mut [T], compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = arr.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    {
        let (left, right) = arr.split_at_mut(mid);
        let (scratch_left, scratch_right) = scratch.split_at_mut(mid);
        merge_sort_rec(left, scratch_left, compare);
        merge_sort_rec(right, scratch_right, compare);
    }

    let (mut i, mut j, mut k) = (0, mid, 0);
    while i < mid && j < len {
        // `!= Greater` keeps equal elements in their original order
        if compare(&arr[i], &arr[j]) != Ordering::Greater {
            scratch[k] = arr[i].clone();
            i += 1;
        } else {
            scratch[k] = arr[j].clone();
            j += 1;
        }
        k += 1;
    }
    while i < mid {
        scratch[k] = arr[i].clone();
        i += 1;
        k += 1;
    }
    while j < len {
        scratch[k] = arr[j].clone();
        j += 1;
        k += 1;
    }
    arr.clone_from_slice(&scratch[..len]);
}

/// Merge sort in natural order.
pub fn merge_sort<T: Ord + Clone>(arr: &mut [T]) {
    merge_sort_by(arr, T::cmp);
}
