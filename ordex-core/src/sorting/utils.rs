//! Utility functions for sorting operations

use std::cmp::Ordering;

/// Reorder `items` so that position `i` holds the element previously at
/// `indices[i]`.
pub fn reorder_by_indices<T: Clone>(items: &mut [T], indices: &[usize]) {
    debug_assert_eq!(
        items.len(),
        indices.len(),
        "Indices length must match items length"
    );

    let reordered: Vec<T> =
        indices.iter().map(|&idx| items[idx].clone()).collect();
    items.clone_from_slice(&reordered);
}

/// Check whether `items` is already ordered under `compare`
pub fn is_sorted_by<T, F>(items: &[T], mut compare: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    items
        .windows(2)
        .all(|w| compare(&w[0], &w[1]) != Ordering::Greater)
}
