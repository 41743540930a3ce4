//! Stable sorting with an optional rayon backend
//!
//! [`stable_sort_by`] is always sequential and places no bounds on the
//! element type. With the `parallel-sorting` feature, [`par_stable_sort_by`]
//! is added: inputs at or above a threshold are sorted with rayon's
//! `par_sort_by`, which is stable like the sequential `sort_by`. Both paths
//! produce the same order.

use std::cmp::Ordering;

#[cfg(feature = "parallel-sorting")]
use rayon::prelude::*;
#[cfg(feature = "parallel-sorting")]
use tracing::trace;

/// Sequential stable sort of `items` under `compare`
pub fn stable_sort_by<T, F>(items: &mut [T], compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    items.sort_by(compare);
}

/// Stable sort of `items` under `compare`, on rayon's pool once `items`
/// holds at least `threshold` elements
#[cfg(feature = "parallel-sorting")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel-sorting")))]
pub fn par_stable_sort_by<T, F>(items: &mut [T], threshold: usize, compare: F)
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    if items.len() >= threshold {
        trace!("Parallel stable sort of {} items", items.len());
        items.par_sort_by(compare);
    } else {
        items.sort_by(compare);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interleaved() -> Vec<(u8, usize)> {
        (0..200).map(|i| ((i % 3) as u8, i)).collect()
    }

    fn is_stably_sorted(items: &[(u8, usize)]) -> bool {
        items.windows(2).all(|w| {
            w[0].0 < w[1].0 || (w[0].0 == w[1].0 && w[0].1 < w[1].1)
        })
    }

    #[test]
    fn test_sequential_sort_is_stable() {
        let mut items = interleaved();
        stable_sort_by(&mut items, |a, b| a.0.cmp(&b.0));
        assert!(is_stably_sorted(&items));
    }

    #[cfg(feature = "parallel-sorting")]
    #[test]
    fn test_parallel_sort_is_stable_on_both_sides_of_threshold() {
        for threshold in [0, usize::MAX] {
            let mut items = interleaved();
            par_stable_sort_by(&mut items, threshold, |a, b| a.0.cmp(&b.0));
            assert!(is_stably_sorted(&items));
        }
    }
}
