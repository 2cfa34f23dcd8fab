//! Streaming top-k selection.
//!
//! Keeps a bounded heap of the best `k` candidates seen so far. Its root is the
//! worst of them, so each new element costs one comparison when it doesn't make
//! the cut and O(log k) when it does.

use crate::comparator::Comparator;
use crate::comparator::Less;
use crate::heap::extract_root;
use crate::heap::sift_down;
use crate::heap::sift_up;

/// The `k` smallest elements of `iter`, ascending.
///
/// ```
/// let best = heapsort::top_k::top_k([15, 31, 7, 24, 5, 19, 46, 2, 10, 29], 3);
/// assert_eq!(best, [2, 5, 7]);
/// ```
pub fn top_k<T, I>(iter: I, k: usize) -> Vec<T>
where
    T: PartialOrd,
    I: IntoIterator<Item = T>,
{
    top_k_by(iter, k, &mut Less)
}

/// The `k` elements of `iter` that rank lowest under `cmp`, in `cmp` order.
///
/// Elements that tie with the current cut-off don't displace it.
pub fn top_k_by<T, I, C>(iter: I, k: usize, cmp: &mut C) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    C: Comparator<T>,
{
    if k == 0 {
        return Vec::new();
    }

    let iter = iter.into_iter();
    let mut kept: Vec<T> = Vec::with_capacity(k.min(iter.size_hint().0));
    for value in iter {
        if kept.len() < k {
            let index = kept.len();
            kept.push(value);
            sift_up(&mut kept, index, cmp);
        } else if cmp.ranks_below(&value, &kept[0]) {
            // Replace the current cut-off.
            kept[0] = value;
            sift_down(&mut kept, 0, k, cmp);
        }
    }

    // Drain the heap in place: the worst goes last.
    let mut len = kept.len();
    while len > 0 {
        len = extract_root(&mut kept, len, cmp);
    }
    kept
}
