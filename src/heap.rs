//! Binary heaps over caller-owned slices, and heap-sort.
//!
//! Nothing here allocates. Every operation works in place on a slice that's
//! interpreted as an implicit binary tree (see [`crate::heap_primitives`]) and
//! takes the [`Comparator`] as an argument, so one buffer can be a max-heap on
//! one call and a min-heap on the next.
//!
//! Index preconditions are programmer errors. They are only checked with
//! `debug_assert!`, out-of-range indices past that still panic on slice
//! access.

use std::ops::Range;

use thiserror::Error;

use crate::comparator::Comparator;
use crate::comparator::Less;
use crate::heap_primitives::last_internal;
use crate::heap_primitives::left_child;
use crate::heap_primitives::parent;

/// Raises the node at `index` until its parent no longer ranks below it.
///
/// Everything but `index` must already be a valid heap.
/// Returns the node's new index.
#[inline]
pub fn sift_up<T, C>(a: &mut [T], index: usize, cmp: &mut C) -> usize
where
    C: Comparator<T>,
{
    #[cfg(feature = "coz_profile")]
    coz::scope!("SiftUp");

    debug_assert!(
        index < a.len(),
        "sift_up({index}) is OUT OF BOUNDS({})",
        a.len()
    );

    let mut pos = index;
    while pos > 0 {
        let p = parent(pos);
        if !cmp.ranks_below(&a[p], &a[pos]) {
            break;
        }
        a.swap(p, pos);
        pos = p;
    }
    pos
}

/// Lowers the node at `index` until none of its children within `[0, end)`
/// ranks above it.
///
/// The subtrees below `index` must already be valid heaps. When both children
/// tie, the left one is preferred.
/// Returns the node's new index.
#[inline]
pub fn sift_down<T, C>(a: &mut [T], mut index: usize, end: usize, cmp: &mut C) -> usize
where
    C: Comparator<T>,
{
    #[cfg(feature = "coz_profile")]
    coz::scope!("SiftDown");

    debug_assert!(end <= a.len(), "Heap end {end} is past the slice ({})", a.len());
    debug_assert!(
        index < end || end == 0,
        "sift_down({index}) is OUT OF BOUNDS({end})"
    );

    loop {
        // Find the best child
        let mut child = left_child(index);
        if child >= end {
            break;
        }
        let right = child + 1;
        if right < end && cmp.ranks_below(&a[child], &a[right]) {
            child = right;
        }

        if !cmp.ranks_below(&a[index], &a[child]) {
            break;
        }
        a.swap(index, child);
        index = child;
    }
    index
}

/// Turns the whole slice into a heap.
///
/// Sifts down every internal node, deepest first. Runs in O(n).
///
/// ```
/// use heapsort::comparator::Less;
/// use heapsort::heap::{build_heap, is_heap};
///
/// let mut a = [4, 1, 6, 2, 9, 7, 3, 8];
/// build_heap(&mut a, &mut Less);
/// assert_eq!(a[0], 9);
/// assert!(is_heap(&a, &mut Less));
/// ```
pub fn build_heap<T, C>(a: &mut [T], cmp: &mut C)
where
    C: Comparator<T>,
{
    let len = a.len();
    let Some(last) = last_internal(len) else {
        return;
    };
    for i in (0..=last).rev() {
        sift_down(a, i, len, cmp);
    }
}

/// Turns `a[range]` into a heap whose root is `a[range.start]`.
///
/// Indices are relative to `range.start`: children of `a[begin + i]` are
/// `a[begin + 2i + 1]` and `a[begin + 2i + 2]`. This is not a partial heapify
/// keeping absolute indices, which would only sift the nodes in
/// `[begin, end / 2)` of a heap rooted at `a[0]`.
///
/// Elements outside the range are left untouched.
pub fn build_heap_range<T, C>(a: &mut [T], range: Range<usize>, cmp: &mut C)
where
    C: Comparator<T>,
{
    debug_assert!(range.start <= range.end, "Reversed range {range:?}");
    debug_assert!(range.end <= a.len(), "Range {range:?} is past the slice ({})", a.len());
    build_heap(&mut a[range], cmp);
}

/// Writes `value` at `index` and raises it to its place.
///
/// The caller has already grown the heap to include `index`; whatever value was
/// there gets dropped. Returns where the new value ended up.
pub fn insert<T, C>(a: &mut [T], value: T, index: usize, cmp: &mut C) -> usize
where
    C: Comparator<T>,
{
    a[index] = value;
    sift_up(a, index, cmp)
}

/// Moves the root of the heap `a[0..len]` to `a[len - 1]` and restores the heap
/// over what's left.
///
/// Returns the new logical size, `len - 1`, which is also where the extracted
/// root now lives.
///
/// ```
/// use heapsort::comparator::Less;
/// use heapsort::heap::{build_heap, extract_root};
///
/// let mut a = [3, 9, 4];
/// build_heap(&mut a, &mut Less);
/// let len = extract_root(&mut a, 3, &mut Less);
/// assert_eq!((len, a[len]), (2, 9));
/// ```
pub fn extract_root<T, C>(a: &mut [T], len: usize, cmp: &mut C) -> usize
where
    C: Comparator<T>,
{
    debug_assert!(len > 0, "You can't extract from an empty heap");
    debug_assert!(len <= a.len(), "Heap size {len} is past the slice ({})", a.len());

    let last = len - 1;
    a.swap(0, last);
    if last > 0 {
        sift_down(a, 0, last, cmp);
    }
    last
}

/// Sorts the slice in ascending order.
///
/// ```
/// let mut a = [15, 31, 7, 24, 5, 19, 46, 2, 10, 29];
/// heapsort::heap::heapsort(&mut a);
/// assert_eq!(a, [2, 5, 7, 10, 15, 19, 24, 29, 31, 46]);
/// ```
pub fn heapsort<T: PartialOrd>(a: &mut [T]) {
    heapsort_by(a, &mut Less);
}

/// Sorts the slice so that no element ranks below the one before it.
///
/// In place and not stable. O(n log n) comparisons.
///
/// ```
/// use heapsort::comparator::Greater;
///
/// let mut a = vec![4, 1, 6, 2, 9, 7, 3, 8];
/// heapsort::heap::heapsort_by(&mut a, &mut Greater);
/// assert_eq!(a, [9, 8, 7, 6, 4, 3, 2, 1]);
/// ```
pub fn heapsort_by<T, C>(a: &mut [T], cmp: &mut C)
where
    C: Comparator<T>,
{
    build_heap(a, cmp);
    for i in (1..a.len()).rev() {
        a.swap(0, i);
        sift_down(a, 0, i, cmp);
    }
}

/// Whether `a` satisfies the heap invariant under `cmp`.
#[must_use]
pub fn is_heap<T, C>(a: &[T], cmp: &mut C) -> bool
where
    C: Comparator<T>,
{
    (1..a.len()).all(|i| !cmp.ranks_below(&a[parent(i)], &a[i]))
}

/// Whether no element of `a` ranks below the one before it.
#[must_use]
pub fn is_sorted_by<T, C>(a: &[T], cmp: &mut C) -> bool
where
    C: Comparator<T>,
{
    a.windows(2).all(|w| !cmp.ranks_below(&w[1], &w[0]))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeapError {
    #[error("Heap is full ({capacity} slots)")]
    Full { capacity: usize },
}

/// A priority queue living on a borrowed slice.
///
/// The first [`SliceHeap::len`] slots hold the heap. The remaining slots are
/// scratch space: popped elements are parked there, right after the live heap,
/// so popping everything leaves the slice sorted.
///
/// The comparator isn't stored. Callers must pass the same one to every call
/// for the results to make sense.
///
/// ```
/// use heapsort::comparator::Greater;
/// use heapsort::heap::SliceHeap;
///
/// let mut storage = [0u32; 4];
/// let mut heap = SliceHeap::new(&mut storage);
/// for v in [7, 3, 5] {
///     heap.push(v, &mut Greater).unwrap();
/// }
/// assert_eq!(heap.pop(&mut Greater), Some(&3));
/// assert_eq!(heap.peek(), Some(&5));
/// ```
#[derive(Debug)]
pub struct SliceHeap<'a, T> {
    storage: &'a mut [T],
    len: usize,
}

impl<'a, T> SliceHeap<'a, T> {
    /// An empty heap that may grow up to `storage.len()` elements.
    pub fn new(storage: &'a mut [T]) -> Self {
        Self { storage, len: 0 }
    }

    /// A full heap with every element of `storage`.
    pub fn from_slice<C: Comparator<T>>(storage: &'a mut [T], cmp: &mut C) -> Self {
        build_heap(storage, cmp);
        let len = storage.len();
        let heap = Self { storage, len };
        heap.verify_heap(cmp);
        heap
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }
    pub fn is_full(&self) -> bool {
        self.len == self.storage.len()
    }

    /// The element no other live element ranks above.
    pub fn peek(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// The live heap.
    pub fn as_slice(&self) -> &[T] {
        &self.storage[..self.len]
    }

    /// Slots past the live heap, holding popped elements in pop order reversed.
    pub fn tail(&self) -> &[T] {
        &self.storage[self.len..]
    }

    /// Adds `value` to the heap.
    ///
    /// Returns the index the value settled at.
    pub fn push<C: Comparator<T>>(&mut self, value: T, cmp: &mut C) -> Result<usize, HeapError> {
        self.verify_heap(cmp);
        if self.is_full() {
            return Err(HeapError::Full {
                capacity: self.capacity(),
            });
        }

        let index = self.len;
        self.len += 1;
        let index = insert(&mut self.storage[..self.len], value, index, cmp);

        self.verify_heap(cmp);
        Ok(index)
    }

    /// Removes the root, parking it right after the shrunk heap.
    pub fn pop<C: Comparator<T>>(&mut self, cmp: &mut C) -> Option<&T> {
        self.verify_heap(cmp);
        if self.is_empty() {
            return None;
        }

        self.len = extract_root(&mut *self.storage, self.len, cmp);

        self.verify_heap(cmp);
        Some(&self.storage[self.len])
    }

    /// Pops every remaining element and hands the storage back.
    ///
    /// When the heap started full, the storage ends up sorted as
    /// [`heapsort_by`] would have left it.
    pub fn into_sorted<C: Comparator<T>>(mut self, cmp: &mut C) -> &'a mut [T] {
        while self.len > 0 {
            self.len = extract_root(&mut *self.storage, self.len, cmp);
        }
        self.storage
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap<C: Comparator<T>>(&self, _cmp: &mut C) {
        // All good... (hopefully)
    }

    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap<C: Comparator<T>>(&self, cmp: &mut C) {
        debug_assert!(self.len <= self.storage.len());
        let heap = self.as_slice();
        for i in 1..heap.len() {
            let p = parent(i);
            debug_assert!(
                !cmp.ranks_below(&heap[p], &heap[i]),
                "Node[{p}] ranks below child [{i}]. Out of heap of len={}",
                heap.len(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::comparator::ByKey;
    use crate::comparator::Counting;
    use crate::comparator::Greater;

    fn random_vec(seed: u64, len: usize, max: u32) -> Vec<u32> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..len).map(|_| rng.random_range(0..max)).collect()
    }

    /// Same multiset, compared through a reference sort.
    fn same_elements(a: &[u32], b: &[u32]) -> bool {
        let mut a = a.to_vec();
        let mut b = b.to_vec();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }

    #[test]
    fn sorts_ascending() {
        let mut a = [15, 31, 7, 24, 5, 19, 46, 2, 10, 29];
        heapsort(&mut a);
        assert_eq!(a, [2, 5, 7, 10, 15, 19, 24, 29, 31, 46]);
    }

    #[test]
    fn sorts_descending_with_greater() {
        let mut a = [4, 1, 6, 2, 9, 7, 3, 8];
        heapsort_by(&mut a, &mut Greater);
        assert_eq!(a, [9, 8, 7, 6, 4, 3, 2, 1]);
    }

    #[test]
    fn sorts_with_closures() {
        let mut a = vec![4, 1, 6, 2, 9, 7, 3, 8];
        heapsort_by(&mut a, &mut |x: &i32, y: &i32| x > y);
        assert_eq!(a, [9, 8, 7, 6, 4, 3, 2, 1]);
    }

    #[test]
    fn build_heap_puts_maximum_at_root() {
        let mut a = [4, 1, 6, 2, 9, 7, 3, 8];
        build_heap(&mut a, &mut Less);
        assert_eq!(a[0], 9);
        assert!(is_heap(&a, &mut Less));
    }

    #[test]
    fn trivial_inputs_are_untouched() {
        let mut empty: [i32; 0] = [];
        heapsort(&mut empty);
        assert!(empty.is_empty());

        let mut single = [42];
        heapsort(&mut single);
        assert_eq!(single, [42]);

        let mut cmp = Counting::new(Less);
        build_heap(&mut single, &mut cmp);
        assert_eq!(cmp.count(), 0);
    }

    #[test]
    fn sorts_random_inputs() {
        for seed in 0..64 {
            let len = (seed as usize * 37) % 300;
            let original = random_vec(seed, len, 50);

            let mut a = original.clone();
            heapsort(&mut a);
            assert!(same_elements(&a, &original), "seed={seed}");
            assert!(is_sorted_by(&a, &mut Less), "seed={seed} {a:?}");

            let mut d = original.clone();
            heapsort_by(&mut d, &mut Greater);
            assert!(same_elements(&d, &original), "seed={seed}");
            assert!(is_sorted_by(&d, &mut Greater), "seed={seed} {d:?}");
        }
    }

    #[test]
    fn matches_std_sort() {
        for seed in 0..16 {
            let mut a = random_vec(seed, 1000, u32::MAX);
            let mut b = a.clone();
            heapsort(&mut a);
            b.sort_unstable();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn resorting_is_identity() {
        let mut a = random_vec(7, 257, 20);
        heapsort(&mut a);
        let sorted = a.clone();
        heapsort(&mut a);
        assert_eq!(a, sorted);
    }

    #[test]
    fn build_heap_holds_invariant() {
        for seed in 0..32 {
            let mut a = random_vec(seed, seed as usize * 11, 1000);
            build_heap(&mut a, &mut Less);
            assert!(is_heap(&a, &mut Less));
            build_heap(&mut a, &mut Greater);
            assert!(is_heap(&a, &mut Greater));
        }
    }

    #[test]
    fn build_heap_range_leaves_outside_untouched() {
        let mut a = [100, 4, 1, 6, 2, 9, 7, 3, 8, 0];
        build_heap_range(&mut a, 1..9, &mut Less);
        assert_eq!(a[0], 100);
        assert_eq!(a[9], 0);
        assert_eq!(a[1], 9);
        assert!(is_heap(&a[1..9], &mut Less));

        let mut b = [3, 2, 1];
        build_heap_range(&mut b, 1..1, &mut Less);
        assert_eq!(b, [3, 2, 1]);
    }

    #[test]
    fn build_heap_range_indexes_from_range_start() {
        // Children of a[1] are a[2] and a[3], not a[3] and a[4].
        let mut a = [0, 1, 2, 3, 4, 5];
        build_heap_range(&mut a, 1..6, &mut Less);
        assert_eq!(a, [0, 5, 4, 3, 1, 2]);
    }

    #[test]
    fn extracting_everything_equals_heapsort() {
        for seed in 0..32 {
            let original = random_vec(seed, 100 + seed as usize, 30);

            let mut expected = original.clone();
            heapsort(&mut expected);

            let mut a = original;
            build_heap(&mut a, &mut Less);
            let mut len = a.len();
            while len > 0 {
                len = extract_root(&mut a, len, &mut Less);
                assert!(is_heap(&a[..len], &mut Less));
            }
            assert_eq!(a, expected);
        }
    }

    #[test]
    fn insert_builds_heaps_incrementally() {
        let values = random_vec(3, 200, 1000);
        let mut a = vec![0u32; values.len()];
        for (i, v) in values.iter().enumerate() {
            let at = insert(&mut a[..=i], *v, i, &mut Less);
            assert!(at <= i);
            assert_eq!(a[at], *v);
            assert!(is_heap(&a[..=i], &mut Less));
        }
        assert_eq!(a[0], *values.iter().max().unwrap());
    }

    #[test]
    fn sift_up_stops_at_first_satisfied_parent() {
        // [9, 5, 8, 1, 2] + 6 at index 5, whose parent 8 already ranks above it.
        let mut a = [9, 5, 8, 1, 2, 6];
        assert_eq!(sift_up(&mut a, 5, &mut Less), 5);
        assert_eq!(a, [9, 5, 8, 1, 2, 6]);

        let mut b = [9, 5, 8, 1, 2, 10];
        assert_eq!(sift_up(&mut b, 5, &mut Less), 0);
        assert_eq!(b, [10, 5, 9, 1, 2, 8]);
    }

    #[test]
    fn sift_down_prefers_left_child_on_ties() {
        let mut a = [(0, 'r'), (5, 'a'), (5, 'b')];
        let mut by_rank = ByKey(|x: &(i32, char)| x.0);
        assert_eq!(sift_down(&mut a, 0, 3, &mut by_rank), 1);
        assert_eq!(a, [(5, 'a'), (0, 'r'), (5, 'b')]);
    }

    #[test]
    fn sift_down_respects_heap_end() {
        let mut a = [1, 2, 3, 100];
        // index 3 is outside the heap, so 100 never moves up.
        assert_eq!(sift_down(&mut a, 0, 3, &mut Less), 2);
        assert_eq!(a, [3, 2, 1, 100]);
    }

    #[test]
    fn sorting_is_n_log_n() {
        let n = 4096usize;
        let mut a = random_vec(11, n, u32::MAX);
        let mut cmp = Counting::new(Less);
        heapsort_by(&mut a, &mut cmp);
        let bound = 3 * n * (usize::BITS - n.leading_zeros()) as usize;
        assert!(cmp.count() <= bound, "{} > {bound}", cmp.count());
    }

    #[test]
    fn constant_false_comparator_never_sifts() {
        let mut a = [3, 1, 2, 5, 4];
        build_heap(&mut a, &mut false);
        assert_eq!(a, [3, 1, 2, 5, 4]);
        assert_eq!(sift_down(&mut a, 0, 5, &mut false), 0);
        assert_eq!(sift_up(&mut a, 4, &mut false), 4);
        assert_eq!(a, [3, 1, 2, 5, 4]);
        assert!(is_heap(&a, &mut false));

        // Every pair ties, so the sort may reorder but keeps the elements.
        heapsort_by(&mut a, &mut false);
        let mut sorted = a;
        sorted.sort_unstable();
        assert_eq!(sorted, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn sorts_floats_and_strings() {
        let mut f = [2.5f64, -1.0, 0.0, 10.25];
        heapsort(&mut f);
        assert_eq!(f, [-1.0, 0.0, 2.5, 10.25]);

        let mut s = vec!["pear".to_string(), "apple".to_string(), "fig".to_string()];
        heapsort(&mut s);
        assert_eq!(s, ["apple", "fig", "pear"]);
    }

    #[test]
    fn slice_heap_push_pop() {
        let mut storage = [0u32; 5];
        let mut heap = SliceHeap::new(&mut storage);
        assert!(heap.is_empty());
        assert_eq!(heap.capacity(), 5);
        assert_eq!(heap.pop(&mut Less), None);

        for v in [3, 9, 1, 7, 5] {
            heap.push(v, &mut Less).unwrap();
        }
        assert!(heap.is_full());
        assert_eq!(heap.push(4, &mut Less), Err(HeapError::Full { capacity: 5 }));
        assert_eq!(heap.peek(), Some(&9));

        assert_eq!(heap.pop(&mut Less), Some(&9));
        assert_eq!(heap.pop(&mut Less), Some(&7));
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.tail(), [7, 9]);
        assert!(is_heap(heap.as_slice(), &mut Less));

        // Freed slots can be reused.
        assert_eq!(heap.push(8, &mut Less), Ok(0));
        assert_eq!(heap.peek(), Some(&8));
    }

    #[test]
    fn slice_heap_into_sorted_matches_heapsort() {
        let original = random_vec(5, 123, 40);
        let mut expected = original.clone();
        heapsort_by(&mut expected, &mut Greater);

        let mut a = original;
        let heap = SliceHeap::from_slice(&mut a, &mut Greater);
        assert_eq!(heap.len(), 123);
        assert_eq!(heap.into_sorted(&mut Greater), &expected[..]);
    }

    #[test]
    fn heap_error_message() {
        assert_eq!(
            HeapError::Full { capacity: 3 }.to_string(),
            "Heap is full (3 slots)"
        );
    }
}
