// Index arithmetic for binary heaps laid out on a slice.
//
// Level `d` of the tree holds the `2^d` slots starting at `2^d - 1`, left to
// right, so a heap of `n` nodes is exactly the prefix `[0, n)`:
//
// ```text
//                 0
//         1               2
//     3       4       5       6
//   7   8   9  10  11  12  13  14
// ```
//
// Only the deepest level may be partially filled.

/// The parent of a non-root node.
///
/// ```
/// use heapsort::heap_primitives::parent;
/// assert_eq!(parent(1), 0);
/// assert_eq!(parent(2), 0);
/// assert_eq!(parent(4), 1);
/// assert_eq!(parent(25), 12);
/// ```
#[inline(always)]
#[must_use]
pub fn parent(i: usize) -> usize {
    debug_assert!(i != 0, "The root has no parent");
    (i - 1) >> 1
}

/// The left child, which may lie past the end of the heap.
///
/// ```
/// use heapsort::heap_primitives::left_child;
/// assert_eq!(left_child(0), 1);
/// assert_eq!(left_child(3), 7);
/// assert_eq!(left_child(11), 23);
/// ```
#[inline(always)]
#[must_use]
pub fn left_child(i: usize) -> usize {
    (i << 1) + 1
}

/// The right child, always `left_child(i) + 1`.
///
/// ```
/// use heapsort::heap_primitives::right_child;
/// assert_eq!(right_child(0), 2);
/// assert_eq!(right_child(4), 10);
/// ```
#[inline(always)]
#[must_use]
pub fn right_child(i: usize) -> usize {
    (i + 1) << 1
}

/// Index of the last node that has children in a heap of `len` nodes.
///
/// `None` when no node has children (`len < 2`).
///
/// ```
/// use heapsort::heap_primitives::last_internal;
/// assert_eq!(last_internal(0), None);
/// assert_eq!(last_internal(1), None);
/// assert_eq!(last_internal(2), Some(0));
/// assert_eq!(last_internal(8), Some(3));
/// assert_eq!(last_internal(10), Some(4));
/// ```
#[inline(always)]
#[must_use]
pub fn last_internal(len: usize) -> Option<usize> {
    (len / 2).checked_sub(1)
}
