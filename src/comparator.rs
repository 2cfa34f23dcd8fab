//! Ordering predicates for heaps.
//!
//! A [`Comparator`] answers a single question: does `a` rank below `b`? Heap
//! operations take one as an argument on every call, so the same storage can be
//! treated as a max-heap with [`Less`] and as a min-heap with [`Greater`].

use derive_more::Display;

/// A strict-weak-order predicate over `T`.
///
/// `ranks_below(a, b)` is `true` when `a` must end up further from the root
/// than `b`. With [`Less`] the root holds the maximum and heap-sort output is
/// ascending.
///
/// Closures and plain functions taking `(&T, &T)` are comparators as long as
/// they return something convertible into `bool`.
///
/// ```
/// use heapsort::comparator::{Comparator, Greater, Less};
///
/// assert!(Less.ranks_below(&1, &2));
/// assert!(Greater.ranks_below(&2, &1));
///
/// let mut shorter = |a: &&str, b: &&str| a.len() < b.len();
/// assert!(shorter.ranks_below(&"ab", &"abc"));
/// ```
pub trait Comparator<T: ?Sized> {
    fn ranks_below(&mut self, a: &T, b: &T) -> bool;
}

impl<T, F, B> Comparator<T> for F
where
    T: ?Sized,
    F: FnMut(&T, &T) -> B,
    B: Into<bool>,
{
    #[inline(always)]
    fn ranks_below(&mut self, a: &T, b: &T) -> bool {
        self(a, b).into()
    }
}

/// A comparator whose answer doesn't depend on the elements.
///
/// `false` treats every pair as equal, so sifts never swap and heaps are left
/// alone. Sorting still moves elements, since an unstable sort may reorder
/// equal ones. `true` swaps on every comparison.
impl<T: ?Sized> Comparator<T> for bool {
    #[inline(always)]
    fn ranks_below(&mut self, _a: &T, _b: &T) -> bool {
        *self
    }
}

/// `a < b`. Builds max-heaps and sorts ascending.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display)]
#[display("less-than")]
pub struct Less;

impl<T: PartialOrd + ?Sized> Comparator<T> for Less {
    #[inline(always)]
    fn ranks_below(&mut self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// `a > b`. Builds min-heaps and sorts descending.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display)]
#[display("greater-than")]
pub struct Greater;

impl<T: PartialOrd + ?Sized> Comparator<T> for Greater {
    #[inline(always)]
    fn ranks_below(&mut self, a: &T, b: &T) -> bool {
        a > b
    }
}

/// Flips the arguments of the wrapped comparator.
///
/// ```
/// use heapsort::comparator::{Comparator, Less, Reverse};
/// assert!(Reverse(Less).ranks_below(&3, &1));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reverse<C> {
    #[inline(always)]
    fn ranks_below(&mut self, a: &T, b: &T) -> bool {
        self.0.ranks_below(b, a)
    }
}

/// Compares the keys extracted by `F` with `<`.
///
/// ```
/// use heapsort::comparator::ByKey;
/// use heapsort::heap::heapsort_by;
///
/// let mut words = ["ccc", "a", "bb"];
/// heapsort_by(&mut words, &mut ByKey(|w: &&str| w.len()));
/// assert_eq!(words, ["a", "bb", "ccc"]);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ByKey<F>(pub F);

impl<T, K, F> Comparator<T> for ByKey<F>
where
    T: ?Sized,
    K: PartialOrd,
    F: FnMut(&T) -> K,
{
    #[inline(always)]
    fn ranks_below(&mut self, a: &T, b: &T) -> bool {
        (self.0)(a) < (self.0)(b)
    }
}

/// Forwards to `C` and counts how many times it was asked.
#[derive(Clone, Debug, Default)]
pub struct Counting<C> {
    inner: C,
    count: usize,
}

impl<C> Counting<C> {
    pub fn new(inner: C) -> Self {
        Self { inner, count: 0 }
    }
    /// Comparisons made since creation or the last [`Counting::reset`].
    pub fn count(&self) -> usize {
        self.count
    }
    pub fn reset(&mut self) {
        self.count = 0;
    }
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Counting<C> {
    #[inline(always)]
    fn ranks_below(&mut self, a: &T, b: &T) -> bool {
        self.count += 1;
        self.inner.ranks_below(a, b)
    }
}
