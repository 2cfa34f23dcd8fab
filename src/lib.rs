use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod heap_primitives;
pub mod logger;

// Heaps
// -----
pub mod comparator;
pub mod heap;
pub mod top_k;

// Benchmarking
// ------------
pub mod bench;
