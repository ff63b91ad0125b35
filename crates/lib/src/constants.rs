//! Constants used throughout the library.

/// Capacity used when a mutator finds the backing store unallocated.
///
/// The store only needs room for the one entry being inserted.
pub const LAZY_ALLOC_CAPACITY: usize = 1;
