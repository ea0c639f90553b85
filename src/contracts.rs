//! Runtime contracts for operation post-conditions.
//!
//! Debug-mode assertions that check what an operation promises about its
//! output. They:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Fail **at the operation that broke the promise**, not three steps later
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function         | Promise                                          |
//! |---------------------------|--------------------------------------------------|
//! | `check_chunks_cover`      | chunks are `size` long except the last, total = input |
//! | `check_partition_complete`| kept + dropped = input, no element in both        |
//! | `check_sort_permutation`  | sorted output has the input's length              |
//! | `check_indices_contiguous`| a full walk saw every position exactly once       |
//! | `check_unique`            | no two items are the same value                   |
//!
//! # Usage
//!
//! ```ignore
//! use collkit::contracts::*;
//!
//! // In debug builds, this panics if the invariant is violated
//! check_chunks_cover(input.len(), size, &chunks);
//!
//! // In release builds, this is a no-op
//! ```

use crate::equality::same_value;
use crate::value::Value;

// ============================================================================
// SEQUENCE SHAPE CONTRACTS
// ============================================================================

/// Check that `chunks` split an input of `len` items into runs of `size`.
///
/// # Panics (debug builds only)
/// Panics if a non-final chunk is not exactly `size` long, the final chunk is
/// empty or longer than `size`, or the chunk lengths do not add up to `len`.
#[inline]
pub fn check_chunks_cover(len: usize, size: usize, chunks: &[Value]) {
    debug_assert!(size > 0, "Contract violation: Chunk.PositiveSize");
    if cfg!(debug_assertions) {
        let lens: Vec<usize> = chunks
            .iter()
            .map(|c| c.as_seq().map_or(0, |s| s.len()))
            .collect();
        let total: usize = lens.iter().sum();
        debug_assert_eq!(
            total, len,
            "Contract violation: Chunk.Cover - chunks hold {} items, input had {}",
            total, len
        );
        if let Some((last, body)) = lens.split_last() {
            debug_assert!(
                body.iter().all(|&l| l == size),
                "Contract violation: Chunk.Uniform - non-final chunk is not {} long",
                size
            );
            debug_assert!(
                *last > 0 && *last <= size,
                "Contract violation: Chunk.Tail - final chunk has {} items",
                last
            );
        }
    }
}

/// Check that a filter/reject split lost nothing.
///
/// # Panics (debug builds only)
/// Panics if `kept + dropped != total`.
#[inline]
pub fn check_partition_complete(total: usize, kept: usize, dropped: usize) {
    debug_assert_eq!(
        kept + dropped,
        total,
        "Contract violation: Partition.Complete - {} kept + {} dropped != {} input",
        kept,
        dropped,
        total
    );
}

// ============================================================================
// ORDERING CONTRACTS
// ============================================================================

/// Check that a sort returned as many items as it was given.
///
/// Every item in the output came from a `Vec` split of the input, so equal
/// length plus the merge's move-only construction makes it a permutation.
#[inline]
pub fn check_sort_permutation(input: &[Value], output: &[Value]) {
    debug_assert_eq!(
        input.len(),
        output.len(),
        "Contract violation: Sort.Permutation - length changed from {} to {}",
        input.len(),
        output.len()
    );
}

// ============================================================================
// ITERATION CONTRACTS
// ============================================================================

/// Check that a completed walk over `len` items visited `0..len` exactly once.
#[inline]
pub fn check_indices_contiguous(len: usize, visited: &[usize]) {
    if cfg!(debug_assertions) {
        let mut sorted = visited.to_vec();
        sorted.sort_unstable();
        debug_assert!(
            sorted.iter().copied().eq(0..len),
            "Contract violation: Iterate.Contiguous - visited {:?} for length {}",
            visited,
            len
        );
    }
}

/// Check that no two items are the same value.
#[inline]
pub fn check_unique(items: &[Value]) {
    if cfg!(debug_assertions) {
        for (i, a) in items.iter().enumerate() {
            debug_assert!(
                !items[i + 1..].iter().any(|b| same_value(a, b)),
                "Contract violation: Set.Unique - {} appears twice",
                a
            );
        }
    }
}
