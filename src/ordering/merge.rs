// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Top-down merge sort with an optional rayon fan-out.
//!
//! Runs shorter than two elements come back untouched. Longer runs split at
//! the midpoint, sort each half, and merge. With `parallel` set, halves of
//! runs at least `PARALLEL_THRESHOLD` long are sorted through `rayon::join`;
//! each half owns its own vector so nothing is shared while they run. Below
//! the threshold the recursion is sequential. Scheduling is the only
//! difference: the merge and its tie rule are identical either way.

#[cfg(feature = "parallel")]
use rayon::join;

use super::{Orderable, SortOptions, SortOrder};
use std::cmp::Ordering;

/// Runs at least this long are split across the rayon pool when sorting in
/// parallel.
pub const PARALLEL_THRESHOLD: usize = 2048;

/// Why a run stopped sorting.
enum Abort<E> {
    /// Some pair of keys had no ordering.
    Incomparable,
    /// The key function failed.
    Failed(E),
}

/// Stable merge sort of `items` by `key`.
///
/// Returns the input order unchanged when any compared pair of keys is
/// incomparable. Returns `Err` only when `key` itself fails.
pub fn merge_sort<T, K, E, F>(items: &[T], key: &F, options: SortOptions) -> Result<Vec<T>, E>
where
    T: Clone + Send,
    K: Orderable,
    E: Send,
    F: Fn(&T) -> Result<K, E> + Sync,
{
    match sort_run(items.to_vec(), key, options) {
        Ok(sorted) => {
            debug_assert_eq!(sorted.len(), items.len());
            Ok(sorted)
        }
        Err(Abort::Incomparable) => Ok(items.to_vec()),
        Err(Abort::Failed(e)) => Err(e),
    }
}

fn sort_run<T, K, E, F>(mut run: Vec<T>, key: &F, options: SortOptions) -> Result<Vec<T>, Abort<E>>
where
    T: Clone + Send,
    K: Orderable,
    E: Send,
    F: Fn(&T) -> Result<K, E> + Sync,
{
    if run.len() < 2 {
        return Ok(run);
    }

    let right = run.split_off(run.len() / 2);
    let left = run;
    let (left, right) = sort_halves(left, right, key, options);
    merge(left?, right?, key, options.order)
}

#[cfg(feature = "parallel")]
fn sort_halves<T, K, E, F>(
    left: Vec<T>,
    right: Vec<T>,
    key: &F,
    options: SortOptions,
) -> (Result<Vec<T>, Abort<E>>, Result<Vec<T>, Abort<E>>)
where
    T: Clone + Send,
    K: Orderable,
    E: Send,
    F: Fn(&T) -> Result<K, E> + Sync,
{
    if options.parallel && left.len() + right.len() >= PARALLEL_THRESHOLD {
        join(
            || sort_run(left, key, options),
            || sort_run(right, key, options),
        )
    } else {
        (sort_run(left, key, options), sort_run(right, key, options))
    }
}

#[cfg(not(feature = "parallel"))]
fn sort_halves<T, K, E, F>(
    left: Vec<T>,
    right: Vec<T>,
    key: &F,
    options: SortOptions,
) -> (Result<Vec<T>, Abort<E>>, Result<Vec<T>, Abort<E>>)
where
    T: Clone + Send,
    K: Orderable,
    E: Send,
    F: Fn(&T) -> Result<K, E> + Sync,
{
    (sort_run(left, key, options), sort_run(right, key, options))
}

/// Merge two sorted runs, recomputing both keys for every comparison.
///
/// Ascending takes from the left run when `left <= right`, so ties keep their
/// input order. Descending takes from the right run on that same decision.
fn merge<T, K, E, F>(
    left: Vec<T>,
    right: Vec<T>,
    key: &F,
    order: SortOrder,
) -> Result<Vec<T>, Abort<E>>
where
    K: Orderable,
    F: Fn(&T) -> Result<K, E>,
{
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        let kl = key(l).map_err(Abort::Failed)?;
        let kr = key(r).map_err(Abort::Failed)?;
        let left_le = match kl.compare(&kr) {
            Some(ordering) => ordering != Ordering::Greater,
            None => return Err(Abort::Incomparable),
        };
        let take_left = match order {
            SortOrder::Ascending => left_le,
            SortOrder::Descending => !left_le,
        };
        let next = if take_left { left.next() } else { right.next() };
        out.extend(next);
    }
    out.extend(left);
    out.extend(right);
    Ok(out)
}
