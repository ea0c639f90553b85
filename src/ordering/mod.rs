// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The ordering engine: stable merge sort over keys that may not be comparable.
//!
//! Sorting here differs from `slice::sort_by` in two deliberate ways:
//!
//! 1. **Keys are recomputed on every comparison.** The engine never builds a
//!    key array; each merge step calls the key function on both candidates.
//!    Key functions must therefore be pure and cheap, and will run more than
//!    `n log n` times.
//! 2. **Incomparable keys abort the sort without an error.** If any pair of
//!    keys has no ordering (`Orderable::compare` returns `None`), the caller
//!    gets the input back in its original order.
//!
//! Both behaviours are pinned by tests (`tests/unit/ordering.rs`) so that a
//! change to either is a visible decision, not an accident.

pub mod coerce;
mod merge;

pub use coerce::compare_values;
pub use merge::{merge_sort, PARALLEL_THRESHOLD};

use crate::value::Value;
use std::cmp::Ordering;

/// A sort key. `None` means the pair has no defined order.
pub trait Orderable {
    fn compare(&self, other: &Self) -> Option<Ordering>;
}

impl Orderable for Value {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        compare_values(self, other)
    }
}

impl Orderable for i64 {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Orderable for u64 {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Orderable for f64 {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        self.partial_cmp(other)
    }
}

impl Orderable for String {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Orderable for &str {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sort configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOptions {
    pub order: SortOrder,
    /// Sort large halves on the rayon pool. Ignored without the `parallel`
    /// feature.
    pub parallel: bool,
}

impl SortOptions {
    pub fn ascending() -> Self {
        Self::default()
    }

    pub fn descending() -> Self {
        Self {
            order: SortOrder::Descending,
            ..Self::default()
        }
    }

    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }
}
