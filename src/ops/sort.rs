// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sorting operations over the ordering engine.
//!
//! See [`crate::ordering`] for the two policies every sort here inherits:
//! keys are recomputed per comparison, and an incomparable pair returns the
//! input in its original order.

use super::guarded;
use crate::callback::contract::validate_key;
use crate::callback::Callback;
use crate::contracts::check_sort_permutation;
use crate::error::{Error, Result};
use crate::inspect::sequence;
use crate::iterate::{Cursor, Direction};
use crate::ordering::{merge_sort, SortOptions};
use crate::value::{Sequence, Value};

/// Stable sort of a sequence by a key callback `fn(elem) -> key`.
pub fn order_by(value: &Value, key: &Callback, options: SortOptions) -> Result<Value> {
    let seq = sequence(value)?;
    let cb = validate_key(key, seq)?;
    let sorted = guarded(|| {
        merge_sort(
            seq.items(),
            &|item: &Value| {
                cb.apply(&Cursor {
                    index: 0,
                    key: None,
                    value: item,
                    direction: Direction::Forward,
                })
            },
            options,
        )
    })?;
    finish(seq, sorted)
}

/// Stable sort of a sequence by its own elements.
pub fn sort(value: &Value, options: SortOptions) -> Result<Value> {
    let seq = sequence(value)?;
    let sorted = merge_sort(
        seq.items(),
        &|item: &Value| Ok::<_, Error>(item.clone()),
        options,
    )?;
    finish(seq, sorted)
}

fn finish(seq: &Sequence, sorted: Vec<Value>) -> Result<Value> {
    check_sort_permutation(seq.items(), &sorted);
    Ok(Value::from(Sequence::from_trusted(seq.elem().clone(), sorted)))
}
