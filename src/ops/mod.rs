// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The operation catalog.
//!
//! Each operation is a thin consumer of the core: classify the input, check
//! the arguments, validate the callback, then walk the container once (or
//! twice) applying a per-element rule. Validation always completes before the
//! first element is visited, so a rejected call has touched nothing.
//!
//! Operations that run user code do so inside [`guarded`], which turns a
//! panicking callback into `Error::CallbackFailed` instead of unwinding into
//! the caller.
//!
//! | Module     | Operations                                                   |
//! |------------|--------------------------------------------------------------|
//! | `sequence` | chunk, compact, concat, drop, take, slice, reverse, flatten… |
//! | `callback` | each, filter, reject, partition, map, reduce, find, every…   |
//! | `sets`     | contains, index_of, uniq, union, intersect, difference…      |
//! | `keyed`    | keys, values, group_by, key_by, count_by                     |
//! | `sort`     | order_by, sort                                               |

pub mod callback;
pub mod keyed;
pub mod sequence;
pub mod sets;
pub mod sort;

pub use callback::{
    each, each_right, every, filter, find, find_index, find_key, find_last_index, map,
    partition, reduce, reject, some,
};
pub use keyed::{count_by, group_by, key_by, keys, values};
pub use sequence::{
    chunk, compact, concat, drop, drop_right, first, flatten, initial, last, nth, reverse, size,
    slice, tail, take, take_right,
};
pub use sets::{contains, difference, index_of, intersect, last_index_of, union, uniq, without};
pub use sort::{order_by, sort};

use crate::error::{Error, Result};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Run `f`, converting a panic into `Error::CallbackFailed`.
pub(crate) fn guarded<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(Error::CallbackFailed(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("callback panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("callback panicked: {}", msg)
    } else {
        "callback panicked".to_string()
    }
}

/// Interpret a caller-supplied count, rejecting negatives.
pub(crate) fn count_arg(name: &'static str, n: i64) -> Result<usize> {
    usize::try_from(n)
        .map_err(|_| Error::out_of_range(name, format!("must be non-negative, got {}", n)))
}
