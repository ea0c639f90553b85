// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Truthiness and "same value" semantics.
//!
//! Two small predicates that half the catalog leans on. `is_truthy` decides
//! what `compact` throws away. `same_value` decides membership for `contains`,
//! `uniq`, `union`, `intersect` and `difference`.
//!
//! # Same value
//!
//! Scalars compare by value, and only against the same kind: `Int(1)` and
//! `Uint(1)` are different values. Floats use SameValueZero (NaN equals NaN,
//! `0.0` equals `-0.0`). Composites compare by identity: two sequences with the
//! same items are different values unless they are the same allocation. There
//! is no deep comparison, and callers working with composite elements should
//! expect reference semantics.
//!
//! # Truthy
//!
//! Nil, `false`, numeric zero, `""`, and empty growable sequences and maps are
//! falsy. Fixed-size arrays are truthy even when empty; records are always
//! truthy.

use crate::value::Value;
use std::sync::Arc;

/// Whether `value` survives compaction.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Nil(_) => false,
        Value::Bool(b) => *b,
        Value::Int(n) => *n != 0,
        Value::Uint(n) => *n != 0,
        Value::Float(x) => *x != 0.0,
        Value::Str(s) => !s.is_empty(),
        Value::Seq(seq) => seq.is_fixed() || !seq.is_empty(),
        Value::Map(map) => !map.is_empty(),
        Value::Record(_) => true,
    }
}

/// Same-value equality used by membership and set operations.
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil(x), Value::Nil(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Uint(x), Value::Uint(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => (x.is_nan() && y.is_nan()) || x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Seq(x), Value::Seq(y)) => Arc::ptr_eq(x, y),
        (Value::Map(x), Value::Map(y)) => Arc::ptr_eq(x, y),
        (Value::Record(x), Value::Record(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}

/// Position of the first item that is the same value as `target`.
pub fn position_of(items: &[Value], target: &Value) -> Option<usize> {
    items.iter().position(|item| same_value(item, target))
}

/// Position of the last item that is the same value as `target`.
pub fn last_position_of(items: &[Value], target: &Value) -> Option<usize> {
    items.iter().rposition(|item| same_value(item, target))
}
