// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Cross-kind comparison of sort keys.
//!
//! Key callbacks are free to return different kinds for different elements, so
//! the comparison has to decide what `Int(3)` vs `Str("10")` means. The rules,
//! checked in this order:
//!
//! | Left      | Right         | Rule                                       |
//! |-----------|---------------|--------------------------------------------|
//! | int/uint  | int/uint      | widen both to i128                         |
//! | number    | float         | compare as f64                             |
//! | number    | str           | parse the string; malformed parses as 0    |
//! | str       | str           | lexical (byte order)                       |
//! | str       | anything else | format the other side as text, lexical     |
//! | bool      | bool          | `false < true`                             |
//! | otherwise |               | incomparable                               |
//!
//! The "malformed numeric string is zero" rule is surprising but intentional:
//! a sort over sloppy data still completes instead of failing.

use crate::value::Value;
use std::cmp::Ordering;

/// A number in the widest domain needed to compare it exactly.
#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(Number::Int(i128::from(*n))),
            Value::Uint(n) => Some(Number::Int(i128::from(*n))),
            Value::Float(x) => Some(Number::Float(*x)),
            _ => None,
        }
    }

    /// Parse text as a number. Anything unparseable is zero.
    fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Ok(n) = text.parse::<i128>() {
            return Number::Int(n);
        }
        match text.parse::<f64>() {
            Ok(x) => Number::Float(x),
            Err(_) => Number::Int(0),
        }
    }

    fn compare(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (Number::Int(a), Number::Float(b)) => (a as f64).partial_cmp(&b),
            (Number::Float(a), Number::Int(b)) => a.partial_cmp(&(b as f64)),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
        }
    }
}

/// Compare two sort keys; `None` when the pair has no defined order.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (Number::of(a), Number::of(b)) {
        return x.compare(y);
    }
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Some(x.as_str().cmp(y.as_str())),
        (Value::Str(s), other) => {
            if let Some(n) = Number::of(other) {
                Number::parse(s).compare(n)
            } else {
                Some(s.as_str().cmp(other.to_string().as_str()))
            }
        }
        (other, Value::Str(s)) => {
            if let Some(n) = Number::of(other) {
                n.compare(Number::parse(s))
            } else {
                Some(other.to_string().as_str().cmp(s.as_str()))
            }
        }
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
