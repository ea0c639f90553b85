// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for cross-kind sort key comparison.
//!
//! Heterogeneous keys go through the coercion table (numeric strings, NaN,
//! bools against numbers). Whatever the mix, a sort must finish without an
//! error, return a permutation of its input, and agree with itself across the
//! sequential and parallel paths.

#![no_main]

use arbitrary::Arbitrary;
use collkit::{ops, same_value, SortOptions, Type, Value};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum Key {
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    /// Small numeric-looking text, to hit the parse path.
    Digits(u16),
    Text(String),
}

impl Key {
    fn into_value(self) -> Value {
        match self {
            Key::Int(n) => Value::Int(n),
            Key::Uint(n) => Value::Uint(n),
            Key::Float(x) => Value::Float(x),
            Key::Bool(b) => Value::Bool(b),
            Key::Digits(n) => Value::str(n.to_string()),
            Key::Text(s) => Value::str(s),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct SortInput {
    keys: Vec<Key>,
    descending: bool,
}

fuzz_target!(|input: SortInput| {
    let items: Vec<Value> = input.keys.into_iter().map(Key::into_value).collect();
    let Ok(data) = Value::seq(Type::Any, items.clone()) else {
        return;
    };
    let options = if input.descending {
        SortOptions::descending()
    } else {
        SortOptions::ascending()
    };

    let sorted = ops::sort(&data, options).expect("sorting plain values never fails");
    let parallel = ops::sort(&data, options.parallel()).expect("sorting plain values never fails");

    let out = sorted.as_seq().expect("sort returns a sequence").items();
    assert_eq!(out.len(), items.len(), "sort changed the length");

    // Every input value appears in the output (NaN counts as itself).
    for item in &items {
        assert!(
            out.iter().any(|o| same_value(o, item)),
            "sort lost {}",
            item
        );
    }

    assert_eq!(
        sorted.to_string(),
        parallel.to_string(),
        "parallel sort disagreed with sequential"
    );
});
