//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test fixtures to avoid duplication.

#![doc(hidden)]

use crate::callback::{Callback, Signature};
use crate::value::{Collection, Record, Sequence, Type, Value};

/// A growable `[]int`.
pub fn ints(items: &[i64]) -> Value {
    Value::from(Sequence::from_trusted(
        Type::Int,
        items.iter().copied().map(Value::Int).collect(),
    ))
}

/// A growable `[]float`.
pub fn floats(items: &[f64]) -> Value {
    Value::from(Sequence::from_trusted(
        Type::Float,
        items.iter().copied().map(Value::Float).collect(),
    ))
}

/// A growable `[]str`.
pub fn strs(items: &[&str]) -> Value {
    Value::from(Sequence::from_trusted(
        Type::Str,
        items.iter().map(|s| Value::str(*s)).collect(),
    ))
}

/// A `map[str]int` with the given entries.
pub fn int_map(entries: &[(&str, i64)]) -> Value {
    let mut seen: Vec<&str> = Vec::new();
    let mut out = Vec::new();
    for (k, v) in entries {
        // Later entries replace earlier ones, as `insert` would.
        match seen.iter().position(|s| s == k) {
            Some(pos) => out[pos] = (Value::str(*k), Value::Int(*v)),
            None => {
                seen.push(*k);
                out.push((Value::str(*k), Value::Int(*v)));
            }
        }
    }
    Value::from(Collection::from_trusted(Type::Str, Type::Int, out))
}

/// A `Person { name, age }` record.
pub fn person(name: &str, age: i64) -> Value {
    Value::from(Record::new("Person").with("name", name).with("age", age))
}

/// A `[]Person` built from `(name, age)` pairs.
pub fn people(entries: &[(&str, i64)]) -> Value {
    Value::from(Sequence::from_trusted(
        Type::record("Person"),
        entries.iter().map(|(n, a)| person(n, *a)).collect(),
    ))
}

/// Sort key `fn(Person) -> int` reading the `age` field.
pub fn by_age() -> Callback {
    Callback::new(
        Signature::new([Type::record("Person")]).returns(Type::Int),
        |args| args.first().and_then(|p| p.field("age")).cloned(),
    )
}

/// Ages of a `[]Person`, in order. Missing ages read as -1.
pub fn ages(people: &Value) -> Vec<i64> {
    people
        .as_seq()
        .map(|seq| {
            seq.items()
                .iter()
                .map(|p| p.field("age").and_then(Value::as_int).unwrap_or(-1))
                .collect()
        })
        .unwrap_or_default()
}

/// Items of an `[]int` as plain integers.
pub fn as_ints(value: &Value) -> Vec<i64> {
    value
        .as_seq()
        .map(|seq| seq.items().iter().filter_map(Value::as_int).collect())
        .unwrap_or_default()
}
