// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Membership and set operations under same-value equality.
//!
//! Order is always the order of first appearance in the left operand. Lookups
//! are linear scans: values have no hash, and same-value equality on floats
//! and composites does not line up with any `Hash` impl we could write.

use super::sequence::same_elem;
use crate::contracts::check_unique;
use crate::equality::{last_position_of, position_of, same_value};
use crate::error::{Error, Result};
use crate::inspect::sequence;
use crate::value::{Sequence, Type, Value};

/// Whether `target` is in `value`.
///
/// Sequences test elements, collections test keys, strings test for a
/// substring (and need a string target).
pub fn contains(value: &Value, target: &Value) -> Result<bool> {
    match value {
        Value::Str(haystack) => match target {
            Value::Str(needle) => Ok(haystack.contains(needle.as_str())),
            other => Err(Error::TypeMismatch {
                expected: Type::Str,
                got: other.ty(),
            }),
        },
        Value::Seq(seq) => Ok(position_of(seq.items(), target).is_some()),
        Value::Map(map) => Ok(map.contains_key(target)),
        Value::Nil(ty) => Err(Error::NilOrInvalidInput(format!("nil {}", ty))),
        other => Err(Error::WrongShape {
            expected: "sequence, collection or string",
            got: other.ty(),
        }),
    }
}

pub fn index_of(value: &Value, target: &Value) -> Result<Option<usize>> {
    Ok(position_of(sequence(value)?.items(), target))
}

pub fn last_index_of(value: &Value, target: &Value) -> Result<Option<usize>> {
    Ok(last_position_of(sequence(value)?.items(), target))
}

fn distinct<'a>(items: impl IntoIterator<Item = &'a Value>) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::new();
    for item in items {
        if position_of(&out, item).is_none() {
            out.push(item.clone());
        }
    }
    check_unique(&out);
    out
}

fn growable(elem: &Type, items: Vec<Value>) -> Value {
    Value::from(Sequence::from_trusted(elem.clone(), items))
}

/// First occurrence of each distinct item.
pub fn uniq(value: &Value) -> Result<Value> {
    let seq = sequence(value)?;
    Ok(growable(seq.elem(), distinct(seq.items())))
}

/// Distinct items of `a` then of `b`.
pub fn union(a: &Value, b: &Value) -> Result<Value> {
    let left = sequence(a)?;
    let right = sequence(b)?;
    same_elem(left, right)?;
    Ok(growable(
        left.elem(),
        distinct(left.items().iter().chain(right.items())),
    ))
}

/// Distinct items of `a` that also appear in `b`.
pub fn intersect(a: &Value, b: &Value) -> Result<Value> {
    let left = sequence(a)?;
    let right = sequence(b)?;
    same_elem(left, right)?;
    let shared = left
        .items()
        .iter()
        .filter(|item| position_of(right.items(), item).is_some());
    Ok(growable(left.elem(), distinct(shared)))
}

/// Items of `a` that do not appear in `b`. Duplicates in `a` are kept.
pub fn difference(a: &Value, b: &Value) -> Result<Value> {
    let left = sequence(a)?;
    let right = sequence(b)?;
    same_elem(left, right)?;
    let items = left
        .items()
        .iter()
        .filter(|item| position_of(right.items(), item).is_none())
        .cloned()
        .collect();
    Ok(growable(left.elem(), items))
}

/// Items of `value` that are not the same value as any of `excluded`.
pub fn without(value: &Value, excluded: &[Value]) -> Result<Value> {
    let seq = sequence(value)?;
    let items = seq
        .items()
        .iter()
        .filter(|item| !excluded.iter().any(|x| same_value(item, x)))
        .cloned()
        .collect();
    Ok(growable(seq.elem(), items))
}
