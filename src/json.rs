// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bridge between JSON documents and runtime values.
//!
//! JSON has no element types, so `from_json` infers them: an array whose items
//! all have the same type gets that element type, anything else is `[]any`.
//! Objects become `map[str]T` with `T` inferred the same way. Integers that fit
//! `i64` are `int`, larger ones `uint`, everything else `float`.
//!
//! `to_json` goes the other way. Maps with string keys become objects; maps
//! with any other key type become arrays of `[key, value]` pairs. Floats JSON
//! cannot represent (NaN, infinities) become `null`.

use crate::value::{Collection, Sequence, Type, Value};
use serde_json::{Map, Number, Value as Json};

/// Convert a JSON document into a value.
pub fn from_json(json: &Json) -> Value {
    match json {
        Json::Null => Value::Nil(Type::Any),
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => number(n),
        Json::String(s) => Value::Str(s.clone()),
        Json::Array(items) => {
            let (elem, items) = unify(items.iter().map(from_json).collect());
            Value::from(Sequence::from_trusted(elem, items))
        }
        Json::Object(fields) => {
            let (elem, values) = unify(fields.values().map(from_json).collect());
            let entries = fields
                .keys()
                .map(|key| Value::Str(key.clone()))
                .zip(values)
                .collect();
            // Object keys are unique strings.
            Value::from(Collection::from_trusted(Type::Str, elem, entries))
        }
    }
}

fn number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else if let Some(u) = n.as_u64() {
        Value::Uint(u)
    } else {
        Value::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// The one type every item has, or `Any`. Empty `[]any` items take no part
/// in the vote and are retyped to the winning sequence type, so `[[1], []]`
/// is `[][]int`.
fn unify(items: Vec<Value>) -> (Type, Vec<Value>) {
    let elem = common_type(items.iter().filter(|item| !is_untyped_empty(item)))
        .or_else(|| common_type(items.iter()))
        .unwrap_or(Type::Any);
    let inner = match elem.elem() {
        Some(inner) if matches!(elem, Type::Seq(_)) => inner.clone(),
        _ => return (elem, items),
    };
    let items = items
        .into_iter()
        .map(|item| {
            if is_untyped_empty(&item) {
                Value::from(Sequence::from_trusted(inner.clone(), Vec::new()))
            } else {
                item
            }
        })
        .collect();
    (elem, items)
}

fn common_type<'a>(mut items: impl Iterator<Item = &'a Value>) -> Option<Type> {
    let first = items.next()?.ty();
    if first != Type::Any && items.all(|item| item.ty() == first) {
        Some(first)
    } else {
        Some(Type::Any)
    }
}

fn is_untyped_empty(value: &Value) -> bool {
    matches!(value, Value::Seq(seq) if seq.is_empty() && seq.elem() == &Type::Any)
}

/// Convert a value into a JSON document.
pub fn to_json(value: &Value) -> Json {
    match value {
        Value::Nil(_) => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(n) => Json::from(*n),
        Value::Uint(n) => Json::from(*n),
        Value::Float(x) => Number::from_f64(*x).map_or(Json::Null, Json::Number),
        Value::Str(s) => Json::String(s.clone()),
        Value::Seq(seq) => Json::Array(seq.items().iter().map(to_json).collect()),
        Value::Map(map) if map.key_type() == &Type::Str => {
            let mut object = Map::new();
            for (key, value) in map.entries() {
                if let Value::Str(key) = key {
                    object.insert(key.clone(), to_json(value));
                }
            }
            Json::Object(object)
        }
        Value::Map(map) => Json::Array(
            map.entries()
                .iter()
                .map(|(k, v)| Json::Array(vec![to_json(k), to_json(v)]))
                .collect(),
        ),
        Value::Record(record) => {
            let mut object = Map::new();
            for (name, value) in record.fields() {
                object.insert(name.clone(), to_json(value));
            }
            Json::Object(object)
        }
    }
}
