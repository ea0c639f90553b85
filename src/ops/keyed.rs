// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Operations that read or build keyed collections.
//!
//! `group_by`, `key_by` and `count_by` key each element by a transform. The
//! result's key type is the transform's declared return type; keys are merged
//! under same-value equality, so `Int(1)` and `Uint(1)` land in different
//! groups.

use std::ops::ControlFlow;

use super::guarded;
use crate::callback::contract::{validate, ReturnRule};
use crate::callback::Callback;
use crate::equality::position_of;
use crate::error::Result;
use crate::inspect::{collection, container, Container};
use crate::iterate::{try_for_each_collection, try_for_each_sequence, Cursor, Direction};
use crate::value::{Collection, Sequence, Type, Value};

/// Keys of a collection, as a sequence.
pub fn keys(value: &Value) -> Result<Value> {
    let map = collection(value)?;
    Ok(Value::from(Sequence::from_trusted(
        map.key_type().clone(),
        map.keys().cloned().collect(),
    )))
}

/// Values of a collection, as a sequence.
pub fn values(value: &Value) -> Result<Value> {
    let map = collection(value)?;
    Ok(Value::from(Sequence::from_trusted(
        map.value_type().clone(),
        map.values().cloned().collect(),
    )))
}

/// Run a transform over every element, handing `(key, element)` to `sink`.
fn keyed_walk<F>(value: &Value, callback: &Callback, mut sink: F) -> Result<(Type, Type)>
where
    F: FnMut(Value, &Value),
{
    let c = container(value)?;
    let cb = validate(callback, c, ReturnRule::Transform)?;
    let key_type = cb.ret().cloned().unwrap_or(Type::Any);
    let elem = c.elem().clone();
    guarded(|| {
        let mut visit = |cursor: Cursor<'_>| -> Result<ControlFlow<()>> {
            let key = cb.apply(&cursor)?;
            sink(key, cursor.value);
            Ok(ControlFlow::Continue(()))
        };
        match c {
            Container::Sequence(seq) => try_for_each_sequence(seq, Direction::Forward, &mut visit)?,
            Container::Collection(map) => {
                try_for_each_collection(map, Direction::Forward, &mut visit)?
            }
        };
        Ok(())
    })?;
    Ok((key_type, elem))
}

/// Group elements into sequences keyed by the transform's result, keeping
/// input order inside each group.
pub fn group_by(value: &Value, callback: &Callback) -> Result<Value> {
    let mut groups: Vec<(Value, Vec<Value>)> = Vec::new();
    let mut group_keys: Vec<Value> = Vec::new();
    let (key_type, elem) = keyed_walk(value, callback, |key, item| {
        match position_of(&group_keys, &key) {
            Some(pos) => groups[pos].1.push(item.clone()),
            None => {
                group_keys.push(key.clone());
                groups.push((key, vec![item.clone()]));
            }
        }
    })?;

    let mut out = Collection::new(key_type, Type::seq(elem.clone()));
    for (key, items) in groups {
        out.insert(key, Value::from(Sequence::from_trusted(elem.clone(), items)))?;
    }
    Ok(Value::from(out))
}

/// Index elements by the transform's result. Later elements win.
pub fn key_by(value: &Value, callback: &Callback) -> Result<Value> {
    let mut entries: Vec<(Value, Value)> = Vec::new();
    let (key_type, elem) = keyed_walk(value, callback, |key, item| {
        entries.push((key, item.clone()));
    })?;
    Ok(Value::from(Collection::from_entries(key_type, elem, entries)?))
}

/// Count elements per transform result.
pub fn count_by(value: &Value, callback: &Callback) -> Result<Value> {
    let mut counts: Vec<(Value, i64)> = Vec::new();
    let mut count_keys: Vec<Value> = Vec::new();
    let (key_type, _) = keyed_walk(value, callback, |key, _| {
        match position_of(&count_keys, &key) {
            Some(pos) => counts[pos].1 += 1,
            None => {
                count_keys.push(key.clone());
                counts.push((key, 1));
            }
        }
    })?;
    Ok(Value::from(Collection::from_entries(
        key_type,
        Type::Int,
        counts.into_iter().map(|(k, n)| (k, Value::Int(n))),
    )?))
}
