// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Callback-driven operations.
//!
//! Every operation here follows the same four steps: borrow the container,
//! validate the callback against it, walk it with the iteration engine, and
//! assemble the result. Sequences and collections share one code path; the
//! cursor carries the key when there is one.

use std::ops::ControlFlow;

use super::guarded;
use crate::callback::contract::{validate, validate_reducer, ReturnRule, ValidatedCallback};
use crate::callback::Callback;
use crate::contracts::{check_indices_contiguous, check_partition_complete};
use crate::error::{Error, Result};
use crate::inspect::{collection, container, sequence, Container};
use crate::iterate::{try_for_each_collection, try_for_each_sequence, Cursor, Direction};
use crate::value::{Collection, Sequence, Type, Value};

/// Walk either container kind.
fn walk<'a, F>(c: Container<'a>, direction: Direction, visit: F) -> Result<bool>
where
    F: FnMut(Cursor<'a>) -> Result<ControlFlow<()>>,
{
    match c {
        Container::Sequence(seq) => try_for_each_sequence(seq, direction, visit),
        Container::Collection(map) => try_for_each_collection(map, direction, visit),
    }
}

fn each_in(value: &Value, callback: &Callback, direction: Direction) -> Result<()> {
    let c = container(value)?;
    let cb = validate(callback, c, ReturnRule::Visitor)?;
    guarded(|| {
        let mut visited = Vec::new();
        let completed = walk(c, direction, |cursor| {
            if cfg!(debug_assertions) {
                visited.push(cursor.index);
            }
            cb.visit(&cursor)
        })?;
        if completed {
            check_indices_contiguous(c.len(), &visited);
        }
        Ok(())
    })
}

/// Visit every element in order. A callback returning `false` stops the walk.
pub fn each(value: &Value, callback: &Callback) -> Result<()> {
    each_in(value, callback, Direction::Forward)
}

/// Visit every element from the end. Indices are still element positions.
pub fn each_right(value: &Value, callback: &Callback) -> Result<()> {
    each_in(value, callback, Direction::Reverse)
}

/// Split a container by a predicate into (matching, not matching), both with
/// the input's container type.
fn split(value: &Value, callback: &Callback) -> Result<(Value, Value)> {
    let c = container(value)?;
    let cb = validate(callback, c, ReturnRule::Predicate)?;
    guarded(|| {
        let (kept, dropped) = match c {
            Container::Sequence(seq) => split_sequence(seq, &cb)?,
            Container::Collection(map) => split_collection(map, &cb)?,
        };
        Ok((kept, dropped))
    })
}

fn split_sequence(seq: &Sequence, cb: &ValidatedCallback<'_>) -> Result<(Value, Value)> {
    let mut kept = Vec::new();
    let mut dropped = Vec::new();
    try_for_each_sequence(seq, Direction::Forward, |cursor| {
        if cb.test(&cursor)? {
            kept.push(cursor.value.clone());
        } else {
            dropped.push(cursor.value.clone());
        }
        Ok(ControlFlow::Continue(()))
    })?;
    check_partition_complete(seq.len(), kept.len(), dropped.len());
    Ok((
        Value::from(Sequence::from_trusted(seq.elem().clone(), kept)),
        Value::from(Sequence::from_trusted(seq.elem().clone(), dropped)),
    ))
}

fn split_collection(map: &Collection, cb: &ValidatedCallback<'_>) -> Result<(Value, Value)> {
    let mut kept = Collection::new(map.key_type().clone(), map.value_type().clone());
    let mut dropped = kept.clone();
    try_for_each_collection(map, Direction::Forward, |cursor| {
        let target = if cb.test(&cursor)? {
            &mut kept
        } else {
            &mut dropped
        };
        if let Some(key) = cursor.key {
            target.insert(key.clone(), cursor.value.clone())?;
        }
        Ok(ControlFlow::Continue(()))
    })?;
    check_partition_complete(map.len(), kept.len(), dropped.len());
    Ok((Value::from(kept), Value::from(dropped)))
}

/// Elements for which the predicate holds, in order.
pub fn filter(value: &Value, callback: &Callback) -> Result<Value> {
    split(value, callback).map(|(kept, _)| kept)
}

/// Elements for which the predicate fails, in order.
pub fn reject(value: &Value, callback: &Callback) -> Result<Value> {
    split(value, callback).map(|(_, dropped)| dropped)
}

/// `(filter, reject)` in one walk.
pub fn partition(value: &Value, callback: &Callback) -> Result<(Value, Value)> {
    split(value, callback)
}

/// Apply a transform to every element. The result is a sequence whose element
/// type is the callback's declared return type, for sequences and collections
/// alike.
pub fn map(value: &Value, callback: &Callback) -> Result<Value> {
    let c = container(value)?;
    let cb = validate(callback, c, ReturnRule::Transform)?;
    let ret = cb.ret().cloned().unwrap_or(Type::Any);
    guarded(|| {
        let mut out = Vec::with_capacity(c.len());
        walk(c, Direction::Forward, |cursor| {
            out.push(cb.apply(&cursor)?);
            Ok(ControlFlow::Continue(()))
        })?;
        Ok(Value::from(Sequence::from_trusted(ret, out)))
    })
}

/// Fold every element into `seed`. Sequences pass the index as the optional
/// third argument, collections the key.
pub fn reduce(value: &Value, callback: &Callback, seed: Value) -> Result<Value> {
    let c = container(value)?;
    let reducer = validate_reducer(callback, c, &seed)?;
    guarded(|| {
        let mut acc = Some(seed);
        walk(c, Direction::Forward, |cursor| {
            let current = acc.take().unwrap_or(Value::Nil(Type::Any));
            acc = Some(reducer.step(current, &cursor)?);
            Ok(ControlFlow::Continue(()))
        })?;
        acc.ok_or_else(|| Error::CallbackFailed("reduction lost its accumulator".to_string()))
    })
}

/// First element (in walk order) matching the predicate.
fn find_cursor<T>(
    c: Container<'_>,
    callback: &Callback,
    direction: Direction,
    pick: impl Fn(&Cursor<'_>) -> T,
) -> Result<Option<T>> {
    let cb = validate(callback, c, ReturnRule::Predicate)?;
    guarded(|| {
        let mut found = None;
        walk(c, direction, |cursor| {
            if cb.test(&cursor)? {
                found = Some(pick(&cursor));
                return Ok(ControlFlow::Break(()));
            }
            Ok(ControlFlow::Continue(()))
        })?;
        Ok(found)
    })
}

/// First element for which the predicate holds.
pub fn find(value: &Value, callback: &Callback) -> Result<Option<Value>> {
    find_cursor(container(value)?, callback, Direction::Forward, |c| {
        c.value.clone()
    })
}

/// Position of the first matching element of a sequence.
pub fn find_index(value: &Value, callback: &Callback) -> Result<Option<usize>> {
    let seq = sequence(value)?;
    find_cursor(
        Container::Sequence(seq),
        callback,
        Direction::Forward,
        |c| c.index,
    )
}

/// Position of the last matching element of a sequence.
pub fn find_last_index(value: &Value, callback: &Callback) -> Result<Option<usize>> {
    let seq = sequence(value)?;
    find_cursor(
        Container::Sequence(seq),
        callback,
        Direction::Reverse,
        |c| c.index,
    )
}

/// Key of the first collection entry for which the predicate holds.
pub fn find_key(value: &Value, callback: &Callback) -> Result<Option<Value>> {
    let map = collection(value)?;
    let found = find_cursor(
        Container::Collection(map),
        callback,
        Direction::Forward,
        |c| c.key.cloned(),
    )?;
    Ok(found.flatten())
}

/// Whether the predicate holds for every element. Vacuously true when empty.
pub fn every(value: &Value, callback: &Callback) -> Result<bool> {
    let c = container(value)?;
    let cb = validate(callback, c, ReturnRule::Predicate)?;
    guarded(|| {
        walk(c, Direction::Forward, |cursor| {
            Ok(if cb.test(&cursor)? {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            })
        })
    })
}

/// Whether the predicate holds for at least one element.
pub fn some(value: &Value, callback: &Callback) -> Result<bool> {
    let found = find_cursor(container(value)?, callback, Direction::Forward, |_| ())?;
    Ok(found.is_some())
}
