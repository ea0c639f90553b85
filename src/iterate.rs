// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The iteration engine.
//!
//! Four primitives, and every higher-level operation is built from them:
//!
//! | Primitive                  | Container  | Can stop early |
//! |----------------------------|------------|----------------|
//! | `for_each_sequence`        | sequence   | no             |
//! | `try_for_each_sequence`    | sequence   | yes            |
//! | `for_each_collection`      | collection | no             |
//! | `try_for_each_collection`  | collection | yes            |
//!
//! Each visit receives a fresh `Cursor`. For sequences the cursor index is the
//! element's position, whichever direction the walk goes. Collections are
//! snapshotted once before the walk; the index is the position in that
//! snapshot, and a reverse walk is the snapshot read backwards. Snapshot order
//! is unspecified.
//!
//! Empty containers visit nothing and are not an error.

use std::ops::ControlFlow;

use crate::error::Result;
use crate::value::{Collection, Sequence, Value};

/// Walk direction, fixed for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

/// Position of one visit.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    /// 0-based position (element position for sequences, snapshot position for
    /// collections).
    pub index: usize,
    /// Entry key, collections only.
    pub key: Option<&'a Value>,
    pub value: &'a Value,
    pub direction: Direction,
}

fn positions(len: usize, direction: Direction) -> Box<dyn Iterator<Item = usize>> {
    match direction {
        Direction::Forward => Box::new(0..len),
        Direction::Reverse => Box::new((0..len).rev()),
    }
}

/// Visit every element. Visitor errors abort the walk.
pub fn for_each_sequence<'a, F>(seq: &'a Sequence, direction: Direction, mut visit: F) -> Result<()>
where
    F: FnMut(Cursor<'a>) -> Result<()>,
{
    try_for_each_sequence(seq, direction, |cursor| {
        visit(cursor)?;
        Ok(ControlFlow::Continue(()))
    })
    .map(|_| ())
}

/// Visit elements until the visitor breaks.
///
/// Returns `true` if every element was visited, `false` if the visitor
/// stopped the walk.
pub fn try_for_each_sequence<'a, F>(
    seq: &'a Sequence,
    direction: Direction,
    mut visit: F,
) -> Result<bool>
where
    F: FnMut(Cursor<'a>) -> Result<ControlFlow<()>>,
{
    let items = seq.items();
    for index in positions(items.len(), direction) {
        let cursor = Cursor {
            index,
            key: None,
            value: &items[index],
            direction,
        };
        if visit(cursor)?.is_break() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Visit every entry of a snapshot of the collection.
pub fn for_each_collection<'a, F>(
    map: &'a Collection,
    direction: Direction,
    mut visit: F,
) -> Result<()>
where
    F: FnMut(Cursor<'a>) -> Result<()>,
{
    try_for_each_collection(map, direction, |cursor| {
        visit(cursor)?;
        Ok(ControlFlow::Continue(()))
    })
    .map(|_| ())
}

/// Visit snapshot entries until the visitor breaks.
pub fn try_for_each_collection<'a, F>(
    map: &'a Collection,
    direction: Direction,
    mut visit: F,
) -> Result<bool>
where
    F: FnMut(Cursor<'a>) -> Result<ControlFlow<()>>,
{
    let snapshot: Vec<(&'a Value, &'a Value)> =
        map.entries().iter().map(|(k, v)| (k, v)).collect();
    for index in positions(snapshot.len(), direction) {
        let (key, value) = snapshot[index];
        let cursor = Cursor {
            index,
            key: Some(key),
            value,
            direction,
        };
        if visit(cursor)?.is_break() {
            return Ok(false);
        }
    }
    Ok(true)
}
