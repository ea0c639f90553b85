// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Static validation of callbacks against loop shapes.
//!
//! A callback is checked once per operation call, before any element is
//! visited. Nothing is cached: the next call may pass a different callback, or
//! the same callback against a different container.
//!
//! # Loop shapes
//!
//! | Container  | Accepted parameter lists      |
//! |------------|-------------------------------|
//! | sequence   | `(value)`, `(value, index)`   |
//! | collection | `(value, key)`, `(value, key, index)` |
//! | reduction  | `(acc, value)`, `(acc, value, index \| key)` |
//! | sort key   | `(value)`                     |
//!
//! `value` must accept the element type, `key` the collection's key type, and
//! `index` must be exactly `int`. A parameter of type `any` accepts anything.
//!
//! # Return rules
//!
//! Predicates return exactly one `bool`. Transforms return exactly one value
//! of any type. Visitors return nothing, or a `bool` where `false` stops the
//! walk. A reducer returns exactly one value its accumulator parameter accepts.
//!
//! Every violation is a `CallbackSignatureMismatch` naming the slot that
//! disagreed. Nothing is coerced.

use std::ops::ControlFlow;

use super::Callback;
use crate::error::{Error, Position, Result};
use crate::inspect::Container;
use crate::iterate::Cursor;
use crate::value::{Sequence, Type, Value};

/// What the operation expects the callback to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnRule {
    /// Exactly one `bool`.
    Predicate,
    /// Exactly one value of any type.
    Transform,
    /// Nothing, or one `bool` (`false` halts).
    Visitor,
}

/// How arguments are laid out for the validated callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgLayout {
    Value,
    ValueIndex,
    ValueKey,
    ValueKeyIndex,
}

/// A callback that passed validation for one container.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedCallback<'a> {
    callback: &'a Callback,
    layout: ArgLayout,
    rule: ReturnRule,
}

/// Validate `callback` for a loop over `container`.
pub fn validate<'a>(
    callback: &'a Callback,
    container: Container<'_>,
    rule: ReturnRule,
) -> Result<ValidatedCallback<'a>> {
    let layout = match container {
        Container::Sequence(seq) => sequence_layout(callback, seq.elem())?,
        Container::Collection(map) => {
            collection_layout(callback, map.key_type(), map.value_type())?
        }
    };
    check_return(callback, rule)?;
    Ok(ValidatedCallback {
        callback,
        layout,
        rule,
    })
}

/// Validate a sort-key callback: exactly `(value)` returning one value.
pub fn validate_key<'a>(callback: &'a Callback, seq: &Sequence) -> Result<ValidatedCallback<'a>> {
    let sig = callback.signature();
    if sig.arity() != 1 {
        return Err(Error::mismatch(
            Position::Arity,
            "1 parameter (value)",
            format!("{} parameters", sig.arity()),
        ));
    }
    check_param(callback, 0, seq.elem())?;
    check_return(callback, ReturnRule::Transform)?;
    Ok(ValidatedCallback {
        callback,
        layout: ArgLayout::Value,
        rule: ReturnRule::Transform,
    })
}

fn sequence_layout(callback: &Callback, elem: &Type) -> Result<ArgLayout> {
    let sig = callback.signature();
    let layout = match sig.arity() {
        1 => ArgLayout::Value,
        2 => ArgLayout::ValueIndex,
        n => {
            return Err(Error::mismatch(
                Position::Arity,
                "1 or 2 parameters (value[, index])",
                format!("{} parameters", n),
            ))
        }
    };
    check_param(callback, 0, elem)?;
    if layout == ArgLayout::ValueIndex {
        check_index(callback, 1)?;
    }
    Ok(layout)
}

fn collection_layout(callback: &Callback, key: &Type, value: &Type) -> Result<ArgLayout> {
    let sig = callback.signature();
    let layout = match sig.arity() {
        2 => ArgLayout::ValueKey,
        3 => ArgLayout::ValueKeyIndex,
        n => {
            return Err(Error::mismatch(
                Position::Arity,
                "2 or 3 parameters (value, key[, index])",
                format!("{} parameters", n),
            ))
        }
    };
    check_param(callback, 0, value)?;
    check_param(callback, 1, key)?;
    if layout == ArgLayout::ValueKeyIndex {
        check_index(callback, 2)?;
    }
    Ok(layout)
}

fn check_param(callback: &Callback, slot: usize, expected: &Type) -> Result<()> {
    let param = &callback.signature().params()[slot];
    if param.accepts(expected) {
        Ok(())
    } else {
        Err(Error::mismatch(
            Position::Param(slot),
            expected.to_string(),
            param.to_string(),
        ))
    }
}

fn check_index(callback: &Callback, slot: usize) -> Result<()> {
    let param = &callback.signature().params()[slot];
    if *param == Type::Int {
        Ok(())
    } else {
        Err(Error::mismatch(
            Position::Param(slot),
            "int (index)",
            param.to_string(),
        ))
    }
}

fn check_return(callback: &Callback, rule: ReturnRule) -> Result<()> {
    match (rule, callback.signature().ret()) {
        (ReturnRule::Predicate, Some(Type::Bool)) => Ok(()),
        (ReturnRule::Predicate, Some(other)) => Err(Error::mismatch(
            Position::Return,
            "bool",
            other.to_string(),
        )),
        (ReturnRule::Predicate, None) => Err(Error::mismatch(
            Position::ReturnArity,
            "1 return value (bool)",
            "0 return values",
        )),
        (ReturnRule::Transform, Some(_)) => Ok(()),
        (ReturnRule::Transform, None) => Err(Error::mismatch(
            Position::ReturnArity,
            "1 return value",
            "0 return values",
        )),
        (ReturnRule::Visitor, None | Some(Type::Bool)) => Ok(()),
        (ReturnRule::Visitor, Some(other)) => Err(Error::mismatch(
            Position::Return,
            "nothing or bool",
            other.to_string(),
        )),
    }
}

impl<'a> ValidatedCallback<'a> {
    pub fn layout(&self) -> ArgLayout {
        self.layout
    }

    /// Declared return type (always `Some` for predicates and transforms).
    pub fn ret(&self) -> Option<&'a Type> {
        self.callback.signature().ret()
    }

    /// Invoke with the arguments the layout calls for.
    pub fn call(&self, cursor: &Cursor<'_>) -> Result<Option<Value>> {
        let args = arguments(self.layout, cursor);
        self.callback.invoke(&args)
    }

    /// Invoke a predicate.
    pub fn test(&self, cursor: &Cursor<'_>) -> Result<bool> {
        debug_assert_eq!(self.rule, ReturnRule::Predicate);
        match self.call(cursor)? {
            Some(Value::Bool(b)) => Ok(b),
            other => Err(Error::CallbackFailed(format!(
                "predicate returned {}",
                describe(other.as_ref())
            ))),
        }
    }

    /// Invoke a transform.
    pub fn apply(&self, cursor: &Cursor<'_>) -> Result<Value> {
        self.call(cursor)?
            .ok_or_else(|| Error::CallbackFailed("transform returned nothing".to_string()))
    }

    /// Invoke a visitor; `false` asks the engine to stop.
    pub fn visit(&self, cursor: &Cursor<'_>) -> Result<ControlFlow<()>> {
        match self.call(cursor)? {
            Some(Value::Bool(false)) => Ok(ControlFlow::Break(())),
            _ => Ok(ControlFlow::Continue(())),
        }
    }
}

fn arguments(layout: ArgLayout, cursor: &Cursor<'_>) -> Vec<Value> {
    let value = cursor.value.clone();
    let index = Value::Int(cursor.index as i64);
    let key = || cursor.key.cloned().unwrap_or(Value::Nil(Type::Any));
    match layout {
        ArgLayout::Value => vec![value],
        ArgLayout::ValueIndex => vec![value, index],
        ArgLayout::ValueKey => vec![value, key()],
        ArgLayout::ValueKeyIndex => vec![value, key(), index],
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.ty().to_string(),
        None => "nothing".to_string(),
    }
}

// ============================================================================
// REDUCERS
// ============================================================================

/// A reduction callback that passed validation.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedReducer<'a> {
    callback: &'a Callback,
    third: Option<Third>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Third {
    Index,
    Key,
}

/// Validate `(acc, value[, index|key])` against the container and seed.
pub fn validate_reducer<'a>(
    callback: &'a Callback,
    container: Container<'_>,
    seed: &Value,
) -> Result<ValidatedReducer<'a>> {
    let sig = callback.signature();
    if !(2..=3).contains(&sig.arity()) {
        return Err(Error::mismatch(
            Position::Arity,
            "2 or 3 parameters (acc, value[, index|key])",
            format!("{} parameters", sig.arity()),
        ));
    }

    let acc = &sig.params()[0];
    if !seed.conforms(acc) {
        return Err(Error::mismatch(
            Position::Param(0),
            seed.ty().to_string(),
            acc.to_string(),
        ));
    }
    check_param(callback, 1, container.elem())?;

    let third = if sig.arity() == 3 {
        match container {
            Container::Sequence(_) => {
                check_index(callback, 2)?;
                Some(Third::Index)
            }
            Container::Collection(map) => {
                check_param(callback, 2, map.key_type())?;
                Some(Third::Key)
            }
        }
    } else {
        None
    };

    match sig.ret() {
        Some(ret) if acc.accepts(ret) => {}
        Some(ret) => {
            return Err(Error::mismatch(
                Position::Return,
                acc.to_string(),
                ret.to_string(),
            ))
        }
        None => {
            return Err(Error::mismatch(
                Position::ReturnArity,
                "1 return value (accumulator)",
                "0 return values",
            ))
        }
    }

    Ok(ValidatedReducer { callback, third })
}

impl ValidatedReducer<'_> {
    /// Fold one element into the accumulator.
    pub fn step(&self, acc: Value, cursor: &Cursor<'_>) -> Result<Value> {
        let mut args = vec![acc, cursor.value.clone()];
        match self.third {
            Some(Third::Index) => args.push(Value::Int(cursor.index as i64)),
            Some(Third::Key) => args.push(cursor.key.cloned().unwrap_or(Value::Nil(Type::Any))),
            None => {}
        }
        self.callback
            .invoke(&args)?
            .ok_or_else(|| Error::CallbackFailed("reducer returned nothing".to_string()))
    }
}
