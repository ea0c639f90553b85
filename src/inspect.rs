// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shape classification for opaque values.
//!
//! Every operation starts here. `classify` answers three questions about a
//! value it has never seen before: is it a sequence, a keyed collection, or a
//! scalar; what are its element (and key) types; how long is it. Nil values are
//! refused outright since no shape can be derived from nothing.
//!
//! Fixed-size arrays and growable sequences classify the same way. Length is
//! read off the payload, never counted.

use crate::error::{Error, Result};
use crate::value::{Collection, Sequence, Type, Value};
use serde::Serialize;

/// Broad container category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Sequence,
    Collection,
    Scalar,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Sequence => "sequence",
            ShapeKind::Collection => "collection",
            ShapeKind::Scalar => "scalar",
        }
    }
}

/// The classification of one value, fixed for the duration of one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Element type (sequences), value type (collections), or the scalar's own type.
    pub elem: Type,
    /// Key type, collections only.
    pub key: Option<Type>,
    /// Element count, entry count, or byte length of a string.
    pub len: usize,
    /// Fixed-size array rather than growable sequence.
    pub fixed: bool,
}

/// Classify a value.
pub fn classify(value: &Value) -> Result<Shape> {
    let shape = match value {
        Value::Nil(ty) => return Err(Error::NilOrInvalidInput(format!("nil {}", ty))),
        Value::Seq(seq) => Shape {
            kind: ShapeKind::Sequence,
            elem: seq.elem().clone(),
            key: None,
            len: seq.len(),
            fixed: seq.is_fixed(),
        },
        Value::Map(map) => Shape {
            kind: ShapeKind::Collection,
            elem: map.value_type().clone(),
            key: Some(map.key_type().clone()),
            len: map.len(),
            fixed: false,
        },
        Value::Str(s) => Shape {
            kind: ShapeKind::Scalar,
            elem: Type::Str,
            key: None,
            len: s.len(),
            fixed: false,
        },
        scalar => Shape {
            kind: ShapeKind::Scalar,
            elem: scalar.ty(),
            key: None,
            len: 0,
            fixed: false,
        },
    };
    Ok(shape)
}

/// A classified container, borrowed from its value.
#[derive(Debug, Clone, Copy)]
pub enum Container<'a> {
    Sequence(&'a Sequence),
    Collection(&'a Collection),
}

impl<'a> Container<'a> {
    pub fn len(&self) -> usize {
        match self {
            Container::Sequence(seq) => seq.len(),
            Container::Collection(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type (sequence) or value type (collection).
    pub fn elem(&self) -> &'a Type {
        match self {
            Container::Sequence(seq) => seq.elem(),
            Container::Collection(map) => map.value_type(),
        }
    }
}

/// Borrow the sequence payload, refusing nil and non-sequence values.
pub fn sequence(value: &Value) -> Result<&Sequence> {
    match value {
        Value::Seq(seq) => Ok(seq.as_ref()),
        Value::Nil(ty) => Err(Error::NilOrInvalidInput(format!("nil {}", ty))),
        other => Err(Error::WrongShape {
            expected: "sequence",
            got: other.ty(),
        }),
    }
}

/// Borrow the collection payload, refusing nil and non-collection values.
pub fn collection(value: &Value) -> Result<&Collection> {
    match value {
        Value::Map(map) => Ok(map.as_ref()),
        Value::Nil(ty) => Err(Error::NilOrInvalidInput(format!("nil {}", ty))),
        other => Err(Error::WrongShape {
            expected: "collection",
            got: other.ty(),
        }),
    }
}

/// Borrow either container payload.
pub fn container(value: &Value) -> Result<Container<'_>> {
    match value {
        Value::Seq(seq) => Ok(Container::Sequence(seq.as_ref())),
        Value::Map(map) => Ok(Container::Collection(map.as_ref())),
        Value::Nil(ty) => Err(Error::NilOrInvalidInput(format!("nil {}", ty))),
        other => Err(Error::WrongShape {
            expected: "sequence or collection",
            got: other.ty(),
        }),
    }
}
