// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime type descriptors.
//!
//! Every `Value` carries enough information to name its `Type`, and every
//! callback signature is a list of `Type`s. Contract validation is nothing more
//! than comparing the two, so the rules for "does this parameter accept that
//! element" live here and nowhere else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The runtime type of a value, an element, a key, or a callback parameter.
///
/// `Int` is the platform integer (the only type an index parameter may have).
/// `Any` is the dynamic type: an element type of `Any` means the sequence is
/// heterogeneous, and a parameter of type `Any` accepts every value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    Any,
    Bool,
    Int,
    Uint,
    Float,
    Str,
    /// Fixed-size array.
    Array { elem: Box<Type>, len: usize },
    /// Growable sequence.
    Seq(Box<Type>),
    Map { key: Box<Type>, value: Box<Type> },
    /// Named struct type.
    Record(String),
}

impl Type {
    pub fn seq(elem: Type) -> Self {
        Type::Seq(Box::new(elem))
    }

    pub fn array(elem: Type, len: usize) -> Self {
        Type::Array {
            elem: Box::new(elem),
            len,
        }
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn record(name: impl Into<String>) -> Self {
        Type::Record(name.into())
    }

    /// Whether a value of this type can be nil (slices, maps, record pointers,
    /// and the dynamic type).
    pub fn is_nilable(&self) -> bool {
        matches!(
            self,
            Type::Any | Type::Seq(_) | Type::Map { .. } | Type::Record(_)
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Uint | Type::Float)
    }

    /// Element type of a sequence or array type.
    pub fn elem(&self) -> Option<&Type> {
        match self {
            Type::Seq(elem) | Type::Array { elem, .. } => Some(elem),
            _ => None,
        }
    }

    /// Whether a parameter (or slot) of type `self` accepts a value of type
    /// `other`. Exact match, or `self` is `Any`. No coercion.
    pub fn accepts(&self, other: &Type) -> bool {
        matches!(self, Type::Any) || self == other
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => write!(f, "any"),
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Uint => write!(f, "uint"),
            Type::Float => write!(f, "float"),
            Type::Str => write!(f, "str"),
            Type::Array { elem, len } => write!(f, "[{}]{}", len, elem),
            Type::Seq(elem) => write!(f, "[]{}", elem),
            Type::Map { key, value } => write!(f, "map[{}]{}", key, value),
            Type::Record(name) => write!(f, "{}", name),
        }
    }
}
