// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Conversions between Rust types and runtime values.
//!
//! `Typed` is what lets an ordinary closure like `|n: i64| n % 2 == 0` become
//! a callback with a runtime signature of `fn(int) -> bool`.

use super::{Sequence, Type, Value};

/// A Rust type with a fixed runtime `Type`.
pub trait Typed: Sized {
    /// The runtime type every value of `Self` has.
    fn ty() -> Type;

    /// Extract a `Self` from a value, or `None` if the value has another type.
    fn from_value(value: &Value) -> Option<Self>;

    fn into_value(self) -> Value;
}

impl Typed for bool {
    fn ty() -> Type {
        Type::Bool
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl Typed for i64 {
    fn ty() -> Type {
        Type::Int
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_int()
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl Typed for u64 {
    fn ty() -> Type {
        Type::Uint
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_uint()
    }

    fn into_value(self) -> Value {
        Value::Uint(self)
    }
}

impl Typed for f64 {
    fn ty() -> Type {
        Type::Float
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_float()
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl Typed for String {
    fn ty() -> Type {
        Type::Str
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

/// The dynamic type: any value converts.
impl Typed for Value {
    fn ty() -> Type {
        Type::Any
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn into_value(self) -> Value {
        self
    }
}

impl<T: Typed> Typed for Vec<T> {
    fn ty() -> Type {
        Type::seq(T::ty())
    }

    fn from_value(value: &Value) -> Option<Self> {
        let seq = value.as_seq()?;
        if !T::ty().accepts(seq.elem()) {
            return None;
        }
        seq.items().iter().map(T::from_value).collect()
    }

    fn into_value(self) -> Value {
        let items = self.into_iter().map(Typed::into_value).collect();
        Value::from(Sequence::from_trusted(T::ty(), items))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Typed> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        items.into_value()
    }
}
