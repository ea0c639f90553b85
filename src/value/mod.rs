// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The runtime value model.
//!
//! Operations accept a `Value` whose shape is unknown until it is classified.
//! Three container payloads sit behind `Arc`s (`Sequence`, `Collection`,
//! `Record`): operations never mutate what the caller handed in, cloning a
//! value is cheap, and "same value" for composites can be answered by pointer
//! identity, the way a reference type compares in a host runtime.
//!
//! `PartialEq` on `Value` is structural and exists for tests and round trips.
//! Operations that need "same value" semantics use [`crate::equality`].

mod convert;
mod ty;

pub use convert::Typed;
pub use ty::Type;

use crate::equality::same_value;
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A nil reference of the given type (nil slice, nil map, nil record,
    /// or a nil interface when the type is `Any`).
    Nil(Type),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Seq(Arc<Sequence>),
    Map(Arc<Collection>),
    Record(Arc<Record>),
}

impl Value {
    pub fn nil(ty: Type) -> Self {
        Value::Nil(ty)
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Build a growable sequence, rejecting items that do not conform to `elem`.
    pub fn seq(elem: Type, items: Vec<Value>) -> Result<Self> {
        Sequence::new(elem, items).map(Value::from)
    }

    /// Build a fixed-size array, rejecting items that do not conform to `elem`.
    pub fn array(elem: Type, items: Vec<Value>) -> Result<Self> {
        Sequence::array(elem, items).map(Value::from)
    }

    /// The runtime type of this value.
    pub fn ty(&self) -> Type {
        match self {
            Value::Nil(ty) => ty.clone(),
            Value::Bool(_) => Type::Bool,
            Value::Int(_) => Type::Int,
            Value::Uint(_) => Type::Uint,
            Value::Float(_) => Type::Float,
            Value::Str(_) => Type::Str,
            Value::Seq(seq) => seq.ty(),
            Value::Map(map) => map.ty(),
            Value::Record(record) => Type::Record(record.name.clone()),
        }
    }

    /// Whether this value may be stored in a slot of type `ty`.
    ///
    /// An untyped nil (`Nil(Any)`) fits any nilable slot.
    pub fn conforms(&self, ty: &Type) -> bool {
        match (self, ty) {
            (_, Type::Any) => true,
            (Value::Nil(Type::Any), slot) => slot.is_nilable(),
            (value, slot) => value.ty() == *slot,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Uint(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&Sequence> {
        match self {
            Value::Seq(seq) => Some(seq.as_ref()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Collection> {
        match self {
            Value::Map(map) => Some(map.as_ref()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record.as_ref()),
            _ => None,
        }
    }

    /// Named field of a record, or string-keyed entry of a map.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(record) => record.get(name),
            Value::Map(map) if map.key_type() == &Type::Str => {
                map.get(&Value::Str(name.to_string()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil(_) => write!(f, "<nil>"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Uint(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Seq(seq) => {
                write!(f, "[")?;
                for (i, item) in seq.items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "map[")?;
                for (i, (key, value)) in map.entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}:{}", key, value)?;
                }
                write!(f, "]")
            }
            Value::Record(record) => {
                write!(f, "{{")?;
                for (i, (_, value)) in record.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// ============================================================================
// SEQUENCE
// ============================================================================

/// An ordered, homogeneous container: a fixed-size array or a growable sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    elem: Type,
    fixed: bool,
    items: Vec<Value>,
}

impl Sequence {
    /// Growable sequence. Every item must conform to `elem`.
    pub fn new(elem: Type, items: Vec<Value>) -> Result<Self> {
        check_items(&elem, &items)?;
        Ok(Self {
            elem,
            fixed: false,
            items,
        })
    }

    /// Fixed-size array. Every item must conform to `elem`.
    pub fn array(elem: Type, items: Vec<Value>) -> Result<Self> {
        check_items(&elem, &items)?;
        Ok(Self {
            elem,
            fixed: true,
            items,
        })
    }

    /// Growable sequence built from items already known to conform, e.g. a
    /// subset of another sequence with the same element type.
    pub(crate) fn from_trusted(elem: Type, items: Vec<Value>) -> Self {
        debug_assert!(
            items.iter().all(|item| item.conforms(&elem)),
            "Contract violation: Sequence.Homogeneous - item does not conform to {}",
            elem
        );
        Self {
            elem,
            fixed: false,
            items,
        }
    }

    pub fn elem(&self) -> &Type {
        &self.elem
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn ty(&self) -> Type {
        if self.fixed {
            Type::array(self.elem.clone(), self.items.len())
        } else {
            Type::seq(self.elem.clone())
        }
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Value::Seq(Arc::new(seq))
    }
}

fn check_items(elem: &Type, items: &[Value]) -> Result<()> {
    match items.iter().find(|item| !item.conforms(elem)) {
        Some(bad) => Err(Error::TypeMismatch {
            expected: elem.clone(),
            got: bad.ty(),
        }),
        None => Ok(()),
    }
}

// ============================================================================
// KEYED COLLECTION
// ============================================================================

/// A key → value container with homogeneous key and value types.
///
/// Keys are unique under same-value equality. Entries are kept in insertion
/// order, but callers must treat iteration order as unspecified.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    key: Type,
    value: Type,
    entries: Vec<(Value, Value)>,
}

impl Collection {
    pub fn new(key: Type, value: Type) -> Self {
        Self {
            key,
            value,
            entries: Vec::new(),
        }
    }

    pub fn from_entries(
        key: Type,
        value: Type,
        entries: impl IntoIterator<Item = (Value, Value)>,
    ) -> Result<Self> {
        let mut collection = Self::new(key, value);
        for (k, v) in entries {
            collection.insert(k, v)?;
        }
        Ok(collection)
    }

    /// Collection built from entries already known to conform, with keys
    /// already unique.
    pub(crate) fn from_trusted(key: Type, value: Type, entries: Vec<(Value, Value)>) -> Self {
        debug_assert!(
            entries
                .iter()
                .all(|(k, v)| k.conforms(&key) && v.conforms(&value)),
            "Contract violation: Collection.Homogeneous - entry does not conform to map[{}]{}",
            key,
            value
        );
        debug_assert!(
            entries
                .iter()
                .enumerate()
                .all(|(i, (k, _))| entries[..i].iter().all(|(seen, _)| !same_value(seen, k))),
            "Contract violation: Collection.UniqueKeys - duplicate key"
        );
        Self {
            key,
            value,
            entries,
        }
    }

    /// Insert an entry, returning the value it replaced.
    pub fn insert(&mut self, key: Value, value: Value) -> Result<Option<Value>> {
        if !key.conforms(&self.key) {
            return Err(Error::TypeMismatch {
                expected: self.key.clone(),
                got: key.ty(),
            });
        }
        if !value.conforms(&self.value) {
            return Err(Error::TypeMismatch {
                expected: self.value.clone(),
                got: value.ty(),
            });
        }
        match self.position(&key) {
            Some(pos) => Ok(Some(std::mem::replace(&mut self.entries[pos].1, value))),
            None => {
                self.entries.push((key, value));
                Ok(None)
            }
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.position(key).map(|pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.position(key).is_some()
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.entries.iter().position(|(k, _)| same_value(k, key))
    }

    pub fn key_type(&self) -> &Type {
        &self.key
    }

    pub fn value_type(&self) -> &Type {
        &self.value
    }

    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ty(&self) -> Type {
        Type::map(self.key.clone(), self.value.clone())
    }
}

impl From<Collection> for Value {
    fn from(map: Collection) -> Self {
        Value::Map(Arc::new(map))
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// A named struct value.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field setter. Setting an existing field replaces it.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(Arc::new(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_rejects_heterogeneous_items() {
        let err = Value::seq(Type::Int, vec![Value::Int(1), Value::str("two")]).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                expected: Type::Int,
                got: Type::Str
            }
        );
    }

    #[test]
    fn any_sequence_holds_mixed_items() {
        let value = Value::seq(
            Type::Any,
            vec![Value::Int(0), Value::Bool(false), Value::str("")],
        )
        .unwrap();
        assert_eq!(value.ty(), Type::seq(Type::Any));
    }

    #[test]
    fn array_type_carries_length() {
        let value = Value::array(Type::Int, vec![Value::Int(1), Value::Int(2)]).unwrap();
        assert_eq!(value.ty(), Type::array(Type::Int, 2));
    }

    #[test]
    fn untyped_nil_fits_nilable_slots_only() {
        let nil = Value::Nil(Type::Any);
        assert!(nil.conforms(&Type::seq(Type::Int)));
        assert!(nil.conforms(&Type::record("Person")));
        assert!(!nil.conforms(&Type::Int));
    }

    #[test]
    fn collection_insert_replaces_existing_key() {
        let mut map = Collection::new(Type::Str, Type::Int);
        assert_eq!(map.insert(Value::str("a"), Value::Int(1)).unwrap(), None);
        assert_eq!(
            map.insert(Value::str("a"), Value::Int(2)).unwrap(),
            Some(Value::Int(1))
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Value::str("a")), Some(&Value::Int(2)));
    }

    #[test]
    fn collection_rejects_wrong_key_type() {
        let mut map = Collection::new(Type::Str, Type::Int);
        let err = map.insert(Value::Int(1), Value::Int(1)).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn field_reads_records_and_string_maps() {
        let person = Value::from(Record::new("Person").with("age", 30i64));
        assert_eq!(person.field("age"), Some(&Value::Int(30)));

        let map = Collection::from_entries(
            Type::Str,
            Type::Int,
            [(Value::str("age"), Value::Int(41))],
        )
        .unwrap();
        assert_eq!(Value::from(map).field("age"), Some(&Value::Int(41)));
    }

    #[test]
    fn display_formats_like_verbs() {
        let seq = Value::seq(Type::Int, vec![Value::Int(1), Value::Int(2)]).unwrap();
        assert_eq!(seq.to_string(), "[1 2]");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Nil(Type::Any).to_string(), "<nil>");
    }
}
