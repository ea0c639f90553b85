// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shape-only sequence operations: nothing here runs a callback.
//!
//! Inputs may be growable sequences or fixed-size arrays; outputs are always
//! growable sequences with the input's element type (or, for `chunk` and
//! `flatten`, one nesting level more or less).

use super::count_arg;
use crate::contracts::check_chunks_cover;
use crate::error::{Error, Result};
use crate::inspect::{self, sequence};
use crate::value::{Sequence, Type, Value};

fn growable(elem: &Type, items: Vec<Value>) -> Value {
    Value::from(Sequence::from_trusted(elem.clone(), items))
}

/// Split into runs of `size`; the last run holds the remainder.
pub fn chunk(value: &Value, size: i64) -> Result<Value> {
    let seq = sequence(value)?;
    if size <= 0 {
        return Err(Error::out_of_range(
            "size",
            format!("chunk size must be positive, got {}", size),
        ));
    }
    let size = size as usize;
    let chunks: Vec<Value> = seq
        .items()
        .chunks(size)
        .map(|run| growable(seq.elem(), run.to_vec()))
        .collect();
    check_chunks_cover(seq.len(), size, &chunks);
    Ok(growable(&Type::seq(seq.elem().clone()), chunks))
}

/// Drop every falsy item.
pub fn compact(value: &Value) -> Result<Value> {
    let seq = sequence(value)?;
    let kept = seq
        .items()
        .iter()
        .filter(|item| crate::equality::is_truthy(item))
        .cloned()
        .collect();
    Ok(growable(seq.elem(), kept))
}

/// Items of `a` followed by items of `b`. Element types must match.
pub fn concat(a: &Value, b: &Value) -> Result<Value> {
    let left = sequence(a)?;
    let right = sequence(b)?;
    same_elem(left, right)?;
    let items = left.items().iter().chain(right.items()).cloned().collect();
    Ok(growable(left.elem(), items))
}

pub(crate) fn same_elem(a: &Sequence, b: &Sequence) -> Result<()> {
    if a.elem() == b.elem() {
        Ok(())
    } else {
        Err(Error::TypeMismatch {
            expected: a.elem().clone(),
            got: b.elem().clone(),
        })
    }
}

/// Everything after the first `n` items.
pub fn drop(value: &Value, n: i64) -> Result<Value> {
    let seq = sequence(value)?;
    let n = count_arg("n", n)?.min(seq.len());
    Ok(growable(seq.elem(), seq.items()[n..].to_vec()))
}

/// Everything before the last `n` items.
pub fn drop_right(value: &Value, n: i64) -> Result<Value> {
    let seq = sequence(value)?;
    let n = count_arg("n", n)?.min(seq.len());
    Ok(growable(seq.elem(), seq.items()[..seq.len() - n].to_vec()))
}

/// The first `n` items.
pub fn take(value: &Value, n: i64) -> Result<Value> {
    let seq = sequence(value)?;
    let n = count_arg("n", n)?.min(seq.len());
    Ok(growable(seq.elem(), seq.items()[..n].to_vec()))
}

/// The last `n` items.
pub fn take_right(value: &Value, n: i64) -> Result<Value> {
    let seq = sequence(value)?;
    let n = count_arg("n", n)?.min(seq.len());
    Ok(growable(seq.elem(), seq.items()[seq.len() - n..].to_vec()))
}

/// Items in `start..end`. Both bounds clamp to the length; `start > end` is
/// an error.
pub fn slice(value: &Value, start: i64, end: i64) -> Result<Value> {
    let seq = sequence(value)?;
    let start = count_arg("start", start)?;
    let end = count_arg("end", end)?;
    if start > end {
        return Err(Error::out_of_range(
            "start",
            format!("start {} is past end {}", start, end),
        ));
    }
    let end = end.min(seq.len());
    let start = start.min(end);
    Ok(growable(seq.elem(), seq.items()[start..end].to_vec()))
}

/// All but the last item.
pub fn initial(value: &Value) -> Result<Value> {
    drop_right(value, 1)
}

/// All but the first item.
pub fn tail(value: &Value) -> Result<Value> {
    drop(value, 1)
}

/// Reverse a sequence, or the characters of a string.
pub fn reverse(value: &Value) -> Result<Value> {
    match value {
        Value::Str(s) => Ok(Value::Str(s.chars().rev().collect())),
        Value::Seq(seq) => {
            let items = seq.items().iter().rev().cloned().collect();
            Ok(growable(seq.elem(), items))
        }
        Value::Nil(ty) => Err(Error::NilOrInvalidInput(format!("nil {}", ty))),
        other => Err(Error::WrongShape {
            expected: "sequence or string",
            got: other.ty(),
        }),
    }
}

/// Concatenate a sequence of sequences, one level deep. Nil inner sequences
/// contribute nothing. A `[]any` flattens when every item is a sequence or
/// nil, and the result is `[]any`.
pub fn flatten(value: &Value) -> Result<Value> {
    let seq = sequence(value)?;
    let inner = match seq.elem() {
        Type::Any => Type::Any,
        elem => match elem.elem() {
            Some(inner) => inner.clone(),
            None => {
                return Err(Error::WrongShape {
                    expected: "sequence of sequences",
                    got: seq.ty(),
                })
            }
        },
    };
    let mut items = Vec::new();
    for item in seq.items() {
        match item {
            Value::Seq(run) => items.extend(run.items().iter().cloned()),
            Value::Nil(_) => {}
            other => {
                return Err(Error::WrongShape {
                    expected: "sequence of sequences",
                    got: other.ty(),
                })
            }
        }
    }
    Ok(growable(&inner, items))
}

pub fn first(value: &Value) -> Result<Option<Value>> {
    Ok(sequence(value)?.items().first().cloned())
}

pub fn last(value: &Value) -> Result<Option<Value>> {
    Ok(sequence(value)?.items().last().cloned())
}

/// Item at `index`; negative indices count from the end. Out of bounds is
/// `None`, not an error.
pub fn nth(value: &Value, index: i64) -> Result<Option<Value>> {
    let seq = sequence(value)?;
    let len = seq.len() as i64;
    let pos = if index < 0 { len + index } else { index };
    if pos < 0 {
        return Ok(None);
    }
    Ok(seq.get(pos as usize).cloned())
}

/// Element count of a container, or byte length of a string.
pub fn size(value: &Value) -> Result<usize> {
    match value {
        Value::Str(s) => Ok(s.len()),
        other => Ok(inspect::container(other)?.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{int_map, ints, strs};

    #[test]
    fn chunk_splits_with_remainder() {
        let out = chunk(&ints(&[1, 2, 3, 4, 5]), 2).unwrap();
        assert_eq!(out.to_string(), "[[1 2] [3 4] [5]]");
        assert_eq!(out.ty(), Type::seq(Type::seq(Type::Int)));
    }

    #[test]
    fn chunk_rejects_zero_and_negative_sizes() {
        for size in [0, -3] {
            assert!(matches!(
                chunk(&ints(&[1, 2]), size).unwrap_err(),
                Error::ArgumentOutOfRange { name: "size", .. }
            ));
        }
    }

    #[test]
    fn chunk_of_nil_is_rejected_before_size() {
        let err = chunk(&Value::Nil(Type::seq(Type::Int)), 0).unwrap_err();
        assert!(matches!(err, Error::NilOrInvalidInput(_)));
    }

    #[test]
    fn compact_keeps_truthy_items() {
        let mixed = Value::seq(
            Type::Any,
            vec![
                Value::Int(0),
                Value::Int(1),
                Value::Bool(false),
                Value::Int(2),
                Value::str(""),
                Value::Int(3),
            ],
        )
        .unwrap();
        let out = compact(&mixed).unwrap();
        assert_eq!(out.to_string(), "[1 2 3]");
        assert_eq!(out.ty(), Type::seq(Type::Any));
    }

    #[test]
    fn concat_requires_matching_elements() {
        let out = concat(&ints(&[1]), &ints(&[2, 3])).unwrap();
        assert_eq!(out, ints(&[1, 2, 3]));

        let err = concat(&ints(&[1]), &strs(&["a"])).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                expected: Type::Int,
                got: Type::Str
            }
        );
    }

    #[test]
    fn counts_clamp_to_length() {
        let data = ints(&[1, 2, 3]);
        assert_eq!(take(&data, 10).unwrap(), data);
        assert_eq!(drop(&data, 10).unwrap(), ints(&[]));
        assert_eq!(take_right(&data, 2).unwrap(), ints(&[2, 3]));
        assert_eq!(drop_right(&data, 1).unwrap(), ints(&[1, 2]));
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert!(take(&ints(&[1]), -1).is_err());
        assert!(drop_right(&ints(&[1]), -1).is_err());
    }

    #[test]
    fn slice_bounds() {
        let data = ints(&[1, 2, 3, 4]);
        assert_eq!(slice(&data, 1, 3).unwrap(), ints(&[2, 3]));
        assert_eq!(slice(&data, 2, 99).unwrap(), ints(&[3, 4]));
        assert_eq!(slice(&data, 9, 12).unwrap(), ints(&[]));
        assert!(slice(&data, 3, 1).is_err());
        assert!(slice(&data, -1, 1).is_err());
    }

    #[test]
    fn initial_and_tail_of_empty_are_empty() {
        assert_eq!(initial(&ints(&[])).unwrap(), ints(&[]));
        assert_eq!(tail(&ints(&[])).unwrap(), ints(&[]));
        assert_eq!(tail(&ints(&[1, 2])).unwrap(), ints(&[2]));
    }

    #[test]
    fn reverse_handles_arrays_and_strings() {
        let arr = Value::array(Type::Int, vec![Value::Int(1), Value::Int(2)]).unwrap();
        let out = reverse(&arr).unwrap();
        assert_eq!(out, ints(&[2, 1]));
        assert!(!out.as_seq().unwrap().is_fixed());

        assert_eq!(reverse(&Value::str("añb")).unwrap(), Value::str("bña"));
        assert!(matches!(
            reverse(&Value::Int(1)).unwrap_err(),
            Error::WrongShape { .. }
        ));
    }

    #[test]
    fn flatten_one_level() {
        let nested = chunk(&ints(&[1, 2, 3]), 2).unwrap();
        assert_eq!(flatten(&nested).unwrap(), ints(&[1, 2, 3]));

        let err = flatten(&ints(&[1])).unwrap_err();
        assert!(matches!(
            err,
            Error::WrongShape {
                expected: "sequence of sequences",
                ..
            }
        ));
    }

    #[test]
    fn flatten_skips_nil_runs() {
        let nested = Value::seq(
            Type::seq(Type::Int),
            vec![ints(&[1]), Value::Nil(Type::seq(Type::Int)), ints(&[2])],
        )
        .unwrap();
        assert_eq!(flatten(&nested).unwrap(), ints(&[1, 2]));
    }

    #[test]
    fn flatten_any_of_sequences() {
        let mixed = Value::seq(
            Type::Any,
            vec![ints(&[1]), Value::Nil(Type::Any), strs(&["a"])],
        )
        .unwrap();
        let flat = flatten(&mixed).unwrap();
        assert_eq!(flat.ty(), Type::seq(Type::Any));
        assert_eq!(flat.to_string(), "[1 a]");

        let scalar = Value::seq(Type::Any, vec![ints(&[1]), Value::Int(2)]).unwrap();
        assert!(matches!(
            flatten(&scalar).unwrap_err(),
            Error::WrongShape { got: Type::Int, .. }
        ));
    }

    #[test]
    fn element_access() {
        let data = strs(&["a", "b", "c"]);
        assert_eq!(first(&data).unwrap(), Some(Value::str("a")));
        assert_eq!(last(&data).unwrap(), Some(Value::str("c")));
        assert_eq!(nth(&data, 1).unwrap(), Some(Value::str("b")));
        assert_eq!(nth(&data, -1).unwrap(), Some(Value::str("c")));
        assert_eq!(nth(&data, 3).unwrap(), None);
        assert_eq!(nth(&data, -4).unwrap(), None);
        assert_eq!(first(&strs(&[])).unwrap(), None);
    }

    #[test]
    fn size_of_each_shape() {
        assert_eq!(size(&ints(&[1, 2])).unwrap(), 2);
        assert_eq!(size(&int_map(&[("a", 1)])).unwrap(), 1);
        assert_eq!(size(&Value::str("héllo")).unwrap(), 6);
        assert!(size(&Value::Bool(true)).is_err());
    }
}
