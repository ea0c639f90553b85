//! Callback contract checks, seen through the public operations.

use super::common::{int_map, int_predicate_of_arity, ints, is_even, strs};
use collkit::{ops, Callback, Error, Position, Signature, Type, Value};

fn mismatch_at(err: &Error) -> Option<Position> {
    match err {
        Error::CallbackSignatureMismatch { position, .. } => Some(*position),
        _ => None,
    }
}

#[test]
fn five_parameter_filter_fails_and_leaves_input_alone() {
    let data = ints(&[1, 2, 3]);
    let before = data.clone();
    let err = ops::filter(&data, &int_predicate_of_arity(5)).unwrap_err();
    assert_eq!(mismatch_at(&err), Some(Position::Arity));
    assert_eq!(data, before);
}

#[test]
fn sequence_arity_must_be_one_or_two() {
    let data = ints(&[1]);
    for arity in [0, 3, 4] {
        let err = ops::filter(&data, &int_predicate_of_arity(arity)).unwrap_err();
        assert_eq!(mismatch_at(&err), Some(Position::Arity), "arity {}", arity);
    }
    assert!(ops::filter(&data, &int_predicate_of_arity(1)).is_ok());
    assert!(ops::filter(&data, &int_predicate_of_arity(2)).is_ok());
}

#[test]
fn collection_arity_must_be_two_or_three() {
    let data = int_map(&[("a", 1)]);
    let one = Callback::from_fn(|v: i64| v > 0);
    let err = ops::filter(&data, &one).unwrap_err();
    assert_eq!(mismatch_at(&err), Some(Position::Arity));

    let three = Callback::from_fn(|v: i64, _k: String, i: i64| v > i);
    assert!(ops::filter(&data, &three).is_ok());
}

#[test]
fn error_names_the_parameter() {
    let err = ops::map(&strs(&["a"]), &Callback::from_fn(|n: i64| n)).unwrap_err();
    assert_eq!(
        err,
        Error::CallbackSignatureMismatch {
            position: Position::Param(0),
            expected: "str".to_string(),
            got: "int".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "callback signature mismatch at parameter 1: expected str, got int"
    );
}

#[test]
fn predicate_return_must_be_exactly_bool() {
    let err = ops::every(&ints(&[1]), &Callback::from_fn(|n: i64| n)).unwrap_err();
    assert_eq!(mismatch_at(&err), Some(Position::Return));

    let err = ops::some(&ints(&[1]), &Callback::from_fn(|_: i64| ())).unwrap_err();
    assert_eq!(mismatch_at(&err), Some(Position::ReturnArity));
}

#[test]
fn index_parameter_must_be_int() {
    let cb = Callback::new(
        Signature::new([Type::Int, Type::Float]).returns(Type::Bool),
        |_| Some(Value::Bool(true)),
    );
    let err = ops::filter(&ints(&[1]), &cb).unwrap_err();
    assert_eq!(mismatch_at(&err), Some(Position::Param(1)));
}

#[test]
fn reducer_seed_must_match_accumulator() {
    let sum = Callback::from_fn(|acc: i64, n: i64| acc + n);
    let err = ops::reduce(&ints(&[1]), &sum, Value::Float(0.0)).unwrap_err();
    assert_eq!(mismatch_at(&err), Some(Position::Param(0)));
    assert_eq!(
        ops::reduce(&ints(&[1, 2]), &sum, Value::Int(0)).unwrap(),
        Value::Int(3)
    );
}

#[test]
fn nil_input_is_reported_before_the_callback() {
    let nil = Value::Nil(Type::seq(Type::Int));
    let err = ops::filter(&nil, &int_predicate_of_arity(9)).unwrap_err();
    assert!(matches!(err, Error::NilOrInvalidInput(_)));
}

#[test]
fn wrong_shape_is_reported_before_the_callback() {
    let err = ops::filter(&Value::Int(4), &is_even()).unwrap_err();
    assert!(matches!(err, Error::WrongShape { .. }));
}

#[test]
fn validation_is_repeated_per_call() {
    let data = ints(&[1, 2]);
    let good = is_even();
    let bad = Callback::from_fn(|s: String| s.is_empty());
    assert!(ops::filter(&data, &good).is_ok());
    assert!(ops::filter(&data, &bad).is_err());
    assert!(ops::filter(&data, &good).is_ok());
}
