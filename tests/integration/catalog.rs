//! The operation catalog on realistic inputs.

use super::common::{ages, by_age, ints, is_even, people, person};
use collkit::json::to_json;
use collkit::{ops, Callback, Error, Pipeline, SortOptions, Type, Value};
use serde_json::json;

#[test]
fn chunk_leaves_a_short_tail() {
    let out = ops::chunk(&ints(&[1, 2, 3, 4, 5]), 2).unwrap();
    assert_eq!(to_json(&out), json!([[1, 2], [3, 4], [5]]));
    assert_eq!(out.ty(), Type::seq(Type::seq(Type::Int)));
}

#[test]
fn compact_drops_falsy_values_of_any_type() {
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
    let out = ops::compact(&mixed).unwrap();
    assert_eq!(to_json(&out), json!([1, 2, 3]));
}

#[test]
fn order_by_age_ascending() {
    let data = people(&[("ana", 20), ("bo", 17), ("cy", 24)]);
    let out = ops::order_by(&data, &by_age(), SortOptions::ascending()).unwrap();
    assert_eq!(ages(&out), vec![17, 20, 24]);
    // Input is untouched.
    assert_eq!(ages(&data), vec![20, 17, 24]);
}

#[test]
fn five_parameter_callback_is_refused_before_any_call() {
    let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let seen = calls.clone();
    let five = Callback::new(
        collkit::Signature::new([Type::Int, Type::Int, Type::Int, Type::Int, Type::Int])
            .returns(Type::Bool),
        move |_| {
            seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Some(Value::Bool(true))
        },
    );
    let data = ints(&[1, 2, 3]);
    let err = ops::filter(&data, &five).unwrap_err();
    assert!(matches!(err, Error::CallbackSignatureMismatch { .. }));
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert_eq!(data, ints(&[1, 2, 3]));
}

#[test]
fn roster_report() {
    let roster = people(&[("ana", 31), ("bo", 17), ("cy", 31), ("di", 22), ("ed", 17)]);

    let counts = ops::count_by(&roster, &by_age()).unwrap();
    assert_eq!(to_json(&counts), json!([[31, 2], [17, 2], [22, 1]]));

    let total = ops::reduce(
        &roster,
        &Callback::from_fn(|acc: i64, p: Value| {
            acc + p.field("age").and_then(Value::as_int).unwrap_or(0)
        }),
        Value::Int(0),
    )
    .unwrap();
    assert_eq!(total, Value::Int(118));

    let adult = Callback::from_fn(|p: Value| p.field("age").and_then(Value::as_int) >= Some(18));
    assert!(!ops::every(&roster, &adult).unwrap());
    assert!(ops::some(&roster, &adult).unwrap());
    assert_eq!(ops::find_index(&roster, &adult).unwrap(), Some(0));
    assert_eq!(ops::find_last_index(&roster, &adult).unwrap(), Some(3));
}

#[test]
fn group_by_keeps_first_seen_key_order() {
    let roster = people(&[("ana", 31), ("bo", 17), ("cy", 31)]);
    let groups = ops::group_by(&roster, &by_age()).unwrap();
    let map = groups.as_map().unwrap();
    assert_eq!(map.keys().cloned().collect::<Vec<_>>(), vec![Value::Int(31), Value::Int(17)]);
    assert_eq!(ages(map.get(&Value::Int(31)).unwrap()), vec![31, 31]);
}

#[test]
fn set_operations_on_records_use_identity() {
    let a = person("ana", 20);
    let twin = person("ana", 20);
    let seq = Value::seq(Type::record("Person"), vec![a.clone(), twin, a]).unwrap();
    let out = ops::uniq(&seq).unwrap();
    assert_eq!(out.as_seq().map(|s| s.len()), Some(2));
}

#[test]
fn pipeline_over_numbers() {
    let square = Callback::from_fn(|n: i64| n * n);
    let out = Pipeline::new(ints(&[5, 2, 8, 3, 6, 2]))
        .filter(&is_even())
        .uniq()
        .map(&square)
        .sort(SortOptions::descending())
        .into_result()
        .unwrap();
    assert_eq!(out, ints(&[64, 36, 4]));
}
