//! JSON documents through the catalog.

use collkit::json::{from_json, to_json};
use collkit::{ops, Callback, Error, Signature, SortOptions, Type, Value};
use serde_json::json;

fn field(name: &'static str) -> Callback {
    Callback::new(Signature::new([Type::Any]).returns(Type::Any), move |args| {
        args.first().and_then(|v| v.field(name)).cloned()
    })
}

#[test]
fn objects_sort_by_a_field() {
    let doc = from_json(&json!([
        {"name": "ana", "age": 20},
        {"name": "bo", "age": 17},
        {"name": "cy", "age": 24}
    ]));
    let out = ops::order_by(&doc, &field("age"), SortOptions::descending()).unwrap();
    assert_eq!(
        to_json(&out),
        json!([
            {"name": "cy", "age": 24},
            {"name": "ana", "age": 20},
            {"name": "bo", "age": 17}
        ])
    );
}

#[test]
fn numeric_strings_sort_against_numbers() {
    let doc = from_json(&json!([{"v": "10"}, {"v": 9}, {"v": 2.5}]));
    let out = ops::order_by(&doc, &field("v"), SortOptions::ascending()).unwrap();
    assert_eq!(to_json(&out), json!([{"v": 2.5}, {"v": 9}, {"v": "10"}]));
}

#[test]
fn object_keys_and_values() {
    let doc = from_json(&json!({"b": 2, "a": 1}));
    let keys = ops::keys(&doc).unwrap();
    assert_eq!(keys.ty(), Type::seq(Type::Str));
    let mut names: Vec<String> = keys
        .as_seq()
        .unwrap()
        .items()
        .iter()
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect();
    names.sort();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(ops::values(&doc).unwrap().ty(), Type::seq(Type::Int));
}

#[test]
fn mixed_arrays_refuse_typed_callbacks() {
    let doc = from_json(&json!([1, "two", 3]));
    let doubled = Callback::from_fn(|n: i64| n * 2);
    assert!(ops::map(&doc, &doubled).is_err());

    let truthy = Callback::from_fn(|v: Value| !v.is_nil());
    assert_eq!(ops::filter(&doc, &truthy).map(|v| to_json(&v)), Ok(json!([1, "two", 3])));
}

#[test]
fn nested_arrays_flatten() {
    let doc = from_json(&json!([[1, 2], [3, 4], [5]]));
    assert_eq!(to_json(&ops::flatten(&doc).unwrap()), json!([1, 2, 3, 4, 5]));
}

#[test]
fn nested_arrays_with_an_empty_run_flatten() {
    let doc = from_json(&json!([[1, 2], []]));
    let flat = ops::flatten(&doc).unwrap();
    assert_eq!(flat.ty(), Type::seq(Type::Int));
    assert_eq!(to_json(&flat), json!([1, 2]));
}

#[test]
fn nested_arrays_of_mixed_types_flatten() {
    let doc = from_json(&json!([[1], ["a"], null]));
    let flat = ops::flatten(&doc).unwrap();
    assert_eq!(flat.ty(), Type::seq(Type::Any));
    assert_eq!(to_json(&flat), json!([1, "a"]));

    let err = ops::flatten(&from_json(&json!([[1], 2]))).unwrap_err();
    assert!(matches!(err, Error::WrongShape { .. }));
}
