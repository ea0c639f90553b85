//! Ordering engine policies.
//!
//! Two behaviours of the merge sort are unusual enough that they are pinned
//! here by name. Changing either should make one of these tests fail, so the
//! change is made on purpose:
//!
//! - `keys_are_recomputed_on_every_comparison`
//! - `incomparable_keys_return_input_unchanged`

use super::common::{by_tag_key, counting_identity, ints, people, strs, tag_pairs, tagged};
use collkit::ops::{order_by, sort};
use collkit::{Callback, Signature, SortOptions, Type, Value};
use std::sync::atomic::Ordering;

#[test]
fn keys_are_recomputed_on_every_comparison() {
    let (key, calls) = counting_identity();
    let out = order_by(&ints(&[4, 3, 2, 1]), &key, SortOptions::ascending()).unwrap();
    assert_eq!(out, ints(&[1, 2, 3, 4]));

    // [4,3] and [2,1] take one comparison each, the final merge two.
    // Four comparisons, two key calls apiece; no key array is built.
    assert_eq!(calls.load(Ordering::SeqCst), 8);
}

#[test]
fn key_calls_exceed_element_count() {
    let (key, calls) = counting_identity();
    let data: Vec<i64> = (0..64).rev().collect();
    order_by(&ints(&data), &key, SortOptions::ascending()).unwrap();
    assert!(calls.load(Ordering::SeqCst) > data.len());
}

#[test]
fn incomparable_keys_return_input_unchanged() {
    // bool vs int has no coercion rule.
    let mixed = Callback::new(Signature::new([Type::Int]).returns(Type::Any), |args| {
        match args.first().and_then(Value::as_int) {
            Some(0) => Some(Value::Bool(true)),
            Some(n) => Some(Value::Int(n)),
            None => None,
        }
    });
    let data = ints(&[3, 0, 2, 1]);
    let out = order_by(&data, &mixed, SortOptions::ascending()).unwrap();
    assert_eq!(out, data);
}

#[test]
fn incomparable_keys_are_not_an_error_even_in_parallel() {
    let data: Vec<f64> = (0..5000).map(|i| if i == 4321 { f64::NAN } else { i as f64 }).collect();
    let value = super::common::floats(&data);
    let out = sort(&value, SortOptions::descending().parallel()).unwrap();
    assert_eq!(out.to_string(), value.to_string());
}

#[test]
fn ascending_ties_keep_input_order() {
    let data = tagged(&[1, 0, 1, 0, 1]);
    let out = order_by(&data, &by_tag_key(), SortOptions::ascending()).unwrap();
    assert_eq!(
        tag_pairs(&out),
        vec![(0, 1), (0, 3), (1, 0), (1, 2), (1, 4)]
    );
}

#[test]
fn descending_is_reversed_ascending() {
    let data = tagged(&[2, 1, 2, 3, 1, 2]);
    let asc = order_by(&data, &by_tag_key(), SortOptions::ascending()).unwrap();
    let desc = order_by(&data, &by_tag_key(), SortOptions::descending()).unwrap();
    let mut reversed = tag_pairs(&asc);
    reversed.reverse();
    assert_eq!(tag_pairs(&desc), reversed);
}

#[test]
fn order_by_record_field() {
    let data = people(&[("x", 20), ("y", 17), ("z", 24)]);
    let out = order_by(&data, &super::common::by_age(), SortOptions::ascending()).unwrap();
    assert_eq!(super::common::ages(&out), vec![17, 20, 24]);
}

#[test]
fn strings_against_numbers_coerce() {
    // Numeric text against numbers parses; malformed text is zero.
    let key = Callback::new(Signature::new([Type::Str]).returns(Type::Any), |args| {
        let s = args.first().and_then(Value::as_str)?;
        Some(match s {
            "five" => Value::Int(5),
            other => Value::str(other),
        })
    });
    let out = order_by(&strs(&["10", "five"]), &key, SortOptions::ascending()).unwrap();
    assert_eq!(out, strs(&["five", "10"]));

    let out = order_by(&strs(&["five", "junk"]), &key, SortOptions::ascending()).unwrap();
    assert_eq!(out, strs(&["junk", "five"]));
}
