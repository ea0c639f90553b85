//! Shared test utilities and fixtures.

#![allow(dead_code)]

use collkit::{Callback, Signature, Type, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// Re-export canonical test utilities from collkit::testing
pub use collkit::testing::{ages, as_ints, by_age, floats, int_map, ints, people, person, strs};

// ============================================================================
// CALLBACKS
// ============================================================================

pub fn is_even() -> Callback {
    Callback::from_fn(|n: i64| n % 2 == 0)
}

/// A callback that counts how often it runs, plus the counter.
pub fn counting_identity() -> (Callback, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let cb = Callback::from_fn(move |n: i64| {
        counter.fetch_add(1, Ordering::SeqCst);
        n
    });
    (cb, calls)
}

/// A raw callback with `arity` int parameters returning bool.
pub fn int_predicate_of_arity(arity: usize) -> Callback {
    Callback::new(
        Signature::new(std::iter::repeat(Type::Int).take(arity)).returns(Type::Bool),
        |_| Some(Value::Bool(true)),
    )
}

// ============================================================================
// FIXTURES
// ============================================================================

/// `[(key, index)]` pairs for stability checks: many duplicate keys.
pub fn tagged(keys: &[i64]) -> Value {
    Value::from(
        collkit::Sequence::new(
            Type::record("Tagged"),
            keys.iter()
                .enumerate()
                .map(|(i, k)| {
                    Value::from(
                        collkit::Record::new("Tagged")
                            .with("key", *k)
                            .with("pos", i as i64),
                    )
                })
                .collect(),
        )
        .expect("records conform"),
    )
}

/// Sort key for `tagged` records.
pub fn by_tag_key() -> Callback {
    Callback::new(
        Signature::new([Type::record("Tagged")]).returns(Type::Int),
        |args| args.first().and_then(|v| v.field("key")).cloned(),
    )
}

/// `(key, pos)` pairs read back out of a `tagged` sequence.
pub fn tag_pairs(value: &Value) -> Vec<(i64, i64)> {
    value
        .as_seq()
        .map(|seq| {
            seq.items()
                .iter()
                .map(|v| {
                    let key = v.field("key").and_then(Value::as_int).unwrap_or(-1);
                    let pos = v.field("pos").and_then(Value::as_int).unwrap_or(-1);
                    (key, pos)
                })
                .collect()
        })
        .unwrap_or_default()
}
