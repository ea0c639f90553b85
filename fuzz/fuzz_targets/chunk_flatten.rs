// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for chunking.
//!
//! Non-positive sizes are refused with `ArgumentOutOfRange`. Positive sizes
//! produce runs that flatten back to the input, with every run but the last
//! full.

#![no_main]

use arbitrary::Arbitrary;
use collkit::{ops, Error, Type, Value};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct ChunkInput {
    items: Vec<i64>,
    size: i64,
}

fuzz_target!(|input: ChunkInput| {
    let items: Vec<Value> = input.items.iter().copied().map(Value::Int).collect();
    let data = Value::seq(Type::Int, items).expect("ints conform to []int");

    let chunks = match ops::chunk(&data, input.size) {
        Ok(chunks) => chunks,
        Err(err) => {
            assert!(input.size <= 0, "positive size {} refused: {}", input.size, err);
            assert!(matches!(err, Error::ArgumentOutOfRange { .. }));
            return;
        }
    };
    assert!(input.size > 0, "size {} accepted", input.size);

    let runs = chunks.as_seq().expect("chunk returns a sequence").items();
    let size = input.size as usize;
    for (i, run) in runs.iter().enumerate() {
        let len = run.as_seq().map(|s| s.len()).unwrap_or(0);
        assert!(len >= 1 && len <= size, "run {} has length {}", i, len);
        if i + 1 < runs.len() {
            assert_eq!(len, size, "run {} is short", i);
        }
    }

    let flat = ops::flatten(&chunks).expect("chunks flatten");
    assert_eq!(flat.as_seq().map(|s| s.items().to_vec()), data.as_seq().map(|s| s.items().to_vec()));
});
