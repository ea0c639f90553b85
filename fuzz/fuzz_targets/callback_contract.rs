// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for callback signature validation.
//!
//! Builds raw callbacks with arbitrary parameter lists and return types and
//! runs them through `filter` on an `[]int`. A callback is accepted exactly
//! when it has the shape `(int|any[, int]) -> bool`; a rejected callback must
//! never have run, and the input must be untouched either way.

#![no_main]

use arbitrary::Arbitrary;
use collkit::{ops, Callback, Error, Signature, Type, Value};
use libfuzzer_sys::fuzz_target;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Slot {
    Any,
    Bool,
    Int,
    Uint,
    Float,
    Str,
}

impl Slot {
    fn ty(self) -> Type {
        match self {
            Slot::Any => Type::Any,
            Slot::Bool => Type::Bool,
            Slot::Int => Type::Int,
            Slot::Uint => Type::Uint,
            Slot::Float => Type::Float,
            Slot::Str => Type::Str,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct ContractInput {
    params: Vec<Slot>,
    ret: Option<Slot>,
    items: Vec<i64>,
}

fuzz_target!(|input: ContractInput| {
    if input.params.len() > 6 {
        return;
    }
    let params: Vec<Type> = input.params.iter().map(|s| s.ty()).collect();
    let mut signature = Signature::new(params.clone());
    if let Some(ret) = input.ret {
        signature = signature.returns(ret.ty());
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let callback = Callback::new(signature, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Some(Value::Bool(true))
    });

    let items: Vec<Value> = input.items.iter().copied().map(Value::Int).collect();
    let data = Value::seq(Type::Int, items).expect("ints conform to []int");
    let before = data.clone();

    let accepted = matches!(params.len(), 1 | 2)
        && params[0].accepts(&Type::Int)
        && (params.len() == 1 || params[1] == Type::Int)
        && input.ret.map(Slot::ty) == Some(Type::Bool);

    match ops::filter(&data, &callback) {
        Ok(kept) => {
            assert!(accepted, "accepted a callback of the wrong shape: {:?}", input);
            assert_eq!(kept, before);
            assert_eq!(calls.load(Ordering::SeqCst), input.items.len());
        }
        Err(err) => {
            assert!(!accepted, "rejected a well-formed callback: {}", err);
            assert!(matches!(err, Error::CallbackSignatureMismatch { .. }));
            assert_eq!(calls.load(Ordering::SeqCst), 0, "rejected callback ran");
        }
    }
    assert_eq!(data, before, "filter mutated its input");
});
