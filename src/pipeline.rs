// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Chained operations with a sticky first error.
//!
//! A `Pipeline` is a value, not a session object: every step consumes it and
//! returns the next one. The state machine has two states and one transition:
//!
//! ```text
//!   Clean(data) ──step fails──▶ Faulted { data, error }
//!      │  ▲                        │
//!      └──┘ step succeeds          └──▶ every later step is skipped
//! ```
//!
//! `Faulted` is absorbing. Its `data` is the output of the last step that
//! succeeded, and its error names the step that failed (1-based) and the
//! operation it ran. Every step records its name as the last operation before
//! deciding whether to run, so a faulted pipeline still reports where the
//! chain ended.
//!
//! ```
//! use collkit::{Callback, Pipeline, Value};
//!
//! let evens = Callback::from_fn(|n: i64| n % 2 == 0);
//! let out = Pipeline::new(Value::from(vec![1i64, 2, 3, 4, 5, 6]))
//!     .filter(&evens)
//!     .chunk(2)
//!     .into_result()
//!     .unwrap();
//! assert_eq!(out.to_string(), "[[2 4] [6]]");
//! ```

use crate::callback::Callback;
use crate::error::Error;
use crate::ops;
use crate::ordering::SortOptions;
use crate::value::Value;
use thiserror::Error as ThisError;

/// The first failure of a chain.
#[derive(Debug, Clone, PartialEq, ThisError)]
#[error("step {step} ({operation}) failed: {source}")]
pub struct PipelineError {
    /// Name of the operation that failed.
    pub operation: String,
    /// 1-based position of the failing step.
    pub step: usize,
    #[source]
    pub source: Error,
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    Clean,
    Faulted(PipelineError),
}

/// An immutable chain of operations over one value.
#[derive(Debug, Clone)]
pub struct Pipeline {
    data: Value,
    state: State,
    steps: usize,
    last_operation: Option<String>,
}

impl Pipeline {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            state: State::Clean,
            steps: 0,
            last_operation: None,
        }
    }

    /// Run a named step. Skipped (but still counted and named) once faulted.
    pub fn then<F>(mut self, operation: &str, f: F) -> Self
    where
        F: FnOnce(&Value) -> Result<Value, Error>,
    {
        self.steps += 1;
        self.last_operation = Some(operation.to_string());
        if let State::Faulted(_) = self.state {
            return self;
        }
        match f(&self.data) {
            Ok(next) => self.data = next,
            Err(source) => {
                self.state = State::Faulted(PipelineError {
                    operation: operation.to_string(),
                    step: self.steps,
                    source,
                })
            }
        }
        self
    }

    // ------------------------------------------------------------------
    // Terminals (never mutate)
    // ------------------------------------------------------------------

    /// Output of the last successful step (the input if none succeeded).
    pub fn result(&self) -> &Value {
        &self.data
    }

    pub fn result_and_error(&self) -> (&Value, Option<&PipelineError>) {
        (&self.data, self.error())
    }

    pub fn error(&self) -> Option<&PipelineError> {
        match &self.state {
            State::Clean => None,
            State::Faulted(err) => Some(err),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.state, State::Faulted(_))
    }

    /// Name of the most recent step, run or skipped.
    pub fn last_operation(&self) -> Option<&str> {
        self.last_operation.as_deref()
    }

    /// Number of steps chained so far, run or skipped.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn into_result(self) -> Result<Value, PipelineError> {
        match self.state {
            State::Clean => Ok(self.data),
            State::Faulted(err) => Err(err),
        }
    }

    // ------------------------------------------------------------------
    // Catalog steps
    // ------------------------------------------------------------------

    pub fn chunk(self, size: i64) -> Self {
        self.then("chunk", |v| ops::chunk(v, size))
    }

    pub fn compact(self) -> Self {
        self.then("compact", ops::compact)
    }

    pub fn concat(self, other: &Value) -> Self {
        self.then("concat", |v| ops::concat(v, other))
    }

    pub fn drop(self, n: i64) -> Self {
        self.then("drop", |v| ops::drop(v, n))
    }

    pub fn drop_right(self, n: i64) -> Self {
        self.then("drop_right", |v| ops::drop_right(v, n))
    }

    pub fn take(self, n: i64) -> Self {
        self.then("take", |v| ops::take(v, n))
    }

    pub fn take_right(self, n: i64) -> Self {
        self.then("take_right", |v| ops::take_right(v, n))
    }

    pub fn slice(self, start: i64, end: i64) -> Self {
        self.then("slice", |v| ops::slice(v, start, end))
    }

    pub fn initial(self) -> Self {
        self.then("initial", ops::initial)
    }

    pub fn tail(self) -> Self {
        self.then("tail", ops::tail)
    }

    pub fn reverse(self) -> Self {
        self.then("reverse", ops::reverse)
    }

    pub fn flatten(self) -> Self {
        self.then("flatten", ops::flatten)
    }

    pub fn filter(self, predicate: &Callback) -> Self {
        self.then("filter", |v| ops::filter(v, predicate))
    }

    pub fn reject(self, predicate: &Callback) -> Self {
        self.then("reject", |v| ops::reject(v, predicate))
    }

    pub fn map(self, transform: &Callback) -> Self {
        self.then("map", |v| ops::map(v, transform))
    }

    pub fn reduce(self, reducer: &Callback, seed: Value) -> Self {
        self.then("reduce", |v| ops::reduce(v, reducer, seed))
    }

    pub fn uniq(self) -> Self {
        self.then("uniq", ops::uniq)
    }

    pub fn union(self, other: &Value) -> Self {
        self.then("union", |v| ops::union(v, other))
    }

    pub fn intersect(self, other: &Value) -> Self {
        self.then("intersect", |v| ops::intersect(v, other))
    }

    pub fn difference(self, other: &Value) -> Self {
        self.then("difference", |v| ops::difference(v, other))
    }

    pub fn without(self, excluded: &[Value]) -> Self {
        self.then("without", |v| ops::without(v, excluded))
    }

    pub fn keys(self) -> Self {
        self.then("keys", ops::keys)
    }

    pub fn values(self) -> Self {
        self.then("values", ops::values)
    }

    pub fn group_by(self, key: &Callback) -> Self {
        self.then("group_by", |v| ops::group_by(v, key))
    }

    pub fn key_by(self, key: &Callback) -> Self {
        self.then("key_by", |v| ops::key_by(v, key))
    }

    pub fn count_by(self, key: &Callback) -> Self {
        self.then("count_by", |v| ops::count_by(v, key))
    }

    pub fn order_by(self, key: &Callback, options: SortOptions) -> Self {
        self.then("order_by", |v| ops::order_by(v, key, options))
    }

    pub fn sort(self, options: SortOptions) -> Self {
        self.then("sort", |v| ops::sort(v, options))
    }
}

impl From<Value> for Pipeline {
    fn from(data: Value) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{as_ints, ints};

    #[test]
    fn clean_chain_runs_every_step() {
        let p = Pipeline::new(ints(&[5, 1, 4, 2, 3]))
            .sort(SortOptions::ascending())
            .take(3)
            .reverse();
        assert!(!p.is_error());
        assert_eq!(p.steps(), 3);
        assert_eq!(p.last_operation(), Some("reverse"));
        assert_eq!(as_ints(p.result()), vec![3, 2, 1]);
    }

    #[test]
    fn first_error_sticks() {
        let double = Callback::from_fn(|n: i64| n * 2);
        let p = Pipeline::new(ints(&[1, 2, 3]))
            .map(&double)
            .chunk(0)
            .reverse()
            .take(1);

        assert!(p.is_error());
        let err = p.error().unwrap();
        assert_eq!(err.step, 2);
        assert_eq!(err.operation, "chunk");
        assert!(matches!(err.source, Error::ArgumentOutOfRange { .. }));
        assert_eq!(as_ints(p.result()), vec![2, 4, 6]);
        assert_eq!(p.last_operation(), Some("take"));
        assert_eq!(p.steps(), 4);
    }

    #[test]
    fn skipped_steps_never_run() {
        let mut ran = false;
        let p = Pipeline::new(ints(&[]))
            .then("fail", |_| Err(Error::CallbackFailed("nope".into())))
            .then("spy", |v| {
                ran = true;
                Ok(v.clone())
            });
        assert!(p.is_error());
        assert!(!ran);
    }

    #[test]
    fn terminals_agree() {
        let p = Pipeline::new(ints(&[1])).drop(-1);
        let (data, err) = p.result_and_error();
        assert_eq!(data, &ints(&[1]));
        assert_eq!(err, p.error());
        let message = p.clone().into_result().unwrap_err().to_string();
        assert!(message.starts_with("step 1 (drop) failed: argument `n` out of range"));
    }
}
