// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy.
//!
//! Everything an operation can reject is classified before a single element is
//! visited: nil inputs, containers of the wrong shape, callbacks whose
//! signature does not fit the loop, operands with different element types, and
//! out-of-range arguments. The one late failure is `CallbackFailed`, raised
//! when user code panics or returns something other than what it declared.

use crate::value::Type;
use std::fmt;
use thiserror::Error;

/// Errors returned by every collkit operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The container argument is nil or otherwise unusable.
    #[error("nil or invalid input: {0}")]
    NilOrInvalidInput(String),

    /// Expected one container shape, got another.
    #[error("wrong shape: expected {expected}, got {got}")]
    WrongShape { expected: &'static str, got: Type },

    /// The callback's arity or types do not fit the operation's loop shape.
    #[error("callback signature mismatch at {position}: expected {expected}, got {got}")]
    CallbackSignatureMismatch {
        position: Position,
        expected: String,
        got: String,
    },

    /// Two operands (or an item and its container) disagree on type.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: Type, got: Type },

    /// A size, count, or range argument is outside what the operation accepts.
    #[error("argument `{name}` out of range: {reason}")]
    ArgumentOutOfRange { name: &'static str, reason: String },

    /// The callback failed while running (panicked, or returned a value that
    /// does not conform to its declared return type).
    #[error("callback failed: {0}")]
    CallbackFailed(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn out_of_range(name: &'static str, reason: impl Into<String>) -> Self {
        Error::ArgumentOutOfRange {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch(
        position: Position,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Error::CallbackSignatureMismatch {
            position,
            expected: expected.into(),
            got: got.into(),
        }
    }
}

/// Which part of a callback signature disagreed with the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Number of parameters.
    Arity,
    /// Zero-based parameter slot.
    Param(usize),
    /// Number of return values.
    ReturnArity,
    /// Type of the return value.
    Return,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Arity => write!(f, "arity"),
            Position::Param(i) => write!(f, "parameter {}", i + 1),
            Position::ReturnArity => write!(f, "return count"),
            Position::Return => write!(f, "return value"),
        }
    }
}
