// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Callbacks with runtime signatures.
//!
//! A `Callback` is a body plus a `Signature` describing its parameter types and
//! optional return type. Operations never trust the body; they check the
//! signature against the container first (see [`contract`]) and only then start
//! calling it.
//!
//! Most callers never write a `Signature` by hand. Any closure of one to four
//! `Typed` parameters converts through [`Callback::from_fn`]:
//!
//! ```
//! use collkit::{Callback, Type};
//!
//! let even = Callback::from_fn(|n: i64| n % 2 == 0);
//! assert_eq!(even.signature().params(), &[Type::Int]);
//! assert_eq!(even.signature().ret(), Some(&Type::Bool));
//! ```
//!
//! Raw callbacks (`Callback::new`) exist for signatures no closure can spell,
//! such as record parameters or deliberately malformed shapes in tests.

pub mod contract;

use crate::error::{Error, Result};
use crate::value::{Type, Typed, Value};
use std::fmt;
use std::sync::Arc;

/// Parameter types and return type of a callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    params: Vec<Type>,
    ret: Option<Type>,
}

impl Signature {
    /// A signature with the given parameters and no return value.
    pub fn new(params: impl IntoIterator<Item = Type>) -> Self {
        Self {
            params: params.into_iter().collect(),
            ret: None,
        }
    }

    /// Set the return type.
    pub fn returns(mut self, ret: Type) -> Self {
        self.ret = Some(ret);
        self
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn params(&self) -> &[Type] {
        &self.params
    }

    pub fn ret(&self) -> Option<&Type> {
        self.ret.as_ref()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")?;
        if let Some(ret) = &self.ret {
            write!(f, " -> {}", ret)?;
        }
        Ok(())
    }
}

type Body = dyn Fn(&[Value]) -> Result<Option<Value>> + Send + Sync;

/// A user function with a runtime signature.
///
/// Cloning is cheap (the body is shared). Bodies must be `Send + Sync` so the
/// parallel sort can hand them to worker threads.
#[derive(Clone)]
pub struct Callback {
    signature: Signature,
    body: Arc<Body>,
}

impl Callback {
    /// Raw callback: the body receives the argument list and returns the
    /// (optional) result.
    pub fn new<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(&[Value]) -> Option<Value> + Send + Sync + 'static,
    {
        Self::try_new(signature, move |args| Ok(body(args)))
    }

    /// Raw callback whose body may fail.
    pub fn try_new<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        Self {
            signature,
            body: Arc::new(body),
        }
    }

    /// Convert a typed closure, deriving its signature from the parameter and
    /// return types.
    pub fn from_fn<Args, F>(f: F) -> Self
    where
        F: IntoCallback<Args>,
    {
        f.into_callback()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Run the body and check the result against the declared return type.
    ///
    /// Argument validity is the caller's responsibility; operations only invoke
    /// callbacks that passed contract validation.
    pub(crate) fn invoke(&self, args: &[Value]) -> Result<Option<Value>> {
        let out = (self.body)(args)?;
        match (&self.signature.ret, out) {
            (None, None) => Ok(None),
            (None, Some(extra)) => Err(Error::CallbackFailed(format!(
                "{} returned {} but declares no return value",
                self.signature, extra
            ))),
            (Some(ret), None) => Err(Error::CallbackFailed(format!(
                "{} returned nothing, expected {}",
                self.signature, ret
            ))),
            (Some(ret), Some(value)) if value.conforms(ret) => Ok(Some(value)),
            (Some(ret), Some(value)) => Err(Error::CallbackFailed(format!(
                "{} returned {}, expected {}",
                self.signature,
                value.ty(),
                ret
            ))),
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("signature", &self.signature.to_string())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TYPED CLOSURES
// ============================================================================

/// Return types a typed closure may have: `()` (no return value) or any
/// `Typed` value.
pub trait CallbackOutput {
    fn ret() -> Option<Type>;
    fn into_output(self) -> Option<Value>;
}

impl CallbackOutput for () {
    fn ret() -> Option<Type> {
        None
    }

    fn into_output(self) -> Option<Value> {
        None
    }
}

macro_rules! typed_output {
    ($($t:ty),+) => {
        $(
            impl CallbackOutput for $t {
                fn ret() -> Option<Type> {
                    Some(<$t as Typed>::ty())
                }

                fn into_output(self) -> Option<Value> {
                    Some(self.into_value())
                }
            }
        )+
    };
}

typed_output!(bool, i64, u64, f64, String, Value);

impl<T: Typed> CallbackOutput for Vec<T> {
    fn ret() -> Option<Type> {
        Some(<Vec<T> as Typed>::ty())
    }

    fn into_output(self) -> Option<Value> {
        Some(self.into_value())
    }
}

/// Closures convertible into a `Callback`. `Args` is the tuple of parameter
/// types and only serves to keep the arity impls apart.
pub trait IntoCallback<Args> {
    fn into_callback(self) -> Callback;
}

macro_rules! into_callback {
    ($($arg:ident $var:ident),+) => {
        impl<F, R, $($arg),+> IntoCallback<($($arg,)+)> for F
        where
            F: Fn($($arg),+) -> R + Send + Sync + 'static,
            R: CallbackOutput,
            $($arg: Typed,)+
        {
            fn into_callback(self) -> Callback {
                let signature = Signature {
                    params: vec![$($arg::ty()),+],
                    ret: R::ret(),
                };
                Callback::try_new(signature, move |args: &[Value]| {
                    let mut args = args.iter().enumerate();
                    $(
                        let $var = match args.next() {
                            Some((_, value)) => $arg::from_value(value).ok_or_else(|| {
                                Error::CallbackFailed(format!(
                                    "argument {} is {}, expected {}",
                                    stringify!($var),
                                    value.ty(),
                                    $arg::ty()
                                ))
                            })?,
                            None => {
                                return Err(Error::CallbackFailed(format!(
                                    "missing argument {}",
                                    stringify!($var)
                                )))
                            }
                        };
                    )+
                    Ok(self($($var),+).into_output())
                })
            }
        }
    };
}

into_callback!(A a);
into_callback!(A a, B b);
into_callback!(A a, B b, C c);
into_callback!(A a, B b, C c, D d);
