//! Generic collection manipulation over runtime-typed values.
//!
//! Hand any operation a value whose shape is only known at runtime (a
//! sequence, a keyed collection, or a scalar) plus, where it takes one, a
//! callback whose signature is only known at runtime. The operation checks the
//! pair, walks the container, and builds a correctly typed result, or returns
//! a structured [`Error`] without having touched a single element.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  value.rs   │────▶│  inspect.rs  │────▶│  callback/   │
//! │ (Value,Type,│     │  (classify,  │     │  contract.rs │
//! │  Sequence)  │     │   Container) │     │  (validate)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!                            │                    │
//!                            ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │   iterate.rs (walks)      ordering/ (merge sort)    │
//! │   equality.rs (truthy, same value)                  │
//! └─────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────┐
//! │  ops/ (the catalog)   ──▶   pipeline.rs (chaining)  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module       | Role                                                   |
//! |--------------|--------------------------------------------------------|
//! | `value`      | Runtime values and types                               |
//! | `inspect`    | Shape classification, nil rejection                    |
//! | `callback`   | Callbacks with runtime signatures, loop-shape checks   |
//! | `iterate`    | Forward/reverse walks, stoppable or not                |
//! | `ordering`   | Stable merge sort, cross-kind key comparison           |
//! | `equality`   | Truthiness and same-value equality                     |
//! | `ops`        | The operation catalog                                  |
//! | `pipeline`   | Chained operations with a sticky first error           |
//! | `json`       | JSON bridge                                            |
//! | `contracts`  | Debug-build post-condition checks                      |
//!
//! # Usage
//!
//! ```
//! use collkit::{ops, Callback, SortOptions, Value};
//!
//! let data = Value::from(vec![5i64, 3, 8, 1]);
//! let big = Callback::from_fn(|n: i64| n > 2);
//!
//! let kept = ops::filter(&data, &big).unwrap();
//! let sorted = ops::sort(&kept, SortOptions::descending()).unwrap();
//! assert_eq!(sorted.to_string(), "[8 5 3]");
//! ```

pub mod callback;
pub mod contracts;
pub mod equality;
pub mod error;
pub mod inspect;
pub mod iterate;
pub mod json;
pub mod ops;
pub mod ordering;
pub mod pipeline;
pub mod testing;
pub mod value;

pub use callback::{Callback, CallbackOutput, IntoCallback, Signature};
pub use equality::{is_truthy, same_value};
pub use error::{Error, Position, Result};
pub use inspect::{classify, Shape, ShapeKind};
pub use iterate::{Cursor, Direction};
pub use ordering::{merge_sort, Orderable, SortOptions, SortOrder};
pub use pipeline::{Pipeline, PipelineError};
pub use value::{Collection, Record, Sequence, Type, Typed, Value};
