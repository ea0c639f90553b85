// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pipeline steps named on the command line.
//!
//! A step is `name` or `name=argument`. Field-based steps (`order-by`,
//! `group-by`) read a named field from each element, which works for JSON
//! objects since they arrive as string-keyed maps.

use std::fmt;
use std::str::FromStr;

use collkit::json::to_json;
use collkit::{Callback, Pipeline, Signature, SortOptions, SortOrder, Type, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("invalid step `{step}`: {reason}")]
pub struct StepError {
    step: String,
    reason: String,
}

impl StepError {
    fn new(step: &str, reason: impl Into<String>) -> Self {
        Self {
            step: step.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Chunk(i64),
    Compact,
    Flatten,
    Reverse,
    Uniq,
    Take(i64),
    TakeRight(i64),
    Drop(i64),
    DropRight(i64),
    Initial,
    Tail,
    Keys,
    Values,
    Sort(SortOrder),
    OrderBy { field: String, order: SortOrder },
    GroupBy(String),
}

fn parse_order(step: &str, text: &str) -> Result<SortOrder, StepError> {
    match text {
        "asc" => Ok(SortOrder::Ascending),
        "desc" => Ok(SortOrder::Descending),
        other => Err(StepError::new(
            step,
            format!("order must be asc or desc, got `{}`", other),
        )),
    }
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once('=') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };

        let count = || -> Result<i64, StepError> {
            let arg = arg.ok_or_else(|| StepError::new(s, "expected a count, e.g. take=3"))?;
            arg.parse()
                .map_err(|_| StepError::new(s, format!("`{}` is not an integer", arg)))
        };
        let field = || -> Result<&str, StepError> {
            match arg {
                Some(field) if !field.is_empty() => Ok(field),
                _ => Err(StepError::new(s, "expected a field name")),
            }
        };

        let step = match name {
            "chunk" => Step::Chunk(count()?),
            "compact" => Step::Compact,
            "flatten" => Step::Flatten,
            "reverse" => Step::Reverse,
            "uniq" => Step::Uniq,
            "take" => Step::Take(count()?),
            "take-right" => Step::TakeRight(count()?),
            "drop" => Step::Drop(count()?),
            "drop-right" => Step::DropRight(count()?),
            "initial" => Step::Initial,
            "tail" => Step::Tail,
            "keys" => Step::Keys,
            "values" => Step::Values,
            "sort" => Step::Sort(match arg {
                Some(order) => parse_order(s, order)?,
                None => SortOrder::Ascending,
            }),
            "order-by" => {
                let spec = field()?;
                let (field, order) = match spec.split_once(':') {
                    Some((field, order)) => (field, parse_order(s, order)?),
                    None => (spec, SortOrder::Ascending),
                };
                Step::OrderBy {
                    field: field.to_string(),
                    order,
                }
            }
            "group-by" => Step::GroupBy(field()?.to_string()),
            other => return Err(StepError::new(s, format!("unknown step `{}`", other))),
        };
        Ok(step)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = |o: &SortOrder| match o {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        };
        match self {
            Step::Chunk(n) => write!(f, "chunk={}", n),
            Step::Compact => write!(f, "compact"),
            Step::Flatten => write!(f, "flatten"),
            Step::Reverse => write!(f, "reverse"),
            Step::Uniq => write!(f, "uniq"),
            Step::Take(n) => write!(f, "take={}", n),
            Step::TakeRight(n) => write!(f, "take-right={}", n),
            Step::Drop(n) => write!(f, "drop={}", n),
            Step::DropRight(n) => write!(f, "drop-right={}", n),
            Step::Initial => write!(f, "initial"),
            Step::Tail => write!(f, "tail"),
            Step::Keys => write!(f, "keys"),
            Step::Values => write!(f, "values"),
            Step::Sort(o) => write!(f, "sort={}", order(o)),
            Step::OrderBy { field, order: o } => write!(f, "order-by={}:{}", field, order(o)),
            Step::GroupBy(field) => write!(f, "group-by={}", field),
        }
    }
}

/// Key callback reading `field` from each element. Missing fields are nil.
/// Beside string keys a nil sorts as its text `<nil>`; beside numbers it has
/// no order, and the sort returns its input unchanged.
fn field_key(field: &str) -> Callback {
    let field = field.to_string();
    Callback::new(Signature::new([Type::Any]).returns(Type::Any), move |args| {
        let value = args.first()?;
        Some(value.field(&field).cloned().unwrap_or(Value::Nil(Type::Any)))
    })
}

/// Group label for `field`: strings as-is, anything else as its JSON text.
fn field_label(field: &str) -> Callback {
    let field = field.to_string();
    Callback::new(Signature::new([Type::Any]).returns(Type::Str), move |args| {
        let label = match args.first().and_then(|v| v.field(&field)) {
            Some(Value::Str(s)) => s.clone(),
            Some(other) => to_json(other).to_string(),
            None => "null".to_string(),
        };
        Some(Value::Str(label))
    })
}

impl Step {
    /// Chain this step onto `pipeline`.
    pub fn apply(&self, pipeline: Pipeline, parallel: bool) -> Pipeline {
        let options = |order: SortOrder| SortOptions {
            order,
            parallel,
        };
        match self {
            Step::Chunk(n) => pipeline.chunk(*n),
            Step::Compact => pipeline.compact(),
            Step::Flatten => pipeline.flatten(),
            Step::Reverse => pipeline.reverse(),
            Step::Uniq => pipeline.uniq(),
            Step::Take(n) => pipeline.take(*n),
            Step::TakeRight(n) => pipeline.take_right(*n),
            Step::Drop(n) => pipeline.drop(*n),
            Step::DropRight(n) => pipeline.drop_right(*n),
            Step::Initial => pipeline.initial(),
            Step::Tail => pipeline.tail(),
            Step::Keys => pipeline.keys(),
            Step::Values => pipeline.values(),
            Step::Sort(order) => pipeline.sort(options(*order)),
            Step::OrderBy { field, order } => pipeline.order_by(&field_key(field), options(*order)),
            Step::GroupBy(field) => pipeline.group_by(&field_label(field)),
        }
    }
}
