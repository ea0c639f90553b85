//! Unit tests for individual components.

mod common;

#[path = "unit/ordering.rs"]
mod ordering;

#[path = "unit/contract.rs"]
mod contract;

#[path = "unit/pipeline.rs"]
mod pipeline;
