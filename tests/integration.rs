//! Integration tests for collkit.
//!
//! These tests drive the catalog, the JSON bridge, and the `collkit` binary
//! end to end with realistic inputs.

mod common;

#[path = "integration/catalog.rs"]
mod catalog;

#[path = "integration/json.rs"]
mod json;

#[path = "integration/cli.rs"]
mod cli;
