// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the collkit command-line interface.
//!
//! Two subcommands: `inspect` to classify a JSON document, and `run` to push
//! one through a pipeline of named steps. Both read a file, or stdin when no
//! file is given.

pub mod display;
pub mod steps;

use clap::{Parser, Subcommand};
use steps::Step;

#[derive(Parser)]
#[command(
    name = "collkit",
    about = "Runtime-typed collection toolkit for JSON documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a JSON document (shape, element type, length)
    Inspect {
        /// Path to a JSON file (stdin if omitted)
        file: Option<String>,

        /// Print the shape as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run a pipeline of steps over a JSON document
    ///
    /// Steps run in the order given. The first failing step stops the chain;
    /// its error (with the step number) goes to stderr and the exit status is 1.
    Run {
        /// Path to a JSON file (stdin if omitted)
        file: Option<String>,

        /// Pipeline step, repeatable: chunk=N, compact, flatten, reverse, uniq,
        /// take=N, take-right=N, drop=N, drop-right=N, initial, tail, keys,
        /// values, sort[=asc|desc], order-by=FIELD[:asc|desc], group-by=FIELD
        #[arg(short, long = "step", required = true)]
        steps: Vec<Step>,

        /// Sort large inputs on all cores
        #[arg(long)]
        parallel: bool,

        /// Print each step and its resulting shape to stderr
        #[arg(short, long)]
        verbose: bool,

        /// Pretty-print the JSON result
        #[arg(long)]
        pretty: bool,
    },
}
