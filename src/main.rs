use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use collkit::json::{from_json, to_json};
use collkit::{classify, Pipeline, Value};

mod cli;
use cli::display::{shape_summary, shape_table, step_line};
use cli::steps::Step;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Inspect { file, json } => inspect(file.as_deref(), json),
        Commands::Run {
            file,
            steps,
            parallel,
            verbose,
            pretty,
        } => run(file.as_deref(), &steps, parallel, verbose, pretty),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// Read and convert the input document (a file, or stdin).
fn load(file: Option<&str>) -> Result<Value> {
    let text = match file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    let json: serde_json::Value =
        serde_json::from_str(&text).context("input is not valid JSON")?;
    Ok(from_json(&json))
}

fn inspect(file: Option<&str>, as_json: bool) -> Result<()> {
    let value = load(file)?;
    let shape = classify(&value)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&shape)?);
    } else {
        shape_table(&shape);
    }
    Ok(())
}

fn run(
    file: Option<&str>,
    steps: &[Step],
    parallel: bool,
    verbose: bool,
    pretty: bool,
) -> Result<()> {
    let mut pipeline = Pipeline::new(load(file)?);

    for (i, step) in steps.iter().enumerate() {
        pipeline = step.apply(pipeline, parallel);
        if verbose {
            let line = match pipeline.error() {
                Some(err) if err.step == i + 1 => {
                    step_line(i + 1, &step.to_string(), &err.source.to_string(), true)
                }
                Some(_) => step_line(i + 1, &step.to_string(), "skipped", true),
                None => {
                    let outcome = classify(pipeline.result())
                        .map(|shape| shape_summary(&shape))
                        .unwrap_or_else(|e| e.to_string());
                    step_line(i + 1, &step.to_string(), &outcome, false)
                }
            };
            eprintln!("{}", line);
        }
    }

    let result = pipeline.into_result()?;
    let json = to_json(&result);
    let text = if pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text)?;
    Ok(())
}
