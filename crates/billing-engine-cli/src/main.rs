mod cli;
mod logging;

use std::io::{self, BufRead};
use std::process::ExitCode;

use anyhow::{Context, Result};
use billing_engine::report::{render_report, render_table};
use billing_engine::{calculate, table_for, BillingError, CalculationResult, NoteCategory};
use clap::Parser;

use crate::cli::{Cli, OutputFormat};

/// Upper bound on suggestion rounds: one alignment fix, then one tier extension.
const MAX_SUGGESTION_ROUNDS: usize = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);
    tracing::debug!(?cli, "parsed arguments");

    if cli.table {
        print_table(cli.category, cli.format)?;
        return Ok(ExitCode::SUCCESS);
    }

    if cli.stdin {
        return run_batch(&cli);
    }

    let range = cli.range.as_deref().unwrap_or_default();
    let outcome = evaluate(range, cli.category, cli.apply_suggestions);
    match cli.format {
        OutputFormat::Text => match &outcome {
            Ok(result) => print!("{}", render_report(result)),
            Err(err) => eprintln!("error: {err}"),
        },
        OutputFormat::Json => println!("{}", to_json(&outcome, true)?),
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Process one range per non-empty stdin line. Fails if any line failed.
fn run_batch(cli: &Cli) -> Result<ExitCode> {
    let mut failures = 0usize;
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read range from stdin")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let outcome = evaluate(input, cli.category, cli.apply_suggestions);
        if outcome.is_err() {
            failures += 1;
        }
        match cli.format {
            OutputFormat::Text => match &outcome {
                Ok(result) => println!("{}", result.summary()),
                Err(err) => println!("error: {err}"),
            },
            OutputFormat::Json => println!("{}", to_json(&outcome, false)?),
        }
    }

    tracing::debug!(failures, "batch complete");
    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Calculate `input`, optionally following the preferred warning's suggested
/// range. A suggestion that fails to calculate keeps the last good result.
fn evaluate(
    input: &str,
    category: NoteCategory,
    apply_suggestions: bool,
) -> Result<CalculationResult, BillingError> {
    let mut result = calculate(input, category).inspect_err(|err| {
        tracing::warn!(input, kind = err.kind(), "calculation failed: {err}");
    })?;
    tracing::debug!(range = %result.time_range(), calls = result.calls, "calculated");

    if !apply_suggestions {
        return Ok(result);
    }

    for _ in 0..MAX_SUGGESTION_ROUNDS {
        let Some(warning) = result.preferred_warning() else {
            break;
        };
        let amended = result.suggested_range(warning);
        match calculate(&amended, category) {
            Ok(next) => {
                tracing::debug!(range = %amended, calls = next.calls, "applied suggestion");
                result = next;
            }
            Err(err) => {
                tracing::warn!(range = %amended, "suggested range rejected: {err}");
                break;
            }
        }
    }
    Ok(result)
}

fn print_table(category: NoteCategory, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_table(category, None)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&table_for(category))
                .context("failed to serialize billing table")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn to_json(outcome: &Result<CalculationResult, BillingError>, pretty: bool) -> Result<String> {
    let value = match outcome {
        Ok(result) => serde_json::to_value(result).context("failed to serialize result")?,
        Err(err) => serde_json::json!({
            "error": { "kind": err.kind(), "message": err.to_string() }
        }),
    };
    let text = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    text.context("failed to serialize output")
}
