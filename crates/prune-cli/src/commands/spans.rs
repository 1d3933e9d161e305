//! Spans command implementation

use std::path::Path;

use colored::Colorize;
use prune_blocks::{BlockOutcome, BlockSpan, BlockStatus, lines::content};
use prune_core::Pipeline;
use prune_fs::read_lines;
use serde::Serialize;

use super::{load_plan, resolve};
use crate::cli::PlanArgs;
use crate::error::Result;

#[derive(Serialize)]
struct SpansOutput<'a> {
    file: String,
    blocks: &'a [BlockOutcome],
}

/// Run the spans command
pub fn run_spans(cwd: &Path, file: &Path, plan_args: &PlanArgs, json: bool) -> Result<()> {
    let file = resolve(cwd, file);
    let plan = load_plan(cwd, plan_args)?;
    let pipeline = Pipeline::from_plan(&plan)?;

    let input = read_lines(&file)?;
    let outcomes = pipeline.inspect(input.as_slice());

    if json {
        let output = SpansOutput {
            file: file.display().to_string(),
            blocks: &outcomes,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} {}", "Spans".bold(), file.display().to_string().yellow());
    println!();

    if outcomes.is_empty() {
        println!("  {} (plan lists no blocks)", "None".dimmed());
        return Ok(());
    }

    for outcome in &outcomes {
        let id = outcome.identifier.cyan();
        match &outcome.status {
            BlockStatus::Removed { spans } => {
                println!("  {} {}", "+".green(), id);
                print_spans(input.as_slice(), spans);
            }
            BlockStatus::Unmatched => {
                println!("  {} {} {}", " ".normal(), id, "not found".dimmed());
            }
            BlockStatus::Unterminated { start } => {
                println!(
                    "  {} {} {}",
                    "!".yellow().bold(),
                    id,
                    format!("opens at line {} and is never closed", start + 1).yellow()
                );
            }
            BlockStatus::Ambiguous { spans } => {
                println!(
                    "  {} {} {}",
                    "!".yellow().bold(),
                    id,
                    format!("ambiguous, {} matches", spans.len()).yellow()
                );
                print_spans(input.as_slice(), spans);
            }
        }
    }

    Ok(())
}

fn print_spans(lines: &[String], spans: &[BlockSpan]) {
    for span in spans {
        let opening = lines
            .get(span.start)
            .map(|line| content(line).trim())
            .unwrap_or_default();
        println!("      {:<14} {}", span.to_string(), opening.dimmed());
    }
}
