//! Apply command implementation
//!
//! Runs a prune plan over one file and writes the result back.

use std::path::{Path, PathBuf};

use colored::Colorize;
use prune_blocks::{BlockOutcome, BlockStatus};
use prune_core::{Pipeline, PruneReport};
use prune_fs::{read_lines, write_lines};
use serde_json::json;
use similar::TextDiff;

use super::{load_plan, resolve};
use crate::cli::PlanArgs;
use crate::error::{CliError, Result};

/// Flags controlling how `apply` reports and persists its result
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    pub json: bool,
    pub strict: bool,
}

/// Run the apply command
pub fn run_apply(cwd: &Path, file: &Path, plan_args: &PlanArgs, options: ApplyOptions) -> Result<()> {
    let file = resolve(cwd, file);
    let plan = load_plan(cwd, plan_args)?;
    let pipeline = Pipeline::from_plan(&plan)?;

    let input = read_lines(&file)?;
    let output = pipeline.run(input.as_slice());
    let report = &output.report;

    let target = options
        .output
        .as_deref()
        .map(|path| resolve(cwd, path))
        .unwrap_or_else(|| file.clone());
    let blocked = options.strict && report.has_problems();
    let write = !options.dry_run && !blocked && (report.changed || target != file);

    if write {
        write_lines(&target, &output.lines)?;
    }

    if options.json {
        let json_output = json!({
            "file": file.display().to_string(),
            "output": target.display().to_string(),
            "dry_run": options.dry_run,
            "written": write,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&json_output)?);
    } else {
        print_report(&file, report);
        if options.dry_run {
            print_diff(&render_diff(&input.to_text(), &output.lines.concat(), &file));
        }
        if write {
            println!();
            println!("{} {}", "Wrote".green().bold(), target.display());
        } else if options.dry_run && report.changed {
            println!();
            println!("Run without {} to apply these changes.", "--dry-run".cyan());
        }
    }

    if blocked {
        return Err(CliError::user(format!(
            "{} block(s) left in place; nothing written (--strict)",
            report.problems().count()
        )));
    }
    Ok(())
}

/// Print a human-readable summary of the report
fn print_report(file: &Path, report: &PruneReport) {
    println!("{} {}", "Prune".blue().bold(), file.display().to_string().yellow());
    println!();

    for outcome in &report.blocks {
        println!("  {}", format_outcome(outcome));
    }
    for rule in &report.lines {
        println!("  {} line rule {}: {} line(s)", "-".red(), rule.pattern.cyan(), rule.hits);
    }
    for rule in &report.substitutions {
        println!("  {} substitution {}: {} line(s)", "~".yellow(), rule.pattern.cyan(), rule.hits);
    }

    println!();
    if report.is_unchanged() {
        println!("{} No changes.", "OK".green().bold());
    } else {
        println!(
            "{} lines -> {} lines ({} removed)",
            report.lines_before,
            report.lines_after,
            report.lines_removed()
        );
    }

    let unused = report.unused_rules().count();
    if unused > 0 {
        println!("{} {} rule(s) matched nothing", "note:".yellow(), unused);
    }
}

fn format_outcome(outcome: &BlockOutcome) -> String {
    let text = outcome.to_string();
    match outcome.status {
        BlockStatus::Removed { .. } => format!("{} {}", "-".red(), text),
        BlockStatus::Unmatched => format!("{} {}", " ".normal(), text.dimmed()),
        BlockStatus::Unterminated { .. } | BlockStatus::Ambiguous { .. } => {
            format!("{} {}", "!".yellow().bold(), text.yellow())
        }
    }
}

/// Unified diff between the original and pruned text
pub(crate) fn render_diff(old: &str, new: &str, path: &Path) -> String {
    if old == new {
        return String::new();
    }
    let name = path.display().to_string();
    let diff = TextDiff::from_lines(old, new);
    let mut unified = diff.unified_diff();
    unified.context_radius(3).header(&name, &name);
    unified.to_string()
}

fn print_diff(diff: &str) {
    if diff.is_empty() {
        return;
    }
    println!();
    for line in diff.lines() {
        let colored_line = if line.starts_with("+++") || line.starts_with("---") {
            line.bold()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with("@@") {
            line.cyan()
        } else {
            line.normal()
        };
        println!("{}", colored_line);
    }
}
