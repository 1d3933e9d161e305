//! Init command implementation
//!
//! Writes a starter plan that `apply` and `spans` pick up from the working
//! directory.

use std::path::Path;

use colored::Colorize;
use prune_core::PrunePlan;

use super::resolve;
use crate::error::{CliError, Result};

/// Run the init command
///
/// The format follows the extension of `path`, so `prune init strip.yaml`
/// writes YAML.
pub fn run_init(cwd: &Path, path: &Path, blocks: &[String], force: bool) -> Result<()> {
    let target = resolve(cwd, path);

    if target.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let plan = PrunePlan::for_blocks(blocks.iter().cloned());
    plan.validate()?;
    plan.save(&target)?;

    println!(
        "{} Created {}",
        "OK".green().bold(),
        path.display().to_string().cyan()
    );
    if blocks.is_empty() {
        println!(
            "   Add block names to {} or pass {} to {}.",
            "blocks".yellow(),
            "--block NAME".cyan(),
            "prune apply".cyan()
        );
    } else {
        println!("   Blocks: {}", blocks.join(", ").yellow());
    }
    Ok(())
}
