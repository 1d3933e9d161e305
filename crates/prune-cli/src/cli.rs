//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Block Pruner - Strip named blocks and declarations out of source files
#[derive(Parser, Debug)]
#[command(name = "prune")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the plan comes from and which blocks to add to it
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PlanArgs {
    /// Plan file (TOML, JSON or YAML). Defaults to prune.toml in the
    /// current directory when present.
    #[arg(short, long, env = "PRUNE_PLAN")]
    pub plan: Option<PathBuf>,

    /// Block to remove, in addition to those in the plan (repeatable)
    #[arg(short, long = "block", value_name = "NAME")]
    pub blocks: Vec<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Remove blocks and statements from a file
    ///
    /// Examples:
    ///   prune apply main.ts                      # Use ./prune.toml
    ///   prune apply main.ts -b syncFile -b onFileChange
    ///   prune apply main.ts --plan strip.yaml --dry-run
    Apply {
        /// File to prune
        file: PathBuf,

        #[command(flatten)]
        plan: PlanArgs,

        /// Write the result here instead of overwriting FILE
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show a diff of the changes without writing them
        #[arg(long)]
        dry_run: bool,

        /// Output the report as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Fail without writing if any block is unterminated or ambiguous
        #[arg(long)]
        strict: bool,
    },

    /// Show where each requested block starts and ends
    Spans {
        /// File to inspect
        file: PathBuf,

        #[command(flatten)]
        plan: PlanArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write a starter plan file
    Init {
        /// Plan file to create
        #[arg(default_value = "prune.toml")]
        path: PathBuf,

        /// Block to list in the plan (repeatable)
        #[arg(short, long = "block", value_name = "NAME")]
        blocks: Vec<String>,

        /// Overwrite an existing plan
        #[arg(long)]
        force: bool,
    },
}
