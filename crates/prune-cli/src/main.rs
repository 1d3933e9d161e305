//! Block Pruner CLI
//!
//! Removes named blocks and single-line declarations from source files.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Verbose mode enabled");
        }
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Block Pruner", "prune".green().bold());
            println!();
            println!("Run {} for available commands.", "prune --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Apply {
            file,
            plan,
            output,
            dry_run,
            json,
            strict,
        } => commands::run_apply(
            &cwd,
            &file,
            &plan,
            commands::ApplyOptions {
                output,
                dry_run,
                json,
                strict,
            },
        ),
        Commands::Spans { file, plan, json } => commands::run_spans(&cwd, &file, &plan, json),
        Commands::Init {
            path,
            blocks,
            force,
        } => commands::run_init(&cwd, &path, &blocks, force),
    }
}
