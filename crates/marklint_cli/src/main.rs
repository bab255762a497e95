//! marklint CLI
//!
//! Lints and fixes Markdown documents.

mod cli;
mod commands;
mod fix;
mod output;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{run_fix, run_init, run_lint, run_lsp, run_rules};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

/// Runs the selected command. `Ok(true)` means issues were found.
fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Lint {
            patterns,
            format,
            fix,
            dry_run,
        } => run_lint(cli, patterns, *format, *fix, *dry_run),
        Commands::Fix { patterns, check } => run_fix(cli, patterns, *check),
        Commands::Rules => run_rules().map(|_| false),
        Commands::Init { force } => run_init(*force).map(|_| false),
        Commands::Lsp => run_lsp().map(|_| false),
    }
}
