//! @dose
//! purpose: This is the CLI entry point for tokmeter. It parses command-line arguments using
//!     clap, installs the tracing subscriber, determines the project root directory, and
//!     dispatches to the appropriate command handler.
//!
//! when-editing:
//!     - !All command handlers are imported from the tokmeter crate
//!     - !The root directory defaults to current working directory if not specified
//!     - Error messages are printed to stderr and exit with code 1
//!
//! invariants:
//!     - One and only one subcommand is always executed per invocation
//!     - The process exits with 0 on success, 1 on any error
//!     - Logs go to stderr; stdout is reserved for command output
//!
//! gotchas:
//!     - RUST_LOG overrides the default filter; without it the level is warn, or debug
//!       with --verbose

use anyhow::Context;
use clap::Parser;
use std::env;
use tokmeter::cli::{Cli, Commands};
use tokmeter::commands::{run_analyze, run_count, run_limit, run_models};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Determine root directory
    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Analyze(args) => run_analyze(&args, &root),
        Commands::Count(args) => run_count(&args, &root),
        Commands::Limit(args) => run_limit(&args, &root),
        Commands::Models => run_models(),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
