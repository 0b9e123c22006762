//! @dose
//! purpose: This module defines the command-line interface for tokmeter using the clap
//!     derive macros. It specifies all commands (analyze, count, limit, models) and their
//!     arguments.
//!
//! when-editing:
//!     - !Each command struct must derive Args and be added to the Commands enum
//!     - !Global flags (root, verbose) are defined on Cli and propagate to all subcommands
//!     - Model and role flags parse through FromStr, so unknown ids fail at parse time
//!
//! invariants:
//!     - The Cli struct is the root parser that clap uses to parse command-line arguments
//!     - --model and --role are Option so config defaults apply when they are absent
//!
//! gotchas:
//!     - analyze and count accept "-" as a path to read from stdin
//!     - --text conflicts with positional paths

use crate::types::{RoleType, SupportedModel};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tokmeter")]
#[command(author, version, about = "Token counts, costs and context usage for LLM prompts")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (defaults to current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze text: tokens, cost and context usage
    Analyze(AnalyzeArgs),

    /// Print the token count of raw text
    Count(CountArgs),

    /// Check a token count against a model's context window
    Limit(LimitArgs),

    /// List supported models
    Models,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Default)]
pub struct AnalyzeArgs {
    /// Files to analyze (use "-" for stdin)
    #[arg(value_name = "PATH", conflicts_with = "text")]
    pub paths: Vec<PathBuf>,

    /// Analyze this text instead of reading files
    #[arg(short, long)]
    pub text: Option<String>,

    /// Model to analyze for (overrides tokmeter.toml)
    #[arg(short, long, value_parser = parse_model)]
    pub model: Option<SupportedModel>,

    /// Message role (system, user, assistant)
    #[arg(long, value_parser = parse_role)]
    pub role: Option<RoleType>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// List every token in the text report
    #[arg(long)]
    pub show_tokens: bool,

    /// Fail if any input exceeds the model's context window
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Default)]
pub struct CountArgs {
    /// File to count (use "-" for stdin)
    #[arg(value_name = "PATH", conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Count this text instead of reading a file
    #[arg(short, long)]
    pub text: Option<String>,

    /// Model to count for (overrides tokmeter.toml)
    #[arg(short, long, value_parser = parse_model)]
    pub model: Option<SupportedModel>,
}

#[derive(Args)]
pub struct LimitArgs {
    /// Token count to check
    pub count: usize,

    /// Model whose context window to check against
    #[arg(short, long, value_parser = parse_model)]
    pub model: Option<SupportedModel>,
}

fn parse_model(s: &str) -> Result<SupportedModel, String> {
    s.parse().map_err(|e: crate::types::ParseModelError| e.to_string())
}

fn parse_role(s: &str) -> Result<RoleType, String> {
    s.parse().map_err(|e: crate::types::ParseRoleError| e.to_string())
}
