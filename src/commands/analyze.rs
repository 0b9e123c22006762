//! @dose
//! purpose: This module implements the analyze command: full token analysis of each input
//!     under the model and role resolved from CLI flags, tokmeter.toml overrides and
//!     defaults, rendered as a text report, JSON or CSV.
//!
//! when-editing:
//!     - !Option precedence is CLI flag > first matching override > config default
//!     - !Usage warnings go to stderr so JSON/CSV on stdout stay machine-readable
//!     - Results are recorded into an AnalysisHistory bounded by [history] limit
//!
//! invariants:
//!     - Every input is analyzed and rendered before --strict can fail the command
//!     - JSON output is an object for one input and an array for several
//!
//! flows:
//!     - Read: collect inputs from --text, paths or stdin
//!     - Resolve: options per input from the override matcher, then CLI flags
//!     - Analyze: TokenAnalyzer::analyze, validate, warn at the usage threshold
//!     - Render: report/JSON/CSV to stdout, history summary for several text reports

use super::input::{collect_inputs, Input};
use crate::analysis::TokenAnalyzer;
use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::config::{Config, OverrideMatcher};
use crate::formatter::{render_history, render_report, to_csv, to_json, to_json_list};
use crate::history::AnalysisHistory;
use crate::types::AnalysisOptions;
use anyhow::{bail, Context, Result};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

pub fn run_analyze(args: &AnalyzeArgs, root: &Path) -> Result<()> {
    let config = Config::load(root);
    let inputs = collect_inputs(args.text.as_deref(), &args.paths, root)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    analyze_inputs(args, &config, &inputs, &mut out)
}

fn analyze_inputs(
    args: &AnalyzeArgs,
    config: &Config,
    inputs: &[Input],
    out: &mut dyn Write,
) -> Result<()> {
    let matcher = config.override_matcher();
    let analyzer = TokenAnalyzer::new();
    let mut history = AnalysisHistory::with_capacity(config.history.limit);
    let mut results = Vec::with_capacity(inputs.len());
    let mut over_limit = Vec::new();

    for input in inputs {
        let options = resolve_options(args, &matcher, input);
        debug!(input = %input.label, model = %options.model, role = %options.role.kind, "analyzing");

        let result = analyzer.analyze(&input.text, &options);
        let usage = analyzer.validate(&result);

        if !usage.is_valid {
            eprintln!(
                "ERROR [{}]: {} tokens exceed the {} context window of {} tokens",
                input.label,
                result.total_tokens,
                options.model,
                usage.max_tokens
            );
            over_limit.push(input.label.clone());
        } else if usage.reaches(config.limits.warn) {
            eprintln!(
                "WARN [{}]: {} tokens use {:.1}% of the {} context window",
                input.label, result.total_tokens, usage.percentage, options.model
            );
        }

        if args.format == OutputFormat::Text {
            if inputs.len() > 1 {
                writeln!(out, "== {} ==", input.label)?;
            }
            write!(out, "{}", render_report(&result, args.show_tokens))?;
        }

        history.record(result.clone());
        results.push(result);
    }

    match args.format {
        OutputFormat::Text => {
            if inputs.len() > 1 {
                writeln!(out)?;
                write!(out, "{}", render_history(&history))?;
            }
        }
        OutputFormat::Json => {
            let json = match results.as_slice() {
                [single] => to_json(single),
                many => to_json_list(many),
            }
            .context("Failed to serialize analysis")?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Csv => write!(out, "{}", to_csv(&results))?,
    }

    if args.strict && !over_limit.is_empty() {
        bail!(
            "{} input(s) exceed the context window: {}",
            over_limit.len(),
            over_limit.join(", ")
        );
    }

    Ok(())
}

fn resolve_options(args: &AnalyzeArgs, matcher: &OverrideMatcher, input: &Input) -> AnalysisOptions {
    let mut options = match &input.relative {
        Some(relative) => matcher.options_for(relative),
        None => matcher.defaults(),
    };
    if let Some(model) = args.model {
        options.model = model;
    }
    if let Some(role) = args.role {
        options.role = role.role();
    }
    options
}
