//! @dose
//! purpose: This module implements the count command: prints the billing token count of
//!     raw text, without the role envelope, as a bare number for scripting.
//!
//! invariants:
//!     - stdout carries only the count followed by a newline
//!     - Model precedence is --model > matching override > config default

use super::input::collect_inputs;
use crate::analysis::TokenAnalyzer;
use crate::cli::CountArgs;
use crate::config::Config;
use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;
use std::slice;

pub fn run_count(args: &CountArgs, root: &Path) -> Result<()> {
    let config = Config::load(root);
    let count = count_input(args, root, &config)?;

    let stdout = io::stdout();
    writeln!(stdout.lock(), "{count}")?;
    Ok(())
}

fn count_input(args: &CountArgs, root: &Path, config: &Config) -> Result<usize> {
    let paths = args.input.as_ref().map(slice::from_ref).unwrap_or_default();
    let inputs = collect_inputs(args.text.as_deref(), paths, root)?;
    let matcher = config.override_matcher();

    let mut total = 0;
    for input in &inputs {
        let model = args.model.unwrap_or_else(|| match &input.relative {
            Some(relative) => matcher.options_for(relative).model,
            None => matcher.defaults().model,
        });
        total += TokenAnalyzer::new().count_tokens(&input.text, model);
    }
    Ok(total)
}
