use crate::analysis::validate_limit;
use crate::cli::LimitArgs;
use crate::config::Config;
use crate::types::{LimitValidation, SupportedModel};
use anyhow::{bail, Result};
use std::io::{self, Write};
use std::path::Path;

/// Print the context usage of a token count; fails when it exceeds the window
pub fn run_limit(args: &LimitArgs, root: &Path) -> Result<()> {
    let model = limit_model(args, root);
    let usage = validate_limit(args.count, model);

    let stdout = io::stdout();
    writeln!(stdout.lock(), "{}", describe(args.count, model, &usage))?;

    if !usage.is_valid {
        bail!(
            "{} tokens exceed the {} context window of {} tokens",
            args.count,
            model,
            usage.max_tokens
        );
    }
    Ok(())
}

/// --model, else the configured default; the config is only read when needed
fn limit_model(args: &LimitArgs, root: &Path) -> SupportedModel {
    args.model.unwrap_or_else(|| Config::load(root).model)
}

fn describe(count: usize, model: SupportedModel, usage: &LimitValidation) -> String {
    format!(
        "{}: {} / {} tokens ({:.2}%) {}",
        model.profile().name,
        count,
        usage.max_tokens,
        usage.percentage,
        if usage.is_valid { "ok" } else { "over limit" }
    )
}
