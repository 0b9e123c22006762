//! Human-readable analysis reports.
//!
//! Renders one analysis as a summary block with a context-usage bar, and a
//! history as a compact table of recent results.

use crate::analysis::validate_limit;
use crate::history::AnalysisHistory;
use crate::types::AnalysisResult;

const RULE_WIDTH: usize = 50;
const BAR_WIDTH: usize = 40;

/// Format a single analysis as a display block.
pub fn render_report(result: &AnalysisResult, show_tokens: bool) -> String {
    let profile = result.model.profile();
    let usage = validate_limit(result.total_tokens, result.model);
    let mut output = String::new();

    output.push_str("Token Analysis\n");
    output.push_str(&format!("{}\n", "─".repeat(RULE_WIDTH)));
    output.push_str(&format!("Model:          {}\n", profile.name));
    output.push_str(&format!("Role:           {}\n", result.role.label));
    output.push_str(&format!("Total tokens:   {:>10}\n", result.total_tokens));
    output.push_str(&format!("Visual tokens:  {:>10}\n", result.tokens.len()));
    output.push_str(&format!("Characters:     {:>10}\n", result.character_count));
    output.push_str(&format!("Words:          {:>10}\n", result.word_count));
    output.push_str(&format!("Estimated cost: ${:.6}\n", result.estimated_cost));
    output.push_str(&format!(
        "Context usage:  {:.2}% of {} {}\n",
        usage.percentage,
        usage.max_tokens,
        usage_bar(usage.percentage)
    ));
    if !usage.is_valid {
        output.push_str("  Exceeds the model's context window\n");
    }
    if !profile.supports_native_tokenization {
        output.push_str(&format!(
            "  Approximate count: {} has no public tokenizer\n",
            profile.name
        ));
    }
    output.push_str(&format!("{}\n", "─".repeat(RULE_WIDTH)));

    if show_tokens && !result.tokens.is_empty() {
        output.push_str("Tokens:\n");
        for chunk in &result.tokens {
            output.push_str(&format!(
                "  {:>5} {:>8} {} {:?}\n",
                chunk.index, chunk.token, chunk.color, chunk.text
            ));
        }
    }

    output
}

/// Format the history as a table, newest first.
pub fn render_history(history: &AnalysisHistory) -> String {
    let mut output = String::new();

    output.push_str(&format!("Recent analyses ({})\n", history.len()));
    for (i, result) in history.entries().enumerate() {
        output.push_str(&format!(
            "  {:>2}. {:>8} tokens  ${:.6}  {:<18} {:<9} {}\n",
            i + 1,
            result.total_tokens,
            result.estimated_cost,
            result.model.as_str(),
            result.role.kind.as_str(),
            preview(&result.text, 32)
        ));
    }

    let total_tokens: usize = history.entries().map(|r| r.total_tokens).sum();
    let total_cost: f64 = history.entries().map(|r| r.estimated_cost).sum();
    output.push_str(&format!(
        "\n  Total: {} tokens, ${:.6}\n",
        total_tokens, total_cost
    ));

    output
}

fn usage_bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled))
}

/// First `max` characters of `text` on one line.
fn preview(text: &str, max: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if flat.chars().count() > max {
        let cut: String = flat.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    } else {
        flat
    }
}
