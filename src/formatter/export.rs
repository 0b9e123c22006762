//! @dose
//! purpose: Machine-readable exports of analysis results: pretty JSON of a single result
//!     and a CSV table of one row per result.
//!
//! invariants:
//!     - JSON keys are camelCase; model is its id, role is { type, label }
//!     - CSV always starts with the fixed header, even with no rows
//!     - CSV fields containing a comma, quote, CR or LF are quoted with doubled quotes
//!
//! gotchas:
//!     - Cost is written with full f64 precision, not the 6 decimals of the text report

use crate::types::AnalysisResult;

pub const CSV_HEADER: &str = "Text,Model,Role,Tokens,Characters,Words,Cost,Timestamp";

/// Pretty-printed JSON of one result
pub fn to_json(result: &AnalysisResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Pretty-printed JSON array of several results
pub fn to_json_list(results: &[AnalysisResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

/// CSV table with one row per result
pub fn to_csv<'a, I>(results: I) -> String
where
    I: IntoIterator<Item = &'a AnalysisResult>,
{
    let mut output = String::from(CSV_HEADER);
    output.push('\n');

    for result in results {
        let row = [
            escape_field(&result.text),
            result.model.as_str().to_string(),
            result.role.kind.as_str().to_string(),
            result.total_tokens.to_string(),
            result.character_count.to_string(),
            result.word_count.to_string(),
            result.estimated_cost.to_string(),
            result.timestamp.to_rfc3339(),
        ];
        output.push_str(&row.join(","));
        output.push('\n');
    }

    output
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
