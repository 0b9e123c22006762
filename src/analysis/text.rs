use once_cell::sync::Lazy;
use regex::Regex;

static RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+|\S+").expect("valid regex"));

/// Number of whitespace-separated words; blank text has none
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Length in Unicode scalar values
pub fn character_count(text: &str) -> usize {
    text.chars().count()
}

/// Maximal alternating runs of whitespace and non-whitespace, in order.
/// Concatenating the runs yields the input.
pub(crate) fn whitespace_runs(text: &str) -> impl Iterator<Item = &str> {
    RUNS.find_iter(text).map(|m| m.as_str())
}
