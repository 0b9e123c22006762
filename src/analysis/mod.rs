//! @dose
//! purpose: The token analysis engine. TokenAnalyzer combines role formatting, billing
//!     token counts, visual segmentation, word/character counts and cost into one
//!     AnalysisResult. Free functions wrap an analyzer over the default tiktoken
//!     provider for callers that do not inject their own.
//!
//! when-editing:
//!     - !total_tokens is counted on the role-wrapped text; tokens are segmented from the
//!       raw text. Keep them independent
//!     - Provider failures are absorbed by strategy/segment; analyze has no error path
//!
//! invariants:
//!     - analyze never panics for any text, including empty and non-ASCII input
//!     - Identical inputs give identical results apart from id and timestamp
//!     - No state is shared between calls except the read-only registry and BPE caches
//!
//! flows:
//!     - analyze: format_message -> count_tokens(formatted) -> tokenize_text(raw)
//!       -> character/word counts -> calculate_cost -> stamp id and timestamp

mod cost;
mod format;
mod segment;
mod strategy;
mod text;

pub use cost::{calculate_cost, validate_limit};
pub use format::format_message;
pub use strategy::{heuristic_count, visual_table, CountingStrategy};
pub use text::{character_count, word_count};

pub(crate) use text::whitespace_runs;

use crate::encoding::{EncodingProvider, TiktokenProvider};
use crate::types::{AnalysisOptions, AnalysisResult, LimitValidation, SupportedModel, TokenChunk};
use chrono::Utc;
use uuid::Uuid;

/// Analysis engine over an encoding provider
#[derive(Debug, Default, Clone)]
pub struct TokenAnalyzer<P = TiktokenProvider> {
    provider: P,
}

impl TokenAnalyzer<TiktokenProvider> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: EncodingProvider> TokenAnalyzer<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Billing token count of `text` as-is (no role envelope)
    pub fn count_tokens(&self, text: &str, model: SupportedModel) -> usize {
        strategy::count_tokens(&self.provider, text, model.profile())
    }

    /// Visual segmentation of `text`
    pub fn tokenize(&self, text: &str, model: SupportedModel) -> Vec<TokenChunk> {
        segment::tokenize_text(&self.provider, text, model.profile())
    }

    /// Full analysis of `text` under `options`
    pub fn analyze(&self, text: &str, options: &AnalysisOptions) -> AnalysisResult {
        let formatted = format_message(text, &options.role);
        let total_tokens = self.count_tokens(&formatted, options.model);
        let tokens = self.tokenize(text, options.model);
        let estimated_cost = calculate_cost(total_tokens, options.model, &options.role);

        AnalysisResult {
            id: Uuid::new_v4(),
            text: text.to_string(),
            tokens,
            total_tokens,
            character_count: character_count(text),
            word_count: word_count(text),
            estimated_cost,
            model: options.model,
            role: options.role,
            timestamp: Utc::now(),
        }
    }

    /// Context-window usage of an analysis' billing count
    pub fn validate(&self, result: &AnalysisResult) -> LimitValidation {
        validate_limit(result.total_tokens, result.model)
    }
}

/// Analyze `text` with the default tiktoken provider
pub fn analyze_text(text: &str, options: &AnalysisOptions) -> AnalysisResult {
    TokenAnalyzer::new().analyze(text, options)
}

/// Count tokens in `text` with the default tiktoken provider
pub fn count_tokens(text: &str, model: SupportedModel) -> usize {
    TokenAnalyzer::new().count_tokens(text, model)
}

/// Segment `text` with the default tiktoken provider
pub fn tokenize_text(text: &str, model: SupportedModel) -> Vec<TokenChunk> {
    TokenAnalyzer::new().tokenize(text, model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::testing::StubProvider;
    use crate::encoding::Encoder;
    use crate::registry::{CL100K_BASE, O200K_BASE};
    use crate::types::RoleType;

    fn stub_analyzer() -> TokenAnalyzer<StubProvider> {
        TokenAnalyzer::with_provider(StubProvider::with_tables(&[CL100K_BASE, O200K_BASE]))
    }

    fn user_opts(model: SupportedModel) -> AnalysisOptions {
        AnalysisOptions::new(model, RoleType::User)
    }

    #[test]
    fn test_hello_world_scenario() {
        let provider = TiktokenProvider::new();
        let analyzer = TokenAnalyzer::with_provider(provider);
        let opts = user_opts(SupportedModel::Gpt4oMini);
        let result = analyzer.analyze("Hello world", &opts);

        let encoder = provider.lookup(O200K_BASE).unwrap();
        let raw = encoder.encode("Hello world").unwrap().len();
        let wrapped = encoder
            .encode("<|im_start|>user\nHello world<|im_end|>")
            .unwrap()
            .len();

        assert_eq!(result.text, "Hello world");
        assert_eq!(result.character_count, 11);
        assert_eq!(result.word_count, 2);
        assert_eq!(result.tokens.len(), raw);
        assert_eq!(result.total_tokens, wrapped);
        assert_eq!(
            result.estimated_cost,
            (wrapped as f64 / 1000.0) * SupportedModel::Gpt4oMini.profile().input_price
        );
        assert_eq!(result.model, SupportedModel::Gpt4oMini);
        assert_eq!(result.role, RoleType::User.role());
    }

    #[test]
    fn test_total_tokens_counted_on_formatted_text() {
        let analyzer = stub_analyzer();
        let result = analyzer.analyze("Hello world", &user_opts(SupportedModel::Gpt4o));
        // raw: "Hello", " ", "world"
        assert_eq!(result.tokens.len(), 3);
        // formatted: "<|im_start|>user", "\n", "Hello", " ", "world<|im_end|>"
        assert_eq!(result.total_tokens, 5);
        assert_ne!(result.tokens.len(), result.total_tokens);
    }

    #[test]
    fn test_analysis_is_idempotent_apart_from_identity() {
        let analyzer = TokenAnalyzer::new();
        let opts = AnalysisOptions::new(SupportedModel::Claude35Sonnet, RoleType::Assistant);
        let a = analyzer.analyze("Some repeated input, twice.", &opts);
        let b = analyzer.analyze("Some repeated input, twice.", &opts);

        assert_ne!(a.id, b.id);
        assert!(a.same_measurements(&b));
        assert_eq!(a.tokens, b.tokens);
        assert_eq!(a.total_tokens, b.total_tokens);
        assert_eq!(a.estimated_cost, b.estimated_cost);
    }

    #[test]
    fn test_assistant_costs_more_than_user() {
        let analyzer = stub_analyzer();
        let model = SupportedModel::Gpt4oMini;
        let user = analyzer.analyze("Test", &AnalysisOptions::new(model, RoleType::User));
        let assistant = analyzer.analyze("Test", &AnalysisOptions::new(model, RoleType::Assistant));
        assert!(assistant.estimated_cost > user.estimated_cost);
    }

    #[test]
    fn test_failing_provider_still_produces_result() {
        let analyzer = TokenAnalyzer::with_provider(StubProvider::failing());
        let result = analyzer.analyze("a b", &user_opts(SupportedModel::Gpt4));

        let formatted_len = "<|im_start|>user\na b<|im_end|>".chars().count();
        assert_eq!(result.total_tokens, formatted_len.div_ceil(4));
        assert_eq!(result.tokens.len(), 3);
        assert!(result.tokens[0].id.starts_with("fallback-"));
        assert_eq!(analyzer.count_tokens("a b", SupportedModel::Gpt4), 1);
    }

    #[test]
    fn test_empty_text() {
        let result = analyze_text("", &AnalysisOptions::new(SupportedModel::Gpt4o, RoleType::System));
        assert_eq!(result.text, "");
        assert!(result.tokens.is_empty());
        assert_eq!(result.character_count, 0);
        assert_eq!(result.word_count, 0);
        assert!(result.total_tokens > 0);
    }

    #[test]
    fn test_long_text() {
        let text = "word ".repeat(10_000);
        let result = analyze_text(&text, &user_opts(SupportedModel::Gpt4o));
        assert_eq!(result.character_count, 50_000);
        assert_eq!(result.word_count, 10_000);
        assert!(result.total_tokens >= result.tokens.len());
    }

    #[test]
    fn test_unicode_and_whitespace_text() {
        let text = "Line 1\n\nLine 2\t\tTabbed\r\nWindows line";
        let result = analyze_text(text, &user_opts(SupportedModel::Gpt4o));
        assert_eq!(result.character_count, text.chars().count());
        let rebuilt: String = result.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, text);

        let text = "🚀 Hello 世界! @#$%^&*()";
        let result = analyze_text(text, &user_opts(SupportedModel::Gpt4));
        let raw = TiktokenProvider::new()
            .lookup(CL100K_BASE)
            .unwrap()
            .encode(text)
            .unwrap();
        assert_eq!(result.text, text);
        assert_eq!(result.character_count, text.chars().count());
        assert_eq!(result.tokens.len(), raw.len());
        assert!(result.tokens.iter().all(|t| t.id.starts_with("token-")));
    }

    #[test]
    fn test_non_native_count_matches_corrected_shared_count() {
        let text = "Approximations should be stable across calls.";
        let raw = TiktokenProvider::new()
            .lookup(CL100K_BASE)
            .unwrap()
            .encode(text)
            .unwrap()
            .len();
        assert_eq!(
            count_tokens(text, SupportedModel::Claude3Haiku),
            (raw as f64 * 1.05).round() as usize
        );
    }

    #[test]
    fn test_validate_uses_total_tokens() {
        let analyzer = stub_analyzer();
        let result = analyzer.analyze("x", &user_opts(SupportedModel::Gpt4));
        let v = analyzer.validate(&result);
        assert!(v.is_valid);
        assert_eq!(v.max_tokens, 8192);
        assert_eq!(v.percentage, result.total_tokens as f64 / 8192.0 * 100.0);
    }

    #[test]
    fn test_default_provider_free_functions() {
        assert_eq!(count_tokens("", SupportedModel::Gpt4oMini), 0);
        assert!(!tokenize_text("Hello", SupportedModel::Gpt35Turbo).is_empty());
    }
}
