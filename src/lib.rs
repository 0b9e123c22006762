//! @dose
//! purpose: This is the library crate root for tokmeter, exposing the token analysis engine
//!     for use as both a CLI tool and a library. It re-exports the engine entry points and
//!     the types callers pass to and get back from them.
//!
//! when-editing:
//!     - !All public modules must be declared here with pub mod
//!     - Keep the re-export list organized by module
//!
//! invariants:
//!     - The analysis functions never return an error; encoder failures degrade to
//!       fallbacks inside the engine
//!     - Every supported model is reachable through SupportedModel and the registry
//!
//! gotchas:
//!     - The lib.rs is separate from main.rs - library consumers get lib, CLI gets main
//!     - TokenAnalyzer is generic over its EncodingProvider; the free functions use the
//!       tiktoken provider

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod encoding;
pub mod formatter;
pub mod history;
pub mod registry;
pub mod types;

// Re-export main types for convenience
pub use analysis::{
    analyze_text, calculate_cost, count_tokens, format_message, tokenize_text, validate_limit,
    TokenAnalyzer,
};
pub use config::Config;
pub use encoding::{Encoder, EncodingError, EncodingProvider, TiktokenProvider};
pub use history::AnalysisHistory;
pub use types::{
    AnalysisOptions, AnalysisResult, LimitValidation, MessageRole, ModelProfile, RoleType,
    SupportedModel, TokenChunk,
};
