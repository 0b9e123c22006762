//! @dose
//! purpose: Output records of the analysis engine: visual token chunks, the aggregate
//!     AnalysisResult, and the derived LimitValidation.
//!
//! invariants:
//!     - total_tokens is counted on the role-wrapped text, tokens on the raw text; the two
//!       may differ and nothing reconciles them
//!     - Serialized field names are camelCase (export format contract)
//!
//! gotchas:
//!     - Two analyses of the same input differ only in id and timestamp

use super::model::{MessageRole, RoleType, SupportedModel};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Model and role an analysis runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalysisOptions {
    pub model: SupportedModel,
    pub role: MessageRole,
}

impl AnalysisOptions {
    pub fn new(model: SupportedModel, role: RoleType) -> Self {
        Self {
            model,
            role: role.role(),
        }
    }
}

/// One decoded token of the visual segmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenChunk {
    /// `token-<index>`, or `fallback-<index>` when the encoder was unavailable
    pub id: String,
    /// Substring this token decodes to
    pub text: String,
    /// Raw token id (the index itself for fallback chunks)
    pub token: u32,
    /// Palette colour, cycled by index
    pub color: &'static str,
    pub index: usize,
}

/// Complete result of one analysis call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: Uuid,
    pub text: String,
    pub tokens: Vec<TokenChunk>,
    pub total_tokens: usize,
    pub character_count: usize,
    pub word_count: usize,
    pub estimated_cost: f64,
    pub model: SupportedModel,
    pub role: MessageRole,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    /// Whether two results carry the same measured content, ignoring id and timestamp
    pub fn same_measurements(&self, other: &AnalysisResult) -> bool {
        self.text == other.text
            && self.model == other.model
            && self.role == other.role
            && self.tokens == other.tokens
            && self.total_tokens == other.total_tokens
            && self.character_count == other.character_count
            && self.word_count == other.word_count
            && self.estimated_cost == other.estimated_cost
    }
}

/// Context-window usage for a token count
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitValidation {
    pub is_valid: bool,
    pub max_tokens: usize,
    pub percentage: f64,
}

impl LimitValidation {
    /// True once usage reaches `threshold` percent of the window
    pub fn reaches(&self, threshold: f64) -> bool {
        self.percentage >= threshold
    }
}
