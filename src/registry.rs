//! @dose
//! purpose: Static, read-only tables the engine consults: one ModelProfile per supported
//!     model, the three message roles, and the token colour palette.
//!
//! when-editing:
//!     - !Every SupportedModel variant must have exactly one profile
//!     - Prices are USD per 1000 tokens
//!
//! invariants:
//!     - output_price >= input_price for every profile
//!     - max_tokens > 1000 for every profile
//!     - Non-native profiles declare the shared approximation table
//!
//! gotchas:
//!     - Claude profiles use cl100k_base only as an approximation; counts get the
//!       correction multiplier in the strategy selector, not here

use crate::types::{MessageRole, ModelProfile, RoleType, SupportedModel};

pub const CL100K_BASE: &str = "cl100k_base";
pub const O200K_BASE: &str = "o200k_base";
pub const P50K_BASE: &str = "p50k_base";

/// Table used for models without a native tokenizer, and as the first fallback
pub const SHARED_APPROXIMATION_TABLE: &str = CL100K_BASE;

/// Empirical correction applied to shared-table counts for non-native models
pub const APPROXIMATION_MULTIPLIER: f64 = 1.05;

static GPT_35_TURBO: ModelProfile = ModelProfile {
    name: "GPT-3.5 Turbo",
    encoding: CL100K_BASE,
    input_price: 0.0010,
    output_price: 0.0020,
    max_tokens: 16385,
    supports_native_tokenization: true,
};

static GPT_4: ModelProfile = ModelProfile {
    name: "GPT-4",
    encoding: CL100K_BASE,
    input_price: 0.0300,
    output_price: 0.0600,
    max_tokens: 8192,
    supports_native_tokenization: true,
};

static GPT_4_TURBO: ModelProfile = ModelProfile {
    name: "GPT-4 Turbo",
    encoding: CL100K_BASE,
    input_price: 0.0100,
    output_price: 0.0300,
    max_tokens: 128000,
    supports_native_tokenization: true,
};

static GPT_4O: ModelProfile = ModelProfile {
    name: "GPT-4o",
    encoding: O200K_BASE,
    input_price: 0.0025,
    output_price: 0.0100,
    max_tokens: 128000,
    supports_native_tokenization: true,
};

static GPT_4O_MINI: ModelProfile = ModelProfile {
    name: "GPT-4o Mini",
    encoding: O200K_BASE,
    input_price: 0.000150,
    output_price: 0.000600,
    max_tokens: 128000,
    supports_native_tokenization: true,
};

static CLAUDE_3_HAIKU: ModelProfile = ModelProfile {
    name: "Claude 3 Haiku",
    encoding: SHARED_APPROXIMATION_TABLE,
    input_price: 0.00025,
    output_price: 0.00125,
    max_tokens: 200000,
    supports_native_tokenization: false,
};

static CLAUDE_3_SONNET: ModelProfile = ModelProfile {
    name: "Claude 3 Sonnet",
    encoding: SHARED_APPROXIMATION_TABLE,
    input_price: 0.003,
    output_price: 0.015,
    max_tokens: 200000,
    supports_native_tokenization: false,
};

static CLAUDE_35_SONNET: ModelProfile = ModelProfile {
    name: "Claude 3.5 Sonnet",
    encoding: SHARED_APPROXIMATION_TABLE,
    input_price: 0.003,
    output_price: 0.015,
    max_tokens: 200000,
    supports_native_tokenization: false,
};

static CLAUDE_3_OPUS: ModelProfile = ModelProfile {
    name: "Claude 3 Opus",
    encoding: SHARED_APPROXIMATION_TABLE,
    input_price: 0.015,
    output_price: 0.075,
    max_tokens: 200000,
    supports_native_tokenization: false,
};

/// Look up the profile for a model
pub fn profile(model: SupportedModel) -> &'static ModelProfile {
    match model {
        SupportedModel::Gpt35Turbo => &GPT_35_TURBO,
        SupportedModel::Gpt4 => &GPT_4,
        SupportedModel::Gpt4Turbo => &GPT_4_TURBO,
        SupportedModel::Gpt4o => &GPT_4O,
        SupportedModel::Gpt4oMini => &GPT_4O_MINI,
        SupportedModel::Claude3Haiku => &CLAUDE_3_HAIKU,
        SupportedModel::Claude3Sonnet => &CLAUDE_3_SONNET,
        SupportedModel::Claude35Sonnet => &CLAUDE_35_SONNET,
        SupportedModel::Claude3Opus => &CLAUDE_3_OPUS,
    }
}

pub const MESSAGE_ROLES: [MessageRole; 3] = [
    MessageRole {
        kind: RoleType::System,
        label: "System Message",
    },
    MessageRole {
        kind: RoleType::User,
        label: "User Message",
    },
    MessageRole {
        kind: RoleType::Assistant,
        label: "Assistant Message",
    },
];

pub const TOKEN_COLORS: [&str; 20] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#06B6D4", "#84CC16", "#F97316",
    "#EC4899", "#6366F1", "#14B8A6", "#FACC15", "#F43F5E", "#A855F7", "#0EA5E9", "#22C55E",
    "#FB923C", "#E11D48", "#9333EA", "#0284C7",
];

/// Palette colour for the chunk at `index`
pub fn color_for(index: usize) -> &'static str {
    TOKEN_COLORS[index % TOKEN_COLORS.len()]
}
