//! @dose
//! purpose: Pure arithmetic over the model registry: cost of a token count for a role,
//!     and context-window usage for a token count.
//!
//! invariants:
//!     - No rounding; display precision is the caller's concern
//!     - Assistant text is priced at the output rate, everything else at the input rate

use crate::types::{LimitValidation, MessageRole, RoleType, SupportedModel};

/// Estimated cost in USD of `token_count` tokens for `model` in `role`
pub fn calculate_cost(token_count: usize, model: SupportedModel, role: &MessageRole) -> f64 {
    let profile = model.profile();
    let unit_price = match role.kind {
        RoleType::Assistant => profile.output_price,
        RoleType::System | RoleType::User => profile.input_price,
    };
    (token_count as f64 / 1000.0) * unit_price
}

/// Share of `model`'s context window used by `token_count` tokens
pub fn validate_limit(token_count: usize, model: SupportedModel) -> LimitValidation {
    let max_tokens = model.profile().max_tokens;
    LimitValidation {
        is_valid: token_count <= max_tokens,
        max_tokens,
        percentage: (token_count as f64 / max_tokens as f64) * 100.0,
    }
}
