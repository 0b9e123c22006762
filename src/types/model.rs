//! @dose
//! purpose: Closed identifier types for the engine inputs: the supported models, their
//!     static profiles, and the three conversational roles. Parsing from strings happens
//!     only at the boundary (CLI flags, tokmeter.toml), so analysis code never sees an
//!     unknown model or role.
//!
//! when-editing:
//!     - !Adding a model means adding a variant here, an entry in SupportedModel::ALL, and
//!       a profile in registry.rs
//!     - The string id of a model is its serialized form everywhere (CLI, config, JSON)
//!
//! invariants:
//!     - as_str() and FromStr are exact inverses for every variant
//!     - MessageRole labels are fixed; roles are compared by their RoleType only
//!
//! gotchas:
//!     - "claude-3.5-sonnet" contains a dot; it is a plain id, not a version range

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Models with a registered profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SupportedModel {
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4o-mini")]
    #[default]
    Gpt4oMini,
    #[serde(rename = "claude-3-haiku")]
    Claude3Haiku,
    #[serde(rename = "claude-3-sonnet")]
    Claude3Sonnet,
    #[serde(rename = "claude-3.5-sonnet")]
    Claude35Sonnet,
    #[serde(rename = "claude-3-opus")]
    Claude3Opus,
}

impl SupportedModel {
    pub const ALL: [SupportedModel; 9] = [
        SupportedModel::Gpt35Turbo,
        SupportedModel::Gpt4,
        SupportedModel::Gpt4Turbo,
        SupportedModel::Gpt4o,
        SupportedModel::Gpt4oMini,
        SupportedModel::Claude3Haiku,
        SupportedModel::Claude3Sonnet,
        SupportedModel::Claude35Sonnet,
        SupportedModel::Claude3Opus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedModel::Gpt35Turbo => "gpt-3.5-turbo",
            SupportedModel::Gpt4 => "gpt-4",
            SupportedModel::Gpt4Turbo => "gpt-4-turbo",
            SupportedModel::Gpt4o => "gpt-4o",
            SupportedModel::Gpt4oMini => "gpt-4o-mini",
            SupportedModel::Claude3Haiku => "claude-3-haiku",
            SupportedModel::Claude3Sonnet => "claude-3-sonnet",
            SupportedModel::Claude35Sonnet => "claude-3.5-sonnet",
            SupportedModel::Claude3Opus => "claude-3-opus",
        }
    }

    /// Static profile for this model
    pub fn profile(&self) -> &'static ModelProfile {
        crate::registry::profile(*self)
    }
}

impl fmt::Display for SupportedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown model '{given}' (expected one of: {expected})")]
pub struct ParseModelError {
    pub given: String,
    pub expected: String,
}

impl FromStr for SupportedModel {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SupportedModel::ALL
            .into_iter()
            .find(|model| model.as_str() == s.trim())
            .ok_or_else(|| ParseModelError {
                given: s.to_string(),
                expected: SupportedModel::ALL
                    .iter()
                    .map(SupportedModel::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Pricing, limits and encoding for one model. Prices are per 1000 tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProfile {
    pub name: &'static str,
    pub encoding: &'static str,
    pub input_price: f64,
    pub output_price: f64,
    pub max_tokens: usize,
    pub supports_native_tokenization: bool,
}

/// Conversational position of the analyzed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    System,
    #[default]
    User,
    Assistant,
}

impl RoleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::System => "system",
            RoleType::User => "user",
            RoleType::Assistant => "assistant",
        }
    }

    /// The registered role (with its display label) for this type
    pub fn role(&self) -> MessageRole {
        match self {
            RoleType::System => crate::registry::MESSAGE_ROLES[0],
            RoleType::User => crate::registry::MESSAGE_ROLES[1],
            RoleType::Assistant => crate::registry::MESSAGE_ROLES[2],
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown role '{0}' (expected one of: system, user, assistant)")]
pub struct ParseRoleError(pub String);

impl FromStr for RoleType {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(RoleType::System),
            "user" => Ok(RoleType::User),
            "assistant" => Ok(RoleType::Assistant),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// A role together with its display label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageRole {
    #[serde(rename = "type")]
    pub kind: RoleType,
    pub label: &'static str,
}

impl Default for MessageRole {
    fn default() -> Self {
        RoleType::default().role()
    }
}
