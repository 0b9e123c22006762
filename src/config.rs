//! @dose
//! purpose: Configuration file parsing for tokmeter.toml. Handles the default model and
//!     role, the context-usage warning threshold, history size, and per-path overrides
//!     of model and role.
//!
//! when-editing:
//!     - !Config is loaded once at startup and passed to the command handlers
//!     - !Overrides use glob patterns matched against paths relative to the root
//!     - CLI --model/--role beat both overrides and top-level defaults
//!
//! invariants:
//!     - Config::load returns the default config if tokmeter.toml doesn't exist
//!     - An unreadable or invalid file logs a warning and yields the default config
//!
//! gotchas:
//!     - First matching override wins (order matters in the TOML array)
//!     - An override may set only model or only role; the other falls back to the default
//!     - Invalid glob patterns are skipped with a warning, not rejected

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::types::{AnalysisOptions, RoleType, SupportedModel};
use globset::{Glob, GlobMatcher};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "tokmeter.toml";

/// Main configuration structure matching tokmeter.toml
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default model
    pub model: SupportedModel,

    /// Default role
    pub role: RoleType,

    /// Context-usage warning threshold
    pub limits: LimitsConfig,

    /// History size
    pub history: HistoryConfig,

    /// Per-pattern overrides
    #[serde(rename = "override")]
    pub overrides: Vec<AnalysisOverride>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Percentage of the context window at which a warning is printed
    pub warn: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { warn: 80.0 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of analyses kept per run
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Model and/or role for files matching a pattern
#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisOverride {
    /// Glob pattern to match (relative to root)
    pub pattern: String,

    #[serde(default)]
    pub model: Option<SupportedModel>,

    #[serde(default)]
    pub role: Option<RoleType>,
}

/// Compiled overrides for efficient matching
pub struct OverrideMatcher {
    overrides: Vec<(GlobMatcher, Option<SupportedModel>, Option<RoleType>)>,
    default_model: SupportedModel,
    default_role: RoleType,
}

impl OverrideMatcher {
    /// Create a new matcher from config
    pub fn new(config: &Config) -> Self {
        let mut overrides = Vec::new();

        for ov in &config.overrides {
            match Glob::new(&ov.pattern) {
                Ok(glob) => overrides.push((glob.compile_matcher(), ov.model, ov.role)),
                Err(e) => warn!(pattern = %ov.pattern, error = %e, "skipping invalid override pattern"),
            }
        }

        Self {
            overrides,
            default_model: config.model,
            default_role: config.role,
        }
    }

    /// Get analysis options for a file path (relative to root)
    pub fn options_for(&self, relative_path: &Path) -> AnalysisOptions {
        // First match wins
        for (matcher, model, role) in &self.overrides {
            if matcher.is_match(relative_path) {
                debug!(path = %relative_path.display(), pattern = %matcher.glob(), "override matched");
                return AnalysisOptions::new(
                    model.unwrap_or(self.default_model),
                    role.unwrap_or(self.default_role),
                );
            }
        }

        self.defaults()
    }

    /// Options for input with no path (stdin, --text)
    pub fn defaults(&self) -> AnalysisOptions {
        AnalysisOptions::new(self.default_model, self.default_role)
    }
}

impl Config {
    /// Load configuration from tokmeter.toml in the given root directory
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %config_path.display(), error = %e, "failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %config_path.display(), error = %e, "failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Create an OverrideMatcher from this config
    pub fn override_matcher(&self) -> OverrideMatcher {
        OverrideMatcher::new(self)
    }
}
