//! @dose
//! purpose: Chooses how tokens are counted for a model and runs the layered fallback
//!     chain. Native models count with their own table; non-native models count with the
//!     shared approximation table scaled by the correction multiplier.
//!
//! when-editing:
//!     - !The plan is ordered: primary, then the uncorrected shared table, then the
//!       character heuristic, which cannot fail
//!     - Each provider failure is logged and the next step tried; nothing is propagated
//!
//! invariants:
//!     - count_tokens always returns a count, for any text and any provider behavior
//!     - The correction multiplier applies only to the primary step of non-native models
//!
//! gotchas:
//!     - For non-native models the first fallback uses the same table as the primary, so
//!       a broken table usually falls through to the heuristic

use crate::encoding::{EncodingError, EncodingProvider};
use crate::registry::{APPROXIMATION_MULTIPLIER, SHARED_APPROXIMATION_TABLE};
use crate::types::ModelProfile;
use tracing::{debug, warn};

/// One fallible way of counting tokens
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CountingStrategy {
    /// The model's own encoding table
    Native { table: &'static str },
    /// Shared table count scaled by an empirical correction, rounded to nearest
    Approximate { table: &'static str, correction: f64 },
    /// Shared table count, uncorrected
    SharedTable,
}

impl CountingStrategy {
    /// Primary strategy for a profile
    pub fn primary(profile: &ModelProfile) -> Self {
        if profile.supports_native_tokenization {
            CountingStrategy::Native {
                table: profile.encoding,
            }
        } else {
            CountingStrategy::Approximate {
                table: SHARED_APPROXIMATION_TABLE,
                correction: APPROXIMATION_MULTIPLIER,
            }
        }
    }

    /// Fallible strategies in the order they are attempted
    pub fn plan(profile: &ModelProfile) -> [CountingStrategy; 2] {
        [Self::primary(profile), CountingStrategy::SharedTable]
    }

    pub fn table(&self) -> &'static str {
        match self {
            CountingStrategy::Native { table } | CountingStrategy::Approximate { table, .. } => {
                *table
            }
            CountingStrategy::SharedTable => SHARED_APPROXIMATION_TABLE,
        }
    }

    /// Count with this strategy. The encoder is released before returning.
    pub fn try_count<P>(&self, provider: &P, text: &str) -> Result<usize, EncodingError>
    where
        P: EncodingProvider + ?Sized,
    {
        let encoder = provider.lookup(self.table())?;
        let raw = encoder.encode(text)?.len();
        Ok(match self {
            CountingStrategy::Approximate { correction, .. } => {
                (raw as f64 * correction).round() as usize
            }
            _ => raw,
        })
    }
}

/// Table used for the visual segmentation of a model's text
pub fn visual_table(profile: &ModelProfile) -> &'static str {
    if profile.supports_native_tokenization {
        profile.encoding
    } else {
        SHARED_APPROXIMATION_TABLE
    }
}

/// Last-resort estimate: one token per four characters, rounded up
pub fn heuristic_count(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Billing token count for `text` under `profile`, never failing
pub fn count_tokens<P>(provider: &P, text: &str, profile: &ModelProfile) -> usize
where
    P: EncodingProvider + ?Sized,
{
    for strategy in CountingStrategy::plan(profile) {
        match strategy.try_count(provider, text) {
            Ok(count) => {
                debug!(model = profile.name, ?strategy, count, "counted tokens");
                return count;
            }
            Err(e) => {
                warn!(model = profile.name, ?strategy, error = %e, "token counting failed, falling back");
            }
        }
    }

    let count = heuristic_count(text);
    warn!(model = profile.name, count, "using character heuristic for token count");
    count
}
