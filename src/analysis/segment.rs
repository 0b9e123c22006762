//! @dose
//! purpose: Visual segmentation of raw text into coloured TokenChunks. Each token id is
//!     decoded on its own so every chunk shows exactly the substring that token covers.
//!
//! when-editing:
//!     - !No correction multiplier here; this pass is for display, not billing
//!     - !Any encoder failure discards partial output and switches to whitespace runs
//!
//! invariants:
//!     - Empty input yields no chunks; non-empty input yields at least one
//!     - Chunk ids are token-<i> (encoder) or fallback-<i> (whitespace runs)
//!     - Colours cycle through the palette by index
//!
//! gotchas:
//!     - A token that covers part of a multi-byte character (most emoji under cl100k)
//!       still gets its own chunk; its text is the lossy decode, so chunk texts need not
//!       concatenate back to the input

use super::strategy::visual_table;
use super::text::whitespace_runs;
use crate::encoding::{EncodingError, EncodingProvider};
use crate::registry::color_for;
use crate::types::{ModelProfile, TokenChunk};
use tracing::warn;

/// Segment `text` into display chunks for `profile`, never failing
pub fn tokenize_text<P>(provider: &P, text: &str, profile: &ModelProfile) -> Vec<TokenChunk>
where
    P: EncodingProvider + ?Sized,
{
    match encode_chunks(provider, text, visual_table(profile)) {
        Ok(chunks) => chunks,
        Err(e) => {
            warn!(model = profile.name, error = %e, "tokenization failed, splitting on whitespace");
            fallback_chunks(text)
        }
    }
}

fn encode_chunks<P>(provider: &P, text: &str, table: &str) -> Result<Vec<TokenChunk>, EncodingError>
where
    P: EncodingProvider + ?Sized,
{
    let encoder = provider.lookup(table)?;
    let ids = encoder.encode(text)?;

    ids.into_iter()
        .enumerate()
        .map(|(index, token)| -> Result<TokenChunk, EncodingError> {
            Ok(TokenChunk {
                id: format!("token-{index}"),
                text: encoder.decode_token(token)?,
                token,
                color: color_for(index),
                index,
            })
        })
        .collect()
}

fn fallback_chunks(text: &str) -> Vec<TokenChunk> {
    whitespace_runs(text)
        .enumerate()
        .map(|(index, run)| TokenChunk {
            id: format!("fallback-{index}"),
            text: run.to_string(),
            token: index as u32,
            color: color_for(index),
            index,
        })
        .collect()
}
