//! @dose
//! purpose: Default encoding provider backed by tiktoken-rs. Serves the cl100k_base,
//!     o200k_base and p50k_base tables from process-wide caches.
//!
//! when-editing:
//!     - !Each table is lazily initialized once and shared read-only afterwards
//!     - Text is encoded as ordinary text: special-token markers count as plain characters
//!
//! invariants:
//!     - A table that fails to initialize stays unavailable for the process lifetime and
//!       every lookup reports EncodingError::Unavailable
//!
//! gotchas:
//!     - decode is strict UTF-8 over a whole sequence; decode_token is lossy, so a byte
//!       token covering part of a multi-byte character shows as U+FFFD
//!     - First lookup of a table pays the BPE load cost

use super::{Encoder, EncodingError, EncodingProvider};
use crate::registry::{CL100K_BASE, O200K_BASE, P50K_BASE};
use once_cell::sync::Lazy;
use tiktoken_rs::CoreBPE;

static CL100K: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| tiktoken_rs::cl100k_base().map_err(|e| e.to_string()));
static O200K: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| tiktoken_rs::o200k_base().map_err(|e| e.to_string()));
static P50K: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| tiktoken_rs::p50k_base().map_err(|e| e.to_string()));

/// Encoding provider using tiktoken's bundled BPE tables
#[derive(Debug, Default, Clone, Copy)]
pub struct TiktokenProvider;

impl TiktokenProvider {
    pub fn new() -> Self {
        Self
    }

    /// Table names this provider can resolve
    pub fn tables() -> &'static [&'static str] {
        &[CL100K_BASE, O200K_BASE, P50K_BASE]
    }
}

struct TiktokenEncoder {
    bpe: &'static CoreBPE,
}

impl Encoder for TiktokenEncoder {
    fn encode(&self, text: &str) -> Result<Vec<u32>, EncodingError> {
        Ok(self.bpe.encode_ordinary(text))
    }

    fn decode(&self, tokens: &[u32]) -> Result<String, EncodingError> {
        self.bpe
            .decode(tokens.to_vec())
            .map_err(|e| EncodingError::Decode(e.to_string()))
    }

    fn decode_token(&self, token: u32) -> Result<String, EncodingError> {
        let bytes: Vec<u8> = self.bpe._decode_native_and_split(vec![token]).flatten().collect();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl EncodingProvider for TiktokenProvider {
    fn lookup(&self, table: &str) -> Result<Box<dyn Encoder + '_>, EncodingError> {
        let cached: &'static Result<CoreBPE, String> = match table {
            CL100K_BASE => &*CL100K,
            O200K_BASE => &*O200K,
            P50K_BASE => &*P50K,
            other => return Err(EncodingError::UnknownTable(other.to_string())),
        };

        match cached {
            Ok(bpe) => Ok(Box::new(TiktokenEncoder { bpe })),
            Err(reason) => Err(EncodingError::Unavailable {
                table: table.to_string(),
                reason: reason.clone(),
            }),
        }
    }
}
