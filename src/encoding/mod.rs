//! @dose
//! purpose: The encoding-provider capability the analysis engine depends on. A provider
//!     resolves an encoding table by name to an Encoder that turns text into token ids
//!     and back. The engine never assumes a specific implementation.
//!
//! when-editing:
//!     - !Table names are opaque strings; providers decide which ones they know
//!     - Encoders are acquired per call and released on drop
//!     - decode is exact; decode_token may substitute U+FFFD for partial characters
//!
//! invariants:
//!     - Every failure is reported as an EncodingError, never a panic
//!
//! flows:
//!     - lookup(table) -> Box<dyn Encoder> -> encode/decode -> drop

mod tiktoken;

use thiserror::Error;

pub use tiktoken::TiktokenProvider;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Unknown encoding table: {0}")]
    UnknownTable(String),
    #[error("Encoding table {table} is unavailable: {reason}")]
    Unavailable { table: String, reason: String },
    #[error("Failed to encode text: {0}")]
    Encode(String),
    #[error("Failed to decode tokens: {0}")]
    Decode(String),
}

/// Text <-> token id conversion for one encoding table
pub trait Encoder {
    fn encode(&self, text: &str) -> Result<Vec<u32>, EncodingError>;

    fn decode(&self, tokens: &[u32]) -> Result<String, EncodingError>;

    /// Text of a single token for display. Encoders whose tokens can split a multi-byte
    /// character override this to decode lossily; unknown ids still fail.
    fn decode_token(&self, token: u32) -> Result<String, EncodingError> {
        self.decode(&[token])
    }
}

/// Source of encoders, looked up by table name
pub trait EncodingProvider: Send + Sync {
    fn lookup(&self, table: &str) -> Result<Box<dyn Encoder + '_>, EncodingError>;
}

impl<P: EncodingProvider + ?Sized> EncodingProvider for &P {
    fn lookup(&self, table: &str) -> Result<Box<dyn Encoder + '_>, EncodingError> {
        (**self).lookup(table)
    }
}
