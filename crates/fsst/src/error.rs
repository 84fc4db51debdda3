//! Error types for symbol table parsing and string decoding.
//!
//! Every failure is reported to the caller. Decoding is deterministic, so
//! retrying with the same input always reproduces the same error.

use thiserror::Error;

/// Errors produced while parsing a symbol table or decoding a batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The serialized symbol table is unusable (wrong version, truncated, too many symbols)
    #[error("malformed symbol table header: {reason}")]
    MalformedHeader { reason: String },

    /// A code stream referenced a code that has no symbol in the table
    #[error("code {code} at position {position} has no symbol in the table")]
    CorruptSymbolCode { code: u8, position: usize },

    /// A code stream ended right after an escape byte
    #[error("escape code at position {position} is missing its literal byte")]
    TruncatedEscape { position: usize },

    /// The decoded bytes are not valid UTF-8
    #[error("decoded string is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },

    /// Batch access outside `[0, len)`
    #[error("index {index} out of range for batch of {len} strings")]
    IndexOutOfRange { index: usize, len: usize },

    /// Attempted write to a read-only batch view
    #[error("batch view is read-only: {operation} is not supported")]
    UnsupportedMutation { operation: &'static str },

    /// The per-string lengths do not add up to the size of the data blob
    #[error("string lengths sum to {expected} bytes but data holds {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedHeader {
            reason: reason.into(),
        }
    }
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
