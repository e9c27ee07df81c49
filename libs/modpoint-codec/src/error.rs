//! Codec error types
//!
//! Every failure the codec can report, as explicit results. Nothing in this
//! crate panics on bad input; invalid configurations are rejected with the
//! specific variant instead of a best-effort value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Format;
use crate::address::MemoryType;

/// Result type for modpoint-codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Register/value codec errors
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum CodecError {
    /// Address text matches no recognized notation
    #[error("Invalid address: {0:?}")]
    InvalidAddress(String),

    /// Format is structurally incompatible with the data type or memory zone
    #[error("Format {format} is not valid for memory zone {memory_type}")]
    FormatMismatch {
        format: Format,
        memory_type: MemoryType,
    },

    /// Value cannot be represented in the requested format
    #[error("Value {value:?} cannot be rendered as {format}")]
    ValueMismatch { format: Format, value: String },

    /// Register order outside the four legal permutations
    #[error("Invalid register order: {0}")]
    InvalidOrder(String),

    /// Input buffer shorter than the format requires
    #[error("Buffer too short: expected {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },

    /// Text did not fit the declared length and was cut
    #[error("Text truncated to {limit} bytes")]
    Truncation { limit: usize },

    /// Encoding tag the codec cannot satisfy
    #[error("Unsupported string encoding: {0:?}")]
    UnsupportedEncoding(String),
}

// Helper constructors, mirroring the call-site shape used across the codebase
impl CodecError {
    pub fn invalid_address(text: impl Into<String>) -> Self {
        CodecError::InvalidAddress(text.into())
    }

    pub fn invalid_order(order: impl Into<String>) -> Self {
        CodecError::InvalidOrder(order.into())
    }

    pub fn unsupported_encoding(tag: impl Into<String>) -> Self {
        CodecError::UnsupportedEncoding(tag.into())
    }

    pub fn value_mismatch(format: Format, value: impl Into<String>) -> Self {
        CodecError::ValueMismatch {
            format,
            value: value.into(),
        }
    }
}
