//! Error types for atrpack operations.
//!
//! Encoding never fails; every error here comes from decoding a packed
//! stream, from configuration, or from the I/O around them.

use std::io;
use thiserror::Error;

/// The main error type for atrpack codec operations.
#[derive(Debug, Error)]
pub enum AtrError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The packed stream ended before the declared length was produced.
    #[error("Truncated stream at offset {offset}: {needed} more bytes needed")]
    TruncatedStream {
        /// Offset in the packed buffer where input ran out.
        offset: usize,
        /// Number of bytes that were expected but not available.
        needed: usize,
    },

    /// A command would emit more bytes than the declared length.
    #[error("Overrun at offset {offset}: command emits up to {would_emit} bytes, declared length is {declared}")]
    Overrun {
        /// Offset of the offending command byte.
        offset: usize,
        /// Declared (uncompressed) length.
        declared: usize,
        /// Total number of bytes the stream would have produced.
        would_emit: usize,
    },

    /// Codec variant name not recognised.
    #[error("Unknown codec variant: {name}")]
    UnknownVariant {
        /// The name that was requested.
        name: String,
    },

    /// Structurally invalid packed data.
    #[error("Corrupted data at offset {offset}: {message}")]
    Corrupted {
        /// Byte offset where corruption was detected.
        offset: usize,
        /// Description of the corruption.
        message: String,
    },

    /// Rejected stepper or routine configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration problem.
        message: String,
    },
}

/// Result type alias for atrpack operations.
pub type Result<T> = std::result::Result<T, AtrError>;

impl AtrError {
    /// Create a truncated stream error.
    pub fn truncated(offset: usize, needed: usize) -> Self {
        Self::TruncatedStream { offset, needed }
    }

    /// Create an overrun error.
    pub fn overrun(offset: usize, declared: usize, would_emit: usize) -> Self {
        Self::Overrun {
            offset,
            declared,
            would_emit,
        }
    }

    /// Create an unknown variant error.
    pub fn unknown_variant(name: impl Into<String>) -> Self {
        Self::UnknownVariant { name: name.into() }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: usize, message: impl Into<String>) -> Self {
        Self::Corrupted {
            offset,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
