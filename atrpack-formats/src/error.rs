//! Format-level error types.

use atrpack_core::AtrError;
use thiserror::Error;

/// Errors raised while reading or writing Atari asset formats.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Codec, configuration or I/O failure.
    #[error(transparent)]
    Codec(#[from] AtrError),

    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input does not start with the SAP signature.
    #[error("Not a SAP file: expected \"SAP\" signature, found {found:02x?}")]
    NotSap {
        /// First bytes of the input.
        found: Vec<u8>,
    },

    /// SAP player type other than B.
    #[error("SAP type {kind} is not supported (only B)")]
    UnsupportedSapType {
        /// The TYPE value from the header.
        kind: String,
    },

    /// No `FF FF` marker separating header and binary data.
    #[error("SAP binary marker FF FF not found")]
    MissingBinaryMarker,

    /// A binary block header or body is malformed or runs past the end.
    #[error("Invalid SAP block at offset {offset}: {message}")]
    InvalidBlock {
        /// Offset of the block header.
        offset: usize,
        /// What was missing.
        message: String,
    },

    /// GIF decoding failure.
    #[error("GIF error: {0}")]
    Gif(#[from] gif::DecodingError),

    /// Image content the converter cannot represent.
    #[error("Image error: {message}")]
    Image {
        /// Description of the problem.
        message: String,
    },

    /// Pixel packing ratio other than 2, 4 or 8.
    #[error("Invalid pixel ratio {0} (must be 2, 4 or 8)")]
    InvalidRatio(u8),
}

/// Result type for format operations.
pub type Result<T> = std::result::Result<T, FormatError>;

impl FormatError {
    /// Create an invalid block error.
    pub fn invalid_block(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidBlock {
            offset,
            message: message.into(),
        }
    }

    /// Create an image error.
    pub fn image(message: impl Into<String>) -> Self {
        Self::Image {
            message: message.into(),
        }
    }
}
