//! Core traits shared by the packers.
//!
//! Both codecs expose the same surface so tools can pick one by name and
//! never look at which concrete type they hold. The variant is not
//! recorded in the packed stream; callers carry it alongside the data.

use crate::error::{AtrError, Result};
use crate::routine::{DecodeRoutine, ZeroPage};
use crate::sink::ByteSink;
use std::fmt;
use std::str::FromStr;

/// Packing algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    /// Run-length command bytes (zero runs, value repeats, literals).
    #[default]
    Legacy,
    /// LZ4 raw blocks over bank-padded data.
    Alternate,
}

impl Variant {
    /// All variants, in selection order.
    pub const ALL: [Variant; 2] = [Variant::Legacy, Variant::Alternate];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Alternate => "alternate",
        }
    }
}

impl FromStr for Variant {
    type Err = AtrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "alternate" | "lz4" => Ok(Self::Alternate),
            _ => Err(AtrError::unknown_variant(s)),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A complete pack/unpack pair for one variant.
pub trait Codec {
    /// Which variant this codec implements.
    fn variant(&self) -> Variant;

    /// Pack `data` into the variant's wire format.
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decode `packed` into `sink`, stopping after `declared_len` bytes of
    /// original data.
    ///
    /// Returns the number of bytes pushed into the sink, which may exceed
    /// `declared_len` when the stream carries layout padding.
    fn decode_into(
        &self,
        packed: &[u8],
        declared_len: usize,
        sink: &mut dyn ByteSink,
    ) -> Result<usize>;

    /// The target-side decode routine matching this variant.
    fn routine(&self, zero_page: &ZeroPage) -> DecodeRoutine;

    /// Recover the original bytes from `packed`.
    fn decompress(&self, packed: &[u8], declared_len: usize) -> Result<Vec<u8>>;
}
