//! LZ4 raw-block packer for Atari 8-bit targets.
//!
//! The alternate variant to the run-length packer: data is padded with
//! the bank gap, then packed as a single LZ4 block (no frame header, no
//! size prefix) by `lz4_flex`. A linear 6502 decoder expands the block
//! straight into screen memory.
//!
//! # Example
//!
//! ```
//! use atrpack_core::{Codec, StepperConfig};
//! use atrpack_lz4::AlternateCodec;
//!
//! let codec = AlternateCodec::new(StepperConfig::DEFAULT);
//! let data = vec![0x11u8; 6000];
//! let packed = codec.compress(&data).unwrap();
//! assert_eq!(codec.decompress(&packed, data.len()).unwrap(), data);
//! ```

#![warn(missing_docs)]

pub mod padding;
pub mod routine;

pub use padding::{pad_for_banks, padded_len, strip_bank_padding};

use atrpack_core::error::{AtrError, Result};
use atrpack_core::{ByteSink, Codec, DecodeRoutine, StepperConfig, Variant, ZeroPage};
use log::debug;
use lz4_flex::block::DecompressError;

/// Upper bound on bytes one packed byte can expand to (a 255 length
/// extension byte).
const MAX_EXPANSION: usize = 255;

/// Pack `data` as one raw LZ4 block. Empty input packs to nothing.
pub fn compress_block(data: &[u8]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }
    lz4_flex::block::compress(data)
}

/// Expand a raw LZ4 block that must produce exactly `expected_len` bytes.
pub fn decompress_block(packed: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    if packed.is_empty() {
        return match expected_len {
            0 => Ok(Vec::new()),
            n => Err(AtrError::truncated(0, n)),
        };
    }
    let reachable = packed
        .len()
        .saturating_mul(MAX_EXPANSION)
        .saturating_add(16);
    if expected_len > reachable {
        return Err(AtrError::truncated(packed.len(), expected_len - reachable));
    }

    let out = lz4_flex::block::decompress(packed, expected_len).map_err(|e| match e {
        DecompressError::ExpectedAnotherByte => AtrError::truncated(packed.len(), 1),
        DecompressError::OutputTooSmall { .. } => {
            AtrError::overrun(packed.len(), expected_len, expected_len.saturating_add(1))
        }
        other => AtrError::corrupted(0, other.to_string()),
    })?;
    if out.len() < expected_len {
        return Err(AtrError::truncated(packed.len(), expected_len - out.len()));
    }
    if out.len() > expected_len {
        return Err(AtrError::overrun(0, expected_len, out.len()));
    }
    Ok(out)
}

/// The LZ4 variant behind the [`Codec`] interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlternateCodec {
    stepper: StepperConfig,
}

impl AlternateCodec {
    /// Create a codec that pads for `stepper`'s bank gap.
    pub fn new(stepper: StepperConfig) -> Self {
        Self { stepper }
    }

    /// Destination geometry.
    pub fn stepper(&self) -> &StepperConfig {
        &self.stepper
    }

    /// Expand `packed` to the padded stream the target routine writes.
    pub fn decompress_padded(&self, packed: &[u8], declared_len: usize) -> Result<Vec<u8>> {
        decompress_block(packed, padded_len(declared_len, &self.stepper))
    }
}

impl Codec for AlternateCodec {
    fn variant(&self) -> Variant {
        Variant::Alternate
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let padded = pad_for_banks(data, &self.stepper);
        let packed = compress_block(&padded);
        debug!(
            "alternate: {} bytes ({} padded) -> {} bytes",
            data.len(),
            padded.len(),
            packed.len()
        );
        Ok(packed)
    }

    /// Pushes the original bytes, without the gap, so a stepped sink
    /// lays them out exactly as it would for the legacy variant.
    fn decode_into(
        &self,
        packed: &[u8],
        declared_len: usize,
        sink: &mut dyn ByteSink,
    ) -> Result<usize> {
        let original = self.decompress(packed, declared_len)?;
        sink.put_slice(&original)?;
        Ok(original.len())
    }

    fn routine(&self, zero_page: &ZeroPage) -> DecodeRoutine {
        routine::routine(zero_page)
    }

    fn decompress(&self, packed: &[u8], declared_len: usize) -> Result<Vec<u8>> {
        let padded = self.decompress_padded(packed, declared_len)?;
        Ok(strip_bank_padding(&padded, declared_len, &self.stepper))
    }
}
