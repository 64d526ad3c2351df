//! Run-length command packer for Atari 8-bit targets.
//!
//! Input is split into runs of one repeated byte and runs of differing
//! bytes, and each run is written as one or more command-prefixed groups
//! a small 6502 routine can expand in place.
//!
//! # Features
//!
//! - Zero runs cost a single byte per 128 zeros
//! - Value runs cost two bytes per 64 repeats
//! - Literal runs cost one byte per 64 literals
//! - Host-side decoder that reproduces the target's memory layout
//!
//! # Example
//!
//! ```
//! use atrpack_rle::{compress, decompress};
//!
//! let data = [0, 0, 0, 1, 2, 2, 3, 4, 5, 6, 7, 7, 7, 0, 1, 1];
//! let packed = compress(&data);
//! let unpacked = decompress(&packed, data.len()).unwrap();
//! assert_eq!(unpacked, data);
//! ```

#![warn(missing_docs)]

pub mod command;
mod decode;
mod encode;
pub mod routine;
mod segment;

pub use command::Command;
pub use decode::{decode, decode_into};
pub use encode::{export, pack, packed_len};
pub use segment::{Run, expand, segment};

use atrpack_core::error::Result;
use atrpack_core::{ByteSink, Codec, DecodeRoutine, StepperConfig, Variant, ZeroPage};
use log::{debug, trace};

/// Segment and pack `data`.
pub fn compress(data: &[u8]) -> Vec<u8> {
    let runs = segment(data);
    if log::log_enabled!(log::Level::Trace) {
        for run in &runs {
            trace!("{run:?}");
        }
    }
    let packed = pack(&runs);
    debug!(
        "legacy: {} bytes -> {} runs -> {} bytes",
        data.len(),
        runs.len(),
        packed.len()
    );
    packed
}

/// Expand a packed stream of `declared_len` original bytes.
pub fn decompress(packed: &[u8], declared_len: usize) -> Result<Vec<u8>> {
    decode(packed, declared_len)
}

/// The legacy variant behind the [`Codec`] interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCodec {
    stepper: StepperConfig,
}

impl LegacyCodec {
    /// Create a codec whose decode routine targets `stepper`'s geometry.
    pub fn new(stepper: StepperConfig) -> Self {
        Self { stepper }
    }

    /// Destination geometry.
    pub fn stepper(&self) -> &StepperConfig {
        &self.stepper
    }
}

impl Codec for LegacyCodec {
    fn variant(&self) -> Variant {
        Variant::Legacy
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(compress(data))
    }

    fn decode_into(
        &self,
        packed: &[u8],
        declared_len: usize,
        sink: &mut dyn ByteSink,
    ) -> Result<usize> {
        decode_into(packed, declared_len, sink)
    }

    fn routine(&self, zero_page: &ZeroPage) -> DecodeRoutine {
        routine::routine(zero_page, &self.stepper)
    }

    fn decompress(&self, packed: &[u8], declared_len: usize) -> Result<Vec<u8>> {
        decompress(packed, declared_len)
    }
}
