//! Codec selection by name.
//!
//! Tools hold a [`CodecKind`] and talk to it through [`Codec`]; which
//! packer sits behind it is decided once, from the variant name.

use atrpack_core::error::Result;
use atrpack_core::{ByteSink, Codec, DecodeRoutine, StepperConfig, Variant, ZeroPage};
use atrpack_lz4::AlternateCodec;
use atrpack_rle::LegacyCodec;
use log::info;
use std::fmt;

/// One of the available codecs.
#[derive(Debug, Clone, Copy)]
pub enum CodecKind {
    /// Run-length command packer.
    Legacy(LegacyCodec),
    /// LZ4 block packer.
    Alternate(AlternateCodec),
}

impl CodecKind {
    /// Build the codec for `variant` targeting `stepper`'s geometry.
    pub fn new(variant: Variant, stepper: StepperConfig) -> Self {
        match variant {
            Variant::Legacy => Self::Legacy(LegacyCodec::new(stepper)),
            Variant::Alternate => Self::Alternate(AlternateCodec::new(stepper)),
        }
    }
}

/// Build the codec named `name` (case-insensitive).
pub fn select_variant(name: &str, stepper: StepperConfig) -> Result<CodecKind> {
    let variant: Variant = name.parse()?;
    Ok(CodecKind::new(variant, stepper))
}

impl Codec for CodecKind {
    fn variant(&self) -> Variant {
        match self {
            Self::Legacy(c) => c.variant(),
            Self::Alternate(c) => c.variant(),
        }
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Legacy(c) => c.compress(data),
            Self::Alternate(c) => c.compress(data),
        }
    }

    fn decode_into(
        &self,
        packed: &[u8],
        declared_len: usize,
        sink: &mut dyn ByteSink,
    ) -> Result<usize> {
        match self {
            Self::Legacy(c) => c.decode_into(packed, declared_len, sink),
            Self::Alternate(c) => c.decode_into(packed, declared_len, sink),
        }
    }

    fn routine(&self, zero_page: &ZeroPage) -> DecodeRoutine {
        match self {
            Self::Legacy(c) => c.routine(zero_page),
            Self::Alternate(c) => c.routine(zero_page),
        }
    }

    fn decompress(&self, packed: &[u8], declared_len: usize) -> Result<Vec<u8>> {
        match self {
            Self::Legacy(c) => c.decompress(packed, declared_len),
            Self::Alternate(c) => c.decompress(packed, declared_len),
        }
    }
}

/// Sizes before and after packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionReport {
    /// Unpacked size in bytes.
    pub original: usize,
    /// Packed size in bytes.
    pub packed: usize,
}

impl CompressionReport {
    /// Packed size relative to the original (0.0 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.original == 0 {
            0.0
        } else {
            self.packed as f64 / self.original as f64
        }
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Size: {} Packed: {} Ratio: {:.2}",
            self.original,
            self.packed,
            self.ratio()
        )
    }
}

/// Pack `data` and report the sizes.
pub fn compress_report<C: Codec + ?Sized>(
    codec: &C,
    data: &[u8],
) -> Result<(Vec<u8>, CompressionReport)> {
    let packed = codec.compress(data)?;
    let report = CompressionReport {
        original: data.len(),
        packed: packed.len(),
    };
    info!("{} {report}", codec.variant());
    Ok((packed, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrpack_core::AtrError;

    #[test]
    fn test_select_by_name() {
        let codec = select_variant("Legacy", StepperConfig::DEFAULT).unwrap();
        assert_eq!(codec.variant(), Variant::Legacy);
        let codec = select_variant("LZ4", StepperConfig::DEFAULT).unwrap();
        assert_eq!(codec.variant(), Variant::Alternate);
        assert!(matches!(
            select_variant("zip", StepperConfig::DEFAULT),
            Err(AtrError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn test_report() {
        let codec = CodecKind::new(Variant::Legacy, StepperConfig::DEFAULT);
        let (packed, report) = compress_report(&codec, &[0u8; 256]).unwrap();
        assert_eq!(packed, vec![0, 0]);
        assert_eq!(report.original, 256);
        assert_eq!(report.packed, 2);
        assert_eq!(report.to_string(), "Size: 256 Packed: 2 Ratio: 0.01");
    }

    #[test]
    fn test_empty_ratio() {
        let report = CompressionReport {
            original: 0,
            packed: 0,
        };
        assert_eq!(report.ratio(), 0.0);
    }
}
