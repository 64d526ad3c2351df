//! # atrpack formats
//!
//! Turns Atari assets into data a 6502 program can include, optionally
//! packed with one of the atrpack codecs:
//!
//! - **SAP**: type B music files, emitted as MADS source or raw blocks
//! - **GIF**: indexed images packed 2, 4 or 8 pixels per byte, with the
//!   palette matched to Atari colour registers
//!
//! Codecs are chosen by name through [`select_variant`], which returns a
//! [`CodecKind`] usable wherever a [`Codec`](atrpack_core::Codec) is.
//!
//! ## Example
//!
//! ```rust
//! use atrpack_core::{Codec, StepperConfig};
//! use atrpack_formats::select_variant;
//!
//! let codec = select_variant("legacy", StepperConfig::DEFAULT).unwrap();
//! let data = vec![0u8; 1000];
//! let packed = codec.compress(&data).unwrap();
//! assert_eq!(codec.decompress(&packed, data.len()).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod asm;
pub mod codec;
pub mod color;
pub mod error;
pub mod image;
pub mod sap;

// Re-exports
pub use codec::{CodecKind, CompressionReport, compress_report, select_variant};
pub use color::nearest_atari_color;
pub use error::{FormatError, Result};
pub use image::{ImageConversion, IndexedImage, PixelRatio};
pub use sap::{MusicBlock, SapFile, DEFAULT_LABELS};
