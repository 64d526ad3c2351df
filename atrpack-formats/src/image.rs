//! Indexed GIF to Atari bitmap conversion.
//!
//! Pixels are palette indices. Each output byte holds `ratio` pixels,
//! leftmost in the high bits, so ratio 8 gives 1 bit per pixel (2
//! colours), 4 gives 2 bits (4 colours) and 2 gives 4 bits (16 colours).

use crate::asm::{BYTES_PER_ROW, byte_directive};
use crate::codec::{CompressionReport, compress_report};
use crate::color::nearest_atari_color;
use crate::error::{FormatError, Result};
use atrpack_core::{Codec, Variant};
use log::{debug, warn};
use std::io::{Read, Write};

/// Pixels per output byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelRatio {
    /// 4 bits per pixel.
    Two,
    /// 2 bits per pixel.
    Four,
    /// 1 bit per pixel.
    #[default]
    Eight,
}

impl PixelRatio {
    /// Number of pixels in one byte.
    pub fn pixels_per_byte(&self) -> usize {
        match self {
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    /// Bits used by each pixel.
    pub fn bits_per_pixel(&self) -> u32 {
        8 / self.pixels_per_byte() as u32
    }
}

impl TryFrom<u8> for PixelRatio {
    type Error = FormatError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            other => Err(FormatError::InvalidRatio(other)),
        }
    }
}

/// A palette-indexed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Row-major palette indices.
    pub pixels: Vec<u8>,
    /// RGB palette entries.
    pub palette: Vec<[u8; 3]>,
}

impl IndexedImage {
    /// Decode the first frame of a GIF.
    pub fn from_gif<R: Read>(reader: R) -> Result<Self> {
        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::Indexed);
        let mut decoder = options.read_info(reader)?;
        let global = decoder.global_palette().map(<[u8]>::to_vec);

        let frame = decoder
            .read_next_frame()?
            .ok_or_else(|| FormatError::image("GIF contains no frames"))?;
        let raw_palette = frame
            .palette
            .clone()
            .or(global)
            .ok_or_else(|| FormatError::image("GIF has no palette"))?;

        let image = Self {
            width: frame.width as usize,
            height: frame.height as usize,
            pixels: frame.buffer.to_vec(),
            palette: raw_palette
                .chunks_exact(3)
                .map(|c| [c[0], c[1], c[2]])
                .collect(),
        };
        debug!("image width={}, height={}", image.width, image.height);
        Ok(image)
    }

    /// Pack each row into bytes of `ratio` pixels.
    ///
    /// Trailing pixels that do not fill a whole byte are dropped.
    pub fn pack_rows(&self, ratio: PixelRatio) -> Result<Vec<Vec<u8>>> {
        let per_byte = ratio.pixels_per_byte();
        let bits = ratio.bits_per_pixel();
        let limit = 1u16 << bits;
        if self.width % per_byte != 0 {
            warn!(
                "width {} is not a multiple of {per_byte}, dropping {} pixels per row",
                self.width,
                self.width % per_byte
            );
        }

        let mut rows = Vec::with_capacity(self.height);
        for (y, line) in self.pixels.chunks(self.width.max(1)).take(self.height).enumerate() {
            let mut row = Vec::with_capacity(self.width / per_byte);
            for (hbyte, group) in line.chunks_exact(per_byte).enumerate() {
                let mut value = 0u8;
                for (i, &index) in group.iter().enumerate() {
                    if u16::from(index) >= limit {
                        return Err(FormatError::image(format!(
                            "pixel ({}, {y}) uses colour {index}, only {limit} fit in {bits} bits",
                            hbyte * per_byte + i
                        )));
                    }
                    value = (value << bits) | index;
                }
                row.push(value);
            }
            rows.push(row);
        }
        Ok(rows)
    }

    /// Replace palette entries from index 0 with `colors`, growing the
    /// palette when `colors` is longer.
    pub fn override_palette(&mut self, colors: &[[u8; 3]]) {
        for (index, &rgb) in colors.iter().enumerate() {
            match self.palette.get_mut(index) {
                Some(entry) => *entry = rgb,
                None => self.palette.push(rgb),
            }
        }
    }

    /// Atari colour register values for the palette.
    pub fn atari_colors(&self) -> Vec<u8> {
        self.palette.iter().map(|&rgb| nearest_atari_color(rgb)).collect()
    }
}

/// An image ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConversion {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Packed pixel rows.
    pub rows: Vec<Vec<u8>>,
    /// Colour register values, one per palette entry.
    pub colors: Vec<u8>,
    /// Variant and packed stream when compressed.
    pub packed: Option<(Variant, Vec<u8>)>,
}

impl ImageConversion {
    /// Pack pixels and match colours.
    pub fn new(image: &IndexedImage, ratio: PixelRatio) -> Result<Self> {
        Ok(Self {
            width: image.width,
            height: image.height,
            rows: image.pack_rows(ratio)?,
            colors: image.atari_colors(),
            packed: None,
        })
    }

    /// All rows back to back.
    pub fn flat_data(&self) -> Vec<u8> {
        self.rows.concat()
    }

    /// Pack the flattened rows with `codec`.
    pub fn compress<C: Codec + ?Sized>(&mut self, codec: &C) -> Result<CompressionReport> {
        let (packed, report) = compress_report(codec, &self.flat_data())?;
        self.packed = Some((codec.variant(), packed));
        Ok(report)
    }

    /// Write MADS source: an `image` scope with the bitmap and a
    /// `colors` scope with one register value per palette entry.
    pub fn write_asm<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(
            writer,
            "\t\t.local image ; WIDTH={} HEIGHT={}",
            self.width, self.height
        )?;
        match &self.packed {
            Some((variant, packed)) => {
                let original: usize = self.rows.iter().map(Vec::len).sum();
                writeln!(writer, "\t\t; {variant} packed, unpacked length {original}")?;
                writeln!(writer, "LENGTH = {original}")?;
                for row in packed.chunks(BYTES_PER_ROW) {
                    writeln!(writer, "\t\t{}", byte_directive(row))?;
                }
            }
            None => {
                for row in &self.rows {
                    writeln!(writer, "\t\t{}", byte_directive(row))?;
                }
            }
        }
        writeln!(writer, "\t\t.endl")?;

        writeln!(writer, "\t\t.local colors")?;
        for color in &self.colors {
            writeln!(writer, "\t\t.byte ${color:02x}")?;
        }
        writeln!(writer, "\t\t.endl")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrpack_core::StepperConfig;
    use crate::codec::CodecKind;

    fn checker(width: usize, height: usize) -> IndexedImage {
        let pixels = (0..width * height)
            .map(|i| ((i % width + i / width) % 2) as u8)
            .collect();
        IndexedImage {
            width,
            height,
            pixels,
            palette: vec![[0, 0, 0], [255, 255, 255]],
        }
    }

    #[test]
    fn test_ratio_from_u8() {
        assert_eq!(PixelRatio::try_from(4).unwrap(), PixelRatio::Four);
        assert!(matches!(
            PixelRatio::try_from(3),
            Err(FormatError::InvalidRatio(3))
        ));
        assert_eq!(PixelRatio::Two.bits_per_pixel(), 4);
        assert_eq!(PixelRatio::Eight.bits_per_pixel(), 1);
    }

    #[test]
    fn test_pack_one_bit() {
        let rows = checker(16, 2).pack_rows(PixelRatio::Eight).unwrap();
        assert_eq!(rows, vec![vec![0x55, 0x55], vec![0xAA, 0xAA]]);
    }

    #[test]
    fn test_pack_four_bits() {
        let image = IndexedImage {
            width: 4,
            height: 1,
            pixels: vec![1, 2, 3, 15],
            palette: vec![[0, 0, 0]; 16],
        };
        let rows = image.pack_rows(PixelRatio::Two).unwrap();
        assert_eq!(rows, vec![vec![0x12, 0x3F]]);
    }

    #[test]
    fn test_partial_byte_dropped() {
        let rows = checker(10, 1).pack_rows(PixelRatio::Eight).unwrap();
        assert_eq!(rows, vec![vec![0x55]]);
    }

    #[test]
    fn test_colour_out_of_range() {
        let image = IndexedImage {
            width: 4,
            height: 1,
            pixels: vec![0, 1, 4, 0],
            palette: vec![[0, 0, 0]; 5],
        };
        assert!(matches!(
            image.pack_rows(PixelRatio::Four),
            Err(FormatError::Image { .. })
        ));
    }

    #[test]
    fn test_override_palette() {
        let mut image = checker(8, 1);
        image.override_palette(&[[255, 255, 255], [0, 0, 0], [224, 224, 224]]);
        assert_eq!(image.palette.len(), 3);
        assert_eq!(image.atari_colors(), vec![0x0F, 0x00, 0x0F]);
    }

    #[test]
    fn test_write_raw_asm() {
        let conv = ImageConversion::new(&checker(16, 2), PixelRatio::Eight).unwrap();
        let mut out = Vec::new();
        conv.write_asm(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(".local image ; WIDTH=16 HEIGHT=2"));
        assert!(text.contains(".byte $55,$55"));
        assert!(text.contains(".byte $00\n"));
        assert!(text.contains(".byte $0f\n"));
    }

    #[test]
    fn test_compress_roundtrip() {
        let mut conv = ImageConversion::new(&checker(320, 8), PixelRatio::Eight).unwrap();
        let codec = CodecKind::new(Variant::Legacy, StepperConfig::DEFAULT);
        let report = conv.compress(&codec).unwrap();
        assert_eq!(report.original, 320);
        let (variant, packed) = conv.packed.as_ref().unwrap();
        assert_eq!(*variant, Variant::Legacy);
        assert_eq!(codec.decompress(packed, 320).unwrap(), conv.flat_data());
    }
}
