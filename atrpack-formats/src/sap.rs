//! SAP (Slight Atari Player) music files.
//!
//! A SAP file is a CRLF-separated text header followed by `FF FF` and
//! one or more Atari binary load blocks:
//!
//! ```text
//! SAP\r\n
//! AUTHOR "..."\r\n
//! TYPE B\r\n
//! INIT 1000\r\n
//! PLAYER 1003\r\n
//! FF FF  start_lo start_hi  end_lo end_hi  data[end - start + 1] ...
//! ```
//!
//! Only type B players are supported. Header keys listed as labels
//! (addresses the program needs, such as `INIT` and `PLAYER`) become
//! assembler equates; the rest are kept as text.

use crate::asm::{BYTES_PER_ROW, byte_directive};
use crate::codec::{CompressionReport, compress_report};
use crate::error::{FormatError, Result};
use atrpack_core::{Codec, Variant};
use log::debug;
use std::io::Write;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Header keys turned into equates unless told otherwise.
pub const DEFAULT_LABELS: [&str; 2] = ["INIT", "PLAYER"];

const SIGNATURE: &[u8] = b"SAP";
const BINARY_MARKER: [u8; 2] = [0xFF, 0xFF];

/// One binary load block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicBlock {
    /// Load address of the first byte.
    pub start: u16,
    /// Load address of the last byte.
    pub end: u16,
    /// Block contents.
    pub data: Vec<u8>,
    /// Packed contents, once [`SapFile::compress_blocks`] has run.
    pub packed: Option<Vec<u8>>,
}

impl MusicBlock {
    /// Bytes to emit: packed when available, raw otherwise.
    pub fn output(&self) -> &[u8] {
        self.packed.as_deref().unwrap_or(&self.data)
    }
}

/// A parsed SAP file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SapFile {
    /// Header entries, in file order.
    pub header: Vec<(String, String)>,
    /// Header entries selected as labels, in file order.
    pub labels: Vec<(String, String)>,
    /// Binary blocks, in file order.
    pub blocks: Vec<MusicBlock>,
    /// Variant the blocks were packed with.
    pub variant: Option<Variant>,
}

impl SapFile {
    /// Parse `bytes`, routing header keys found in `labels` to equates.
    pub fn parse<S: AsRef<str>>(bytes: &[u8], labels: &[S]) -> Result<Self> {
        if !bytes.starts_with(SIGNATURE) {
            return Err(FormatError::NotSap {
                found: bytes[..bytes.len().min(3)].to_vec(),
            });
        }
        let marker = bytes
            .windows(2)
            .position(|w| w == BINARY_MARKER)
            .ok_or(FormatError::MissingBinaryMarker)?;
        debug!("binary index: {marker}, total length: {}", bytes.len());

        let labels: Vec<String> = labels.iter().map(|l| l.as_ref().to_uppercase()).collect();
        let mut sap = Self::default();

        let text = String::from_utf8_lossy(&bytes[..marker]);
        for (key, value) in text.lines().filter_map(parse_header_line) {
            if key == "TYPE" && !value.eq_ignore_ascii_case("B") {
                return Err(FormatError::UnsupportedSapType { kind: value });
            }
            debug!("{key}: {value}");
            if labels.contains(&key) {
                sap.labels.push((key, value.to_uppercase()));
            } else {
                sap.header.push((key, value));
            }
        }

        sap.blocks = parse_blocks(bytes, marker + BINARY_MARKER.len())?;
        Ok(sap)
    }

    /// Value of a label, if present.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the blocks carry packed data.
    pub fn is_compressed(&self) -> bool {
        self.variant.is_some()
    }

    /// Pack every block with `codec`.
    pub fn compress_blocks<C: Codec + Sync>(
        &mut self,
        codec: &C,
    ) -> Result<Vec<CompressionReport>> {
        #[cfg(feature = "parallel")]
        let results: Vec<_> = self
            .blocks
            .par_iter()
            .map(|block| compress_report(codec, &block.data))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results: Vec<_> = self
            .blocks
            .iter()
            .map(|block| compress_report(codec, &block.data))
            .collect();

        let mut reports = Vec::with_capacity(results.len());
        for (block, result) in self.blocks.iter_mut().zip(results) {
            let (packed, report) = result?;
            block.packed = Some(packed);
            reports.push(report);
        }
        self.variant = Some(codec.variant());
        Ok(reports)
    }

    /// Write MADS source: label equates, header strings, one local
    /// scope per block.
    pub fn write_asm<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (key, value) in &self.labels {
            writeln!(writer, "SAP_MUSIC_{key} = ${value}")?;
        }
        writeln!(writer, "\n\t.local sap_music_header")?;
        for (key, value) in &self.header {
            writeln!(writer, "{key}\t.byte \"{value}\"")?;
        }
        writeln!(writer, "\t.endl")?;

        let kind = if self.is_compressed() { "compressed" } else { "raw" };
        for (idx, block) in self.blocks.iter().enumerate() {
            writeln!(writer, "\n\torg ${:04x}\n", block.start)?;
            writeln!(
                writer,
                "\t.local sap_music_data{idx} ; start=${:04x}, end=${:04x}",
                block.start, block.end
            )?;
            if let Some(variant) = self.variant {
                writeln!(
                    writer,
                    "\t; {variant} packed, unpacked length {}",
                    block.data.len()
                )?;
            }
            for row in block.output().chunks(BYTES_PER_ROW) {
                writeln!(writer, "\t{}", byte_directive(row))?;
            }
            writeln!(writer, "\t.endl ; music {kind} data")?;
        }
        Ok(())
    }

    /// Write the block contents back to back.
    pub fn write_bin<W: Write>(&self, writer: &mut W) -> Result<()> {
        for block in &self.blocks {
            writer.write_all(block.output())?;
        }
        Ok(())
    }
}

/// Split `KEY value` or `KEY "value"`; lines without a separator after
/// an uppercase key (the signature line, flags) carry no value.
fn parse_header_line(line: &str) -> Option<(String, String)> {
    let key_end = line
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(line.len());
    if key_end == 0 {
        return None;
    }
    let rest = &line[key_end..];
    let mut chars = rest.chars();
    if !chars.next()?.is_whitespace() {
        return None;
    }
    let rest = chars.as_str();
    let rest = rest.strip_prefix('"').unwrap_or(rest);
    let value = rest.split('"').next().unwrap_or_default();
    Some((line[..key_end].to_string(), value.to_string()))
}

fn parse_blocks(bytes: &[u8], mut pos: usize) -> Result<Vec<MusicBlock>> {
    let mut blocks = Vec::new();
    while pos < bytes.len() {
        if bytes[pos..].starts_with(&BINARY_MARKER) {
            pos += BINARY_MARKER.len();
            continue;
        }
        if pos + 4 > bytes.len() {
            return Err(FormatError::invalid_block(pos, "block header cut short"));
        }
        let start = u16::from_le_bytes([bytes[pos], bytes[pos + 1]]);
        let end = u16::from_le_bytes([bytes[pos + 2], bytes[pos + 3]]);
        if end < start {
            return Err(FormatError::invalid_block(
                pos,
                format!("end ${end:04x} precedes start ${start:04x}"),
            ));
        }

        let size = (end - start) as usize + 1;
        let data_start = pos + 4;
        let Some(data) = bytes.get(data_start..data_start + size) else {
            return Err(FormatError::invalid_block(
                pos,
                format!(
                    "{size} bytes declared, {} available",
                    bytes.len() - data_start
                ),
            ));
        };
        debug!("block ${start:04x}-${end:04x}, size ${size:04x}");

        blocks.push(MusicBlock {
            start,
            end,
            data: data.to_vec(),
            packed: None,
        });
        pos = data_start + size;
    }
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sap() -> Vec<u8> {
        let mut sap = Vec::new();
        sap.extend_from_slice(
            b"SAP\r\nAUTHOR \"Someone\"\r\nNAME \"Tune\"\r\nTYPE B\r\nINIT 1000\r\nPLAYER 1003\r\nSTEREO\r\n",
        );
        sap.extend_from_slice(&[0xFF, 0xFF, 0x00, 0x10, 0x07, 0x10]);
        sap.extend_from_slice(&[0, 0, 0, 0, 5, 5, 5, 9]);
        sap
    }

    #[test]
    fn test_header_line() {
        assert_eq!(
            parse_header_line("AUTHOR \"A B\""),
            Some(("AUTHOR".into(), "A B".into()))
        );
        assert_eq!(parse_header_line("INIT 1000"), Some(("INIT".into(), "1000".into())));
        assert_eq!(parse_header_line("STEREO"), None);
        assert_eq!(parse_header_line("SAP"), None);
        assert_eq!(parse_header_line(" leading"), None);
    }

    #[test]
    fn test_parse() {
        let sap = SapFile::parse(&sample_sap(), &DEFAULT_LABELS).unwrap();
        assert_eq!(sap.label("INIT"), Some("1000"));
        assert_eq!(sap.label("PLAYER"), Some("1003"));
        assert_eq!(
            sap.header,
            vec![
                ("AUTHOR".to_string(), "Someone".to_string()),
                ("NAME".to_string(), "Tune".to_string()),
                ("TYPE".to_string(), "B".to_string()),
            ]
        );
        assert_eq!(sap.blocks.len(), 1);
        assert_eq!(sap.blocks[0].start, 0x1000);
        assert_eq!(sap.blocks[0].end, 0x1007);
        assert_eq!(sap.blocks[0].data, vec![0, 0, 0, 0, 5, 5, 5, 9]);
    }

    #[test]
    fn test_not_sap() {
        assert!(matches!(
            SapFile::parse(b"GIF89a", &DEFAULT_LABELS),
            Err(FormatError::NotSap { .. })
        ));
    }

    #[test]
    fn test_missing_marker() {
        assert!(matches!(
            SapFile::parse(b"SAP\r\nTYPE B\r\n", &DEFAULT_LABELS),
            Err(FormatError::MissingBinaryMarker)
        ));
    }

    #[test]
    fn test_unsupported_type() {
        let data = b"SAP\r\nTYPE C\r\n\xFF\xFF";
        assert!(matches!(
            SapFile::parse(data, &DEFAULT_LABELS),
            Err(FormatError::UnsupportedSapType { .. })
        ));
    }

    #[test]
    fn test_truncated_block() {
        let mut data = sample_sap();
        data.truncate(data.len() - 2);
        assert!(matches!(
            SapFile::parse(&data, &DEFAULT_LABELS),
            Err(FormatError::InvalidBlock { .. })
        ));
    }

    #[test]
    fn test_multiple_blocks() {
        let mut data = sample_sap();
        data.extend_from_slice(&[0xFF, 0xFF, 0x00, 0x20, 0x01, 0x20, 0xAA, 0xBB]);
        data.extend_from_slice(&[0x00, 0x30, 0x00, 0x30, 0xCC]);
        let sap = SapFile::parse(&data, &DEFAULT_LABELS).unwrap();
        assert_eq!(sap.blocks.len(), 3);
        assert_eq!(sap.blocks[1].data, vec![0xAA, 0xBB]);
        assert_eq!(sap.blocks[2].start, 0x3000);
        assert_eq!(sap.blocks[2].data, vec![0xCC]);
    }

    #[test]
    fn test_custom_labels() {
        let sap = SapFile::parse(&sample_sap(), &["author"]).unwrap();
        assert_eq!(sap.label("AUTHOR"), Some("SOMEONE"));
        assert!(sap.label("INIT").is_none());
    }
}
