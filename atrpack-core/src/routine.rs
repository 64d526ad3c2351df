//! Target-side decode routine descriptors.
//!
//! Each variant ships a 6502 routine (MADS syntax) that unpacks its
//! stream on the target. The routine communicates through four 16-bit
//! zero-page pointers whose locations are configurable.

use crate::traits::Variant;
use std::fmt::Write;

/// Zero-page locations used by the decode routines.
///
/// Each field is the low byte of a little-endian pointer; the high byte
/// lives at the next address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZeroPage {
    /// Packed source pointer.
    pub src: u8,
    /// Unpacked length counter, or end of packed data.
    pub len: u8,
    /// Destination pointer.
    pub dst: u8,
    /// Scratch pair (column/line counters, match pointer).
    pub tmp: u8,
}

impl ZeroPage {
    /// `$C0`..`$C7`, free on a stock Atari OS.
    pub const DEFAULT: Self = Self {
        src: 0xC0,
        len: 0xC2,
        dst: 0xC4,
        tmp: 0xC6,
    };

    /// Assembler equates binding the pointer names to their addresses.
    pub fn equates(&self) -> String {
        let mut out = String::new();
        for (name, addr, note) in [
            ("SRC", self.src, "packed source address"),
            ("LEN", self.len, "unpacked length or end of packed data"),
            ("DST", self.dst, "destination address"),
            ("TMP", self.tmp, "scratch register"),
        ] {
            let _ = writeln!(out, "ATR_{name}_L = ${addr:02X}\t; {note}");
            let _ = writeln!(out, "ATR_{name}_H = ${:02X}", addr.wrapping_add(1));
            out.push('\n');
        }
        out
    }

    /// All addresses occupied by the four pointers.
    pub fn occupied(&self) -> [u8; 8] {
        [
            self.src,
            self.src.wrapping_add(1),
            self.len,
            self.len.wrapping_add(1),
            self.dst,
            self.dst.wrapping_add(1),
            self.tmp,
            self.tmp.wrapping_add(1),
        ]
    }

    /// Whether any two pointers share a byte.
    pub fn has_overlap(&self) -> bool {
        let occupied = self.occupied();
        occupied
            .iter()
            .enumerate()
            .any(|(i, a)| occupied[i + 1..].contains(a))
    }
}

impl Default for ZeroPage {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A ready-to-assemble decode routine for one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeRoutine {
    /// Variant whose stream this routine understands.
    pub variant: Variant,
    /// Procedure label to `jsr` to.
    pub label: &'static str,
    /// Zero-page pointers the routine expects to be set up.
    pub zero_page: ZeroPage,
    /// Assembly source, including equates.
    pub assembly: String,
}

impl DecodeRoutine {
    /// Source lines of the routine.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.assembly.lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_equates() {
        let eq = ZeroPage::DEFAULT.equates();
        assert!(eq.contains("ATR_SRC_L = $C0"));
        assert!(eq.contains("ATR_SRC_H = $C1"));
        assert!(eq.contains("ATR_TMP_H = $C7"));
    }

    #[test]
    fn test_overlap_detection() {
        assert!(!ZeroPage::DEFAULT.has_overlap());
        let zp = ZeroPage {
            src: 0x80,
            len: 0x81,
            dst: 0x84,
            tmp: 0x86,
        };
        assert!(zp.has_overlap());
    }
}
