//! Destination address stepping for segmented target memory.
//!
//! ANTIC cannot fetch screen data across a 4K boundary, so a display
//! buffer larger than one bank leaves a small hole of address space
//! unused: 102 mode lines of 40 bytes fill 4080 bytes, and the next 16
//! bytes up to the boundary are skipped. Every producer and consumer of a
//! packed stream must agree on where that hole sits, which is what
//! [`AddressStepper`] computes.
//!
//! ```text
//!  base                      base+4080   base+4096
//!  |--- 102 lines x 40 bytes ---|-- gap --|--- remaining lines ---
//! ```

use crate::error::{AtrError, Result};

/// Geometry of the destination buffer, agreed out of band between the
/// packer and the target-side decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StepperConfig {
    /// Address the first decoded byte is written to.
    pub base: u16,
    /// Bytes per output row.
    pub line_bytes: u16,
    /// Rows after which the gap is skipped.
    pub bank_lines: u16,
    /// Size of the skipped region in bytes.
    pub gap_bytes: u16,
}

impl StepperConfig {
    /// ANTIC mode F screen: 40 bytes per line, 102 lines per 4K bank, 16
    /// byte gap, writing from address 0.
    pub const DEFAULT: Self = Self {
        base: 0,
        line_bytes: 40,
        bank_lines: 102,
        gap_bytes: 16,
    };

    /// Create a configuration with the given geometry and a zero base.
    pub fn new(line_bytes: u16, bank_lines: u16, gap_bytes: u16) -> Self {
        Self {
            base: 0,
            line_bytes,
            bank_lines,
            gap_bytes,
        }
    }

    /// Set the base address.
    pub fn with_base(mut self, base: u16) -> Self {
        self.base = base;
        self
    }

    /// Number of bytes written before the gap is skipped.
    pub fn bank_bytes(&self) -> usize {
        self.line_bytes as usize * self.bank_lines as usize
    }

    /// Check that the geometry describes at least one byte per line and
    /// one line per bank.
    pub fn validate(&self) -> Result<()> {
        if self.line_bytes == 0 {
            return Err(AtrError::invalid_config("line_bytes must be non-zero"));
        }
        if self.bank_lines == 0 {
            return Err(AtrError::invalid_config("bank_lines must be non-zero"));
        }
        Ok(())
    }
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Computes successive write addresses for decoded bytes.
///
/// Only the first bank boundary is modelled: once `line` passes
/// `bank_lines` it keeps counting but never matches again.
#[derive(Debug, Clone)]
pub struct AddressStepper {
    config: StepperConfig,
    address: u16,
    column: u16,
    line: u32,
    emitted: usize,
}

impl AddressStepper {
    /// Create a stepper positioned at the configured base address.
    pub fn new(config: StepperConfig) -> Self {
        Self {
            config,
            address: config.base,
            column: 0,
            line: 0,
            emitted: 0,
        }
    }

    /// Return the address the next byte goes to and advance past it.
    ///
    /// Addresses wrap at 64K like the target's 16-bit pointer.
    pub fn emit(&mut self) -> u16 {
        let target = self.address;
        self.address = self.address.wrapping_add(1);
        self.column = self.column.wrapping_add(1);
        self.emitted += 1;

        if self.column == self.config.line_bytes {
            self.column = 0;
            self.line += 1;
            if self.line == u32::from(self.config.bank_lines) {
                self.address = self.address.wrapping_add(self.config.gap_bytes);
            }
        }

        target
    }

    /// Address the next byte will be written to.
    pub fn address(&self) -> u16 {
        self.address
    }

    /// Position within the current row.
    pub fn column(&self) -> u16 {
        self.column
    }

    /// Number of completed rows.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Number of bytes emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// The geometry this stepper was built with.
    pub fn config(&self) -> &StepperConfig {
        &self.config
    }
}
