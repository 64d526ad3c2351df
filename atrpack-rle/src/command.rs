//! Command byte layout.
//!
//! ```text
//! 0000_0000            128 zeros
//! 0nnn_nnnn            n zeros (1-127)
//! 10nn_nnnn  v         v repeated n times (0 means 64)
//! 11nn_nnnn  b1..bn    n literal bytes (0 means 64)
//! ```

/// Zeros covered by one full zero-run command.
pub const ZERO_CHUNK: usize = 128;

/// Repeats covered by one full value-run command.
pub const VALUE_CHUNK: usize = 64;

/// Literals carried by one full literal command.
pub const LITERAL_CHUNK: usize = 64;

/// Zero-run command tag.
pub const CMD_ZEROS: u8 = 0b0000_0000;

/// Value-run command tag.
pub const CMD_REPEAT: u8 = 0b1000_0000;

/// Literal-run command tag.
pub const CMD_LITERAL: u8 = 0b1100_0000;

const COUNT_MASK: u8 = 0b0011_1111;

/// A decoded command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Emit `n` zeros.
    Zeros(usize),
    /// Emit the following byte `n` times.
    Repeat(usize),
    /// Copy the following `n` bytes.
    Literal(usize),
}

impl Command {
    /// Interpret a command byte.
    pub fn parse(byte: u8) -> Self {
        if byte == 0 {
            return Self::Zeros(ZERO_CHUNK);
        }
        if byte & 0x80 == 0 {
            return Self::Zeros(byte as usize);
        }

        let count = match (byte & COUNT_MASK) as usize {
            0 => VALUE_CHUNK,
            n => n,
        };
        if byte & 0x40 != 0 {
            Self::Literal(count)
        } else {
            Self::Repeat(count)
        }
    }

    /// Number of bytes this command produces.
    pub fn count(&self) -> usize {
        match *self {
            Self::Zeros(n) | Self::Repeat(n) | Self::Literal(n) => n,
        }
    }

    /// Number of payload bytes following the command byte.
    pub fn payload(&self) -> usize {
        match *self {
            Self::Zeros(_) => 0,
            Self::Repeat(_) => 1,
            Self::Literal(n) => n,
        }
    }
}
