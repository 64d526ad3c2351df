//! Destinations for decoded bytes.
//!
//! A decoder pushes every byte it produces into a [`ByteSink`]. Plain
//! expansion collects into a `Vec<u8>`; [`SteppedMemory`] reproduces what
//! the target would hold after running the decode routine, placing each
//! byte where an [`AddressStepper`] says it lands.

use crate::error::Result;
use crate::stepper::{AddressStepper, StepperConfig};

/// Size of the target's address space.
pub const TARGET_MEMORY_SIZE: usize = 0x1_0000;

/// Receives decoded bytes one at a time, in stream order.
pub trait ByteSink {
    /// Store one decoded byte.
    fn put(&mut self, byte: u8) -> Result<()>;

    /// Store `count` copies of `byte`.
    fn put_repeated(&mut self, byte: u8, count: usize) -> Result<()> {
        for _ in 0..count {
            self.put(byte)?;
        }
        Ok(())
    }

    /// Store a run of literal bytes.
    fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.put(byte)?;
        }
        Ok(())
    }
}

impl ByteSink for Vec<u8> {
    fn put(&mut self, byte: u8) -> Result<()> {
        self.push(byte);
        Ok(())
    }

    fn put_repeated(&mut self, byte: u8, count: usize) -> Result<()> {
        self.resize(self.len() + count, byte);
        Ok(())
    }

    fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// A 64K target memory image written through an [`AddressStepper`].
#[derive(Debug, Clone)]
pub struct SteppedMemory {
    memory: Vec<u8>,
    stepper: AddressStepper,
}

impl SteppedMemory {
    /// Create a zero-filled memory image.
    pub fn new(config: StepperConfig) -> Self {
        Self {
            memory: vec![0; TARGET_MEMORY_SIZE],
            stepper: AddressStepper::new(config),
        }
    }

    /// Create a memory image that writes bytes linearly from `base`.
    ///
    /// Used for streams that already carry their gap padding.
    pub fn linear(base: u16) -> Self {
        let config = StepperConfig {
            base,
            line_bytes: u16::MAX,
            bank_lines: u16::MAX,
            gap_bytes: 0,
        };
        Self::new(config)
    }

    /// Number of bytes written so far.
    pub fn written(&self) -> usize {
        self.stepper.emitted()
    }

    /// Address the next byte would be written to.
    pub fn end_address(&self) -> u16 {
        self.stepper.address()
    }

    /// The stepper driving this image.
    pub fn stepper(&self) -> &AddressStepper {
        &self.stepper
    }

    /// View `len` bytes of the image starting at `start`.
    ///
    /// The range is clamped to the end of the address space.
    pub fn slice(&self, start: u16, len: usize) -> &[u8] {
        let start = start as usize;
        let end = (start + len).min(TARGET_MEMORY_SIZE);
        &self.memory[start..end]
    }

    /// Consume the sink and return the whole 64K image.
    pub fn into_image(self) -> Vec<u8> {
        self.memory
    }
}

impl ByteSink for SteppedMemory {
    fn put(&mut self, byte: u8) -> Result<()> {
        let address = self.stepper.emit();
        self.memory[address as usize] = byte;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink() {
        let mut out = Vec::new();
        out.put(1).unwrap();
        out.put_repeated(7, 3).unwrap();
        out.put_slice(&[9, 8]).unwrap();
        assert_eq!(out, vec![1, 7, 7, 7, 9, 8]);
    }

    #[test]
    fn test_stepped_memory_leaves_gap() {
        let config = StepperConfig::new(4, 2, 4).with_base(0x100);
        let mut mem = SteppedMemory::new(config);
        mem.put_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).unwrap();

        assert_eq!(mem.slice(0x100, 8), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(mem.slice(0x108, 4), &[0, 0, 0, 0]);
        assert_eq!(mem.slice(0x10C, 2), &[9, 10]);
        assert_eq!(mem.written(), 10);
        assert_eq!(mem.end_address(), 0x10E);
    }

    #[test]
    fn test_linear_memory() {
        let mut mem = SteppedMemory::linear(0x4000);
        mem.put_repeated(0xAA, 5000).unwrap();
        assert_eq!(mem.end_address(), 0x4000 + 5000);
        assert!(mem.slice(0x4000, 5000).iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_slice_clamped() {
        let mem = SteppedMemory::linear(0);
        assert_eq!(mem.slice(0xFFF0, 100).len(), 16);
    }
}
