//! Command stream decoder.
//!
//! Host-side reference for the 6502 routine: reads command bytes until
//! the declared length has been produced, pushing bytes into a
//! [`ByteSink`]. Leftover input after that point, or a command that
//! would produce too much, is an overrun.

use crate::command::{Command, ZERO_CHUNK};
use atrpack_core::error::{AtrError, Result};
use atrpack_core::sink::ByteSink;

/// Decode `packed` into a fresh buffer.
pub fn decode(packed: &[u8], declared_len: usize) -> Result<Vec<u8>> {
    // no command yields more than a zero chunk per input byte
    let mut out = Vec::with_capacity(declared_len.min(packed.len().saturating_mul(ZERO_CHUNK)));
    decode_into(packed, declared_len, &mut out)?;
    Ok(out)
}

/// Decode `packed` into `sink`, returning the number of bytes produced.
pub fn decode_into<S: ByteSink + ?Sized>(
    packed: &[u8],
    declared_len: usize,
    sink: &mut S,
) -> Result<usize> {
    let mut decoder = Decoder::new(packed, declared_len);
    decoder.run(sink)?;
    Ok(decoder.emitted)
}

/// Command stream decoder state.
struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
    declared: usize,
    emitted: usize,
}

impl<'a> Decoder<'a> {
    fn new(input: &'a [u8], declared: usize) -> Self {
        Self {
            input,
            pos: 0,
            declared,
            emitted: 0,
        }
    }

    fn run<S: ByteSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        while self.emitted < self.declared {
            let offset = self.pos;
            let command = Command::parse(self.read_byte()?);
            let count = command.count();

            let would_emit = self.emitted.saturating_add(count);
            if would_emit > self.declared {
                return Err(AtrError::overrun(offset, self.declared, would_emit));
            }

            match command {
                Command::Zeros(n) => sink.put_repeated(0, n)?,
                Command::Repeat(n) => {
                    let value = self.read_byte()?;
                    sink.put_repeated(value, n)?;
                }
                Command::Literal(n) => {
                    let literals = self.read_slice(n)?;
                    sink.put_slice(literals)?;
                }
            }
            self.emitted += count;
        }

        if self.pos < self.input.len() {
            let extra = Command::parse(self.input[self.pos]).count();
            return Err(AtrError::overrun(
                self.pos,
                self.declared,
                self.declared.saturating_add(extra),
            ));
        }

        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8> {
        let Some(&byte) = self.input.get(self.pos) else {
            return Err(AtrError::truncated(self.pos, 1));
        };
        self.pos += 1;
        Ok(byte)
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.input.len() - self.pos;
        if len > available {
            return Err(AtrError::truncated(self.pos, len - available));
        }
        let slice = &self.input[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}
