//! Routine command implementation.

use atrpack_core::{Codec, TargetConfig, Variant};
use atrpack_formats::CodecKind;
use log::warn;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn cmd_routine(
    variant: Variant,
    output: Option<&Path>,
    target: &TargetConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let codec = CodecKind::new(variant, target.stepper);
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_routine(&codec, target, &mut writer)?;
            writer.flush()?;
            println!("Routine written to {}", path.display());
        }
        None => write_routine(&codec, target, &mut io::stdout().lock())?,
    }
    Ok(())
}

/// Write the decode routine matching `codec` and `target`.
pub fn write_routine<W: Write>(
    codec: &CodecKind,
    target: &TargetConfig,
    writer: &mut W,
) -> io::Result<()> {
    if codec.variant() == Variant::Legacy && !atrpack_rle::routine::supports(&target.stepper) {
        warn!(
            "legacy routine counters are 8-bit; line_bytes {} or bank_lines {} will not fit",
            target.stepper.line_bytes, target.stepper.bank_lines
        );
    }
    let routine = codec.routine(&target.zero_page);
    for line in routine.lines() {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
