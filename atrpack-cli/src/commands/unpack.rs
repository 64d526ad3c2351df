//! Unpack command implementation.

use atrpack_core::{Codec, SteppedMemory, TargetConfig, Variant};
use atrpack_formats::CodecKind;
use log::info;
use std::fs;
use std::path::Path;

pub fn cmd_unpack(
    input: &Path,
    output: &Path,
    length: usize,
    variant: Variant,
    memory: bool,
    target: &TargetConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let packed = fs::read(input)?;
    let codec = CodecKind::new(variant, target.stepper);

    if memory {
        let mut image = SteppedMemory::new(target.stepper);
        let written = codec.decode_into(&packed, length, &mut image)?;
        info!(
            "{written} bytes laid out from ${:04x} to ${:04x}",
            target.stepper.base,
            image.end_address()
        );
        fs::write(output, image.into_image())?;
    } else {
        let data = codec.decompress(&packed, length)?;
        fs::write(output, &data)?;
    }

    println!("Unpacked {} -> {} bytes", packed.len(), length);
    Ok(())
}
