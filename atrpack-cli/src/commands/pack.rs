//! Pack command implementation.

use atrpack_core::{TargetConfig, Variant};
use atrpack_formats::{CodecKind, CompressionReport, compress_report};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Machine-readable pack summary.
#[derive(Debug, Serialize)]
struct PackSummary<'a> {
    input: &'a str,
    output: &'a str,
    variant: &'static str,
    size: usize,
    packed: usize,
    ratio: f64,
}

impl<'a> PackSummary<'a> {
    fn new(input: &'a str, output: &'a str, variant: Variant, report: &CompressionReport) -> Self {
        Self {
            input,
            output,
            variant: variant.name(),
            size: report.original,
            packed: report.packed,
            ratio: report.ratio(),
        }
    }
}

pub fn cmd_pack(
    input: &Path,
    output: &Path,
    variant: Variant,
    json: bool,
    target: &TargetConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let codec = CodecKind::new(variant, target.stepper);
    let (packed, report) = compress_report(&codec, &data)?;
    fs::write(output, &packed)?;

    if json {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        let summary = PackSummary::new(&input, &output, variant, &report);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
