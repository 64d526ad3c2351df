//! Target layout from `--config` and command-line overrides.

use atrpack_core::TargetConfig;
use clap::Args;
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// JSON file with `stepper` and `zero_page` settings
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Destination base address ($4000, 0x4000 or 16384)
    #[arg(long, global = true, value_parser = parse_address)]
    pub base: Option<u16>,

    /// Bytes per destination line
    #[arg(long, global = true)]
    pub line_bytes: Option<u16>,

    /// Lines per memory bank
    #[arg(long, global = true)]
    pub bank_lines: Option<u16>,

    /// Bytes skipped after the first bank
    #[arg(long, global = true)]
    pub gap_bytes: Option<u16>,
}

impl TargetArgs {
    /// Load the file (or defaults), apply overrides and validate.
    pub fn resolve(&self) -> Result<TargetConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => {
                let reader = BufReader::new(File::open(path)?);
                serde_json::from_reader(reader)?
            }
            None => TargetConfig::default(),
        };

        if let Some(base) = self.base {
            config.stepper.base = base;
        }
        if let Some(line_bytes) = self.line_bytes {
            config.stepper.line_bytes = line_bytes;
        }
        if let Some(bank_lines) = self.bank_lines {
            config.stepper.bank_lines = bank_lines;
        }
        if let Some(gap_bytes) = self.gap_bytes {
            config.stepper.gap_bytes = gap_bytes;
        }

        config.validate()?;
        debug!("target: {config:?}");
        Ok(config)
    }
}

/// Parse an address written as `$hex`, `0xhex` or decimal.
pub fn parse_address(s: &str) -> Result<u16, String> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix('$') {
        u16::from_str_radix(hex, 16)
    } else if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|e| format!("invalid address '{s}': {e}"))
}
