//! Sapconv command implementation.

use super::routine::write_routine;
use atrpack_core::{TargetConfig, Variant};
use atrpack_formats::{CodecKind, SapFile};
use clap::{Args, ValueEnum};
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Output file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputType {
    /// MADS assembler source
    #[default]
    Asm,
    /// Raw block data
    #[value(alias = "binary")]
    Bin,
}

#[derive(Args, Debug)]
pub struct SapconvArgs {
    /// Source SAP file
    #[arg(short, long)]
    pub source: PathBuf,

    /// Destination file
    #[arg(short, long)]
    pub destination: PathBuf,

    /// Header keys emitted as SAP_MUSIC_ equates
    #[arg(short, long, num_args = 1.., default_values = ["INIT", "PLAYER"])]
    pub labels: Vec<String>,

    /// Output type
    #[arg(short = 't', long = "type", value_enum, default_value = "asm")]
    pub output_type: OutputType,

    /// Pack the music blocks
    #[arg(short, long)]
    pub compress: bool,

    /// Also write the decode routine to this file
    #[arg(short, long, value_name = "FILE")]
    pub uncompress: Option<PathBuf>,

    /// Packer variant (legacy, alternate, lz4)
    #[arg(short = 'm', long = "compressor", default_value = "legacy")]
    pub variant: Variant,

    /// Print header and block details
    #[arg(short = 'e', long = "echo")]
    pub echo: bool,
}

pub fn cmd_sapconv(
    args: &SapconvArgs,
    target: &TargetConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("converting {}", args.source.display());
    let bytes = fs::read(&args.source)?;
    let mut sap = SapFile::parse(&bytes, args.labels.as_slice())?;

    if args.echo {
        println!("Binary data total length: {}", bytes.len());
        for (key, value) in sap.labels.iter().chain(&sap.header) {
            println!("{key}: {value}");
        }
        for block in &sap.blocks {
            println!("Start address: ${:04x}", block.start);
            println!("End address: ${:04x}", block.end);
            println!("Size: ${:04x}", block.data.len());
        }
    }

    let codec = CodecKind::new(args.variant, target.stepper);
    if args.compress {
        for report in sap.compress_blocks(&codec)? {
            if args.echo {
                println!("{report}");
            }
        }
    }

    let mut writer = BufWriter::new(File::create(&args.destination)?);
    match args.output_type {
        OutputType::Asm => sap.write_asm(&mut writer)?,
        OutputType::Bin => sap.write_bin(&mut writer)?,
    }
    writer.flush()?;

    if let Some(path) = &args.uncompress {
        let mut writer = BufWriter::new(File::create(path)?);
        write_routine(&codec, target, &mut writer)?;
        writer.flush()?;
    }
    Ok(())
}
