//! atrpack CLI - Atari data packer
//!
//! Converts SAP music and GIF images into 6502 assembler data, packs and
//! unpacks raw files, and writes the matching target-side decode routines.

mod commands;
mod config;

use atrpack_core::{TargetConfig, Variant};
use clap::{Parser, Subcommand};
use commands::{
    ImgconvArgs, SapconvArgs, cmd_imgconv, cmd_pack, cmd_routine, cmd_sapconv, cmd_unpack,
};
use config::TargetArgs;
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "atrpack")]
#[command(author, version, about = "Atari development data packer")]
#[command(long_about = "
atrpack packs data for 8-bit Atari programs and writes the 6502 routines
that unpack it in place.

Examples:
  atrpack sapconv -s tune.sap -d tune.asm -c -u unpack.asm
  atrpack sapconv -s tune.sap -d tune.bin -t bin -c -m lz4
  atrpack imgconv logo.gif logo.asm -r 4 -z
  atrpack pack screen.raw screen.pck
  atrpack unpack screen.pck screen.raw --length 7680
  atrpack routine -m alternate -o unlz4.asm
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    target: TargetArgs,

    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a SAP music file to assembler or binary data
    Sapconv(SapconvArgs),

    /// Convert an indexed GIF image to assembler data
    Imgconv(ImgconvArgs),

    /// Pack a raw file
    Pack {
        /// File to pack
        input: PathBuf,

        /// Packed output file
        output: PathBuf,

        /// Packer variant (legacy, alternate, lz4)
        #[arg(short = 'm', long = "compressor", default_value = "legacy")]
        variant: Variant,

        /// Print the size report as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Unpack a packed file
    Unpack {
        /// Packed file
        input: PathBuf,

        /// Unpacked output file
        output: PathBuf,

        /// Unpacked length in bytes
        #[arg(short = 'n', long)]
        length: usize,

        /// Packer variant (legacy, alternate, lz4)
        #[arg(short = 'm', long = "compressor", default_value = "legacy")]
        variant: Variant,

        /// Write the whole 64 KiB target memory laid out by the stepper
        #[arg(long)]
        memory: bool,
    },

    /// Write the 6502 decode routine for a variant
    Routine {
        /// Packer variant (legacy, alternate, lz4)
        #[arg(short = 'm', long = "compressor", default_value = "legacy")]
        variant: Variant,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    builder.parse_default_env();
    builder.format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    let _ = builder.try_init();
}

fn run(command: Commands, target: &TargetConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Sapconv(args) => cmd_sapconv(&args, target),
        Commands::Imgconv(args) => cmd_imgconv(&args, target),
        Commands::Pack {
            input,
            output,
            variant,
            json,
        } => cmd_pack(&input, &output, variant, json, target),
        Commands::Unpack {
            input,
            output,
            length,
            variant,
            memory,
        } => cmd_unpack(&input, &output, length, variant, memory, target),
        Commands::Routine { variant, output } => cmd_routine(variant, output.as_deref(), target),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = cli
        .target
        .resolve()
        .and_then(|target| run(cli.command, &target));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
