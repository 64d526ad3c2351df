//! Imgconv command implementation.

use atrpack_core::{TargetConfig, Variant};
use atrpack_formats::color::parse_hex_rgb;
use atrpack_formats::{CodecKind, ImageConversion, IndexedImage, PixelRatio};
use clap::Args;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ImgconvArgs {
    /// Source GIF file (indexed colours)
    pub source: PathBuf,

    /// Destination assembler file
    pub destination: PathBuf,

    /// Pack the image data
    #[arg(short = 'z', long)]
    pub compress: bool,

    /// Pixels per byte (8, 4 or 2)
    #[arg(short, long, default_value = "8", value_parser = parse_ratio)]
    pub ratio: PixelRatio,

    /// Packer variant (legacy, alternate, lz4)
    #[arg(short = 'm', long = "compressor", default_value = "legacy")]
    pub variant: Variant,

    /// Replace palette entries from index 0 (rrggbb,rrggbb,...)
    #[arg(short, long, value_delimiter = ',', value_parser = parse_color)]
    pub palette: Vec<[u8; 3]>,
}

fn parse_color(s: &str) -> Result<[u8; 3], String> {
    parse_hex_rgb(s).ok_or_else(|| format!("'{s}' is not an rrggbb colour"))
}

fn parse_ratio(s: &str) -> Result<PixelRatio, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number (expected 8, 4 or 2)"))?;
    PixelRatio::try_from(value).map_err(|e| e.to_string())
}

pub fn cmd_imgconv(
    args: &ImgconvArgs,
    target: &TargetConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("converting {}", args.source.display());
    let reader = BufReader::new(File::open(&args.source)?);
    let mut image = IndexedImage::from_gif(reader)?;
    if !args.palette.is_empty() {
        debug!("overriding {} palette entries", args.palette.len());
        image.override_palette(&args.palette);
    }
    let mut conversion = ImageConversion::new(&image, args.ratio)?;
    debug!("size before: {}", conversion.flat_data().len());

    if args.compress {
        let codec = CodecKind::new(args.variant, target.stepper);
        let report = conversion.compress(&codec)?;
        debug!("size after: {}", report.packed);
    }

    let mut writer = BufWriter::new(File::create(&args.destination)?);
    conversion.write_asm(&mut writer)?;
    writer.flush()?;
    Ok(())
}
