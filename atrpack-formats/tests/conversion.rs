//! End-to-end conversions through the codec facade.

use atrpack_core::{Codec, StepperConfig, SteppedMemory, Variant};
use atrpack_formats::{
    CodecKind, FormatError, ImageConversion, IndexedImage, PixelRatio, SapFile, DEFAULT_LABELS,
    select_variant,
};

fn generate_music(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x0BAD_5EED;
    for i in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        // Mostly silence with occasional notes.
        data.push(if i % 7 < 4 { 0 } else { (seed >> 59) as u8 });
    }
    data
}

fn build_sap(blocks: &[(u16, Vec<u8>)]) -> Vec<u8> {
    let mut sap = b"SAP\r\nAUTHOR \"Test\"\r\nTYPE B\r\nINIT 2000\r\nPLAYER 2003\r\n".to_vec();
    for (i, (start, data)) in blocks.iter().enumerate() {
        if i == 0 {
            sap.extend_from_slice(&[0xFF, 0xFF]);
        }
        let end = start + data.len() as u16 - 1;
        sap.extend_from_slice(&start.to_le_bytes());
        sap.extend_from_slice(&end.to_le_bytes());
        sap.extend_from_slice(data);
    }
    sap
}

#[test]
fn test_both_variants_roundtrip() {
    let data = generate_music(6000);
    for variant in Variant::ALL {
        let codec = CodecKind::new(variant, StepperConfig::DEFAULT);
        let packed = codec.compress(&data).unwrap();
        assert!(packed.len() < data.len(), "{variant} did not pack");
        assert_eq!(codec.decompress(&packed, data.len()).unwrap(), data);
    }
}

#[test]
fn test_variants_share_memory_layout() {
    let config = StepperConfig::DEFAULT.with_base(0x4000);
    let data = generate_music(5000);
    let mut images = Vec::new();
    for variant in Variant::ALL {
        let codec = CodecKind::new(variant, config);
        let packed = codec.compress(&data).unwrap();
        let mut memory = SteppedMemory::new(config);
        codec.decode_into(&packed, data.len(), &mut memory).unwrap();
        images.push(memory.into_image());
    }
    assert_eq!(images[0], images[1]);
}

#[test]
fn test_unknown_variant_name() {
    assert!(select_variant("zstd", StepperConfig::DEFAULT).is_err());
}

#[test]
fn test_sap_compress_and_emit() {
    let first = generate_music(300);
    let second = vec![7u8; 40];
    let bytes = build_sap(&[(0x2000, first.clone()), (0x3000, second.clone())]);

    let mut sap = SapFile::parse(&bytes, &DEFAULT_LABELS).unwrap();
    assert_eq!(sap.blocks.len(), 2);
    assert_eq!(sap.blocks[1].start, 0x3000);
    assert_eq!(sap.blocks[1].data, second);

    let codec = select_variant("legacy", StepperConfig::DEFAULT).unwrap();
    let reports = sap.compress_blocks(&codec).unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].original, 300);

    for block in &sap.blocks {
        let packed = block.packed.as_ref().unwrap();
        assert_eq!(codec.decompress(packed, block.data.len()).unwrap(), block.data);
    }

    let mut out = Vec::new();
    sap.write_asm(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("SAP_MUSIC_INIT = $2000\n"));
    assert!(text.contains("SAP_MUSIC_PLAYER = $2003"));
    assert!(text.contains("AUTHOR\t.byte \"Test\""));
    assert!(text.contains("org $3000"));
    assert!(text.contains(".local sap_music_data1 ; start=$3000, end=$3027"));
    assert!(text.contains("; legacy packed, unpacked length 40"));
    assert!(text.contains(".endl ; music compressed data"));

    let mut bin = Vec::new();
    sap.write_bin(&mut bin).unwrap();
    let expected: usize = sap.blocks.iter().map(|b| b.output().len()).sum();
    assert_eq!(bin.len(), expected);
}

#[test]
fn test_sap_raw_bin_matches_blocks() {
    let first = generate_music(100);
    let bytes = build_sap(&[(0x1000, first.clone())]);
    let sap = SapFile::parse(&bytes, &DEFAULT_LABELS).unwrap();
    let mut bin = Vec::new();
    sap.write_bin(&mut bin).unwrap();
    assert_eq!(bin, first);
}

fn encode_gif(width: u16, height: u16, palette: &[u8], pixels: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut buf, width, height, palette).unwrap();
        let frame = gif::Frame::from_indexed_pixels(width, height, pixels, None);
        encoder.write_frame(&frame).unwrap();
    }
    buf
}

#[test]
fn test_gif_to_asm() {
    let palette = [0, 0, 0, 255, 255, 255, 200, 30, 30, 30, 30, 200];
    let pixels: Vec<u8> = (0..16 * 4).map(|i| (i % 4) as u8).collect();
    let gif = encode_gif(16, 4, &palette, &pixels);

    let image = IndexedImage::from_gif(gif.as_slice()).unwrap();
    assert_eq!((image.width, image.height), (16, 4));
    assert_eq!(image.pixels, pixels);
    assert_eq!(image.palette.len(), 4);

    let conv = ImageConversion::new(&image, PixelRatio::Four).unwrap();
    // 0,1,2,3 at 2 bits per pixel.
    assert_eq!(conv.rows[0], vec![0x1B; 4]);
    assert_eq!(conv.colors[0], 0x00);
    assert_eq!(conv.colors[1], 0x0F);

    let mut out = Vec::new();
    conv.write_asm(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains(".local image ; WIDTH=16 HEIGHT=4"));
    assert_eq!(text.matches(".byte $1b,$1b,$1b,$1b").count(), 4);
    assert!(text.contains(".local colors"));
}

#[test]
fn test_gif_compressed_asm() {
    let palette = [0, 0, 0, 255, 255, 255];
    let pixels = vec![0u8; 160 * 32];
    let gif = encode_gif(160, 32, &palette, &pixels);

    let image = IndexedImage::from_gif(gif.as_slice()).unwrap();
    let mut conv = ImageConversion::new(&image, PixelRatio::Eight).unwrap();
    let codec = CodecKind::new(Variant::Alternate, StepperConfig::DEFAULT);
    let report = conv.compress(&codec).unwrap();
    assert_eq!(report.original, 20 * 32);
    assert!(report.packed < report.original);

    let mut out = Vec::new();
    conv.write_asm(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("; alternate packed, unpacked length 640"));
    assert!(text.contains("LENGTH = 640"));
}

#[test]
fn test_gif_bad_input() {
    assert!(matches!(
        IndexedImage::from_gif(&b"not a gif"[..]),
        Err(FormatError::Gif(_))
    ));
}
