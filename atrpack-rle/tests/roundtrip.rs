//! Round-trip and boundary tests for the legacy packer.

use atrpack_core::{AtrError, StepperConfig, SteppedMemory};
use atrpack_rle::{Command, compress, decode_into, decompress, expand, segment};

fn generate_random(size: usize, seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed = seed;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

/// Random data squeezed into a small alphabet with long runs.
fn generate_runs(size: usize, seed: u64) -> Vec<u8> {
    let noise = generate_random(size, seed);
    let mut data = Vec::with_capacity(size);
    let mut i = 0;
    while data.len() < size {
        let value = if noise[i] < 96 { 0 } else { noise[i] % 5 };
        let len = 1 + (noise[(i + 1) % size] as usize) % 200;
        data.extend(std::iter::repeat_n(value, len.min(size - data.len())));
        i = (i + 2) % size;
    }
    data
}

fn generate_screen() -> Vec<u8> {
    // 192 lines of 40 bytes: blank border, gradient band, blank
    let mut data = vec![0u8; 40 * 192];
    for line in 60..130 {
        for col in 0..40 {
            data[line * 40 + col] = ((line + col) / 3) as u8;
        }
    }
    data
}

#[test]
fn test_roundtrip_random() {
    for (size, seed) in [(1, 1), (2, 2), (3, 3), (63, 4), (64, 5), (65, 6), (4096, 7), (20_000, 8)] {
        let data = generate_random(size, seed);
        let packed = compress(&data);
        assert_eq!(decompress(&packed, data.len()).unwrap(), data, "size {size}");
    }
}

#[test]
fn test_roundtrip_runs() {
    for seed in 0..20 {
        let data = generate_runs(3000, seed);
        let packed = compress(&data);
        assert!(packed.len() < data.len());
        assert_eq!(decompress(&packed, data.len()).unwrap(), data, "seed {seed}");
    }
}

#[test]
fn test_roundtrip_every_length_of_zeros() {
    for len in 0..=300 {
        let data = vec![0u8; len];
        let packed = compress(&data);
        // a lone byte is never a run, so it goes out as a literal
        let expected = if len == 1 { 2 } else { len.div_ceil(128) };
        assert_eq!(packed.len(), expected, "len {len}");
        assert_eq!(decompress(&packed, len).unwrap(), data);
    }
}

#[test]
fn test_value_run_count_boundary() {
    assert_eq!(compress(&[9; 64]), vec![0x80, 9]);
    assert_eq!(compress(&[9; 65]), vec![0x80, 9, 0x81, 9]);
}

#[test]
fn test_zero_run_count_boundary() {
    assert_eq!(compress(&[0; 128]), vec![0x00]);
    assert_eq!(compress(&[0; 127]), vec![0x7F]);
}

#[test]
fn test_commands_parse_cleanly() {
    // walking the stream command by command lands exactly on its end
    let data = generate_runs(5000, 99);
    let packed = compress(&data);
    let mut pos = 0;
    let mut produced = 0;
    while pos < packed.len() {
        let command = Command::parse(packed[pos]);
        pos += 1 + command.payload();
        produced += command.count();
    }
    assert_eq!(pos, packed.len());
    assert_eq!(produced, data.len());
}

#[test]
fn test_segment_expand_lossless() {
    let data = generate_runs(2500, 5);
    assert_eq!(expand(&segment(&data)), data);
}

#[test]
fn test_wrong_declared_length() {
    let data = generate_runs(1000, 11);
    let packed = compress(&data);
    assert!(matches!(
        decompress(&packed, data.len() + 1),
        Err(AtrError::TruncatedStream { .. })
    ));
    assert!(matches!(
        decompress(&packed, data.len() - 1),
        Err(AtrError::Overrun { .. })
    ));
}

#[test]
fn test_screen_lands_around_gap() {
    let data = generate_screen();
    let packed = compress(&data);
    let config = StepperConfig::DEFAULT.with_base(0x8000);
    let mut mem = SteppedMemory::new(config);
    let produced = decode_into(&packed, data.len(), &mut mem).unwrap();

    assert_eq!(produced, data.len());
    assert_eq!(mem.slice(0x8000, 4080), &data[..4080]);
    assert_eq!(mem.slice(0x8000 + 4096, data.len() - 4080), &data[4080..]);
}
