//! RGB to Atari colour register matching.
//!
//! The Atari palette is modelled as 16 hues by 16 luminances. Hue 0 is
//! grey; the others sit on a colour wheel in YUV-like space. A source
//! colour maps to the register value whose modelled RGB is nearest by
//! squared distance.

use std::f64::consts::PI;
use std::sync::OnceLock;

const MIN_Y: f64 = 0.0;
const MAX_Y: f64 = 224.0;
const COLOR_INTENSITY: f64 = 80.0;
const COLOR_SHIFT: f64 = 40.0;

/// Modelled RGB value of every colour register value.
pub fn palette() -> &'static [[f64; 3]; 256] {
    static PALETTE: OnceLock<[[f64; 3]; 256]> = OnceLock::new();
    PALETTE.get_or_init(build_palette)
}

fn build_palette() -> [[f64; 3]; 256] {
    let mut table = [[0.0; 3]; 256];
    for hue in 0..16 {
        let (r, b) = if hue == 0 {
            (0.0, 0.0)
        } else {
            let angle = PI * (hue as f64 / 7.0 - COLOR_SHIFT * 0.01);
            (
                angle.cos() * COLOR_INTENSITY,
                (angle - PI * (2.0 / 3.0)).cos() * COLOR_INTENSITY,
            )
        };

        for lum in 0..16 {
            let y = (MAX_Y * lum as f64 + MIN_Y * (15 - lum) as f64) / 15.0;
            table[hue * 16 + lum] = [
                (y + r).clamp(0.0, 255.0),
                (y - r - b).clamp(0.0, 255.0),
                (y + b).clamp(0.0, 255.0),
            ];
        }
    }
    table
}

/// Register value closest to `rgb`; ties go to the lowest value.
pub fn nearest_atari_color(rgb: [u8; 3]) -> u8 {
    let [ir, ig, ib] = rgb.map(f64::from);
    let mut best = 0;
    let mut best_distance = f64::MAX;
    for (index, [r, g, b]) in palette().iter().enumerate() {
        let distance = (ir - r).powi(2) + (ig - g).powi(2) + (ib - b).powi(2);
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    best as u8
}

/// Parse a `rrggbb` hex string.
pub fn parse_hex_rgb(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
