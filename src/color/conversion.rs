//! Color space conversion utilities
//!
//! Provides the pure conversion math between the color types:
//! - ARGB to HSV and back (6-sector model)
//! - ARGB to HSL and back
//! - Source-over alpha compositing in un-premultiplied space
//! - Interop with `palette` sRGB types
//!
//! Every float-to-byte conversion rounds half up (`byte(x + 0.5)`), not to
//! even, so byte outputs are reproducible across platforms.

use palette::Srgba;

use super::{ArgbColor, HslColor, HsvColor};
use crate::constants::hue;

/// Convert ARGB to HSV; alpha is ignored
pub fn argb_to_hsv(color: ArgbColor) -> HsvColor {
    let (h, min, max) = color.hue_min_max();
    let s = if max == 0.0 { 0.0 } else { 1.0 - min / max };
    HsvColor::new_unchecked(h, s, max)
}

/// Convert HSV to ARGB with the given alpha
///
/// # Arguments
///
/// * `alpha` - Alpha channel of the result
/// * `hsv` - Source color; a hue of exactly 360 is treated as 0
pub fn hsv_to_argb(alpha: u8, hsv: HsvColor) -> ArgbColor {
    let h = hsv.h() % hue::FULL_TURN;
    let s = hsv.s();
    let v = hsv.v();

    let sector_pos = h / hue::SECTOR_DEGREES;
    let sector = sector_pos.floor() as usize % 6;
    let f = sector_pos - sector_pos.floor();

    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    ArgbColor::from_argb(alpha, unit_to_byte(r), unit_to_byte(g), unit_to_byte(b))
}

/// Convert ARGB to HSL; alpha is ignored
pub fn argb_to_hsl(color: ArgbColor) -> HslColor {
    let (h, min, max) = color.hue_min_max();
    let l = (max + min) / 2.0;

    let s = if l == 0.0 || max == min {
        0.0
    } else if l <= 0.5 {
        (max - min) / (max + min)
    } else {
        (max - min) / (2.0 - (max + min))
    };

    HslColor::new_unchecked(h, s.clamp(0.0, 1.0), l)
}

/// Convert HSL to ARGB with the given alpha
pub fn hsl_to_argb(alpha: u8, hsl: HslColor) -> ArgbColor {
    let h = hsl.h() % hue::FULL_TURN;
    let l = hsl.l();

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * hsl.s();
    let sector_pos = h / hue::SECTOR_DEGREES;
    let x = chroma * (1.0 - (sector_pos % 2.0 - 1.0).abs());
    let m = l - chroma / 2.0;

    let (r, g, b) = match sector_pos.floor() as usize % 6 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    ArgbColor::from_argb(
        alpha,
        unit_to_byte(r + m),
        unit_to_byte(g + m),
        unit_to_byte(b + m),
    )
}

/// Paint `upper` over `lower` ("source-over")
///
/// Works on un-premultiplied channels. An opaque `upper` yields `upper`; a
/// fully transparent `upper` yields `lower` unchanged.
pub fn alpha_composite(lower: ArgbColor, upper: ArgbColor) -> ArgbColor {
    if upper.a() == 0 {
        return lower;
    }

    let lower_a = lower.sc_a();
    let upper_a = upper.sc_a();
    let inverse_upper_a = 1.0 - upper_a;
    let a = lower_a + (1.0 - lower_a) * upper_a;

    let blend = |upper_c: u8, lower_c: u8| {
        clamp_round((upper_c as f64 * upper_a + lower_c as f64 * lower_a * inverse_upper_a) / a)
    };

    ArgbColor::from_argb(
        clamp_round(255.0 * a),
        blend(upper.r(), lower.r()),
        blend(upper.g(), lower.g()),
        blend(upper.b(), lower.b()),
    )
}

/// Clamp to `[0, 255]` and round half up
pub fn clamp_round(value: f64) -> u8 {
    (value.clamp(0.0, 255.0) + 0.5) as u8
}

fn unit_to_byte(component: f64) -> u8 {
    clamp_round(component * 255.0)
}

impl From<ArgbColor> for Srgba<u8> {
    fn from(color: ArgbColor) -> Self {
        Srgba::new(color.r(), color.g(), color.b(), color.a())
    }
}

impl From<Srgba<u8>> for ArgbColor {
    fn from(color: Srgba<u8>) -> Self {
        ArgbColor::from_argb(color.alpha, color.color.red, color.color.green, color.color.blue)
    }
}
