//! Packed 32-bit ARGB color
//!
//! [`ArgbColor`] stores all four channels in one `u32` laid out as
//! `0xAARRGGBB`. Channel accessors are views over that word, so the packed
//! value and the channels can never disagree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{hue, luma};
use crate::{ColorError, Result};

/// Separators accepted between hex tokens by the parser
const TOKEN_SEPARATORS: [char; 4] = ['-', ';', ',', ':'];

/// An immutable ARGB color, one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ArgbColor(u32);

impl ArgbColor {
    /// All channels zero
    pub const ZERO: ArgbColor = ArgbColor(0);

    /// Fully transparent white (A = 0, all other channels = 255)
    pub const TRANSPARENT: ArgbColor = ArgbColor(0x00FF_FFFF);

    /// Opaque black
    pub const BLACK: ArgbColor = ArgbColor(0xFF00_0000);

    /// Opaque white
    pub const WHITE: ArgbColor = ArgbColor(0xFFFF_FFFF);

    /// Create a color from individual channel values
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Create an opaque color from red, green and blue
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    /// Create a color from a packed `0xAARRGGBB` word
    pub const fn from_packed(argb: u32) -> Self {
        Self(argb)
    }

    /// The packed `0xAARRGGBB` word
    pub const fn packed(self) -> u32 {
        self.0
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Alpha as a fraction in `[0, 1]`
    pub fn sc_a(self) -> f64 {
        self.a() as f64 / 255.0
    }

    /// Red as a fraction in `[0, 1]`
    pub fn sc_r(self) -> f64 {
        self.r() as f64 / 255.0
    }

    /// Green as a fraction in `[0, 1]`
    pub fn sc_g(self) -> f64 {
        self.g() as f64 / 255.0
    }

    /// Blue as a fraction in `[0, 1]`
    pub fn sc_b(self) -> f64 {
        self.b() as f64 / 255.0
    }

    /// Perceptual intensity in `[0, 1]`
    ///
    /// Rec. 601 weighted luma of the color channels, scaled by alpha.
    pub fn intensity(self) -> f64 {
        let luma = luma::RED_WEIGHT * self.r() as f64
            + luma::GREEN_WEIGHT * self.g() as f64
            + luma::BLUE_WEIGHT * self.b() as f64;
        luma * self.a() as f64 / (255.0 * 255.0)
    }

    /// Color with red, green and blue inverted; alpha is kept
    pub const fn invert(self) -> Self {
        Self::from_argb(self.a(), 255 - self.r(), 255 - self.g(), 255 - self.b())
    }

    /// Same color with a new alpha value
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::from_argb(a, self.r(), self.g(), self.b())
    }

    /// Hue in degrees, `[0, 360)`
    pub fn hue(self) -> f64 {
        self.hue_min_max().0
    }

    /// Hue together with the min and max channel fractions
    pub(crate) fn hue_min_max(self) -> (f64, f64, f64) {
        let r = self.sc_r();
        let g = self.sc_g();
        let b = self.sc_b();

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            let h = hue::SECTOR_DEGREES * (g - b) / delta;
            if g < b {
                h + hue::FULL_TURN
            } else {
                h
            }
        } else if max == g {
            hue::SECTOR_DEGREES * (b - r) / delta + 120.0
        } else {
            hue::SECTOR_DEGREES * (r - g) / delta + 240.0
        };

        (hue, min, max)
    }

    /// HTML form `#RRGGBB`; alpha is omitted
    pub fn to_html(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r(), self.g(), self.b())
    }

    /// Format as `#RRGGBB` when `html` is set, `AA-RR-GG-BB` otherwise
    pub fn to_string_with(self, html: bool) -> String {
        if html {
            self.to_html()
        } else {
            self.to_string()
        }
    }

    /// Parse `#RRGGBB`, `#AARRGGBB`, `RR-GG-BB` or `AA-RR-GG-BB`
    ///
    /// Token forms also accept `;`, `,` and `:` as separators. A missing
    /// alpha defaults to 255.
    pub fn parse(input: &str) -> Result<Self> {
        if (input.len() == 7 || input.len() == 9) && input.starts_with('#') {
            return parse_html(input);
        }

        let tokens: Vec<&str> = input.split(&TOKEN_SEPARATORS[..]).collect();
        let (a, rgb) = match tokens.len() {
            4 => (parse_token(input, tokens[0])?, &tokens[1..]),
            3 => (255, &tokens[..]),
            n => {
                return Err(ColorError::format(
                    input,
                    format!("expected 3 or 4 hex tokens, found {}", n),
                ))
            }
        };

        Ok(Self::from_argb(
            a,
            parse_token(input, rgb[0])?,
            parse_token(input, rgb[1])?,
            parse_token(input, rgb[2])?,
        ))
    }
}

fn parse_html(input: &str) -> Result<ArgbColor> {
    let digits = &input[1..];
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::format(input, "non-hex character"));
    }

    let byte_at = |i: usize| -> Result<u8> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|e| ColorError::format(input, e.to_string()))
    };

    let (a, offset) = if digits.len() == 8 {
        (byte_at(0)?, 2)
    } else {
        (255, 0)
    };

    Ok(ArgbColor::from_argb(
        a,
        byte_at(offset)?,
        byte_at(offset + 2)?,
        byte_at(offset + 4)?,
    ))
}

fn parse_token(input: &str, token: &str) -> Result<u8> {
    let token = token.trim();
    if token.is_empty() || token.len() > 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::format(
            input,
            format!("{:?} is not a hex byte", token),
        ));
    }
    u8::from_str_radix(token, 16).map_err(|e| ColorError::format(input, e.to_string()))
}

impl fmt::Display for ArgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}-{:02X}-{:02X}-{:02X}",
            self.a(),
            self.r(),
            self.g(),
            self.b()
        )
    }
}

impl FromStr for ArgbColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<ArgbColor> for String {
    fn from(color: ArgbColor) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for ArgbColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<u32> for ArgbColor {
    fn from(argb: u32) -> Self {
        Self::from_packed(argb)
    }
}

impl From<ArgbColor> for u32 {
    fn from(color: ArgbColor) -> Self {
        color.packed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_construction_from_packed_and_channels() {
        let packed = ArgbColor::from_packed(0x1122_3344);
        assert_eq!(packed.a(), 0x11);
        assert_eq!(packed.r(), 0x22);
        assert_eq!(packed.g(), 0x33);
        assert_eq!(packed.b(), 0x44);

        let channels = ArgbColor::from_argb(0x11, 0x22, 0x33, 0x44);
        assert_eq!(packed, channels);
        assert_eq!(channels.packed(), 0x1122_3344);
    }

    #[test]
    fn test_constants() {
        assert_eq!(ArgbColor::ZERO.packed(), 0);
        assert_eq!(ArgbColor::TRANSPARENT, ArgbColor::from_argb(0, 255, 255, 255));
        assert_eq!(ArgbColor::BLACK, ArgbColor::from_argb(255, 0, 0, 0));
        assert_eq!(ArgbColor::WHITE, ArgbColor::from_argb(255, 255, 255, 255));
        assert_eq!(ArgbColor::default(), ArgbColor::ZERO);
    }

    #[test]
    fn test_hash_follows_packed_value() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ArgbColor::from_packed(0x1122_3344));
        assert!(set.contains(&ArgbColor::from_argb(0x11, 0x22, 0x33, 0x44)));
        assert!(!set.contains(&ArgbColor::from_packed(0x1122_3355)));
    }

    #[test]
    fn test_intensity() {
        assert!((ArgbColor::from_packed(0xFFFF_0000).intensity() - 0.299).abs() < 1e-9);
        assert!((ArgbColor::from_packed(0xFF00_FF00).intensity() - 0.587).abs() < 1e-9);
        assert!((ArgbColor::from_packed(0xFF00_00FF).intensity() - 0.114).abs() < 1e-9);
        assert!((ArgbColor::from_packed(0x80FF_FFFF).intensity() - 0.501_960_7).abs() < 1e-6);
        assert!((ArgbColor::WHITE.intensity() - 1.0).abs() < 1e-12);
        assert_eq!(ArgbColor::ZERO.intensity(), 0.0);
    }

    #[test]
    fn test_invert_and_with_alpha() {
        let color = ArgbColor::from_argb(1, 2, 3, 4);
        assert_eq!(color.invert(), ArgbColor::from_argb(1, 253, 252, 251));
        assert_eq!(color.with_alpha(0), ArgbColor::from_argb(0, 2, 3, 4));
    }

    #[test]
    fn test_hue_of_primaries() {
        assert_eq!(ArgbColor::from_packed(0xFFFF_0000).hue(), 0.0);
        assert_eq!(ArgbColor::from_packed(0xFF00_FF00).hue(), 120.0);
        assert_eq!(ArgbColor::from_packed(0xFF00_00FF).hue(), 240.0);
        // red-max sector with blue above green wraps into [0, 360)
        let magenta_red = ArgbColor::from_rgb(255, 0, 128).hue();
        assert!(magenta_red > 300.0 && magenta_red < 360.0);
    }

    #[test]
    fn test_sc_values() {
        let color = ArgbColor::from_argb(255, 0, 51, 255);
        assert_eq!(color.sc_a(), 1.0);
        assert_eq!(color.sc_r(), 0.0);
        assert!((color.sc_g() - 0.2).abs() < 1e-12);
        assert_eq!(color.sc_b(), 1.0);
    }

    #[test]
    fn test_html_strings() {
        let color = ArgbColor::from_packed(0xFF11_2233);
        assert_eq!(color.to_html(), "#112233");
        assert_eq!(color.to_string_with(true), "#112233");
        assert_eq!(ArgbColor::parse("#112233").unwrap(), color);
        assert_eq!(ArgbColor::parse("#80112233").unwrap(), color.with_alpha(0x80));
    }

    #[test]
    fn test_html_ignores_alpha() {
        let translucent = ArgbColor::from_argb(0x10, 0xAB, 0xCD, 0xEF);
        assert_eq!(translucent.to_html(), "#ABCDEF");
        assert_eq!(ArgbColor::parse(&translucent.to_html()).unwrap().a(), 255);
    }

    #[test]
    fn test_token_strings() {
        let color = ArgbColor::from_argb(0x11, 0x22, 0x33, 0x44);
        assert_eq!(color.to_string(), "11-22-33-44");
        assert_eq!("11-22-33-44".parse::<ArgbColor>().unwrap(), color);
        assert_eq!(ArgbColor::parse("11;22;33;44").unwrap(), color);
        assert_eq!(ArgbColor::parse("11,22,33,44").unwrap(), color);
        assert_eq!(ArgbColor::parse("11:22:33:44").unwrap(), color);
        assert_eq!(
            ArgbColor::parse("22-33-44").unwrap(),
            ArgbColor::from_argb(255, 0x22, 0x33, 0x44)
        );
        assert_eq!(ArgbColor::parse("ff-a-b-c").unwrap(), ArgbColor::from_argb(255, 10, 11, 12));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in ["", "#12", "#1122334", "#GG2233", "11-22", "11-22-33-44-55", "11-22-3G", "111-22-33", "11--33"] {
            match ArgbColor::parse(input) {
                Err(ColorError::Format { input: carried, .. }) => assert_eq!(carried, input),
                other => panic!("Expected format error for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let color = ArgbColor::from_argb(0x11, 0x22, 0x33, 0x44);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"11-22-33-44\"");
        let back: ArgbColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
        assert!(serde_json::from_str::<ArgbColor>("\"nope\"").is_err());
    }

    proptest! {
        #[test]
        fn canonical_string_round_trips(a in any::<u8>(), r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let color = ArgbColor::from_argb(a, r, g, b);
            prop_assert_eq!(ArgbColor::parse(&color.to_string()).unwrap(), color);
            prop_assert_eq!(ArgbColor::parse(&color.to_html()).unwrap(), color.with_alpha(255));
        }
    }
}
