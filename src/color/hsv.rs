//! Hue-saturation-value color

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{conversion, ArgbColor};
use crate::constants::hue;
use crate::{ColorError, Result};

/// An immutable HSV color
///
/// Hue is in degrees `[0, 360]`, saturation and value are fractions in
/// `[0, 1]`. Construction rejects anything outside those ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHsv")]
pub struct HsvColor {
    h: f64,
    s: f64,
    v: f64,
}

#[derive(Deserialize)]
struct RawHsv {
    h: f64,
    s: f64,
    v: f64,
}

impl TryFrom<RawHsv> for HsvColor {
    type Error = ColorError;

    fn try_from(raw: RawHsv) -> Result<Self> {
        Self::new(raw.h, raw.s, raw.v)
    }
}

impl HsvColor {
    /// Create an HSV color, validating every component
    pub fn new(h: f64, s: f64, v: f64) -> Result<Self> {
        if !(0.0..=hue::FULL_TURN).contains(&h) {
            return Err(ColorError::invalid_argument(
                "hue",
                format!("{} is outside 0.0 - 360.0", h),
            ));
        }
        if !(0.0..=1.0).contains(&s) {
            return Err(ColorError::invalid_argument(
                "saturation",
                format!("{} is outside 0.0 - 1.0", s),
            ));
        }
        if !(0.0..=1.0).contains(&v) {
            return Err(ColorError::invalid_argument(
                "value",
                format!("{} is outside 0.0 - 1.0", v),
            ));
        }
        Ok(Self { h, s, v })
    }

    /// Components already known to be in range
    pub(crate) const fn new_unchecked(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Convert an ARGB color; alpha is ignored
    pub fn from_argb(color: ArgbColor) -> Self {
        conversion::argb_to_hsv(color)
    }

    /// Convert back to ARGB with the given alpha
    pub fn to_argb(self, alpha: u8) -> ArgbColor {
        conversion::hsv_to_argb(alpha, self)
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn v(&self) -> f64 {
        self.v
    }
}

impl From<ArgbColor> for HsvColor {
    fn from(color: ArgbColor) -> Self {
        Self::from_argb(color)
    }
}

impl fmt::Display for HsvColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H:{:.2} S:{:.3} V:{:.3}", self.h, self.s, self.v)
    }
}
