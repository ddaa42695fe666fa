//! Hue-saturation-lightness color
//!
//! Independent of the HSV type; shares only the hue extraction.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{conversion, ArgbColor};
use crate::constants::hue;
use crate::{ColorError, Result};

/// An immutable HSL color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHsl")]
pub struct HslColor {
    h: f64,
    s: f64,
    l: f64,
}

#[derive(Deserialize)]
struct RawHsl {
    h: f64,
    s: f64,
    l: f64,
}

impl TryFrom<RawHsl> for HslColor {
    type Error = ColorError;

    fn try_from(raw: RawHsl) -> Result<Self> {
        Self::new(raw.h, raw.s, raw.l)
    }
}

impl HslColor {
    /// Create an HSL color, validating every component
    pub fn new(h: f64, s: f64, l: f64) -> Result<Self> {
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
        if !(0.0..=1.0).contains(&l) {
            return Err(ColorError::invalid_argument(
                "lightness",
                format!("{} is outside 0.0 - 1.0", l),
            ));
        }
        Ok(Self { h, s, l })
    }

    pub(crate) const fn new_unchecked(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert an ARGB color; alpha is ignored
    pub fn from_argb(color: ArgbColor) -> Self {
        conversion::argb_to_hsl(color)
    }

    /// Convert back to ARGB with the given alpha
    pub fn to_argb(self, alpha: u8) -> ArgbColor {
        conversion::hsl_to_argb(alpha, self)
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn l(&self) -> f64 {
        self.l
    }

    /// Rotate the hue by `delta` degrees, wrapping into `[0, 360]`
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidArgument` if `delta` is NaN or infinite.
    pub fn with_hue_shift(self, delta: f64) -> Result<Self> {
        let delta = finite_delta("hue", delta)?;
        let mut h = self.h + delta % hue::FULL_TURN;
        if h < 0.0 {
            h += hue::FULL_TURN;
        } else if h > hue::FULL_TURN {
            h -= hue::FULL_TURN;
        }
        Ok(Self { h, ..self })
    }

    /// Add the fractional part of `delta` to saturation, clamped to `[0, 1]`
    pub fn with_saturation_shift(self, delta: f64) -> Result<Self> {
        let delta = finite_delta("saturation", delta)?;
        Ok(Self {
            s: (self.s + delta.fract()).clamp(0.0, 1.0),
            ..self
        })
    }

    /// Add the fractional part of `delta` to lightness, clamped to `[0, 1]`
    pub fn with_lightness_shift(self, delta: f64) -> Result<Self> {
        let delta = finite_delta("lightness", delta)?;
        Ok(Self {
            l: (self.l + delta.fract()).clamp(0.0, 1.0),
            ..self
        })
    }
}

fn finite_delta(parameter: &str, delta: f64) -> Result<f64> {
    if delta.is_finite() {
        Ok(delta)
    } else {
        Err(ColorError::invalid_argument(
            parameter,
            format!("shift of {} is not a finite number", delta),
        ))
    }
}

impl PartialOrd for HslColor {
    /// Ordered by hue, then saturation, then lightness
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.h.partial_cmp(&other.h)? {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        match self.s.partial_cmp(&other.s)? {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        self.l.partial_cmp(&other.l)
    }
}

impl From<ArgbColor> for HslColor {
    fn from(color: ArgbColor) -> Self {
        Self::from_argb(color)
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H:{:.2} S:{:.3} L:{:.3}", self.h, self.s, self.l)
    }
}
