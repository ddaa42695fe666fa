//! Quantized hue × saturation × value histograms
//!
//! This module provides:
//! - `Dimensions`: the bucket geometry and the quantization rules
//! - `HistogramBuilder`: the mutable population phase
//! - `HistogramCube`: the immutable, query-only result
//!
//! Buckets are stored flat in hue-major order, so each hue plane is one
//! contiguous `saturations * values` slice that can be summed independently.

pub mod builder;
pub mod cube;

pub use builder::HistogramBuilder;
pub use cube::HistogramCube;

use serde::Serialize;

use crate::color::HsvColor;
use crate::constants::{histogram, hue};
use crate::{ColorError, Result};

/// Number of buckets along each axis of a histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    hues: usize,
    saturations: usize,
    values: usize,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            hues: histogram::DEFAULT_HUES,
            saturations: histogram::DEFAULT_SATURATIONS,
            values: histogram::DEFAULT_VALUES,
        }
    }
}

impl Dimensions {
    /// Create histogram dimensions; every axis needs at least one bucket
    /// and the bucket count must fit in `usize`
    pub fn new(hues: usize, saturations: usize, values: usize) -> Result<Self> {
        for (parameter, size) in [("hues", hues), ("saturations", saturations), ("values", values)] {
            if size == 0 {
                return Err(ColorError::invalid_argument(
                    parameter,
                    "histogram axis must have at least one bucket",
                ));
            }
        }
        let total = saturations
            .checked_mul(values)
            .and_then(|plane| plane.checked_mul(hues));
        if total.is_none() {
            return Err(ColorError::invalid_argument(
                "hues",
                format!("{} x {} x {} buckets overflow", hues, saturations, values),
            ));
        }
        Ok(Self {
            hues,
            saturations,
            values,
        })
    }

    pub fn hues(&self) -> usize {
        self.hues
    }

    pub fn saturations(&self) -> usize {
        self.saturations
    }

    pub fn values(&self) -> usize {
        self.values
    }

    /// Total number of buckets
    pub fn len(&self) -> usize {
        self.hues * self.plane_len()
    }

    /// Never true for validated dimensions
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Buckets per degree of hue
    pub fn hue_granularity(&self) -> f64 {
        self.hues as f64 / hue::FULL_TURN
    }

    pub fn saturation_granularity(&self) -> f64 {
        self.saturations as f64
    }

    pub fn value_granularity(&self) -> f64 {
        self.values as f64
    }

    /// Buckets in one hue plane
    pub(crate) fn plane_len(&self) -> usize {
        self.saturations * self.values
    }

    /// Hue bucket for `h` degrees; 360 wraps to bucket 0
    pub fn hue_index(&self, h: f64) -> usize {
        ((h * self.hues as f64 / hue::FULL_TURN).floor() as usize) % self.hues
    }

    pub fn saturation_index(&self, s: f64) -> usize {
        unit_index(s, self.saturations)
    }

    pub fn value_index(&self, v: f64) -> usize {
        unit_index(v, self.values)
    }

    /// Flat offset of the bucket holding `color`
    pub(crate) fn offset_of(&self, color: HsvColor) -> usize {
        self.offset(
            self.hue_index(color.h()),
            self.saturation_index(color.s()),
            self.value_index(color.v()),
        )
    }

    pub(crate) fn offset(&self, h: usize, s: usize, v: usize) -> usize {
        (h * self.saturations + s) * self.values + v
    }

    /// Continuous color at the lower edge of a bucket
    pub(crate) fn bucket_color(&self, h: usize, s: usize, v: usize) -> HsvColor {
        HsvColor::new_unchecked(
            h as f64 * hue::FULL_TURN / self.hues as f64,
            s as f64 / self.saturations as f64,
            v as f64 / self.values as f64,
        )
    }
}

// Bucket i holds (i/n, (i+1)/n]; 0.0 and anything below (or NaN) land in the first.
fn unit_index(x: f64, buckets: usize) -> usize {
    ((x * buckets as f64).ceil() as usize)
        .saturating_sub(1)
        .min(buckets - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimension_rejected() {
        for (h, s, v, name) in [(0, 1, 1, "hues"), (1, 0, 1, "saturations"), (1, 1, 0, "values")] {
            match Dimensions::new(h, s, v) {
                Err(ColorError::InvalidArgument { parameter, .. }) => assert_eq!(parameter, name),
                other => panic!("Expected InvalidArgument, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_default_dimensions() {
        let dims = Dimensions::default();
        assert_eq!((dims.hues(), dims.saturations(), dims.values()), (360, 100, 100));
        assert_eq!(dims.len(), 3_600_000);
        assert_eq!(dims.hue_granularity(), 1.0);
    }

    #[test]
    fn test_hue_index_wraps() {
        let dims = Dimensions::new(36, 10, 10).unwrap();
        assert_eq!(dims.hue_index(0.0), 0);
        assert_eq!(dims.hue_index(30.0), 3);
        assert_eq!(dims.hue_index(359.0), 35);
        assert_eq!(dims.hue_index(360.0), 0);
    }

    #[test]
    fn test_unit_axes_clamp_to_last_bucket() {
        let dims = Dimensions::default();
        assert_eq!(dims.saturation_index(0.0), 0);
        assert_eq!(dims.saturation_index(0.5), 49);
        assert_eq!(dims.value_index(1.0), 99);
        assert_eq!(dims.value_index(1.5), 99);
        assert_eq!(dims.value_index(-0.5), 0);
    }

    #[test]
    fn test_two_bucket_axes_split_at_half() {
        let dims = Dimensions::new(360, 2, 2).unwrap();
        assert_eq!(dims.saturation_index(0.3), 0);
        assert_eq!(dims.saturation_index(0.5), 0);
        assert_eq!(dims.saturation_index(0.9), 1);
        assert_eq!(dims.saturation_index(0.99), 1);
        assert_eq!(dims.value_index(0.75), 1);
    }

    #[test]
    fn test_unit_index_between_edges() {
        let dims = Dimensions::new(36, 10, 10).unwrap();
        assert_eq!(dims.saturation_index(0.05), 0);
        assert_eq!(dims.saturation_index(0.55), 5);
        assert_eq!(dims.saturation_index(0.95), 9);
        assert_eq!(dims.value_index(0.25), 2);
        assert_eq!(dims.value_index(0.65), 6);
    }

    #[test]
    fn test_bucket_lower_edge_at_or_below_color() {
        let dims = Dimensions::new(36, 10, 10).unwrap();
        for x in [0.05, 0.15, 0.55, 0.95, 1.0] {
            let i = dims.saturation_index(x);
            let lower = dims.bucket_color(0, i, 0).s();
            assert!(lower <= x && x <= lower + 0.1 + 1e-12, "{} -> {}", x, lower);
        }
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert!(matches!(
            Dimensions::new(usize::MAX, 2, 2),
            Err(ColorError::InvalidArgument { .. })
        ));
        assert!(Dimensions::new(1, usize::MAX, 1).is_ok());
    }

    #[test]
    fn test_single_bucket_axes() {
        let dims = Dimensions::new(1, 1, 1).unwrap();
        assert_eq!(dims.hue_index(359.9), 0);
        assert_eq!(dims.saturation_index(1.0), 0);
        assert_eq!(dims.offset(0, 0, 0), 0);
    }

    #[test]
    fn test_bucket_color_inverts_index() {
        let dims = Dimensions::default();
        let color = dims.bucket_color(120, 49, 49);
        assert_eq!(color, HsvColor::new(120.0, 0.49, 0.49).unwrap());
    }

    #[test]
    fn test_offset_is_hue_major() {
        let dims = Dimensions::new(4, 3, 2).unwrap();
        assert_eq!(dims.offset(0, 0, 1), 1);
        assert_eq!(dims.offset(0, 1, 0), 2);
        assert_eq!(dims.offset(1, 0, 0), 6);
        assert_eq!(dims.offset(3, 2, 1), dims.len() - 1);
    }
}
