//! Population phase of a histogram

use rayon::prelude::*;

use super::{Dimensions, HistogramCube};
use crate::color::HsvColor;
use crate::{ColorError, Result};

/// Mutable histogram under construction
///
/// Owned by a single caller while pixels are added; `build` freezes it into
/// a `HistogramCube` that can then be queried from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramBuilder {
    dimensions: Dimensions,
    counts: Vec<u64>,
}

impl HistogramBuilder {
    /// Create an empty builder
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidArgument` if any axis is zero.
    pub fn new(hues: usize, saturations: usize, values: usize) -> Result<Self> {
        Ok(Self::with_dimensions(Dimensions::new(hues, saturations, values)?))
    }

    pub fn with_dimensions(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            counts: vec![0; dimensions.len()],
        }
    }

    pub(crate) fn from_parts(dimensions: Dimensions, counts: Vec<u64>) -> Self {
        Self { dimensions, counts }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Count one pixel
    pub fn add_pixel(&mut self, color: HsvColor) -> &mut Self {
        let offset = self.dimensions.offset_of(color);
        self.counts[offset] += 1;
        self
    }

    /// Add every bucket count of `other` into this builder
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidArgument` if the dimensions differ.
    pub fn merge(&mut self, other: &HistogramCube) -> Result<&mut Self> {
        if other.dimensions() != self.dimensions {
            return Err(ColorError::invalid_argument(
                "other",
                format!(
                    "cannot merge {:?} into {:?}",
                    other.dimensions(),
                    self.dimensions
                ),
            ));
        }
        self.accumulate(other.counts());
        Ok(self)
    }

    pub(crate) fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Pixels counted so far
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn build(self) -> HistogramCube {
        HistogramCube::from_parts(self.dimensions, self.counts)
    }

    // Hue planes are disjoint, so each one is summed on its own.
    pub(crate) fn accumulate(&mut self, counts: &[u64]) {
        let plane = self.dimensions.plane_len();
        self.counts
            .par_chunks_mut(plane)
            .zip(counts.par_chunks(plane))
            .for_each(|(ours, theirs)| {
                for (a, b) in ours.iter_mut().zip(theirs) {
                    *a += b;
                }
            });
    }
}

impl Extend<HsvColor> for HistogramBuilder {
    fn extend<I: IntoIterator<Item = HsvColor>>(&mut self, iter: I) {
        for color in iter {
            self.add_pixel(color);
        }
    }
}

impl<'a> Extend<&'a HsvColor> for HistogramBuilder {
    fn extend<I: IntoIterator<Item = &'a HsvColor>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}
