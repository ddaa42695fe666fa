//! Decoded pixel storage
//!
//! A `PixelBuffer` owns the ARGB pixels of one image together with the HSV
//! value of every pixel, computed once when the buffer is created. Both are
//! row-major with a stride equal to the width and are shared read-only, so
//! cloning a buffer is cheap.

use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::color::{ArgbColor, HsvColor};
use crate::histogram::{Dimensions, HistogramCube};
use crate::parallel::ParallelAggregator;
use crate::{ColorError, Result};

/// Immutable ARGB pixels with their cached HSV values
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    argb: Arc<[ArgbColor]>,
    hsv: Arc<[HsvColor]>,
}

impl PixelBuffer {
    /// Wrap row-major ARGB pixels and derive their HSV values
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidArgument` if `pixels.len()` is not
    /// `width * height`.
    pub fn from_argb(width: u32, height: u32, pixels: Vec<ArgbColor>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ColorError::invalid_argument(
                "pixels",
                format!(
                    "expected {} pixels for {}x{}, got {}",
                    expected,
                    width,
                    height,
                    pixels.len()
                ),
            ));
        }

        let hsv = extract_hsv(&pixels);
        debug!("buffered {}x{} pixels", width, height);

        Ok(Self {
            width,
            height,
            argb: pixels.into(),
            hsv: hsv.into(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels between the starts of two consecutive rows
    pub fn stride(&self) -> usize {
        self.width as usize
    }

    pub fn len(&self) -> usize {
        self.argb.len()
    }

    pub fn is_empty(&self) -> bool {
        self.argb.is_empty()
    }

    pub fn argb(&self) -> &[ArgbColor] {
        &self.argb
    }

    pub fn hsv(&self) -> &[HsvColor] {
        &self.hsv
    }

    /// ARGB pixel at column `x`, row `y`
    pub fn pixel(&self, x: u32, y: u32) -> Option<ArgbColor> {
        self.index(x, y).map(|i| self.argb[i])
    }

    /// HSV value of the pixel at column `x`, row `y`
    pub fn hsv_at(&self, x: u32, y: u32) -> Option<HsvColor> {
        self.index(x, y).map(|i| self.hsv[i])
    }

    /// One row of ARGB pixels
    pub fn row(&self, y: u32) -> Option<&[ArgbColor]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride();
        Some(&self.argb[start..start + self.stride()])
    }

    /// Count every pixel into a histogram of the given dimensions
    pub fn histogram(&self, dimensions: Dimensions, aggregator: &ParallelAggregator) -> HistogramCube {
        HistogramCube::from_pixels(dimensions, &self.hsv, aggregator)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.stride() + x as usize)
    }
}

/// Convert every pixel to HSV, preserving order
pub fn extract_hsv(pixels: &[ArgbColor]) -> Vec<HsvColor> {
    pixels.par_iter().map(|&c| HsvColor::from_argb(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard() -> PixelBuffer {
        let red = ArgbColor::from_rgb(255, 0, 0);
        let blue = ArgbColor::from_rgb(0, 0, 255);
        let pixels = (0..12)
            .map(|i| if (i % 3 + i / 3) % 2 == 0 { red } else { blue })
            .collect();
        PixelBuffer::from_argb(3, 4, pixels).unwrap()
    }

    #[test]
    fn test_length_must_match_dimensions() {
        let result = PixelBuffer::from_argb(2, 2, vec![ArgbColor::BLACK; 3]);
        assert!(matches!(result, Err(ColorError::InvalidArgument { .. })));
    }

    #[test]
    fn test_accessors() {
        let buffer = checkerboard();
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.height(), 4);
        assert_eq!(buffer.stride(), 3);
        assert_eq!(buffer.len(), 12);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_pixel_indexing_is_row_major() {
        let buffer = checkerboard();
        assert_eq!(buffer.pixel(0, 0), Some(ArgbColor::from_rgb(255, 0, 0)));
        assert_eq!(buffer.pixel(1, 0), Some(ArgbColor::from_rgb(0, 0, 255)));
        assert_eq!(buffer.pixel(0, 1), Some(ArgbColor::from_rgb(0, 0, 255)));
        assert_eq!(buffer.pixel(3, 0), None);
        assert_eq!(buffer.pixel(0, 4), None);

        let row = buffer.row(1).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row[1], ArgbColor::from_rgb(255, 0, 0));
        assert!(buffer.row(4).is_none());
    }

    #[test]
    fn test_hsv_matches_argb_index() {
        let buffer = checkerboard();
        assert_eq!(buffer.hsv().len(), buffer.argb().len());
        for (argb, hsv) in buffer.argb().iter().zip(buffer.hsv()) {
            assert_eq!(HsvColor::from_argb(*argb), *hsv);
        }
        assert_eq!(buffer.hsv_at(1, 0).map(|c| c.h()), Some(240.0));
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = PixelBuffer::from_argb(0, 5, Vec::new()).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.row(0), Some(&[][..]));
    }

    #[test]
    fn test_histogram_counts_every_pixel() {
        let buffer = checkerboard();
        let aggregator = ParallelAggregator::new(4).unwrap();
        let cube = buffer.histogram(Dimensions::default(), &aggregator);
        assert_eq!(cube.total(), 12);
        let hues = cube.hue_distribution();
        assert_eq!(hues[0], 6);
        assert_eq!(hues[240], 6);
    }

    #[test]
    fn test_clone_shares_pixels() {
        let buffer = checkerboard();
        let copy = buffer.clone();
        assert!(std::ptr::eq(buffer.argb().as_ptr(), copy.argb().as_ptr()));
    }
}
