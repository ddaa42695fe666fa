//! Distribution analytics over histograms
//!
//! Answers the questions asked of an image once its histogram is built:
//! - Dominant and most common color
//! - Hue, saturation and value distributions
//! - Raw per-pixel hue counting with a saturation cutoff
//! - Similarity between two images
//!
//! The similarity metric compares only the most common color of each
//! histogram. It is a coarse proxy, not a distance between distributions.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::color::{ArgbColor, HsvColor};
use crate::config::{AnalysisConfig, HistogramConfig};
use crate::constants::{correlation as scale, hue};
use crate::histogram::{Dimensions, HistogramCube};
use crate::image_loader;
use crate::parallel::ParallelAggregator;
use crate::{ColorError, Result};

/// Normalized distance between the most common colors of two histograms
///
/// Hue is mapped onto 0-100 by dividing by 3.6, saturation and value by
/// multiplying by 100, and the Euclidean distance is divided by the largest
/// possible one.
///
/// # Returns
///
/// 0.0 for identical most common colors, up to 1.0 for opposite ones
///
/// # Errors
///
/// Returns `ColorError::InvalidArgument` if the dimensions differ.
pub fn correlation(a: &HistogramCube, b: &HistogramCube) -> Result<f64> {
    if a.dimensions() != b.dimensions() {
        return Err(ColorError::invalid_argument(
            "b",
            format!(
                "cannot correlate {:?} with {:?}",
                a.dimensions(),
                b.dimensions()
            ),
        ));
    }

    let (x, y) = (a.most_common_color(), b.most_common_color());
    let dh = (x.h() - y.h()) / scale::HUE_DIVISOR;
    let ds = (x.s() - y.s()) * scale::AXIS_SCALE;
    let dv = (x.v() - y.v()) * scale::AXIS_SCALE;

    Ok((dh * dh + ds * ds + dv * dv).sqrt() / scale::MAX_DISTANCE)
}

/// Pixel count per hue bucket, computed straight from pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HueDistribution {
    /// Lower edge in degrees of the fullest bucket, `None` if nothing was counted
    pub dominant_hue: Option<f64>,
    /// Count per hue bucket
    pub counts: Vec<u64>,
}

impl HueDistribution {
    /// Count pixels per hue bucket, skipping pixels at or below `min_saturation`
    ///
    /// A cutoff of 0.0 still skips pure grays, whose hue is meaningless.
    ///
    /// Each partition fills its own array; the arrays are summed once every
    /// partition is done.
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidArgument` if `hues` is zero or the
    /// cutoff is outside `[0, 1]`.
    pub fn count(
        pixels: &[HsvColor],
        hues: usize,
        min_saturation: f64,
        aggregator: &ParallelAggregator,
    ) -> Result<Self> {
        let dims = Dimensions::new(hues, 1, 1)?;
        if !(0.0..=1.0).contains(&min_saturation) {
            return Err(ColorError::invalid_argument(
                "min_saturation",
                format!("{} is outside 0.0 - 1.0", min_saturation),
            ));
        }

        let counts = aggregator.aggregate(
            pixels,
            vec![0u64; hues],
            |slice| {
                let mut partial = vec![0u64; hues];
                for color in slice.iter().filter(|c| c.s() > min_saturation) {
                    partial[dims.hue_index(color.h())] += 1;
                }
                partial
            },
            |mut acc, partial| {
                for (a, b) in acc.iter_mut().zip(&partial) {
                    *a += b;
                }
                acc
            },
        );

        Ok(Self::from_counts(counts))
    }

    /// Wrap existing bucket counts, such as a histogram's hue distribution
    pub fn from_counts(counts: Vec<u64>) -> Self {
        let hues = counts.len();
        let mut best: Option<(usize, u64)> = None;
        for (i, &count) in counts.iter().enumerate() {
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((i, count));
            }
        }

        Self {
            dominant_hue: best.map(|(i, _)| i as f64 * hue::FULL_TURN / hues as f64),
            counts,
        }
    }

    /// Pixels counted across all buckets
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// A color given both as HSV and as packed ARGB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedColor {
    pub hsv: HsvColor,
    pub argb: ArgbColor,
    /// `#RRGGBB` form for display
    pub hex: String,
}

/// Everything known about the colors of one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorReport {
    pub width: u32,
    pub height: u32,
    /// Pixels counted into the histogram
    pub pixel_count: u64,
    /// Histogram geometry used
    pub histogram: HistogramConfig,
    /// Most frequent vivid color, absent for gray images
    pub dominant_color: Option<ReportedColor>,
    /// Fullest bucket overall
    pub most_common_color: ReportedColor,
    /// Raw hue counts of pixels above the configured saturation cutoff
    pub hue_distribution: HueDistribution,
    /// Saturation counts of the dominant hue plane, or of all hues
    pub saturation_distribution: Vec<u64>,
    /// Value counts of the dominant hue plane, or of all hues
    pub value_distribution: Vec<u64>,
}

impl ReportedColor {
    fn opaque(hsv: HsvColor) -> Self {
        let argb = hsv.to_argb(u8::MAX);
        Self {
            hsv,
            argb,
            hex: argb.to_html(),
        }
    }
}

/// Runs histogram analysis with a fixed configuration
#[derive(Debug, Clone)]
pub struct ColorAnalyzer {
    config: AnalysisConfig,
    dimensions: Dimensions,
    aggregator: ParallelAggregator,
}

impl Default for ColorAnalyzer {
    fn default() -> Self {
        let config = AnalysisConfig::default();
        Self {
            dimensions: Dimensions::default(),
            aggregator: ParallelAggregator::with_available_parallelism(),
            config,
        }
    }
}

impl ColorAnalyzer {
    /// Create an analyzer, validating the configuration
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidArgument` for any out-of-range setting.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dimensions: config.histogram.dimensions()?,
            aggregator: config.aggregator()?,
            config,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load an image, applying the configured target size
    pub fn load(&self, path: &Path) -> Result<PixelBuffer> {
        image_loader::load_image(path, self.config.target_size)
    }

    /// Histogram of every pixel in the buffer
    pub fn histogram(&self, buffer: &PixelBuffer) -> HistogramCube {
        buffer.histogram(self.dimensions, &self.aggregator)
    }

    /// Raw hue counts using the configured saturation cutoff
    pub fn hue_counts(&self, buffer: &PixelBuffer) -> Result<HueDistribution> {
        HueDistribution::count(
            buffer.hsv(),
            self.dimensions.hues(),
            self.config.hue_min_saturation,
            &self.aggregator,
        )
    }

    /// Build the full color report of one image
    ///
    /// # Arguments
    ///
    /// * `buffer` - Decoded image
    ///
    /// # Returns
    ///
    /// A `ColorReport`; the saturation and value distributions cover the
    /// dominant hue plane when there is a dominant color
    pub fn report(&self, buffer: &PixelBuffer) -> Result<ColorReport> {
        let cube = self.histogram(buffer);
        let dominant = cube.dominant_color_above(
            self.config.dominant.min_saturation,
            self.config.dominant.min_value,
        );
        let plane = dominant.map(|c| c.h());

        let report = ColorReport {
            width: buffer.width(),
            height: buffer.height(),
            pixel_count: cube.total(),
            histogram: self.config.histogram,
            dominant_color: dominant.map(ReportedColor::opaque),
            most_common_color: ReportedColor::opaque(cube.most_common_color()),
            hue_distribution: self.hue_counts(buffer)?,
            saturation_distribution: cube.saturation_distribution(plane)?,
            value_distribution: cube.value_distribution(plane)?,
        };

        debug!(
            "report for {}x{}: dominant {:?}, most common {}",
            report.width,
            report.height,
            report.dominant_color.as_ref().map(|c| c.hex.as_str()),
            report.most_common_color.hsv
        );
        Ok(report)
    }

    /// Similarity of two images, see [`correlation`]
    pub fn compare(&self, a: &PixelBuffer, b: &PixelBuffer) -> Result<f64> {
        correlation(&self.histogram(a), &self.histogram(b))
    }
}
