//! # HSV Census
//!
//! A Rust crate for analyzing the color content of raster images.
//!
//! This library measures color distribution by:
//! - Converting pixels between ARGB, HSV and HSL color spaces
//! - Counting every pixel into a quantized hue × saturation × value histogram
//! - Splitting the counting across worker threads and merging the results
//! - Deriving dominant color, per-axis distributions and image similarity
//!
//! ## Example
//!
//! ```rust,no_run
//! use hsv_census::{analyze_image, ColorReport};
//! use std::path::Path;
//!
//! let report: ColorReport = analyze_image(Path::new("photo.jpg"))?;
//! if let Some(dominant) = &report.dominant_color {
//!     println!("Dominant: {} ({})", dominant.hsv, dominant.hex);
//! }
//! # Ok::<(), hsv_census::ColorError>(())
//! ```

use std::path::Path;

pub mod analysis;
pub mod buffer;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod histogram;
pub mod image_loader;
pub mod parallel;

pub use analysis::{correlation, ColorAnalyzer, ColorReport, HueDistribution, ReportedColor};
pub use buffer::PixelBuffer;
pub use color::{alpha_composite, argb_to_hsv, hsv_to_argb, ArgbColor, HslColor, HsvColor};
pub use config::{AnalysisConfig, DominantConfig, HistogramConfig, TargetSize};
pub use error::{ColorError, Result};
pub use histogram::{Dimensions, HistogramBuilder, HistogramCube};
pub use parallel::ParallelAggregator;

/// Analyze the colors of an image file with the default configuration
///
/// This is the main entry point for color analysis. It decodes the image at
/// native resolution, counts every pixel into a 360 × 100 × 100 histogram
/// and summarizes it.
///
/// # Arguments
///
/// * `image_path` - Path to the image file
///
/// # Returns
///
/// A `ColorReport` with dominant and most common color and distributions
///
/// # Errors
///
/// Returns `ColorError::ImageLoad` if the image cannot be opened or decoded.
pub fn analyze_image(image_path: &Path) -> Result<ColorReport> {
    let analyzer = ColorAnalyzer::default();
    let buffer = analyzer.load(image_path)?;
    analyzer.report(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_image_missing_file() {
        let err = analyze_image(Path::new("/nonexistent/photo.png")).unwrap_err();
        assert!(!err.is_recoverable());
        assert!(matches!(err, ColorError::ImageLoad { .. }));
    }

    #[test]
    fn test_hsv_serialization() {
        let color = HsvColor::new(210.0, 0.4, 0.8).unwrap();
        let json = serde_json::to_string(&color).unwrap();
        let deserialized: HsvColor = serde_json::from_str(&json).unwrap();

        assert_eq!(color, deserialized);
    }
}
