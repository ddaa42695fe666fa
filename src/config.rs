//! Configuration for image color analysis.
//!
//! This module defines the tunable parameters of an analysis run, grouped
//! by the stage they affect.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use hsv_census::AnalysisConfig;
//! use std::path::Path;
//!
//! // Load from file; missing fields take their defaults
//! let config = AnalysisConfig::from_json_file(Path::new("analysis.json"))?;
//!
//! // Or use defaults
//! let config = AnalysisConfig::default();
//! # Ok::<(), hsv_census::ColorError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`HistogramConfig`]: bucket counts of the hue × saturation × value cube
//! - [`DominantConfig`]: vividness floor of the dominant color search
//! - [`TargetSize`]: optional scale-to-fit applied when loading an image

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{dominant, histogram};
use crate::histogram::Dimensions;
use crate::parallel::ParallelAggregator;
use crate::{ColorError, Result};

/// Complete configuration of an analysis run.
///
/// Can be serialized to/from JSON for reproducible runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Histogram geometry
    pub histogram: HistogramConfig,

    /// Dominant color floor
    pub dominant: DominantConfig,

    /// Saturation at or below which a pixel is skipped by raw hue counting;
    /// the 0.0 default skips only pure grays
    pub hue_min_saturation: f64,

    /// Resample loaded images to fit this size; `None` keeps native resolution
    pub target_size: Option<TargetSize>,

    /// Number of partitions; `None` uses one per rayon thread
    pub workers: Option<usize>,
}

/// Number of buckets on each histogram axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    pub hues: usize,
    pub saturations: usize,
    pub values: usize,
}

/// Saturation and value floor for the dominant color search.
///
/// Pixels below either floor are treated as gray, black or white noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DominantConfig {
    pub min_saturation: f64,
    pub min_value: f64,
}

/// Bounding box an image is scaled to fit, preserving aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            histogram: HistogramConfig::default(),
            dominant: DominantConfig::default(),
            hue_min_saturation: 0.0,
            target_size: None,
            workers: None,
        }
    }
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            hues: histogram::DEFAULT_HUES,
            saturations: histogram::DEFAULT_SATURATIONS,
            values: histogram::DEFAULT_VALUES,
        }
    }
}

impl Default for DominantConfig {
    fn default() -> Self {
        Self {
            min_saturation: dominant::MIN_SATURATION,
            min_value: dominant::MIN_VALUE,
        }
    }
}

impl HistogramConfig {
    /// Validated histogram dimensions
    pub fn dimensions(&self) -> Result<Dimensions> {
        Dimensions::new(self.hues, self.saturations, self.values)
    }
}

impl AnalysisConfig {
    /// Check every field against its valid range
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidArgument` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.histogram.dimensions()?;
        check_unit("dominant.min_saturation", self.dominant.min_saturation)?;
        check_unit("dominant.min_value", self.dominant.min_value)?;
        check_unit("hue_min_saturation", self.hue_min_saturation)?;

        if let Some(size) = self.target_size {
            if size.width == 0 || size.height == 0 {
                return Err(ColorError::invalid_argument(
                    "target_size",
                    format!("{}x{} has an empty side", size.width, size.height),
                ));
            }
        }
        self.aggregator()?;
        Ok(())
    }

    /// Aggregator for the configured worker count
    pub fn aggregator(&self) -> Result<ParallelAggregator> {
        match self.workers {
            Some(workers) => ParallelAggregator::new(workers),
            None => Ok(ParallelAggregator::with_available_parallelism()),
        }
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ColorError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ColorError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ColorError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            ColorError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }
}

fn check_unit(parameter: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ColorError::invalid_argument(
            parameter,
            format!("{} is outside 0.0 - 1.0", value),
        ));
    }
    Ok(())
}
