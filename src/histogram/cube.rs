//! Query phase of a histogram
//!
//! A `HistogramCube` never changes once built. Queries that reduce over hue
//! planes run one plane per rayon task, and the cube can be shared across
//! threads without locking.

use log::debug;
use rayon::prelude::*;

use super::{Dimensions, HistogramBuilder};
use crate::color::HsvColor;
use crate::constants::{dominant, hue};
use crate::parallel::ParallelAggregator;
use crate::{ColorError, Result};

/// Immutable hue × saturation × value bucket counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramCube {
    dimensions: Dimensions,
    counts: Vec<u64>,
}

impl HistogramCube {
    pub(crate) fn from_parts(dimensions: Dimensions, counts: Vec<u64>) -> Self {
        Self { dimensions, counts }
    }

    /// Populate a histogram from HSV pixels, one partial histogram per partition
    ///
    /// # Arguments
    ///
    /// * `dimensions` - Bucket geometry of the result
    /// * `pixels` - Read-only HSV buffer
    /// * `aggregator` - Partitioning of `pixels` across workers
    ///
    /// # Returns
    ///
    /// The merged histogram; blocks until every partition has been counted
    pub fn from_pixels(
        dimensions: Dimensions,
        pixels: &[HsvColor],
        aggregator: &ParallelAggregator,
    ) -> Self {
        debug!(
            "populating {:?} histogram from {} pixels",
            dimensions,
            pixels.len()
        );

        aggregator
            .aggregate(
                pixels,
                HistogramBuilder::with_dimensions(dimensions),
                |slice| {
                    let mut partial = HistogramBuilder::with_dimensions(dimensions);
                    partial.extend(slice);
                    partial
                },
                |mut acc, partial| {
                    acc.accumulate(partial.counts());
                    acc
                },
            )
            .build()
    }

    /// Merge two histograms into a new one
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidArgument` if the dimensions differ.
    pub fn merged(a: &HistogramCube, b: &HistogramCube) -> Result<HistogramCube> {
        let mut builder = a.clone().into_builder();
        builder.merge(b)?;
        Ok(builder.build())
    }

    /// Reopen the histogram for further population
    pub fn into_builder(self) -> HistogramBuilder {
        HistogramBuilder::from_parts(self.dimensions, self.counts)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Raw bucket counts in hue-major, then saturation, then value order
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Sum of all bucket counts
    pub fn total(&self) -> u64 {
        self.counts.par_iter().sum()
    }

    /// Count at bucket indices, `None` if any index is out of range
    pub fn bucket(&self, h: usize, s: usize, v: usize) -> Option<u64> {
        let dims = self.dimensions;
        if h >= dims.hues() || s >= dims.saturations() || v >= dims.values() {
            return None;
        }
        Some(self.counts[dims.offset(h, s, v)])
    }

    /// Count of the bucket `color` falls into
    pub fn color_weight(&self, color: HsvColor) -> u64 {
        self.counts[self.dimensions.offset_of(color)]
    }

    /// Pixels per hue bucket, with no saturation or value floor
    pub fn hue_distribution(&self) -> Vec<u64> {
        self.hue_distribution_above(0.0, 0.0)
    }

    /// Pixels per hue bucket, counting only buckets at or above the floors
    ///
    /// The floors are quantized with the same rule as pixels, so a floor of
    /// 0.25 keeps every bucket a 0.25 pixel would land in.
    pub fn hue_distribution_above(&self, min_saturation: f64, min_value: f64) -> Vec<u64> {
        let s0 = self.dimensions.saturation_index(min_saturation);
        let v0 = self.dimensions.value_index(min_value);
        let values = self.dimensions.values();

        self.planes()
            .map(|plane| {
                plane
                    .chunks(values)
                    .skip(s0)
                    .map(|row| row[v0..].iter().sum::<u64>())
                    .sum::<u64>()
            })
            .collect()
    }

    /// Pixels per saturation bucket
    ///
    /// With a hue only that hue plane is summed, otherwise every plane is.
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidArgument` if the hue is outside `[0, 360]`.
    pub fn saturation_distribution(&self, hue: Option<f64>) -> Result<Vec<u64>> {
        let values = self.dimensions.values();
        let per_plane = |plane: &[u64]| -> Vec<u64> {
            plane.chunks(values).map(|row| row.iter().sum()).collect()
        };

        match hue {
            Some(h) => Ok(per_plane(self.plane(self.checked_hue_index(h)?))),
            None => Ok(self.sum_planes(self.dimensions.saturations(), per_plane)),
        }
    }

    /// Pixels per value bucket
    ///
    /// With a hue only that hue plane is summed, otherwise every plane is.
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidArgument` if the hue is outside `[0, 360]`.
    pub fn value_distribution(&self, hue: Option<f64>) -> Result<Vec<u64>> {
        let values = self.dimensions.values();
        let per_plane = |plane: &[u64]| -> Vec<u64> {
            let mut out = vec![0; values];
            for row in plane.chunks(values) {
                add_into(&mut out, row);
            }
            out
        };

        match hue {
            Some(h) => Ok(per_plane(self.plane(self.checked_hue_index(h)?))),
            None => Ok(self.sum_planes(values, per_plane)),
        }
    }

    /// Color of the single fullest bucket
    ///
    /// Scans every bucket; on a tie the first one in hue, saturation, value
    /// order wins. An empty histogram yields HSV(0, 0, 0).
    pub fn most_common_color(&self) -> HsvColor {
        let plane_len = self.dimensions.plane_len();

        let plane_bests: Vec<(usize, u64)> = self
            .planes()
            .enumerate()
            .map(|(h, plane)| {
                let (offset, count) = first_max(plane.iter().copied());
                (h * plane_len + offset, count)
            })
            .collect();

        let (offset, _) = first_max_by_count(plane_bests);
        self.color_at_offset(offset)
    }

    /// Most frequent vivid color, ignoring near-gray and near-black pixels
    ///
    /// Uses the default 0.25 saturation and value floor.
    pub fn dominant_color(&self) -> Option<HsvColor> {
        self.dominant_color_above(dominant::MIN_SATURATION, dominant::MIN_VALUE)
    }

    /// Two-stage dominant color search with a custom floor
    ///
    /// The fullest hue above the floor is chosen first, then the fullest
    /// saturation/value bucket above the floor within that hue plane.
    ///
    /// # Returns
    ///
    /// `None` when no pixel reaches the floor
    pub fn dominant_color_above(&self, min_saturation: f64, min_value: f64) -> Option<HsvColor> {
        let hues = self.hue_distribution_above(min_saturation, min_value);
        let (h, count) = first_max(hues.iter().copied());
        if count == 0 {
            return None;
        }

        let s0 = self.dimensions.saturation_index(min_saturation);
        let v0 = self.dimensions.value_index(min_value);
        let values = self.dimensions.values();

        let region = self
            .plane(h)
            .chunks(values)
            .enumerate()
            .skip(s0)
            .flat_map(|(s, row)| {
                row.iter()
                    .enumerate()
                    .skip(v0)
                    .map(move |(v, &count)| ((s, v), count))
            });
        let ((s, v), _) = first_max_by_count(region);

        Some(self.dimensions.bucket_color(h, s, v))
    }

    fn planes(&self) -> rayon::slice::Chunks<'_, u64> {
        self.counts.par_chunks(self.dimensions.plane_len())
    }

    fn plane(&self, h: usize) -> &[u64] {
        let len = self.dimensions.plane_len();
        &self.counts[h * len..(h + 1) * len]
    }

    fn sum_planes<F>(&self, len: usize, per_plane: F) -> Vec<u64>
    where
        F: Fn(&[u64]) -> Vec<u64> + Sync + Send,
    {
        self.planes().map(per_plane).reduce(
            || vec![0; len],
            |mut acc, partial| {
                add_into(&mut acc, &partial);
                acc
            },
        )
    }

    fn checked_hue_index(&self, h: f64) -> Result<usize> {
        if !(0.0..=hue::FULL_TURN).contains(&h) {
            return Err(ColorError::invalid_argument(
                "hue",
                format!("{} is outside 0.0 - 360.0", h),
            ));
        }
        Ok(self.dimensions.hue_index(h))
    }

    fn color_at_offset(&self, offset: usize) -> HsvColor {
        let values = self.dimensions.values();
        let saturations = self.dimensions.saturations();
        let v = offset % values;
        let s = (offset / values) % saturations;
        let h = offset / (values * saturations);
        self.dimensions.bucket_color(h, s, v)
    }
}

impl From<HistogramBuilder> for HistogramCube {
    fn from(builder: HistogramBuilder) -> Self {
        builder.build()
    }
}

fn add_into(acc: &mut [u64], partial: &[u64]) {
    for (a, b) in acc.iter_mut().zip(partial) {
        *a += b;
    }
}

/// Index and count of the first strictly greatest count
fn first_max<I>(counts: I) -> (usize, u64)
where
    I: IntoIterator<Item = u64>,
{
    first_max_by_count(counts.into_iter().enumerate())
}

fn first_max_by_count<K, I>(items: I) -> (K, u64)
where
    K: Default,
    I: IntoIterator<Item = (K, u64)>,
{
    let mut best: Option<(K, u64)> = None;
    for (key, count) in items {
        match &best {
            Some((_, best_count)) if count <= *best_count => {}
            _ => best = Some((key, count)),
        }
    }
    best.unwrap_or_default()
}
