//! Partitioned fan-out/fan-in aggregation over pixel buffers
//!
//! A buffer of `N` items is split into `W` contiguous, gap-free ranges.
//! Every partition runs the same aggregation function on a read-only slice
//! and returns its own complete result; the caller blocks until all
//! partitions are done and then folds the results in partition order.
//! Workers never share mutable state.

use std::ops::Range;

use log::{debug, trace};
use rayon::prelude::*;

use crate::{ColorError, Result};

/// Splits work into fixed partitions and runs them on the rayon pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelAggregator {
    workers: usize,
}

impl Default for ParallelAggregator {
    fn default() -> Self {
        Self::with_available_parallelism()
    }
}

impl ParallelAggregator {
    /// Create an aggregator with an explicit number of partitions
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(ColorError::invalid_argument(
                "workers",
                "at least one worker is required",
            ));
        }
        Ok(Self { workers })
    }

    /// One partition per thread of the current rayon pool
    pub fn with_available_parallelism() -> Self {
        Self {
            workers: rayon::current_num_threads().max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Split `[0, len)` into `workers` contiguous ranges
    ///
    /// All ranges have `len / workers` items except the last, which also
    /// takes the remainder. Ranges may be empty when `len < workers`.
    pub fn partitions(&self, len: usize) -> Vec<Range<usize>> {
        let chunk = len / self.workers;
        (0..self.workers)
            .map(|i| {
                let start = i * chunk;
                let end = if i + 1 == self.workers { len } else { start + chunk };
                start..end
            })
            .collect()
    }

    /// Run `map` on every partition and return the results in partition order
    ///
    /// Blocks until every partition has finished.
    pub fn map_partitions<T, R, F>(&self, items: &[T], map: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&[T]) -> R + Sync,
    {
        let partitions = self.partitions(items.len());
        debug!(
            "aggregating {} items over {} partitions",
            items.len(),
            partitions.len()
        );

        partitions
            .into_par_iter()
            .enumerate()
            .map(|(index, range)| {
                trace!("partition {} covers {:?}", index, range);
                map(&items[range])
            })
            .collect()
    }

    /// Map every partition, then fold the partial results into `init`
    ///
    /// The fold runs on the calling thread, partition 0 first.
    pub fn aggregate<T, R, F, M>(&self, items: &[T], init: R, map: F, mut merge: M) -> R
    where
        T: Sync,
        R: Send,
        F: Fn(&[T]) -> R + Sync,
        M: FnMut(R, R) -> R,
    {
        self.map_partitions(items, map)
            .into_iter()
            .fold(init, |acc, partial| merge(acc, partial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            ParallelAggregator::new(0),
            Err(ColorError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_partitions_are_contiguous_and_complete() {
        let aggregator = ParallelAggregator::new(4).unwrap();
        let parts = aggregator.partitions(10);
        assert_eq!(parts, vec![0..2, 2..4, 4..6, 6..10]);
    }

    #[test]
    fn test_partitions_even_split() {
        let aggregator = ParallelAggregator::new(3).unwrap();
        assert_eq!(aggregator.partitions(9), vec![0..3, 3..6, 6..9]);
    }

    #[test]
    fn test_partitions_fewer_items_than_workers() {
        let aggregator = ParallelAggregator::new(4).unwrap();
        let parts = aggregator.partitions(3);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts.last(), Some(&(0..3)));
        assert_eq!(parts.iter().map(|r| r.len()).sum::<usize>(), 3);
    }

    #[test]
    fn test_partitions_empty_input() {
        let aggregator = ParallelAggregator::new(2).unwrap();
        assert_eq!(aggregator.partitions(0), vec![0..0, 0..0]);
    }

    #[test]
    fn test_map_partitions_preserves_order() {
        let aggregator = ParallelAggregator::new(5).unwrap();
        let items: Vec<u32> = (0..23).collect();
        let firsts = aggregator.map_partitions(&items, |slice| slice.first().copied());
        assert_eq!(firsts, vec![Some(0), Some(4), Some(8), Some(12), Some(16)]);
    }

    #[test]
    fn test_aggregate_matches_sequential_sum() {
        let items: Vec<u64> = (1..=1000).collect();
        for workers in [1, 2, 3, 7, 16] {
            let aggregator = ParallelAggregator::new(workers).unwrap();
            let total = aggregator.aggregate(&items, 0u64, |s| s.iter().sum(), |a, b| a + b);
            assert_eq!(total, 500_500);
        }
    }

    #[test]
    fn test_default_uses_pool_size() {
        assert_eq!(
            ParallelAggregator::default().workers(),
            rayon::current_num_threads().max(1)
        );
    }
}
