//! Rolling series of emitted estimates
//!
//! A bounded sink for display layers: each estimate is appended as
//! `(index, value)` with `index` the running entry count, and only the most
//! recent points are retained.

use std::collections::VecDeque;

use crate::estimator::EstimateSink;
use crate::types::VerticalAcceleration;

/// Number of points retained by [`RollingSeries::default`]
pub const DEFAULT_VISIBLE_POINTS: usize = 120;

/// Bounded, append-only time series of vertical acceleration values
///
/// # Example
/// ```
/// use vertical_accel::RollingSeries;
///
/// let mut series = RollingSeries::new(2);
/// series.push(1.0);
/// series.push(2.0);
/// series.push(3.0);
///
/// assert_eq!(series.points().collect::<Vec<_>>(), vec![(1, 2.0), (2, 3.0)]);
/// assert_eq!(series.total(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RollingSeries {
    capacity: usize,
    points: VecDeque<(u64, f32)>,
    total: u64,
}

impl RollingSeries {
    /// Create a series retaining at most `capacity` points (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
            total: 0,
        }
    }

    /// Append a value, evicting the oldest point when full
    ///
    /// Returns the index assigned to the value.
    pub fn push(&mut self, value: f32) -> u64 {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        let index = self.total;
        self.points.push_back((index, value));
        self.total += 1;
        index
    }

    /// Retained points, oldest first
    pub fn points(&self) -> impl Iterator<Item = (u64, f32)> + '_ {
        self.points.iter().copied()
    }

    /// Retained values, oldest first
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.points.iter().map(|&(_, value)| value)
    }

    pub fn latest(&self) -> Option<(u64, f32)> {
        self.points.back().copied()
    }

    /// Index range covered by the retained points
    pub fn index_range(&self) -> Option<(u64, u64)> {
        let first = self.points.front()?.0;
        let last = self.points.back()?.0;
        Some((first, last))
    }

    /// Number of values ever appended
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all points and restart indexing at zero
    pub fn clear(&mut self) {
        self.points.clear();
        self.total = 0;
    }
}

impl Default for RollingSeries {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBLE_POINTS)
    }
}

impl EstimateSink for RollingSeries {
    fn accept(&mut self, estimate: VerticalAcceleration) {
        self.push(estimate.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let series = RollingSeries::default();
        assert_eq!(series.capacity(), DEFAULT_VISIBLE_POINTS);
        assert!(series.is_empty());
        assert_eq!(series.index_range(), None);
        assert_eq!(series.latest(), None);
    }

    #[test]
    fn test_zero_capacity_keeps_one_point() {
        let mut series = RollingSeries::new(0);
        series.push(1.0);
        series.push(2.0);
        assert_eq!(series.len(), 1);
        assert_eq!(series.latest(), Some((1, 2.0)));
    }

    #[test]
    fn test_window_slides() {
        let mut series = RollingSeries::new(3);
        for i in 0..10 {
            assert_eq!(series.push(i as f32), i);
        }

        assert_eq!(series.len(), 3);
        assert_eq!(series.total(), 10);
        assert_eq!(series.index_range(), Some((7, 9)));
        assert_eq!(series.values().collect::<Vec<_>>(), vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_clear_restarts_indexing() {
        let mut series = RollingSeries::new(3);
        series.push(1.0);
        series.push(2.0);
        series.clear();

        assert!(series.is_empty());
        assert_eq!(series.push(5.0), 0);
    }

    #[test]
    fn test_accepts_estimates() {
        let mut series = RollingSeries::new(2);
        series.accept(VerticalAcceleration {
            value: 0.5,
            timestamp: Some(10),
        });
        assert_eq!(series.latest(), Some((0, 0.5)));
    }
}
