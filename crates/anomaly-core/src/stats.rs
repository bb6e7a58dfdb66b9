//! Mean and standard deviation of a window, recomputed from scratch
//!
//! Each update is O(window size). The standard deviation is the population
//! value (divides by `n`). Before any update, and whenever the window is
//! degenerate, the standard deviation takes the configured positive floor so
//! z-scores never divide by zero. A window is degenerate when every value is
//! identical or when its spread is within rounding noise of its mean, so a
//! flat run of `0.1` behaves like a flat run of `10.0`.

use crate::utils::{mean, population_std_dev};
use crate::{Error, Result};

/// Default standard deviation used before statistics exist
pub const DEFAULT_STD_FLOOR: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RunningStats {
    mean: f64,
    std_dev: f64,
    count: usize,
    floor: f64,
}

impl RunningStats {
    pub fn new(floor: f64) -> Result<Self> {
        if !(floor.is_finite() && floor > 0.0) {
            return Err(Error::config("std_floor", format!("must be finite and positive, got {floor}")));
        }
        Ok(Self {
            mean: 0.0,
            std_dev: floor,
            count: 0,
            floor,
        })
    }

    /// Replace the statistics with those of `values`
    pub fn recompute(&mut self, values: &[f64]) {
        self.count = values.len();
        if values.is_empty() {
            self.mean = 0.0;
            self.std_dev = self.floor;
            return;
        }
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
        if min == max {
            self.mean = min;
            self.std_dev = self.floor;
            return;
        }
        self.mean = mean(values);
        let std_dev = population_std_dev(values);
        self.std_dev = if std_dev > f64::EPSILON * self.mean.abs() {
            std_dev
        } else {
            self.floor
        };
    }

    /// Normalized deviation of `value` from the current mean
    pub fn z_score(&self, value: f64) -> f64 {
        (value - self.mean) / self.std_dev
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Number of values the statistics were computed from
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn reset(&mut self) {
        self.mean = 0.0;
        self.std_dev = self.floor;
        self.count = 0;
    }
}

impl Default for RunningStats {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: DEFAULT_STD_FLOOR,
            count: 0,
            floor: DEFAULT_STD_FLOOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_state_uses_floor() {
        let stats = RunningStats::default();
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.std_dev(), 1.0);
        assert_eq!(stats.count(), 0);
    }

    #[test]
    fn test_invalid_floor() {
        assert!(RunningStats::new(0.0).is_err());
        assert!(RunningStats::new(-1.0).is_err());
        assert!(RunningStats::new(f64::NAN).is_err());
        assert!(RunningStats::new(1e-9).is_ok());
    }

    #[test]
    fn test_recompute() {
        let mut stats = RunningStats::default();
        stats.recompute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_relative_eq!(stats.mean(), 5.0);
        assert_relative_eq!(stats.std_dev(), 2.0);
        assert_relative_eq!(stats.z_score(9.0), 2.0);
        assert_relative_eq!(stats.z_score(1.0), -2.0);
        assert_eq!(stats.count(), 8);
    }

    #[test]
    fn test_degenerate_window_uses_floor() {
        let mut stats = RunningStats::new(0.5).unwrap();
        stats.recompute(&[10.0; 50]);
        assert_eq!(stats.mean(), 10.0);
        assert_eq!(stats.std_dev(), 0.5);
        assert_eq!(stats.z_score(12.0), 4.0);
    }

    #[test]
    fn test_inexact_flat_window_uses_floor() {
        for level in [0.1, 0.3, 1.0 / 3.0, 10.0] {
            let mut stats = RunningStats::default();
            stats.recompute(&[level; 9]);
            assert_eq!(stats.mean(), level);
            assert_eq!(stats.std_dev(), 1.0, "level {level}");
            assert!(stats.z_score(level + 1e-9) < 1e-6);
        }
    }

    #[test]
    fn test_large_values_give_finite_stats() {
        let mut stats = RunningStats::default();
        stats.recompute(&[-1e308, 1e308]);
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.std_dev(), 1e308);
        assert_eq!(stats.z_score(1e308), 1.0);
    }

    #[test]
    fn test_reset() {
        let mut stats = RunningStats::default();
        stats.recompute(&[1.0, 3.0]);
        stats.reset();
        assert_eq!(stats, RunningStats::default());
    }
}
