//! Z-score detection over a rolling window
//!
//! Every sample is pushed into the window, the window's mean and standard
//! deviation are recomputed, and the sample is flagged when its z-score
//! exceeds the threshold (strictly).
//!
//! With the default [`StatsScope::IncludeCurrent`] the incoming value is part
//! of the statistics it is tested against, so an extreme value pulls the
//! mean and spread toward itself and dampens its own z-score. With a window
//! of `n` values the largest reachable |z| is `sqrt(n - 1)`. The bias is kept
//! on purpose; [`StatsScope::ExcludeCurrent`] is the opt-in alternative.

use crate::traits::{ConfigurableDetector, DetectorProperties, StreamingDetector};
use anomaly_core::{AnomalyRecord, Error, Result, RollingWindow, RunningStats, Sample};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Which window contents the statistics are computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsScope {
    /// Window after the push, incoming value included
    #[default]
    IncludeCurrent,
    /// Window before the push, incoming value excluded
    ExcludeCurrent,
}

/// Z-score parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZScoreParameters {
    /// Window capacity
    pub window_size: usize,
    /// Number of standard deviations beyond which a value is anomalous
    pub threshold: f64,
    /// Which samples the statistics cover
    pub scope: StatsScope,
    /// Standard deviation used before statistics exist or for a flat window
    pub std_floor: f64,
}

impl Default for ZScoreParameters {
    fn default() -> Self {
        Self {
            window_size: 100,
            threshold: 3.0,
            scope: StatsScope::IncludeCurrent,
            std_floor: anomaly_core::DEFAULT_STD_FLOOR,
        }
    }
}

/// Z-score based streaming detector
#[derive(Debug, Clone)]
pub struct ZScoreDetector {
    window: RollingWindow,
    stats: RunningStats,
    params: ZScoreParameters,
    last_z: Option<f64>,
}

impl ZScoreDetector {
    /// Create a new z-score detector
    ///
    /// # Arguments
    ///
    /// * `capacity` - Window size
    /// * `threshold` - Number of standard deviations for the anomaly threshold
    pub fn new(capacity: usize, threshold: f64) -> Result<Self> {
        Self::from_parameters(ZScoreParameters {
            window_size: capacity,
            threshold,
            ..Default::default()
        })
    }

    /// Create a detector with the default threshold of 3.0
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(capacity, ZScoreParameters::default().threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.params.threshold
    }

    pub fn scope(&self) -> StatsScope {
        self.params.scope
    }

    /// Statistics from the latest evaluated step
    pub fn stats(&self) -> &RunningStats {
        &self.stats
    }

    /// Z-score of the latest evaluated sample, if any
    pub fn last_z_score(&self) -> Option<f64> {
        self.last_z
    }

    fn validate(params: &ZScoreParameters) -> Result<()> {
        if !(params.threshold.is_finite() && params.threshold > 0.0) {
            return Err(Error::config(
                "threshold",
                format!("must be a positive real, got {}", params.threshold),
            ));
        }
        Ok(())
    }
}

impl ConfigurableDetector for ZScoreDetector {
    type Parameters = ZScoreParameters;

    fn from_parameters(params: Self::Parameters) -> Result<Self> {
        Self::validate(&params)?;
        Ok(Self {
            window: RollingWindow::new(params.window_size)?,
            stats: RunningStats::new(params.std_floor)?,
            params,
            last_z: None,
        })
    }

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }
}

impl DetectorProperties for ZScoreDetector {
    fn algorithm_name(&self) -> &'static str {
        "ZScore"
    }

    fn minimum_sample_size(&self) -> usize {
        2
    }
}

impl StreamingDetector for ZScoreDetector {
    fn observe(&mut self, sample: Sample) -> Vec<AnomalyRecord> {
        let z = match self.params.scope {
            StatsScope::IncludeCurrent => {
                self.window.push(sample.value);
                if self.window.len() < 2 {
                    trace!(index = sample.global_index, "insufficient data for z-score");
                    return Vec::new();
                }
                self.stats.recompute(self.window.as_slice());
                self.stats.z_score(sample.value)
            }
            StatsScope::ExcludeCurrent => {
                if self.window.is_empty() {
                    self.window.push(sample.value);
                    trace!(index = sample.global_index, "insufficient data for z-score");
                    return Vec::new();
                }
                self.stats.recompute(self.window.as_slice());
                self.window.push(sample.value);
                self.stats.z_score(sample.value)
            }
        };
        self.last_z = Some(z);

        trace!(
            index = sample.global_index,
            value = sample.value,
            z,
            mean = self.stats.mean(),
            std_dev = self.stats.std_dev(),
            "z-score evaluated"
        );

        if z.abs() > self.params.threshold {
            debug!(index = sample.global_index, z, "z-score above threshold");
            vec![AnomalyRecord::from(sample)]
        } else {
            Vec::new()
        }
    }

    fn reset(&mut self, origin: u64) {
        self.window.reset(origin);
        self.stats.reset();
        self.last_z = None;
    }

    fn window(&self) -> &RollingWindow {
        &self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(detector: &mut ZScoreDetector, values: &[f64]) -> Vec<AnomalyRecord> {
        values
            .iter()
            .enumerate()
            .flat_map(|(i, &v)| detector.observe(Sample::new(i as u64, v)))
            .collect()
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(ZScoreDetector::new(0, 3.0), Err(Error::Config(_))));
        assert!(matches!(ZScoreDetector::new(10, 0.0), Err(Error::Config(_))));
        assert!(matches!(ZScoreDetector::new(10, -3.0), Err(Error::Config(_))));
        assert!(matches!(ZScoreDetector::new(10, f64::NAN), Err(Error::Config(_))));
        let bad_floor = ZScoreParameters {
            std_floor: 0.0,
            ..Default::default()
        };
        assert!(ZScoreDetector::from_parameters(bad_floor).is_err());
    }

    #[test]
    fn test_defaults() {
        let detector = ZScoreDetector::with_capacity(50).unwrap();
        assert_eq!(detector.threshold(), 3.0);
        assert_eq!(detector.scope(), StatsScope::IncludeCurrent);
        assert_eq!(detector.stats().std_dev(), 1.0);
        assert_eq!(detector.window().capacity(), 50);
    }

    #[test]
    fn test_first_sample_is_never_flagged() {
        let mut detector = ZScoreDetector::new(10, 0.1).unwrap();
        assert!(detector.observe(Sample::new(0, 1e9)).is_empty());
        assert_eq!(detector.last_z_score(), None);
    }

    #[test]
    fn test_flat_stream_has_no_anomalies() {
        let mut detector = ZScoreDetector::new(20, 3.0).unwrap();
        assert!(feed(&mut detector, &[7.0; 100]).is_empty());
        assert_eq!(detector.last_z_score(), Some(0.0));
    }

    #[test]
    fn test_self_inclusion_caps_z_score() {
        // Nine 5.0s then 500.0: the spike's z-score lands exactly on sqrt(9) = 3
        let mut values = vec![5.0; 9];
        values.push(500.0);

        let mut strict = ZScoreDetector::new(10, 3.0).unwrap();
        assert!(feed(&mut strict, &values).is_empty());
        assert_eq!(strict.last_z_score(), Some(3.0));

        let mut looser = ZScoreDetector::new(10, 2.99).unwrap();
        assert_eq!(feed(&mut looser, &values), vec![AnomalyRecord::new(9, 500.0)]);
    }

    #[test]
    fn test_exclude_current_flags_spike() {
        let params = ZScoreParameters {
            window_size: 10,
            scope: StatsScope::ExcludeCurrent,
            ..Default::default()
        };
        let mut detector = ZScoreDetector::from_parameters(params).unwrap();
        let mut values = vec![5.0; 9];
        values.push(500.0);

        assert_eq!(feed(&mut detector, &values), vec![AnomalyRecord::new(9, 500.0)]);
        // Flat prefix has zero spread, so the floor of 1.0 applies
        assert_eq!(detector.last_z_score(), Some(495.0));
    }

    #[test]
    fn test_threshold_comparison_is_strict() {
        let params = ZScoreParameters {
            window_size: 60,
            scope: StatsScope::ExcludeCurrent,
            ..Default::default()
        };
        let mut values = vec![10.0; 50];

        // Flat history: spread falls back to the floor of 1.0, so z = value - 10
        values.push(13.0);
        let mut at_threshold = ZScoreDetector::from_parameters(params.clone()).unwrap();
        assert!(feed(&mut at_threshold, &values).is_empty());
        assert_eq!(at_threshold.last_z_score(), Some(3.0));

        values[50] = 13.0 + 1e-9;
        let mut above = ZScoreDetector::from_parameters(params).unwrap();
        assert_eq!(feed(&mut above, &values).len(), 1);
    }

    #[test]
    fn test_flat_history_ignores_rounding_noise() {
        let params = ZScoreParameters {
            window_size: 10,
            scope: StatsScope::ExcludeCurrent,
            ..Default::default()
        };
        for level in [10.0, 0.1, 0.7] {
            let mut values = vec![level; 9];
            values.push(level + 1e-9);
            let mut detector = ZScoreDetector::from_parameters(params.clone()).unwrap();
            assert!(feed(&mut detector, &values).is_empty(), "level {level}");
            assert!(detector.last_z_score().unwrap().abs() < 1e-6);
        }
    }

    #[test]
    fn test_huge_values_keep_z_score_finite() {
        // The plain sum of the window overflows; the deviation itself does not
        let mut values = vec![5e307; 9];
        values.push(-5e307);

        let mut detector = ZScoreDetector::new(10, 2.99).unwrap();
        assert_eq!(feed(&mut detector, &values), vec![AnomalyRecord::new(9, -5e307)]);
        let z = detector.last_z_score().unwrap();
        assert!(z.is_finite());
        assert!((z + 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_deviation_is_flagged() {
        let mut detector = ZScoreDetector::new(100, 3.0).unwrap();
        let mut values: Vec<f64> = (0..60).map(|i| 10.0 + (i % 2) as f64).collect();
        values.push(-50.0);
        let anomalies = feed(&mut detector, &values);
        assert_eq!(anomalies, vec![AnomalyRecord::new(60, -50.0)]);
        assert!(detector.last_z_score().unwrap() < -3.0);
    }

    #[test]
    fn test_reset_rebases_window() {
        let mut detector = ZScoreDetector::new(4, 3.0).unwrap();
        feed(&mut detector, &[1.0, 2.0, 3.0]);
        detector.reset(42);
        assert!(detector.window().is_empty());
        assert_eq!(detector.window().next_index(), 42);
        assert_eq!(detector.stats().count(), 0);
    }
}
