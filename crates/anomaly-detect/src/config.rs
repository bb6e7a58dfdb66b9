//! Serializable detector selection
//!
//! A [`DetectorConfig`] names one detection method and its parameters. It is
//! tagged by `method`, so a JSON config reads like:
//!
//! ```json
//! { "method": "batch", "window_size": 100, "contamination": 0.05,
//!   "model": { "kind": "iqr", "multiplier": 1.5 } }
//! ```
//!
//! Missing fields fall back to each parameter set's defaults.

use crate::batch::{BatchOutlierDetector, BatchParameters};
use crate::traits::{ConfigurableDetector, DetectorProperties, StreamingDetector};
use crate::zscore::{ZScoreDetector, ZScoreParameters};
use anomaly_core::{AnomalyRecord, Result, RollingWindow, Sample};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Detection method and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum DetectorConfig {
    ZScore(ZScoreParameters),
    Batch(BatchParameters),
}

impl DetectorConfig {
    /// Validate the parameters and construct the detector
    pub fn build(&self) -> Result<AnyDetector> {
        Ok(match self {
            DetectorConfig::ZScore(params) => {
                AnyDetector::ZScore(ZScoreDetector::from_parameters(params.clone())?)
            }
            DetectorConfig::Batch(params) => {
                AnyDetector::Batch(BatchOutlierDetector::from_parameters(params.clone())?)
            }
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Window capacity named by the parameters
    pub fn window_size(&self) -> usize {
        match self {
            DetectorConfig::ZScore(params) => params.window_size,
            DetectorConfig::Batch(params) => params.window_size,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig::ZScore(ZScoreParameters::default())
    }
}

impl From<ZScoreParameters> for DetectorConfig {
    fn from(params: ZScoreParameters) -> Self {
        DetectorConfig::ZScore(params)
    }
}

impl From<BatchParameters> for DetectorConfig {
    fn from(params: BatchParameters) -> Self {
        DetectorConfig::Batch(params)
    }
}

/// Either detector, chosen at runtime
#[derive(Debug)]
pub enum AnyDetector {
    ZScore(ZScoreDetector),
    Batch(BatchOutlierDetector),
}

impl From<ZScoreDetector> for AnyDetector {
    fn from(detector: ZScoreDetector) -> Self {
        AnyDetector::ZScore(detector)
    }
}

impl From<BatchOutlierDetector> for AnyDetector {
    fn from(detector: BatchOutlierDetector) -> Self {
        AnyDetector::Batch(detector)
    }
}

impl DetectorProperties for AnyDetector {
    fn algorithm_name(&self) -> &'static str {
        match self {
            AnyDetector::ZScore(d) => d.algorithm_name(),
            AnyDetector::Batch(d) => d.algorithm_name(),
        }
    }

    fn minimum_sample_size(&self) -> usize {
        match self {
            AnyDetector::ZScore(d) => d.minimum_sample_size(),
            AnyDetector::Batch(d) => d.minimum_sample_size(),
        }
    }
}

impl StreamingDetector for AnyDetector {
    fn observe(&mut self, sample: Sample) -> Vec<AnomalyRecord> {
        match self {
            AnyDetector::ZScore(d) => d.observe(sample),
            AnyDetector::Batch(d) => d.observe(sample),
        }
    }

    fn reset(&mut self, origin: u64) {
        match self {
            AnyDetector::ZScore(d) => d.reset(origin),
            AnyDetector::Batch(d) => d.reset(origin),
        }
    }

    fn window(&self) -> &RollingWindow {
        match self {
            AnyDetector::ZScore(d) => d.window(),
            AnyDetector::Batch(d) => d.window(),
        }
    }
}
