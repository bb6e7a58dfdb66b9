//! Value types shared by detectors and the stream processor

use serde::{Deserialize, Serialize};
use std::fmt;

/// One measurement of the stream, tagged with its position in it
///
/// `global_index` is assigned by the producer in strictly increasing order
/// starting at 0 and is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub global_index: u64,
    pub value: f64,
}

impl Sample {
    pub fn new(global_index: u64, value: f64) -> Self {
        Self { global_index, value }
    }
}

/// A value flagged as anomalous, located by its global stream index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    /// Position in the unbounded stream
    pub global_index: u64,
    /// The flagged measurement
    pub value: f64,
}

impl AnomalyRecord {
    pub fn new(global_index: u64, value: f64) -> Self {
        Self { global_index, value }
    }
}

impl From<Sample> for AnomalyRecord {
    fn from(sample: Sample) -> Self {
        Self::new(sample.global_index, sample.value)
    }
}

impl fmt::Display for AnomalyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Anomaly {{ index: {}, value: {:.4} }}", self.global_index, self.value)
    }
}

/// Per-position classification produced by an outlier model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Normal,
    Anomaly,
}

impl Label {
    pub fn is_anomaly(self) -> bool {
        self == Label::Anomaly
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Normal => write!(f, "Normal"),
            Label::Anomaly => write!(f, "Anomaly"),
        }
    }
}
