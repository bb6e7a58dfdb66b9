//! Stream ingestion and the anomaly log
//!
//! [`StreamProcessor`] owns the authoritative global index counter. Each
//! accepted sample is stamped with the next index and handed to the active
//! detector; every reported anomaly is appended to an append-only log in
//! report order. Non-finite samples are rejected before they touch any
//! state, so they don't consume an index.

use crate::config::{AnyDetector, DetectorConfig};
use crate::traits::StreamingDetector;
use anomaly_core::{AnomalyRecord, Error, Result, Sample};
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

/// Outcome of ingesting a batch of values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestSummary {
    pub accepted: usize,
    pub rejected: usize,
    /// Anomalies reported during this batch, in report order
    pub anomalies: Vec<AnomalyRecord>,
}

/// Drives a detector over a stream and records what it reports
#[derive(Debug)]
pub struct StreamProcessor<D: StreamingDetector = AnyDetector> {
    detector: D,
    next_index: u64,
    log: Vec<AnomalyRecord>,
    rejected: u64,
}

impl<D: StreamingDetector> StreamProcessor<D> {
    /// Create a processor starting at global index 0
    pub fn new(mut detector: D) -> Self {
        detector.reset(0);
        Self {
            detector,
            next_index: 0,
            log: Vec::new(),
            rejected: 0,
        }
    }

    /// Replace the active detector
    ///
    /// The new detector starts empty at the current `next_index`; the anomaly
    /// log and the counter are kept. Returns the previous detector.
    pub fn configure(&mut self, mut detector: D) -> D {
        detector.reset(self.next_index);
        std::mem::replace(&mut self.detector, detector)
    }

    /// Ingest one value
    ///
    /// Returns the anomalies reported at this step (possibly none), or
    /// [`Error::InvalidSample`] for NaN and infinite values.
    #[instrument(level = "trace", skip(self))]
    pub fn ingest(&mut self, value: f64) -> Result<Vec<AnomalyRecord>> {
        if !value.is_finite() {
            self.rejected += 1;
            warn!(value, next_index = self.next_index, "rejecting non-finite sample");
            return Err(Error::invalid_sample(value));
        }

        let sample = Sample::new(self.next_index, value);
        self.next_index += 1;

        let anomalies = self.detector.observe(sample);
        for record in &anomalies {
            info!(
                index = record.global_index,
                value = record.value,
                detector = self.detector.algorithm_name(),
                "anomaly detected"
            );
        }
        self.log.extend_from_slice(&anomalies);
        Ok(anomalies)
    }

    /// Ingest every value, skipping rejected ones
    pub fn ingest_all<I>(&mut self, values: I) -> IngestSummary
    where
        I: IntoIterator<Item = f64>,
    {
        let mut summary = IngestSummary::default();
        for value in values {
            match self.ingest(value) {
                Ok(anomalies) => {
                    summary.accepted += 1;
                    summary.anomalies.extend(anomalies);
                }
                Err(_) => summary.rejected += 1,
            }
        }
        summary
    }

    /// Every anomaly reported so far, in report order (duplicates included)
    pub fn anomaly_log(&self) -> &[AnomalyRecord] {
        &self.log
    }

    /// Logged anomalies deduplicated by global index, ascending
    ///
    /// When an index was reported more than once the first report wins.
    pub fn unique_anomalies(&self) -> Vec<AnomalyRecord> {
        let mut unique = BTreeMap::new();
        for record in &self.log {
            unique.entry(record.global_index).or_insert(*record);
        }
        unique.into_values().collect()
    }

    /// Global index the next accepted sample will receive
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    pub fn samples_accepted(&self) -> u64 {
        self.next_index
    }

    pub fn samples_rejected(&self) -> u64 {
        self.rejected
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }
}

impl StreamProcessor<AnyDetector> {
    /// Build the configured detector and wrap it
    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        Ok(Self::new(config.build()?))
    }
}
