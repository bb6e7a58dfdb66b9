//! Batch outlier detection over a full rolling window
//!
//! Once the window is full, an outlier model is re-fitted on all of its
//! values and every position is classified. Positions labelled as anomalies
//! are translated to global stream indices through the window's own
//! `base_index`, never through the caller's counter.
//!
//! The whole window is reclassified on every step, so a sample can be
//! reported again on each call while it stays in the window and keeps
//! classifying as an anomaly, and it can stop being reported once newer
//! samples move the decision boundary. The detector does not deduplicate;
//! callers that need a set deduplicate by `global_index`.

use crate::models::{contamination_threshold, label_scores, ModelConfig};
use crate::traits::{ConfigurableDetector, DetectorProperties, OutlierModel, StreamingDetector};
use anomaly_core::{AnomalyRecord, Error, Label, Result, RollingWindow, Sample};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Batch outlier detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchParameters {
    /// Window capacity
    pub window_size: usize,
    /// Expected proportion of anomalies, in (0, 0.5)
    pub contamination: f64,
    /// Re-fit the model every `refit_every` full-window steps (1 = every step)
    pub refit_every: usize,
    /// Outlier model to fit
    pub model: ModelConfig,
}

impl Default for BatchParameters {
    fn default() -> Self {
        Self {
            window_size: 100,
            contamination: 0.05,
            refit_every: 1,
            model: ModelConfig::default(),
        }
    }
}

/// Windowed batch outlier detector
pub struct BatchOutlierDetector {
    window: RollingWindow,
    params: BatchParameters,
    model: Box<dyn OutlierModel>,
    /// Decision threshold fixed at the last successful fit
    threshold: Option<f64>,
    steps_since_fit: usize,
    fits: u64,
}

impl BatchOutlierDetector {
    /// Create a detector backed by an isolation forest
    ///
    /// # Arguments
    ///
    /// * `capacity` - Window size
    /// * `contamination` - Expected anomaly proportion, in (0, 0.5)
    pub fn new(capacity: usize, contamination: f64) -> Result<Self> {
        Self::from_parameters(BatchParameters {
            window_size: capacity,
            contamination,
            ..Default::default()
        })
    }

    /// Create a detector around an already constructed model
    pub fn with_model(
        capacity: usize,
        contamination: f64,
        model: impl OutlierModel + 'static,
    ) -> Result<Self> {
        let params = BatchParameters {
            window_size: capacity,
            contamination,
            ..Default::default()
        };
        Self::build(params, Box::new(model))
    }

    /// Re-fit every `refit_every` full-window steps instead of every step
    pub fn with_refit_every(mut self, refit_every: usize) -> Result<Self> {
        if refit_every == 0 {
            return Err(Error::config("refit_every", "must be at least 1, got 0"));
        }
        self.params.refit_every = refit_every;
        Ok(self)
    }

    pub fn contamination(&self) -> f64 {
        self.params.contamination
    }

    pub fn refit_every(&self) -> usize {
        self.params.refit_every
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Decision threshold from the last successful fit
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// Number of successful model fits so far
    pub fn fit_count(&self) -> u64 {
        self.fits
    }

    fn build(params: BatchParameters, model: Box<dyn OutlierModel>) -> Result<Self> {
        let c = params.contamination;
        if !(c > 0.0 && c < 0.5) {
            return Err(Error::config("contamination", format!("must lie in (0, 0.5), got {c}")));
        }
        if params.refit_every == 0 {
            return Err(Error::config("refit_every", "must be at least 1, got 0"));
        }
        Ok(Self {
            window: RollingWindow::new(params.window_size)?,
            params,
            model,
            threshold: None,
            steps_since_fit: 0,
            fits: 0,
        })
    }

    /// Labels for the current (full) window, or `None` when the model failed
    fn classify_window(&mut self) -> Option<Vec<Label>> {
        let refit = self.threshold.is_none() || self.steps_since_fit + 1 >= self.params.refit_every;
        let values = self.window.as_slice();

        let scores = if refit {
            match self.model.fit_score(values) {
                Ok(scores) => {
                    let threshold = contamination_threshold(&scores, self.params.contamination);
                    self.threshold = Some(threshold);
                    self.steps_since_fit = 0;
                    self.fits += 1;
                    debug!(
                        model = self.model.name(),
                        base_index = self.window.base_index(),
                        threshold,
                        "outlier model re-fitted"
                    );
                    scores
                }
                Err(e) => {
                    self.threshold = None;
                    debug!(error = %e, "model fit failed, no anomalies this step");
                    return None;
                }
            }
        } else {
            self.steps_since_fit += 1;
            match self.model.score(values) {
                Ok(scores) => scores,
                Err(e) => {
                    debug!(error = %e, "model scoring failed, no anomalies this step");
                    return None;
                }
            }
        };

        if scores.len() != self.window.len() {
            debug!(
                expected = self.window.len(),
                actual = scores.len(),
                "model returned wrong number of scores"
            );
            return None;
        }
        let threshold = self.threshold?;
        Some(label_scores(&scores, threshold))
    }
}

impl std::fmt::Debug for BatchOutlierDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchOutlierDetector")
            .field("window", &self.window)
            .field("params", &self.params)
            .field("model", &self.model.name())
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl ConfigurableDetector for BatchOutlierDetector {
    type Parameters = BatchParameters;

    fn from_parameters(params: Self::Parameters) -> Result<Self> {
        let model = params.model.build()?;
        Self::build(params, model)
    }

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }
}

impl DetectorProperties for BatchOutlierDetector {
    fn algorithm_name(&self) -> &'static str {
        "BatchOutlier"
    }

    fn minimum_sample_size(&self) -> usize {
        self.window.capacity()
    }
}

impl StreamingDetector for BatchOutlierDetector {
    fn observe(&mut self, sample: Sample) -> Vec<AnomalyRecord> {
        let evicted = self.window.push(sample.value);
        if self.window.next_index() != sample.global_index + 1 {
            trace!(
                index = sample.global_index,
                window_index = self.window.next_index() - 1,
                "sample index differs from window position"
            );
        }

        if !self.window.is_full() {
            trace!(
                index = sample.global_index,
                filled = self.window.len(),
                capacity = self.window.capacity(),
                "warming up"
            );
            return Vec::new();
        }
        trace!(index = sample.global_index, ?evicted, "classifying window");

        let Some(labels) = self.classify_window() else {
            return Vec::new();
        };

        let snapshot = self.window.snapshot();
        labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.is_anomaly())
            .filter_map(|(j, _)| {
                snapshot
                    .value_at(j)
                    .map(|value| AnomalyRecord::new(snapshot.global_index_of(j), value))
            })
            .collect()
    }

    fn reset(&mut self, origin: u64) {
        self.window.reset(origin);
        self.threshold = None;
        self.steps_since_fit = 0;
    }

    fn window(&self) -> &RollingWindow {
        &self.window
    }
}
