//! Core traits for streaming anomaly detection
//!
//! Two layers:
//! - Streaming detectors own a [`RollingWindow`] and classify one sample at
//!   a time ([`StreamingDetector`])
//! - Outlier models classify every position of a whole window at once and
//!   are plugged into the batch detector ([`OutlierModel`])

use anomaly_core::{AnomalyRecord, Label, Result, RollingWindow, Sample};

/// Properties of a detector that don't depend on its state
pub trait DetectorProperties {
    /// Get the name of the detection algorithm
    fn algorithm_name(&self) -> &'static str;

    /// Number of samples the window must hold before anything is classified
    fn minimum_sample_size(&self) -> usize;
}

/// A detector fed one sample at a time
///
/// `observe` never fails: insufficient data and model failures both yield
/// an empty result for that step.
pub trait StreamingDetector: DetectorProperties {
    /// Push one sample and return the anomalies found at this step
    fn observe(&mut self, sample: Sample) -> Vec<AnomalyRecord>;

    /// Drop all state; the next sample observed will carry global index `origin`
    fn reset(&mut self, origin: u64);

    /// The detector's window
    fn window(&self) -> &RollingWindow;
}

/// Construction from a validated parameter set
pub trait ConfigurableDetector: Sized {
    type Parameters;

    fn from_parameters(params: Self::Parameters) -> Result<Self>;
    fn parameters(&self) -> &Self::Parameters;
}

/// Unsupervised outlier model re-trained on a whole window
///
/// Scores follow the "higher = more anomalous" convention. Positions are
/// labelled with a contamination cut: the threshold is the
/// `(1 - contamination)` quantile of the fit-time scores and a position is
/// an anomaly iff its score is strictly above it.
pub trait OutlierModel: Send {
    /// Get the name of the model
    fn name(&self) -> &'static str;

    /// Fit the model to the window's values
    fn fit(&mut self, values: &[f64]) -> Result<()>;

    /// Score each value with the fitted model
    fn score(&self, values: &[f64]) -> Result<Vec<f64>>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;

    /// Default: fit then score the same values
    fn fit_score(&mut self, values: &[f64]) -> Result<Vec<f64>> {
        self.fit(values)?;
        self.score(values)
    }

    /// Default: fit, score and apply the contamination cut
    fn fit_and_classify(&mut self, values: &[f64], contamination: f64) -> Result<Vec<Label>> {
        let scores = self.fit_score(values)?;
        let threshold = crate::models::contamination_threshold(&scores, contamination);
        Ok(crate::models::label_scores(&scores, threshold))
    }
}
