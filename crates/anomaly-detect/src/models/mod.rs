//! Outlier models for the batch detector
//!
//! - [`IsolationForest`]: random isolation trees over the window's values
//! - [`IqrModel`]: quartile fences

mod iqr;
mod isolation_forest;

pub use iqr::IqrModel;
pub use isolation_forest::IsolationForest;

use crate::traits::OutlierModel;
use anomaly_core::utils::{quantile_sorted, sorted};
use anomaly_core::{Error, Label, Result};
use serde::{Deserialize, Serialize};

/// Decision threshold for a set of fit-time scores
///
/// The `(1 - contamination)` quantile, linearly interpolated. Returns NaN for
/// empty input, which labels nothing.
pub fn contamination_threshold(scores: &[f64], contamination: f64) -> f64 {
    quantile_sorted(&sorted(scores), 1.0 - contamination)
}

/// Label each score against a threshold (strictly greater = anomaly)
pub fn label_scores(scores: &[f64], threshold: f64) -> Vec<Label> {
    scores
        .iter()
        .map(|&s| if s > threshold { Label::Anomaly } else { Label::Normal })
        .collect()
}

pub(crate) fn ensure_finite(values: &[f64]) -> Result<()> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::non_finite("window"));
    }
    Ok(())
}

/// Serializable choice of outlier model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelConfig {
    IsolationForest {
        n_estimators: usize,
        max_samples: usize,
        seed: Option<u64>,
    },
    Iqr {
        multiplier: f64,
    },
}

impl ModelConfig {
    /// Validate and instantiate the model
    pub fn build(&self) -> Result<Box<dyn OutlierModel>> {
        Ok(match self {
            ModelConfig::IsolationForest {
                n_estimators,
                max_samples,
                seed,
            } => Box::new(IsolationForest::new(*n_estimators, *max_samples, *seed)?),
            ModelConfig::Iqr { multiplier } => Box::new(IqrModel::new(*multiplier)?),
        })
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig::IsolationForest {
            n_estimators: isolation_forest::DEFAULT_N_ESTIMATORS,
            max_samples: isolation_forest::DEFAULT_MAX_SAMPLES,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contamination_threshold_separates_top_score() {
        let scores = [0.40, 0.42, 0.41, 0.43, 0.90];
        let threshold = contamination_threshold(&scores, 0.2);
        let labels = label_scores(&scores, threshold);
        assert_eq!(
            labels,
            vec![Label::Normal, Label::Normal, Label::Normal, Label::Normal, Label::Anomaly]
        );
    }

    #[test]
    fn test_equal_scores_label_nothing() {
        let scores = [0.5; 8];
        let threshold = contamination_threshold(&scores, 0.1);
        assert!(label_scores(&scores, threshold).iter().all(|l| !l.is_anomaly()));
    }

    #[test]
    fn test_empty_scores() {
        assert!(contamination_threshold(&[], 0.1).is_nan());
        assert!(label_scores(&[], f64::NAN).is_empty());
    }

    #[test]
    fn test_model_config_build() {
        let model = ModelConfig::default().build().unwrap();
        assert_eq!(model.name(), "IsolationForest");
        assert!(!model.is_fitted());

        let model = ModelConfig::Iqr { multiplier: 1.5 }.build().unwrap();
        assert_eq!(model.name(), "IQR");

        assert!(ModelConfig::Iqr { multiplier: 0.0 }.build().is_err());
        assert!(ModelConfig::IsolationForest { n_estimators: 0, max_samples: 256, seed: None }
            .build()
            .is_err());
    }
}
