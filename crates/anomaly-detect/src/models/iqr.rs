//! Interquartile-range outlier model

use crate::models::ensure_finite;
use crate::traits::OutlierModel;
use anomaly_core::utils::{quantile_sorted, sorted};
use anomaly_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Interquartile Range (IQR) based outlier model
///
/// Fences are `q1 - multiplier * iqr` and `q3 + multiplier * iqr`. A value's
/// score is its distance outside the fences in IQR units (0 inside them).
/// When the quartiles coincide the raw distance is used, so a lone spike in
/// an otherwise flat window still scores above its neighbours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IqrModel {
    multiplier: f64,
    q1: f64,
    q3: f64,
    fitted: bool,
}

impl IqrModel {
    /// Create a new IQR model
    ///
    /// # Arguments
    ///
    /// * `multiplier` - IQR multiplier for the fences (typically 1.5)
    pub fn new(multiplier: f64) -> Result<Self> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(Error::config("multiplier", format!("must be positive, got {multiplier}")));
        }

        Ok(Self {
            multiplier,
            q1: 0.0,
            q3: 0.0,
            fitted: false,
        })
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn q1(&self) -> f64 {
        self.q1
    }

    pub fn q3(&self) -> f64 {
        self.q3
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Lower and upper fences
    pub fn fences(&self) -> (f64, f64) {
        let iqr = self.iqr();
        (self.q1 - self.multiplier * iqr, self.q3 + self.multiplier * iqr)
    }
}

impl Default for IqrModel {
    fn default() -> Self {
        Self {
            multiplier: 1.5,
            q1: 0.0,
            q3: 0.0,
            fitted: false,
        }
    }
}

impl OutlierModel for IqrModel {
    fn name(&self) -> &'static str {
        "IQR"
    }

    fn fit(&mut self, values: &[f64]) -> Result<()> {
        if values.len() < 4 {
            return Err(Error::InsufficientData {
                expected: 4,
                actual: values.len(),
            });
        }
        ensure_finite(values)?;

        let sorted = sorted(values);
        self.q1 = quantile_sorted(&sorted, 0.25);
        self.q3 = quantile_sorted(&sorted, 0.75);
        self.fitted = true;
        Ok(())
    }

    fn score(&self, values: &[f64]) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(Error::Model("IQR model must be fitted before scoring".to_string()));
        }
        ensure_finite(values)?;

        let iqr = self.iqr();
        let (lower, upper) = self.fences();
        let scale = if iqr > 0.0 { iqr } else { 1.0 };
        Ok(values
            .iter()
            .map(|&x| {
                if x < lower {
                    (lower - x) / scale
                } else if x > upper {
                    (x - upper) / scale
                } else {
                    0.0
                }
            })
            .collect())
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
