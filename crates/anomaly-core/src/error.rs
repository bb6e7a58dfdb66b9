//! Error types for streaming anomaly detection
//!
//! Provides a unified error type for all stream-anomaly crates.

use thiserror::Error;

/// Core error type for streaming anomaly detection
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid construction parameter (capacity, threshold, contamination, ...)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A sample was rejected before it touched any detector state
    #[error("Invalid sample: {value} is not a finite number")]
    InvalidSample { value: f64 },

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// An outlier model could not be fitted or evaluated
    #[error("Model error: {0}")]
    Model(String),

    /// Configuration (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error for a named parameter
    pub fn config(name: &str, reason: impl std::fmt::Display) -> Self {
        Self::Config(format!("'{name}' {reason}"))
    }

    /// Create an error for a rejected sample
    pub fn invalid_sample(value: f64) -> Self {
        Self::InvalidSample { value }
    }

    /// Create an error for NaN/Inf values found inside a batch
    pub fn non_finite(context: &str) -> Self {
        Self::Model(format!("{context} contains NaN or infinite values"))
    }

    /// Whether this error rejected a single sample rather than a whole operation
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidSample { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("capacity must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: capacity must be positive");

        let err = Error::InvalidSample { value: f64::NAN };
        assert_eq!(err.to_string(), "Invalid sample: NaN is not a finite number");

        let err = Error::InsufficientData { expected: 10, actual: 5 };
        assert_eq!(err.to_string(), "Insufficient data: expected at least 10 samples, got 5");

        let err = Error::Model("no distinct values".to_string());
        assert_eq!(err.to_string(), "Model error: no distinct values");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::config("threshold", "must be positive, got -1");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: 'threshold' must be positive, got -1"
        );

        let err = Error::invalid_sample(f64::INFINITY);
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "Invalid sample: inf is not a finite number");

        let err = Error::non_finite("window");
        assert!(!err.is_rejection());
        assert_eq!(err.to_string(), "Model error: window contains NaN or infinite values");
    }

    #[test]
    fn test_error_from_io_error() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => assert!(err.to_string().contains("file not found")),
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<f64>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: Error = anyhow::anyhow!("custom error message").into();
        match err {
            Error::Other(_) => assert!(err.to_string().contains("custom error message")),
            _ => panic!("Wrong error type"),
        }
    }
}
