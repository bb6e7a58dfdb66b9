//! Polars integration for streaming anomaly detection
//!
//! Two pieces:
//! - [`AnomalyFrameExt`]: run any configured detector over a numeric column
//! - [`CleaningPlan`]: column drops, renames, quote stripping and null
//!   filtering for the content/reaction exports
//!
//! # Example
//!
//! ```rust
//! use anomaly_detect::{DetectorConfig, StatsScope, ZScoreParameters};
//! use anomaly_polars::AnomalyFrameExt;
//! use polars::prelude::*;
//!
//! let mut values = vec![5.0; 9];
//! values.push(500.0);
//! let df = df!["latency" => values]?;
//!
//! let config = DetectorConfig::ZScore(ZScoreParameters {
//!     window_size: 10,
//!     scope: StatsScope::ExcludeCurrent,
//!     ..Default::default()
//! });
//! let anomalies = df.detect_stream_anomalies("latency", &config)?;
//! assert_eq!(anomalies.height(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod clean;
mod error;
mod traits;

pub use clean::{clean_tables, read_csv, CleaningPlan};
pub use error::{Error, Result};
pub use traits::AnomalyFrameExt;
