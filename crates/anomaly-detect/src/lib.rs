//! Streaming anomaly detectors
//!
//! This crate turns a sequence of real values into a log of anomalies, each
//! tagged with the global index of the sample it refers to.
//!
//! # Detectors
//!
//! - **Z-score** ([`ZScoreDetector`]): flags a sample whose distance from the
//!   window mean exceeds `threshold` standard deviations
//! - **Batch outlier** ([`BatchOutlierDetector`]): once the window is full,
//!   fits an unsupervised [`OutlierModel`] on the whole window and reports
//!   every position it labels anomalous
//!   - [`IsolationForest`]: random isolation trees (default)
//!   - [`IqrModel`]: quartile fences
//!
//! [`StreamProcessor`] owns the global index counter, validates incoming
//! values and keeps the append-only anomaly log.
//!
//! # Usage
//!
//! ```rust
//! use anomaly_detect::{StreamProcessor, ZScoreDetector};
//!
//! let mut processor = StreamProcessor::new(ZScoreDetector::new(100, 3.0)?);
//! for i in 0..200 {
//!     let value = if i == 150 { 500.0 } else { 10.0 + (i % 5) as f64 };
//!     processor.ingest(value)?;
//! }
//!
//! assert_eq!(processor.unique_anomalies()[0].global_index, 150);
//! # Ok::<(), anomaly_core::Error>(())
//! ```
//!
//! Detectors can also be chosen at runtime from JSON:
//!
//! ```rust
//! use anomaly_detect::{DetectorConfig, StreamProcessor};
//!
//! let config = DetectorConfig::from_json_str(
//!     r#"{ "method": "batch", "window_size": 50, "model": { "kind": "iqr", "multiplier": 1.5 } }"#,
//! )?;
//! let processor = StreamProcessor::from_config(&config)?;
//! assert_eq!(processor.next_index(), 0);
//! # Ok::<(), anomaly_core::Error>(())
//! ```

pub mod batch;
pub mod config;
pub mod models;
pub mod processor;
pub mod synthetic;
pub mod traits;
pub mod visualization;
pub mod zscore;

pub use batch::{BatchOutlierDetector, BatchParameters};
pub use config::{AnyDetector, DetectorConfig};
pub use models::{IqrModel, IsolationForest, ModelConfig};
pub use processor::{IngestSummary, StreamProcessor};
pub use synthetic::{Noise, SeasonalParameters, SeasonalStream, SyntheticStream};
pub use traits::{ConfigurableDetector, DetectorProperties, OutlierModel, StreamingDetector};
pub use visualization::{AnomalyVisualizer, CsvVisualizer, NullVisualizer};
pub use zscore::{StatsScope, ZScoreDetector, ZScoreParameters};

pub use anomaly_core::{AnomalyRecord, Error, Label, Result, RollingWindow, Sample};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::traits::{
        ConfigurableDetector, DetectorProperties, OutlierModel, StreamingDetector,
    };
    pub use crate::{
        AnyDetector, BatchOutlierDetector, DetectorConfig, StreamProcessor, ZScoreDetector,
    };
    pub use anomaly_core::prelude::*;
}
