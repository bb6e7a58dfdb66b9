//! Streaming anomaly detection
//!
//! Facade over the workspace crates:
//!
//! - [`anomaly_core`]: rolling window, running statistics, shared error type
//! - [`anomaly_detect`]: z-score and batch outlier detectors, the stream
//!   processor and detector configuration
//! - `anomaly_polars` (feature `polars`): DataFrame integration and table
//!   cleaning
//!
//! # Example
//!
//! ```rust
//! use stream_anomaly::prelude::*;
//!
//! let mut processor = StreamProcessor::new(BatchOutlierDetector::new(50, 0.05)?);
//! for i in 0..120 {
//!     processor.ingest(if i == 100 { 250.0 } else { (i % 10) as f64 })?;
//! }
//!
//! assert!(processor
//!     .unique_anomalies()
//!     .iter()
//!     .any(|record| record.global_index == 100));
//! # Ok::<(), stream_anomaly::Error>(())
//! ```

pub use anomaly_core;
pub use anomaly_detect;
#[cfg(feature = "polars")]
pub use anomaly_polars;

pub use anomaly_core::{AnomalyRecord, Error, Label, Result, RollingWindow, Sample};
pub use anomaly_detect::{
    AnyDetector, BatchOutlierDetector, DetectorConfig, StreamProcessor, ZScoreDetector,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use anomaly_detect::prelude::*;
}
