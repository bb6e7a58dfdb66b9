//! Core types for streaming anomaly detection
//!
//! This crate provides the pieces every detector is built from:
//!
//! - [`RollingWindow`]: fixed-capacity buffer that evicts the oldest value
//!   on overflow and tracks the global index of its oldest entry
//! - [`RunningStats`]: mean and floored standard deviation of a window
//! - [`Sample`], [`AnomalyRecord`], [`Label`]: the values flowing between
//!   a stream, its detector and the anomaly log
//! - [`Error`]/[`Result`]: the error type shared by all stream-anomaly crates
//!
//! # Example
//!
//! ```rust
//! use anomaly_core::RollingWindow;
//!
//! let mut window = RollingWindow::new(3)?;
//! for v in [1.0, 2.0, 3.0, 4.0] {
//!     window.push(v);
//! }
//!
//! // The oldest value was evicted, so local position 0 is global index 1
//! assert_eq!(window.base_index(), 1);
//! assert_eq!(window.snapshot().to_vec(), vec![2.0, 3.0, 4.0]);
//! # Ok::<(), anomaly_core::Error>(())
//! ```

pub mod error;
pub mod stats;
pub mod types;
pub mod utils;
pub mod window;

pub use error::{Error, Result};
pub use stats::{RunningStats, DEFAULT_STD_FLOOR};
pub use types::{AnomalyRecord, Label, Sample};
pub use window::{RollingWindow, WindowSnapshot};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{AnomalyRecord, Label, Result, RollingWindow, RunningStats, Sample};
}
