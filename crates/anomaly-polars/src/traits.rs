//! Streaming anomaly detection over DataFrame columns

use crate::{Error, Result};
use anomaly_detect::{DetectorConfig, StreamProcessor};
use polars::prelude::*;
use tracing::debug;

/// Extension trait for running a stream detector over a Polars column
pub trait AnomalyFrameExt {
    /// Feed a numeric column through a fresh detector, row by row
    ///
    /// # Arguments
    /// * `column` - Numeric column (f64, f32 or integer)
    /// * `config` - Detector to build
    ///
    /// # Returns
    /// DataFrame with one row per emitted record: `row` (position in the
    /// input frame), `global_index` (stream index) and `value`. Null and
    /// non-finite rows are skipped without consuming a stream index, so
    /// `row` and `global_index` diverge after the first skipped row.
    fn detect_stream_anomalies(&self, column: &str, config: &DetectorConfig) -> Result<DataFrame>;
}

impl AnomalyFrameExt for DataFrame {
    fn detect_stream_anomalies(&self, column: &str, config: &DetectorConfig) -> Result<DataFrame> {
        let column_data = self
            .column(column)
            .map_err(|_| Error::InvalidColumn(column.to_string()))?;

        let float_column = match column_data.dtype() {
            DataType::Float64 => column_data.clone(),
            DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8 => column_data.cast(&DataType::Float64)?,
            dt => {
                return Err(Error::TypeMismatch {
                    expected: "numeric".to_string(),
                    got: format!("{:?}", dt),
                });
            }
        };
        let values = float_column.f64()?;

        let mut processor = StreamProcessor::from_config(config)?;
        // Stream index -> input row, for accepted rows only
        let mut row_of_index: Vec<u64> = Vec::with_capacity(values.len());
        let mut rows = Vec::new();
        let mut global_indices = Vec::new();
        let mut anomaly_values = Vec::new();
        let mut skipped = 0usize;

        for (row, value) in values.into_iter().enumerate() {
            let Some(value) = value else {
                skipped += 1;
                continue;
            };
            let Ok(anomalies) = processor.ingest(value) else {
                skipped += 1;
                continue;
            };
            row_of_index.push(row as u64);

            for record in anomalies {
                rows.push(row_of_index[record.global_index as usize]);
                global_indices.push(record.global_index);
                anomaly_values.push(record.value);
            }
        }

        debug!(
            column,
            rows = values.len(),
            skipped,
            records = rows.len(),
            "stream detection finished"
        );

        Ok(DataFrame::new(vec![
            Series::new(PlSmallStr::from("row"), rows).into(),
            Series::new(PlSmallStr::from("global_index"), global_indices).into(),
            Series::new(PlSmallStr::from("value"), anomaly_values).into(),
        ])?)
    }
}
