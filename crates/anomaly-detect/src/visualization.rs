//! Output hooks for detection runs
//!
//! Detection code reports what it saw through [`AnomalyVisualizer`] without
//! depending on any particular output format. [`NullVisualizer`] compiles to
//! no-ops; [`CsvVisualizer`] writes plain CSV files that any plotting tool can
//! pick up.

use anomaly_core::{AnomalyRecord, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io;
use tracing::debug;

/// Sink for a stream, its anomalies and the thresholds used
pub trait AnomalyVisualizer {
    /// Record the stream values, position `i` being global index `i`
    fn record_stream(&mut self, values: &[f64]) -> Result<()>;

    /// Record detected anomalies (duplicates are allowed)
    fn record_anomalies(&mut self, anomalies: &[AnomalyRecord]) -> Result<()>;

    /// Record named thresholds, e.g. `("z_threshold", 3.0)`
    fn record_thresholds(&mut self, thresholds: &[(&str, f64)]) -> Result<()>;

    /// Write outputs; returns the paths of generated files
    fn save(&self, output_prefix: &str) -> Result<Vec<String>>;

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Visualizer that does nothing
#[derive(Default, Clone, Copy, Debug)]
pub struct NullVisualizer;

impl AnomalyVisualizer for NullVisualizer {
    #[inline(always)]
    fn record_stream(&mut self, _: &[f64]) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn record_anomalies(&mut self, _: &[AnomalyRecord]) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn record_thresholds(&mut self, _: &[(&str, f64)]) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn save(&self, _: &str) -> Result<Vec<String>> {
        Ok(vec![])
    }

    #[inline(always)]
    fn is_enabled(&self) -> bool {
        false
    }
}

#[derive(Serialize)]
struct StreamRow {
    index: u64,
    value: f64,
    is_anomaly: bool,
}

#[derive(Serialize)]
struct ThresholdRow<'a> {
    name: &'a str,
    value: f64,
}

/// Writes `{prefix}_stream.csv` (`index,value,is_anomaly`) and, when
/// thresholds were recorded, `{prefix}_thresholds.csv` (`name,value`)
#[derive(Debug, Default, Clone)]
pub struct CsvVisualizer {
    values: Vec<f64>,
    anomalies: BTreeSet<u64>,
    thresholds: Vec<(String, f64)>,
}

impl CsvVisualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct anomalous indices recorded so far
    pub fn anomaly_count(&self) -> usize {
        self.anomalies.len()
    }
}

impl AnomalyVisualizer for CsvVisualizer {
    fn record_stream(&mut self, values: &[f64]) -> Result<()> {
        self.values.extend_from_slice(values);
        Ok(())
    }

    fn record_anomalies(&mut self, anomalies: &[AnomalyRecord]) -> Result<()> {
        self.anomalies.extend(anomalies.iter().map(|a| a.global_index));
        Ok(())
    }

    fn record_thresholds(&mut self, thresholds: &[(&str, f64)]) -> Result<()> {
        self.thresholds
            .extend(thresholds.iter().map(|&(name, value)| (name.to_string(), value)));
        Ok(())
    }

    fn save(&self, output_prefix: &str) -> Result<Vec<String>> {
        let mut paths = Vec::new();

        let stream_path = format!("{output_prefix}_stream.csv");
        let mut writer = csv::Writer::from_path(&stream_path).map_err(io::Error::from)?;
        for (i, &value) in self.values.iter().enumerate() {
            let index = i as u64;
            writer
                .serialize(StreamRow {
                    index,
                    value,
                    is_anomaly: self.anomalies.contains(&index),
                })
                .map_err(io::Error::from)?;
        }
        writer.flush()?;
        paths.push(stream_path);

        if !self.thresholds.is_empty() {
            let threshold_path = format!("{output_prefix}_thresholds.csv");
            let mut writer = csv::Writer::from_path(&threshold_path).map_err(io::Error::from)?;
            for (name, value) in &self.thresholds {
                writer
                    .serialize(ThresholdRow { name, value: *value })
                    .map_err(io::Error::from)?;
            }
            writer.flush()?;
            paths.push(threshold_path);
        }

        debug!(files = paths.len(), rows = self.values.len(), "visualization saved");
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_visualizer_is_disabled() {
        let mut viz = NullVisualizer;
        viz.record_stream(&[1.0, 2.0]).unwrap();
        viz.record_anomalies(&[AnomalyRecord::new(1, 2.0)]).unwrap();
        viz.record_thresholds(&[("threshold", 3.0)]).unwrap();
        assert!(!viz.is_enabled());
        assert!(viz.save("unused").unwrap().is_empty());
    }

    #[test]
    fn test_csv_visualizer_writes_rows() {
        let mut viz = CsvVisualizer::new();
        viz.record_stream(&[1.0, 9.0, 1.5]).unwrap();
        viz.record_anomalies(&[AnomalyRecord::new(1, 9.0), AnomalyRecord::new(1, 9.0)])
            .unwrap();
        viz.record_thresholds(&[("contamination", 0.05)]).unwrap();
        assert_eq!(viz.anomaly_count(), 1);

        let prefix = std::env::temp_dir().join(format!("csv_viz_{}", std::process::id()));
        let prefix = prefix.to_string_lossy().into_owned();
        let paths = viz.save(&prefix).unwrap();
        assert_eq!(paths.len(), 2);

        let stream = std::fs::read_to_string(&paths[0]).unwrap();
        let lines: Vec<&str> = stream.lines().collect();
        assert_eq!(lines[0], "index,value,is_anomaly");
        assert_eq!(lines[1], "0,1.0,false");
        assert_eq!(lines[2], "1,9.0,true");
        assert_eq!(lines.len(), 4);

        let thresholds = std::fs::read_to_string(&paths[1]).unwrap();
        assert!(thresholds.contains("contamination,0.05"));

        for path in paths {
            let _ = std::fs::remove_file(path);
        }
    }
}
