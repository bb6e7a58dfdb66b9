//! Common test utilities for anomaly-polars tests

#![allow(dead_code)]

use polars::prelude::*;

/// Single-column frame named `values`
pub fn create_test_df(values: &[f64]) -> DataFrame {
    df!["values" => values].unwrap()
}

/// Extract a u64 column as a Vec
pub fn u64_column(df: &DataFrame, name: &str) -> Vec<u64> {
    df.column(name)
        .unwrap()
        .u64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}

/// Extract an f64 column as a Vec
pub fn f64_column(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}

/// Write `contents` to a uniquely named CSV in the temp directory
pub fn write_temp_csv(stem: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("{stem}_{}.csv", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}
