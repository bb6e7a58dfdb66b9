//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

pub const EPSILON: f64 = 1e-10;

/// Deterministic, non-constant test data
pub fn generate_test_data(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64 + 0.1).collect()
}
