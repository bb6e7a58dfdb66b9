//! Shared helpers for anomaly-detect integration tests

#![allow(dead_code)]

use anomaly_detect::{AnomalyRecord, StreamProcessor, StreamingDetector};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Flat signal with small deterministic jitter
pub fn jittered_flat(len: usize, level: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| level + rng.gen_range(-0.5..0.5)).collect()
}

/// Feed every value and return the full anomaly log
pub fn run<D: StreamingDetector>(
    processor: &mut StreamProcessor<D>,
    values: &[f64],
) -> Vec<AnomalyRecord> {
    for &v in values {
        processor.ingest(v).expect("finite test input");
    }
    processor.anomaly_log().to_vec()
}
