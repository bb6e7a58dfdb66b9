//! Isolation forest over one-dimensional windows
//!
//! Each tree recursively splits a subsample at a uniformly random value
//! between its min and max until a point is isolated or the height limit is
//! hit. Points that isolate quickly (short average path) score close to 1.

use crate::models::ensure_finite;
use crate::traits::OutlierModel;
use anomaly_core::{Error, Result};
use rand::prelude::*;
use rand::seq::index;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub(crate) const DEFAULT_N_ESTIMATORS: usize = 100;
pub(crate) const DEFAULT_MAX_SAMPLES: usize = 256;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

enum Node {
    Leaf {
        size: usize,
    },
    Split {
        value: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn build(data: &[f64], height: usize, height_limit: usize, rng: &mut StdRng) -> Node {
        let size = data.len();
        if size <= 1 || height >= height_limit {
            return Node::Leaf { size };
        }

        let (min, max) = data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
        if max - min <= f64::EPSILON * max.abs().max(1.0) {
            return Node::Leaf { size };
        }

        // `max - min` can overflow for finite bounds, so interpolate
        let t: f64 = rng.gen();
        let value = min * (1.0 - t) + max * t;
        let (left, right): (Vec<f64>, Vec<f64>) = data.iter().partition(|&&x| x < value);

        // A split landing exactly on the minimum isolates nothing
        if left.is_empty() || right.is_empty() {
            return Node::Leaf { size };
        }

        Node::Split {
            value,
            left: Box::new(Node::build(&left, height + 1, height_limit, rng)),
            right: Box::new(Node::build(&right, height + 1, height_limit, rng)),
        }
    }

    fn path_length(&self, x: f64) -> f64 {
        let mut node = self;
        let mut depth = 0.0;
        loop {
            match node {
                Node::Leaf { size } => return depth + average_path_length(*size),
                Node::Split { value, left, right } => {
                    node = if x < *value { left } else { right };
                    depth += 1.0;
                }
            }
        }
    }
}

/// Average path length of an unsuccessful BST search over `n` points
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Isolation forest outlier model
///
/// # Arguments
///
/// * `n_estimators` - Number of isolation trees
/// * `max_samples` - Subsample size per tree (capped at the window size)
/// * `seed` - RNG seed; `None` draws one from the OS
pub struct IsolationForest {
    n_estimators: usize,
    max_samples: usize,
    rng: StdRng,
    trees: Vec<Node>,
    sample_size: usize,
}

impl IsolationForest {
    pub fn new(n_estimators: usize, max_samples: usize, seed: Option<u64>) -> Result<Self> {
        if n_estimators == 0 {
            return Err(Error::config("n_estimators", "must be positive, got 0"));
        }
        if max_samples < 2 {
            return Err(Error::config("max_samples", format!("must be at least 2, got {max_samples}")));
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            n_estimators,
            max_samples,
            rng,
            trees: Vec::new(),
            sample_size: 0,
        })
    }

    /// Seeded forest with default sizes
    pub fn seeded(seed: u64) -> Self {
        Self {
            n_estimators: DEFAULT_N_ESTIMATORS,
            max_samples: DEFAULT_MAX_SAMPLES,
            rng: StdRng::seed_from_u64(seed),
            trees: Vec::new(),
            sample_size: 0,
        }
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    fn build_tree(data: &[f64], sample_size: usize, height_limit: usize, seed: u64) -> Node {
        let mut rng = StdRng::seed_from_u64(seed);
        let subsample: Vec<f64> = index::sample(&mut rng, data.len(), sample_size)
            .into_iter()
            .map(|i| data[i])
            .collect();
        Node::build(&subsample, 0, height_limit, &mut rng)
    }
}

impl Default for IsolationForest {
    fn default() -> Self {
        Self {
            n_estimators: DEFAULT_N_ESTIMATORS,
            max_samples: DEFAULT_MAX_SAMPLES,
            rng: StdRng::from_entropy(),
            trees: Vec::new(),
            sample_size: 0,
        }
    }
}

impl std::fmt::Debug for IsolationForest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IsolationForest")
            .field("n_estimators", &self.n_estimators)
            .field("max_samples", &self.max_samples)
            .field("fitted_trees", &self.trees.len())
            .field("sample_size", &self.sample_size)
            .finish()
    }
}

impl OutlierModel for IsolationForest {
    fn name(&self) -> &'static str {
        "IsolationForest"
    }

    fn fit(&mut self, values: &[f64]) -> Result<()> {
        if values.len() < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: values.len(),
            });
        }
        ensure_finite(values)?;

        let sample_size = self.max_samples.min(values.len());
        let height_limit = (sample_size as f64).log2().ceil() as usize;
        // Per-tree seeds keep the forest identical with or without `parallel`
        let seeds: Vec<u64> = (0..self.n_estimators).map(|_| self.rng.gen()).collect();

        #[cfg(feature = "parallel")]
        let trees: Vec<Node> = seeds
            .par_iter()
            .map(|&seed| Self::build_tree(values, sample_size, height_limit, seed))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let trees: Vec<Node> = seeds
            .iter()
            .map(|&seed| Self::build_tree(values, sample_size, height_limit, seed))
            .collect();

        self.trees = trees;
        self.sample_size = sample_size;
        debug!(
            trees = self.trees.len(),
            sample_size, height_limit, "isolation forest fitted"
        );
        Ok(())
    }

    fn score(&self, values: &[f64]) -> Result<Vec<f64>> {
        if self.trees.is_empty() {
            return Err(Error::Model("isolation forest must be fitted before scoring".to_string()));
        }
        ensure_finite(values)?;

        let normalizer = average_path_length(self.sample_size);
        let n_trees = self.trees.len() as f64;
        Ok(values
            .iter()
            .map(|&x| {
                let mean_path = self.trees.iter().map(|t| t.path_length(x)).sum::<f64>() / n_trees;
                if normalizer > 0.0 {
                    2f64.powf(-mean_path / normalizer)
                } else {
                    0.5
                }
            })
            .collect())
    }

    fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }
}
