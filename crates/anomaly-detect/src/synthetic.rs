//! Seasonal sample source for demos, benchmarks and tests
//!
//! Produces `base + amplitude * sin(2*pi*i / period) + noise` for each step
//! `i`. With probability `anomaly_probability` a spike `value + U(spike_min,
//! spike_max)` is emitted right after the normal sample, so the output can be
//! longer than the number of steps requested.

use anomaly_core::{Error, Result};
use rand::prelude::*;
use rand::distributions::Uniform;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Additive noise applied to every normal sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Noise {
    /// Uniform in `[-half_width, half_width]`
    Uniform { half_width: f64 },
    /// Zero-mean normal
    Gaussian { std_dev: f64 },
}

/// Shape of the generated stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalParameters {
    pub base: f64,
    pub amplitude: f64,
    /// Samples per seasonal cycle
    pub period: f64,
    pub noise: Noise,
    /// Chance of a spike after each normal sample
    pub anomaly_probability: f64,
    pub spike_min: f64,
    pub spike_max: f64,
}

impl Default for SeasonalParameters {
    fn default() -> Self {
        Self {
            base: 50.0,
            amplitude: 10.0,
            period: 100.0,
            noise: Noise::Uniform { half_width: 5.0 },
            anomaly_probability: 0.05,
            spike_min: 20.0,
            spike_max: 40.0,
        }
    }
}

/// Generated values and where the spikes went
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntheticStream {
    pub values: Vec<f64>,
    /// Positions in `values` holding injected spikes, ascending
    pub injected: Vec<usize>,
}

impl SyntheticStream {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_injected(&self, position: usize) -> bool {
        self.injected.binary_search(&position).is_ok()
    }
}

enum NoiseSampler {
    Uniform(Uniform<f64>),
    Gaussian(Normal<f64>),
}

impl NoiseSampler {
    fn sample(&self, rng: &mut StdRng) -> f64 {
        match self {
            NoiseSampler::Uniform(d) => d.sample(rng),
            NoiseSampler::Gaussian(d) => d.sample(rng),
        }
    }
}

/// Seedable seasonal stream generator
pub struct SeasonalStream {
    params: SeasonalParameters,
    rng: StdRng,
    noise: NoiseSampler,
    spike: Uniform<f64>,
}

impl SeasonalStream {
    /// Create a generator; `seed = None` draws a seed from the OS
    pub fn new(params: SeasonalParameters, seed: Option<u64>) -> Result<Self> {
        if !(params.period.is_finite() && params.period > 0.0) {
            return Err(Error::config("period", format!("must be positive, got {}", params.period)));
        }
        if !(0.0..=1.0).contains(&params.anomaly_probability) {
            return Err(Error::config(
                "anomaly_probability",
                format!("must lie in [0, 1], got {}", params.anomaly_probability),
            ));
        }
        if !(params.spike_min.is_finite()
            && params.spike_max.is_finite()
            && params.spike_min <= params.spike_max)
        {
            return Err(Error::config(
                "spike_min",
                format!("must not exceed spike_max ({} > {})", params.spike_min, params.spike_max),
            ));
        }

        let noise = match params.noise {
            Noise::Uniform { half_width } => {
                if !(half_width.is_finite() && half_width >= 0.0) {
                    return Err(Error::config(
                        "half_width",
                        format!("must be non-negative, got {half_width}"),
                    ));
                }
                NoiseSampler::Uniform(Uniform::new_inclusive(-half_width, half_width))
            }
            Noise::Gaussian { std_dev } => NoiseSampler::Gaussian(
                Normal::new(0.0, std_dev).map_err(|e| Error::config("std_dev", e))?,
            ),
        };
        let spike = Uniform::new_inclusive(params.spike_min, params.spike_max);
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            params,
            rng,
            noise,
            spike,
        })
    }

    pub fn parameters(&self) -> &SeasonalParameters {
        &self.params
    }

    /// Noise-free seasonal value at step `i`
    pub fn seasonal_value(&self, i: usize) -> f64 {
        self.params.base + self.params.amplitude * (2.0 * PI * i as f64 / self.params.period).sin()
    }

    /// Generate `steps` normal samples plus any injected spikes
    pub fn generate(&mut self, steps: usize) -> SyntheticStream {
        let mut stream = SyntheticStream {
            values: Vec::with_capacity(steps + steps / 10),
            injected: Vec::new(),
        };

        for i in 0..steps {
            let value = self.seasonal_value(i) + self.noise.sample(&mut self.rng);
            stream.values.push(value);

            if self.rng.gen_bool(self.params.anomaly_probability) {
                stream.injected.push(stream.values.len());
                stream.values.push(value + self.spike.sample(&mut self.rng));
            }
        }
        stream
    }
}
