//! Utility functions for working with data slices

use std::cmp::Ordering;

/// Sort data and return a new vector
///
/// Handles NaN values by placing them at the end.
///
/// # Examples
///
/// ```rust
/// use anomaly_core::utils::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(b),
    });
    sorted
}

/// Calculate the mean of a slice
///
/// Returns 0.0 for empty slices. Stays finite for finite input even when
/// the plain sum would overflow.
///
/// # Examples
///
/// ```rust
/// use anomaly_core::utils::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert_eq!(mean(&[]), 0.0);
/// ```
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    if sum.is_finite() {
        return sum / data.len() as f64;
    }
    let scale = max_abs(data);
    if !scale.is_finite() {
        return sum / data.len() as f64;
    }
    let scaled: f64 = data.iter().map(|&x| x / scale).sum();
    scale * (scaled / data.len() as f64)
}

/// Calculate the population standard deviation (divides by `n`)
///
/// Returns 0.0 for slices with less than 2 elements. Falls back to a
/// rescaled computation when the squared deviations overflow.
///
/// # Examples
///
/// ```rust
/// use anomaly_core::utils::population_std_dev;
///
/// let sd = population_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert!((sd - 2.0).abs() < 1e-12);
/// ```
pub fn population_std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let sd = std_dev_scaled(data, 1.0);
    if sd.is_finite() {
        return sd;
    }
    let scale = max_abs(data);
    if scale.is_finite() && scale > 0.0 {
        scale * std_dev_scaled(data, scale)
    } else {
        sd
    }
}

fn std_dev_scaled(data: &[f64], scale: f64) -> f64 {
    let m = mean(data) / scale;
    let variance: f64 = data
        .iter()
        .map(|&x| {
            let diff = x / scale - m;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;
    variance.sqrt()
}

fn max_abs(data: &[f64]) -> f64 {
    data.iter().fold(0.0, |acc: f64, &x| acc.max(x.abs()))
}

/// Quantile of already-sorted data using linear interpolation between
/// closest ranks (`h = (n - 1) * p`).
///
/// Returns NaN for empty input. `p` is clamped to `[0, 1]`.
///
/// # Examples
///
/// ```rust
/// use anomaly_core::utils::quantile_sorted;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(quantile_sorted(&data, 0.5), 3.0);
/// assert!((quantile_sorted(&data, 0.8) - 4.2).abs() < 1e-12);
/// ```
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let p = p.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}
