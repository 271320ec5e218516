//! Descriptive statistics over `f64` samples.

use serde::{Deserialize, Serialize};

/// Denominator used for variance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarianceKind {
    /// Divide by `n`
    Population,
    /// Divide by `n - 1` (Bessel's correction)
    Sample,
}

/// Arithmetic mean; 0 for an empty sample
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Variance; 0 when there are too few values for the requested kind
pub fn variance(values: &[f64], kind: VarianceKind) -> f64 {
    let n = values.len();
    let denom = match kind {
        VarianceKind::Population if n >= 1 => n as f64,
        VarianceKind::Sample if n >= 2 => (n - 1) as f64,
        _ => return 0.0,
    };
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / denom
}

/// Standard deviation
pub fn std_dev(values: &[f64], kind: VarianceKind) -> f64 {
    variance(values, kind).sqrt()
}

/// Percentile in `[0, 100]` with linear interpolation between closest ranks
///
/// Returns `None` for an empty sample.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Fraction of values strictly above `threshold`; 0 for an empty sample
pub fn positive_rate(values: &[f64], threshold: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().filter(|&&v| v > threshold).count() as f64 / values.len() as f64
}

/// Mean/std/min/max over a series of observations
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// Summarize a sample (population std); `None` when empty
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self {
            count: values.len(),
            mean: mean(values),
            std: std_dev(values, VarianceKind::Population),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}
