//! Two-sample hypothesis tests.
//!
//! Every test returns `p_value = 1.0` for degenerate input (an empty sample or
//! zero pooled variance) so callers never have to special-case NaN.

use serde::{Deserialize, Serialize};

use super::descriptive::{mean, variance, VarianceKind};
use super::distribution::{ks_p_value, normal_cdf, students_t_two_tailed};

/// Test statistic and two-sided p-value
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub statistic: f64,
    pub p_value: f64,
}

impl TestOutcome {
    fn undetermined() -> Self {
        Self { statistic: 0.0, p_value: 1.0 }
    }
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Two-sample Kolmogorov-Smirnov test
///
/// D is the maximum distance between the empirical CDFs, evaluated only after
/// every observation equal to the current value has been consumed from both
/// samples, so ties never inflate the statistic.
pub fn ks_two_sample(a: &[f64], b: &[f64]) -> TestOutcome {
    if a.is_empty() || b.is_empty() {
        return TestOutcome::undetermined();
    }
    let a = sorted(a);
    let b = sorted(b);
    let n1 = a.len() as f64;
    let n2 = b.len() as f64;

    let mut d_max = 0.0f64;
    let mut i = 0usize;
    let mut j = 0usize;
    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        let diff = (i as f64 / n1 - j as f64 / n2).abs();
        d_max = d_max.max(diff);
    }

    let n_eff = (n1 * n2) / (n1 + n2);
    let lambda = d_max * n_eff.sqrt();
    TestOutcome { statistic: d_max, p_value: ks_p_value(lambda) }
}

/// Two-sided Mann-Whitney U test (normal approximation)
///
/// Tied observations share their average rank; the variance carries the tie
/// correction and the z-score a 0.5 continuity correction. The reported
/// statistic is U for sample `b`.
pub fn mann_whitney_u(a: &[f64], b: &[f64]) -> TestOutcome {
    if a.is_empty() || b.is_empty() {
        return TestOutcome::undetermined();
    }
    let n1 = a.len();
    let n2 = b.len();
    let n = n1 + n2;

    // (value, from_b)
    let mut pooled: Vec<(f64, bool)> =
        a.iter().map(|&v| (v, false)).chain(b.iter().map(|&v| (v, true))).collect();
    pooled.sort_by(|x, y| x.0.total_cmp(&y.0));

    let mut rank_sum_b = 0.0;
    let mut tie_term = 0.0;
    let mut start = 0usize;
    while start < n {
        let mut end = start;
        while end + 1 < n && pooled[end + 1].0 == pooled[start].0 {
            end += 1;
        }
        let avg_rank = (start + end) as f64 / 2.0 + 1.0;
        let ties = (end - start + 1) as f64;
        tie_term += ties.powi(3) - ties;
        rank_sum_b += pooled[start..=end].iter().filter(|(_, from_b)| *from_b).count() as f64
            * avg_rank;
        start = end + 1;
    }

    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let nf = n as f64;
    let u = rank_sum_b - n2f * (n2f + 1.0) / 2.0;
    let mu = n1f * n2f / 2.0;
    let var = n1f * n2f / 12.0 * ((nf + 1.0) - tie_term / (nf * (nf - 1.0)));
    if var <= 0.0 {
        return TestOutcome { statistic: u, p_value: 1.0 };
    }

    let z = ((u - mu).abs() - 0.5).max(0.0) / var.sqrt();
    let p_value = (2.0 * (1.0 - normal_cdf(z))).clamp(0.0, 1.0);
    TestOutcome { statistic: u, p_value }
}

/// Welch's unequal-variance t-test
///
/// Uses sample variances and the Welch-Satterthwaite degrees of freedom.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> TestOutcome {
    if a.len() < 2 || b.len() < 2 {
        return TestOutcome::undetermined();
    }
    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let v1 = variance(a, VarianceKind::Sample) / n1;
    let v2 = variance(b, VarianceKind::Sample) / n2;
    let se2 = v1 + v2;
    if se2 <= 0.0 {
        return TestOutcome::undetermined();
    }

    let t = (mean(a) - mean(b)) / se2.sqrt();
    let df = se2.powi(2) / (v1.powi(2) / (n1 - 1.0) + v2.powi(2) / (n2 - 1.0));
    TestOutcome { statistic: t, p_value: students_t_two_tailed(t, df) }
}
