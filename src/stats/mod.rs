//! Statistics kernel
//!
//! Descriptive statistics and the two-sample tests used by the drift and bias
//! monitors:
//! - Kolmogorov-Smirnov (distribution shape)
//! - Mann-Whitney U (rank shift, sensitive to tail contamination)
//! - Welch's t-test (mean comparison with unequal variances)

mod descriptive;
mod distribution;
mod hypothesis;

#[cfg(test)]
mod tests;

pub use descriptive::{mean, percentile, positive_rate, std_dev, variance, Summary, VarianceKind};
pub use distribution::{erf, ks_p_value, normal_cdf, regularized_incomplete_beta, students_t_two_tailed};
pub use hypothesis::{ks_two_sample, mann_whitney_u, welch_t_test, TestOutcome};
