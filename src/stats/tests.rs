//! Tests for the statistics kernel.

use super::*;
use approx::assert_abs_diff_eq;
use proptest::prelude::*;

#[test]
fn test_mean_and_variance() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert_abs_diff_eq!(mean(&values), 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(variance(&values, VarianceKind::Population), 4.0, epsilon = 1e-12);
    assert_abs_diff_eq!(std_dev(&values, VarianceKind::Population), 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(variance(&values, VarianceKind::Sample), 32.0 / 7.0, epsilon = 1e-12);
}

#[test]
fn test_degenerate_descriptives() {
    assert_eq!(mean(&[]), 0.0);
    assert_eq!(variance(&[3.0], VarianceKind::Sample), 0.0);
    assert_eq!(variance(&[], VarianceKind::Population), 0.0);
    assert_eq!(positive_rate(&[], 0.5), 0.0);
    assert!(percentile(&[], 50.0).is_none());
    assert!(Summary::of(&[]).is_none());
}

#[test]
fn test_percentile_interpolates() {
    let values = [1.0, 2.0, 3.0, 4.0];
    assert_abs_diff_eq!(percentile(&values, 25.0).unwrap(), 1.75, epsilon = 1e-12);
    assert_abs_diff_eq!(percentile(&values, 50.0).unwrap(), 2.5, epsilon = 1e-12);
    assert_abs_diff_eq!(percentile(&values, 75.0).unwrap(), 3.25, epsilon = 1e-12);
    assert_abs_diff_eq!(percentile(&values, 100.0).unwrap(), 4.0, epsilon = 1e-12);
}

#[test]
fn test_positive_rate_is_strict() {
    assert_abs_diff_eq!(positive_rate(&[0.5, 0.6, 0.4, 0.9], 0.5), 0.5, epsilon = 1e-12);
}

#[test]
fn test_summary() {
    let summary = Summary::of(&[0.8, 0.9, 1.0]).unwrap();
    assert_eq!(summary.count, 3);
    assert_abs_diff_eq!(summary.mean, 0.9, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.min, 0.8, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.max, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.std, (0.02f64 / 3.0).sqrt(), epsilon = 1e-12);
}

#[test]
fn test_normal_cdf_reference_points() {
    assert_abs_diff_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(normal_cdf(1.96), 0.975, epsilon = 1e-4);
    assert_abs_diff_eq!(normal_cdf(-1.96), 0.025, epsilon = 1e-4);
    assert_abs_diff_eq!(erf(1.0), 0.842_700_79, epsilon = 1e-6);
}

#[test]
fn test_students_t_reference_points() {
    // t = 2.0 with 10 df: two-tailed p = 0.0734
    assert_abs_diff_eq!(students_t_two_tailed(2.0, 10.0), 0.073_388, epsilon = 1e-4);
    // Large df converges to the normal distribution
    assert_abs_diff_eq!(students_t_two_tailed(1.96, 1e6), 0.05, epsilon = 1e-3);
    assert_abs_diff_eq!(students_t_two_tailed(0.0, 5.0), 1.0, epsilon = 1e-9);
    assert_eq!(students_t_two_tailed(f64::INFINITY, 5.0), 0.0);
    assert_eq!(students_t_two_tailed(1.0, 0.0), 1.0);
}

#[test]
fn test_incomplete_beta_bounds_and_symmetry() {
    assert_eq!(regularized_incomplete_beta(2.0, 3.0, 0.0), 0.0);
    assert_eq!(regularized_incomplete_beta(2.0, 3.0, 1.0), 1.0);
    // I_x(a, b) = 1 - I_{1-x}(b, a)
    let lhs = regularized_incomplete_beta(2.5, 4.0, 0.3);
    let rhs = 1.0 - regularized_incomplete_beta(4.0, 2.5, 0.7);
    assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-10);
    // I_0.5(a, a) = 0.5
    assert_abs_diff_eq!(regularized_incomplete_beta(3.0, 3.0, 0.5), 0.5, epsilon = 1e-10);
}

#[test]
fn test_ks_p_value_bounds() {
    assert_eq!(ks_p_value(0.0), 1.0);
    assert!(ks_p_value(0.5) > 0.9);
    assert!(ks_p_value(2.0) < 0.001);
}

#[test]
fn test_ks_identical_samples() {
    let data: Vec<f64> = (0..100).map(f64::from).collect();
    let outcome = ks_two_sample(&data, &data);
    assert_eq!(outcome.statistic, 0.0);
    assert_eq!(outcome.p_value, 1.0);
}

#[test]
fn test_ks_ties_do_not_inflate_statistic() {
    let constant = vec![10.0; 100];
    let outcome = ks_two_sample(&constant, &constant);
    assert_eq!(outcome.statistic, 0.0);
    assert_eq!(outcome.p_value, 1.0);
}

#[test]
fn test_ks_shifted_distribution() {
    let baseline: Vec<f64> = (0..100).map(f64::from).collect();
    let current: Vec<f64> = (50..150).map(f64::from).collect();
    let outcome = ks_two_sample(&baseline, &current);
    assert_abs_diff_eq!(outcome.statistic, 0.5, epsilon = 1e-12);
    assert!(outcome.p_value < 0.001);
}

#[test]
fn test_ks_misses_small_tail_contamination() {
    let baseline = vec![10.0; 100];
    let mut current = vec![10.0; 95];
    current.extend(vec![1000.0; 5]);
    let outcome = ks_two_sample(&baseline, &current);
    assert_abs_diff_eq!(outcome.statistic, 0.05, epsilon = 1e-12);
    assert!(outcome.p_value > 0.5);
}

#[test]
fn test_mann_whitney_detects_tail_contamination() {
    let baseline = vec![10.0; 100];
    let mut current = vec![10.0; 95];
    current.extend(vec![1000.0; 5]);
    let outcome = mann_whitney_u(&baseline, &current);
    assert_abs_diff_eq!(outcome.statistic, 5250.0, epsilon = 1e-9);
    assert!(outcome.p_value < 0.05, "p = {}", outcome.p_value);
    assert!(outcome.p_value > 0.01, "p = {}", outcome.p_value);
}

#[test]
fn test_mann_whitney_identical_samples() {
    let data: Vec<f64> = (0..50).map(|i| f64::from(i % 7)).collect();
    let outcome = mann_whitney_u(&data, &data);
    assert!(outcome.p_value > 0.99);
}

#[test]
fn test_mann_whitney_all_values_equal() {
    let outcome = mann_whitney_u(&[1.0; 20], &[1.0; 30]);
    assert_eq!(outcome.p_value, 1.0);
}

#[test]
fn test_empty_samples_are_undetermined() {
    for outcome in [
        ks_two_sample(&[], &[1.0]),
        mann_whitney_u(&[1.0], &[]),
        welch_t_test(&[1.0], &[1.0, 2.0]),
    ] {
        assert_eq!(outcome.p_value, 1.0);
    }
}

#[test]
fn test_welch_detects_mean_shift() {
    let baseline = vec![10.0; 100];
    let mut current = vec![10.0; 95];
    current.extend(vec![1000.0; 5]);
    let outcome = welch_t_test(&baseline, &current);
    assert!(outcome.p_value < 0.05);
    assert!(outcome.statistic < 0.0);
}

#[test]
fn test_welch_zero_variance_is_undetermined() {
    let outcome = welch_t_test(&[0.7; 10], &[0.7; 40]);
    assert_eq!(outcome.p_value, 1.0);
}

#[test]
fn test_welch_same_distribution() {
    let a: Vec<f64> = (0..60).map(|i| f64::from(i % 10) / 10.0).collect();
    let outcome = welch_t_test(&a, &a);
    assert_abs_diff_eq!(outcome.statistic, 0.0, epsilon = 1e-12);
    assert!(outcome.p_value > 0.99);
}

proptest! {
    #[test]
    fn prop_p_values_in_unit_interval(
        a in proptest::collection::vec(-1000.0f64..1000.0, 1..80),
        b in proptest::collection::vec(-1000.0f64..1000.0, 1..80),
    ) {
        for outcome in [ks_two_sample(&a, &b), mann_whitney_u(&a, &b), welch_t_test(&a, &b)] {
            prop_assert!((0.0..=1.0).contains(&outcome.p_value));
        }
    }

    #[test]
    fn prop_ks_statistic_in_unit_interval(
        a in proptest::collection::vec(-10.0f64..10.0, 1..80),
        b in proptest::collection::vec(-10.0f64..10.0, 1..80),
    ) {
        let outcome = ks_two_sample(&a, &b);
        prop_assert!((0.0..=1.0).contains(&outcome.statistic));
    }

    #[test]
    fn prop_sample_against_itself_never_significant(
        a in proptest::collection::vec(0.0f64..100.0, 2..80),
    ) {
        prop_assert!(ks_two_sample(&a, &a).p_value >= 0.05);
        prop_assert!(mann_whitney_u(&a, &a).p_value >= 0.05);
        prop_assert!(welch_t_test(&a, &a).p_value >= 0.05);
    }
}
