//! Configuration validation logic

use super::error::ConfigError;
use crate::config::schema::MonitorConfig;

fn is_open_probability(value: f64) -> bool {
    value > 0.0 && value < 1.0
}

fn is_closed_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Validate a monitor configuration
///
/// Checks:
/// - p-value thresholds lie strictly inside (0, 1)
/// - Sizes and counts are non-zero
/// - Metric thresholds are valid fractions
pub fn validate_config(config: &MonitorConfig) -> Result<(), ConfigError> {
    let drift = &config.drift;
    if !is_open_probability(drift.threshold) {
        return Err(ConfigError::InvalidDriftThreshold(drift.threshold));
    }
    if drift.window_size == 0 {
        return Err(ConfigError::InvalidWindowSize(drift.window_size));
    }

    let bias = &config.bias;
    if !(bias.bias_threshold >= 0.0 && bias.bias_threshold.is_finite()) {
        return Err(ConfigError::InvalidBiasThreshold(bias.bias_threshold));
    }
    if !is_open_probability(bias.significance_level) {
        return Err(ConfigError::InvalidSignificanceLevel(bias.significance_level));
    }
    // Welch's test needs at least two observations per group
    if bias.min_samples < 2 {
        return Err(ConfigError::InvalidMinSamples(bias.min_samples));
    }
    if !is_closed_probability(bias.outlier_threshold) {
        return Err(ConfigError::InvalidOutlierThreshold(bias.outlier_threshold));
    }
    if !bias.positive_score_threshold.is_finite() {
        return Err(ConfigError::InvalidPositiveScoreThreshold(bias.positive_score_threshold));
    }

    let validation = &config.validation;
    let thresholds = &validation.thresholds;
    for (metric, value) in [
        ("accuracy", thresholds.accuracy),
        ("precision", thresholds.precision),
        ("recall", thresholds.recall),
        ("f1", thresholds.f1),
        ("cross-validation", validation.cv_threshold),
    ] {
        if !is_closed_probability(value) {
            return Err(ConfigError::InvalidMetricThreshold { metric, value });
        }
    }
    if validation.cv_folds < 2 {
        return Err(ConfigError::InvalidCvFolds(validation.cv_folds));
    }

    if config.escalation.alert_threshold == 0 {
        return Err(ConfigError::InvalidAlertThreshold(config.escalation.alert_threshold));
    }

    if config.history.max_history_size == 0 {
        return Err(ConfigError::InvalidHistorySize(config.history.max_history_size));
    }

    Ok(())
}
