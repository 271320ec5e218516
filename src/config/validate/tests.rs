//! Unit tests for configuration validation

use super::error::ConfigError;
use super::validator::validate_config;
use crate::config::schema::*;

#[test]
fn test_default_config_is_valid() {
    assert!(validate_config(&MonitorConfig::default()).is_ok());
}

#[test]
fn test_drift_threshold_bounds() {
    let mut config = MonitorConfig::default();
    config.drift.threshold = 0.0;
    assert!(matches!(validate_config(&config), Err(ConfigError::InvalidDriftThreshold(_))));

    config.drift.threshold = 1.0;
    assert!(matches!(validate_config(&config), Err(ConfigError::InvalidDriftThreshold(_))));
}

#[test]
fn test_zero_window_size() {
    let mut config = MonitorConfig::default();
    config.drift.window_size = 0;
    assert!(matches!(validate_config(&config), Err(ConfigError::InvalidWindowSize(0))));
}

#[test]
fn test_negative_bias_threshold() {
    let mut config = MonitorConfig::default();
    config.bias.bias_threshold = -0.1;
    assert!(matches!(validate_config(&config), Err(ConfigError::InvalidBiasThreshold(_))));
}

#[test]
fn test_min_samples_too_small() {
    let mut config = MonitorConfig::default();
    config.bias.min_samples = 1;
    assert!(matches!(validate_config(&config), Err(ConfigError::InvalidMinSamples(1))));
}

#[test]
fn test_outlier_threshold_above_one() {
    let mut config = MonitorConfig::default();
    config.bias.outlier_threshold = 1.5;
    assert!(matches!(validate_config(&config), Err(ConfigError::InvalidOutlierThreshold(_))));
}

#[test]
fn test_metric_threshold_names_metric() {
    let mut config = MonitorConfig::default();
    config.validation.thresholds.recall = 1.2;
    let err = validate_config(&config).unwrap_err();
    assert_eq!(err, ConfigError::InvalidMetricThreshold { metric: "recall", value: 1.2 });
    assert!(err.to_string().contains("recall"));
}

#[test]
fn test_cv_folds_too_small() {
    let mut config = MonitorConfig::default();
    config.validation.cv_folds = 1;
    assert!(matches!(validate_config(&config), Err(ConfigError::InvalidCvFolds(1))));
}

#[test]
fn test_zero_alert_threshold() {
    let mut config = MonitorConfig::default();
    config.escalation.alert_threshold = 0;
    assert!(matches!(validate_config(&config), Err(ConfigError::InvalidAlertThreshold(0))));
}

#[test]
fn test_zero_history_size() {
    let mut config = MonitorConfig::default();
    config.history.max_history_size = 0;
    assert!(matches!(validate_config(&config), Err(ConfigError::InvalidHistorySize(0))));
}
