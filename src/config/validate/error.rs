//! Configuration error types
//!
//! Defines every rejected configuration value.

/// Configuration error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid drift threshold: {0} (must be > 0.0 and < 1.0)")]
    InvalidDriftThreshold(f64),

    #[error("Invalid window size: {0} (must be > 0)")]
    InvalidWindowSize(usize),

    #[error("Invalid bias threshold: {0} (must be >= 0.0)")]
    InvalidBiasThreshold(f64),

    #[error("Invalid significance level: {0} (must be > 0.0 and < 1.0)")]
    InvalidSignificanceLevel(f64),

    #[error("Invalid min_samples: {0} (must be >= 2)")]
    InvalidMinSamples(usize),

    #[error("Invalid outlier threshold: {0} (must be in [0.0, 1.0])")]
    InvalidOutlierThreshold(f64),

    #[error("Invalid positive score threshold: {0} (must be finite)")]
    InvalidPositiveScoreThreshold(f64),

    #[error("Invalid {metric} threshold: {value} (must be in [0.0, 1.0])")]
    InvalidMetricThreshold { metric: &'static str, value: f64 },

    #[error("Invalid cv_folds: {0} (must be >= 2)")]
    InvalidCvFolds(usize),

    #[error("Invalid alert threshold: {0} (must be > 0)")]
    InvalidAlertThreshold(u32),

    #[error("Invalid max_history_size: {0} (must be > 0)")]
    InvalidHistorySize(usize),
}
