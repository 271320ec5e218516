//! YAML schema definitions for monitor configuration
//!
//! Every section is `#[serde(default)]`, so a partial file only needs to name
//! the values it overrides.

use serde::{Deserialize, Serialize};

/// Complete monitor configuration, supplied once at construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub drift: DriftConfig,
    pub bias: BiasConfig,
    pub validation: ValidationConfig,
    pub escalation: EscalationConfig,
    pub history: HistoryConfig,
}

/// Two-sample test used by the drift monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftTest {
    /// Kolmogorov-Smirnov (maximum CDF distance)
    KolmogorovSmirnov,
    /// Mann-Whitney U rank-sum test (sensitive to tail shifts)
    #[default]
    MannWhitney,
}

impl DriftTest {
    /// Get the name of this test
    pub fn name(&self) -> &'static str {
        match self {
            DriftTest::KolmogorovSmirnov => "Kolmogorov-Smirnov",
            DriftTest::MannWhitney => "Mann-Whitney U",
        }
    }
}

/// Drift monitor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Drift is reported when `p_value < threshold`
    pub threshold: f64,
    /// Maximum number of current samples retained per metric
    pub window_size: usize,
    pub test: DriftTest,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self { threshold: 0.05, window_size: 1000, test: DriftTest::default() }
    }
}

/// Bias monitor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasConfig {
    /// Groups with `combined_score > bias_threshold` are flagged
    pub bias_threshold: f64,
    /// Mean differences with `p_value > significance_level` are zeroed
    pub significance_level: f64,
    /// Groups smaller than this are reported as insufficient data
    pub min_samples: usize,
    /// Maximum tolerated fraction of IQR outliers
    pub outlier_threshold: f64,
    /// Scores strictly above this value count as positive outcomes
    pub positive_score_threshold: f64,
    /// Protected-attribute categories to partition by (empty = all attributes)
    pub categories: Vec<String>,
}

impl Default for BiasConfig {
    fn default() -> Self {
        Self {
            bias_threshold: 0.1,
            significance_level: 0.05,
            min_samples: 30,
            outlier_threshold: 0.05,
            positive_score_threshold: 0.5,
            categories: ["age_group", "gender", "location", "income_bracket"]
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        }
    }
}

/// Minimum acceptable value per classification metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricThresholds {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl MetricThresholds {
    /// Same threshold for every metric
    pub fn uniform(threshold: f64) -> Self {
        Self { accuracy: threshold, precision: threshold, recall: threshold, f1: threshold }
    }
}

impl Default for MetricThresholds {
    fn default() -> Self {
        Self::uniform(0.8)
    }
}

/// Validation engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub thresholds: MetricThresholds,
    pub cross_validation: bool,
    pub cv_folds: usize,
    /// Minimum mean fold score when cross-validation runs
    pub cv_threshold: f64,
    pub cv_seed: u64,
    pub cv_shuffle: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            thresholds: MetricThresholds::default(),
            cross_validation: true,
            cv_folds: 5,
            cv_threshold: 0.8,
            cv_seed: 42,
            cv_shuffle: true,
        }
    }
}

/// Breach escalation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationConfig {
    /// Consecutive violations required to enter the alert state
    pub alert_threshold: u32,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self { alert_threshold: 3 }
    }
}

/// Retention for every bounded history log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_history_size: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_history_size: 1000 }
    }
}
