//! Type definitions for bias detection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key for a group within a category, e.g. `gender=f`
pub fn group_key(category: &str, group: &str) -> String {
    format!("{category}={group}")
}

/// One model output with its protected-attribute tags
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub score: f64,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl PredictionRecord {
    pub fn new(score: f64) -> Self {
        Self { score, attributes: BTreeMap::new() }
    }

    /// Tag the record with a category value
    pub fn with_attribute(mut self, category: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(category.into(), value.into());
        self
    }
}

/// Scores for one demographic group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiasCheckResult {
    /// Attribute value within the category
    pub group_key: String,
    pub category: String,
    /// Group positive rate / overall positive rate (0 when the overall rate is 0)
    pub disparity_ratio: f64,
    /// Standardized mean difference, zeroed when not significant
    pub statistical_score: f64,
    /// `(statistical_score + |disparity_ratio - 1|) / 2`, clamped to [0, 1]
    pub combined_score: f64,
    pub bias_detected: bool,
    pub sample_count: usize,
    pub group_positive_rate: f64,
    pub overall_positive_rate: f64,
    /// Welch t-test p-value, group vs all scores
    pub p_value: f64,
}

/// Per-group outcome of a bias check
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GroupOutcome {
    Scored(BiasCheckResult),
    InsufficientData {
        category: String,
        group_key: String,
        sample_count: usize,
        min_samples: usize,
    },
}

impl GroupOutcome {
    pub fn result(&self) -> Option<&BiasCheckResult> {
        match self {
            GroupOutcome::Scored(result) => Some(result),
            GroupOutcome::InsufficientData { .. } => None,
        }
    }
}

/// Interquartile-range outlier check over all scores
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutlierCheck {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub outlier_count: usize,
    pub outlier_rate: f64,
    pub high_outlier_rate: bool,
}

/// Result of one `detect_bias` call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    pub timestamp: DateTime<Utc>,
    /// Records with a finite score
    pub total_records: usize,
    /// Keyed by `category=group`
    pub groups: BTreeMap<String, GroupOutcome>,
    /// `None` for an empty batch
    pub outliers: Option<OutlierCheck>,
}

impl BiasReport {
    /// Whether any scored group was flagged
    pub fn bias_detected(&self) -> bool {
        self.scored().any(|r| r.bias_detected)
    }

    pub fn scored(&self) -> impl Iterator<Item = &BiasCheckResult> {
        self.groups.values().filter_map(GroupOutcome::result)
    }

    pub fn group(&self, category: &str, group: &str) -> Option<&GroupOutcome> {
        self.groups.get(&group_key(category, group))
    }

    pub fn high_outlier_rate(&self) -> bool {
        self.outliers.as_ref().is_some_and(|o| o.high_outlier_rate)
    }
}

/// Snapshot stored in the bias history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiasHistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub bias_detected: bool,
    pub total_records: usize,
    /// Scored groups only, keyed by `category=group`
    pub results: BTreeMap<String, BiasCheckResult>,
    pub high_outlier_rate: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupBiasStats {
    pub checks: usize,
    pub total_biased: usize,
    pub bias_frequency: f64,
}

/// Aggregates over the bias history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiasStatistics {
    pub total_checks: usize,
    pub bias_detected_count: usize,
    pub bias_frequency: f64,
    pub last_check: Option<DateTime<Utc>>,
    pub groups: BTreeMap<String, GroupBiasStats>,
}
