//! Type definitions for drift detection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::DriftTest;

/// Severity bands derived from the p-value
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// p >= 0.05
    Low,
    /// 0.01 <= p < 0.05
    Medium,
    /// p < 0.01
    High,
}

impl Severity {
    /// Classify a p-value into its severity band
    pub fn from_p_value(p_value: f64) -> Self {
        if p_value < 0.01 {
            Severity::High
        } else if p_value < 0.05 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Result of comparing one metric's window against its baseline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftCheckResult {
    pub metric_name: String,
    pub test: DriftTest,
    /// Test statistic (KS distance or Mann-Whitney U)
    pub statistic: f64,
    pub p_value: f64,
    pub drift_detected: bool,
    pub severity: Severity,
    pub baseline_size: usize,
    pub current_size: usize,
    pub timestamp: DateTime<Utc>,
}

/// Why a metric could not be checked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsufficientReason {
    /// Current samples exist but no baseline was set
    MissingBaseline,
    /// A baseline exists but the current window is empty
    EmptyWindow,
}

impl std::fmt::Display for InsufficientReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsufficientReason::MissingBaseline => write!(f, "no baseline"),
            InsufficientReason::EmptyWindow => write!(f, "no current samples"),
        }
    }
}

/// Per-metric outcome of a drift check
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DriftOutcome {
    Checked(DriftCheckResult),
    Insufficient { reason: InsufficientReason },
}

impl DriftOutcome {
    /// The check result, if the metric was evaluable
    pub fn result(&self) -> Option<&DriftCheckResult> {
        match self {
            DriftOutcome::Checked(result) => Some(result),
            DriftOutcome::Insufficient { .. } => None,
        }
    }
}

/// Everything one `check_drift` call produced
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub timestamp: DateTime<Utc>,
    pub outcomes: BTreeMap<String, DriftOutcome>,
}

impl DriftReport {
    /// Whether any checked metric drifted
    pub fn drift_detected(&self) -> bool {
        self.checked().any(|r| r.drift_detected)
    }

    /// Checked results in metric-name order
    pub fn checked(&self) -> impl Iterator<Item = &DriftCheckResult> {
        self.outcomes.values().filter_map(DriftOutcome::result)
    }

    /// Result for a single metric
    pub fn get(&self, metric: &str) -> Option<&DriftOutcome> {
        self.outcomes.get(metric)
    }
}

/// One drift check as retained in history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftHistoryEntry {
    pub timestamp: DateTime<Utc>,
    /// True if any metric drifted in this check
    pub drift_detected: bool,
    pub results: BTreeMap<String, DriftCheckResult>,
}

/// Per-metric drift frequency
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricDriftStats {
    /// Checks in which this metric was evaluated
    pub checks: usize,
    pub total_drifts: usize,
    pub drift_frequency: f64,
}

/// Drift statistics derived from history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftStatistics {
    pub total_checks: usize,
    pub drift_detected_count: usize,
    /// `drift_detected_count / total_checks`, 0 with no history
    pub drift_frequency: f64,
    pub last_check: Option<DateTime<Utc>>,
    pub metrics: BTreeMap<String, MetricDriftStats>,
}
