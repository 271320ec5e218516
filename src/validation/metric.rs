//! Validation metric names and threshold lookup

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::MetricThresholds;

/// Classification metric checked against a threshold
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Accuracy,
    /// Support-weighted precision
    Precision,
    /// Support-weighted recall
    Recall,
    /// Support-weighted F1
    F1,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Accuracy, Metric::Precision, Metric::Recall, Metric::F1];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Accuracy => "accuracy",
            Metric::Precision => "precision",
            Metric::Recall => "recall",
            Metric::F1 => "f1",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl MetricThresholds {
    /// Minimum acceptable value for a metric
    pub fn threshold(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Accuracy => self.accuracy,
            Metric::Precision => self.precision,
            Metric::Recall => self.recall,
            Metric::F1 => self.f1,
        }
    }

    /// Metrics strictly below their threshold, in metric order
    pub fn failures(&self, metrics: &BTreeMap<Metric, f64>) -> Vec<Metric> {
        metrics
            .iter()
            .filter(|(&metric, &value)| value < self.threshold(metric))
            .map(|(&metric, _)| metric)
            .collect()
    }
}
