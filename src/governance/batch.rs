//! Batch input and per-cycle outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::bias::{BiasReport, PredictionRecord};
use crate::drift::DriftReport;
use crate::error::{Error, Result};
use crate::escalation::Alert;
use crate::validation::ValidationResult;

/// One transaction with its model output
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchRecord {
    /// Numeric features observed into the drift windows
    pub features: BTreeMap<String, f64>,
    /// Model score used by the bias monitor
    pub score: Option<f64>,
    /// Protected-attribute tags
    pub attributes: BTreeMap<String, String>,
    /// Ground-truth class
    pub label: Option<usize>,
    /// Predicted class
    pub prediction: Option<usize>,
}

impl BatchRecord {
    pub fn with_feature(mut self, name: impl Into<String>, value: f64) -> Self {
        self.features.insert(name.into(), value);
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_attribute(mut self, category: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(category.into(), value.into());
        self
    }

    pub fn with_outcome(mut self, label: usize, prediction: usize) -> Self {
        self.label = Some(label);
        self.prediction = Some(prediction);
        self
    }

    /// The record as bias-monitor input, if it carries a score
    pub fn prediction_record(&self) -> Option<PredictionRecord> {
        self.score.map(|score| PredictionRecord { score, attributes: self.attributes.clone() })
    }
}

/// Records delivered together for one evaluation cycle
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub records: Vec<BatchRecord>,
}

impl Batch {
    pub fn new(records: impl IntoIterator<Item = BatchRecord>) -> Self {
        Self { records: records.into_iter().collect() }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Feature samples grouped by feature name
    pub fn feature_samples(&self) -> BTreeMap<String, Vec<f64>> {
        let mut samples: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for record in &self.records {
            for (name, value) in &record.features {
                samples.entry(name.clone()).or_default().push(*value);
            }
        }
        samples
    }

    pub fn prediction_records(&self) -> Vec<PredictionRecord> {
        self.records.iter().filter_map(BatchRecord::prediction_record).collect()
    }

    /// Records carrying both a label and a prediction
    pub fn labelled(&self) -> impl Iterator<Item = &BatchRecord> {
        self.records.iter().filter(|r| r.label.is_some() && r.prediction.is_some())
    }

    /// Model input rows for the labelled records
    ///
    /// Columns follow the sorted union of feature names over those records.
    /// Fails with `InvalidInput` when any labelled record lacks one of them.
    pub fn labelled_feature_rows(&self) -> Result<Vec<Vec<f64>>> {
        let names: BTreeSet<&str> =
            self.labelled().flat_map(|r| r.features.keys().map(String::as_str)).collect();
        self.labelled()
            .enumerate()
            .map(|(row, record)| {
                names
                    .iter()
                    .map(|&name| {
                        record.features.get(name).copied().ok_or_else(|| {
                            Error::InvalidInput(format!("labelled record {row} is missing feature '{name}'"))
                        })
                    })
                    .collect()
            })
            .collect()
    }
}

/// Result of one sub-check within a cycle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum CheckOutcome<T> {
    Completed(T),
    /// Nothing in the batch for this check
    Skipped(String),
    /// The check rejected its input
    Failed(String),
}

impl<T> CheckOutcome<T> {
    pub fn completed(&self) -> Option<&T> {
        match self {
            CheckOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CheckOutcome::Failed(_))
    }
}

/// Everything one `process_batch` call produced
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CycleOutcome {
    pub timestamp: DateTime<Utc>,
    pub records: usize,
    pub drift: CheckOutcome<DriftReport>,
    pub bias: CheckOutcome<BiasReport>,
    pub validation: CheckOutcome<ValidationResult>,
    /// Alerts raised by this cycle
    pub alerts: Vec<Alert>,
}
