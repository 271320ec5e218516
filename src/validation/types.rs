//! Type definitions for model validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::metric::Metric;
use crate::stats::Summary;

/// Black-box classifier used for cross-validation
pub trait Model: Send + Sync {
    /// Predict one class label per feature row
    fn predict(&self, features: &[Vec<f64>]) -> Vec<usize>;

    /// Train a fresh model on one fold's training split
    ///
    /// Returning `None` evaluates `self` as supplied on every fold.
    fn fit_fold(&self, _features: &[Vec<f64>], _labels: &[usize]) -> Option<Box<dyn Model>> {
        None
    }
}

/// Model and feature rows for cross-validation, aligned with the labels
#[derive(Clone, Copy)]
pub struct CrossValidationInput<'a> {
    pub model: &'a dyn Model,
    pub features: &'a [Vec<f64>],
}

impl<'a> CrossValidationInput<'a> {
    pub fn new(model: &'a dyn Model, features: &'a [Vec<f64>]) -> Self {
        Self { model, features }
    }
}

/// Fold accuracies and their spread
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationResult {
    pub scores: Vec<f64>,
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    pub folds: usize,
}

/// Outcome of one `validate` call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub metrics: BTreeMap<Metric, f64>,
    pub cross_validation: Option<CrossValidationResult>,
    pub passed: bool,
    /// Metric names below threshold, plus `cv_mean` when cross-validation fails
    pub failed_metrics: Vec<String>,
    pub sample_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl ValidationResult {
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(&metric).copied()
    }
}

/// Aggregates over the validation history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total_validations: usize,
    pub passed_validations: usize,
    pub pass_rate: f64,
    pub last_validation: Option<DateTime<Utc>>,
    pub metrics: BTreeMap<Metric, Summary>,
}
