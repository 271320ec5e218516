//! Validation engine implementation.

use chrono::Utc;
use std::collections::BTreeMap;

use super::confusion::ConfusionMatrix;
use super::kfold::KFold;
use super::metric::Metric;
use super::metrics::ClassMetrics;
use super::types::{
    CrossValidationInput, CrossValidationResult, Model, ValidationResult, ValidationSummary,
};
use crate::config::ValidationConfig;
use crate::error::{Error, Result};
use crate::history::History;
use crate::sink::{default_sink, MonitorEvent, SharedSink};
use crate::stats::{mean, std_dev, Summary, VarianceKind};

/// Checks classification performance against configured thresholds
pub struct ValidationEngine {
    config: ValidationConfig,
    history: History<ValidationResult>,
    sink: SharedSink,
}

impl ValidationEngine {
    /// Create an engine retaining at most `max_history_size` results
    pub fn new(config: ValidationConfig, max_history_size: usize) -> Self {
        Self { config, history: History::new(max_history_size), sink: default_sink() }
    }

    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// Compute accuracy and weighted precision/recall/F1, then cross-validate
    ///
    /// # Errors
    ///
    /// `InvalidInput` when labels and predictions are empty or misaligned, or
    /// when cross-validation is enabled and `cv` is missing, misaligned, or
    /// has fewer samples than folds. Nothing is recorded on error.
    pub fn validate(
        &mut self,
        labels: &[usize],
        predictions: &[usize],
        cv: Option<CrossValidationInput<'_>>,
    ) -> Result<ValidationResult> {
        if labels.is_empty() {
            return Err(Error::InvalidInput("no labels to validate".into()));
        }
        let cm = ConfusionMatrix::from_predictions(predictions, labels)?;
        let metrics = Self::compute_metrics(&cm);

        let cross_validation = if self.config.cross_validation {
            let input = cv.ok_or_else(|| {
                Error::InvalidInput("cross-validation is enabled but no model was supplied".into())
            })?;
            Some(self.cross_validate(input, labels)?)
        } else {
            None
        };

        let mut failed_metrics = Vec::new();
        for metric in self.config.thresholds.failures(&metrics) {
            let value = metrics.get(&metric).copied().unwrap_or_default();
            self.sink.emit(&MonitorEvent::ValidationFailed {
                metric: metric.name().to_string(),
                value,
                threshold: self.config.thresholds.threshold(metric),
            });
            failed_metrics.push(metric.name().to_string());
        }
        if let Some(cv) = cross_validation.as_ref().filter(|cv| cv.mean < self.config.cv_threshold) {
            self.sink.emit(&MonitorEvent::ValidationFailed {
                metric: "cv_mean".into(),
                value: cv.mean,
                threshold: self.config.cv_threshold,
            });
            failed_metrics.push("cv_mean".to_string());
        }

        let result = ValidationResult {
            metrics,
            cross_validation,
            passed: failed_metrics.is_empty(),
            failed_metrics,
            sample_count: labels.len(),
            timestamp: Utc::now(),
        };
        self.history.push(result.clone());
        Ok(result)
    }

    fn compute_metrics(cm: &ConfusionMatrix) -> BTreeMap<Metric, f64> {
        let per_class = ClassMetrics::from_confusion_matrix(cm);
        BTreeMap::from([
            (Metric::Accuracy, cm.accuracy()),
            (Metric::Precision, per_class.weighted_precision()),
            (Metric::Recall, per_class.weighted_recall()),
            (Metric::F1, per_class.weighted_f1()),
        ])
    }

    /// Accuracy per fold, refitting the model on each training split when it supports it
    fn cross_validate(
        &self,
        input: CrossValidationInput<'_>,
        labels: &[usize],
    ) -> Result<CrossValidationResult> {
        let folds = self.config.cv_folds;
        if input.features.len() != labels.len() {
            return Err(Error::InvalidInput(format!(
                "{} feature rows for {} labels",
                input.features.len(),
                labels.len()
            )));
        }
        if labels.len() < folds {
            return Err(Error::InvalidInput(format!(
                "{} samples is fewer than {folds} cross-validation folds",
                labels.len()
            )));
        }

        let kfold = KFold::new(folds).with_seed(self.config.cv_seed).with_shuffle(self.config.cv_shuffle);
        let mut scores = Vec::with_capacity(folds);
        for (train_idx, test_idx) in kfold.split(labels.len()) {
            let train_x: Vec<Vec<f64>> = train_idx.iter().map(|&i| input.features[i].clone()).collect();
            let train_y: Vec<usize> = train_idx.iter().map(|&i| labels[i]).collect();
            let test_x: Vec<Vec<f64>> = test_idx.iter().map(|&i| input.features[i].clone()).collect();
            let test_y: Vec<usize> = test_idx.iter().map(|&i| labels[i]).collect();

            let fitted = input.model.fit_fold(&train_x, &train_y);
            let model: &dyn Model = match fitted.as_deref() {
                Some(refit) => refit,
                None => input.model,
            };
            let predicted = model.predict(&test_x);

            scores.push(ConfusionMatrix::from_predictions(&predicted, &test_y)?.accuracy());
        }

        Ok(CrossValidationResult {
            mean: mean(&scores),
            std: std_dev(&scores, VarianceKind::Population),
            folds: scores.len(),
            scores,
        })
    }

    /// Derive pass rate and per-metric statistics from history
    pub fn get_validation_summary(&self) -> ValidationSummary {
        let total_validations = self.history.len();
        let passed_validations = self.history.iter().filter(|r| r.passed).count();

        let metrics = Metric::ALL
            .iter()
            .filter_map(|&metric| {
                let values: Vec<f64> = self.history.iter().filter_map(|r| r.metric(metric)).collect();
                Summary::of(&values).map(|summary| (metric, summary))
            })
            .collect();

        ValidationSummary {
            total_validations,
            passed_validations,
            pass_rate: if total_validations == 0 {
                0.0
            } else {
                passed_validations as f64 / total_validations as f64
            },
            last_validation: self.history.latest().map(|r| r.timestamp),
            metrics,
        }
    }

    pub fn history(&self) -> &History<ValidationResult> {
        &self.history
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("config", &self.config)
            .field("history", &self.history.len())
            .finish()
    }
}
