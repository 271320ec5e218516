//! Synchronized facade over every monitor.

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::batch::{Batch, CheckOutcome, CycleOutcome};
use crate::bias::{group_key, BiasMonitor, BiasReport, BiasStatistics, PredictionRecord};
use crate::config::MonitorConfig;
use crate::drift::{DriftMonitor, DriftReport, DriftStatistics};
use crate::error::{Error, Result};
use crate::escalation::{BreachEvent, BreachState, BreachTracker};
use crate::report::{
    BiasSection, DriftSection, EscalationSection, GovernanceReport, ValidationSection,
};
use crate::sink::{default_sink, SharedSink};
use crate::validation::{CrossValidationInput, Model, ValidationEngine, ValidationResult, ValidationSummary};

/// Breach key for a drift metric
pub(crate) fn drift_key(metric: &str) -> String {
    format!("drift:{metric}")
}

/// Breach key for a demographic group
pub(crate) fn bias_key(category: &str, group: &str) -> String {
    format!("bias:{}", group_key(category, group))
}

pub(crate) const VALIDATION_KEY: &str = "validation";

fn lock<'a, T>(mutex: &'a Mutex<T>, name: &str) -> Result<MutexGuard<'a, T>> {
    mutex.lock().map_err(|_| Error::Internal(format!("{name} lock poisoned")))
}

/// Runs drift, bias and validation checks per batch and escalates repeat breaches
pub struct GovernanceMonitor {
    config: MonitorConfig,
    drift: Mutex<DriftMonitor>,
    bias: Mutex<BiasMonitor>,
    validation: Mutex<ValidationEngine>,
    tracker: Mutex<BreachTracker>,
    model: Option<Box<dyn Model>>,
}

impl GovernanceMonitor {
    /// Validate the configuration and build every monitor with the tracing sink
    pub fn new(config: MonitorConfig) -> Result<Self> {
        Self::with_sink(config, default_sink())
    }

    /// Build every monitor around a shared event sink
    pub fn with_sink(config: MonitorConfig, sink: SharedSink) -> Result<Self> {
        config.validate()?;
        let max_history = config.history.max_history_size;
        Ok(Self {
            drift: Mutex::new(DriftMonitor::new(config.drift.clone(), max_history).with_sink(sink.clone())),
            bias: Mutex::new(BiasMonitor::new(config.bias.clone(), max_history).with_sink(sink.clone())),
            validation: Mutex::new(
                ValidationEngine::new(config.validation.clone(), max_history).with_sink(sink.clone()),
            ),
            tracker: Mutex::new(BreachTracker::new(config.escalation, max_history).with_sink(sink)),
            model: None,
            config,
        })
    }

    /// Model used for cross-validation
    pub fn with_model(mut self, model: Box<dyn Model>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn update_baseline(&self, metric_name: &str, samples: &[f64]) -> Result<()> {
        lock(&self.drift, "drift")?.update_baseline(metric_name, samples)
    }

    /// Replace several baselines; stops at the first invalid one
    pub fn load_baselines(&self, baselines: &BTreeMap<String, Vec<f64>>) -> Result<()> {
        let mut drift = lock(&self.drift, "drift")?;
        for (name, samples) in baselines {
            drift.update_baseline(name, samples)?;
        }
        Ok(())
    }

    /// Run one evaluation cycle over a batch
    ///
    /// Each check runs independently; an input problem in one is reported as
    /// [`CheckOutcome::Failed`] and does not abort the others. Only a poisoned
    /// lock fails the whole call.
    pub fn process_batch(&self, batch: &Batch) -> Result<CycleOutcome> {
        let timestamp = Utc::now();
        let mut events = Vec::new();

        let drift = self.run_drift(batch)?;
        if let CheckOutcome::Completed(report) = &drift {
            events.extend(report.checked().map(|r| {
                BreachEvent::new(drift_key(&r.metric_name), r.drift_detected, timestamp)
            }));
        }

        let bias = self.run_bias(batch)?;
        if let CheckOutcome::Completed(report) = &bias {
            events.extend(report.scored().map(|r| {
                BreachEvent::new(bias_key(&r.category, &r.group_key), r.bias_detected, timestamp)
            }));
        }

        let validation = self.run_validation(batch)?;
        if let CheckOutcome::Completed(result) = &validation {
            events.push(BreachEvent::new(VALIDATION_KEY, !result.passed, timestamp));
        }

        let alerts = lock(&self.tracker, "tracker")?.record_all(events);

        Ok(CycleOutcome { timestamp, records: batch.len(), drift, bias, validation, alerts })
    }

    fn run_drift(&self, batch: &Batch) -> Result<CheckOutcome<DriftReport>> {
        let mut drift = lock(&self.drift, "drift")?;
        for (name, samples) in batch.feature_samples() {
            drift.observe(&name, &samples);
        }
        if drift.metric_names().is_empty() {
            return Ok(CheckOutcome::Skipped("no drift metrics".into()));
        }
        Ok(CheckOutcome::Completed(drift.check_drift()))
    }

    fn run_bias(&self, batch: &Batch) -> Result<CheckOutcome<BiasReport>> {
        let records = batch.prediction_records();
        if records.is_empty() {
            return Ok(CheckOutcome::Skipped("no scored records".into()));
        }
        Ok(CheckOutcome::Completed(lock(&self.bias, "bias")?.detect_bias(&records)))
    }

    fn run_validation(&self, batch: &Batch) -> Result<CheckOutcome<ValidationResult>> {
        let (labels, predictions): (Vec<usize>, Vec<usize>) =
            batch.labelled().filter_map(|r| r.label.zip(r.prediction)).unzip();
        if labels.is_empty() {
            return Ok(CheckOutcome::Skipped("no labelled predictions".into()));
        }

        let rows = match self.model.as_deref() {
            Some(model) if self.config.validation.cross_validation => match batch.labelled_feature_rows() {
                Ok(rows) => Some((model, rows)),
                Err(e) => return Ok(CheckOutcome::Failed(e.to_string())),
            },
            _ => None,
        };
        let cv = rows.as_ref().map(|(model, features)| CrossValidationInput::new(*model, features));

        let outcome = match lock(&self.validation, "validation")?.validate(&labels, &predictions, cv) {
            Ok(result) => CheckOutcome::Completed(result),
            Err(e) if e.is_caller_error() => CheckOutcome::Failed(e.to_string()),
            Err(e) => return Err(e),
        };
        Ok(outcome)
    }

    /// Fairness gate over scored records; see [`BiasMonitor::validate_fairness`]
    pub fn validate_fairness(&self, records: &[PredictionRecord]) -> Result<BiasReport> {
        lock(&self.bias, "bias")?.validate_fairness(records)
    }

    pub fn drift_statistics(&self) -> Result<DriftStatistics> {
        Ok(lock(&self.drift, "drift")?.get_drift_statistics())
    }

    pub fn bias_statistics(&self) -> Result<BiasStatistics> {
        Ok(lock(&self.bias, "bias")?.get_bias_statistics())
    }

    pub fn validation_summary(&self) -> Result<ValidationSummary> {
        Ok(lock(&self.validation, "validation")?.get_validation_summary())
    }

    pub fn breach_state(&self, key: &str) -> Result<BreachState> {
        Ok(lock(&self.tracker, "tracker")?.state(key))
    }

    /// Snapshot every monitor into a report
    ///
    /// Each section is read under its monitor's lock, so it never contains a
    /// partially appended history entry.
    pub fn report(&self) -> Result<GovernanceReport> {
        let drift = {
            let monitor = lock(&self.drift, "drift")?;
            DriftSection { statistics: monitor.get_drift_statistics(), history: monitor.history().to_vec() }
        };
        let bias = {
            let monitor = lock(&self.bias, "bias")?;
            BiasSection { statistics: monitor.get_bias_statistics(), history: monitor.history().to_vec() }
        };
        let validation = {
            let engine = lock(&self.validation, "validation")?;
            ValidationSection { summary: engine.get_validation_summary(), history: engine.history().to_vec() }
        };
        let escalation = {
            let tracker = lock(&self.tracker, "tracker")?;
            EscalationSection {
                states: tracker.states().clone(),
                active_alerts: tracker.active_alerts(),
                alert_history: tracker.alert_history().to_vec(),
            }
        };

        Ok(GovernanceReport {
            generated_at: Utc::now(),
            config: self.config.clone(),
            drift,
            bias,
            validation,
            escalation,
        })
    }
}

impl std::fmt::Debug for GovernanceMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceMonitor")
            .field("config", &self.config)
            .field("model", &self.model.is_some())
            .finish_non_exhaustive()
    }
}
