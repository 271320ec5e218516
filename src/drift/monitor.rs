//! Drift monitor implementation.

use chrono::Utc;
use std::collections::BTreeMap;

use super::series::{MetricSeries, MetricStore};
use super::types::{
    DriftCheckResult, DriftHistoryEntry, DriftOutcome, DriftReport, DriftStatistics,
    InsufficientReason, MetricDriftStats, Severity,
};
use crate::config::{DriftConfig, DriftTest};
use crate::error::Result;
use crate::history::History;
use crate::sink::{default_sink, MonitorEvent, SharedSink};
use crate::stats::{ks_two_sample, mann_whitney_u, TestOutcome};

/// Drift monitor over named metrics
pub struct DriftMonitor {
    config: DriftConfig,
    store: MetricStore,
    history: History<DriftHistoryEntry>,
    sink: SharedSink,
}

impl DriftMonitor {
    /// Create a monitor retaining at most `max_history_size` checks
    pub fn new(config: DriftConfig, max_history_size: usize) -> Self {
        Self {
            store: MetricStore::new(config.window_size),
            history: History::new(max_history_size),
            config,
            sink: default_sink(),
        }
    }

    /// Route events to the given sink
    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the baseline for a metric
    ///
    /// Fails with `InvalidBaseline` for an empty or non-finite sample.
    pub fn update_baseline(&mut self, metric_name: &str, samples: &[f64]) -> Result<()> {
        self.store.update_baseline(metric_name, samples)
    }

    /// Append samples to a metric's current window
    pub fn observe(&mut self, metric_name: &str, samples: &[f64]) {
        let dropped = self.store.observe(metric_name, samples);
        if dropped > 0 {
            self.sink.emit(&MonitorEvent::SamplesDropped {
                source: format!("drift:{metric_name}"),
                count: dropped,
            });
        }
    }

    /// Compare every metric's current window against its baseline
    ///
    /// Metrics missing either side are reported as insufficient rather than
    /// failing the call. Checked results are appended to history as one entry.
    pub fn check_drift(&mut self) -> DriftReport {
        let timestamp = Utc::now();
        let mut outcomes = BTreeMap::new();

        for series in self.store.iter() {
            let outcome = match Self::insufficient_reason(series) {
                Some(reason) => {
                    self.sink.emit(&MonitorEvent::MetricSkipped {
                        metric: series.name().to_string(),
                        reason: reason.to_string(),
                    });
                    DriftOutcome::Insufficient { reason }
                }
                None => {
                    let result = self.evaluate(series, timestamp);
                    self.sink.emit(&MonitorEvent::DriftChecked {
                        metric: result.metric_name.clone(),
                        p_value: result.p_value,
                        drift_detected: result.drift_detected,
                    });
                    DriftOutcome::Checked(result)
                }
            };
            outcomes.insert(series.name().to_string(), outcome);
        }

        let report = DriftReport { timestamp, outcomes };
        let results: BTreeMap<String, DriftCheckResult> =
            report.checked().map(|r| (r.metric_name.clone(), r.clone())).collect();
        self.history.push(DriftHistoryEntry {
            timestamp,
            drift_detected: report.drift_detected(),
            results,
        });

        report
    }

    fn insufficient_reason(series: &MetricSeries) -> Option<InsufficientReason> {
        if !series.has_baseline() {
            Some(InsufficientReason::MissingBaseline)
        } else if series.current_len() == 0 {
            Some(InsufficientReason::EmptyWindow)
        } else {
            None
        }
    }

    fn run_test(&self, baseline: &[f64], current: &[f64]) -> TestOutcome {
        match self.config.test {
            DriftTest::KolmogorovSmirnov => ks_two_sample(baseline, current),
            DriftTest::MannWhitney => mann_whitney_u(baseline, current),
        }
    }

    fn evaluate(&self, series: &MetricSeries, timestamp: chrono::DateTime<Utc>) -> DriftCheckResult {
        let current = series.current();
        let outcome = self.run_test(series.baseline(), &current);

        DriftCheckResult {
            metric_name: series.name().to_string(),
            test: self.config.test,
            statistic: outcome.statistic,
            p_value: outcome.p_value,
            drift_detected: outcome.p_value < self.config.threshold,
            severity: Severity::from_p_value(outcome.p_value),
            baseline_size: series.baseline().len(),
            current_size: current.len(),
            timestamp,
        }
    }

    /// Derive drift statistics from history
    pub fn get_drift_statistics(&self) -> DriftStatistics {
        let total_checks = self.history.len();
        let drift_detected_count = self.history.iter().filter(|e| e.drift_detected).count();

        let mut metrics: BTreeMap<String, MetricDriftStats> = BTreeMap::new();
        for entry in self.history.iter() {
            for (name, result) in &entry.results {
                let stats = metrics.entry(name.clone()).or_insert(MetricDriftStats {
                    checks: 0,
                    total_drifts: 0,
                    drift_frequency: 0.0,
                });
                stats.checks += 1;
                if result.drift_detected {
                    stats.total_drifts += 1;
                }
            }
        }
        for stats in metrics.values_mut() {
            stats.drift_frequency = stats.total_drifts as f64 / stats.checks as f64;
        }

        DriftStatistics {
            total_checks,
            drift_detected_count,
            drift_frequency: if total_checks == 0 {
                0.0
            } else {
                drift_detected_count as f64 / total_checks as f64
            },
            last_check: self.history.latest().map(|e| e.timestamp),
            metrics,
        }
    }

    pub fn history(&self) -> &History<DriftHistoryEntry> {
        &self.history
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Metric names with a baseline or current samples
    pub fn metric_names(&self) -> Vec<String> {
        self.store.names()
    }

    pub fn series(&self, metric_name: &str) -> Option<&MetricSeries> {
        self.store.get(metric_name)
    }
}

impl std::fmt::Debug for DriftMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriftMonitor")
            .field("config", &self.config)
            .field("metrics", &self.store.len())
            .field("history", &self.history.len())
            .finish()
    }
}
