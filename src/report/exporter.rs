//! JSON and gauge export for a governance report.

use std::path::{Path, PathBuf};

use super::types::{GaugeSample, GovernanceReport};
use crate::error::{Error, Result};

/// Serializes a [`GovernanceReport`] for external consumers
#[derive(Debug, Clone, Copy)]
pub struct ReportExporter<'a> {
    report: &'a GovernanceReport,
    pretty: bool,
}

impl<'a> ReportExporter<'a> {
    pub fn new(report: &'a GovernanceReport) -> Self {
        Self { report, pretty: true }
    }

    /// Emit single-line JSON instead of indented JSON
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn to_json_string(&self) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(self.report)?
        } else {
            serde_json::to_string(self.report)?
        };
        Ok(json)
    }

    /// Write the report as JSON, creating parent directories
    ///
    /// Returns the path that was written.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io_path("create", parent, e))?;
        }
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(|e| Error::io_path("write", path, e))?;
        Ok(path.to_path_buf())
    }

    /// Flatten the latest results into one gauge per metric, group and score
    pub fn gauges(&self) -> Vec<GaugeSample> {
        let mut gauges = Vec::new();
        let report = self.report;

        if let Some(entry) = report.drift.history.last() {
            for (metric, result) in &entry.results {
                gauges.push(GaugeSample::new("vigilar_drift_p_value", result.p_value).with_label("metric", metric));
                gauges.push(
                    GaugeSample::new("vigilar_drift_detected", f64::from(u8::from(result.drift_detected)))
                        .with_label("metric", metric),
                );
            }
        }
        gauges.push(GaugeSample::new("vigilar_drift_frequency", report.drift.statistics.drift_frequency));

        if let Some(entry) = report.bias.history.last() {
            for result in entry.results.values() {
                let labelled = |name: &str, value: f64| {
                    GaugeSample::new(name, value)
                        .with_label("category", &result.category)
                        .with_label("group", &result.group_key)
                };
                gauges.push(labelled("vigilar_bias_combined_score", result.combined_score));
                gauges.push(labelled("vigilar_bias_disparity_ratio", result.disparity_ratio));
                gauges.push(labelled("vigilar_bias_statistical_score", result.statistical_score));
            }
        }
        gauges.push(GaugeSample::new("vigilar_bias_frequency", report.bias.statistics.bias_frequency));

        if let Some(result) = report.validation.history.last() {
            for (metric, value) in &result.metrics {
                gauges.push(GaugeSample::new("vigilar_validation_metric", *value).with_label("metric", metric.name()));
            }
            if let Some(cv) = &result.cross_validation {
                gauges.push(GaugeSample::new("vigilar_validation_cv_mean", cv.mean));
                gauges.push(GaugeSample::new("vigilar_validation_cv_std", cv.std));
            }
        }
        gauges.push(GaugeSample::new("vigilar_validation_pass_rate", report.validation.summary.pass_rate));

        for (key, state) in &report.escalation.states {
            gauges.push(
                GaugeSample::new("vigilar_breach_consecutive_count", f64::from(state.consecutive_count))
                    .with_label("key", key),
            );
        }
        gauges.push(GaugeSample::new(
            "vigilar_active_alerts",
            report.escalation.active_alerts.len() as f64,
        ));

        gauges
    }

    /// Gauges in text exposition format, one per line
    pub fn to_gauge_text(&self) -> String {
        let mut out = String::new();
        for gauge in self.gauges() {
            out.push_str(&gauge.to_string());
            out.push('\n');
        }
        out
    }
}
