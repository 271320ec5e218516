//! Event sink injected into every monitor
//!
//! Monitors report what they observed through a [`MonitorSink`] handed to them
//! at construction instead of a process-wide logger. [`TracingSink`] forwards
//! to `tracing`; [`MemorySink`] keeps events for inspection.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::escalation::Alert;

/// Structured event emitted by a monitor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MonitorEvent {
    /// A metric was compared against its baseline
    DriftChecked { metric: String, p_value: f64, drift_detected: bool },
    /// A metric could not be checked this cycle
    MetricSkipped { metric: String, reason: String },
    /// Non-finite values were discarded from an input
    SamplesDropped { source: String, count: usize },
    /// A demographic group had too few records to score
    InsufficientSamples { category: String, group: String, count: usize, min_samples: usize },
    /// A demographic group exceeded the bias threshold
    BiasDetected { category: String, group: String, combined_score: f64, disparity_ratio: f64 },
    /// The fraction of IQR outliers exceeded its threshold
    HighOutlierRate { outlier_rate: f64, threshold: f64 },
    /// A validation metric fell below its threshold
    ValidationFailed { metric: String, value: f64, threshold: f64 },
    /// A monitored key escalated to the alert state
    AlertRaised(Alert),
}

/// Receiver for monitor events
pub trait MonitorSink: Send + Sync {
    fn emit(&self, event: &MonitorEvent);
}

/// Shared handle to a sink
pub type SharedSink = Arc<dyn MonitorSink>;

/// Forwards events to `tracing` with structured fields
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MonitorSink for TracingSink {
    fn emit(&self, event: &MonitorEvent) {
        match event {
            MonitorEvent::DriftChecked { metric, p_value, drift_detected: true } => {
                tracing::warn!(%metric, p_value, "drift detected");
            }
            MonitorEvent::DriftChecked { metric, p_value, drift_detected: false } => {
                tracing::debug!(%metric, p_value, "no drift");
            }
            MonitorEvent::MetricSkipped { metric, reason } => {
                tracing::info!(%metric, %reason, "metric skipped");
            }
            MonitorEvent::SamplesDropped { source, count } => {
                tracing::warn!(%source, count, "non-finite samples dropped");
            }
            MonitorEvent::InsufficientSamples { category, group, count, min_samples } => {
                tracing::info!(%category, %group, count, min_samples, "insufficient samples");
            }
            MonitorEvent::BiasDetected { category, group, combined_score, disparity_ratio } => {
                tracing::warn!(%category, %group, combined_score, disparity_ratio, "bias detected");
            }
            MonitorEvent::HighOutlierRate { outlier_rate, threshold } => {
                tracing::warn!(outlier_rate, threshold, "high outlier rate");
            }
            MonitorEvent::ValidationFailed { metric, value, threshold } => {
                tracing::warn!(%metric, value, threshold, "validation metric below threshold");
            }
            MonitorEvent::AlertRaised(alert) => {
                tracing::error!(
                    key = %alert.key,
                    consecutive_count = alert.consecutive_count,
                    "breach escalated to alert"
                );
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl MonitorSink for NullSink {
    fn emit(&self, _event: &MonitorEvent) {}
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<MonitorEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events, oldest first
    pub fn events(&self) -> Vec<MonitorEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Number of recorded events matching a predicate
    pub fn count_where(&self, predicate: impl Fn(&MonitorEvent) -> bool) -> usize {
        self.events.lock().map(|events| events.iter().filter(|e| predicate(e)).count()).unwrap_or(0)
    }
}

impl MonitorSink for MemorySink {
    fn emit(&self, event: &MonitorEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Default sink used by `new()` constructors
pub fn default_sink() -> SharedSink {
    Arc::new(TracingSink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.emit(&MonitorEvent::MetricSkipped { metric: "a".into(), reason: "empty".into() });
        sink.emit(&MonitorEvent::HighOutlierRate { outlier_rate: 0.2, threshold: 0.05 });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], MonitorEvent::MetricSkipped { .. }));
        assert_eq!(
            sink.count_where(|e| matches!(e, MonitorEvent::HighOutlierRate { .. })),
            1
        );
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = MonitorEvent::ValidationFailed {
            metric: "recall".into(),
            value: 0.7,
            threshold: 0.8,
        };
        let json = serde_json::to_value(&event).expect("serialization should succeed");
        assert_eq!(json["event"], "validation_failed");
        assert_eq!(json["metric"], "recall");
    }

    #[test]
    fn test_tracing_and_null_sinks_accept_events() {
        let event = MonitorEvent::DriftChecked { metric: "m".into(), p_value: 0.01, drift_detected: true };
        TracingSink.emit(&event);
        NullSink.emit(&event);
    }
}
