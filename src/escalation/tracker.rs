//! Escalation state machine keyed by monitored name.

use std::collections::BTreeMap;

use super::types::{Alert, BreachEvent, BreachState, BreachStatus};
use crate::config::EscalationConfig;
use crate::history::History;
use crate::sink::{default_sink, MonitorEvent, SharedSink};

/// Tracks consecutive violations per key and raises edge-triggered alerts
pub struct BreachTracker {
    config: EscalationConfig,
    states: BTreeMap<String, BreachState>,
    alerts: History<Alert>,
    sink: SharedSink,
}

impl BreachTracker {
    /// Create a tracker retaining at most `max_history_size` alerts
    pub fn new(config: EscalationConfig, max_history_size: usize) -> Self {
        Self {
            config,
            states: BTreeMap::new(),
            alerts: History::new(max_history_size),
            sink: default_sink(),
        }
    }

    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// Apply one check result
    ///
    /// Returns an alert only on the transition into `alert`; further violations
    /// while already alerting return `None`.
    pub fn record(&mut self, event: BreachEvent) -> Option<Alert> {
        let threshold = self.config.alert_threshold.max(1);
        let state = self.states.entry(event.key.clone()).or_default();
        let previous = state.apply(event.violated, threshold);

        if state.status != BreachStatus::Alert || previous == BreachStatus::Alert {
            return None;
        }

        let alert = Alert {
            key: event.key,
            status: state.status,
            consecutive_count: state.consecutive_count,
            timestamp: event.timestamp,
        };
        self.sink.emit(&MonitorEvent::AlertRaised(alert.clone()));
        self.alerts.push(alert.clone());
        Some(alert)
    }

    /// Apply events in order, collecting raised alerts
    pub fn record_all(&mut self, events: impl IntoIterator<Item = BreachEvent>) -> Vec<Alert> {
        events.into_iter().filter_map(|event| self.record(event)).collect()
    }

    /// Current state of a key (`normal` if never seen)
    pub fn state(&self, key: &str) -> BreachState {
        self.states.get(key).copied().unwrap_or_default()
    }

    pub fn states(&self) -> &BTreeMap<String, BreachState> {
        &self.states
    }

    /// Keys currently in the alert state
    pub fn active_alerts(&self) -> Vec<String> {
        self.states
            .iter()
            .filter(|(_, state)| state.status == BreachStatus::Alert)
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn alert_history(&self) -> &History<Alert> {
        &self.alerts
    }

    pub fn config(&self) -> &EscalationConfig {
        &self.config
    }
}

impl std::fmt::Debug for BreachTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreachTracker")
            .field("config", &self.config)
            .field("states", &self.states)
            .field("alerts", &self.alerts.len())
            .finish()
    }
}
