//! Breach state, events and alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Escalation status of a monitored key
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreachStatus {
    #[default]
    Normal,
    /// Violating, but fewer than `alert_threshold` times in a row
    Warning,
    Alert,
}

impl std::fmt::Display for BreachStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreachStatus::Normal => write!(f, "normal"),
            BreachStatus::Warning => write!(f, "warning"),
            BreachStatus::Alert => write!(f, "alert"),
        }
    }
}

/// Consecutive-violation state for one key
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachState {
    pub consecutive_count: u32,
    pub status: BreachStatus,
}

impl BreachState {
    /// Apply one check result and return the status before the update
    pub(crate) fn apply(&mut self, violated: bool, alert_threshold: u32) -> BreachStatus {
        let previous = self.status;
        if violated {
            self.consecutive_count = self.consecutive_count.saturating_add(1);
            self.status = if self.consecutive_count >= alert_threshold {
                BreachStatus::Alert
            } else {
                BreachStatus::Warning
            };
        } else {
            *self = BreachState::default();
        }
        previous
    }
}

/// One check result for a monitored key
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreachEvent {
    pub key: String,
    pub violated: bool,
    pub timestamp: DateTime<Utc>,
}

impl BreachEvent {
    pub fn new(key: impl Into<String>, violated: bool, timestamp: DateTime<Utc>) -> Self {
        Self { key: key.into(), violated, timestamp }
    }

    /// Event stamped with the current time
    pub fn now(key: impl Into<String>, violated: bool) -> Self {
        Self::new(key, violated, Utc::now())
    }
}

/// Raised once when a key enters the alert state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub key: String,
    pub status: BreachStatus,
    pub consecutive_count: u32,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    /// Human-readable description
    pub fn message(&self) -> String {
        format!(
            "{} in {} after {} consecutive violations",
            self.key, self.status, self.consecutive_count
        )
    }
}
