//! Report structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::bias::{BiasHistoryEntry, BiasStatistics};
use crate::config::MonitorConfig;
use crate::drift::{DriftHistoryEntry, DriftStatistics};
use crate::escalation::{Alert, BreachState};
use crate::validation::{ValidationResult, ValidationSummary};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftSection {
    pub statistics: DriftStatistics,
    /// Oldest first
    pub history: Vec<DriftHistoryEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiasSection {
    pub statistics: BiasStatistics,
    pub history: Vec<BiasHistoryEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationSection {
    pub summary: ValidationSummary,
    pub history: Vec<ValidationResult>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EscalationSection {
    pub states: BTreeMap<String, BreachState>,
    pub active_alerts: Vec<String>,
    pub alert_history: Vec<Alert>,
}

/// Snapshot of the whole governance monitor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GovernanceReport {
    pub generated_at: DateTime<Utc>,
    pub config: MonitorConfig,
    pub drift: DriftSection,
    pub bias: BiasSection,
    pub validation: ValidationSection,
    pub escalation: EscalationSection,
}

/// One gauge value with its labels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaugeSample {
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub value: f64,
}

impl GaugeSample {
    pub fn new(name: &str, value: f64) -> Self {
        Self { name: name.to_string(), labels: BTreeMap::new(), value }
    }

    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.labels.insert(key.to_string(), value.to_string());
        self
    }
}

/// Exposition-format line: `name{key="value",...} value`
impl fmt::Display for GaugeSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.labels.is_empty() {
            let labels: Vec<String> = self
                .labels
                .iter()
                .map(|(k, v)| format!("{k}=\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
                .collect();
            write!(f, "{{{}}}", labels.join(","))?;
        }
        write!(f, " {}", self.value)
    }
}
