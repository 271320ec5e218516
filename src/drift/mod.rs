//! Drift Monitor
//!
//! Compares a bounded window of current samples against a fixed baseline for
//! every named metric using a two-sample test, classifies severity from the
//! p-value, and keeps a bounded history of every check.
//!
//! # Example
//!
//! ```
//! use vigilar::config::DriftConfig;
//! use vigilar::drift::DriftMonitor;
//!
//! let mut monitor = DriftMonitor::new(DriftConfig::default(), 1000);
//! monitor.update_baseline("amount", &[10.0; 100])?;
//! monitor.observe("amount", &[10.0; 100]);
//!
//! let report = monitor.check_drift();
//! assert!(!report.drift_detected());
//! # Ok::<(), vigilar::Error>(())
//! ```

mod monitor;
mod series;
mod types;


pub use monitor::DriftMonitor;
pub use series::{MetricSeries, MetricStore};
pub use types::{
    DriftCheckResult, DriftHistoryEntry, DriftOutcome, DriftReport, DriftStatistics,
    InsufficientReason, MetricDriftStats, Severity,
};
