//! # Vigilar: continuous governance monitoring for deployed models
//!
//! Watches batches of transactions and model outputs and reports:
//!
//! - **Drift**: two-sample tests of each metric's rolling window against its baseline
//! - **Bias**: disparity ratios and significance-gated mean differences per demographic group
//! - **Validation**: accuracy and weighted precision/recall/F1 against thresholds, with k-fold CV
//! - **Escalation**: consecutive-breach counting with edge-triggered alerts
//! - **Reports**: JSON snapshots and gauge series of everything above
//!
//! Every monitor keeps a bounded FIFO history and emits structured events to
//! an injected [`sink::MonitorSink`].
//!
//! ## Example
//!
//! ```
//! use vigilar::config::DriftConfig;
//! use vigilar::drift::DriftMonitor;
//!
//! let mut monitor = DriftMonitor::new(DriftConfig::default(), 1000);
//! monitor.update_baseline("amount", &[10.0; 100]).unwrap();
//!
//! let mut current = vec![10.0; 95];
//! current.extend([1000.0; 5]);
//! monitor.observe("amount", &current);
//!
//! assert!(monitor.check_drift().drift_detected());
//! ```

pub mod bias;
pub mod cli;
pub mod config;
pub mod drift;
pub mod error;
pub mod escalation;
pub mod governance;
pub mod history;
pub mod report;
pub mod sink;
pub mod stats;
pub mod validation;

pub use error::{Error, Result};
