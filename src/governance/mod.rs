//! Governance orchestrator
//!
//! [`GovernanceMonitor`] owns one drift monitor, one bias monitor, one
//! validation engine and one breach tracker, each behind its own mutex, and
//! runs a full evaluation cycle per [`Batch`].
//!
//! # Example
//!
//! ```
//! use vigilar::config::MonitorConfig;
//! use vigilar::governance::{Batch, BatchRecord, GovernanceMonitor};
//!
//! let monitor = GovernanceMonitor::new(MonitorConfig::default()).unwrap();
//! monitor.update_baseline("amount", &[10.0; 100]).unwrap();
//!
//! let batch = Batch::new((0..100).map(|_| BatchRecord::default().with_feature("amount", 10.0)));
//! let outcome = monitor.process_batch(&batch).unwrap();
//! assert!(outcome.alerts.is_empty());
//! ```

mod batch;
mod monitor;


pub use batch::{Batch, BatchRecord, CheckOutcome, CycleOutcome};
pub use monitor::GovernanceMonitor;
