//! Demographic bias monitor
//!
//! Partitions a batch of scored predictions by protected attribute, compares
//! each group's positive-outcome rate and score distribution against the whole
//! batch, and flags groups whose combined score exceeds the bias threshold.
//!
//! # Example
//!
//! ```
//! use vigilar::bias::{BiasMonitor, PredictionRecord};
//! use vigilar::config::BiasConfig;
//!
//! let mut monitor = BiasMonitor::new(BiasConfig::default(), 1000);
//! let records: Vec<_> = (0..100)
//!     .map(|i| {
//!         let gender = if i % 2 == 0 { "f" } else { "m" };
//!         PredictionRecord::new(if i % 4 < 2 { 0.8 } else { 0.2 }).with_attribute("gender", gender)
//!     })
//!     .collect();
//!
//! let report = monitor.detect_bias(&records);
//! assert!(!report.bias_detected());
//! ```

mod monitor;
mod types;


pub use monitor::BiasMonitor;
pub use types::{
    group_key, BiasCheckResult, BiasHistoryEntry, BiasReport, BiasStatistics, GroupBiasStats,
    GroupOutcome, OutlierCheck, PredictionRecord,
};
