//! Model validation engine
//!
//! Checks a batch of `(label, prediction)` pairs against per-metric
//! thresholds and, optionally, cross-validates a supplied [`Model`]:
//! - Confusion matrix and per-class precision/recall/F1
//! - Support-weighted averaging over the labels present
//! - Seeded k-fold splitting
//! - Bounded validation history with summary statistics

mod confusion;
mod engine;
mod kfold;
mod metric;
mod metrics;
mod types;


pub use confusion::ConfusionMatrix;
pub use engine::ValidationEngine;
pub use kfold::KFold;
pub use metric::Metric;
pub use metrics::ClassMetrics;
pub use types::{CrossValidationInput, CrossValidationResult, Model, ValidationResult, ValidationSummary};
