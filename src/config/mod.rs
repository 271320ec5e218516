//! Monitor configuration
//!
//! All thresholds, window sizes and retention caps are supplied here once, at
//! construction time. Files are YAML; any omitted field takes its default.
//!
//! ```yaml
//! drift:
//!   threshold: 0.01
//!   test: kolmogorov_smirnov
//! bias:
//!   categories: [age_group, gender]
//! escalation:
//!   alert_threshold: 5
//! ```

mod loader;
mod schema;
mod validate;


pub use schema::{
    BiasConfig, DriftConfig, DriftTest, EscalationConfig, HistoryConfig, MetricThresholds,
    MonitorConfig, ValidationConfig,
};
pub use validate::{validate_config, ConfigError};
