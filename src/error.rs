//! Error types for the governance monitor.
//!
//! Caller errors (bad baselines, misaligned inputs) surface immediately and are
//! never retried. Expected "not enough data yet" conditions are *not* errors;
//! they are reported as tagged outcomes alongside regular results.

use std::path::Path;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for vigilar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while monitoring a model.
#[derive(Debug, Error)]
pub enum Error {
    /// Baseline samples were empty or contained non-finite values.
    #[error("Invalid baseline for metric '{metric}': {reason}")]
    InvalidBaseline { metric: String, reason: String },

    /// Labels, predictions, features or model did not line up.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A demographic group exceeded the bias threshold during a fairness gate.
    #[error("Bias detected in {category}={group}: score={score:.2} exceeds threshold {threshold:.2}")]
    Bias {
        category: String,
        group: String,
        score: f64,
        threshold: f64,
    },

    /// Validation metrics below threshold where a pass was required.
    #[error("Validation failed: {0} below threshold")]
    ThresholdsNotMet(String),

    /// Configuration rejected at construction time.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create an IO error for a path.
    pub fn io_path(action: &str, path: &Path, source: std::io::Error) -> Self {
        Self::io(format!("failed to {action} {}", path.display()), source)
    }

    /// Whether the caller supplied bad input (as opposed to a system fault).
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidBaseline { .. } | Self::InvalidInput(_) | Self::Config(_))
    }

    /// Whether this is the hard-fail fairness gate.
    pub fn is_bias(&self) -> bool {
        matches!(self, Self::Bias { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_error_message_names_group() {
        let err = Error::Bias {
            category: "age_group".into(),
            group: "18-25".into(),
            score: 0.42,
            threshold: 0.1,
        };
        let msg = err.to_string();
        assert!(msg.contains("age_group=18-25"));
        assert!(msg.contains("0.42"));
        assert!(err.is_bias());
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_caller_errors() {
        let baseline = Error::InvalidBaseline { metric: "amount".into(), reason: "empty".into() };
        assert!(baseline.is_caller_error());
        assert!(Error::InvalidInput("length mismatch".into()).is_caller_error());
        assert!(!Error::Internal("lock poisoned".into()).is_caller_error());
    }

    #[test]
    fn test_io_error_has_context() {
        let err = Error::io(
            "writing report",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("writing report"));
        assert!(msg.contains("denied"));
    }
}
