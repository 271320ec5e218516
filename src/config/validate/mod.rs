//! Configuration validation
//!
//! Rejects out-of-range values before any monitor is constructed.

mod error;
mod validator;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use validator::validate_config;
