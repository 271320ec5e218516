//! Loading and saving monitor configuration as YAML

use super::schema::MonitorConfig;
use super::validate::validate_config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

impl MonitorConfig {
    /// Parse and validate a configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: MonitorConfig = serde_yaml::from_str(yaml)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load and validate a configuration file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vigilar::config::MonitorConfig;
    ///
    /// let config = MonitorConfig::from_yaml_file("vigilar.yaml")?;
    /// # Ok::<(), vigilar::Error>(())
    /// ```
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io_path("read", path, e))?;
        Self::from_yaml_str(&content)
    }

    /// Serialize to YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check every value is within its valid range
    pub fn validate(&self) -> Result<()> {
        validate_config(self)?;
        Ok(())
    }
}
