//! CLI command implementations

mod audit;
mod init;
mod monitor;
mod validate;

#[cfg(test)]
mod tests;

use std::path::Path;

use serde::de::DeserializeOwned;

use super::args::{Cli, Command};
use super::logging::{init_tracing, LogLevel};
use crate::config::MonitorConfig;
use crate::error::{Error, Result};
use crate::governance::Batch;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<()> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);
    init_tracing(log_level);

    match cli.command {
        Command::Init(args) => init::run_init(&args, log_level),
        Command::Monitor(args) => monitor::run_monitor(&args, log_level),
        Command::Audit(args) => audit::run_audit(&args, log_level),
        Command::Validate(args) => validate::run_validate(&args, log_level),
    }
}

/// Load a configuration file, or the defaults when none is given
fn load_config(path: Option<&Path>) -> Result<MonitorConfig> {
    match path {
        Some(path) => MonitorConfig::from_yaml_file(path),
        None => Ok(MonitorConfig::default()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io_path("read", path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::Serialization(format!("{}: {e}", path.display())))
}

fn load_batch(path: &Path) -> Result<Batch> {
    read_json(path)
}

/// Print a value as pretty JSON on stdout
fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
