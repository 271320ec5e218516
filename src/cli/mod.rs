//! CLI module for vigilar
//!
//! Argument parsing, logging setup and command handlers for the `vigilar`
//! binary.

mod args;
mod commands;
mod logging;

pub use args::{parse_args, AuditArgs, Cli, Command, InitArgs, MonitorArgs, OutputFormat, ValidateArgs};
pub use commands::run_command;
pub use logging::{init_tracing, LogLevel};
