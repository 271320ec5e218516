//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Vigilar: drift, bias and validation monitoring for deployed models
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "vigilar")]
#[command(version)]
#[command(about = "Continuous governance monitor: drift, bias, validation and breach escalation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Write the default configuration as YAML
    Init(InitArgs),

    /// Run one governance cycle per batch file
    Monitor(MonitorArgs),

    /// Fairness gate: fail if any group exceeds the bias threshold
    Audit(AuditArgs),

    /// Check labelled predictions against performance thresholds
    Validate(ValidateArgs),
}

/// Output format for command results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InitArgs {
    /// Destination file
    #[arg(value_name = "PATH", default_value = "vigilar.yaml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct MonitorArgs {
    /// Batch files (JSON), processed in order
    #[arg(value_name = "BATCH", required = true)]
    pub batches: Vec<PathBuf>,

    /// Baseline samples per metric (JSON object of name -> array)
    #[arg(long)]
    pub baseline: PathBuf,

    /// Configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the full governance report to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AuditArgs {
    /// Batch file (JSON) with scored, attribute-tagged records
    #[arg(value_name = "BATCH")]
    pub batch: PathBuf,

    /// Configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Batch file (JSON) with labelled predictions
    #[arg(value_name = "BATCH")]
    pub batch: PathBuf,

    /// Configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Parse arguments from an iterator (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
