//! Vigilar CLI
//!
//! # Usage
//!
//! ```bash
//! # Write a default configuration
//! vigilar init vigilar.yaml
//!
//! # Run governance cycles over batches and export a report
//! vigilar monitor --baseline baselines.json --config vigilar.yaml \
//!     --output reports/governance.json day1.json day2.json day3.json
//!
//! # Fairness gate (non-zero exit on bias)
//! vigilar audit predictions.json
//!
//! # Performance thresholds on labelled predictions
//! vigilar validate labelled.json --format json
//! ```

use clap::Parser;
use std::process::ExitCode;
use vigilar::cli::{run_command, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
