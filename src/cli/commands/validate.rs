//! Validate command implementation

use super::{load_batch, load_config, print_json};
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::error::{Error, Result};
use crate::validation::ValidationEngine;

pub fn run_validate(args: &ValidateArgs, level: LogLevel) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    config.validation.cross_validation = false;
    let batch = load_batch(&args.batch)?;

    let (labels, predictions): (Vec<usize>, Vec<usize>) =
        batch.labelled().filter_map(|r| Some((r.label?, r.prediction?))).unzip();

    let mut engine = ValidationEngine::new(config.validation, config.history.max_history_size);
    let result = engine.validate(&labels, &predictions, None)?;

    if args.format == OutputFormat::Json {
        print_json(&result)?;
    } else {
        log(level, LogLevel::Normal, &format!("Validated {} predictions", result.sample_count));
        for (metric, value) in &result.metrics {
            let threshold = engine.config().thresholds.threshold(*metric);
            log(level, LogLevel::Normal, &format!("  {metric:<10} {value:.4} (min {threshold:.2})"));
        }
        log(level, LogLevel::Normal, &format!("Status: {}", if result.passed { "PASS" } else { "FAIL" }));
    }

    if !result.passed {
        return Err(Error::ThresholdsNotMet(result.failed_metrics.join(", ")));
    }
    Ok(())
}
