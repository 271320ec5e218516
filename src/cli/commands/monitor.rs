//! Monitor command implementation

use std::collections::BTreeMap;

use super::{load_batch, load_config, print_json, read_json};
use crate::cli::args::{MonitorArgs, OutputFormat};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::error::Result;
use crate::governance::{CheckOutcome, CycleOutcome, GovernanceMonitor};
use crate::report::ReportExporter;

pub fn run_monitor(args: &MonitorArgs, level: LogLevel) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    // No model callable is available from files
    config.validation.cross_validation = false;

    let monitor = GovernanceMonitor::new(config)?;
    let baselines: BTreeMap<String, Vec<f64>> = read_json(&args.baseline)?;
    monitor.load_baselines(&baselines)?;
    log(
        level,
        LogLevel::Verbose,
        &format!("Loaded {} baselines from {}", baselines.len(), args.baseline.display()),
    );

    let mut cycles = Vec::with_capacity(args.batches.len());
    for path in &args.batches {
        let batch = load_batch(path)?;
        let outcome = monitor.process_batch(&batch)?;
        if args.format == OutputFormat::Text {
            print_cycle(&path.display().to_string(), &outcome, level);
        }
        cycles.push(outcome);
    }

    if args.format == OutputFormat::Json {
        print_json(&cycles)?;
    }

    if let Some(output) = &args.output {
        let report = monitor.report()?;
        let written = ReportExporter::new(&report).write_json(output)?;
        log(level, LogLevel::Normal, &format!("Report written to {}", written.display()));
    }
    Ok(())
}

fn print_cycle(name: &str, outcome: &CycleOutcome, level: LogLevel) {
    log(level, LogLevel::Normal, &format!("Batch {name} ({} records)", outcome.records));

    match &outcome.drift {
        CheckOutcome::Completed(report) => {
            for result in report.checked() {
                log(
                    level,
                    LogLevel::Normal,
                    &format!(
                        "  drift  {:<20} p={:.4} severity={} {}",
                        result.metric_name,
                        result.p_value,
                        result.severity,
                        if result.drift_detected { "DRIFT" } else { "ok" }
                    ),
                );
            }
        }
        other => log(level, LogLevel::Verbose, &format!("  drift: {}", describe(other))),
    }

    match &outcome.bias {
        CheckOutcome::Completed(report) => {
            for result in report.scored() {
                log(
                    level,
                    LogLevel::Normal,
                    &format!(
                        "  bias   {:<20} ratio={:.3} score={:.3} {}",
                        format!("{}={}", result.category, result.group_key),
                        result.disparity_ratio,
                        result.combined_score,
                        if result.bias_detected { "BIASED" } else { "ok" }
                    ),
                );
            }
            if report.high_outlier_rate() {
                log(level, LogLevel::Normal, "  bias   high outlier rate");
            }
        }
        other => log(level, LogLevel::Verbose, &format!("  bias: {}", describe(other))),
    }

    match &outcome.validation {
        CheckOutcome::Completed(result) => {
            let status = if result.passed { "PASS" } else { "FAIL" };
            log(level, LogLevel::Normal, &format!("  validation {status}"));
            for (metric, value) in &result.metrics {
                log(level, LogLevel::Verbose, &format!("    {metric}: {value:.4}"));
            }
        }
        other => log(level, LogLevel::Verbose, &format!("  validation: {}", describe(other))),
    }

    for alert in &outcome.alerts {
        log(level, LogLevel::Normal, &format!("  ALERT {}", alert.message()));
    }
}

fn describe<T>(outcome: &CheckOutcome<T>) -> String {
    match outcome {
        CheckOutcome::Completed(_) => "completed".to_string(),
        CheckOutcome::Skipped(reason) => format!("skipped ({reason})"),
        CheckOutcome::Failed(message) => format!("failed ({message})"),
    }
}
