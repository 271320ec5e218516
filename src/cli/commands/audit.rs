//! Audit command implementation

use super::{load_batch, load_config, print_json};
use crate::bias::{BiasMonitor, PredictionRecord};
use crate::cli::args::{AuditArgs, OutputFormat};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::error::Result;

/// Fairness gate over a scored batch; a flagged group is returned as an error
pub fn run_audit(args: &AuditArgs, level: LogLevel) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let batch = load_batch(&args.batch)?;
    let records = batch.prediction_records();

    let mut monitor = BiasMonitor::new(config.bias, config.history.max_history_size);
    log(level, LogLevel::Normal, &format!("Auditing {} scored records", records.len()));
    audit(&mut monitor, &records, args.format, level)
}

/// One bias check, printed, then gated
pub(crate) fn audit(
    monitor: &mut BiasMonitor,
    records: &[PredictionRecord],
    format: OutputFormat,
    level: LogLevel,
) -> Result<()> {
    let report = monitor.detect_bias(records);
    if format == OutputFormat::Json {
        print_json(&report)?;
    } else {
        for result in report.scored() {
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "  {}={}: ratio={:.3} statistical={:.3} combined={:.3} (n={})",
                    result.category,
                    result.group_key,
                    result.disparity_ratio,
                    result.statistical_score,
                    result.combined_score,
                    result.sample_count
                ),
            );
        }
        let insufficient = report.groups.len() - report.scored().count();
        if insufficient > 0 {
            log(level, LogLevel::Normal, &format!("  {insufficient} groups with insufficient data"));
        }
    }

    monitor.check_fairness(&report)?;
    log(level, LogLevel::Normal, "Status: PASS");
    Ok(())
}
