//! CLI command tests

use super::*;
use crate::cli::args::{AuditArgs, InitArgs, MonitorArgs, OutputFormat, ValidateArgs};
use crate::cli::LogLevel;
use crate::governance::BatchRecord;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_json<T: serde::Serialize>(dir: &TempDir, name: &str, value: &T) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}

fn scored(group: &str, score: f64, count: usize) -> Vec<BatchRecord> {
    (0..count)
        .map(|_| BatchRecord::default().with_score(score).with_attribute("gender", group))
        .collect()
}

#[test]
fn test_init_writes_loadable_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf/vigilar.yaml");
    let args = InitArgs { path: path.clone(), force: false };

    run_init_for_test(&args).unwrap();
    let config = MonitorConfig::from_yaml_file(&path).unwrap();
    assert_eq!(config, MonitorConfig::default());

    // Refuses to clobber without --force
    assert!(run_init_for_test(&args).is_err());
    run_init_for_test(&InitArgs { path, force: true }).unwrap();
}

fn run_init_for_test(args: &InitArgs) -> Result<()> {
    init::run_init(args, LogLevel::Quiet)
}

#[test]
fn test_monitor_exports_report() {
    let dir = TempDir::new().unwrap();
    let baseline = write_json(&dir, "baseline.json", &serde_json::json!({ "amount": vec![10.0; 100] }));
    let batch = Batch::new((0..100).map(|i| {
        BatchRecord::default().with_feature("amount", if i < 95 { 10.0 } else { 1000.0 })
    }));
    let batch_path = write_json(&dir, "batch.json", &batch);
    let output = dir.path().join("out/report.json");

    let args = MonitorArgs {
        batches: vec![batch_path.clone(), batch_path.clone(), batch_path],
        baseline,
        config: None,
        format: OutputFormat::Text,
        output: Some(output.clone()),
    };
    monitor::run_monitor(&args, LogLevel::Quiet).unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["drift"]["statistics"]["total_checks"], 3);
    assert_eq!(report["escalation"]["active_alerts"][0], "drift:amount");
}

#[test]
fn test_monitor_missing_batch_file() {
    let dir = TempDir::new().unwrap();
    let baseline = write_json(&dir, "baseline.json", &serde_json::json!({}));
    let args = MonitorArgs {
        batches: vec![dir.path().join("missing.json")],
        baseline,
        config: None,
        format: OutputFormat::Json,
        output: None,
    };
    let err = monitor::run_monitor(&args, LogLevel::Quiet).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_monitor_rejects_empty_baseline() {
    let dir = TempDir::new().unwrap();
    let baseline = write_json(&dir, "baseline.json", &serde_json::json!({ "amount": [] }));
    let batch = write_json(&dir, "batch.json", &Batch::default());
    let args = MonitorArgs {
        batches: vec![batch],
        baseline,
        config: None,
        format: OutputFormat::Text,
        output: None,
    };
    let err = monitor::run_monitor(&args, LogLevel::Quiet).unwrap_err();
    assert!(matches!(err, Error::InvalidBaseline { .. }));
}

#[test]
fn test_audit_gate() {
    let dir = TempDir::new().unwrap();

    let mut biased = scored("f", 0.9, 50);
    biased.extend(scored("m", 0.1, 50));
    let path = write_json(&dir, "biased.json", &Batch::new(biased));
    let args = AuditArgs { batch: path, config: None, format: OutputFormat::Text };
    assert!(audit::run_audit(&args, LogLevel::Quiet).unwrap_err().is_bias());

    let mut balanced = Vec::new();
    for group in ["f", "m"] {
        balanced.extend(scored(group, 0.2, 20));
        balanced.extend(scored(group, 0.8, 20));
    }
    let path = write_json(&dir, "balanced.json", &Batch::new(balanced));
    let args = AuditArgs { batch: path, config: None, format: OutputFormat::Json };
    audit::run_audit(&args, LogLevel::Quiet).unwrap();
}

#[test]
fn test_audit_checks_once() {
    use crate::bias::BiasMonitor;
    use crate::config::BiasConfig;
    use crate::sink::{MemorySink, MonitorEvent};
    use std::sync::Arc;

    let mut biased = scored("f", 0.9, 50);
    biased.extend(scored("m", 0.1, 50));
    let records = crate::governance::Batch::new(biased).prediction_records();

    let sink = Arc::new(MemorySink::new());
    let mut monitor = BiasMonitor::new(BiasConfig::default(), 10).with_sink(sink.clone());
    let err = audit::audit(&mut monitor, &records, OutputFormat::Text, LogLevel::Quiet).unwrap_err();

    assert!(err.is_bias());
    assert_eq!(monitor.history().len(), 1);
    assert_eq!(sink.count_where(|e| matches!(e, MonitorEvent::BiasDetected { .. })), 2);
}

#[test]
fn test_validate_pass_and_fail() {
    let dir = TempDir::new().unwrap();

    let good = Batch::new((0..20).map(|i| BatchRecord::default().with_outcome(i % 2, i % 2)));
    let path = write_json(&dir, "good.json", &good);
    let args = ValidateArgs { batch: path, config: None, format: OutputFormat::Text };
    validate::run_validate(&args, LogLevel::Quiet).unwrap();

    let bad = Batch::new((0..20).map(|i| BatchRecord::default().with_outcome(i % 2, 0)));
    let path = write_json(&dir, "bad.json", &bad);
    let args = ValidateArgs { batch: path, config: None, format: OutputFormat::Json };
    let err = validate::run_validate(&args, LogLevel::Quiet).unwrap_err();
    assert!(matches!(err, Error::ThresholdsNotMet(_)));
}

#[test]
fn test_validate_without_labels() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "unlabelled.json", &Batch::new(scored("f", 0.5, 3)));
    let args = ValidateArgs { batch: path, config: None, format: OutputFormat::Text };
    let err = validate::run_validate(&args, LogLevel::Quiet).unwrap_err();
    assert!(err.is_caller_error());
}

#[test]
fn test_config_file_is_validated() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.yaml");
    std::fs::write(&config, "escalation:\n  alert_threshold: 0\n").unwrap();
    assert!(matches!(load_config(Some(&config)), Err(Error::Config(_))));
    assert_eq!(load_config(None).unwrap(), MonitorConfig::default());
}
