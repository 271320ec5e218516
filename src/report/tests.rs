//! Tests for report export.

use super::*;
use crate::config::{MonitorConfig, ValidationConfig};
use crate::governance::{Batch, BatchRecord, GovernanceMonitor};
use crate::sink::NullSink;
use std::sync::Arc;
use tempfile::TempDir;

fn populated_report() -> GovernanceReport {
    let config = MonitorConfig {
        validation: ValidationConfig { cross_validation: false, ..Default::default() },
        ..Default::default()
    };
    let monitor = GovernanceMonitor::with_sink(config, Arc::new(NullSink)).unwrap();
    monitor.update_baseline("amount", &[10.0; 100]).unwrap();

    let records = (0..100).map(|i| {
        BatchRecord::default()
            .with_feature("amount", if i < 95 { 10.0 } else { 1000.0 })
            .with_score(if i % 2 == 0 { 0.8 } else { 0.2 })
            .with_attribute("gender", if i % 4 < 2 { "f" } else { "m" })
            .with_outcome(i % 2, i % 2)
    });
    monitor.process_batch(&Batch::new(records)).unwrap();
    monitor.report().unwrap()
}

#[test]
fn test_json_contains_sections() {
    let report = populated_report();
    let json = ReportExporter::new(&report).to_json_string().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    for section in ["generated_at", "config", "drift", "bias", "validation", "escalation"] {
        assert!(value.get(section).is_some(), "missing {section}");
    }
    assert_eq!(value["drift"]["statistics"]["total_checks"], 1);
    assert_eq!(value["config"]["drift"]["test"], "mann_whitney");
    assert_eq!(value["validation"]["history"][0]["metrics"]["accuracy"], 1.0);
}

#[test]
fn test_compact_is_single_line() {
    let report = populated_report();
    let json = ReportExporter::new(&report).compact().to_json_string().unwrap();
    assert!(!json.contains('\n'));
}

#[test]
fn test_write_json_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("nested/reports/governance.json");
    let report = populated_report();

    let written = ReportExporter::new(&report).write_json(&target).unwrap();
    assert_eq!(written, target);

    let content = std::fs::read_to_string(&target).unwrap();
    let parsed: GovernanceReport = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.generated_at, report.generated_at);
    assert_eq!(parsed.config, report.config);
    assert_eq!(parsed.drift.history.len(), 1);
}

#[test]
fn test_write_json_reports_io_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();
    let report = populated_report();

    let err = ReportExporter::new(&report).write_json(blocker.join("report.json")).unwrap_err();
    assert!(matches!(err, crate::Error::Io { .. }));
}

#[test]
fn test_gauges_cover_latest_results() {
    let report = populated_report();
    let gauges = ReportExporter::new(&report).gauges();

    let find = |name: &str, key: &str, value: &str| {
        gauges.iter().find(|g| g.name == name && g.labels.get(key).map(String::as_str) == Some(value))
    };
    assert!(find("vigilar_drift_p_value", "metric", "amount").is_some());
    assert_eq!(find("vigilar_drift_detected", "metric", "amount").map(|g| g.value), Some(1.0));
    assert!(find("vigilar_bias_combined_score", "group", "f").is_some());
    assert_eq!(find("vigilar_validation_metric", "metric", "f1").map(|g| g.value), Some(1.0));
    assert!(find("vigilar_breach_consecutive_count", "key", "drift:amount").is_some());
    assert!(gauges.iter().any(|g| g.name == "vigilar_active_alerts" && g.value == 0.0));
}

#[test]
fn test_gauge_text_format() {
    let sample = GaugeSample::new("vigilar_bias_combined_score", 0.25)
        .with_label("group", "a\"b")
        .with_label("category", "age_group");
    assert_eq!(
        sample.to_string(),
        "vigilar_bias_combined_score{category=\"age_group\",group=\"a\\\"b\"} 0.25"
    );
    assert_eq!(GaugeSample::new("vigilar_active_alerts", 2.0).to_string(), "vigilar_active_alerts 2");

    let report = populated_report();
    let text = ReportExporter::new(&report).to_gauge_text();
    assert!(text.lines().all(|line| line.starts_with("vigilar_")));
}
