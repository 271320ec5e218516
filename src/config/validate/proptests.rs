//! Property-based tests for configuration validation

use super::error::ConfigError;
use super::validator::validate_config;
use crate::config::schema::*;
use proptest::prelude::*;

fn arb_valid_config() -> impl Strategy<Value = MonitorConfig> {
    (
        0.001f64..0.5,   // drift threshold
        1usize..10_000,  // window size
        0.0f64..1.0,     // bias threshold
        2usize..500,     // min samples
        2usize..20,      // cv folds
        1u32..10,        // alert threshold
        1usize..5_000,   // history size
    )
        .prop_map(
            |(threshold, window_size, bias_threshold, min_samples, cv_folds, alert, history)| {
                MonitorConfig {
                    drift: DriftConfig { threshold, window_size, ..Default::default() },
                    bias: BiasConfig { bias_threshold, min_samples, ..Default::default() },
                    validation: ValidationConfig { cv_folds, ..Default::default() },
                    escalation: EscalationConfig { alert_threshold: alert },
                    history: HistoryConfig { max_history_size: history },
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_drift_threshold_above_one_fails(
        config in arb_valid_config(),
        threshold in 1.0f64..10.0
    ) {
        let mut config = config;
        config.drift.threshold = threshold;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ConfigError::InvalidDriftThreshold(_))
        ));
    }

    #[test]
    fn prop_yaml_roundtrip_preserves_config(config in arb_valid_config()) {
        let yaml = config.to_yaml_string().expect("serialization should succeed");
        let parsed = MonitorConfig::from_yaml_str(&yaml).expect("parse should succeed");
        prop_assert_eq!(parsed, config);
    }
}
