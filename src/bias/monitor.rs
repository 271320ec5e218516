//! Bias monitor implementation.

use chrono::Utc;
use std::collections::BTreeMap;

use super::types::{
    group_key, BiasCheckResult, BiasHistoryEntry, BiasReport, BiasStatistics, GroupBiasStats,
    GroupOutcome, OutlierCheck, PredictionRecord,
};
use crate::config::BiasConfig;
use crate::error::{Error, Result};
use crate::history::History;
use crate::sink::{default_sink, MonitorEvent, SharedSink};
use crate::stats::{mean, percentile, positive_rate, std_dev, welch_t_test, VarianceKind};

/// Whole-batch aggregates every group is compared against
struct Overall<'a> {
    scores: &'a [f64],
    positive_rate: f64,
    mean: f64,
    std: f64,
}

/// Detects disparate outcomes across protected-attribute groups
pub struct BiasMonitor {
    config: BiasConfig,
    history: History<BiasHistoryEntry>,
    sink: SharedSink,
}

impl BiasMonitor {
    /// Create a monitor retaining at most `max_history_size` checks
    pub fn new(config: BiasConfig, max_history_size: usize) -> Self {
        Self { config, history: History::new(max_history_size), sink: default_sink() }
    }

    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// Score every group in the batch and run the outlier check
    ///
    /// Records with a non-finite score are dropped. Groups below `min_samples`
    /// are reported as insufficient data.
    pub fn detect_bias(&mut self, records: &[PredictionRecord]) -> BiasReport {
        let timestamp = Utc::now();

        let finite: Vec<&PredictionRecord> = records.iter().filter(|r| r.score.is_finite()).collect();
        let dropped = records.len() - finite.len();
        if dropped > 0 {
            self.sink.emit(&MonitorEvent::SamplesDropped { source: "bias".into(), count: dropped });
        }

        let scores: Vec<f64> = finite.iter().map(|r| r.score).collect();
        let overall = Overall {
            scores: &scores,
            positive_rate: positive_rate(&scores, self.config.positive_score_threshold),
            mean: mean(&scores),
            std: std_dev(&scores, VarianceKind::Population),
        };

        let mut groups = BTreeMap::new();
        for ((category, group), group_scores) in self.partition(&finite) {
            let outcome = if group_scores.len() < self.config.min_samples {
                self.sink.emit(&MonitorEvent::InsufficientSamples {
                    category: category.clone(),
                    group: group.clone(),
                    count: group_scores.len(),
                    min_samples: self.config.min_samples,
                });
                GroupOutcome::InsufficientData {
                    category: category.clone(),
                    group_key: group.clone(),
                    sample_count: group_scores.len(),
                    min_samples: self.config.min_samples,
                }
            } else {
                let result = self.score_group(&category, &group, &group_scores, &overall);
                if result.bias_detected {
                    self.sink.emit(&MonitorEvent::BiasDetected {
                        category: category.clone(),
                        group: group.clone(),
                        combined_score: result.combined_score,
                        disparity_ratio: result.disparity_ratio,
                    });
                }
                GroupOutcome::Scored(result)
            };
            groups.insert(group_key(&category, &group), outcome);
        }

        let outliers = self.check_outliers(&scores);
        if let Some(check) = outliers.as_ref().filter(|o| o.high_outlier_rate) {
            self.sink.emit(&MonitorEvent::HighOutlierRate {
                outlier_rate: check.outlier_rate,
                threshold: self.config.outlier_threshold,
            });
        }

        let report = BiasReport { timestamp, total_records: scores.len(), groups, outliers };
        self.history.push(BiasHistoryEntry {
            timestamp,
            bias_detected: report.bias_detected(),
            total_records: report.total_records,
            results: report
                .groups
                .iter()
                .filter_map(|(key, outcome)| outcome.result().map(|r| (key.clone(), r.clone())))
                .collect(),
            high_outlier_rate: report.high_outlier_rate(),
        });
        report
    }

    /// Fairness gate: fails with [`Error::Bias`] on the first flagged group
    ///
    /// Groups are visited in `category=group` order.
    pub fn validate_fairness(&mut self, records: &[PredictionRecord]) -> Result<BiasReport> {
        let report = self.detect_bias(records);
        self.check_fairness(&report)?;
        Ok(report)
    }

    /// Apply the fairness gate to a report already produced by [`Self::detect_bias`]
    ///
    /// Records nothing, so a caller can inspect the report and gate on it
    /// without a second check landing in history.
    pub fn check_fairness(&self, report: &BiasReport) -> Result<()> {
        match report.scored().find(|r| r.combined_score > self.config.bias_threshold) {
            Some(result) => Err(Error::Bias {
                category: result.category.clone(),
                group: result.group_key.clone(),
                score: result.combined_score,
                threshold: self.config.bias_threshold,
            }),
            None => Ok(()),
        }
    }

    /// Group scores by `(category, value)`
    fn partition(&self, records: &[&PredictionRecord]) -> BTreeMap<(String, String), Vec<f64>> {
        let mut groups: BTreeMap<(String, String), Vec<f64>> = BTreeMap::new();
        for record in records {
            for (category, value) in &record.attributes {
                if !self.config.categories.is_empty() && !self.config.categories.contains(category) {
                    continue;
                }
                groups.entry((category.clone(), value.clone())).or_default().push(record.score);
            }
        }
        groups
    }

    fn score_group(
        &self,
        category: &str,
        group: &str,
        scores: &[f64],
        overall: &Overall<'_>,
    ) -> BiasCheckResult {
        let group_positive_rate = positive_rate(scores, self.config.positive_score_threshold);
        let disparity_ratio = if overall.positive_rate > 0.0 {
            group_positive_rate / overall.positive_rate
        } else {
            0.0
        };

        let test = welch_t_test(scores, overall.scores);
        let statistical_score = if overall.std <= 0.0 || test.p_value > self.config.significance_level {
            0.0
        } else {
            ((mean(scores) - overall.mean).abs() / overall.std).min(1.0)
        };

        let combined_score =
            ((statistical_score + (disparity_ratio - 1.0).abs()) / 2.0).clamp(0.0, 1.0);

        BiasCheckResult {
            group_key: group.to_string(),
            category: category.to_string(),
            disparity_ratio,
            statistical_score,
            combined_score,
            bias_detected: combined_score > self.config.bias_threshold,
            sample_count: scores.len(),
            group_positive_rate,
            overall_positive_rate: overall.positive_rate,
            p_value: test.p_value,
        }
    }

    fn check_outliers(&self, scores: &[f64]) -> Option<OutlierCheck> {
        let q1 = percentile(scores, 25.0)?;
        let q3 = percentile(scores, 75.0)?;
        let iqr = q3 - q1;
        let lower_bound = q1 - 1.5 * iqr;
        let upper_bound = q3 + 1.5 * iqr;
        let outlier_count = scores.iter().filter(|&&s| s < lower_bound || s > upper_bound).count();
        let outlier_rate = outlier_count as f64 / scores.len() as f64;

        Some(OutlierCheck {
            q1,
            q3,
            iqr,
            lower_bound,
            upper_bound,
            outlier_count,
            outlier_rate,
            high_outlier_rate: outlier_rate > self.config.outlier_threshold,
        })
    }

    /// Derive bias statistics from history
    pub fn get_bias_statistics(&self) -> BiasStatistics {
        let total_checks = self.history.len();
        let bias_detected_count = self.history.iter().filter(|e| e.bias_detected).count();

        let mut groups: BTreeMap<String, GroupBiasStats> = BTreeMap::new();
        for entry in self.history.iter() {
            for (key, result) in &entry.results {
                let stats = groups.entry(key.clone()).or_insert(GroupBiasStats {
                    checks: 0,
                    total_biased: 0,
                    bias_frequency: 0.0,
                });
                stats.checks += 1;
                if result.bias_detected {
                    stats.total_biased += 1;
                }
            }
        }
        for stats in groups.values_mut() {
            stats.bias_frequency = stats.total_biased as f64 / stats.checks as f64;
        }

        BiasStatistics {
            total_checks,
            bias_detected_count,
            bias_frequency: if total_checks == 0 {
                0.0
            } else {
                bias_detected_count as f64 / total_checks as f64
            },
            last_check: self.history.latest().map(|e| e.timestamp),
            groups,
        }
    }

    pub fn history(&self) -> &History<BiasHistoryEntry> {
        &self.history
    }

    pub fn config(&self) -> &BiasConfig {
        &self.config
    }
}

impl std::fmt::Debug for BiasMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiasMonitor")
            .field("config", &self.config)
            .field("history", &self.history.len())
            .finish()
    }
}
