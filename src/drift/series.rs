//! Baseline and rolling-window storage per metric.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

use crate::error::{Error, Result};

/// Baseline samples plus a bounded window of current samples for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    name: String,
    baseline: Vec<f64>,
    /// Incremented by every baseline replacement (0 = never set)
    baseline_version: u32,
    current: VecDeque<f64>,
    window_size: usize,
}

impl MetricSeries {
    /// Create an empty series with the given window size
    pub fn new(name: impl Into<String>, window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            name: name.into(),
            baseline: Vec::new(),
            baseline_version: 0,
            current: VecDeque::with_capacity(window_size.min(4096)),
            window_size,
        }
    }

    /// Replace the baseline
    ///
    /// Fails if `samples` is empty or contains NaN/infinite values; the
    /// previous baseline is kept in that case.
    pub fn set_baseline(&mut self, samples: &[f64]) -> Result<()> {
        if samples.is_empty() {
            return Err(Error::InvalidBaseline {
                metric: self.name.clone(),
                reason: "baseline samples are empty".into(),
            });
        }
        if let Some(bad) = samples.iter().find(|v| !v.is_finite()) {
            return Err(Error::InvalidBaseline {
                metric: self.name.clone(),
                reason: format!("baseline contains non-finite value {bad}"),
            });
        }
        self.baseline = samples.to_vec();
        self.baseline_version += 1;
        Ok(())
    }

    /// Append samples to the window, evicting the oldest beyond the window size
    ///
    /// Returns the number of non-finite samples that were dropped.
    pub fn observe(&mut self, samples: &[f64]) -> usize {
        let mut dropped = 0;
        for &value in samples {
            if !value.is_finite() {
                dropped += 1;
                continue;
            }
            if self.current.len() >= self.window_size {
                self.current.pop_front();
            }
            self.current.push_back(value);
        }
        dropped
    }

    /// Clear the current window, keeping the baseline
    pub fn reset_window(&mut self) {
        self.current.clear();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn baseline(&self) -> &[f64] {
        &self.baseline
    }

    pub fn baseline_version(&self) -> u32 {
        self.baseline_version
    }

    pub fn has_baseline(&self) -> bool {
        !self.baseline.is_empty()
    }

    /// Current window, oldest first
    pub fn current(&self) -> Vec<f64> {
        self.current.iter().copied().collect()
    }

    pub fn current_len(&self) -> usize {
        self.current.len()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

/// All metric series, keyed by metric name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStore {
    window_size: usize,
    series: BTreeMap<String, MetricSeries>,
}

impl MetricStore {
    pub fn new(window_size: usize) -> Self {
        Self { window_size, series: BTreeMap::new() }
    }

    fn entry(&mut self, name: &str) -> &mut MetricSeries {
        let window_size = self.window_size;
        self.series
            .entry(name.to_string())
            .or_insert_with(|| MetricSeries::new(name, window_size))
    }

    /// Replace the baseline for a metric, creating the series if needed
    pub fn update_baseline(&mut self, name: &str, samples: &[f64]) -> Result<()> {
        if let Some(series) = self.series.get_mut(name) {
            return series.set_baseline(samples);
        }
        let mut series = MetricSeries::new(name, self.window_size);
        series.set_baseline(samples)?;
        self.series.insert(name.to_string(), series);
        Ok(())
    }

    /// Append current samples for a metric; returns dropped non-finite count
    pub fn observe(&mut self, name: &str, samples: &[f64]) -> usize {
        self.entry(name).observe(samples)
    }

    pub fn get(&self, name: &str) -> Option<&MetricSeries> {
        self.series.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricSeries> {
        self.series.values()
    }

    pub fn names(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
