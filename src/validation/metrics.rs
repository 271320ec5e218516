//! Per-class precision, recall and F1

use super::confusion::ConfusionMatrix;

/// Per-class classification metrics
#[derive(Clone, Debug, PartialEq)]
pub struct ClassMetrics {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    pub f1: Vec<f64>,
    pub support: Vec<usize>,
}

impl ClassMetrics {
    /// Compute metrics from a confusion matrix
    ///
    /// A class with no predictions (or no true instances) scores 0 for the
    /// undefined ratio instead of NaN.
    pub fn from_confusion_matrix(cm: &ConfusionMatrix) -> Self {
        let n_classes = cm.n_classes();
        let mut precision = Vec::with_capacity(n_classes);
        let mut recall = Vec::with_capacity(n_classes);
        let mut f1 = Vec::with_capacity(n_classes);
        let mut support = Vec::with_capacity(n_classes);

        for class in 0..n_classes {
            let tp = cm.true_positives(class) as f64;
            let fp = cm.false_positives(class) as f64;
            let fn_ = cm.false_negatives(class) as f64;

            let p = if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 };
            let r = if tp + fn_ > 0.0 { tp / (tp + fn_) } else { 0.0 };
            let f = if p + r > 0.0 { 2.0 * p * r / (p + r) } else { 0.0 };

            precision.push(p);
            recall.push(r);
            f1.push(f);
            support.push(cm.support(class));
        }

        Self { precision, recall, f1, support }
    }

    pub fn n_classes(&self) -> usize {
        self.support.len()
    }

    /// Precision averaged by support (number of true instances per class)
    pub fn weighted_precision(&self) -> f64 {
        self.weighted(&self.precision)
    }

    pub fn weighted_recall(&self) -> f64 {
        self.weighted(&self.recall)
    }

    pub fn weighted_f1(&self) -> f64 {
        self.weighted(&self.f1)
    }

    fn weighted(&self, values: &[f64]) -> f64 {
        let total_support: usize = self.support.iter().sum();
        if total_support == 0 {
            return 0.0;
        }
        values.iter().zip(self.support.iter()).map(|(&v, &s)| v * s as f64).sum::<f64>()
            / total_support as f64
    }
}
