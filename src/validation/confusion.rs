//! Confusion matrix for multi-class classification

use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Confusion matrix for multi-class classification
///
/// Rows and columns cover only the labels that occur in the data, in
/// ascending order, so arbitrary label values never size the matrix.
/// Element [i][j] counts samples whose true label is `classes[i]` predicted
/// as `classes[j]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusionMatrix {
    classes: Vec<usize>,
    /// matrix[true_index][predicted_index] = count
    matrix: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Build from predictions and ground truth
    pub fn from_predictions(y_pred: &[usize], y_true: &[usize]) -> Result<Self> {
        if y_pred.len() != y_true.len() {
            return Err(Error::InvalidInput(format!(
                "{} predictions for {} labels",
                y_pred.len(),
                y_true.len()
            )));
        }

        let classes: Vec<usize> =
            y_pred.iter().chain(y_true.iter()).copied().collect::<BTreeSet<_>>().into_iter().collect();
        let n_classes = classes.len();
        let mut cm = Self { matrix: vec![vec![0; n_classes]; n_classes], classes };
        for (&pred, &true_label) in y_pred.iter().zip(y_true.iter()) {
            if let (Some(i), Some(j)) = (cm.index_of(true_label), cm.index_of(pred)) {
                cm.matrix[i][j] += 1;
            }
        }
        Ok(cm)
    }

    /// Distinct labels, ascending; position is the class index
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Class index of a label value
    pub fn index_of(&self, label: usize) -> Option<usize> {
        self.classes.binary_search(&label).ok()
    }

    /// Count for a (true, predicted) pair of label values; 0 for unseen labels
    pub fn get(&self, true_label: usize, predicted_label: usize) -> usize {
        match (self.index_of(true_label), self.index_of(predicted_label)) {
            (Some(i), Some(j)) => self.matrix[i][j],
            _ => 0,
        }
    }

    pub fn true_positives(&self, class: usize) -> usize {
        self.matrix[class][class]
    }

    /// Predicted as class but wasn't
    pub fn false_positives(&self, class: usize) -> usize {
        (0..self.n_classes()).filter(|&i| i != class).map(|i| self.matrix[i][class]).sum()
    }

    /// Was class but predicted differently
    pub fn false_negatives(&self, class: usize) -> usize {
        (0..self.n_classes()).filter(|&j| j != class).map(|j| self.matrix[class][j]).sum()
    }

    /// Total true instances of a class
    pub fn support(&self, class: usize) -> usize {
        self.matrix[class].iter().sum()
    }

    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Fraction of samples on the diagonal; 0 for an empty matrix
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes()).map(|i| self.matrix[i][i]).sum();
        correct as f64 / total as f64
    }
}
