use serde::Serialize;

use crate::{Classifier, ForestError, Result, Sample};
use crate::constants::PRINT_WIDTH;

use std::fmt;
use std::collections::{BTreeMap, BTreeSet};


/// Counts of `(true label, predicted label)` pairs.
///
/// # Example
/// ```no_run
/// use miniforest::prelude::*;
///
/// let truth = ["yes", "no", "yes"];
/// let predicted = ["yes", "yes", "yes"];
/// let matrix = ConfusionMatrix::from_labels(&truth, &predicted).unwrap();
/// assert_eq!(matrix.accuracy(), 2f64 / 3f64);
/// println!("{matrix}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfusionMatrix {
    counts: BTreeMap<String, BTreeMap<String, usize>>,
}


impl ConfusionMatrix {
    /// Construct a confusion matrix from the true and the predicted labels.
    /// Both must be non-empty and have the same length.
    pub fn from_labels<T, P>(truth: &[T], predicted: &[P]) -> Result<Self>
        where T: AsRef<str>,
              P: AsRef<str>,
    {
        if truth.is_empty() {
            return Err(ForestError::EmptySample);
        }
        if truth.len() != predicted.len() {
            return Err(ForestError::LengthMismatch {
                name: "predicted labels".to_string(),
                expected: truth.len(),
                got: predicted.len(),
            });
        }

        let mut counts: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        for (t, p) in truth.iter().zip(predicted) {
            *counts.entry(t.as_ref().to_string())
                .or_default()
                .entry(p.as_ref().to_string())
                .or_insert(0) += 1;
        }
        Ok(Self { counts })
    }


    /// Predicts every example of `sample` with `classifier`
    /// and compares the result with the class column.
    pub fn of<C>(classifier: &C, sample: &Sample) -> Result<Self>
        where C: Classifier + ?Sized
    {
        let truth = sample.labels();
        let predicted = classifier.predict_all(sample);
        Self::from_labels(&truth, &predicted)
    }


    /// Returns the number of examples
    /// whose true label is `truth` and predicted label is `predicted`.
    pub fn count<S, T>(&self, truth: S, predicted: T) -> usize
        where S: AsRef<str>,
              T: AsRef<str>,
    {
        self.counts.get(truth.as_ref())
            .and_then(|row| row.get(predicted.as_ref()))
            .copied()
            .unwrap_or(0)
    }


    /// Returns the number of examples.
    pub fn total(&self) -> usize {
        self.counts.values()
            .flat_map(|row| row.values())
            .sum()
    }


    /// Returns the number of correctly predicted examples.
    pub fn correct(&self) -> usize {
        self.counts.iter()
            .map(|(label, row)| row.get(label).copied().unwrap_or(0))
            .sum()
    }


    /// Returns every label that appears as a true or a predicted label,
    /// in ascending order.
    pub fn labels(&self) -> Vec<&str> {
        self.counts.iter()
            .flat_map(|(t, row)| {
                std::iter::once(t.as_str())
                    .chain(row.keys().map(|p| p.as_str()))
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }


    /// Returns the ratio of correctly predicted examples.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 { return 0f64; }
        self.correct() as f64 / total as f64
    }


    fn true_positive(&self, label: &str) -> usize {
        self.count(label, label)
    }


    fn false_positive(&self, label: &str) -> usize {
        self.counts.iter()
            .filter(|(t, _)| t.as_str() != label)
            .map(|(_, row)| row.get(label).copied().unwrap_or(0))
            .sum()
    }


    fn false_negative(&self, label: &str) -> usize {
        self.counts.get(label)
            .map(|row| {
                row.iter()
                    .filter(|(p, _)| p.as_str() != label)
                    .map(|(_, &c)| c)
                    .sum()
            })
            .unwrap_or(0)
    }


    /// Returns `TP / (TP + FP)` for `label`,
    /// or `0` if `label` is never predicted.
    pub fn precision<S: AsRef<str>>(&self, label: S) -> f64 {
        let label = label.as_ref();
        let tp = self.true_positive(label);
        let fp = self.false_positive(label);
        ratio(tp, tp + fp)
    }


    /// Returns `TP / (TP + FN)` for `label`,
    /// or `0` if `label` never is the true label.
    pub fn recall<S: AsRef<str>>(&self, label: S) -> f64 {
        let label = label.as_ref();
        let tp = self.true_positive(label);
        let fn_ = self.false_negative(label);
        ratio(tp, tp + fn_)
    }


    /// Returns the harmonic mean of the precision and the recall.
    pub fn f1_score<S: AsRef<str>>(&self, label: S) -> f64 {
        let label = label.as_ref();
        let p = self.precision(label);
        let r = self.recall(label);
        if p + r == 0f64 { 0f64 } else { 2f64 * p * r / (p + r) }
    }
}


fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0f64 } else { num as f64 / den as f64 }
}


impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.labels();
        let width = labels.iter()
            .map(|label| label.len())
            .max()
            .unwrap_or(0)
            .max("Label".len());

        writeln!(
            f,
            "{:<width$}  {:>PRINT_WIDTH$}  {:>PRINT_WIDTH$}  {:>PRINT_WIDTH$}  \
             {:>PRINT_WIDTH$}  {:>PRINT_WIDTH$}  {:>PRINT_WIDTH$}",
            "Label", "TP", "FP", "FN", "Precision", "Recall", "F1",
        )?;
        for label in labels {
            writeln!(
                f,
                "{:<width$}  {:>PRINT_WIDTH$}  {:>PRINT_WIDTH$}  {:>PRINT_WIDTH$}  \
                 {:>PRINT_WIDTH$.4}  {:>PRINT_WIDTH$.4}  {:>PRINT_WIDTH$.4}",
                label,
                self.true_positive(label),
                self.false_positive(label),
                self.false_negative(label),
                self.precision(label),
                self.recall(label),
                self.f1_score(label),
            )?;
        }
        write!(
            f,
            "Accuracy: {:.4} ({}/{})",
            self.accuracy(),
            self.correct(),
            self.total(),
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> ConfusionMatrix {
        let truth     = ["a", "a", "a", "b", "b", "c"];
        let predicted = ["a", "a", "b", "b", "a", "c"];
        ConfusionMatrix::from_labels(&truth, &predicted).unwrap()
    }


    #[test]
    fn accuracy_counts_the_diagonal() {
        let m = matrix();
        assert_eq!(m.total(), 6);
        assert_eq!(m.correct(), 4);
        assert!((m.accuracy() - 4f64 / 6f64).abs() < 1e-12);
    }


    #[test]
    fn per_class_scores() {
        let m = matrix();
        assert_eq!(m.count("a", "b"), 1);
        assert!((m.precision("a") - 2f64 / 3f64).abs() < 1e-12);
        assert!((m.recall("a") - 2f64 / 3f64).abs() < 1e-12);
        assert!((m.f1_score("c") - 1f64).abs() < 1e-12);
        assert_eq!(m.precision("z"), 0f64);
    }


    #[test]
    fn labels_include_predicted_only_labels() {
        let m = ConfusionMatrix::from_labels(&["a"], &["b"]).unwrap();
        assert_eq!(m.labels(), vec!["a", "b"]);
        assert_eq!(m.accuracy(), 0f64);
    }


    #[test]
    fn rejects_bad_input() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            ConfusionMatrix::from_labels(&empty, &empty),
            Err(ForestError::EmptySample)
        ));
        assert!(matches!(
            ConfusionMatrix::from_labels(&["a"], &["a", "b"]),
            Err(ForestError::LengthMismatch { expected: 1, got: 2, .. })
        ));
    }


    #[test]
    fn display_ends_with_accuracy() {
        let text = matrix().to_string();
        assert!(text.starts_with("Label"));
        assert!(text.ends_with("Accuracy: 0.6667 (4/6)"));
    }
}
