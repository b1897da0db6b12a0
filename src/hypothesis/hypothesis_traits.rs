use crate::Sample;


/// A trait that defines the behavior of a fitted classifier.
/// You only need to implement `predict` method.
pub trait Classifier {
    /// Predicts the class label of the `row`-th example of `sample`.
    fn predict(&self, sample: &Sample, row: usize) -> String;


    /// Predicts the class labels of every example of `sample`,
    /// preserving the row order.
    fn predict_all(&self, sample: &Sample) -> Vec<String> {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict(sample, row))
            .collect::<Vec<_>>()
    }


    /// Returns a copy of `sample` whose class column holds
    /// the predictions of `self`.
    fn label_sample(&self, sample: &Sample) -> crate::Result<Sample> {
        let mut labeled = sample.clone();
        for (row, label) in self.predict_all(sample).into_iter().enumerate() {
            labeled.set_label(row, label)?;
        }
        Ok(labeled)
    }
}


impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&self, sample: &Sample, row: usize) -> String {
        (**self).predict(sample, row)
    }
}
