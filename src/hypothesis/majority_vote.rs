use serde::Serialize;

use crate::{Classifier, ClassHistogram, Sample};


/// A combined classifier that predicts the label
/// chosen by most of its members.
/// Ties go to the lexicographically smallest label.
#[derive(Serialize, Debug, Clone)]
pub struct MajorityVote<H> {
    /// Set of hypotheses.
    pub hypotheses: Vec<H>,
}


impl<H> MajorityVote<H> {
    /// Construct a new `MajorityVote` from the given hypotheses.
    #[inline]
    pub fn new(hypotheses: Vec<H>) -> Self {
        Self { hypotheses }
    }


    /// Append a hypothesis to the current combination.
    #[inline]
    pub fn push(&mut self, hypothesis: H) {
        self.hypotheses.push(hypothesis);
    }


    /// Returns the number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }


    /// Returns `true` if there is no member.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }
}


impl<H> MajorityVote<H>
    where H: Classifier,
{
    /// Counts the votes of every member for the `row`-th example.
    pub fn votes(&self, sample: &Sample, row: usize) -> ClassHistogram {
        self.hypotheses.iter()
            .map(|h| h.predict(sample, row))
            .collect()
    }
}


impl<H> Classifier for MajorityVote<H>
    where H: Classifier,
{
    /// # Panics
    /// Panics if the combination has no member.
    fn predict(&self, sample: &Sample, row: usize) -> String {
        self.votes(sample, row)
            .majority()
            .map(|label| label.to_string())
            .expect("A majority vote needs at least one member")
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Feature;

    struct Constant(&'static str);

    impl Classifier for Constant {
        fn predict(&self, _sample: &Sample, _row: usize) -> String {
            self.0.to_string()
        }
    }


    fn sample() -> Sample {
        let a = Feature::categorical("a", ["x", "y"]);
        let c = Feature::categorical("class", ["0", "1"]);
        Sample::new(vec![a], c).unwrap()
    }


    #[test]
    fn majority_wins() {
        let f = MajorityVote::new(vec![
            Constant("yes"), Constant("no"), Constant("yes"),
        ]);
        assert_eq!(f.predict_all(&sample()), vec!["yes", "yes"]);
    }


    #[test]
    fn ties_go_to_smallest_label() {
        let f = MajorityVote::new(vec![Constant("b"), Constant("a")]);
        assert_eq!(f.predict(&sample(), 0), "a");
    }


    #[test]
    fn label_sample_writes_predictions() {
        let f = MajorityVote::new(vec![Constant("1")]);
        let labeled = f.label_sample(&sample()).unwrap();
        assert_eq!(labeled.labels(), vec!["1", "1"]);
    }
}
