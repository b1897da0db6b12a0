use serde::Serialize;

use std::fmt;
use std::collections::BTreeMap;


/// Counts of class labels over a set of rows.
///
/// Labels are kept in ascending order, so every traversal
/// of a histogram (and everything derived from it) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassHistogram(BTreeMap<String, usize>);


impl ClassHistogram {
    /// Construct an empty histogram.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }


    /// Counts one more occurrence of `label`.
    #[inline]
    pub fn add<S: AsRef<str>>(&mut self, label: S) {
        let label = label.as_ref();
        match self.0.get_mut(label) {
            Some(count) => { *count += 1; },
            None => { self.0.insert(label.to_string(), 1); },
        }
    }


    /// Returns the count of `label`.
    #[inline]
    pub fn count<S: AsRef<str>>(&self, label: S) -> usize {
        self.0.get(label.as_ref()).copied().unwrap_or(0)
    }


    /// Returns the number of counted rows.
    #[inline]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }


    /// Returns the number of distinct labels.
    #[inline]
    pub fn n_labels(&self) -> usize {
        self.0.len()
    }


    /// Returns `true` if nothing has been counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }


    /// Returns the most frequent label.
    /// Ties go to the lexicographically smallest label.
    pub fn majority(&self) -> Option<&str> {
        self.0.iter()
            .fold(None, |best: Option<(&String, usize)>, (label, &count)| {
                match best {
                    Some((_, c)) if c >= count => best,
                    _ => Some((label, count)),
                }
            })
            .map(|(label, _)| label.as_str())
    }


    /// Shannon entropy (in bits) of the label distribution.
    pub fn entropy(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0f64 { return 0f64; }

        self.0.values()
            .map(|&count| count as f64 / total)
            .filter(|&p| p > 0f64)
            .map(|p| -p * p.log2())
            .sum::<f64>()
    }


    /// Iterates over `(label, count)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.0.iter().map(|(label, &count)| (label.as_str(), count))
    }
}


impl<S: AsRef<str>> FromIterator<S> for ClassHistogram {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut histogram = Self::new();
        iter.into_iter().for_each(|label| histogram.add(label));
        histogram
    }
}


impl fmt::Display for ClassHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.iter()
            .map(|(label, count)| format!("{label}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{line}]")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_breaks_ties_lexicographically() {
        let hist = ["b", "a", "b", "a", "c"].into_iter()
            .collect::<ClassHistogram>();
        assert_eq!(hist.majority(), Some("a"));
        assert_eq!(hist.total(), 5);
        assert_eq!(hist.n_labels(), 3);
    }


    #[test]
    fn majority_prefers_higher_count() {
        let hist = ["a", "z", "z"].into_iter().collect::<ClassHistogram>();
        assert_eq!(hist.majority(), Some("z"));
    }


    #[test]
    fn entropy_of_balanced_binary_labels_is_one() {
        let hist = ["0", "1", "0", "1"].into_iter().collect::<ClassHistogram>();
        assert!((hist.entropy() - 1f64).abs() < 1e-12);

        let pure = ["0", "0"].into_iter().collect::<ClassHistogram>();
        assert_eq!(pure.entropy(), 0f64);
    }


    #[test]
    fn empty_histogram_has_no_majority() {
        assert_eq!(ClassHistogram::new().majority(), None);
    }
}
