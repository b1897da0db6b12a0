use std::fmt;
use std::collections::BTreeMap;

use crate::{Attribute, ClassHistogram, Feature, Partition};


/// Chooses the attribute a node splits on.
///
/// Given the rows (and the attributes still available) reaching a node,
/// a rule generator returns the best attribute to split on,
/// or `None` if no attribute is worth splitting on.
/// The returned attribute must be one of [`Partition::attributes`];
/// anything else makes the induction fail
/// with [`ForestError::ContractViolation`](crate::ForestError::ContractViolation).
pub trait RuleGenerator: Send + Sync {
    /// Returns the attribute to split `partition` on.
    fn split_attribute(&self, partition: &Partition<'_>) -> Option<Attribute>;
}


impl<G: RuleGenerator + ?Sized> RuleGenerator for &G {
    fn split_attribute(&self, partition: &Partition<'_>) -> Option<Attribute> {
        (**self).split_attribute(partition)
    }
}


/// Picks the attribute with the largest information gain,
/// i.e., the largest reduction of the class entropy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InformationGain;


/// Picks the attribute with the largest gain ratio,
/// i.e., the information gain divided by the entropy of the split itself.
/// This penalizes attributes with many distinct values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GainRatio;


impl RuleGenerator for InformationGain {
    fn split_attribute(&self, partition: &Partition<'_>) -> Option<Attribute> {
        best_attribute(partition, |parent, children, n_rows| {
            information_gain(parent, children, n_rows)
        })
    }
}


impl RuleGenerator for GainRatio {
    fn split_attribute(&self, partition: &Partition<'_>) -> Option<Attribute> {
        best_attribute(partition, |parent, children, n_rows| {
            let gain = information_gain(parent, children, n_rows);
            let info = split_information(children, n_rows);
            if info > 0f64 { gain / info } else { 0f64 }
        })
    }
}


/// Splitting criteria for growing decision tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitBy {
    /// Information gain (the ID3 criterion).
    #[default]
    InformationGain,
    /// Gain ratio.
    GainRatio,
}


impl fmt::Display for SplitBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InformationGain => "Information gain",
            Self::GainRatio => "Gain ratio",
        };

        write!(f, "{name}")
    }
}


impl RuleGenerator for SplitBy {
    fn split_attribute(&self, partition: &Partition<'_>) -> Option<Attribute> {
        match self {
            Self::InformationGain => InformationGain.split_attribute(partition),
            Self::GainRatio => GainRatio.split_attribute(partition),
        }
    }
}


/// Returns the available attribute with the highest score.
/// Attributes taking a single value in the partition cannot
/// separate anything and are skipped.
/// Ties go to the attribute that comes first in column order.
fn best_attribute<F>(partition: &Partition<'_>, score: F) -> Option<Attribute>
    where F: Fn(&ClassHistogram, &BTreeMap<String, ClassHistogram>, usize) -> f64
{
    let parent = partition.class_histogram();
    let n_rows = partition.len();

    partition.features()
        .filter_map(|feature| {
            let children = histograms_by_value(partition, feature);
            if children.len() < 2 { return None; }
            Some((score(&parent, &children, n_rows), feature.attribute()))
        })
        .fold(None, |best: Option<(f64, &Attribute)>, (s, attr)| {
            match best {
                Some((b, _)) if b >= s => best,
                _ => Some((s, attr)),
            }
        })
        .map(|(_, attr)| attr.clone())
}


/// Counts the class labels of the partition for each value of `feature`.
fn histograms_by_value(partition: &Partition<'_>, feature: &Feature)
    -> BTreeMap<String, ClassHistogram>
{
    let target = partition.sample().target();
    let mut histograms: BTreeMap<String, ClassHistogram> = BTreeMap::new();
    for &row in partition.rows() {
        histograms.entry(feature.value_string(row).into_owned())
            .or_default()
            .add(target.value_string(row));
    }
    histograms
}


fn information_gain(
    parent: &ClassHistogram,
    children: &BTreeMap<String, ClassHistogram>,
    n_rows: usize,
) -> f64
{
    let n_rows = n_rows as f64;
    let remainder = children.values()
        .map(|child| (child.total() as f64 / n_rows) * child.entropy())
        .sum::<f64>();
    parent.entropy() - remainder
}


fn split_information(
    children: &BTreeMap<String, ClassHistogram>,
    n_rows: usize,
) -> f64
{
    let n_rows = n_rows as f64;
    children.values()
        .map(|child| child.total() as f64 / n_rows)
        .filter(|&p| p > 0f64)
        .map(|p| -p * p.log2())
        .sum::<f64>()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sample;

    // The classic "play tennis" table.
    fn tennis() -> Sample {
        let outlook = Feature::categorical("outlook", [
            "sunny", "sunny", "overcast", "rainy", "rainy", "rainy", "overcast",
            "sunny", "sunny", "rainy", "sunny", "overcast", "overcast", "rainy",
        ]);
        let temp = Feature::categorical("temp", [
            "hot", "hot", "hot", "mild", "cool", "cool", "cool",
            "mild", "cool", "mild", "mild", "mild", "hot", "mild",
        ]);
        let humidity = Feature::categorical("humidity", [
            "high", "high", "high", "high", "normal", "normal", "normal",
            "high", "normal", "normal", "normal", "high", "normal", "high",
        ]);
        let windy = Feature::categorical("windy", [
            "false", "true", "false", "false", "false", "true", "true",
            "false", "false", "false", "true", "true", "false", "true",
        ]);
        let play = Feature::categorical("play", [
            "no", "no", "yes", "yes", "yes", "no", "yes",
            "no", "yes", "yes", "yes", "yes", "yes", "no",
        ]);
        Sample::new(vec![outlook, temp, humidity, windy], play).unwrap()
    }


    #[test]
    fn information_gain_picks_outlook() {
        let sample = tennis();
        let partition = Partition::new(&sample);
        let attr = InformationGain.split_attribute(&partition).unwrap();
        assert_eq!(attr, *sample["outlook"].attribute());
    }


    #[test]
    fn gain_ratio_picks_outlook() {
        let sample = tennis();
        let partition = Partition::new(&sample);
        let attr = SplitBy::GainRatio.split_attribute(&partition).unwrap();
        assert_eq!(attr, *sample["outlook"].attribute());
    }


    #[test]
    fn constant_attributes_are_never_chosen() {
        let a = Feature::categorical("a", ["k", "k", "k"]);
        let c = Feature::categorical("c", ["0", "1", "0"]);
        let sample = Sample::new(vec![a], c).unwrap();
        let partition = Partition::new(&sample);
        assert!(InformationGain.split_attribute(&partition).is_none());
    }


    #[test]
    fn ties_go_to_the_first_column() {
        let a = Feature::categorical("a", ["x", "y"]);
        let b = Feature::categorical("b", ["p", "q"]);
        let c = Feature::categorical("c", ["0", "1"]);
        let sample = Sample::new(vec![a, b], c).unwrap();
        let partition = Partition::new(&sample);
        let attr = InformationGain.split_attribute(&partition).unwrap();
        assert_eq!(attr, *sample["a"].attribute());
    }


    #[test]
    fn gain_of_the_tennis_outlook() {
        let sample = tennis();
        let partition = Partition::new(&sample);
        let outlook = &sample["outlook"];
        let children = histograms_by_value(&partition, outlook);
        let gain = information_gain(
            &partition.class_histogram(), &children, partition.len()
        );
        assert!((gain - 0.2467).abs() < 1e-4, "gain = {gain}");
    }
}
