use rand::prelude::*;
use colored::Colorize;

use crate::{ForestError, Result, Sample};
use crate::common::checker;
use crate::constants::{DEFAULT_N_FOLDS, DEFAULT_SEED, PRINT_WIDTH};

use std::iter::Iterator;


/// A struct that generates 
/// pairs of training/test sample for k-fold cross validation.
/// The `i`-th test sample is the `i`-th of `n_folds`
/// contiguous blocks of the (optionally shuffled) rows;
/// the remaining rows form the training sample.
/// Attribute identities are shared with the original sample,
/// so a tree grown on a training fold applies to its test fold.
///
/// # Example
/// ```no_run
/// use miniforest::prelude::*;
///
/// let sample = SampleReader::default()
///     .file("/path/to/tennis.csv")
///     .has_header(true)
///     .target_feature("play")
///     .read()
///     .unwrap();
/// let cv = CrossValidation::new(&sample)
///     .n_folds(5)
///     .verbose(true)
///     .seed(777)
///     .shuffle()
///     .folds()
///     .unwrap();
///
/// let tree = DecisionTreeBuilder::new()
///     .prune_ratio(0.2)
///     .build()
///     .unwrap();
/// for (train, test) in cv {
///     let f = tree.fit(&train).unwrap();
///     let matrix = ConfusionMatrix::of(&f, &test).unwrap();
///     println!("[test accuracy: {}]", matrix.accuracy());
/// }
/// ```
pub struct CrossValidation<'a> {
    current_fold: usize,
    n_folds: usize,
    seed: u64,
    sample: &'a Sample,
    ix: Vec<usize>,
    verbose: bool,
}


impl<'a> CrossValidation<'a> {
    /// Construct a new instance of `CrossValidation.`
    #[inline]
    pub fn new(sample: &'a Sample) -> Self {
        let n_sample = sample.shape().0;
        let ix = (0..n_sample).collect::<Vec<_>>();
        Self {
            current_fold: 0,
            n_folds: DEFAULT_N_FOLDS,
            seed: DEFAULT_SEED,
            verbose: false,
            sample,
            ix,
        }
    }


    /// Set the number of folds.
    /// Default value is `5.`
    #[inline]
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the seed of the randomness for shuffling.
    /// Default vaule is `1234.`
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `CrossValidation` prints some information
    /// when generating a train/test pair.
    /// Default vaule is `false.`
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Shuffle the rows before cutting them into folds.
    /// By default, `CrossValidation` does not shuffle the sample.
    #[inline]
    pub fn shuffle(mut self) -> Self {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.ix.shuffle(&mut rng);
        self
    }


    /// Checks the parameters and returns the fold iterator.
    /// Fails if `n_folds < 2` or if there are fewer rows than folds.
    pub fn folds(self) -> Result<Self> {
        if self.n_folds < 2 {
            return Err(ForestError::InvalidFoldCount { n_folds: self.n_folds });
        }
        checker::check_sample(self.sample)?;
        if self.ix.len() < self.n_folds {
            return Err(ForestError::InvalidFoldCount { n_folds: self.n_folds });
        }
        Ok(self)
    }


    /// Returns the training/test sample for `i`th fold.
    /// The first `n % n_folds` folds get one extra test row.
    #[inline]
    fn fold_at(&self, i: usize) -> (Sample, Sample) {
        let sample_size = self.ix.len();
        let base = sample_size / self.n_folds;
        let extra = sample_size % self.n_folds;
        let start = i * base + i.min(extra);
        let end = start + base + usize::from(i < extra);
        self.sample.split(&self.ix, start, end)
    }
}


impl<'a> Iterator for CrossValidation<'a> {
    type Item = (Sample, Sample);
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_fold >= self.n_folds { return None; }

        let output = self.fold_at(self.current_fold);
        self.current_fold += 1;

        if self.verbose {
            let train_size = output.0.shape().0;
            let test_size = output.1.shape().0;
            println!(
                "{}    {}    {}",
                format!("  [{: >3}'th fold]", self.current_fold).bold().red(),
                format!("[TRAIN {:>PRINT_WIDTH$}]", train_size).bold().green(),
                format!("[TEST {:>PRINT_WIDTH$}]", test_size).bold().yellow(),
            );
        }

        Some(output)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Feature;

    fn sample(n: usize) -> Sample {
        let a = Feature::categorical("A", (0..n).map(|i| format!("{}", i % 3)));
        let c = Feature::categorical("C", (0..n).map(|i| format!("{}", i % 2)));
        Sample::new(vec![a], c).unwrap()
    }


    #[test]
    fn folds_cover_every_row_once() {
        let sample = sample(11);
        let folds = CrossValidation::new(&sample)
            .n_folds(3)
            .shuffle()
            .folds()
            .unwrap()
            .collect::<Vec<_>>();
        assert_eq!(folds.len(), 3);

        let test_sizes = folds.iter()
            .map(|(_, test)| test.shape().0)
            .collect::<Vec<_>>();
        assert_eq!(test_sizes, vec![4, 4, 3]);
        for (train, test) in folds.iter() {
            assert_eq!(train.shape().0 + test.shape().0, 11);
        }
    }


    #[test]
    fn folds_keep_attribute_identity() {
        let sample = sample(6);
        let (train, test) = CrossValidation::new(&sample)
            .n_folds(2)
            .folds()
            .unwrap()
            .next()
            .unwrap();
        let attr = sample.feature(0).attribute();
        assert_eq!(train.attribute_index(attr), Some(0));
        assert_eq!(test.attribute_index(attr), Some(0));
    }


    #[test]
    fn fewer_than_two_folds_is_an_error() {
        let sample = sample(6);
        let result = CrossValidation::new(&sample).n_folds(1).folds();
        assert!(matches!(result, Err(ForestError::InvalidFoldCount { n_folds: 1 })));
    }
}
