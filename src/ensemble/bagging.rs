use fixedbitset::FixedBitSet;
use rand::prelude::*;
use rand::seq::index;
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    ForestError,
    Learner,
    MajorityVote,
    Result,
    Sample,
};
use crate::common::checker;
use crate::constants::DEFAULT_SEED;


/// Bootstrap aggregation.
///
/// Every member is trained on its own view of the sample:
/// `n` rows drawn with replacement (if `bootstrap` is on)
/// restricted to `k` features drawn without replacement
/// (kept in column order).
/// The members are trained in parallel and
/// combined into a [`MajorityVote`].
///
/// Each member draws its randomness from a seed
/// that the master seed generates up front,
/// so the result does not depend on the thread scheduling.
///
/// # Example
/// ```no_run
/// use miniforest::prelude::*;
///
/// # let sample: Sample = unimplemented!();
/// let tree = DecisionTreeBuilder::new().build().unwrap();
/// let f = Bagging::new(vec![tree; 10])
///     .n_features(2)
///     .seed(7)
///     .fit(&sample)
///     .unwrap();
/// let predictions = f.predict_all(&sample);
/// ```
#[derive(Debug, Clone)]
pub struct Bagging<L> {
    members: Vec<L>,
    n_features: Option<usize>,
    bootstrap: bool,
    seed: u64,
}


impl<L> Bagging<L> {
    /// Construct a new instance of `Bagging`.
    /// By default, every feature is given to every member,
    /// rows are bootstrapped, and the seed is `DEFAULT_SEED == 1234`.
    pub fn new(members: Vec<L>) -> Self {
        Self {
            members,
            n_features: None,
            bootstrap: true,
            seed: DEFAULT_SEED,
        }
    }


    /// Set the number of features each member sees.
    #[inline]
    pub fn n_features(mut self, n_features: usize) -> Self {
        self.n_features = Some(n_features);
        self
    }


    /// Turn row bootstrapping on or off.
    /// Default value is `true`.
    #[inline]
    pub fn bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }


    /// Set the master seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Returns the members.
    #[inline]
    pub fn members(&self) -> &[L] {
        &self.members[..]
    }


    /// The rows and the features a member sees.
    fn draw(&self, seed: u64, n_sample: usize, n_features: usize, k: usize)
        -> (Vec<usize>, FixedBitSet)
    {
        let mut rng = StdRng::seed_from_u64(seed);

        let rows = if self.bootstrap {
            (0..n_sample).map(|_| rng.gen_range(0..n_sample))
                .collect::<Vec<_>>()
        } else {
            (0..n_sample).collect::<Vec<_>>()
        };

        let mut mask = FixedBitSet::with_capacity(n_features);
        index::sample(&mut rng, n_features, k)
            .into_iter()
            .for_each(|j| mask.insert(j));

        (rows, mask)
    }
}


impl<L> Learner for Bagging<L>
    where L: Learner + Sync,
          L::Hypothesis: Send,
{
    type Hypothesis = MajorityVote<L::Hypothesis>;


    fn name(&self) -> &str {
        "Bagging"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let n_features = self.n_features
            .map(|k| k.to_string())
            .unwrap_or_else(|| "all".to_string());
        let info = Vec::from([
            ("# of members", format!("{}", self.members.len())),
            ("# of features", n_features),
            ("Bootstrap", format!("{}", self.bootstrap)),
            ("Seed", format!("{}", self.seed)),
        ]);
        Some(info)
    }


    #[instrument(skip_all, fields(members = self.members.len()))]
    fn fit(&self, sample: &Sample) -> Result<Self::Hypothesis> {
        if self.members.is_empty() {
            return Err(ForestError::InvalidForestSize { forest_size: 0 });
        }
        checker::check_features(sample)?;

        let (n_sample, n_features) = sample.shape();
        let k = self.n_features.unwrap_or(n_features);
        checker::check_feature_count(k, n_features)?;

        let mut master = StdRng::seed_from_u64(self.seed);
        let seeds = self.members.iter()
            .map(|_| master.gen::<u64>())
            .collect::<Vec<_>>();

        let hypotheses = self.members.par_iter()
            .zip(seeds.into_par_iter())
            .enumerate()
            .map(|(i, (member, seed))| {
                let (rows, mask) = self.draw(seed, n_sample, n_features, k);
                let view = sample.select_features(&mask).subsample(&rows);
                debug!(member = i, seed, "fitting a member");
                member.fit(&view)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MajorityVote::new(hypotheses))
    }
}
