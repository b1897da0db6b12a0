//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use crate::{ForestError, Result, Sample};


/// Check whether the training sample has at least one row.
#[inline(always)]
pub(crate) fn check_sample(sample: &Sample) -> Result<()> {
    let n_sample = sample.shape().0;
    if n_sample == 0 {
        return Err(ForestError::EmptySample);
    }
    Ok(())
}


/// Check whether the sample can be split on at least one feature.
#[inline(always)]
pub(crate) fn check_features(sample: &Sample) -> Result<()> {
    check_sample(sample)?;
    if sample.shape().1 == 0 {
        return Err(ForestError::ZeroFeatures);
    }
    Ok(())
}


/// Check the pruning ratio, which must be in `[0, 1)`.
#[inline(always)]
pub(crate) fn check_prune_ratio(ratio: f64) -> Result<()> {
    if !(0f64..1f64).contains(&ratio) {
        return Err(ForestError::InvalidPruneRatio { ratio });
    }
    Ok(())
}


/// Check the number of features given to each member of an ensemble.
#[inline(always)]
pub(crate) fn check_feature_count(features: usize, n_features: usize)
    -> Result<()>
{
    if features == 0 || features > n_features {
        return Err(ForestError::InvalidFeatureCount { features, n_features });
    }
    Ok(())
}
