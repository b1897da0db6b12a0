//! The core library for `Classifier` traits
//! and the combination of many classifiers.

pub(crate) mod hypothesis_traits;
pub(crate) mod majority_vote;


pub use hypothesis_traits::Classifier;
pub use majority_vote::MajorityVote;
