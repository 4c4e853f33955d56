//! Child sampling shared by expansion and rollouts.
//!
//! On the engine's own turns an action is drawn with probability
//! proportional to its bucket weight; otherwise, and whenever the weighted
//! distribution cannot be built, the draw is uniform.

use enclosure_core::{Bucket, BucketCounts};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::trace;

use crate::config::BucketWeights;

/// Bucket-weighted action sampler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingPolicy {
    weights: BucketWeights,
}

impl SamplingPolicy {
    pub fn new(weights: BucketWeights) -> Self {
        Self { weights }
    }

    /// Pick an index into a list of `len` actions.
    ///
    /// Weighted only when `weighted` is set and `counts` are known. Returns
    /// None for an empty list.
    pub fn choose<R: Rng>(
        &self,
        counts: Option<BucketCounts>,
        len: usize,
        weighted: bool,
        rng: &mut R,
    ) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if let (true, Some(counts)) = (weighted, counts) {
            debug_assert_eq!(
                counts.total(),
                len,
                "bucket counts {counts:?} do not cover {len} actions"
            );
            if let Some(index) = self.choose_weighted(counts, rng) {
                return Some(index);
            }
        }
        Some(rng.gen_range(0..len))
    }

    /// Draw a bucket with probability proportional to weight × size, then an
    /// action uniformly inside it. Equivalent to weighting every action
    /// individually.
    fn choose_weighted<R: Rng>(&self, counts: BucketCounts, rng: &mut R) -> Option<usize> {
        let sizes = [counts.favorable, counts.neutral, counts.unfavorable];
        let masses = [
            self.weights.weight(Bucket::Favorable) * counts.favorable as f64,
            self.weights.weight(Bucket::Neutral) * counts.neutral as f64,
            self.weights.weight(Bucket::Unfavorable) * counts.unfavorable as f64,
        ];

        let dist = match WeightedIndex::new(masses) {
            Ok(dist) => dist,
            Err(err) => {
                trace!(?counts, %err, "weighted sampling unavailable, using uniform");
                return None;
            }
        };

        let bucket = dist.sample(rng);
        let offset: usize = sizes[..bucket].iter().sum();
        Some(offset + rng.gen_range(0..sizes[bucket]))
    }
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self::new(BucketWeights::default())
    }
}
