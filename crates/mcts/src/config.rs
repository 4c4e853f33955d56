//! MCTS configuration parameters.
//!
//! These parameters control selection, rollout sampling and the wall-clock
//! budget of each decision. Every field has a default, so partial config
//! files deserialize cleanly.

use std::time::Duration;

use enclosure_core::{Bucket, EnclosureError, Result};
use serde::{Deserialize, Serialize};

/// Relative sampling weight of each action bucket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketWeights {
    pub favorable: f64,
    pub neutral: f64,
    pub unfavorable: f64,
}

impl Default for BucketWeights {
    fn default() -> Self {
        Self {
            favorable: 35.0,
            neutral: 45.0,
            unfavorable: 20.0,
        }
    }
}

impl BucketWeights {
    /// Weight of a single action in `bucket`.
    pub fn weight(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::Favorable => self.favorable,
            Bucket::Neutral => self.neutral,
            Bucket::Unfavorable => self.unfavorable,
        }
    }
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Exploration constant of the UCB term.
    pub exploration: f32,

    /// Scale of the static wall-pressure bias, divided by child visits.
    pub heuristic_weight: f32,

    /// Sampling weights used on the engine's own turns.
    pub bucket_weights: BucketWeights,

    /// Budget of the first decision of a game, in milliseconds.
    /// The harness allows much more time for the opening move.
    pub first_budget_ms: u64,

    /// Budget of every later decision, in milliseconds.
    pub turn_budget_ms: u64,

    /// Optional cap on simulations per decision.
    /// The search stops at whichever of budget or cap comes first.
    pub max_simulations: Option<usize>,

    /// Moves after which a rollout gives up and scores a draw.
    pub max_rollout_depth: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: 2.0,
            heuristic_weight: 0.05,
            bucket_weights: BucketWeights::default(),
            first_budget_ms: 29_800,
            turn_budget_ms: 1_900,
            max_simulations: None,
            max_rollout_depth: 10_000,
        }
    }
}

impl MctsConfig {
    /// Create a config bounded by simulation count rather than time.
    pub fn with_simulations(num_simulations: usize) -> Self {
        Self {
            first_budget_ms: 60_000,
            turn_budget_ms: 60_000,
            max_simulations: Some(num_simulations),
            ..Default::default()
        }
    }

    /// Create a fast time-bounded config for testing.
    pub fn for_testing() -> Self {
        Self {
            first_budget_ms: 50,
            turn_budget_ms: 20,
            ..Default::default()
        }
    }

    /// Wall-clock budget of a decision.
    pub fn budget(&self, first_decision: bool) -> Duration {
        if first_decision {
            Duration::from_millis(self.first_budget_ms)
        } else {
            Duration::from_millis(self.turn_budget_ms)
        }
    }

    /// Check that every parameter is usable.
    ///
    /// # Errors
    /// Returns `EnclosureError::InvalidConfig` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(EnclosureError::InvalidConfig(format!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            )));
        }
        if !self.heuristic_weight.is_finite() {
            return Err(EnclosureError::InvalidConfig(format!(
                "heuristic_weight must be finite, got {}",
                self.heuristic_weight
            )));
        }
        let w = &self.bucket_weights;
        if [w.favorable, w.neutral, w.unfavorable]
            .iter()
            .any(|x| !x.is_finite() || *x < 0.0)
        {
            return Err(EnclosureError::InvalidConfig(format!(
                "bucket weights must be non-negative, got {w:?}"
            )));
        }
        if self.first_budget_ms == 0 || self.turn_budget_ms == 0 {
            return Err(EnclosureError::InvalidConfig(
                "decision budgets must be positive".to_string(),
            ));
        }
        if self.max_simulations == Some(0) {
            return Err(EnclosureError::InvalidConfig(
                "max_simulations must be positive when set".to_string(),
            ));
        }
        if self.max_rollout_depth == 0 {
            return Err(EnclosureError::InvalidConfig(
                "max_rollout_depth must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
