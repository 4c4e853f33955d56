//! Leaf evaluation for MCTS.
//!
//! The `Evaluator` trait is the seam between the tree search and whatever
//! estimates a leaf's value. `RolloutEvaluator` plays the position out with
//! the same bucket-weighted policy the tree uses for expansion.

use std::cell::RefCell;

use enclosure_core::{Game, Side};
use rand::Rng;

use crate::config::MctsConfig;
use crate::policy::SamplingPolicy;

/// Trait for evaluating game positions.
pub trait Evaluator<G: Game> {
    /// Value of `state` for `perspective`, in [-1, 1] where +1 means
    /// `perspective` wins.
    fn evaluate(&self, game: &G, state: &G::State, perspective: Side) -> f32;
}

/// Evaluator using biased random playouts.
pub struct RolloutEvaluator<R: Rng> {
    /// Random number generator (wrapped in RefCell for interior mutability).
    rng: RefCell<R>,

    /// Action sampler, weighted on `perspective`'s turns.
    policy: SamplingPolicy,

    /// Maximum moves in a playout before it is scored as a draw.
    max_rollout_depth: usize,
}

impl<R: Rng> RolloutEvaluator<R> {
    /// Create a new rollout evaluator.
    ///
    /// # Arguments
    /// * `rng` - Random number generator for rollouts
    /// * `policy` - Sampler shared with tree expansion
    /// * `max_rollout_depth` - Maximum moves in a playout
    pub fn new(rng: R, policy: SamplingPolicy, max_rollout_depth: usize) -> Self {
        Self {
            rng: RefCell::new(rng),
            policy,
            max_rollout_depth,
        }
    }

    /// Create an evaluator using the config's weights and depth cap.
    pub fn from_config(rng: R, config: &MctsConfig) -> Self {
        Self::new(
            rng,
            SamplingPolicy::new(config.bucket_weights),
            config.max_rollout_depth,
        )
    }

    /// Play `initial_state` out to the end without building nodes.
    ///
    /// Returns +1 / 0 / -1 from `perspective`'s point of view, or 0 if the
    /// depth cap is hit first.
    pub fn rollout<G: Game>(&self, game: &G, initial_state: &G::State, perspective: Side) -> f32 {
        let mut state = initial_state.clone();
        let mut rng = self.rng.borrow_mut();

        for _ in 0..self.max_rollout_depth {
            if let Some(score) = game.verdict(&state).score_for(perspective) {
                return score;
            }

            let actions = game.actions(&state);
            let weighted = game.to_move(&state) == perspective;
            let Some(index) = self
                .policy
                .choose(actions.counts(), actions.len(), weighted, &mut *rng)
            else {
                break;
            };
            state = game.apply(&state, actions.actions()[index]);
        }

        game.verdict(&state).score_for(perspective).unwrap_or(0.0)
    }
}

impl<G: Game, R: Rng> Evaluator<G> for RolloutEvaluator<R> {
    fn evaluate(&self, game: &G, state: &G::State, perspective: Side) -> f32 {
        self.rollout(game, state, perspective)
    }
}
