//! Monte Carlo Tree Search for two-player enclosure games.
//!
//! This crate provides a generic, time-budgeted MCTS that can be used with
//! any game implementing the `enclosure_core::Game` trait.
//!
//! # Features
//!
//! - **Generic**: Works with any `Game` implementation
//! - **UCB Selection**: Exploration term plus a static heuristic bias
//! - **Deferred Expansion**: Nodes grow children on their second visit
//! - **Biased Rollouts**: Bucket-weighted sampling on the deciding side's turns
//! - **Budgets**: Separate opening and per-turn time limits, optional
//!   simulation cap
//!
//! # Example
//!
//! ```
//! use enclosure_board::{Board, GameState, Position, WallGame};
//! use enclosure_mcts::{Mcts, MctsConfig, RolloutEvaluator};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let board = Board::new(5).unwrap();
//! let state = GameState::new(board, Position::new(0, 0), Position::new(4, 4)).unwrap();
//! let game = WallGame::new(3);
//!
//! let config = MctsConfig::with_simulations(200);
//! let evaluator = RolloutEvaluator::from_config(ChaCha8Rng::seed_from_u64(1), &config);
//! let mut mcts = Mcts::new(config, evaluator, ChaCha8Rng::seed_from_u64(42));
//!
//! let result = mcts.decide(&game, &state).unwrap();
//! println!("Best action: {}", result.best_action);
//! println!("Root value: {}", result.root_value);
//! ```

pub mod config;
pub mod evaluator;
mod node;
pub mod policy;
pub mod search;
mod tree;

pub use config::{BucketWeights, MctsConfig};
pub use evaluator::{Evaluator, RolloutEvaluator};
pub use node::{Node, NodeId, NodeStats};
pub use policy::SamplingPolicy;
pub use search::{Mcts, SearchResult};
pub use tree::Tree;
