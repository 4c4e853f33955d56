//! Enclosure Agent - players and match harness
//!
//! Wraps the search engine behind a per-turn `step` interface, provides a
//! random-walk baseline, and runs head-to-head games for evaluation.

pub mod agent;
pub mod arena;
pub mod baseline;
pub mod config;

pub use agent::{MctsAgent, Player};
pub use arena::{play_game, random_start, GameRecord, MoveRecord, StartPosition};
pub use baseline::RandomAgent;
pub use config::load_config;
