//! Enclosure Board - the walled grid game
//!
//! This crate implements the board model, the union-find connectivity
//! oracle that detects the end of the game, and the bucketed move
//! enumerator that feeds the search.

mod board;
mod cell;
pub mod connectivity;
mod direction;
mod game_impl;
pub mod movegen;
mod moves;
mod state;

pub use board::{Board, FULL_MASK};
pub use cell::Position;
pub use connectivity::{evaluate, regions, Regions};
pub use direction::Direction;
pub use game_impl::WallGame;
pub use movegen::{enumerate, Quadrant};
pub use moves::Move;
pub use state::GameState;
