//! Enclosure Core - Game abstractions and common types
//!
//! This crate provides the core `Game` trait the search engine plans over,
//! together with the shared outcome and action-set types.
//!
//! # Types
//!
//! - [`Game`] - Trait for game implementations
//! - [`Side`] / [`Verdict`] - Player identities and game outcome
//! - [`ActionSet`] - Enumerated actions with sampling bucket counts

mod error;
mod game;
mod types;

pub use error::{EnclosureError, Result};
pub use game::Game;
pub use types::{ActionSet, Bucket, BucketCounts, Side, Verdict};
