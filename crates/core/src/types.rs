//! Shared domain types with enforced invariants.
//!
//! - Side / Verdict: fixed player identities and game outcome
//! - ActionSet: enumerated actions whose bucket counts always match the list

use std::fmt;

use crate::{EnclosureError, Result};

/// One of the two players, by fixed identity.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Side {
    /// The player the engine decides for.
    Me,
    /// The opponent.
    Adversary,
}

impl Side {
    /// Get the opposing side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Me => Side::Adversary,
            Side::Adversary => Side::Me,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Me => write!(f, "me"),
            Side::Adversary => write!(f, "adversary"),
        }
    }
}

/// Result of inspecting a state for the end of the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Verdict {
    /// Both players still share a region.
    Ongoing,
    /// Regions are separated and equal in size.
    Tie,
    /// Regions are separated and this side's is larger.
    Win(Side),
}

impl Verdict {
    /// True once the players are separated.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Verdict::Ongoing)
    }

    /// Score of a terminal verdict from `side`'s point of view:
    /// `1.0` win, `0.0` tie, `-1.0` loss. `None` while ongoing.
    pub fn score_for(self, side: Side) -> Option<f32> {
        match self {
            Verdict::Ongoing => None,
            Verdict::Tie => Some(0.0),
            Verdict::Win(winner) if winner == side => Some(1.0),
            Verdict::Win(_) => Some(-1.0),
        }
    }
}

/// Sampling bucket of an enumerated action.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Bucket {
    Favorable,
    Neutral,
    Unfavorable,
}

/// Number of actions in each bucket.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BucketCounts {
    pub favorable: usize,
    pub neutral: usize,
    pub unfavorable: usize,
}

impl BucketCounts {
    pub fn new(favorable: usize, neutral: usize, unfavorable: usize) -> Self {
        Self {
            favorable,
            neutral,
            unfavorable,
        }
    }

    /// Total number of actions covered by the counts.
    pub fn total(&self) -> usize {
        self.favorable + self.neutral + self.unfavorable
    }

    /// Bucket of the action at `index` in a favorable ++ neutral ++ unfavorable list.
    pub fn bucket_of(&self, index: usize) -> Option<Bucket> {
        if index < self.favorable {
            Some(Bucket::Favorable)
        } else if index < self.favorable + self.neutral {
            Some(Bucket::Neutral)
        } else if index < self.total() {
            Some(Bucket::Unfavorable)
        } else {
            None
        }
    }
}

/// Actions available from a state, ordered favorable, neutral, unfavorable.
///
/// Invariant: when `counts` is present it totals exactly `actions.len()`.
/// A set without counts is either forced (a single winning action) or
/// unclassified, and is sampled uniformly.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionSet<A> {
    actions: Vec<A>,
    counts: Option<BucketCounts>,
}

impl<A> ActionSet<A> {
    /// Create a bucketed action set.
    ///
    /// # Errors
    /// Returns `EnclosureError::BucketMismatch` if the counts do not total
    /// the number of actions.
    pub fn new(actions: Vec<A>, counts: BucketCounts) -> Result<Self> {
        if counts.total() != actions.len() {
            return Err(EnclosureError::BucketMismatch {
                counted: counts.total(),
                actions: actions.len(),
            });
        }
        Ok(Self {
            actions,
            counts: Some(counts),
        })
    }

    /// Create a bucketed action set from per-bucket lists, concatenated in
    /// favorable, neutral, unfavorable order.
    pub fn from_buckets(favorable: Vec<A>, neutral: Vec<A>, unfavorable: Vec<A>) -> Self {
        let counts = BucketCounts::new(favorable.len(), neutral.len(), unfavorable.len());
        let mut actions = favorable;
        actions.extend(neutral);
        actions.extend(unfavorable);
        Self {
            actions,
            counts: Some(counts),
        }
    }

    /// A set holding exactly one action that must be played.
    pub fn forced(action: A) -> Self {
        Self {
            actions: vec![action],
            counts: None,
        }
    }

    /// A set with no bucket information, sampled uniformly.
    pub fn unclassified(actions: Vec<A>) -> Self {
        Self {
            actions,
            counts: None,
        }
    }

    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    pub fn counts(&self) -> Option<BucketCounts> {
        self.counts
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// True for a single-action set produced without bucket counts.
    pub fn is_forced(&self) -> bool {
        self.counts.is_none() && self.actions.len() == 1
    }

    pub fn into_parts(self) -> (Vec<A>, Option<BucketCounts>) {
        (self.actions, self.counts)
    }
}
