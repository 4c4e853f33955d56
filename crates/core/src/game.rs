use std::fmt::Debug;
use std::hash::Hash;

use crate::{ActionSet, Side, Verdict};

/// A two-player, alternating-move game the search engine can plan over.
///
/// States carry fixed player identities: [`Side::Me`] is always the player
/// the engine decides for, and [`Game::to_move`] says whose turn it is.
pub trait Game: Clone {
    /// The game state (board plus both players' positions)
    type State: Clone;

    /// A game action
    type Action: Clone + Copy + Eq + Hash + Debug;

    /// Returns every action available to the side to move, grouped into
    /// sampling buckets.
    fn actions(&self, state: &Self::State) -> ActionSet<Self::Action>;

    /// Applies an action for the side to move, returning a new state
    fn apply(&self, state: &Self::State, action: Self::Action) -> Self::State;

    /// Returns the side whose turn it is
    fn to_move(&self, state: &Self::State) -> Side;

    /// Returns the verdict of the state with fixed identities
    fn verdict(&self, state: &Self::State) -> Verdict;

    /// Static positional bias for `side` in this state (higher is better)
    fn heuristic(&self, state: &Self::State, side: Side) -> f32;

    /// Returns true if the game has ended
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.verdict(state).is_terminal()
    }
}
