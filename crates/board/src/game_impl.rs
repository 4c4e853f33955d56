//! Implementation of the enclosure `Game` trait for the walled board.

use enclosure_core::{ActionSet, Game, Side, Verdict};

use crate::{GameState, Move};

/// The wall-placement game with a fixed per-turn step budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallGame {
    /// Maximum number of orthogonal steps per move
    pub max_step: usize,
}

impl WallGame {
    pub fn new(max_step: usize) -> Self {
        WallGame { max_step }
    }

    /// Step budget the harness uses for a board of the given size
    pub fn default_max_step(board_size: usize) -> usize {
        (board_size + 1) / 2
    }
}

impl Game for WallGame {
    type State = GameState;
    type Action = Move;

    fn actions(&self, state: &GameState) -> ActionSet<Move> {
        state.legal_moves(self.max_step)
    }

    fn apply(&self, state: &GameState, action: Move) -> GameState {
        state.make_move(action)
    }

    fn to_move(&self, state: &GameState) -> Side {
        state.to_move()
    }

    fn verdict(&self, state: &GameState) -> Verdict {
        state.verdict()
    }

    fn heuristic(&self, state: &GameState, side: Side) -> f32 {
        state.wall_pressure(side)
    }
}
