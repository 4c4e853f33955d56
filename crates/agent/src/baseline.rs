//! Random-walk baseline opponent.
//!
//! Takes a random number of steps (up to the budget) through open sides,
//! never entering the opponent's cell, then walls a random open side of
//! wherever it stopped. Every move it produces is legal.

use enclosure_board::{Board, Direction, Move, Position};
use enclosure_core::{EnclosureError, Result};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::agent::Player;

pub struct RandomAgent<R: Rng = ChaCha8Rng> {
    name: String,
    rng: R,
}

impl RandomAgent<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(rng: R) -> Self {
        Self {
            name: "random".to_string(),
            rng,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn walk(
        &mut self,
        board: &Board,
        start: Position,
        adv_pos: Position,
        max_step: usize,
    ) -> Position {
        let size = board.size();
        let steps = self.rng.gen_range(0..=max_step);
        let mut pos = start;

        for _ in 0..steps {
            let options: Vec<Position> = board
                .open_sides(pos)
                .filter_map(|dir| pos.step(dir, size))
                .filter(|next| *next != adv_pos)
                .collect();
            match options.choose(&mut self.rng) {
                Some(next) => pos = *next,
                None => break,
            }
        }

        pos
    }
}

impl<R: Rng> Player for RandomAgent<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(
        &mut self,
        board: &Board,
        my_pos: Position,
        adv_pos: Position,
        max_step: usize,
    ) -> Result<Move> {
        board.check_bounds(my_pos)?;
        board.check_bounds(adv_pos)?;
        if my_pos == adv_pos {
            return Err(EnclosureError::InvalidMove(format!(
                "both tokens placed on {my_pos}"
            )));
        }

        let pos = self.walk(board, my_pos, adv_pos, max_step);
        let sides: Vec<Direction> = board.open_sides(pos).collect();
        let dir = sides.choose(&mut self.rng).ok_or(EnclosureError::NoLegalMoves)?;
        Ok(Move::new(pos, *dir))
    }
}
