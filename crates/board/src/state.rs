//! Game state: the walled board plus both tokens and the side to move.

use std::fmt;

use enclosure_core::{ActionSet, EnclosureError, Result, Side, Verdict};

use crate::connectivity::{self, Regions};
use crate::{movegen, Board, Move, Position};

/// A snapshot of the game.
///
/// Token identities are fixed: `me` is always the engine's token, whichever
/// side is to move.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct GameState {
    board: Board,
    me: Position,
    adversary: Position,
    to_move: Side,
}

impl GameState {
    /// Creates a state with [`Side::Me`] to move
    pub fn new(board: Board, me: Position, adversary: Position) -> Result<Self> {
        board.check_bounds(me)?;
        board.check_bounds(adversary)?;
        if me == adversary {
            return Err(EnclosureError::InvalidMove(format!(
                "both tokens placed on {me}"
            )));
        }
        Ok(GameState {
            board,
            me,
            adversary,
            to_move: Side::Me,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn me(&self) -> Position {
        self.me
    }

    pub fn adversary(&self) -> Position {
        self.adversary
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Token position of `side`
    pub fn position(&self, side: Side) -> Position {
        match side {
            Side::Me => self.me,
            Side::Adversary => self.adversary,
        }
    }

    /// Enumerates moves for the side to move
    pub fn legal_moves(&self, max_step: usize) -> ActionSet<Move> {
        let actor = self.position(self.to_move);
        let opponent = self.position(self.to_move.opposite());
        movegen::enumerate(&self.board, actor, opponent, max_step)
    }

    /// Returns true if the side to move may play `mv`
    pub fn is_legal(&self, mv: Move, max_step: usize) -> bool {
        let actor = self.position(self.to_move);
        let opponent = self.position(self.to_move.opposite());
        movegen::is_legal(&self.board, actor, opponent, mv, max_step)
    }

    /// Applies an enumerated move for the side to move
    pub fn make_move(&self, mv: Move) -> GameState {
        debug_assert!(!self.board.has_wall(mv.pos, mv.dir), "wall {mv} already placed");
        let mut next = self.clone();
        match self.to_move {
            Side::Me => next.me = mv.pos,
            Side::Adversary => next.adversary = mv.pos,
        }
        next.board.set_wall(mv.pos, mv.dir);
        next.to_move = self.to_move.opposite();
        next
    }

    /// Validates and applies a move submitted from outside the engine
    pub fn try_move(&self, mv: Move, max_step: usize) -> Result<GameState> {
        if !self.is_legal(mv, max_step) {
            return Err(EnclosureError::InvalidMove(format!(
                "{mv} is not reachable for {} within {max_step} steps",
                self.to_move
            )));
        }
        Ok(self.make_move(mv))
    }

    /// Region sizes of both tokens
    pub fn regions(&self) -> Regions {
        connectivity::regions(&self.board, self.me, self.adversary)
    }

    pub fn verdict(&self) -> Verdict {
        connectivity::evaluate(&self.board, self.me, self.adversary)
    }

    /// Negated number of walls around `side`'s token
    pub fn wall_pressure(&self, side: Side) -> f32 {
        -(self.board.wall_count(self.position(side)) as f32)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marks = [(self.me, 'A'), (self.adversary, 'B')];
        f.write_str(&self.board.render(&marks))?;
        writeln!(f, "{} to move", self.to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;

    fn open_state(size: usize) -> GameState {
        let board = Board::new(size).unwrap();
        GameState::new(board, Position::new(0, 0), Position::new(size - 1, size - 1)).unwrap()
    }

    #[test]
    fn test_new_rejects_shared_cell() {
        let board = Board::new(3).unwrap();
        let err = GameState::new(board, Position::new(1, 1), Position::new(1, 1)).unwrap_err();
        assert!(matches!(err, EnclosureError::InvalidMove(_)));
    }

    #[test]
    fn test_new_rejects_out_of_bounds() {
        let board = Board::new(3).unwrap();
        let err = GameState::new(board, Position::new(3, 1), Position::new(1, 1)).unwrap_err();
        assert!(matches!(err, EnclosureError::OutOfBounds { .. }));
    }

    #[test]
    fn test_make_move_moves_the_side_to_move() {
        let state = open_state(4);
        let mv = Move::new(Position::new(1, 0), Direction::Right);
        let next = state.make_move(mv);

        assert_eq!(next.me(), Position::new(1, 0));
        assert_eq!(next.adversary(), state.adversary());
        assert_eq!(next.to_move(), Side::Adversary);
        assert!(next.board().has_wall(Position::new(1, 1), Direction::Left));
        // parent untouched
        assert!(!state.board().has_wall(Position::new(1, 0), Direction::Right));

        let reply = next.make_move(Move::new(Position::new(3, 2), Direction::Up));
        assert_eq!(reply.adversary(), Position::new(3, 2));
        assert_eq!(reply.me(), Position::new(1, 0));
        assert_eq!(reply.to_move(), Side::Me);
    }

    #[test]
    fn test_try_move_rejects_unreachable() {
        let state = open_state(5);
        let far = Move::new(Position::new(4, 0), Direction::Up);
        assert!(state.try_move(far, 2).is_err());
        assert!(state.try_move(far, 4).is_ok());
    }

    #[test]
    fn test_wall_pressure() {
        let state = open_state(3);
        assert_eq!(state.wall_pressure(Side::Me), -2.0);
        let next = state.make_move(Move::new(Position::new(0, 0), Direction::Right));
        assert_eq!(next.wall_pressure(Side::Me), -3.0);
    }

    #[test]
    fn test_display_marks_tokens() {
        let text = open_state(2).to_string();
        assert!(text.contains('A'));
        assert!(text.contains('B'));
        assert!(text.ends_with("me to move\n"));
    }
}
