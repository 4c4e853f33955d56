//! Move enumeration.
//!
//! Moves are generated by a breadth-first walk from the acting token, bounded
//! by the step budget, blocked by walls and by the opposing token. Every open
//! side of every reachable cell is a move. Moves are bucketed to bias
//! sampling toward contested space:
//!
//! | quadrant | walls ≤ 1   | walls = 2   | walls = 3   |
//! |----------|-------------|-------------|-------------|
//! | toward   | favorable   | neutral     | unfavorable |
//! | neutral  | neutral     | unfavorable | unfavorable |
//! | away     | unfavorable | unfavorable | unfavorable |
//!
//! When the opponent already sits behind three walls and the fourth can be
//! reached, that single enclosing move is returned on its own.

use std::collections::VecDeque;

use enclosure_core::{ActionSet, Bucket};

use crate::{Board, Move, Position};

/// Direction of a cell from the actor, relative to where the opponent is
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Quadrant {
    /// Same quadrant as the opponent
    Toward,
    /// An adjacent quadrant
    Neutral,
    /// The opposite quadrant
    Away,
}

/// Classifies `cell` by comparing its offset from `actor` with the
/// opponent's offset, axis by axis. A zero opponent offset on one axis
/// leaves only the other axis to compare.
pub fn classify(actor: Position, cell: Position, opponent: Position) -> Quadrant {
    let (opp_row, opp_col) = opponent.offset_from(actor);
    let (row, col) = cell.offset_from(actor);
    let agrees = |offset: isize, target: isize| (offset >= 0) == (target >= 0);

    let (toward, away) = if opp_row == 0 {
        let same = agrees(col, opp_col);
        (same, !same)
    } else if opp_col == 0 {
        let same = agrees(row, opp_row);
        (same, !same)
    } else {
        let same_row = agrees(row, opp_row);
        let same_col = agrees(col, opp_col);
        (same_row && same_col, !same_row && !same_col)
    };

    if toward {
        Quadrant::Toward
    } else if away {
        Quadrant::Away
    } else {
        Quadrant::Neutral
    }
}

/// Sampling bucket for a wall placed in a cell of the given quadrant that
/// already has `walls` walls
pub fn bucket_for(quadrant: Quadrant, walls: usize) -> Bucket {
    match (quadrant, walls) {
        (Quadrant::Toward, 0..=1) => Bucket::Favorable,
        (Quadrant::Toward, 2) => Bucket::Neutral,
        (Quadrant::Neutral, 0..=1) => Bucket::Neutral,
        _ => Bucket::Unfavorable,
    }
}

/// The move that closes the opponent's last open side, if it has exactly one
pub fn enclosing_move(board: &Board, opponent: Position) -> Option<Move> {
    if board.wall_count(opponent) != 3 {
        return None;
    }
    let open = board.open_sides(opponent).next()?;
    let target = opponent.step(open, board.size())?;
    Some(Move::new(target, open.opposite()))
}

/// Cells reachable from `actor` in at most `max_step` steps, in breadth-first
/// order (the actor's own cell first). Walls and the opponent's cell block
/// movement.
pub fn reachable(
    board: &Board,
    actor: Position,
    opponent: Position,
    max_step: usize,
) -> Vec<Position> {
    let size = board.size();
    let mut seen = vec![false; size * size];
    let mut queue = VecDeque::new();
    let mut cells = Vec::new();

    seen[actor.row * size + actor.col] = true;
    queue.push_back((actor, max_step));

    while let Some((pos, steps_left)) = queue.pop_front() {
        cells.push(pos);
        if steps_left == 0 {
            continue;
        }
        for dir in board.open_sides(pos) {
            let Some(next) = pos.step(dir, size) else {
                continue;
            };
            let index = next.row * size + next.col;
            if next == opponent || seen[index] {
                continue;
            }
            seen[index] = true;
            queue.push_back((next, steps_left - 1));
        }
    }

    cells
}

/// Enumerates every move for the token at `actor`.
///
/// Returns a forced single-move set when the opponent can be enclosed this
/// turn, otherwise all moves ordered favorable, neutral, unfavorable with
/// their bucket counts.
pub fn enumerate(
    board: &Board,
    actor: Position,
    opponent: Position,
    max_step: usize,
) -> ActionSet<Move> {
    let cells = reachable(board, actor, opponent, max_step);

    if let Some(finisher) = enclosing_move(board, opponent) {
        if cells.contains(&finisher.pos) {
            return ActionSet::forced(finisher);
        }
    }

    let mut favorable = Vec::new();
    let mut neutral = Vec::new();
    let mut unfavorable = Vec::new();

    for pos in cells {
        let bucket = bucket_for(classify(actor, pos, opponent), board.wall_count(pos));
        let list = match bucket {
            Bucket::Favorable => &mut favorable,
            Bucket::Neutral => &mut neutral,
            Bucket::Unfavorable => &mut unfavorable,
        };
        list.extend(board.open_sides(pos).map(|dir| Move::new(pos, dir)));
    }

    ActionSet::from_buckets(favorable, neutral, unfavorable)
}

/// Checks a submitted move: destination on the board, reachable within the
/// budget, not the opponent's cell, and the chosen side still open
pub fn is_legal(
    board: &Board,
    actor: Position,
    opponent: Position,
    mv: Move,
    max_step: usize,
) -> bool {
    if !board.contains(mv.pos) || mv.pos == opponent || board.has_wall(mv.pos, mv.dir) {
        return false;
    }
    if mv.pos.distance(actor) > max_step {
        return false;
    }
    reachable(board, actor, opponent, max_step).contains(&mv.pos)
}
