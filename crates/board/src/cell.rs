use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Direction;

/// A cell on the board as (row, column); row 0 is the top edge
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Returns true if the cell lies on a `size`x`size` board
    #[inline]
    pub const fn is_within(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Returns the neighbouring cell in `dir`, or None past the board edge
    #[inline]
    pub fn step(self, dir: Direction, size: usize) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Position { row, col };
        next.is_within(size).then_some(next)
    }

    /// Signed (row, col) offset from `origin` to this cell
    #[inline]
    pub fn offset_from(self, origin: Position) -> (isize, isize) {
        (
            self.row as isize - origin.row as isize,
            self.col as isize - origin.col as isize,
        )
    }

    /// Manhattan distance to another cell
    #[inline]
    pub fn distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
