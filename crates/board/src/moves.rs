//! A turn's action: where the token ends up and which side gets a wall.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Direction, Position};

/// Destination cell plus the side of it that receives a new wall
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Move {
    pub pos: Position,
    pub dir: Direction,
}

impl Move {
    #[inline]
    pub const fn new(pos: Position, dir: Direction) -> Self {
        Move { pos, dir }
    }

    /// Splits into the `(destination, wall side)` pair the harness expects
    #[inline]
    pub const fn into_parts(self) -> (Position, Direction) {
        (self.pos, self.dir)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pos, self.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mv = Move::new(Position::new(2, 3), Direction::Left);
        assert_eq!(mv.to_string(), "(2, 3) l");
        assert_eq!(mv.into_parts(), (Position::new(2, 3), Direction::Left));
    }
}
