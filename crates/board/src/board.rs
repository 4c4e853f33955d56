//! Walled grid representation.
//!
//! Each cell stores a 4-bit mask, one bit per side (up, right, down, left).
//! A wall between two neighbouring cells is always recorded on both of them,
//! and the outer edge of the board is permanently walled.

use std::fmt;

use enclosure_core::{EnclosureError, Result};

use crate::{Direction, Position};

/// Mask with every side walled
pub const FULL_MASK: u8 = 0b1111;

/// An N×N board of wall masks
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    size: usize,
    cells: Vec<u8>,
}

impl Board {
    /// Smallest supported board edge
    pub const MIN_SIZE: usize = 2;
    /// Largest supported board edge
    pub const MAX_SIZE: usize = 64;

    /// Creates an empty board whose only walls are the outer border
    pub fn new(size: usize) -> Result<Self> {
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&size) {
            return Err(EnclosureError::InvalidBoardSize(size));
        }

        let mut cells = vec![0u8; size * size];
        for row in 0..size {
            for col in 0..size {
                let mut mask = 0;
                if row == 0 {
                    mask |= Direction::Up.bit();
                }
                if row == size - 1 {
                    mask |= Direction::Down.bit();
                }
                if col == 0 {
                    mask |= Direction::Left.bit();
                }
                if col == size - 1 {
                    mask |= Direction::Right.bit();
                }
                cells[row * size + col] = mask;
            }
        }

        Ok(Board { size, cells })
    }

    /// Builds a board from row-major wall masks, checking the border and
    /// mirroring invariants
    pub fn from_masks(size: usize, masks: Vec<u8>) -> Result<Self> {
        let border = Self::new(size)?;
        if masks.len() != size * size {
            return Err(EnclosureError::InconsistentWalls(format!(
                "expected {} cells, got {}",
                size * size,
                masks.len()
            )));
        }

        let board = Board { size, cells: masks };
        for row in 0..size {
            for col in 0..size {
                let pos = Position::new(row, col);
                let mask = board.mask(pos);
                if mask > FULL_MASK {
                    return Err(EnclosureError::InconsistentWalls(format!(
                        "cell {pos} has mask {mask:#06b}"
                    )));
                }
                if mask & border.mask(pos) != border.mask(pos) {
                    return Err(EnclosureError::InconsistentWalls(format!(
                        "cell {pos} is missing a border wall"
                    )));
                }
                for dir in Direction::ALL {
                    if let Some(next) = pos.step(dir, size) {
                        if board.has_wall(pos, dir) != board.has_wall(next, dir.opposite()) {
                            return Err(EnclosureError::InconsistentWalls(format!(
                                "wall {dir} of {pos} is not mirrored by {next}"
                            )));
                        }
                    }
                }
            }
        }

        Ok(board)
    }

    /// Builds a board from per-cell wall flags indexed `[row][col][dir]`,
    /// the layout used by the game harness
    pub fn from_flags(flags: &[Vec<[bool; 4]>]) -> Result<Self> {
        let size = flags.len();
        let mut masks = Vec::with_capacity(size * size);
        for row in flags {
            if row.len() != size {
                return Err(EnclosureError::InconsistentWalls(format!(
                    "row of length {} on a board of size {size}",
                    row.len()
                )));
            }
            for cell in row {
                let mask = Direction::ALL
                    .iter()
                    .filter(|dir| cell[dir.index()])
                    .fold(0u8, |mask, dir| mask | dir.bit());
                masks.push(mask);
            }
        }
        Self::from_masks(size, masks)
    }

    /// Board edge length
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Wall masks of every cell, row-major
    pub fn masks(&self) -> &[u8] {
        &self.cells
    }

    /// Returns true if `pos` lies on the board
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.size)
    }

    /// Checks that `pos` lies on the board
    pub fn check_bounds(&self, pos: Position) -> Result<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(EnclosureError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                size: self.size,
            })
        }
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        debug_assert!(self.contains(pos), "{pos} outside {0}x{0} board", self.size);
        pos.row * self.size + pos.col
    }

    /// Raw wall mask of a cell
    #[inline]
    pub fn mask(&self, pos: Position) -> u8 {
        self.cells[self.index(pos)]
    }

    /// Returns true if the given side of the cell is walled
    #[inline]
    pub fn has_wall(&self, pos: Position, dir: Direction) -> bool {
        self.mask(pos) & dir.bit() != 0
    }

    /// Number of walled sides of a cell (0-4)
    #[inline]
    pub fn wall_count(&self, pos: Position) -> usize {
        self.mask(pos).count_ones() as usize
    }

    /// Sides of a cell where a wall can still be placed
    pub fn open_sides(&self, pos: Position) -> impl Iterator<Item = Direction> {
        let mask = self.mask(pos);
        Direction::ALL
            .into_iter()
            .filter(move |dir| mask & dir.bit() == 0)
    }

    /// Places a wall, rejecting cells off the board and occupied sides
    pub fn place_wall(&mut self, pos: Position, dir: Direction) -> Result<()> {
        self.check_bounds(pos)?;
        if self.has_wall(pos, dir) {
            return Err(EnclosureError::InvalidMove(format!(
                "wall {dir} of {pos} is already placed"
            )));
        }
        self.set_wall(pos, dir);
        Ok(())
    }

    /// Sets a wall and its mirror on the neighbouring cell
    pub(crate) fn set_wall(&mut self, pos: Position, dir: Direction) {
        let index = self.index(pos);
        self.cells[index] |= dir.bit();
        if let Some(next) = pos.step(dir, self.size) {
            let index = self.index(next);
            self.cells[index] |= dir.opposite().bit();
        }
    }

    /// Renders the board as ASCII art, drawing `marks` inside their cells
    pub fn render(&self, marks: &[(Position, char)]) -> String {
        let mut out = String::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let up = self.has_wall(Position::new(row, col), Direction::Up);
                out.push('+');
                out.push_str(if up { "---" } else { "   " });
            }
            out.push_str("+\n");

            for col in 0..self.size {
                let pos = Position::new(row, col);
                out.push(if self.has_wall(pos, Direction::Left) { '|' } else { ' ' });
                let mark = marks
                    .iter()
                    .find(|(at, _)| *at == pos)
                    .map_or(' ', |(_, c)| *c);
                out.push(' ');
                out.push(mark);
                out.push(' ');
            }
            let last = Position::new(row, self.size - 1);
            out.push(if self.has_wall(last, Direction::Right) { '|' } else { ' ' });
            out.push('\n');
        }
        for col in 0..self.size {
            let down = self.has_wall(Position::new(self.size - 1, col), Direction::Down);
            out.push('+');
            out.push_str(if down { "---" } else { "   " });
        }
        out.push_str("+\n");
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_has_border_walls() {
        let board = Board::new(3).unwrap();
        assert_eq!(board.wall_count(Position::new(0, 0)), 2);
        assert_eq!(board.wall_count(Position::new(0, 1)), 1);
        assert_eq!(board.wall_count(Position::new(1, 1)), 0);
        assert!(board.has_wall(Position::new(2, 2), Direction::Down));
        assert!(board.has_wall(Position::new(2, 2), Direction::Right));
    }

    #[test]
    fn test_invalid_sizes() {
        assert_eq!(Board::new(1), Err(EnclosureError::InvalidBoardSize(1)));
        assert_eq!(Board::new(65), Err(EnclosureError::InvalidBoardSize(65)));
    }

    #[test]
    fn test_place_wall_is_mirrored() {
        let mut board = Board::new(4).unwrap();
        board.place_wall(Position::new(1, 1), Direction::Right).unwrap();
        assert!(board.has_wall(Position::new(1, 1), Direction::Right));
        assert!(board.has_wall(Position::new(1, 2), Direction::Left));

        board.place_wall(Position::new(2, 2), Direction::Up).unwrap();
        assert!(board.has_wall(Position::new(1, 2), Direction::Down));
    }

    #[test]
    fn test_place_wall_twice_fails() {
        let mut board = Board::new(3).unwrap();
        board.place_wall(Position::new(1, 1), Direction::Up).unwrap();
        assert!(matches!(
            board.place_wall(Position::new(0, 1), Direction::Down),
            Err(EnclosureError::InvalidMove(_))
        ));
        assert!(matches!(
            board.place_wall(Position::new(0, 0), Direction::Up),
            Err(EnclosureError::InvalidMove(_))
        ));
    }

    #[test]
    fn test_place_wall_out_of_bounds() {
        let mut board = Board::new(3).unwrap();
        assert_eq!(
            board.place_wall(Position::new(3, 0), Direction::Up),
            Err(EnclosureError::OutOfBounds {
                row: 3,
                col: 0,
                size: 3
            })
        );
    }

    #[test]
    fn test_open_sides() {
        let board = Board::new(3).unwrap();
        let open: Vec<_> = board.open_sides(Position::new(0, 0)).collect();
        assert_eq!(open, vec![Direction::Right, Direction::Down]);
        assert_eq!(board.open_sides(Position::new(1, 1)).count(), 4);
    }

    #[test]
    fn test_from_masks_roundtrip() {
        let mut board = Board::new(3).unwrap();
        board.place_wall(Position::new(0, 1), Direction::Down).unwrap();
        let masks: Vec<u8> = (0..3)
            .flat_map(|r| (0..3).map(move |c| Position::new(r, c)))
            .map(|p| board.mask(p))
            .collect();
        assert_eq!(Board::from_masks(3, masks).unwrap(), board);
    }

    #[test]
    fn test_from_masks_rejects_unmirrored_wall() {
        let mut masks: Vec<u8> = {
            let board = Board::new(2).unwrap();
            (0..2)
                .flat_map(|r| (0..2).map(move |c| Position::new(r, c)))
                .map(|p| board.mask(p))
                .collect()
        };
        masks[0] |= Direction::Right.bit();
        assert!(matches!(
            Board::from_masks(2, masks),
            Err(EnclosureError::InconsistentWalls(_))
        ));
    }

    #[test]
    fn test_from_flags_requires_border() {
        let flags = vec![vec![[false; 4]; 2]; 2];
        assert!(matches!(
            Board::from_flags(&flags),
            Err(EnclosureError::InconsistentWalls(_))
        ));

        let mut flags = vec![vec![[false; 4]; 2]; 2];
        flags[0][0] = [true, false, false, true];
        flags[0][1] = [true, true, false, false];
        flags[1][0] = [false, false, true, true];
        flags[1][1] = [false, true, true, false];
        assert_eq!(Board::from_flags(&flags).unwrap(), Board::new(2).unwrap());
    }

    #[test]
    fn test_render_draws_marks() {
        let board = Board::new(2).unwrap();
        let text = board.render(&[(Position::new(0, 0), 'A')]);
        assert!(text.starts_with("+---+---+\n| A "));
        assert_eq!(text.lines().count(), 5);
    }
}
