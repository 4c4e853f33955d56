//! Endgame detection by partitioning the board into wall-bounded regions.
//!
//! The game ends as soon as the two tokens no longer share a region; the
//! larger region wins. Checking only the right and down side of each cell
//! is enough because walls are mirrored.

use enclosure_core::{Side, Verdict};
use petgraph::unionfind::UnionFind;

use crate::{Board, Direction, Position};

/// Region sizes of both tokens
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Regions {
    /// Cells reachable from my token
    pub me: usize,
    /// Cells reachable from the adversary's token
    pub adversary: usize,
    /// True if both tokens share one region
    pub connected: bool,
}

impl Regions {
    /// Verdict implied by the region sizes
    pub fn verdict(&self) -> Verdict {
        if self.connected {
            Verdict::Ongoing
        } else if self.me > self.adversary {
            Verdict::Win(Side::Me)
        } else if self.me < self.adversary {
            Verdict::Win(Side::Adversary)
        } else {
            Verdict::Tie
        }
    }
}

/// Partitions the board and measures the regions holding `me` and `adversary`
pub fn regions(board: &Board, me: Position, adversary: Position) -> Regions {
    let size = board.size();
    let mut sets = UnionFind::<usize>::new(size * size);

    for row in 0..size {
        for col in 0..size {
            let pos = Position::new(row, col);
            let index = row * size + col;
            if col + 1 < size && !board.has_wall(pos, Direction::Right) {
                sets.union(index, index + 1);
            }
            if row + 1 < size && !board.has_wall(pos, Direction::Down) {
                sets.union(index, index + size);
            }
        }
    }

    let labels = sets.into_labeling();
    let me_label = labels[me.row * size + me.col];
    let adversary_label = labels[adversary.row * size + adversary.col];
    let region_size = |label: usize| labels.iter().filter(|&&l| l == label).count();

    Regions {
        me: region_size(me_label),
        adversary: region_size(adversary_label),
        connected: me_label == adversary_label,
    }
}

/// Decides whether the game is over, and who won, without touching the board
pub fn evaluate(board: &Board, me: Position, adversary: Position) -> Verdict {
    regions(board, me, adversary).verdict()
}
