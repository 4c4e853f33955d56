//! Head-to-head games between two players.
//!
//! Player 0 owns the `me` token of the underlying [`GameState`] and moves
//! first. Every submitted move is validated before it is applied, so a
//! misbehaving player ends the game with an error rather than corrupting
//! the board.

use anyhow::{bail, Context, Result};
use enclosure_board::{Board, Direction, GameState, Move, Position, WallGame};
use enclosure_core::{Side, Verdict};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::agent::Player;

/// Attempts at drawing an unfinished random start before giving up on
/// interior walls.
const START_ATTEMPTS: usize = 32;

/// Initial board, token cells and step budget of a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartPosition {
    pub board: Board,
    pub first: Position,
    pub second: Position,
    pub max_step: usize,
}

impl StartPosition {
    fn state(&self) -> enclosure_core::Result<GameState> {
        GameState::new(self.board.clone(), self.first, self.second)
    }
}

/// One applied move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Index of the player who moved (0 or 1).
    pub player: usize,
    pub mv: Move,
}

/// Outcome of a finished game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub players: [String; 2],
    pub size: usize,
    pub max_step: usize,
    pub start: [Position; 2],
    /// Row-major wall masks of the starting board.
    pub start_walls: Vec<u8>,
    pub moves: Vec<MoveRecord>,
    /// Final region sizes of player 0 and player 1.
    pub regions: [usize; 2],
    /// Index of the winner, None on a tie.
    pub winner: Option<usize>,
    pub turns: usize,
}

/// Draw a random unfinished start: border walls, a scatter of interior
/// walls and two distinct token cells.
pub fn random_start<R: Rng>(size: usize, rng: &mut R) -> Result<StartPosition> {
    let empty = Board::new(size).with_context(|| format!("cannot build a {size}x{size} board"))?;
    let cells = size * size;

    for attempt in 0..=START_ATTEMPTS {
        let mut board = empty.clone();
        // last attempt keeps the board open so the start is always playable
        let walls = if attempt == START_ATTEMPTS {
            0
        } else {
            rng.gen_range(0..=size)
        };

        for _ in 0..walls {
            let pos = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
            let dir = Direction::from_index(rng.gen_range(0..4)).unwrap_or(Direction::Up);
            if !board.has_wall(pos, dir) {
                board.place_wall(pos, dir)?;
            }
        }

        let a = rng.gen_range(0..cells);
        let b = (a + rng.gen_range(1..cells)) % cells;
        let start = StartPosition {
            board,
            first: Position::new(a / size, a % size),
            second: Position::new(b / size, b % size),
            max_step: WallGame::default_max_step(size),
        };

        if !start.state()?.verdict().is_terminal() {
            return Ok(start);
        }
        trace!(attempt, "random start already decided, redrawing");
    }

    bail!("could not draw an unfinished {size}x{size} start")
}

/// Play one game to completion, player 0 moving first.
///
/// # Errors
/// Fails if a player errors or submits an illegal move.
pub fn play_game(
    p0: &mut dyn Player,
    p1: &mut dyn Player,
    start: &StartPosition,
) -> Result<GameRecord> {
    let mut state = start.state().context("invalid start position")?;
    let players = [p0.name().to_string(), p1.name().to_string()];
    p0.new_game();
    p1.new_game();

    let mut moves = Vec::new();
    while !state.verdict().is_terminal() {
        let (player, me, adv) = match state.to_move() {
            Side::Me => (0, state.me(), state.adversary()),
            Side::Adversary => (1, state.adversary(), state.me()),
        };
        let step = if player == 0 {
            p0.step(state.board(), me, adv, start.max_step)
        } else {
            p1.step(state.board(), me, adv, start.max_step)
        };

        let mv = step.with_context(|| {
            format!("{} failed to move on turn {}", players[player], moves.len())
        })?;
        state = state
            .try_move(mv, start.max_step)
            .with_context(|| format!("{} played an illegal move", players[player]))?;

        trace!(player = %players[player], %mv, "move");
        moves.push(MoveRecord { player, mv });
    }

    let regions = state.regions();
    let winner = match state.verdict() {
        Verdict::Win(Side::Me) => Some(0),
        Verdict::Win(Side::Adversary) => Some(1),
        _ => None,
    };
    debug!(
        p0 = %players[0],
        p1 = %players[1],
        turns = moves.len(),
        ?winner,
        "game finished"
    );

    Ok(GameRecord {
        size: start.board.size(),
        max_step: start.max_step,
        start: [start.first, start.second],
        start_walls: start.board.masks().to_vec(),
        regions: [regions.me, regions.adversary],
        turns: moves.len(),
        winner,
        moves,
        players,
    })
}
