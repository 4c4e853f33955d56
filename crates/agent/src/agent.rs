//! Players the arena can pit against each other.

use enclosure_board::{Board, GameState, Move, Position, WallGame};
use enclosure_core::Result;
use enclosure_mcts::{Mcts, MctsConfig, RolloutEvaluator, SearchResult};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Anything that can choose a move given the board and both tokens.
pub trait Player {
    /// Short label used in logs and game records.
    fn name(&self) -> &str;

    /// Choose a move for the token at `my_pos`.
    fn step(
        &mut self,
        board: &Board,
        my_pos: Position,
        adv_pos: Position,
        max_step: usize,
    ) -> Result<Move>;

    /// Called before the first move of every game.
    fn new_game(&mut self) {}
}

type Engine = Mcts<WallGame, RolloutEvaluator<ChaCha8Rng>, ChaCha8Rng>;

/// The search engine behind the [`Player`] interface.
///
/// One agent is created per game and keeps its engine across turns, so the
/// opening budget is only spent on its first decision.
pub struct MctsAgent {
    name: String,
    engine: Engine,
    last_search: Option<SearchResult<Move>>,
}

impl MctsAgent {
    /// Create an agent whose rollouts and expansion draws derive from `seed`.
    ///
    /// # Errors
    /// Returns `EnclosureError::InvalidConfig` if `config` does not validate.
    pub fn new(config: MctsConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let evaluator =
            RolloutEvaluator::from_config(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)), &config);
        Ok(Self {
            name: "mcts".to_string(),
            engine: Mcts::new(config, evaluator, ChaCha8Rng::seed_from_u64(seed)),
            last_search: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &MctsConfig {
        self.engine.config()
    }

    /// Search statistics of the most recent decision.
    pub fn last_search(&self) -> Option<&SearchResult<Move>> {
        self.last_search.as_ref()
    }

    /// Decide a move for the token at `my_pos`.
    ///
    /// # Errors
    /// - `OutOfBounds` / `InvalidMove` if the positions are invalid
    /// - `GameOver` if the tokens are already separated
    pub fn step(
        &mut self,
        board: &Board,
        my_pos: Position,
        adv_pos: Position,
        max_step: usize,
    ) -> Result<Move> {
        let state = GameState::new(board.clone(), my_pos, adv_pos)?;
        let result = self.engine.decide(&WallGame::new(max_step), &state)?;
        let best = result.best_action;
        self.last_search = Some(result);
        Ok(best)
    }
}

impl Player for MctsAgent {
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
        MctsAgent::step(self, board, my_pos, adv_pos, max_step)
    }

    fn new_game(&mut self) {
        self.engine.new_game();
        self.last_search = None;
    }
}
