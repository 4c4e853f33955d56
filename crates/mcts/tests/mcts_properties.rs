//! Property-based tests for the search engine on random wall-game positions.
//!
//! - The chosen move is always legal for the side to move
//! - Root visit counts add up to the number of simulations
//! - The arena keeps parent and child links consistent
//! - Identical seeds give identical decisions

use enclosure_board::{Board, GameState, Position, WallGame};
use enclosure_core::Game;
use enclosure_mcts::{Mcts, MctsConfig, NodeId, RolloutEvaluator};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

type WallMcts = Mcts<WallGame, RolloutEvaluator<ChaCha8Rng>, ChaCha8Rng>;

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Generate a random number of simulations (5-80 for fast tests)
fn arb_simulations() -> impl Strategy<Value = usize> {
    5usize..80
}

/// A position reached by random play from an open board, with its step budget
fn arb_wall_position() -> impl Strategy<Value = (WallGame, GameState)> {
    (3usize..6, 0usize..12, arb_seed()).prop_map(|(size, num_moves, seed)| {
        let game = WallGame::new(WallGame::default_max_step(size));
        let board = Board::new(size).unwrap();
        let mut state =
            GameState::new(board, Position::new(0, 0), Position::new(size - 1, size - 1)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for _ in 0..num_moves {
            if game.is_terminal(&state) {
                break;
            }
            let actions = game.actions(&state);
            if actions.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..actions.len());
            state = game.apply(&state, actions.actions()[idx]);
        }

        (game, state)
    })
}

fn engine(simulations: usize, seed: u64) -> WallMcts {
    let config = MctsConfig::with_simulations(simulations);
    let rollout_rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    let evaluator = RolloutEvaluator::from_config(rollout_rng, &config);
    Mcts::new(config, evaluator, ChaCha8Rng::seed_from_u64(seed))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The decision is one of the enumerated moves and passes validation
    #[test]
    fn prop_decision_is_legal(
        seed in arb_seed(),
        simulations in arb_simulations(),
        (game, state) in arb_wall_position()
    ) {
        if game.is_terminal(&state) {
            return Ok(());
        }

        let mut mcts = engine(simulations, seed);
        let result = mcts.decide(&game, &state).unwrap();

        prop_assert!(state.is_legal(result.best_action, game.max_step));
        prop_assert!(game.actions(&state).actions().contains(&result.best_action));
        prop_assert!((-1.0..=1.0).contains(&result.root_value));
    }

    /// Every simulation passes through exactly one root child
    #[test]
    fn prop_root_visits_match_simulations(
        seed in arb_seed(),
        simulations in arb_simulations(),
        (game, state) in arb_wall_position()
    ) {
        if game.is_terminal(&state) {
            return Ok(());
        }

        let mut mcts = engine(simulations, seed);
        let result = mcts.decide(&game, &state).unwrap();

        prop_assert_eq!(result.simulations, simulations);
        let total: u32 = result.visit_counts.iter().map(|(_, c)| *c).sum();
        prop_assert_eq!(total as usize, simulations);
        prop_assert_eq!(mcts.tree().root().stats.visits as usize, simulations);

        let best_visits = result.visit_counts.iter().map(|(_, c)| *c).max().unwrap();
        let first_best = result.visit_counts.iter().find(|(_, c)| *c == best_visits).unwrap().0;
        prop_assert_eq!(result.best_action, first_best);
    }

    /// Parent and child links agree, visits never exceed the parent's,
    /// and `turn` tracks whose move it is
    #[test]
    fn prop_tree_links_are_consistent(
        seed in arb_seed(),
        simulations in arb_simulations(),
        (game, state) in arb_wall_position()
    ) {
        if game.is_terminal(&state) {
            return Ok(());
        }

        let mut mcts = engine(simulations, seed);
        mcts.decide(&game, &state).unwrap();
        let tree = mcts.tree();
        let root_side = game.to_move(&state);

        prop_assert!(tree.root().turn);
        prop_assert_eq!(tree.root().children.len(), game.actions(&state).len());

        for (id, node) in tree.iter() {
            prop_assert_eq!(node.turn, game.to_move(&node.state) == root_side);
            if id == NodeId::ROOT {
                prop_assert!(node.parent.is_none());
                continue;
            }
            let parent = tree.get(node.parent.unwrap());
            prop_assert!(parent.children.contains(&id));
            prop_assert!(parent.expanded);
            prop_assert!(node.stats.visits <= parent.stats.visits);
        }
    }

    /// Same seed, same position, same decision
    #[test]
    fn prop_deterministic(
        seed in arb_seed(),
        (game, state) in arb_wall_position()
    ) {
        if game.is_terminal(&state) {
            return Ok(());
        }

        let first = engine(40, seed).decide(&game, &state).unwrap();
        let second = engine(40, seed).decide(&game, &state).unwrap();

        prop_assert_eq!(first.best_action, second.best_action);
        prop_assert_eq!(first.visit_counts, second.visit_counts);
    }
}
