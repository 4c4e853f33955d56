//! Full games through the arena, replayed move by move.

use enclosure_agent::{play_game, random_start, GameRecord, MctsAgent, RandomAgent};
use enclosure_board::{Board, GameState, Position};
use enclosure_core::Verdict;
use enclosure_mcts::MctsConfig;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Replays a record from its starting walls, checking every move, and
/// returns the final state.
fn replay(record: &GameRecord) -> GameState {
    let board = Board::from_masks(record.size, record.start_walls.clone()).unwrap();
    let mut state = GameState::new(board, record.start[0], record.start[1]).unwrap();

    for (turn, m) in record.moves.iter().enumerate() {
        assert!(!state.verdict().is_terminal(), "move after game end on turn {turn}");
        assert!(state.is_legal(m.mv, record.max_step), "illegal {} on turn {turn}", m.mv);
        state = state.make_move(m.mv);
    }
    state
}

fn check_outcome(record: &GameRecord, state: &GameState) {
    let verdict = state.verdict();
    assert!(verdict.is_terminal());
    let regions = state.regions();
    assert_eq!(record.regions, [regions.me, regions.adversary]);
    match verdict {
        Verdict::Tie => assert_eq!(record.winner, None),
        Verdict::Win(_) => assert!(record.winner.is_some()),
        Verdict::Ongoing => unreachable!(),
    }
}

#[test]
fn test_mcts_vs_random_game_is_legal() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let start = random_start(5, &mut rng).unwrap();
    let mut agent = MctsAgent::new(MctsConfig::with_simulations(40), 1).unwrap();
    let mut baseline = RandomAgent::seeded(2);

    let record = play_game(&mut agent, &mut baseline, &start).unwrap();

    assert_eq!(record.players, ["mcts".to_string(), "random".to_string()]);
    let state = replay(&record);
    check_outcome(&record, &state);
}

#[test]
fn test_mcts_self_play_is_legal() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let start = random_start(4, &mut rng).unwrap();
    let mut a = MctsAgent::new(MctsConfig::with_simulations(30), 3).unwrap().with_name("a");
    let mut b = MctsAgent::new(MctsConfig::with_simulations(30), 4).unwrap().with_name("b");

    let record = play_game(&mut a, &mut b, &start).unwrap();

    let state = replay(&record);
    check_outcome(&record, &state);
}

#[test]
fn test_record_serializes_to_json() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let start = random_start(3, &mut rng).unwrap();
    let mut a = RandomAgent::seeded(1);
    let mut b = RandomAgent::seeded(2);
    let record = play_game(&mut a, &mut b, &start).unwrap();

    let json = serde_json::to_string(&record).unwrap();
    let back: GameRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_agent_finishes_enclosable_opponent() {
    // opponent boxed into the corner except for its lower side
    let mut board = Board::new(4).unwrap();
    board.place_wall(Position::new(0, 0), enclosure_board::Direction::Right).unwrap();
    let start = enclosure_agent::StartPosition {
        board,
        first: Position::new(3, 0),
        second: Position::new(0, 0),
        max_step: 2,
    };
    let mut agent = MctsAgent::new(MctsConfig::with_simulations(20), 9).unwrap();
    let mut baseline = RandomAgent::seeded(9);

    let record = play_game(&mut agent, &mut baseline, &start).unwrap();

    assert_eq!(record.turns, 1);
    assert_eq!(record.winner, Some(0));
    assert_eq!(record.regions, [15, 1]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Random players on random starts always finish with legal moves
    #[test]
    fn prop_random_games_are_legal(size in 2usize..7, seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let start = random_start(size, &mut rng).unwrap();
        let mut a = RandomAgent::seeded(seed.wrapping_add(1));
        let mut b = RandomAgent::seeded(seed.wrapping_add(2));

        let record = play_game(&mut a, &mut b, &start).unwrap();

        prop_assert!(record.turns <= 2 * size * (size - 1));
        let state = replay(&record);
        check_outcome(&record, &state);
    }
}
