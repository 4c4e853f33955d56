//! Match harness for the enclosure engine.
//!
//! Plays the MCTS agent against a baseline (or against itself) on random
//! starts, in parallel, and optionally saves every game record as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use enclosure_agent::{config, play_game, random_start, GameRecord, MctsAgent, Player, RandomAgent};
use enclosure_mcts::MctsConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Enclosure engine match harness.
#[derive(Parser)]
#[command(name = "enclosure-arena")]
#[command(about = "Play the MCTS enclosure engine against baseline opponents")]
struct Cli {
    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Opponent {
    /// Random-walk baseline.
    Random,
    /// A second MCTS agent with the same configuration.
    Mcts,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a series of games on random starts.
    Play {
        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Board edge length.
        #[arg(long, default_value = "6")]
        size: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Opponent of the MCTS agent.
        #[arg(long, value_enum, default_value = "random")]
        opponent: Opponent,

        /// Per-decision budget in milliseconds, applied to every turn
        /// including the first.
        #[arg(long)]
        budget_ms: Option<u64>,

        /// Cap on simulations per decision.
        #[arg(long)]
        simulations: Option<usize>,

        /// TOML file with MCTS parameters.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write all game records to this JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Tally of finished games from the MCTS agent's point of view.
#[derive(Default)]
struct Summary {
    wins: usize,
    losses: usize,
    ties: usize,
    turns: usize,
}

impl Summary {
    fn record(&mut self, record: &GameRecord, mcts_index: usize) {
        match record.winner {
            Some(w) if w == mcts_index => self.wins += 1,
            Some(_) => self.losses += 1,
            None => self.ties += 1,
        }
        self.turns += record.turns;
    }

    fn total(&self) -> usize {
        self.wins + self.losses + self.ties
    }
}

fn make_opponent(kind: Opponent, config: &MctsConfig, seed: u64) -> Result<Box<dyn Player>> {
    Ok(match kind {
        Opponent::Random => Box::new(RandomAgent::seeded(seed)),
        Opponent::Mcts => Box::new(MctsAgent::new(config.clone(), seed)?.with_name("mcts-b")),
    })
}

/// Play game `index`; the MCTS agent moves first in even-numbered games.
fn run_game(
    index: usize,
    size: usize,
    seed: u64,
    opponent: Opponent,
    config: &MctsConfig,
) -> Result<(GameRecord, usize)> {
    let game_seed = seed.wrapping_add(index as u64 * 1000);
    let mut rng = ChaCha8Rng::seed_from_u64(game_seed);
    let start = random_start(size, &mut rng)?;

    let mut agent = MctsAgent::new(config.clone(), game_seed.wrapping_add(1))?;
    let mut other = make_opponent(opponent, config, game_seed.wrapping_add(2))?;

    let (record, mcts_index) = if index % 2 == 0 {
        (play_game(&mut agent, other.as_mut(), &start)?, 0)
    } else {
        (play_game(other.as_mut(), &mut agent, &start)?, 1)
    };
    info!(game = index, turns = record.turns, winner = ?record.winner, "game complete");
    Ok((record, mcts_index))
}

#[allow(clippy::too_many_arguments)]
fn cmd_play(
    games: usize,
    size: usize,
    seed: u64,
    opponent: Opponent,
    budget_ms: Option<u64>,
    simulations: Option<usize>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut config = config::load_config(config_path.as_deref())?;
    if let Some(ms) = budget_ms {
        config.first_budget_ms = ms;
        config.turn_budget_ms = ms;
    }
    if simulations.is_some() {
        config.max_simulations = simulations;
    }
    config.validate().context("invalid MCTS configuration")?;

    println!("Playing {games} games on {size}x{size} boards: mcts vs {opponent:?}");
    println!(
        "Budget: {} ms first move, {} ms per turn, simulation cap {:?}",
        config.first_budget_ms, config.turn_budget_ms, config.max_simulations
    );
    println!("Seed: {seed}");

    let start = Instant::now();
    let results: Vec<(GameRecord, usize)> = (0..games)
        .into_par_iter()
        .map(|i| {
            run_game(i, size, seed, opponent, &config).with_context(|| format!("game {i} failed"))
        })
        .collect::<Result<_>>()?;

    let mut summary = Summary::default();
    for (record, mcts_index) in &results {
        summary.record(record, *mcts_index);
    }

    let total = summary.total().max(1) as f64;
    println!("\nCompleted in {:.2}s", start.elapsed().as_secs_f64());
    println!("================================================");
    println!("MCTS wins:   {} ({:.1}%)", summary.wins, summary.wins as f64 / total * 100.0);
    println!("MCTS losses: {} ({:.1}%)", summary.losses, summary.losses as f64 / total * 100.0);
    println!("Ties:        {} ({:.1}%)", summary.ties, summary.ties as f64 / total * 100.0);
    println!("Average game length: {:.1} turns", summary.turns as f64 / total);

    if let Some(path) = output {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        let records: Vec<&GameRecord> = results.iter().map(|(r, _)| r).collect();
        serde_json::to_writer_pretty(BufWriter::new(file), &records)
            .with_context(|| format!("Failed to write game records to {:?}", path))?;
        println!("Records saved to: {:?}", path);
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Play {
            games,
            size,
            seed,
            opponent,
            budget_ms,
            simulations,
            config,
            output,
        } => cmd_play(games, size, seed, opponent, budget_ms, simulations, config, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_play() {
        let cli = Cli::try_parse_from([
            "enclosure-arena",
            "play",
            "--games",
            "4",
            "--size",
            "5",
            "--opponent",
            "mcts",
            "--budget-ms",
            "100",
        ])
        .unwrap();
        let Commands::Play {
            games,
            size,
            opponent,
            budget_ms,
            ..
        } = cli.command;
        assert_eq!(games, 4);
        assert_eq!(size, 5);
        assert!(matches!(opponent, Opponent::Mcts));
        assert_eq!(budget_ms, Some(100));
    }

    #[test]
    fn test_run_game_against_random() {
        let config = MctsConfig::with_simulations(20);
        for index in 0..2 {
            let (record, mcts_index) = run_game(index, 4, 7, Opponent::Random, &config).unwrap();
            assert_eq!(mcts_index, index);
            assert_eq!(record.players[mcts_index], "mcts");
            assert!(record.turns > 0);
        }
    }

    #[test]
    fn test_summary_counts_from_mcts_side() {
        let config = MctsConfig::with_simulations(10);
        let mut summary = Summary::default();
        for index in 0..3 {
            let (record, mcts_index) = run_game(index, 3, 1, Opponent::Mcts, &config).unwrap();
            summary.record(&record, mcts_index);
        }
        assert_eq!(summary.total(), 3);
    }
}
