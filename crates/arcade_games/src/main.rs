//! Arcade - unified CLI
//!
//! Simulates, generates and scripts games from the arcade rule engines.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use arcade_core::Difficulty;
use arcade_core::random::rng_from;
use arcade_games::{ArcadeConfig, GameKind, Session, run_script};
use arcade_matching::{MatchKind, generate};
use arcade_sudoku::generate_puzzle;
use arcade_tictactoe::{GameStatus, Player, ai::play_out};
use clap::Parser;
use cli::{Cli, Command};
use rand::rngs::StdRng;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ArcadeConfig::load(cli.config.as_deref())?;
    if let Some(difficulty) = cli.difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let mut rng = rng_from(*config.seed());

    match cli.command {
        Command::Tictactoe { x, o, games } => {
            let games = games.unwrap_or(*config.tictactoe().simulation_games());
            run_tictactoe(x, o, games, &mut rng);
            Ok(())
        }
        Command::Sudoku => {
            run_sudoku(*config.difficulty(), &mut rng);
            Ok(())
        }
        Command::Matching { kind } => {
            let kind = kind.unwrap_or(*config.matching().kind());
            run_matching(*config.difficulty(), kind, &mut rng);
            Ok(())
        }
        Command::Play { game, script } => run_play(game, script, &config, &mut rng),
    }
}

/// Simulate computer-vs-computer tic-tac-toe and print the tallies
#[instrument(skip(rng))]
fn run_tictactoe(x: Difficulty, o: Difficulty, games: u32, rng: &mut StdRng) {
    let (mut x_wins, mut o_wins, mut draws) = (0u32, 0u32, 0u32);
    for _ in 0..games {
        match play_out(x, o, rng) {
            GameStatus::Won(Player::X) => x_wins += 1,
            GameStatus::Won(Player::O) => o_wins += 1,
            GameStatus::Draw => draws += 1,
            GameStatus::InProgress => {}
        }
    }
    info!(x_wins, o_wins, draws, "Simulation finished");
    println!("X ({x}) wins: {x_wins}");
    println!("O ({o}) wins: {o_wins}");
    println!("Draws: {draws}");
}

/// Generate a Sudoku puzzle and print it with its solution
#[instrument(skip(rng))]
fn run_sudoku(difficulty: Difficulty, rng: &mut StdRng) {
    let carved = generate_puzzle(difficulty, rng);
    println!("Puzzle ({difficulty}, {} of {} cells removed):", carved.removed, carved.target);
    println!("{}", carved.puzzle);
    println!();
    println!("Solution:");
    println!("{}", carved.solution);
}

/// Deal a matching grid and print it
#[instrument(skip(rng))]
fn run_matching(difficulty: Difficulty, kind: MatchKind, rng: &mut StdRng) {
    let grid = generate(difficulty, kind, rng);
    println!("{grid}");
}

/// Play a session from a JSON-lines script
#[instrument(skip(config, rng))]
fn run_play(
    game: GameKind,
    script: Option<PathBuf>,
    config: &ArcadeConfig,
    rng: &mut StdRng,
) -> Result<()> {
    let mut session = Session::start(game, *config.difficulty(), config, rng);
    let stdout = std::io::stdout();
    let summary = match script {
        Some(path) => {
            let file = std::fs::File::open(&path)?;
            run_script(&mut session, BufReader::new(file), stdout.lock())?
        }
        None => run_script(&mut session, std::io::stdin().lock(), stdout.lock())?,
    };
    info!(
        steps = summary.steps,
        score = summary.score,
        terminal = summary.terminal,
        "Session finished"
    );
    Ok(())
}
