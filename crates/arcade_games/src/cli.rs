//! Command-line interface for the arcade.

use arcade_core::Difficulty;
use arcade_games::GameKind;
use arcade_matching::MatchKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Arcade - rule engines for the reward arcade games
#[derive(Parser, Debug)]
#[command(name = "arcade")]
#[command(about = "Simulate, generate and script arcade games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Random seed (overrides the config)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Difficulty: easy, medium, hard or extreme (overrides the config)
    #[arg(short, long, global = true)]
    pub difficulty: Option<Difficulty>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pit two computer players against each other and tally the results
    Tictactoe {
        /// Difficulty of the X player
        #[arg(long, default_value = "hard")]
        x: Difficulty,

        /// Difficulty of the O player
        #[arg(long, default_value = "hard")]
        o: Difficulty,

        /// Number of games (defaults to the config value)
        #[arg(short, long)]
        games: Option<u32>,
    },

    /// Generate a Sudoku puzzle and print it with its solution
    Sudoku,

    /// Deal a matching grid and print it
    Matching {
        /// number or color (defaults to the config value)
        #[arg(long)]
        kind: Option<MatchKind>,
    },

    /// Play a game from a JSON-lines script, one outcome per line on stdout
    Play {
        /// Game to start, e.g. number_grid, tic_tac_toe, chess
        game: GameKind,

        /// Script file (reads stdin when omitted)
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
}
