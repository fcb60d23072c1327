//! Arcade configuration loaded from TOML.

use arcade_core::Difficulty;
use arcade_matching::{MatchKind, MismatchRule};
use arcade_tictactoe::Player;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings shared by every command.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ArcadeConfig {
    /// Difficulty used when a command does not name one.
    #[serde(default)]
    difficulty: Difficulty,

    /// Fixed random seed; `None` draws from the OS.
    #[serde(default)]
    seed: Option<u64>,

    /// Matching-pair settings.
    #[serde(default)]
    matching: MatchingConfig,

    /// Tic-tac-toe settings.
    #[serde(default)]
    tictactoe: TicTacToeConfig,
}

/// `[matching]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Numbers or colours.
    #[serde(default)]
    kind: MatchKind,

    /// Whether mismatches cost points.
    #[serde(default)]
    rule: MismatchRule,
}

/// `[tictactoe]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TicTacToeConfig {
    /// Mark the user plays in a session.
    #[serde(default = "default_user_mark")]
    user_mark: Player,

    /// Games per AI-vs-AI simulation.
    #[serde(default = "default_simulation_games")]
    simulation_games: u32,
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self {
            user_mark: default_user_mark(),
            simulation_games: default_simulation_games(),
        }
    }
}

fn default_user_mark() -> Player {
    Player::X
}

fn default_simulation_games() -> u32 {
    100
}

impl ArcadeConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(difficulty = %config.difficulty, seed = ?config.seed, "Config loaded");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[track_caller]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads the file if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Replaces the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Replaces the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ArcadeConfig::from_toml("").unwrap(), ArcadeConfig::default());
    }

    #[test]
    fn test_partial_tables() {
        let config = ArcadeConfig::from_toml(
            r#"
            difficulty = "hard"

            [matching]
            kind = "color"

            [tictactoe]
            user_mark = "o"
            "#,
        )
        .unwrap();
        assert_eq!(*config.difficulty(), Difficulty::Hard);
        assert_eq!(*config.matching().kind(), MatchKind::Color);
        assert_eq!(*config.matching().rule(), MismatchRule::Relaxed);
        assert_eq!(*config.tictactoe().user_mark(), Player::O);
        assert_eq!(*config.tictactoe().simulation_games(), 100);
    }

    #[test]
    fn test_bad_value_is_error() {
        let err = ArcadeConfig::from_toml(r#"difficulty = "impossible""#).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }
}
