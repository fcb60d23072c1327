//! One session type that drives any game.
//!
//! A collaborator starts a [`Session`] for a [`GameKind`], then feeds it
//! [`Step`]s: player actions and clock ticks. Every step yields the same
//! [`ActionOutcome`] report regardless of the game.

use crate::config::ArcadeConfig;
use arcade_chess::{ChessGame, ChessMove};
use arcade_core::{ActionOutcome, Difficulty, GameEngine, OutcomeKind};
use arcade_matching::{MatchKind, MatchingAction, MatchingGame};
use arcade_quiz::{CrosswordAction, CrosswordGame, QuizAnswer, QuizGame};
use arcade_sudoku::{SudokuAction, SudokuGame};
use arcade_tictactoe::{Position, TicTacToeSession};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Every game the arcade offers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameKind {
    /// Matching pairs of numbers.
    NumberGrid,
    /// Matching pairs of colours.
    ColorGrid,
    /// Tic-tac-toe against the computer.
    TicTacToe,
    /// Sudoku.
    Sudoku,
    /// Chess between two local players.
    Chess,
    /// Multiple-choice quiz.
    Quiz,
    /// Crossword.
    Crossword,
}

/// A player action addressed to one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", content = "input", rename_all = "snake_case")]
pub enum Action {
    /// Number or colour grid input.
    Matching(MatchingAction),
    /// A square for the user's mark.
    TicTacToe(Position),
    /// Sudoku input.
    Sudoku(SudokuAction),
    /// A chess move.
    Chess(ChessMove),
    /// A quiz answer.
    Quiz(QuizAnswer),
    /// Crossword input.
    Crossword(CrosswordAction),
}

/// One line of input for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Apply a player action.
    Act(Action),
    /// Advance the clock by this many seconds.
    Tick(u32),
}

/// A running game of any kind.
#[derive(Debug, Clone)]
pub enum Session {
    /// Number or colour grid.
    Matching(MatchingGame),
    /// Tic-tac-toe against the computer.
    TicTacToe(TicTacToeSession),
    /// Sudoku.
    Sudoku(SudokuGame),
    /// Chess.
    Chess(ChessGame),
    /// Quiz.
    Quiz(QuizGame),
    /// Crossword.
    Crossword(CrosswordGame),
}

impl Session {
    /// Starts a game using the config's settings.
    #[instrument(skip(config, rng))]
    pub fn start(
        kind: GameKind,
        difficulty: Difficulty,
        config: &ArcadeConfig,
        rng: &mut StdRng,
    ) -> Self {
        let matching = config.matching();
        let session = match kind {
            GameKind::NumberGrid => Session::Matching(MatchingGame::start(
                difficulty,
                MatchKind::Number,
                *matching.rule(),
                rng,
            )),
            GameKind::ColorGrid => Session::Matching(MatchingGame::start(
                difficulty,
                MatchKind::Color,
                *matching.rule(),
                rng,
            )),
            GameKind::TicTacToe => Session::TicTacToe(TicTacToeSession::new(
                difficulty,
                *config.tictactoe().user_mark(),
                StdRng::from_rng(rng),
            )),
            GameKind::Sudoku => Session::Sudoku(SudokuGame::start(difficulty, rng)),
            GameKind::Chess => Session::Chess(ChessGame::new(difficulty)),
            GameKind::Quiz => Session::Quiz(QuizGame::start(difficulty, rng)),
            GameKind::Crossword => Session::Crossword(CrosswordGame::start(difficulty)),
        };
        info!(%kind, %difficulty, "Session started");
        session
    }

    /// Which game this is.
    pub fn kind(&self) -> GameKind {
        match self {
            Session::Matching(game) => match game.grid().kind() {
                MatchKind::Number => GameKind::NumberGrid,
                MatchKind::Color => GameKind::ColorGrid,
            },
            Session::TicTacToe(_) => GameKind::TicTacToe,
            Session::Sudoku(_) => GameKind::Sudoku,
            Session::Chess(_) => GameKind::Chess,
            Session::Quiz(_) => GameKind::Quiz,
            Session::Crossword(_) => GameKind::Crossword,
        }
    }

    /// Applies an action. An action meant for another game is rejected
    /// without touching the session.
    #[instrument(skip(self), fields(kind = %self.kind()))]
    pub fn apply(&mut self, action: Action) -> ActionOutcome {
        match (self, action) {
            (Session::Matching(game), Action::Matching(input)) => game.apply_action(input),
            (Session::TicTacToe(game), Action::TicTacToe(input)) => game.apply_action(input),
            (Session::Sudoku(game), Action::Sudoku(input)) => game.apply_action(input),
            (Session::Chess(game), Action::Chess(input)) => game.apply_action(input),
            (Session::Quiz(game), Action::Quiz(input)) => game.apply_action(input),
            (Session::Crossword(game), Action::Crossword(input)) => game.apply_action(input),
            (session, action) => {
                warn!(?action, "Action does not belong to this game");
                ActionOutcome::rejected(
                    OutcomeKind::Invalid,
                    format!("action is not for a {} session", session.kind()),
                )
                .with_terminal(session.is_terminal())
            }
        }
    }

    /// Advances the clock. Returns an outcome only when time runs out.
    pub fn tick(&mut self, seconds: u32) -> Option<ActionOutcome> {
        match self {
            Session::Matching(game) => game.tick(seconds),
            Session::TicTacToe(game) => game.tick(seconds),
            Session::Sudoku(game) => game.tick(seconds),
            Session::Chess(game) => game.tick(seconds),
            Session::Quiz(game) => game.tick(seconds),
            Session::Crossword(game) => game.tick(seconds),
        }
    }

    /// Applies one scripted step.
    pub fn step(&mut self, step: Step) -> Option<ActionOutcome> {
        match step {
            Step::Act(action) => Some(self.apply(action)),
            Step::Tick(seconds) => self.tick(seconds),
        }
    }

    /// Points earned so far.
    pub fn score(&self) -> u32 {
        match self {
            Session::Matching(game) => game.score(),
            Session::TicTacToe(game) => game.score(),
            Session::Sudoku(game) => game.score(),
            Session::Chess(game) => game.score(),
            Session::Quiz(game) => game.score(),
            Session::Crossword(game) => game.score(),
        }
    }

    /// Whether the game has ended.
    pub fn is_terminal(&self) -> bool {
        match self {
            Session::Matching(game) => game.is_terminal(),
            Session::TicTacToe(game) => game.is_terminal(),
            Session::Sudoku(game) => game.is_terminal(),
            Session::Chess(game) => game.is_terminal(),
            Session::Quiz(game) => game.is_terminal(),
            Session::Crossword(game) => game.is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::random::seeded_rng;

    #[test]
    fn test_action_json_shape() {
        let action: Action =
            serde_json::from_str(r#"{"game":"tic_tac_toe","input":"center"}"#).unwrap();
        assert_eq!(action, Action::TicTacToe(Position::Center));

        let step: Step = serde_json::from_str(r#"{"tick":30}"#).unwrap();
        assert_eq!(step, Step::Tick(30));

        let step: Step = serde_json::from_str(
            r#"{"act":{"game":"chess","input":{"from":"e2","to":"e4"}}}"#,
        )
        .unwrap();
        assert!(matches!(step, Step::Act(Action::Chess(_))));
    }

    #[test]
    fn test_wrong_game_rejected() {
        let config = ArcadeConfig::default();
        let mut session =
            Session::start(GameKind::Chess, Difficulty::Easy, &config, &mut seeded_rng(1));
        let outcome = session.apply(Action::TicTacToe(Position::Center));
        assert_eq!(outcome.kind, OutcomeKind::Invalid);
        assert_eq!(session.score(), 0);
        assert_eq!(session.kind(), GameKind::Chess);
    }

    #[test]
    fn test_kind_round_trips() {
        use strum::IntoEnumIterator;
        let config = ArcadeConfig::default();
        let mut rng = seeded_rng(2);
        for kind in GameKind::iter() {
            let session = Session::start(kind, Difficulty::Easy, &config, &mut rng);
            assert_eq!(session.kind(), kind);
            assert!(!session.is_terminal());
        }
    }

    #[test]
    fn test_kind_parses_from_cli_text() {
        assert_eq!("color_grid".parse::<GameKind>().unwrap(), GameKind::ColorGrid);
        assert!("pinball".parse::<GameKind>().is_err());
    }
}
