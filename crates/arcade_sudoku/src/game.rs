//! A timed Sudoku round.

use crate::generator::{CarvedPuzzle, generate_puzzle};
use crate::grid::{SIZE, SudokuGrid};
use arcade_core::{ActionOutcome, Difficulty, GameEngine, OutcomeKind, time_bonus};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Points for finishing a puzzle, before bonus and mistakes.
pub fn completion_points(difficulty: Difficulty) -> u32 {
    difficulty.pick([50, 100, 150, 200])
}

/// Seconds allowed per difficulty.
pub fn time_limit(difficulty: Difficulty) -> u32 {
    difficulty.pick([900, 1200, 1500, 1800])
}

/// Points deducted per wrong digit at completion.
pub const MISTAKE_PENALTY: u32 = 5;

/// Score for a finished puzzle.
pub fn calculate_sudoku_score(difficulty: Difficulty, remaining_secs: i64, mistakes: u32) -> u32 {
    (completion_points(difficulty) + time_bonus(remaining_secs))
        .saturating_sub(MISTAKE_PENALTY.saturating_mul(mistakes))
}

/// Player input for a Sudoku round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SudokuAction {
    /// Write a digit into a cell.
    Place {
        /// Row, 0-8.
        row: usize,
        /// Column, 0-8.
        col: usize,
        /// Digit, 1-9.
        digit: u8,
    },
    /// Empty a cell.
    Clear {
        /// Row, 0-8.
        row: usize,
        /// Column, 0-8.
        col: usize,
    },
}

/// Why a placement was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PlaceError {
    /// The cell is one of the puzzle's clues.
    #[display("Cell ({}, {}) is a given clue", _0, _1)]
    GivenCell(usize, usize),
    /// Digits run from 1 to 9.
    #[display("Digit {} is out of range 1-9", _0)]
    DigitOutOfRange(u8),
    /// The round has ended.
    #[display("Game is already over")]
    GameOver,
    /// Rows and columns run from 0 to 8.
    #[display("Cell ({}, {}) is off the board", _0, _1)]
    OffBoard(usize, usize),
}

impl std::error::Error for PlaceError {}

/// Round status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SudokuStatus {
    /// Still being played.
    InProgress,
    /// Grid matches the solution.
    Completed,
    /// Time ran out first.
    TimedOut,
}

/// Result of a successful placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Whether the digit agrees with the solution.
    pub correct: bool,
    /// Points awarded (non-zero only on the move that completes the grid).
    pub points: u32,
    /// Status after the placement.
    pub status: SudokuStatus,
}

/// One Sudoku round: a carved puzzle, the player's entries and the clock.
#[derive(Debug, Clone)]
pub struct SudokuGame {
    carved: CarvedPuzzle,
    board: SudokuGrid,
    difficulty: Difficulty,
    remaining_secs: i64,
    mistakes: u32,
    score: u32,
    status: SudokuStatus,
}

impl SudokuGame {
    /// Starts a round on a freshly generated puzzle.
    #[instrument(skip(rng))]
    pub fn start<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        Self::new(generate_puzzle(difficulty, rng), difficulty)
    }

    /// Starts a round on an existing puzzle.
    pub fn new(carved: CarvedPuzzle, difficulty: Difficulty) -> Self {
        info!(%difficulty, clues = carved.puzzle.filled_count(), "Sudoku round started");
        Self {
            board: carved.puzzle,
            carved,
            difficulty,
            remaining_secs: i64::from(time_limit(difficulty)),
            mistakes: 0,
            score: 0,
            status: SudokuStatus::InProgress,
        }
    }

    /// The player's current grid.
    pub fn board(&self) -> &SudokuGrid {
        &self.board
    }

    /// The puzzle as dealt.
    pub fn puzzle(&self) -> &SudokuGrid {
        &self.carved.puzzle
    }

    /// Wrong digits entered so far.
    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    /// Seconds left on the clock.
    pub fn remaining_secs(&self) -> i64 {
        self.remaining_secs
    }

    /// Round status.
    pub fn status(&self) -> SudokuStatus {
        self.status
    }

    /// Returns true if the cell was a clue in the dealt puzzle.
    pub fn is_given(&self, row: usize, col: usize) -> bool {
        !self.carved.puzzle.is_empty(row, col)
    }

    /// Writes a digit into a non-given cell.
    ///
    /// A digit that disagrees with the solution is kept on the board and
    /// counted as a mistake.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below 9.
    #[instrument(skip(self))]
    pub fn place(&mut self, row: usize, col: usize, digit: u8) -> Result<Placement, PlaceError> {
        assert!(row < SIZE && col < SIZE, "cell ({row}, {col}) out of range");
        if self.status != SudokuStatus::InProgress {
            return Err(PlaceError::GameOver);
        }
        if !(1..=9).contains(&digit) {
            return Err(PlaceError::DigitOutOfRange(digit));
        }
        if self.is_given(row, col) {
            return Err(PlaceError::GivenCell(row, col));
        }

        self.board.set(row, col, digit);
        let correct = self.carved.solution.get(row, col) == Some(digit);
        if !correct {
            self.mistakes += 1;
            debug!(row, col, digit, mistakes = self.mistakes, "Wrong digit");
        }

        let mut points = 0;
        if self.board == self.carved.solution {
            points = calculate_sudoku_score(self.difficulty, self.remaining_secs, self.mistakes);
            self.score += points;
            self.status = SudokuStatus::Completed;
            info!(points, mistakes = self.mistakes, "Sudoku completed");
        }

        Ok(Placement {
            correct,
            points,
            status: self.status,
        })
    }

    /// Empties a non-given cell.
    #[instrument(skip(self))]
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), PlaceError> {
        assert!(row < SIZE && col < SIZE, "cell ({row}, {col}) out of range");
        if self.status != SudokuStatus::InProgress {
            return Err(PlaceError::GameOver);
        }
        if self.is_given(row, col) {
            return Err(PlaceError::GivenCell(row, col));
        }
        self.board.clear(row, col);
        Ok(())
    }
}

impl GameEngine for SudokuGame {
    type Action = SudokuAction;

    fn apply_action(&mut self, action: SudokuAction) -> ActionOutcome {
        let (SudokuAction::Place { row, col, .. } | SudokuAction::Clear { row, col }) = action;
        if row >= SIZE || col >= SIZE {
            return ActionOutcome::rejected(OutcomeKind::Invalid, PlaceError::OffBoard(row, col));
        }
        let result = match action {
            SudokuAction::Place { row, col, digit } => self.place(row, col, digit).map(Some),
            SudokuAction::Clear { row, col } => self.clear(row, col).map(|_| None),
        };
        match result {
            Ok(Some(placement)) => {
                let kind = match (placement.status, placement.correct) {
                    (SudokuStatus::Completed, _) => OutcomeKind::Completed,
                    (_, true) => OutcomeKind::Accepted,
                    (_, false) => OutcomeKind::Incorrect,
                };
                ActionOutcome::new(kind)
                    .with_delta(placement.points as i32)
                    .with_terminal(placement.status != SudokuStatus::InProgress)
            }
            Ok(None) => ActionOutcome::new(OutcomeKind::Accepted),
            Err(error) => ActionOutcome::rejected(OutcomeKind::Invalid, &error)
                .with_terminal(error == PlaceError::GameOver),
        }
    }

    fn tick(&mut self, seconds: u32) -> Option<ActionOutcome> {
        if self.status != SudokuStatus::InProgress {
            return None;
        }
        self.remaining_secs -= i64::from(seconds);
        if self.remaining_secs > 0 {
            return None;
        }
        self.status = SudokuStatus::TimedOut;
        info!("Sudoku round timed out");
        Some(ActionOutcome::new(OutcomeKind::TimedOut).with_terminal(true))
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_terminal(&self) -> bool {
        self.status != SudokuStatus::InProgress
    }
}
