//! Fixed crossword templates, completion checks and scoring.

use arcade_core::{ActionOutcome, Difficulty, EngineError, GameEngine, OutcomeKind, time_bonus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Seconds allowed for a puzzle.
pub const CROSSWORD_TIME_LIMIT: u32 = 300;

/// Points deducted per wrong letter.
pub const MISTAKE_PENALTY: u32 = 10;

/// Marks a blocked cell in a solution grid.
pub const BLOCK: char = '#';

/// Points for finishing a puzzle, before bonus and mistakes.
pub fn base_score(difficulty: Difficulty) -> u32 {
    difficulty.pick([100, 150, 200, 250])
}

/// Score for a finished puzzle, never below zero.
pub fn calculate_crossword_score(difficulty: Difficulty, time_taken_secs: u32, mistakes: u32) -> u32 {
    let remaining = i64::from(CROSSWORD_TIME_LIMIT) - i64::from(time_taken_secs);
    (base_score(difficulty) + time_bonus(remaining))
        .saturating_sub(MISTAKE_PENALTY.saturating_mul(mistakes))
}

/// True iff every non-block cell of `user` equals the solution's letter.
///
/// Grids of different shapes are never complete.
pub fn is_crossword_complete(user: &[Vec<char>], solution: &[Vec<char>]) -> bool {
    user.len() == solution.len()
        && user.iter().zip(solution).all(|(user_row, solution_row)| {
            user_row.len() == solution_row.len()
                && user_row
                    .iter()
                    .zip(solution_row)
                    .all(|(&u, &s)| s == BLOCK || u == s)
        })
}

/// Which way an answer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Left to right.
    Across,
    /// Top to bottom.
    Down,
}

impl Direction {
    fn step(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

/// A numbered clue and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    /// Number printed in the starting cell.
    pub number: u32,
    /// Which way the answer runs.
    pub direction: Direction,
    /// Row of the first letter.
    pub row: usize,
    /// Column of the first letter.
    pub col: usize,
    /// Text shown to the player.
    pub text: String,
    /// Expected answer, uppercase.
    pub answer: String,
}

impl Clue {
    fn new(number: u32, direction: Direction, (row, col): (usize, usize), text: &str, answer: &str) -> Self {
        Self {
            number,
            direction,
            row,
            col,
            text: text.to_string(),
            answer: answer.to_string(),
        }
    }

    /// Cells the answer occupies, in reading order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (dr, dc) = self.direction.step();
        (0..self.answer.chars().count()).map(move |i| (self.row + dr * i, self.col + dc * i))
    }
}

/// A solution grid and its answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswordTemplate {
    /// Puzzle name.
    pub title: String,
    /// Letters row by row, [`BLOCK`] for blocked cells.
    pub solution: Vec<Vec<char>>,
    /// Across and down clues.
    pub clues: Vec<Clue>,
}

impl CrosswordTemplate {
    /// Builds a template from solution rows.
    pub fn from_rows(title: &str, rows: &[&str], clues: Vec<Clue>) -> Self {
        Self {
            title: title.to_string(),
            solution: rows.iter().map(|row| row.chars().collect()).collect(),
            clues,
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.solution.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.solution.first().map_or(0, Vec::len)
    }

    /// Whether a cell is blocked. Panics when out of range.
    pub fn is_block(&self, row: usize, col: usize) -> bool {
        self.solution[row][col] == BLOCK
    }

    /// Checks the template is playable.
    ///
    /// The grid must be a non-empty rectangle of letters and blocks, every
    /// clue must start on an open cell, and each answer must spell out the
    /// solution letters along its direction.
    #[track_caller]
    pub fn validate(&self) -> Result<(), EngineError> {
        let width = self.width();
        if width == 0 {
            return Err(EngineError::new(format!("{}: grid is empty", self.title)));
        }
        if let Some(row) = self.solution.iter().position(|r| r.len() != width) {
            return Err(EngineError::new(format!(
                "{}: row {row} is not {width} cells wide",
                self.title
            )));
        }
        if let Some(bad) = self
            .solution
            .iter()
            .flatten()
            .find(|&&c| c != BLOCK && !c.is_ascii_uppercase())
        {
            return Err(EngineError::new(format!(
                "{}: unexpected cell {bad:?}",
                self.title
            )));
        }
        for clue in &self.clues {
            let label = format!("{} {} {}", self.title, clue.number, clue.direction);
            if clue.answer.is_empty() {
                return Err(EngineError::new(format!("{label}: empty answer")));
            }
            let starts_open = self
                .solution
                .get(clue.row)
                .and_then(|row| row.get(clue.col))
                .is_some_and(|&c| c != BLOCK);
            if !starts_open {
                return Err(EngineError::new(format!(
                    "{label}: does not start on an open cell"
                )));
            }
            let spelled: Option<String> = clue
                .cells()
                .map(|(r, c)| self.solution.get(r).and_then(|row| row.get(c)).copied())
                .collect();
            if spelled.as_deref() != Some(clue.answer.as_str()) {
                return Err(EngineError::new(format!(
                    "{label}: answer {:?} does not match grid {:?}",
                    clue.answer, spelled
                )));
            }
        }
        Ok(())
    }
}

/// The built-in puzzle for a difficulty.
pub fn template(difficulty: Difficulty) -> CrosswordTemplate {
    use Direction::{Across, Down};
    match difficulty {
        Difficulty::Easy => CrosswordTemplate::from_rows(
            "Pets and Rides",
            &["CAT", "A#O", "RAN"],
            vec![
                Clue::new(1, Across, (0, 0), "Pet that purrs", "CAT"),
                Clue::new(1, Down, (0, 0), "Vehicle with four wheels", "CAR"),
                Clue::new(2, Down, (0, 2), "Two thousand pounds", "TON"),
                Clue::new(3, Across, (2, 0), "Sprinted", "RAN"),
            ],
        ),
        Difficulty::Medium => CrosswordTemplate::from_rows(
            "Breakfast",
            &["BREAD", "E###O", "ALONE", "R###S"],
            vec![
                Clue::new(1, Across, (0, 0), "Baked loaf", "BREAD"),
                Clue::new(1, Down, (0, 0), "Large furry animal", "BEAR"),
                Clue::new(2, Down, (0, 4), "Performs", "DOES"),
                Clue::new(3, Across, (2, 0), "By oneself", "ALONE"),
            ],
        ),
        Difficulty::Hard => CrosswordTemplate::from_rows(
            "Woodland",
            &["ACORN", "C#R#U", "TIGER", "O#A#S", "RANGE"],
            vec![
                Clue::new(1, Across, (0, 0), "Oak seed", "ACORN"),
                Clue::new(1, Down, (0, 0), "Stage performer", "ACTOR"),
                Clue::new(2, Down, (0, 2), "Heart or lung", "ORGAN"),
                Clue::new(3, Down, (0, 4), "Hospital carer", "NURSE"),
                Clue::new(4, Across, (2, 0), "Striped big cat", "TIGER"),
                Clue::new(5, Across, (4, 0), "Mountain chain", "RANGE"),
            ],
        ),
        Difficulty::Extreme => CrosswordTemplate::from_rows(
            "Weather Station",
            &["STORM", "A#P#E", "IDEAL", "N#R#O", "TRAIN"],
            vec![
                Clue::new(1, Across, (0, 0), "Thunder and lightning", "STORM"),
                Clue::new(1, Down, (0, 0), "Canonized person", "SAINT"),
                Clue::new(2, Down, (0, 2), "Sung drama", "OPERA"),
                Clue::new(3, Down, (0, 4), "Cantaloupe, for one", "MELON"),
                Clue::new(4, Across, (2, 0), "Perfect", "IDEAL"),
                Clue::new(5, Across, (4, 0), "Runs on rails", "TRAIN"),
            ],
        ),
    }
}

/// Why an entry was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum EntryError {
    /// The cell is blocked.
    #[display("Cell ({}, {}) is blocked", _0, _1)]
    BlockedCell(usize, usize),
    /// Only letters go in a crossword.
    #[display("{:?} is not a letter", _0)]
    NotALetter(char),
    /// The puzzle is finished or time is up.
    #[display("Puzzle is already over")]
    GameOver,
    /// The cell lies outside the grid.
    #[display("Cell ({}, {}) is off the grid", _0, _1)]
    OffGrid(usize, usize),
}

impl std::error::Error for EntryError {}

/// Puzzle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrosswordStatus {
    /// Still being filled.
    InProgress,
    /// Every open cell matches the solution.
    Completed,
    /// Time ran out first.
    TimedOut,
}

/// Result of an accepted letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Whether the letter agrees with the solution.
    pub correct: bool,
    /// Points awarded (non-zero only on the entry that completes the grid).
    pub points: u32,
    /// Status after the entry.
    pub status: CrosswordStatus,
}

/// Player input for a crossword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CrosswordAction {
    /// Write a letter into a cell.
    Enter {
        /// Row.
        row: usize,
        /// Column.
        col: usize,
        /// Letter, either case.
        letter: char,
    },
    /// Empty a cell.
    Clear {
        /// Row.
        row: usize,
        /// Column.
        col: usize,
    },
}

/// A timed crossword with mistake tracking.
#[derive(Debug, Clone)]
pub struct CrosswordGame {
    template: CrosswordTemplate,
    entries: Vec<Vec<Option<char>>>,
    difficulty: Difficulty,
    elapsed_secs: u32,
    mistakes: u32,
    score: u32,
    status: CrosswordStatus,
}

impl CrosswordGame {
    /// Starts the built-in puzzle for a difficulty.
    pub fn start(difficulty: Difficulty) -> Self {
        Self::new(template(difficulty), difficulty)
    }

    /// Starts a puzzle from any template.
    #[instrument(skip(template), fields(title = %template.title))]
    pub fn new(template: CrosswordTemplate, difficulty: Difficulty) -> Self {
        let entries = vec![vec![None; template.width()]; template.height()];
        info!(%difficulty, "Crossword started");
        Self {
            template,
            entries,
            difficulty,
            elapsed_secs: 0,
            mistakes: 0,
            score: 0,
            status: CrosswordStatus::InProgress,
        }
    }

    /// The puzzle being solved.
    pub fn template(&self) -> &CrosswordTemplate {
        &self.template
    }

    /// Wrong letters entered so far.
    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    /// Puzzle status.
    pub fn status(&self) -> CrosswordStatus {
        self.status
    }

    /// The player's grid: letters, [`BLOCK`] for blocks, space for empty.
    pub fn user_grid(&self) -> Vec<Vec<char>> {
        self.entries
            .iter()
            .zip(&self.template.solution)
            .map(|(row, solution)| {
                row.iter()
                    .zip(solution)
                    .map(|(entry, &s)| if s == BLOCK { BLOCK } else { entry.unwrap_or(' ') })
                    .collect()
            })
            .collect()
    }

    fn check_cell(&self, row: usize, col: usize) -> Result<(), EntryError> {
        if self.status != CrosswordStatus::InProgress {
            return Err(EntryError::GameOver);
        }
        if self.template.is_block(row, col) {
            return Err(EntryError::BlockedCell(row, col));
        }
        Ok(())
    }

    /// Writes a letter. A letter that disagrees with the solution stays on
    /// the grid and counts as a mistake.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the grid.
    #[instrument(skip(self))]
    pub fn enter(&mut self, row: usize, col: usize, letter: char) -> Result<Entry, EntryError> {
        self.check_cell(row, col)?;
        if !letter.is_ascii_alphabetic() {
            return Err(EntryError::NotALetter(letter));
        }
        let letter = letter.to_ascii_uppercase();
        self.entries[row][col] = Some(letter);

        let correct = self.template.solution[row][col] == letter;
        if !correct {
            self.mistakes += 1;
            debug!(row, col, %letter, mistakes = self.mistakes, "Wrong letter");
        }

        let mut points = 0;
        if is_crossword_complete(&self.user_grid(), &self.template.solution) {
            points = calculate_crossword_score(self.difficulty, self.elapsed_secs, self.mistakes);
            self.score += points;
            self.status = CrosswordStatus::Completed;
            info!(points, mistakes = self.mistakes, "Crossword completed");
        }
        Ok(Entry {
            correct,
            points,
            status: self.status,
        })
    }

    /// Empties a cell.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), EntryError> {
        self.check_cell(row, col)?;
        self.entries[row][col] = None;
        Ok(())
    }
}

impl GameEngine for CrosswordGame {
    type Action = CrosswordAction;

    fn apply_action(&mut self, action: CrosswordAction) -> ActionOutcome {
        let (CrosswordAction::Enter { row, col, .. } | CrosswordAction::Clear { row, col }) = action;
        if row >= self.template.height() || col >= self.template.width() {
            return ActionOutcome::rejected(OutcomeKind::Invalid, EntryError::OffGrid(row, col));
        }
        let result = match action {
            CrosswordAction::Enter { row, col, letter } => self.enter(row, col, letter).map(Some),
            CrosswordAction::Clear { row, col } => self.clear(row, col).map(|_| None),
        };
        match result {
            Ok(Some(entry)) => {
                let kind = match (entry.status, entry.correct) {
                    (CrosswordStatus::Completed, _) => OutcomeKind::Completed,
                    (_, true) => OutcomeKind::Accepted,
                    (_, false) => OutcomeKind::Incorrect,
                };
                ActionOutcome::new(kind)
                    .with_delta(entry.points as i32)
                    .with_terminal(entry.status != CrosswordStatus::InProgress)
            }
            Ok(None) => ActionOutcome::new(OutcomeKind::Accepted),
            Err(error) => ActionOutcome::rejected(OutcomeKind::Invalid, error)
                .with_terminal(error == EntryError::GameOver),
        }
    }

    fn tick(&mut self, seconds: u32) -> Option<ActionOutcome> {
        if self.status != CrosswordStatus::InProgress {
            return None;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(seconds);
        if self.elapsed_secs < CROSSWORD_TIME_LIMIT {
            return None;
        }
        self.status = CrosswordStatus::TimedOut;
        info!(mistakes = self.mistakes, "Crossword timed out");
        Some(ActionOutcome::new(OutcomeKind::TimedOut).with_terminal(true))
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_terminal(&self) -> bool {
        self.status != CrosswordStatus::InProgress
    }
}
