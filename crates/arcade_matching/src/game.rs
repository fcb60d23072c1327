//! A timed matching round: pick two cells, keep them if they match.

use crate::grid::{MatchGrid, MatchKind, generate};
use arcade_core::{ActionOutcome, Difficulty, GameEngine, OutcomeKind, apply_delta, time_bonus};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Seconds allowed per difficulty.
pub fn time_limit(difficulty: Difficulty) -> u32 {
    difficulty.pick([120, 100, 80, 60])
}

/// Points per matched pair, before the time bonus.
pub fn base_points(difficulty: Difficulty) -> u32 {
    difficulty.pick([10, 15, 20, 25])
}

/// Points deducted per mismatch under [`MismatchRule::Penalized`].
pub fn mismatch_penalty(difficulty: Difficulty) -> u32 {
    difficulty.pick([3, 3, 5, 5])
}

/// What a mismatch costs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MismatchRule {
    /// Nothing.
    #[default]
    Relaxed,
    /// [`mismatch_penalty`] points, never taking the score below zero.
    Penalized,
}

/// Result of selecting a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// First cell of a pair chosen.
    Pending,
    /// Second cell matched the first.
    Matched {
        /// Points awarded.
        points: u32,
    },
    /// Second cell did not match; resolve before selecting again.
    Mismatched {
        /// Points actually deducted.
        penalty: u32,
    },
}

/// Why a selection was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SelectError {
    /// Two cells are face up and waiting for [`MatchingGame::resolve_mismatch`].
    #[display("A mismatched pair is still showing")]
    PairPending,
    /// The cell is already part of a found pair.
    #[display("Cell {} is already matched", _0)]
    AlreadyMatched(usize),
    /// The cell is the one already picked.
    #[display("Cell {} is already selected", _0)]
    AlreadySelected(usize),
    /// Every pair is found or time is up.
    #[display("Game is already over")]
    GameOver,
    /// No cell has this index.
    #[display("Cell {} is outside a grid of {} cells", _0, _1)]
    OutOfRange(usize, usize),
}

impl std::error::Error for SelectError {}

/// Player input for a matching round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MatchingAction {
    /// Turn over a cell by row-major index.
    Select {
        /// Cell index.
        index: usize,
    },
    /// Turn a mismatched pair back over.
    Resolve,
}

/// One matching round.
#[derive(Debug, Clone)]
pub struct MatchingGame {
    grid: MatchGrid,
    difficulty: Difficulty,
    rule: MismatchRule,
    matched: Vec<bool>,
    pending: Vec<usize>,
    unmatched: usize,
    remaining_secs: u32,
    score: u32,
    mismatches: u32,
    timed_out: bool,
}

impl MatchingGame {
    /// Deals a fresh grid and starts the clock.
    #[instrument(skip(rng))]
    pub fn start<R: Rng>(
        difficulty: Difficulty,
        kind: MatchKind,
        rule: MismatchRule,
        rng: &mut R,
    ) -> Self {
        Self::new(generate(difficulty, kind, rng), difficulty, rule)
    }

    /// Starts a round on an existing grid.
    pub fn new(grid: MatchGrid, difficulty: Difficulty, rule: MismatchRule) -> Self {
        info!(%difficulty, %rule, cells = grid.len(), "Matching round started");
        let unmatched = grid.len() - grid.unpaired().len();
        Self {
            unmatched,
            matched: vec![false; grid.len()],
            grid,
            difficulty,
            rule,
            pending: Vec::with_capacity(2),
            remaining_secs: time_limit(difficulty),
            score: 0,
            mismatches: 0,
            timed_out: false,
        }
    }

    /// The dealt grid.
    pub fn grid(&self) -> &MatchGrid {
        &self.grid
    }

    /// Cells currently face up but not yet matched.
    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    /// Whether a cell belongs to a found pair. Panics when out of range.
    pub fn is_matched(&self, index: usize) -> bool {
        self.matched[index]
    }

    /// Seconds left on the clock.
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Mismatches so far.
    pub fn mismatches(&self) -> u32 {
        self.mismatches
    }

    /// Whether every pair has been found.
    ///
    /// The unique filler cell of an odd grid never needs matching.
    pub fn is_complete(&self) -> bool {
        self.unmatched == 0
    }

    /// Turns over a cell.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a cell of the grid.
    #[instrument(skip(self), fields(pending = ?self.pending))]
    pub fn select(&mut self, index: usize) -> Result<MatchOutcome, SelectError> {
        assert!(index < self.grid.len(), "cell {index} out of range");
        if self.is_terminal() {
            return Err(SelectError::GameOver);
        }
        if self.pending.len() == 2 {
            return Err(SelectError::PairPending);
        }
        if self.matched[index] {
            return Err(SelectError::AlreadyMatched(index));
        }
        if self.pending.contains(&index) {
            return Err(SelectError::AlreadySelected(index));
        }

        self.pending.push(index);
        let [first, second] = self.pending[..] else {
            return Ok(MatchOutcome::Pending);
        };

        if self.grid.get(first) == self.grid.get(second) {
            self.matched[first] = true;
            self.matched[second] = true;
            self.unmatched = self.unmatched.saturating_sub(2);
            self.pending.clear();
            let points = base_points(self.difficulty) + time_bonus(i64::from(self.remaining_secs));
            self.score += points;
            debug!(first, second, points, "Pair matched");
            if self.is_complete() {
                info!(score = self.score, "Matching round completed");
            }
            return Ok(MatchOutcome::Matched { points });
        }

        self.mismatches += 1;
        let penalty = match self.rule {
            MismatchRule::Relaxed => 0,
            MismatchRule::Penalized => {
                let requested = -(mismatch_penalty(self.difficulty) as i32);
                let (score, applied) = apply_delta(self.score, requested);
                self.score = score;
                applied.unsigned_abs()
            }
        };
        debug!(first, second, penalty, "Pair mismatched");
        Ok(MatchOutcome::Mismatched { penalty })
    }

    /// Turns a mismatched pair back over. Returns false if none was showing.
    pub fn resolve_mismatch(&mut self) -> bool {
        if self.pending.len() == 2 {
            self.pending.clear();
            true
        } else {
            false
        }
    }
}

impl GameEngine for MatchingGame {
    type Action = MatchingAction;

    fn apply_action(&mut self, action: MatchingAction) -> ActionOutcome {
        let index = match action {
            MatchingAction::Select { index } => index,
            MatchingAction::Resolve => {
                return if self.resolve_mismatch() {
                    ActionOutcome::new(OutcomeKind::Accepted)
                } else {
                    ActionOutcome::rejected(OutcomeKind::Invalid, "No mismatched pair to resolve")
                };
            }
        };
        if index >= self.grid.len() {
            return ActionOutcome::rejected(
                OutcomeKind::Invalid,
                SelectError::OutOfRange(index, self.grid.len()),
            );
        }
        match self.select(index) {
            Ok(MatchOutcome::Pending) => ActionOutcome::new(OutcomeKind::Pending),
            Ok(MatchOutcome::Matched { points }) => ActionOutcome::new(OutcomeKind::Matched)
                .with_delta(points as i32)
                .with_terminal(self.is_terminal()),
            Ok(MatchOutcome::Mismatched { penalty }) => {
                ActionOutcome::new(OutcomeKind::Mismatched).with_delta(-(penalty as i32))
            }
            Err(error) => ActionOutcome::rejected(OutcomeKind::Invalid, error)
                .with_terminal(error == SelectError::GameOver),
        }
    }

    fn tick(&mut self, seconds: u32) -> Option<ActionOutcome> {
        if self.is_terminal() {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(seconds);
        if self.remaining_secs > 0 {
            return None;
        }
        self.timed_out = true;
        self.pending.clear();
        info!(score = self.score, "Matching round timed out");
        Some(ActionOutcome::new(OutcomeKind::TimedOut).with_terminal(true))
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_terminal(&self) -> bool {
        self.timed_out || self.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellValue;

    /// 2x2 grid: cells 0 and 3 hold 1, cells 1 and 2 hold 2.
    fn small(rule: MismatchRule) -> MatchingGame {
        let cells = [1, 2, 2, 1].map(CellValue::Number).to_vec();
        MatchingGame::new(
            MatchGrid::from_cells(2, MatchKind::Number, cells),
            Difficulty::Hard,
            rule,
        )
    }

    #[test]
    fn test_match_awards_base_plus_bonus() {
        let mut game = small(MismatchRule::Relaxed);
        assert_eq!(game.select(0), Ok(MatchOutcome::Pending));
        // hard: 20 base + 80 / 10 bonus
        assert_eq!(game.select(3), Ok(MatchOutcome::Matched { points: 28 }));
        assert!(game.is_matched(0) && game.is_matched(3));
        assert!(game.pending().is_empty());
    }

    #[test]
    fn test_mismatch_blocks_until_resolved() {
        let mut game = small(MismatchRule::Relaxed);
        game.select(0).unwrap();
        assert_eq!(game.select(1), Ok(MatchOutcome::Mismatched { penalty: 0 }));
        assert_eq!(game.select(2), Err(SelectError::PairPending));
        assert_eq!(game.pending(), &[0, 1]);
        assert!(game.resolve_mismatch());
        assert!(!game.resolve_mismatch());
        assert_eq!(game.select(2), Ok(MatchOutcome::Pending));
    }

    #[test]
    fn test_repeat_selections_rejected() {
        let mut game = small(MismatchRule::Relaxed);
        game.select(1).unwrap();
        assert_eq!(game.select(1), Err(SelectError::AlreadySelected(1)));
        game.select(2).unwrap();
        assert_eq!(game.select(2), Err(SelectError::AlreadyMatched(2)));
    }

    #[test]
    fn test_matched_cell_rejected() {
        let mut game = small(MismatchRule::Relaxed);
        game.select(1).unwrap();
        game.select(2).unwrap();
        assert_eq!(game.select(1), Err(SelectError::AlreadyMatched(1)));
    }

    #[test]
    fn test_penalty_clamps_at_zero() {
        let mut game = small(MismatchRule::Penalized);
        game.select(0).unwrap();
        assert_eq!(game.select(1), Ok(MatchOutcome::Mismatched { penalty: 0 }));
        game.resolve_mismatch();

        game.select(1).unwrap();
        game.select(2).unwrap();
        assert_eq!(game.score(), 28);
        assert_eq!(game.mismatches(), 1);
    }

    #[test]
    fn test_penalty_deducts_from_score() {
        let cells = [1, 2, 3, 1, 2, 3, 4, 4, 5].map(CellValue::Number).to_vec();
        let grid = MatchGrid::from_cells(3, MatchKind::Number, cells);
        let mut game = MatchingGame::new(grid, Difficulty::Easy, MismatchRule::Penalized);
        game.select(0).unwrap();
        game.select(3).unwrap();
        assert_eq!(game.score(), 22);
        game.select(1).unwrap();
        assert_eq!(game.select(2), Ok(MatchOutcome::Mismatched { penalty: 3 }));
        assert_eq!(game.score(), 19);
    }

    #[test]
    fn test_odd_grid_completes_without_filler() {
        let cells = [1, 2, 3, 1, 2, 3, 4, 4, 5].map(CellValue::Number).to_vec();
        let grid = MatchGrid::from_cells(3, MatchKind::Number, cells);
        let mut game = MatchingGame::new(grid, Difficulty::Easy, MismatchRule::Relaxed);
        for (a, b) in [(0, 3), (1, 4), (2, 5)] {
            game.select(a).unwrap();
            game.select(b).unwrap();
        }
        assert!(!game.is_terminal());
        let outcome = game.apply_action(MatchingAction::Select { index: 6 });
        assert_eq!(outcome.kind, OutcomeKind::Pending);
        let outcome = game.apply_action(MatchingAction::Select { index: 7 });
        assert_eq!(outcome.kind, OutcomeKind::Matched);
        assert!(outcome.terminal);
        assert_eq!(game.select(8), Err(SelectError::GameOver));
    }

    #[test]
    fn test_timeout() {
        let mut game = small(MismatchRule::Relaxed);
        assert!(game.tick(79).is_none());
        assert_eq!(game.remaining_secs(), 1);
        let outcome = game.tick(10).unwrap();
        assert_eq!(outcome.kind, OutcomeKind::TimedOut);
        assert!(game.is_terminal());
        assert!(game.tick(1).is_none());
        assert_eq!(game.select(0), Err(SelectError::GameOver));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_panics() {
        let mut game = small(MismatchRule::Relaxed);
        let _ = game.select(4);
    }

    #[test]
    fn test_actions_from_json() {
        let action: MatchingAction = serde_json::from_str(r#"{"op":"select","index":3}"#).unwrap();
        assert_eq!(action, MatchingAction::Select { index: 3 });
        let action: MatchingAction = serde_json::from_str(r#"{"op":"resolve"}"#).unwrap();
        assert_eq!(action, MatchingAction::Resolve);
    }

    #[test]
    fn test_out_of_range_action_rejected() {
        let mut game = small(MismatchRule::Penalized);
        game.select(0).unwrap();
        let outcome = game.apply_action(MatchingAction::Select { index: 999 });
        assert_eq!(outcome.kind, OutcomeKind::Invalid);
        assert!(!outcome.terminal);
        assert_eq!(game.pending(), &[0]);
        assert_eq!(game.mismatches(), 0);
    }

    #[test]
    fn test_filler_cell_left_over_completes() {
        // 3x3: four pairs and a lone 9 in the middle.
        let cells = [1, 2, 3, 4, 9, 4, 3, 2, 1].map(CellValue::Number).to_vec();
        let grid = MatchGrid::from_cells(3, MatchKind::Number, cells);
        let mut game = MatchingGame::new(grid, Difficulty::Easy, MismatchRule::Relaxed);
        for (a, b) in [(0, 8), (1, 7), (2, 6)] {
            game.select(a).unwrap();
            game.select(b).unwrap();
            assert!(!game.is_complete());
        }
        game.select(3).unwrap();
        let outcome = game.apply_action(MatchingAction::Select { index: 5 });
        assert_eq!(outcome.kind, OutcomeKind::Matched);
        assert!(outcome.terminal);
        assert!(!game.is_matched(4));
    }
}
