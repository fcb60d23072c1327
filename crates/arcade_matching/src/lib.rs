//! Matching-pair games: Number Grid and Color Grid.
//!
//! A grid of shuffled value pairs is dealt face down; the player turns over
//! two cells at a time and keeps them when they match. Points scale with the
//! difficulty and the time left on the clock.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod grid;

pub use game::{
    MatchOutcome, MatchingAction, MatchingGame, MismatchRule, SelectError, base_points,
    mismatch_penalty, time_limit,
};
pub use grid::{CellValue, MAX_NUMBER, MatchGrid, MatchKind, PALETTE, generate, grid_side};
