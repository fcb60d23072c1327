//! Randomized solved-grid generation and uniqueness-preserving carving.

use crate::grid::{SIZE, SudokuGrid};
use crate::solver::{count_solutions, is_valid_placement, solve};
use arcade_core::{Difficulty, random};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Number of clues to blank for each difficulty.
pub fn cells_to_remove(difficulty: Difficulty) -> usize {
    difficulty.pick([35, 45, 52, 58])
}

/// A carved puzzle together with the grid it was carved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarvedPuzzle {
    /// The puzzle handed to the player.
    pub puzzle: SudokuGrid,
    /// Its unique solution.
    pub solution: SudokuGrid,
    /// Cells actually blanked.
    pub removed: usize,
    /// Cells the difficulty asked for.
    pub target: usize,
}

impl CarvedPuzzle {
    /// Returns true if fewer cells were removed than requested.
    pub fn is_short(&self) -> bool {
        self.removed < self.target
    }
}

/// Fills an empty grid by randomized backtracking.
#[instrument(skip(rng))]
pub fn generate_solved<R: Rng>(rng: &mut R) -> SudokuGrid {
    let mut grid = SudokuGrid::empty();
    let filled = fill(&mut grid, 0, rng);
    // An empty grid always admits a completion.
    debug_assert!(filled, "backtracking failed to fill an empty grid");
    debug!(grid = %grid.to_line(), "Generated solved grid");
    grid
}

fn fill<R: Rng>(grid: &mut SudokuGrid, index: usize, rng: &mut R) -> bool {
    if index == SIZE * SIZE {
        return true;
    }
    let (row, col) = (index / SIZE, index % SIZE);
    let digits = random::shuffled((1..=9u8).collect(), rng);
    for digit in digits {
        if is_valid_placement(grid, row, col, digit) {
            grid.set(row, col, digit);
            if fill(grid, index + 1, rng) {
                return true;
            }
            grid.clear(row, col);
        }
    }
    false
}

/// Blanks cells from a solved grid while the puzzle keeps a unique solution.
///
/// Filled cells are visited once each in random order; a blank that admits a
/// second solution is restored. When every cell has been tried before the
/// target is reached, the easier puzzle is returned as is.
///
/// A partly filled `solved` grid is completed by the solver to give
/// [`CarvedPuzzle::solution`]. Only an input with no completion at all leaves
/// the solution short of full.
#[instrument(skip(solved, rng))]
pub fn carve_puzzle<R: Rng>(solved: &SudokuGrid, difficulty: Difficulty, rng: &mut R) -> CarvedPuzzle {
    let target = cells_to_remove(difficulty);
    let mut puzzle = *solved;
    let mut removed = 0;

    for (row, col) in random::shuffled(solved.filled_cells(), rng) {
        if removed == target {
            break;
        }
        let Some(digit) = puzzle.get(row, col) else {
            continue;
        };
        puzzle.clear(row, col);
        if count_solutions(&puzzle, 2) == 1 {
            removed += 1;
        } else {
            puzzle.set(row, col, digit);
        }
    }

    if removed < target {
        warn!(removed, target, "Could not carve the full target, accepting an easier puzzle");
    } else {
        info!(removed, %difficulty, "Carved puzzle");
    }

    let solution = if solved.is_full() {
        *solved
    } else {
        solve(&puzzle).unwrap_or(puzzle)
    };

    CarvedPuzzle {
        puzzle,
        solution,
        removed,
        target,
    }
}

/// Generates a solved grid and carves it for `difficulty`.
pub fn generate_puzzle<R: Rng>(difficulty: Difficulty, rng: &mut R) -> CarvedPuzzle {
    let solved = generate_solved(rng);
    carve_puzzle(&solved, difficulty, rng)
}
