//! Sudoku generation, validation and play.
//!
//! # Architecture
//!
//! - **Grid**: [`SudokuGrid`], a fixed 9x9 array with parse/print helpers
//! - **Solver**: placement checks and bounded solution counting
//! - **Generator**: randomized solved grids and uniqueness-preserving carving
//! - **Game**: a timed round with mistake tracking and completion scoring

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod generator;
mod grid;
mod solver;

pub use game::{
    MISTAKE_PENALTY, PlaceError, Placement, SudokuAction, SudokuGame, SudokuStatus,
    calculate_sudoku_score, completion_points, time_limit,
};
pub use generator::{CarvedPuzzle, carve_puzzle, cells_to_remove, generate_puzzle, generate_solved};
pub use grid::{BOX, SIZE, SudokuGrid, all_cells};
pub use solver::{
    count_solutions, has_unique_solution, is_consistent, is_solved, is_valid_placement, solve,
};
