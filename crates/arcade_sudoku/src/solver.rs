//! Placement checks and backtracking solution counting.
//!
//! The search mutates a working copy in place and undoes every trial
//! placement before returning, so callers' grids are never touched.

use crate::grid::{BOX, SIZE, SudokuGrid, all_cells};
use tracing::instrument;

/// Returns true if `num` can sit at (`row`, `col`) without repeating in the
/// row, column or 3x3 box. The cell itself is ignored.
pub fn is_valid_placement(grid: &SudokuGrid, row: usize, col: usize, num: u8) -> bool {
    let rows = grid.rows();
    for i in 0..SIZE {
        if i != col && rows[row][i] == num {
            return false;
        }
        if i != row && rows[i][col] == num {
            return false;
        }
    }
    let (box_row, box_col) = (row / BOX * BOX, col / BOX * BOX);
    for r in box_row..box_row + BOX {
        for c in box_col..box_col + BOX {
            if (r, c) != (row, col) && rows[r][c] == num {
                return false;
            }
        }
    }
    true
}

/// Returns true if every filled cell is a valid placement.
pub fn is_consistent(grid: &SudokuGrid) -> bool {
    all_cells().all(|(r, c)| match grid.get(r, c) {
        Some(digit) => is_valid_placement(grid, r, c, digit),
        None => true,
    })
}

/// Returns true if the grid is full and breaks no rule.
pub fn is_solved(grid: &SudokuGrid) -> bool {
    grid.is_full() && is_consistent(grid)
}

/// Counts solutions, stopping once `limit` have been found.
///
/// A grid whose clues already conflict has no solutions.
#[instrument(skip(grid), fields(filled = grid.filled_count()))]
pub fn count_solutions(grid: &SudokuGrid, limit: usize) -> usize {
    if limit == 0 || !is_consistent(grid) {
        return 0;
    }
    let mut work = *grid;
    let mut count = 0;
    search(&mut work, &mut |_| {
        count += 1;
        count < limit
    });
    count
}

/// Returns true if the puzzle has exactly one solution.
pub fn has_unique_solution(grid: &SudokuGrid) -> bool {
    count_solutions(grid, 2) == 1
}

/// Solves the puzzle, returning the first solution found.
#[instrument(skip(grid))]
pub fn solve(grid: &SudokuGrid) -> Option<SudokuGrid> {
    if !is_consistent(grid) {
        return None;
    }
    let mut work = *grid;
    let mut found = None;
    search(&mut work, &mut |solved| {
        found = Some(*solved);
        false
    });
    found
}

/// Bitmask of digits (bit `d`) still allowed at a cell.
fn candidates(grid: &SudokuGrid, row: usize, col: usize) -> u16 {
    let rows = grid.rows();
    let mut used = 0u16;
    for i in 0..SIZE {
        used |= 1 << rows[row][i];
        used |= 1 << rows[i][col];
    }
    let (box_row, box_col) = (row / BOX * BOX, col / BOX * BOX);
    for r in box_row..box_row + BOX {
        for c in box_col..box_col + BOX {
            used |= 1 << rows[r][c];
        }
    }
    !used & 0b11_1111_1110
}

/// Depth-first search over the most constrained empty cell.
///
/// `on_solution` returns false to stop the search. Returns false once stopped.
fn search(grid: &mut SudokuGrid, on_solution: &mut dyn FnMut(&SudokuGrid) -> bool) -> bool {
    let mut target: Option<(usize, usize, u16)> = None;
    for (r, c) in all_cells() {
        if !grid.is_empty(r, c) {
            continue;
        }
        let mask = candidates(grid, r, c);
        if mask == 0 {
            return true;
        }
        if target.is_none_or(|(_, _, best)| mask.count_ones() < best.count_ones()) {
            target = Some((r, c, mask));
        }
    }

    let Some((row, col, mask)) = target else {
        return on_solution(grid);
    };

    for digit in 1..=9u8 {
        if mask & (1 << digit) == 0 {
            continue;
        }
        grid.set(row, col, digit);
        let keep_going = search(grid, on_solution);
        grid.clear(row, col);
        if !keep_going {
            return false;
        }
    }
    true
}
