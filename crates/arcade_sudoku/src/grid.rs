//! The 9x9 Sudoku grid.

use arcade_core::EngineError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Side length of the grid.
pub const SIZE: usize = 9;

/// Side length of one box.
pub const BOX: usize = 3;

/// A 9x9 grid of digits, `0` meaning empty.
///
/// Row and column indices must be below [`SIZE`]; anything else is a caller
/// bug and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SudokuGrid {
    cells: [[u8; SIZE]; SIZE],
}

impl SudokuGrid {
    /// Creates an empty grid.
    pub fn empty() -> Self {
        Self {
            cells: [[0; SIZE]; SIZE],
        }
    }

    /// Builds a grid from rows of digits (`0` for empty).
    pub fn from_rows(rows: [[u8; SIZE]; SIZE]) -> Result<Self, EngineError> {
        if let Some(bad) = rows.iter().flatten().find(|d| **d > 9) {
            return Err(EngineError::new(format!("digit {bad} out of range 0-9")));
        }
        Ok(Self { cells: rows })
    }

    /// Returns the digit at a cell, or `None` if empty.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        match self.cells[row][col] {
            0 => None,
            digit => Some(digit),
        }
    }

    /// Writes a digit (1-9) into a cell.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in 1..=9.
    pub fn set(&mut self, row: usize, col: usize, digit: u8) {
        assert!((1..=9).contains(&digit), "digit {digit} out of range 1-9");
        self.cells[row][col] = digit;
    }

    /// Empties a cell.
    pub fn clear(&mut self, row: usize, col: usize) {
        self.cells[row][col] = 0;
    }

    /// Returns true if the cell holds no digit.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.cells[row][col] == 0
    }

    /// Returns the raw rows.
    pub fn rows(&self) -> &[[u8; SIZE]; SIZE] {
        &self.cells
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|d| **d != 0).count()
    }

    /// Returns true if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.filled_count() == SIZE * SIZE
    }

    /// Coordinates of every filled cell in row-major order.
    pub fn filled_cells(&self) -> Vec<(usize, usize)> {
        all_cells().filter(|&(r, c)| !self.is_empty(r, c)).collect()
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        all_cells().filter(|&(r, c)| self.is_empty(r, c)).collect()
    }

    /// Renders the grid as one 81-character line, `.` for empty.
    pub fn to_line(&self) -> String {
        self.cells
            .iter()
            .flatten()
            .map(|d| match d {
                0 => '.',
                d => char::from(b'0' + d),
            })
            .collect()
    }
}

impl Default for SudokuGrid {
    fn default() -> Self {
        Self::empty()
    }
}

/// Every coordinate in row-major order.
pub fn all_cells() -> impl Iterator<Item = (usize, usize)> {
    (0..SIZE).flat_map(|r| (0..SIZE).map(move |c| (r, c)))
}

impl FromStr for SudokuGrid {
    type Err = EngineError;

    /// Parses 81 cells; digits are clues, `.` or `0` are empty, whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [[0u8; SIZE]; SIZE];
        let mut count = 0;
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            if count == SIZE * SIZE {
                return Err(EngineError::new("more than 81 cells"));
            }
            let digit = match ch {
                '.' | '0' => 0,
                '1'..='9' => ch as u8 - b'0',
                other => return Err(EngineError::new(format!("unexpected character {other:?}"))),
            };
            cells[count / SIZE][count % SIZE] = digit;
            count += 1;
        }
        if count != SIZE * SIZE {
            return Err(EngineError::new(format!("expected 81 cells, found {count}")));
        }
        Ok(Self { cells })
    }
}

impl std::fmt::Display for SudokuGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 && r % BOX == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for (c, digit) in row.iter().enumerate() {
                if c > 0 && c % BOX == 0 {
                    write!(f, "| ")?;
                }
                match digit {
                    0 => write!(f, ".")?,
                    d => write!(f, "{d}")?,
                }
                if c + 1 < SIZE {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
