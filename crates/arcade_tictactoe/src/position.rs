//! The nine squares of a tic-tac-toe grid.

use arcade_core::EngineError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A square, numbered 0-8 in row-major order.
///
/// Serialized as its snake_case key, so `"center"` in a script names
/// [`Position::Center`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Position {
    /// Row 0, column 0.
    TopLeft,
    /// Row 0, column 1.
    TopCenter,
    /// Row 0, column 2.
    TopRight,
    /// Row 1, column 0.
    MiddleLeft,
    /// Row 1, column 1.
    Center,
    /// Row 1, column 2.
    MiddleRight,
    /// Row 2, column 0.
    BottomLeft,
    /// Row 2, column 1.
    BottomCenter,
    /// Row 2, column 2.
    BottomRight,
}

impl Position {
    /// Every square in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Corner squares, preferred by the medium AI after the centre.
    pub const CORNERS: [Position; 4] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    /// Index into the board, 0-8.
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// The square at `index`, if it is below 9.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row, 0 at the top.
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Column, 0 at the left.
    pub fn col(self) -> usize {
        self.to_index() % 3
    }

    /// The square at a row and column, if both are below 3.
    pub fn at(row: usize, col: usize) -> Option<Self> {
        (row < 3 && col < 3)
            .then(|| Self::from_index(row * 3 + col))
            .flatten()
    }

    /// Snake_case key used in scripts and logs.
    pub fn key(self) -> &'static str {
        self.into()
    }
}

impl FromStr for Position {
    type Err = EngineError;

    /// Accepts an index (`"4"`) or a key in any case, with `-`, `_` or a
    /// space between words (`"top-left"`, `"Bottom Right"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return Self::from_index(index)
                .ok_or_else(|| EngineError::new(format!("No square numbered {}", index)));
        }
        let key = trimmed.to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|pos| pos.key() == key)
            .ok_or_else(|| EngineError::new(format!("Unknown square: {:?}", s)))
    }
}
