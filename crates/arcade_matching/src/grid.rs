//! Shuffled grids of value pairs.

use arcade_core::Difficulty;
use arcade_core::random::shuffle;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Largest number drawn for a number grid.
pub const MAX_NUMBER: u32 = 99;

/// Colours a colour grid draws from.
pub const PALETTE: [&str; 32] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
    "#bcf60c", "#fabebe", "#008080", "#e6beff", "#9a6324", "#fffac8", "#800000", "#aaffc3",
    "#808000", "#ffd8b1", "#000075", "#808080", "#ffffff", "#000000", "#ff7f50", "#2e8b57",
    "#daa520", "#4b0082", "#7fffd4", "#dc143c", "#00bfff", "#ff1493", "#adff2f", "#8b4513",
];

/// Side length of the grid.
pub fn grid_side(difficulty: Difficulty) -> usize {
    difficulty.pick([4, 5, 6, 7])
}

/// What the cells show.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
    strum::EnumString, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchKind {
    /// Numbers from 1 to [`MAX_NUMBER`].
    #[default]
    Number,
    /// Colours from [`PALETTE`].
    Color,
}

impl MatchKind {
    /// Every distinct value this kind can show.
    pub fn values(self) -> Vec<CellValue> {
        match self {
            MatchKind::Number => (1..=MAX_NUMBER).map(CellValue::Number).collect(),
            MatchKind::Color => PALETTE
                .iter()
                .map(|hex| CellValue::Color((*hex).to_string()))
                .collect(),
        }
    }
}

/// Content of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A number.
    Number(u32),
    /// A colour as `#rrggbb`.
    Color(String),
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Color(hex) => f.write_str(hex),
        }
    }
}

/// An N x N grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchGrid {
    side: usize,
    kind: MatchKind,
    cells: Vec<CellValue>,
}

impl MatchGrid {
    /// Wraps prepared cells; `cells.len()` must be `side * side`.
    pub fn from_cells(side: usize, kind: MatchKind, cells: Vec<CellValue>) -> Self {
        assert_eq!(cells.len(), side * side, "grid needs side*side cells");
        Self { side, kind, cells }
    }

    /// Grid side length.
    pub fn side(&self) -> usize {
        self.side
    }

    /// What the cells show.
    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a zero-sized grid.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Value at a row-major index. Panics when out of range.
    pub fn get(&self, index: usize) -> &CellValue {
        &self.cells[index]
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// How many times each value occurs.
    pub fn value_counts(&self) -> HashMap<&CellValue, usize> {
        let mut counts = HashMap::new();
        for value in &self.cells {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    /// Indices whose value appears exactly once.
    pub fn unpaired(&self) -> Vec<usize> {
        let counts = self.value_counts();
        (0..self.cells.len())
            .filter(|&i| counts[&self.cells[i]] == 1)
            .collect()
    }

    /// Renders one row per line, cells right-aligned.
    pub fn display(&self) -> String {
        let width = self
            .cells
            .iter()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1);
        self.cells
            .chunks(self.side.max(1))
            .map(|row| {
                row.iter()
                    .map(|v| format!("{v:>width$}"))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for MatchGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Picks a value not already on the grid.
fn unique_filler<R: Rng>(
    pool: &[CellValue],
    used: &[CellValue],
    rng: &mut R,
) -> Option<CellValue> {
    let free: Vec<&CellValue> = pool.iter().filter(|v| !used.contains(*v)).collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())].clone())
}

/// Builds a shuffled grid of pairs for a difficulty.
///
/// With an odd cell count the spare cell gets a value that appears nowhere
/// else, so no value ever occurs three times.
#[instrument(skip(rng))]
pub fn generate<R: Rng>(difficulty: Difficulty, kind: MatchKind, rng: &mut R) -> MatchGrid {
    let side = grid_side(difficulty);
    let total = side * side;
    let pairs = total / 2;

    let mut pool = kind.values();
    shuffle(&mut pool, rng);
    let chosen: Vec<CellValue> = pool.iter().take(pairs).cloned().collect();

    let mut cells: Vec<CellValue> = chosen
        .iter()
        .flat_map(|v| [v.clone(), v.clone()])
        .collect();
    if total % 2 == 1
        && let Some(filler) = unique_filler(&pool, &chosen, rng)
    {
        debug!(%filler, "Odd grid, adding unique filler");
        cells.push(filler);
    }
    shuffle(&mut cells, rng);

    MatchGrid::from_cells(side, kind, cells)
}
