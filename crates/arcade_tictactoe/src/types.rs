//! Marks, squares, the board and the game verdict.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// One of the two marks. X always opens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Player {
    /// Crosses.
    X,
    /// Noughts.
    O,
}

impl Player {
    /// The other mark.
    pub fn opponent(self) -> Self {
        if self == Player::X { Player::O } else { Player::X }
    }
}

/// Contents of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Nobody has marked it.
    Empty,
    /// Holds this mark.
    Occupied(Player),
}

/// The 3x3 grid, indexed by [`Position`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board with no marks.
    pub fn new() -> Self {
        Self { squares: [Square::Empty; 9] }
    }

    /// Builds a board from a 9-character row-major pattern of `X`, `O` and `.`.
    ///
    /// Returns `None` if the pattern has the wrong length or other characters.
    pub fn from_pattern(pattern: &str) -> Option<Self> {
        let mut board = Self::new();
        let mut count = 0;
        for (idx, ch) in pattern.chars().filter(|c| !c.is_whitespace()).enumerate() {
            let square = match ch {
                'X' | 'x' => Square::Occupied(Player::X),
                'O' | 'o' => Square::Occupied(Player::O),
                '.' | '-' => Square::Empty,
                _ => return None,
            };
            board.set(Position::from_index(idx)?, square);
            count += 1;
        }
        (count == 9).then_some(board)
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Overwrites one square.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// True if nobody has marked `pos`.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns a copy of the board with `player` placed at `pos`.
    pub fn with_mark(&self, pos: Position, player: Player) -> Self {
        let mut next = self.clone();
        next.set(pos, Square::Occupied(player));
        next
    }

    /// Squares in index order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Empty squares in index order.
    pub fn free_positions(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Counts the marks placed by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Renders the grid. Empty squares show their number counted from 1.
    pub fn display(&self) -> String {
        let rows: Vec<String> = self
            .squares
            .chunks(3)
            .enumerate()
            .map(|(row, squares)| {
                let cells: Vec<String> = squares
                    .iter()
                    .enumerate()
                    .map(|(col, square)| match square {
                        Square::Empty => (row * 3 + col + 1).to_string(),
                        Square::Occupied(player) => player.to_string().to_uppercase(),
                    })
                    .collect();
                cells.join("|")
            })
            .collect();
        rows.join("\n-+-+-\n")
    }
}

/// Verdict on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Free squares remain and nobody has a line.
    InProgress,
    /// This mark holds a full line.
    Won(Player),
    /// Full board, no line.
    Draw,
}

impl GameStatus {
    /// Returns true once the game has ended.
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}
