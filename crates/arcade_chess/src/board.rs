//! Piece placement on an 8x8 board.

use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;
use arcade_core::EngineError;
use serde::{Deserialize, Serialize};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement, indexed `[rank][file]` from a1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard starting position.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            board.squares[0][file] = Some(Piece::new(kind, Color::White));
            board.squares[1][file] = Some(Piece::new(PieceKind::Pawn, Color::White));
            board.squares[6][file] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            board.squares[7][file] = Some(Piece::new(kind, Color::Black));
        }
        board
    }

    /// Builds a board from eight rank strings, rank 8 first.
    ///
    /// Each string holds eight piece codes (see [`Piece::from_code`]) with
    /// `.` for an empty square; whitespace is ignored.
    pub fn from_ranks(ranks: &[&str]) -> Result<Self, EngineError> {
        if ranks.len() != 8 {
            return Err(EngineError::new(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }
        let mut board = Self::empty();
        for (row, text) in ranks.iter().enumerate() {
            let rank = 7 - row;
            let codes: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
            if codes.len() != 8 {
                return Err(EngineError::new(format!(
                    "rank {} has {} squares",
                    rank + 1,
                    codes.len()
                )));
            }
            for (file, code) in codes.into_iter().enumerate() {
                board.squares[rank][file] = match code {
                    '.' => None,
                    other => Some(Piece::from_code(other).ok_or_else(|| {
                        EngineError::new(format!("unknown piece code {other:?}"))
                    })?),
                };
            }
        }
        Ok(board)
    }

    /// Piece on a square.
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.rank() as usize][square.file() as usize]
    }

    /// Places or removes a piece.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.rank() as usize][square.file() as usize] = piece;
    }

    /// Every occupied square with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Squares holding pieces of one colour.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Where a side's king stands.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Renders the board rank 8 first, one line per rank.
    pub fn display(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let code = Square::new(file, rank)
                    .and_then(|sq| self.get(sq))
                    .map_or('.', Piece::code);
                out.push(code);
            }
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}
