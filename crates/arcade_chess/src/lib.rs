//! Casual chess rules for the arcade.
//!
//! Legal movement for every piece, check, checkmate and stalemate. Pawns
//! auto-promote to queens and there is no castling.
//!
//! # Example
//!
//! ```
//! use arcade_chess::{ChessGame, ChessStatus};
//! use arcade_core::Difficulty;
//!
//! let mut game = ChessGame::new(Difficulty::Easy);
//! let report = game.make_move("e2".parse().unwrap(), "e4".parse().unwrap()).unwrap();
//! assert_eq!(report.status, ChessStatus::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod game;
mod piece;
pub mod rules;
mod square;

pub use board::Board;
pub use game::{ChessGame, ChessMove, ChessStatus, MoveError, MoveReport, checkmate_points};
pub use piece::{Color, Piece, PieceKind};
pub use rules::MoveRecord;
pub use square::Square;
