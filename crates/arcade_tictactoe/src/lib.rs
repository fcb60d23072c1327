//! Tic-tac-toe rules and computer opponent.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Player`], [`Square`], [`Position`]
//! - **Rules**: pure win/draw checks over a board
//! - **Game**: two-sided move validation and history
//! - **AI**: random, heuristic and minimax move choice per [`Difficulty`](arcade_core::Difficulty)
//! - **Session**: a user against the computer, scored on the outcome

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod ai;
mod game;
mod position;
pub mod rules;
mod session;
mod types;

pub use action::{Move, MoveError};
pub use game::Game;
pub use position::Position;
pub use session::{TicTacToeSession, Turn, draw_points, win_points};
pub use types::{Board, GameStatus, Player, Square};
