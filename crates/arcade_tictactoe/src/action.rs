//! A mark placed on the board, and why one can be refused.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// One mark: who placed it and where. Stored in the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// Mark being placed.
    pub player: Player,
    /// Square it goes on.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.player, self.position)
    }
}

/// Why a move was refused. The board is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Someone already marked this square.
    #[display("{} is taken", _0)]
    SquareOccupied(Position),

    /// A line was completed or the board filled up.
    #[display("the game has ended")]
    GameOver,

    /// The other mark is due.
    #[display("{} is not on turn", _0)]
    WrongPlayer(Player),
}

impl std::error::Error for MoveError {}
