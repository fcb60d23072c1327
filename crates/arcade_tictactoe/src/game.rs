//! Game logic for tic-tac-toe.

use super::action::{Move, MoveError};
use super::rules::evaluate;
use super::types::{Board, GameStatus, Player, Square};
use tracing::{debug, instrument};

/// Tic-tac-toe game engine for two sides.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Player,
    status: GameStatus,
    history: Vec<Move>,
}

impl Game {
    /// Creates a new game with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Validates and applies a move, then updates the status.
    ///
    /// A rejected move leaves the game untouched.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn make_move(&mut self, action: Move) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if action.player != self.to_move {
            return Err(MoveError::WrongPlayer(action.player));
        }
        if !self.board.is_empty(action.position) {
            return Err(MoveError::SquareOccupied(action.position));
        }

        self.board
            .set(action.position, Square::Occupied(action.player));
        self.history.push(action);
        self.to_move = action.player.opponent();
        self.update_status();

        debug!(%action, status = ?self.status, "Move applied");
        Ok(self.status)
    }

    /// Replays moves from the initial position.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(moves: &[Move]) -> Result<Self, MoveError> {
        let mut game = Self::new();
        for action in moves {
            game.make_move(*action)?;
        }
        Ok(game)
    }

    fn update_status(&mut self) {
        self.status = evaluate(&self.board);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_alternating_players() {
        let mut game = Game::new();
        assert_eq!(game.to_move(), Player::X);
        game.make_move(Move::new(Player::X, Position::Center)).unwrap();
        assert_eq!(game.to_move(), Player::O);
    }

    #[test]
    fn test_occupied_square_rejected_without_mutation() {
        let mut game = Game::new();
        game.make_move(Move::new(Player::X, Position::Center)).unwrap();
        let before = game.board().clone();

        let result = game.make_move(Move::new(Player::O, Position::Center));
        assert_eq!(result, Err(MoveError::SquareOccupied(Position::Center)));
        assert_eq!(game.board(), &before);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_wrong_player_rejected() {
        let mut game = Game::new();
        let result = game.make_move(Move::new(Player::O, Position::Center));
        assert_eq!(result, Err(MoveError::WrongPlayer(Player::O)));
    }

    #[test]
    fn test_replay_to_win_then_game_over() {
        let moves = [
            Move::new(Player::X, Position::TopLeft),
            Move::new(Player::O, Position::Center),
            Move::new(Player::X, Position::TopCenter),
            Move::new(Player::O, Position::BottomLeft),
            Move::new(Player::X, Position::TopRight),
        ];
        let mut game = Game::replay(&moves).unwrap();
        assert_eq!(game.status(), GameStatus::Won(Player::X));

        let result = game.make_move(Move::new(Player::O, Position::BottomRight));
        assert_eq!(result, Err(MoveError::GameOver));
    }
}
