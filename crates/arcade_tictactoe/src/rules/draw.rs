//! Full boards and the overall verdict.

use super::win::check_winner;
use crate::{Board, GameStatus};

/// No empty square is left.
pub fn is_full(board: &Board) -> bool {
    board.free_positions().is_empty()
}

/// Full with nobody holding a line.
pub fn is_draw(board: &Board) -> bool {
    evaluate(board) == GameStatus::Draw
}

/// Status of a board: a line wins even on a full board.
pub fn evaluate(board: &Board) -> GameStatus {
    match check_winner(board) {
        Some(winner) => GameStatus::Won(winner),
        None if is_full(board) => GameStatus::Draw,
        None => GameStatus::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_open_board_in_progress() {
        let board = Board::from_pattern("XO. ... ...").unwrap();
        assert!(!is_full(&board));
        assert_eq!(evaluate(&board), GameStatus::InProgress);
    }

    #[test]
    fn test_full_board_without_line_draws() {
        let board = Board::from_pattern("OXO XXO XOX").unwrap();
        assert!(is_draw(&board));
    }

    #[test]
    fn test_last_mark_completing_a_line_wins() {
        let board = Board::from_pattern("XOX OXO OXX").unwrap();
        assert!(is_full(&board));
        assert!(!is_draw(&board));
        assert_eq!(evaluate(&board), GameStatus::Won(Player::X));
    }
}
