//! Three in a row.

use crate::{Board, Player, Position, Square};

/// Rows, then columns, then the two diagonals.
pub const LINES: [[Position; 3]; 8] = {
    use Position::*;
    [
        [TopLeft, TopCenter, TopRight],
        [MiddleLeft, Center, MiddleRight],
        [BottomLeft, BottomCenter, BottomRight],
        [TopLeft, MiddleLeft, BottomLeft],
        [TopCenter, Center, BottomCenter],
        [TopRight, MiddleRight, BottomRight],
        [TopLeft, Center, BottomRight],
        [TopRight, Center, BottomLeft],
    ]
};

fn owner(board: &Board, line: &[Position; 3]) -> Option<Player> {
    match (*line).map(|pos| board.get(pos)) {
        [Square::Occupied(p), b, c] if b == Square::Occupied(p) && c == b => Some(p),
        _ => None,
    }
}

/// The player holding a full line, if any.
pub fn check_winner(board: &Board) -> Option<Player> {
    LINES.iter().find_map(|line| owner(board, line))
}

/// The empty square that would give `player` a full line.
///
/// The first such line in [`LINES`] order wins ties.
pub fn winning_square(board: &Board, player: Player) -> Option<Position> {
    LINES.iter().find_map(|line| {
        let held = line
            .iter()
            .filter(|pos| board.get(**pos) == Square::Occupied(player))
            .count();
        let mut gaps = line.iter().filter(|pos| board.is_empty(**pos));
        match (held, gaps.next(), gaps.next()) {
            (2, Some(gap), None) => Some(*gap),
            _ => None,
        }
    })
}
