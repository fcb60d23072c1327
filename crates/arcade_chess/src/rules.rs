//! Per-piece movement, attack detection and move application.
//!
//! Everything here is a pure function of a [`Board`] and the previous move;
//! simulating a move never touches the caller's board.

use crate::board::Board;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;
use serde::{Deserialize, Serialize};
use tracing::instrument;

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// A move as it was played, kept in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Origin square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// Piece that moved, before any promotion.
    pub piece: Piece,
    /// Piece removed from the board, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured: Option<Piece>,
    /// Whether the capture was en passant.
    pub en_passant: bool,
    /// Piece the pawn became on the last rank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl MoveRecord {
    /// Whether this was a pawn advancing two squares.
    pub fn is_double_pawn_step(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.from.rank().abs_diff(self.to.rank()) == 2
    }
}

fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.file() as i8 - from.file() as i8,
        to.rank() as i8 - from.rank() as i8,
    )
}

/// True when every square strictly between `from` and `to` is empty.
///
/// Only meaningful for squares on a shared rank, file or diagonal.
pub fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (df, dr) = deltas(from, to);
    let step = (df.signum(), dr.signum());
    let mut current = from.offset(step.0, step.1);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if board.get(sq).is_some() {
            return false;
        }
        current = sq.offset(step.0, step.1);
    }
    false
}

fn slides_to(board: &Board, from: Square, to: Square, straight: bool, diagonal: bool) -> bool {
    let (df, dr) = deltas(from, to);
    let on_line = (straight && (df == 0 || dr == 0)) || (diagonal && df.abs() == dr.abs());
    on_line && path_clear(board, from, to)
}

/// Whether `piece` on `from` attacks `to`, ignoring what stands on `to`.
fn attacks(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let (df, dr) = deltas(from, to);
    match piece.kind {
        PieceKind::Pawn => dr == piece.color.pawn_direction() && df.abs() == 1,
        PieceKind::Knight => KNIGHT_JUMPS.contains(&(df, dr)),
        PieceKind::King => df.abs() <= 1 && dr.abs() <= 1,
        PieceKind::Rook => slides_to(board, from, to, true, false),
        PieceKind::Bishop => slides_to(board, from, to, false, true),
        PieceKind::Queen => slides_to(board, from, to, true, true),
    }
}

/// Whether any piece of `by` attacks `square`.
pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, piece)| attacks(board, piece, from, square))
}

/// Whether `color`'s king is attacked. A side without a king is never in check.
#[instrument(skip(board))]
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opponent()))
}

/// Square of the pawn an en passant capture from `from` to `to` would take.
///
/// The previous move must be an enemy pawn's double step that landed beside
/// `from`, on the file being entered.
pub fn en_passant_victim(
    board: &Board,
    from: Square,
    to: Square,
    last: Option<&MoveRecord>,
) -> Option<Square> {
    let pawn = board.get(from)?;
    let last = last?;
    if pawn.kind != PieceKind::Pawn || board.get(to).is_some() || !last.is_double_pawn_step() {
        return None;
    }
    let (df, dr) = deltas(from, to);
    let victim = Square::new(to.file(), from.rank())?;
    let adjacent = last.to == victim && last.piece.color != pawn.color;
    (df.abs() == 1 && dr == pawn.color.pawn_direction() && adjacent).then_some(victim)
}

fn pawn_can_move(
    board: &Board,
    pawn: Piece,
    from: Square,
    to: Square,
    last: Option<&MoveRecord>,
) -> bool {
    let (df, dr) = deltas(from, to);
    let dir = pawn.color.pawn_direction();
    let target = board.get(to);

    if df == 0 {
        if dr == dir {
            return target.is_none();
        }
        if dr == 2 * dir && from.rank() == pawn.color.pawn_start_rank() {
            let between = from.offset(0, dir);
            return target.is_none() && between.is_some_and(|sq| board.get(sq).is_none());
        }
        return false;
    }
    if df.abs() == 1 && dr == dir {
        return match target {
            Some(other) => other.color != pawn.color,
            None => en_passant_victim(board, from, to, last).is_some(),
        };
    }
    false
}

/// Whether the piece on `from` may move to `to` by its movement rules alone.
///
/// Does not consider whether the mover's king is left in check.
pub fn is_pseudo_legal(board: &Board, from: Square, to: Square, last: Option<&MoveRecord>) -> bool {
    let Some(piece) = board.get(from) else {
        return false;
    };
    if from == to {
        return false;
    }
    if board.get(to).is_some_and(|target| target.color == piece.color) {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => pawn_can_move(board, piece, from, to, last),
        _ => attacks(board, piece, from, to),
    }
}

/// Plays a move on a copy of the board and describes what happened.
///
/// Pawns reaching the last rank become queens. The caller checks legality.
pub fn apply_move(
    board: &Board,
    from: Square,
    to: Square,
    last: Option<&MoveRecord>,
) -> Option<(Board, MoveRecord)> {
    let piece = board.get(from)?;
    let mut next = *board;
    let victim = en_passant_victim(board, from, to, last);
    let captured = match victim {
        Some(sq) => {
            let pawn = next.get(sq);
            next.set(sq, None);
            pawn
        }
        None => board.get(to),
    };
    let promotion = (piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank())
        .then_some(PieceKind::Queen);
    let landed = promotion.map_or(piece, |kind| Piece::new(kind, piece.color));
    next.set(from, None);
    next.set(to, Some(landed));

    let record = MoveRecord {
        from,
        to,
        piece,
        captured,
        en_passant: victim.is_some(),
        promotion,
    };
    Some((next, record))
}

/// Whether the move obeys piece movement and keeps the mover's king safe.
pub fn is_legal(board: &Board, from: Square, to: Square, last: Option<&MoveRecord>) -> bool {
    if !is_pseudo_legal(board, from, to, last) {
        return false;
    }
    match apply_move(board, from, to, last) {
        Some((next, record)) => !is_in_check(&next, record.piece.color),
        None => false,
    }
}

/// Every legal `(from, to)` pair for one side.
pub fn legal_moves(board: &Board, color: Color, last: Option<&MoveRecord>) -> Vec<(Square, Square)> {
    board
        .pieces_of(color)
        .flat_map(|(from, _)| Square::all().map(move |to| (from, to)))
        .filter(|&(from, to)| is_legal(board, from, to, last))
        .collect()
}

/// Whether a side has at least one legal move.
pub fn has_legal_move(board: &Board, color: Color, last: Option<&MoveRecord>) -> bool {
    board.pieces_of(color).any(|(from, _)| {
        Square::all().any(|to| is_legal(board, from, to, last))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn board(ranks: [&str; 8]) -> Board {
        Board::from_ranks(&ranks).unwrap()
    }

    #[test]
    fn test_opening_moves() {
        let b = Board::standard();
        assert!(is_legal(&b, sq("e2"), sq("e4"), None));
        assert!(is_legal(&b, sq("e2"), sq("e3"), None));
        assert!(!is_legal(&b, sq("e2"), sq("e5"), None));
        assert!(is_legal(&b, sq("g1"), sq("f3"), None));
        assert!(!is_legal(&b, sq("f1"), sq("c4"), None));
        assert!(!is_legal(&b, sq("a1"), sq("a3"), None));
        assert_eq!(legal_moves(&b, Color::White, None).len(), 20);
    }

    #[test]
    fn test_pawn_cannot_capture_forward() {
        let b = board([
            "....k...", "........", "........", "....p...", "....P...", "........", "........",
            "....K...",
        ]);
        assert!(!is_legal(&b, sq("e4"), sq("e5"), None));
        assert!(!is_legal(&b, sq("e4"), sq("d5"), None));
    }

    #[test]
    fn test_sliders_are_blocked() {
        let b = board([
            "....k...", "........", "........", "........", "........", "..p.....", "........",
            "Q...K...",
        ]);
        assert!(is_legal(&b, sq("a1"), sq("c3"), None));
        assert!(!is_legal(&b, sq("a1"), sq("d4"), None));
        assert!(is_legal(&b, sq("a1"), sq("a8"), None));
        assert!(!is_legal(&b, sq("a1"), sq("f1"), None));
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        let b = board([
            "....r..k", "........", "........", "........", "........", "........", "....B...",
            "....K...",
        ]);
        assert!(is_pseudo_legal(&b, sq("e2"), sq("d3"), None));
        assert!(!is_legal(&b, sq("e2"), sq("d3"), None));
        assert!(!is_legal(&b, sq("e1"), sq("e2"), None));
        assert!(is_legal(&b, sq("e1"), sq("d1"), None));
    }

    #[test]
    fn test_en_passant_requires_fresh_double_step() {
        let b = board([
            "....k...", "........", "........", "...pP...", "........", "........", "........",
            "....K...",
        ]);
        let double = MoveRecord {
            from: sq("d7"),
            to: sq("d5"),
            piece: Piece::new(PieceKind::Pawn, Color::Black),
            captured: None,
            en_passant: false,
            promotion: None,
        };
        let single = MoveRecord {
            from: sq("d6"),
            ..double
        };
        assert!(is_legal(&b, sq("e5"), sq("d6"), Some(&double)));
        assert!(!is_legal(&b, sq("e5"), sq("d6"), Some(&single)));
        assert!(!is_legal(&b, sq("e5"), sq("d6"), None));

        let (after, record) = apply_move(&b, sq("e5"), sq("d6"), Some(&double)).unwrap();
        assert!(record.en_passant);
        assert_eq!(record.captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));
        assert_eq!(after.get(sq("d5")), None);
        assert_eq!(after.get(sq("d6")), Some(Piece::new(PieceKind::Pawn, Color::White)));
    }

    #[test]
    fn test_promotion_to_queen() {
        let b = board([
            "....k...", "P.......", "........", "........", "........", "........", "........",
            "....K...",
        ]);
        let (after, record) = apply_move(&b, sq("a7"), sq("a8"), None).unwrap();
        assert_eq!(record.promotion, Some(PieceKind::Queen));
        assert_eq!(after.get(sq("a8")), Some(Piece::new(PieceKind::Queen, Color::White)));
        assert!(is_in_check(&after, Color::Black));
    }

    #[test]
    fn test_apply_move_leaves_source_untouched() {
        let b = Board::standard();
        let (after, _) = apply_move(&b, sq("e2"), sq("e4"), None).unwrap();
        assert_eq!(b, Board::standard());
        assert_ne!(after, b);
    }

    #[test]
    fn test_king_attacks_adjacent_squares() {
        let b = board([
            "........", "........", "........", "...k....", "........", "........", "........",
            "K.......",
        ]);
        assert!(is_square_attacked(&b, sq("e4"), Color::Black));
        assert!(!is_square_attacked(&b, sq("f4"), Color::Black));
    }
}
