//! A chess game: turn order, history and end-of-game detection.

use crate::board::Board;
use crate::piece::Color;
use crate::rules::{self, MoveRecord};
use crate::square::Square;
use arcade_core::{ActionOutcome, Difficulty, GameEngine, OutcomeKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Points for delivering checkmate.
pub fn checkmate_points(difficulty: Difficulty) -> u32 {
    difficulty.pick([50, 100, 150, 200])
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum ChessStatus {
    /// The side to move has legal moves.
    InProgress,
    /// The side to move is in check with no legal move.
    Checkmate {
        /// Side that delivered mate.
        winner: Color,
    },
    /// The side to move is not in check and has no legal move.
    Stalemate,
}

impl ChessStatus {
    /// True once no further moves are accepted.
    pub fn is_over(self) -> bool {
        !matches!(self, ChessStatus::InProgress)
    }
}

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Checkmate or stalemate already reached.
    #[display("Game is already over")]
    GameOver,
    /// Nothing stands on the origin square.
    #[display("No piece on {}", _0)]
    NoPiece(Square),
    /// The piece belongs to the side not on move.
    #[display("Piece on {} belongs to {}, but {} is to move", _0, _1, _2)]
    NotYourTurn(Square, Color, Color),
    /// The piece cannot reach the destination.
    #[display("Illegal move {} to {}", _0, _1)]
    Illegal(Square, Square),
    /// The move would leave the mover's own king attacked.
    #[display("Move {} to {} leaves the king in check", _0, _1)]
    KingInCheck(Square, Square),
}

impl std::error::Error for MoveError {}

/// Outcome of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// What was played.
    pub record: MoveRecord,
    /// Whether the opponent is now in check.
    pub check: bool,
    /// Game status after the move.
    pub status: ChessStatus,
    /// Points awarded by this move.
    pub points: u32,
}

/// A move request for the uniform engine interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessMove {
    /// Origin square, e.g. `"e2"`.
    pub from: Square,
    /// Destination square, e.g. `"e4"`.
    pub to: Square,
}

/// A game of chess between two local players.
///
/// No castling; pawns always promote to queens; en passant is inferred
/// from the previous move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessGame {
    board: Board,
    to_move: Color,
    history: Vec<MoveRecord>,
    status: ChessStatus,
    difficulty: Difficulty,
    score: u32,
}

impl ChessGame {
    /// Starts from the standard position, white to move.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::from_position(Board::standard(), Color::White, difficulty)
    }

    /// Starts from an arbitrary position.
    #[instrument(skip(board))]
    pub fn from_position(board: Board, to_move: Color, difficulty: Difficulty) -> Self {
        let mut game = Self {
            board,
            to_move,
            history: Vec::new(),
            status: ChessStatus::InProgress,
            difficulty,
            score: 0,
        };
        game.status = game.evaluate();
        game
    }

    /// Current placement.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side on move.
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Moves played so far.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Current status.
    pub fn status(&self) -> ChessStatus {
        self.status
    }

    /// Difficulty the game was started at.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Whether the side on move may play `from` to `to`.
    pub fn is_valid_move(&self, from: Square, to: Square) -> bool {
        self.check_move(from, to).is_ok()
    }

    fn check_move(&self, from: Square, to: Square) -> Result<(), MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        let piece = self.board.get(from).ok_or(MoveError::NoPiece(from))?;
        if piece.color != self.to_move {
            return Err(MoveError::NotYourTurn(from, piece.color, self.to_move));
        }
        if !rules::is_pseudo_legal(&self.board, from, to, self.last_move()) {
            return Err(MoveError::Illegal(from, to));
        }
        if !rules::is_legal(&self.board, from, to, self.last_move()) {
            return Err(MoveError::KingInCheck(from, to));
        }
        Ok(())
    }

    /// Plays a move for the side on move.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveReport, MoveError> {
        self.check_move(from, to)?;
        let (board, record) = rules::apply_move(&self.board, from, to, self.last_move())
            .ok_or(MoveError::NoPiece(from))?;

        self.board = board;
        self.history.push(record);
        self.to_move = self.to_move.opponent();
        self.status = self.evaluate();

        let check = self.is_in_check(self.to_move);
        let points = match self.status {
            ChessStatus::Checkmate { winner } => {
                let points = checkmate_points(self.difficulty);
                self.score += points;
                info!(%winner, points, "Checkmate");
                points
            }
            ChessStatus::Stalemate => {
                info!("Stalemate");
                0
            }
            ChessStatus::InProgress => 0,
        };
        debug!(%from, %to, check, "Move played");

        Ok(MoveReport {
            record,
            check,
            status: self.status,
            points,
        })
    }

    /// Whether `color`'s king is attacked on the current board.
    pub fn is_in_check(&self, color: Color) -> bool {
        rules::is_in_check(&self.board, color)
    }

    /// Whether the side on move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.to_move) && !self.has_any_move()
    }

    /// Whether the side on move is stalemated.
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check(self.to_move) && !self.has_any_move()
    }

    /// Every legal move for the side on move.
    pub fn legal_moves(&self) -> Vec<(Square, Square)> {
        rules::legal_moves(&self.board, self.to_move, self.last_move())
    }

    fn has_any_move(&self) -> bool {
        rules::has_legal_move(&self.board, self.to_move, self.last_move())
    }

    fn evaluate(&self) -> ChessStatus {
        if self.has_any_move() {
            ChessStatus::InProgress
        } else if self.is_in_check(self.to_move) {
            ChessStatus::Checkmate {
                winner: self.to_move.opponent(),
            }
        } else {
            ChessStatus::Stalemate
        }
    }
}

impl GameEngine for ChessGame {
    type Action = ChessMove;

    fn apply_action(&mut self, action: ChessMove) -> ActionOutcome {
        match self.make_move(action.from, action.to) {
            Ok(report) => {
                let suffix = if report.check { "+" } else { "" };
                let detail = format!("{}{}{}", action.from, action.to, suffix);
                match report.status {
                    ChessStatus::InProgress => {
                        ActionOutcome::new(OutcomeKind::Accepted).with_detail(detail)
                    }
                    ChessStatus::Checkmate { winner } => ActionOutcome::new(OutcomeKind::Completed)
                        .with_delta(report.points as i32)
                        .with_terminal(true)
                        .with_winner(winner)
                        .with_detail(detail),
                    ChessStatus::Stalemate => ActionOutcome::new(OutcomeKind::Completed)
                        .with_terminal(true)
                        .with_winner("draw")
                        .with_detail(detail),
                }
            }
            Err(MoveError::GameOver) => {
                ActionOutcome::rejected(OutcomeKind::Invalid, MoveError::GameOver)
                    .with_terminal(true)
            }
            Err(e @ MoveError::NoPiece(_)) | Err(e @ MoveError::NotYourTurn(..)) => {
                ActionOutcome::rejected(OutcomeKind::Invalid, e)
            }
            Err(e) => ActionOutcome::rejected(OutcomeKind::Illegal, e),
        }
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_terminal(&self) -> bool {
        self.status.is_over()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Piece, PieceKind};

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn play(game: &mut ChessGame, from: &str, to: &str) -> MoveReport {
        game.make_move(sq(from), sq(to)).unwrap()
    }

    #[test]
    fn test_fools_mate() {
        let mut game = ChessGame::new(Difficulty::Medium);
        play(&mut game, "f2", "f3");
        play(&mut game, "e7", "e5");
        play(&mut game, "g2", "g4");
        let report = play(&mut game, "d8", "h4");

        assert!(report.check);
        assert_eq!(report.status, ChessStatus::Checkmate { winner: Color::Black });
        assert_eq!(report.points, 100);
        assert!(game.is_checkmate());
        assert!(!game.is_stalemate());
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.make_move(sq("a2"), sq("a3")), Err(MoveError::GameOver));
    }

    #[test]
    fn test_back_rank_mate() {
        let board = Board::from_ranks(&[
            "......k.", ".....ppp", "........", "........", "........", "........", "........",
            "R.....K.",
        ])
        .unwrap();
        let mut game = ChessGame::from_position(board, Color::White, Difficulty::Hard);
        let report = play(&mut game, "a1", "a8");
        assert_eq!(report.status, ChessStatus::Checkmate { winner: Color::White });
        assert_eq!(game.score(), 150);
    }

    #[test]
    fn test_stalemate() {
        let board = Board::from_ranks(&[
            "k.......", ".......Q", "........", "........", "........", "........", "........",
            "....K...",
        ])
        .unwrap();
        let mut game = ChessGame::from_position(board, Color::White, Difficulty::Easy);
        let report = play(&mut game, "h7", "c7");
        assert!(!report.check);
        assert_eq!(report.status, ChessStatus::Stalemate);
        assert!(game.is_stalemate());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_turn_order_and_errors() {
        let mut game = ChessGame::new(Difficulty::Easy);
        assert_eq!(
            game.make_move(sq("e7"), sq("e5")),
            Err(MoveError::NotYourTurn(sq("e7"), Color::Black, Color::White))
        );
        assert_eq!(game.make_move(sq("e4"), sq("e5")), Err(MoveError::NoPiece(sq("e4"))));
        assert_eq!(
            game.make_move(sq("e2"), sq("e5")),
            Err(MoveError::Illegal(sq("e2"), sq("e5")))
        );
        assert!(game.history().is_empty());
        assert_eq!(game.to_move(), Color::White);
    }

    #[test]
    fn test_self_check_rejected() {
        let board = Board::from_ranks(&[
            "....r..k", "........", "........", "........", "........", "........", "....B...",
            "....K...",
        ])
        .unwrap();
        let mut game = ChessGame::from_position(board, Color::White, Difficulty::Easy);
        assert_eq!(
            game.make_move(sq("e2"), sq("d3")),
            Err(MoveError::KingInCheck(sq("e2"), sq("d3")))
        );
        assert!(!game.is_valid_move(sq("e2"), sq("d3")));
        assert!(game.is_valid_move(sq("e2"), sq("e3")));
    }

    #[test]
    fn test_en_passant_in_play() {
        let mut game = ChessGame::new(Difficulty::Easy);
        play(&mut game, "e2", "e4");
        play(&mut game, "a7", "a6");
        play(&mut game, "e4", "e5");
        play(&mut game, "d7", "d5");
        let report = play(&mut game, "e5", "d6");
        assert!(report.record.en_passant);
        assert_eq!(game.board().get(sq("d5")), None);
        assert_eq!(game.history().len(), 5);
    }

    #[test]
    fn test_en_passant_expires() {
        let mut game = ChessGame::new(Difficulty::Easy);
        play(&mut game, "e2", "e4");
        play(&mut game, "a7", "a6");
        play(&mut game, "e4", "e5");
        play(&mut game, "d7", "d5");
        play(&mut game, "h2", "h3");
        play(&mut game, "h7", "h6");
        assert!(!game.is_valid_move(sq("e5"), sq("d6")));
    }

    #[test]
    fn test_promotion_through_engine() {
        let board = Board::from_ranks(&[
            "........", "P......k", "........", "........", "........", "........", "........",
            "....K...",
        ])
        .unwrap();
        let mut game = ChessGame::from_position(board, Color::White, Difficulty::Easy);
        let outcome = game.apply_action(ChessMove {
            from: sq("a7"),
            to: sq("a8"),
        });
        assert_eq!(outcome.kind, OutcomeKind::Accepted);
        assert_eq!(
            game.board().get(sq("a8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
    }

    #[test]
    fn test_engine_maps_errors() {
        let mut game = ChessGame::new(Difficulty::Easy);
        let outcome = game.apply_action(ChessMove {
            from: sq("e2"),
            to: sq("e5"),
        });
        assert_eq!(outcome.kind, OutcomeKind::Illegal);
        assert!(!outcome.terminal);

        let outcome = game.apply_action(ChessMove {
            from: sq("d4"),
            to: sq("d5"),
        });
        assert_eq!(outcome.kind, OutcomeKind::Invalid);
    }

    #[test]
    fn test_checkmate_points_scale() {
        assert_eq!(checkmate_points(Difficulty::Easy), 50);
        assert_eq!(checkmate_points(Difficulty::Extreme), 200);
    }

    #[test]
    fn test_chess_move_from_json() {
        let mv: ChessMove = serde_json::from_str(r#"{"from":"g1","to":"f3"}"#).unwrap();
        assert_eq!(mv.to, sq("f3"));
    }
}
