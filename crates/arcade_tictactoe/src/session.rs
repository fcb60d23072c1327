//! Single-player session against the computer.

use crate::ai::choose_move;
use crate::{Board, Game, GameStatus, Move, MoveError, Player, Position};
use arcade_core::{ActionOutcome, Difficulty, GameEngine, OutcomeKind};
use rand::rngs::StdRng;
use tracing::{info, instrument, warn};

/// Points for beating the computer at each difficulty.
pub fn win_points(difficulty: Difficulty) -> u32 {
    difficulty.pick([10, 20, 50, 100])
}

/// Points for a draw: half the win award.
pub fn draw_points(difficulty: Difficulty) -> u32 {
    win_points(difficulty) / 2
}

/// What one user move led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// The user's move.
    pub user_move: Move,
    /// The computer's reply, absent if the user's move ended the game.
    pub reply: Option<Move>,
    /// Status after both moves.
    pub status: GameStatus,
    /// Points awarded by this turn.
    pub points: u32,
}

/// A user playing one mark against the computer.
#[derive(Debug, Clone)]
pub struct TicTacToeSession {
    game: Game,
    user: Player,
    difficulty: Difficulty,
    score: u32,
    rng: StdRng,
}

impl TicTacToeSession {
    /// Starts a session. If the computer owns X it opens immediately.
    #[instrument(skip(rng))]
    pub fn new(difficulty: Difficulty, user: Player, rng: StdRng) -> Self {
        let mut session = Self {
            game: Game::new(),
            user,
            difficulty,
            score: 0,
            rng,
        };
        if user == Player::O {
            session.computer_reply();
        }
        info!(%difficulty, %user, "Tic-tac-toe session started");
        session
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.game.board()
    }

    /// Returns the underlying game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the user's mark.
    pub fn user(&self) -> Player {
        self.user
    }

    /// Returns the session difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Plays the user's move and the computer's reply.
    #[instrument(skip(self), fields(difficulty = %self.difficulty))]
    pub fn play(&mut self, position: Position) -> Result<Turn, MoveError> {
        let user_move = Move::new(self.user, position);
        self.game.make_move(user_move)?;

        let reply = if self.game.status().is_over() {
            None
        } else {
            self.computer_reply()
        };

        let status = self.game.status();
        let points = match status {
            GameStatus::Won(winner) if winner == self.user => win_points(self.difficulty),
            GameStatus::Draw => draw_points(self.difficulty),
            _ => 0,
        };
        self.score += points;
        if status.is_over() {
            info!(?status, points, "Tic-tac-toe session finished");
        }

        Ok(Turn {
            user_move,
            reply,
            status,
            points,
        })
    }

    fn computer_reply(&mut self) -> Option<Move> {
        let computer = self.user.opponent();
        let pos = choose_move(self.game.board(), computer, self.difficulty, &mut self.rng)?;
        let reply = Move::new(computer, pos);
        match self.game.make_move(reply) {
            Ok(_) => Some(reply),
            Err(error) => {
                warn!(%error, "Computer produced an unplayable move");
                None
            }
        }
    }
}

impl GameEngine for TicTacToeSession {
    type Action = Position;

    fn apply_action(&mut self, action: Position) -> ActionOutcome {
        let turn = match self.play(action) {
            Ok(turn) => turn,
            Err(MoveError::GameOver) => {
                return ActionOutcome::rejected(OutcomeKind::Invalid, MoveError::GameOver)
                    .with_terminal(true);
            }
            Err(error) => return ActionOutcome::rejected(OutcomeKind::Illegal, error),
        };

        let detail = match turn.reply {
            Some(reply) => format!("computer played {}", reply.position),
            None => "no reply".to_string(),
        };
        let outcome = match turn.status {
            GameStatus::InProgress => ActionOutcome::new(OutcomeKind::Accepted),
            GameStatus::Won(winner) => ActionOutcome::new(OutcomeKind::Completed)
                .with_terminal(true)
                .with_winner(winner),
            GameStatus::Draw => ActionOutcome::new(OutcomeKind::Completed)
                .with_terminal(true)
                .with_winner("draw"),
        };
        outcome.with_delta(turn.points as i32).with_detail(detail)
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_terminal(&self) -> bool {
        self.game.status().is_over()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::random::seeded_rng;

    #[test]
    fn test_computer_opens_when_user_is_o() {
        let session = TicTacToeSession::new(Difficulty::Hard, Player::O, seeded_rng(1));
        assert_eq!(session.board().count(Player::X), 1);
        assert_eq!(session.game().to_move(), Player::O);
    }

    #[test]
    fn test_play_gets_reply() {
        let mut session = TicTacToeSession::new(Difficulty::Medium, Player::X, seeded_rng(2));
        let turn = session.play(Position::TopLeft).unwrap();
        assert!(turn.reply.is_some());
        assert_eq!(turn.status, GameStatus::InProgress);
        assert_eq!(session.board().count(Player::O), 1);
    }

    #[test]
    fn test_occupied_square_is_illegal_outcome() {
        let mut session = TicTacToeSession::new(Difficulty::Hard, Player::X, seeded_rng(3));
        session.apply_action(Position::Center);
        let outcome = session.apply_action(Position::Center);
        assert_eq!(outcome.kind, OutcomeKind::Illegal);
        assert_eq!(outcome.delta_score, 0);
        assert!(!outcome.terminal);
    }

    #[test]
    fn test_hard_computer_never_loses() {
        // Perfect play from the computer: the user can at best draw.
        let mut session = TicTacToeSession::new(Difficulty::Hard, Player::X, seeded_rng(4));
        while !session.is_terminal() {
            let pos = session.board().free_positions()[0];
            session.apply_action(pos);
        }
        assert_ne!(session.game().status(), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_draw_awards_half_points() {
        assert_eq!(draw_points(Difficulty::Extreme), 50);
        assert_eq!(win_points(Difficulty::Easy), 10);
    }
}
