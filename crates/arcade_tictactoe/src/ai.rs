//! Computer opponent for tic-tac-toe.
//!
//! - easy: a uniformly random legal square
//! - medium: win, else block, else centre, else a random corner, else random
//! - hard/extreme: minimax with alpha-beta pruning
//!
//! Minimax scores a win found at ply `d` as `10 - d` and a loss as `d - 10`,
//! so faster wins and slower losses are preferred. Ties go to the lowest
//! board index, which makes the searching levels reproducible.

use crate::rules::{check_winner, is_full, winning_square};
use crate::{Board, Game, GameStatus, Move, Player, Position};
use arcade_core::{Difficulty, random};
use rand::Rng;
use tracing::{debug, instrument};

/// Search depth in plies for the searching difficulties.
///
/// Hard looks 8 plies ahead. Once the opening mark is down that reaches the
/// end of every line, but on an empty board it stops one ply short and scores
/// a win or loss on the ninth mark as a draw. Extreme searches the whole tree
/// from any position.
pub fn search_depth(difficulty: Difficulty) -> Option<i32> {
    match difficulty {
        Difficulty::Easy | Difficulty::Medium => None,
        Difficulty::Hard => Some(8),
        Difficulty::Extreme => Some(9),
    }
}

/// Chooses a move for `player`, or `None` if the board has no free square.
#[instrument(skip(board, rng), fields(board = %board.display().replace('\n', " ")))]
pub fn choose_move<R: Rng>(
    board: &Board,
    player: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Position> {
    let choice = match search_depth(difficulty) {
        Some(depth) => best_move(board, player, depth),
        None if difficulty == Difficulty::Medium => heuristic_move(board, player, rng),
        None => random_move(board, rng),
    };
    debug!(?choice, %difficulty, "AI chose move");
    choice
}

/// Picks any free square uniformly at random.
pub fn random_move<R: Rng>(board: &Board, rng: &mut R) -> Option<Position> {
    random::choose(&board.free_positions(), rng).copied()
}

/// Rule-based move: win, block, centre, corner, anything.
pub fn heuristic_move<R: Rng>(board: &Board, player: Player, rng: &mut R) -> Option<Position> {
    if let Some(pos) = winning_square(board, player) {
        return Some(pos);
    }
    if let Some(pos) = winning_square(board, player.opponent()) {
        return Some(pos);
    }
    if board.is_empty(Position::Center) {
        return Some(Position::Center);
    }
    let corners: Vec<Position> = Position::CORNERS
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect();
    if let Some(pos) = random::choose(&corners, rng) {
        return Some(*pos);
    }
    random_move(board, rng)
}

/// Minimax with alpha-beta pruning, cut off after `max_depth` plies.
pub fn best_move(board: &Board, player: Player, max_depth: i32) -> Option<Position> {
    let mut best: Option<(Position, i32)> = None;
    let mut alpha = i32::MIN;

    for pos in board.free_positions() {
        let next = board.with_mark(pos, player);
        let score = minimax(&next, player.opponent(), player, 1, max_depth, alpha, i32::MAX);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
            alpha = alpha.max(score);
        }
    }

    best.map(|(pos, _)| pos)
}

fn minimax(
    board: &Board,
    to_move: Player,
    me: Player,
    depth: i32,
    max_depth: i32,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if let Some(winner) = check_winner(board) {
        return if winner == me { 10 - depth } else { depth - 10 };
    }
    if is_full(board) || depth >= max_depth {
        return 0;
    }

    let maximizing = to_move == me;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for pos in board.free_positions() {
        let next = board.with_mark(pos, to_move);
        let score = minimax(&next, to_move.opponent(), me, depth + 1, max_depth, alpha, beta);
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if beta <= alpha {
            break;
        }
    }

    best
}

/// Plays a whole game between two AIs and returns the final status.
#[instrument(skip(rng))]
pub fn play_out<R: Rng>(x_level: Difficulty, o_level: Difficulty, rng: &mut R) -> GameStatus {
    let mut game = Game::new();
    while !game.status().is_over() {
        let player = game.to_move();
        let level = match player {
            Player::X => x_level,
            Player::O => o_level,
        };
        let Some(pos) = choose_move(game.board(), player, level, rng) else {
            break;
        };
        if game.make_move(Move::new(player, pos)).is_err() {
            break;
        }
    }
    game.status()
}
