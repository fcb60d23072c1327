//! The contract between a rule engine and the session driving it.
//!
//! The collaborator starts a game, forwards discrete user actions and clock
//! ticks, and persists the result once an outcome reports `terminal`. Engines
//! never block on input and never own storage.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// What happened as a result of one action or tick.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutcomeKind {
    /// First half of a pair selected, waiting for the second.
    Pending,
    /// Action applied with nothing further to report.
    Accepted,
    /// Two selected cells matched.
    Matched,
    /// Two selected cells did not match.
    Mismatched,
    /// Quiz answer was right.
    Correct,
    /// Quiz answer was wrong, or a letter/digit disagreed with the solution.
    Incorrect,
    /// Input was rejected (already matched, given cell, pair pending, ...).
    Invalid,
    /// Move breaks the rules of the game.
    Illegal,
    /// The time budget ran out.
    TimedOut,
    /// The puzzle or board reached a terminal state through play.
    Completed,
}

impl OutcomeKind {
    /// Returns true for rejections, which never mutate the session.
    pub fn is_rejection(self) -> bool {
        matches!(self, OutcomeKind::Invalid | OutcomeKind::Illegal)
    }
}

/// Per-action report handed back to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// What happened.
    pub kind: OutcomeKind,
    /// Change in score caused by the action (may be negative).
    pub delta_score: i32,
    /// Whether the game is over.
    pub terminal: bool,
    /// Winner label for two-sided games (`"x"`, `"white"`, `"draw"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    /// Human-readable detail, such as the reason for a rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ActionOutcome {
    /// Creates a non-terminal outcome with no score change.
    pub fn new(kind: OutcomeKind) -> Self {
        Self {
            kind,
            delta_score: 0,
            terminal: false,
            winner: None,
            detail: None,
        }
    }

    /// Creates a rejection carrying the reason.
    #[instrument(skip(reason))]
    pub fn rejected(kind: OutcomeKind, reason: impl ToString) -> Self {
        Self::new(kind).with_detail(reason)
    }

    /// Sets the score change.
    pub fn with_delta(mut self, delta_score: i32) -> Self {
        self.delta_score = delta_score;
        self
    }

    /// Sets the terminal flag.
    pub fn with_terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    /// Sets the winner label.
    pub fn with_winner(mut self, winner: impl ToString) -> Self {
        self.winner = Some(winner.to_string());
        self
    }

    /// Sets the detail message.
    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}

/// A rule engine that a session can drive.
pub trait GameEngine {
    /// The discrete user input this game accepts.
    type Action;

    /// Applies one user action. Rejections come back as outcomes, not panics.
    fn apply_action(&mut self, action: Self::Action) -> ActionOutcome;

    /// Advances the game clock. Returns an outcome only when the tick changes
    /// the game state (a time-out).
    fn tick(&mut self, _seconds: u32) -> Option<ActionOutcome> {
        None
    }

    /// Points accumulated so far.
    fn score(&self) -> u32;

    /// Whether the game accepts no further input.
    fn is_terminal(&self) -> bool;
}
