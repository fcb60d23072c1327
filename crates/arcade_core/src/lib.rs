//! Arcade core - shared building blocks for the game rule engines.
//!
//! # Architecture
//!
//! - **Difficulty**: the four levels every game is parametrized by
//! - **Engine**: the [`GameEngine`] trait and the [`ActionOutcome`] report
//! - **Random**: shuffle and pick helpers over an explicit random source
//! - **Scoring**: time bonus and clamped score arithmetic

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod difficulty;
mod engine;
mod error;
pub mod random;
mod scoring;

// Crate-level exports - Difficulty
pub use difficulty::Difficulty;

// Crate-level exports - Engine contract
pub use engine::{ActionOutcome, GameEngine, OutcomeKind};

// Crate-level exports - Errors
pub use error::EngineError;

// Crate-level exports - Scoring
pub use scoring::{apply_delta, time_bonus};
