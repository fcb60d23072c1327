//! Arcade games - one entry point for every rule engine.
//!
//! # Architecture
//!
//! - **Config**: [`ArcadeConfig`] loaded from TOML
//! - **Session**: [`Session`] wraps any game behind one [`Action`] type
//! - **Script**: [`run_script`] drives a session from JSON lines
//!
//! The game crates are re-exported so a collaborator needs one dependency.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
mod script;
mod session;

pub use config::{ArcadeConfig, ConfigError};
pub use script::{ScriptSummary, run_script};
pub use session::{Action, GameKind, Session, Step};

pub use arcade_chess;
pub use arcade_core;
pub use arcade_matching;
pub use arcade_quiz;
pub use arcade_sudoku;
pub use arcade_tictactoe;
