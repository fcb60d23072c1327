//! Engine error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Error raised for malformed game data or fixtures, with location tracking.
///
/// Invalid moves are not errors of this kind. They are reported through each
/// game's own rejection type and never abort a session.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Engine error: {} at {}:{}", message, file, line)]
pub struct EngineError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<strum::ParseError> for EngineError {
    #[track_caller]
    fn from(err: strum::ParseError) -> Self {
        Self::new(format!("Parse error: {}", err))
    }
}
