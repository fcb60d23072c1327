//! Driving a session from JSON lines.

use crate::session::{Session, Step};
use arcade_core::EngineError;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument};

/// Totals after a script has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScriptSummary {
    /// Steps read, excluding blank and comment lines.
    pub steps: usize,
    /// Outcomes written.
    pub outcomes: usize,
    /// Final session score.
    pub score: u32,
    /// Whether the game ended.
    pub terminal: bool,
}

/// Reads one [`Step`] per line and writes one JSON outcome per line.
///
/// Blank lines and lines starting with `#` are skipped. Ticks that do not
/// end the game produce no output. A line that fails to parse stops the
/// script with an error naming the line number.
#[instrument(skip_all, fields(kind = %session.kind()))]
pub fn run_script(
    session: &mut Session,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<ScriptSummary, EngineError> {
    let mut steps = 0;
    let mut outcomes = 0;
    for (number, line) in input.lines().enumerate() {
        let line = line.map_err(|e| EngineError::new(format!("Failed to read script: {}", e)))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step: Step = serde_json::from_str(line).map_err(|e| {
            EngineError::new(format!("Bad step on line {}: {}", number + 1, e))
        })?;
        steps += 1;
        debug!(line = number + 1, ?step, "Applying step");

        if let Some(outcome) = session.step(step) {
            let json = serde_json::to_string(&outcome)
                .map_err(|e| EngineError::new(format!("Failed to encode outcome: {}", e)))?;
            writeln!(output, "{json}")
                .map_err(|e| EngineError::new(format!("Failed to write outcome: {}", e)))?;
            outcomes += 1;
        }
    }

    let summary = ScriptSummary {
        steps,
        outcomes,
        score: session.score(),
        terminal: session.is_terminal(),
    };
    info!(?summary, "Script finished");
    Ok(summary)
}
