//! Difficulty levels shared by every game.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Difficulty of a round.
///
/// Each game maps a difficulty onto its own parameters (grid size, time
/// limit, search depth, base score). The enum itself carries no data.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Small grids, long timers, random AI.
    Easy,
    /// The default level.
    #[default]
    Medium,
    /// Larger grids and a searching AI.
    Hard,
    /// Largest grids, shortest timers, full-depth search.
    Extreme,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    /// Looks up a difficulty by its lowercase key.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not one of `easy`, `medium`, `hard`, `extreme`.
    /// Use [`str::parse`] when the key comes from user input.
    #[track_caller]
    #[instrument]
    pub fn from_key(key: &str) -> Self {
        match key.parse() {
            Ok(difficulty) => difficulty,
            Err(_) => panic!("malformed difficulty key: {key:?}"),
        }
    }

    /// Picks the entry for this difficulty from an easy..extreme table.
    pub fn pick<T: Copy>(self, table: [T; 4]) -> T {
        match self {
            Difficulty::Easy => table[0],
            Difficulty::Medium => table[1],
            Difficulty::Hard => table[2],
            Difficulty::Extreme => table[3],
        }
    }

    /// Returns the lowercase key (`"medium"`).
    pub fn key(self) -> &'static str {
        self.into()
    }
}
