//! Board coordinates.

use arcade_core::EngineError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A square, file `a`-`h` (0-7) and rank `1`-`8` (0-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square, or `None` if either index is off the board.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    /// File index, 0 for `a`.
    pub fn file(self) -> u8 {
        self.file
    }

    /// Rank index, 0 for rank 1.
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Square shifted by a file and rank delta, if still on the board.
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Self::new(file as u8, rank as u8)
        } else {
            None
        }
    }

    /// All 64 squares, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { file, rank }))
    }
}

impl FromStr for Square {
    type Err = EngineError;

    /// Parses algebraic notation such as `e4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if let [file @ b'a'..=b'h', rank @ b'1'..=b'8'] = bytes {
            Ok(Self {
                file: file - b'a',
                rank: rank - b'1',
            })
        } else {
            Err(EngineError::new(format!("invalid square {s:?}")))
        }
    }
}

impl TryFrom<String> for Square {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", char::from(b'a' + self.file), self.rank + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let sq: Square = "e4".parse().unwrap();
        assert_eq!((sq.file(), sq.rank()), (4, 3));
        assert_eq!(sq.to_string(), "e4");
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
    }

    #[test]
    fn test_offset_stays_on_board() {
        let h8: Square = "h8".parse().unwrap();
        assert_eq!(h8.offset(1, 0), None);
        assert_eq!(h8.offset(-1, -1), "g7".parse().ok());
    }

    #[test]
    fn test_serde_as_string() {
        let sq: Square = "b7".parse().unwrap();
        assert_eq!(serde_json::to_string(&sq).unwrap(), "\"b7\"");
        let back: Square = serde_json::from_str("\"b7\"").unwrap();
        assert_eq!(back, sq);
        assert!(serde_json::from_str::<Square>("\"z0\"").is_err());
    }

    #[test]
    fn test_all_has_64_squares() {
        assert_eq!(Square::all().count(), 64);
    }
}
