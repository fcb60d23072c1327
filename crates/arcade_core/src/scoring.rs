//! Scoring helpers shared by the timed games.

use tracing::instrument;

/// Points granted for unused time: one point per full ten seconds left.
///
/// Negative remaining time (an overrun) earns nothing.
#[instrument]
pub fn time_bonus(remaining_secs: i64) -> u32 {
    u32::try_from(remaining_secs.max(0) / 10).unwrap_or(u32::MAX)
}

/// Applies a signed delta to a score, saturating at zero.
///
/// Returns the new score and the delta that was actually applied.
pub fn apply_delta(score: u32, delta: i32) -> (u32, i32) {
    let updated = if delta >= 0 {
        score.saturating_add(delta.unsigned_abs())
    } else {
        score.saturating_sub(delta.unsigned_abs())
    };
    let applied = i64::from(updated) - i64::from(score);
    (updated, applied as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_bonus_floors() {
        assert_eq!(time_bonus(50), 5);
        assert_eq!(time_bonus(59), 5);
        assert_eq!(time_bonus(9), 0);
    }

    #[test]
    fn test_time_bonus_clamps_overrun() {
        assert_eq!(time_bonus(-40), 0);
    }

    #[test]
    fn test_apply_delta_clamps_at_zero() {
        assert_eq!(apply_delta(2, -5), (0, -2));
        assert_eq!(apply_delta(10, -3), (7, -3));
        assert_eq!(apply_delta(10, 15), (25, 15));
    }
}
