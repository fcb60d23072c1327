//! Property tests for quiz and crossword scoring.

use arcade_core::Difficulty;
use arcade_quiz::{
    BLOCK, calculate_crossword_score, calculate_quiz_score, is_crossword_complete,
    points_per_correct, template,
};
use proptest::prelude::*;

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::ALL.to_vec())
}

proptest! {
    /// Taking longer never raises the quiz score.
    #[test]
    fn prop_quiz_score_monotone_in_time(
        correct in 0u32..=5,
        difficulty in difficulty(),
        taken in 0u32..600,
    ) {
        let now = calculate_quiz_score(correct, difficulty, taken);
        let later = calculate_quiz_score(correct, difficulty, taken + 10);
        prop_assert!(later <= now);
        prop_assert!(now >= correct * points_per_correct(difficulty));
    }

    /// More mistakes never raise the crossword score.
    #[test]
    fn prop_crossword_score_monotone_in_mistakes(
        difficulty in difficulty(),
        taken in 0u32..600,
        mistakes in 0u32..40,
    ) {
        let score = calculate_crossword_score(difficulty, taken, mistakes);
        prop_assert!(calculate_crossword_score(difficulty, taken, mistakes + 1) <= score);
    }

    /// Changing any one open cell of a solved grid makes it incomplete.
    #[test]
    fn prop_one_wrong_letter_is_incomplete(difficulty in difficulty(), pick in any::<prop::sample::Index>()) {
        let solution = template(difficulty).solution;
        let open: Vec<(usize, usize)> = solution
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, c)| **c != BLOCK)
                    .map(move |(c, _)| (r, c))
            })
            .collect();
        let (r, c) = open[pick.index(open.len())];

        let mut user = solution.clone();
        prop_assert!(is_crossword_complete(&user, &solution));
        user[r][c] = if solution[r][c] == 'Z' { 'Y' } else { 'Z' };
        prop_assert!(!is_crossword_complete(&user, &solution));
    }
}
