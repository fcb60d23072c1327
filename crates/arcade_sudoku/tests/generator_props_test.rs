//! Property tests for Sudoku generation and carving.

use arcade_core::Difficulty;
use arcade_core::random::seeded_rng;
use arcade_sudoku::{
    all_cells, carve_puzzle, cells_to_remove, count_solutions, generate_solved,
    is_valid_placement, solve,
};
use proptest::prelude::*;

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Every cell of a generated grid is a valid placement of its own digit.
    #[test]
    fn prop_generated_grid_is_valid(seed in any::<u64>()) {
        let grid = generate_solved(&mut seeded_rng(seed));
        prop_assert!(grid.is_full());
        for (r, c) in all_cells() {
            let digit = grid.get(r, c).unwrap();
            prop_assert!(is_valid_placement(&grid, r, c, digit));
        }
    }

    /// Carved puzzles have exactly one solution, and it is the source grid.
    #[test]
    fn prop_carved_puzzle_is_unique(seed in any::<u64>(), difficulty in difficulty()) {
        let mut rng = seeded_rng(seed);
        let solved = generate_solved(&mut rng);
        let carved = carve_puzzle(&solved, difficulty, &mut rng);

        prop_assert_eq!(count_solutions(&carved.puzzle, 2), 1);
        prop_assert_eq!(solve(&carved.puzzle), Some(solved));
        prop_assert!(carved.removed <= cells_to_remove(difficulty));
        prop_assert_eq!(carved.puzzle.empty_cells().len(), carved.removed);
    }
}

#[test]
fn test_lower_difficulties_reach_target() {
    let mut rng = seeded_rng(17);
    for difficulty in [Difficulty::Easy, Difficulty::Medium] {
        let solved = generate_solved(&mut rng);
        let carved = carve_puzzle(&solved, difficulty, &mut rng);
        assert_eq!(carved.removed, cells_to_remove(difficulty));
        assert!(!carved.is_short());
    }
}
