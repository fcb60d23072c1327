//! Drives whole sessions through the JSON-lines script runner.

use arcade_core::random::seeded_rng;
use arcade_core::{ActionOutcome, Difficulty, OutcomeKind};
use arcade_games::{ArcadeConfig, GameKind, Session, run_script};
use std::io::Cursor;

fn run(kind: GameKind, difficulty: Difficulty, script: &str) -> (Session, Vec<ActionOutcome>) {
    let config = ArcadeConfig::default();
    let mut session = Session::start(kind, difficulty, &config, &mut seeded_rng(11));
    let mut output = Vec::new();
    run_script(&mut session, Cursor::new(script), &mut output).unwrap();
    let outcomes = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (session, outcomes)
}

#[test]
fn test_crossword_script_scores_with_bonus_and_mistake() {
    let script = r#"
# easy grid: CAT / A#O / RAN
{"tick":100}
{"act":{"game":"crossword","input":{"op":"enter","row":0,"col":0,"letter":"c"}}}
{"act":{"game":"crossword","input":{"op":"enter","row":0,"col":1,"letter":"a"}}}
{"act":{"game":"crossword","input":{"op":"enter","row":0,"col":2,"letter":"x"}}}
{"act":{"game":"crossword","input":{"op":"enter","row":0,"col":2,"letter":"t"}}}
{"act":{"game":"crossword","input":{"op":"enter","row":1,"col":1,"letter":"z"}}}
{"act":{"game":"crossword","input":{"op":"enter","row":1,"col":0,"letter":"a"}}}
{"act":{"game":"crossword","input":{"op":"enter","row":1,"col":2,"letter":"o"}}}
{"act":{"game":"crossword","input":{"op":"enter","row":2,"col":0,"letter":"r"}}}
{"act":{"game":"crossword","input":{"op":"enter","row":2,"col":1,"letter":"a"}}}
{"act":{"game":"crossword","input":{"op":"enter","row":2,"col":2,"letter":"n"}}}
"#;
    let (session, outcomes) = run(GameKind::Crossword, Difficulty::Easy, script);

    // The tick does not time out, so it writes nothing.
    assert_eq!(outcomes.len(), 10);
    assert_eq!(outcomes[2].kind, OutcomeKind::Incorrect);
    assert_eq!(outcomes[4].kind, OutcomeKind::Invalid);
    assert!(!outcomes[4].terminal);

    let last = outcomes.last().unwrap();
    assert_eq!(last.kind, OutcomeKind::Completed);
    assert!(last.terminal);
    // 100 base + 20 for 200 seconds left - 10 for one mistake
    assert_eq!(last.delta_score, 110);
    assert_eq!(session.score(), 110);
    assert!(session.is_terminal());
}

#[test]
fn test_chess_script_reaches_fools_mate() {
    let script = r#"
{"act":{"game":"chess","input":{"from":"f2","to":"f3"}}}
{"act":{"game":"chess","input":{"from":"e7","to":"e5"}}}
{"act":{"game":"chess","input":{"from":"g2","to":"g4"}}}
{"act":{"game":"chess","input":{"from":"d8","to":"h4"}}}
{"act":{"game":"chess","input":{"from":"a2","to":"a3"}}}
"#;
    let (session, outcomes) = run(GameKind::Chess, Difficulty::Easy, script);

    assert_eq!(outcomes.len(), 5);
    let mate = &outcomes[3];
    assert_eq!(mate.kind, OutcomeKind::Completed);
    assert_eq!(mate.winner.as_deref(), Some("black"));
    assert_eq!(mate.delta_score, 50);
    assert!(mate.terminal);

    // Moves after the mate are refused.
    assert!(outcomes[4].kind.is_rejection());
    assert!(outcomes[4].terminal);
    assert_eq!(session.score(), 50);
}

#[test]
fn test_quiz_times_out_on_tick() {
    let script = r#"
{"tick":120}
{"tick":180}
{"act":{"game":"quiz","input":{"choice":0}}}
"#;
    let (session, outcomes) = run(GameKind::Quiz, Difficulty::Medium, script);

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].kind, OutcomeKind::TimedOut);
    assert!(outcomes[0].terminal);
    assert!(outcomes[1].kind.is_rejection());
    assert_eq!(session.score(), 0);
}

#[test]
fn test_mismatched_game_is_rejected_in_script() {
    let script = r#"{"act":{"game":"tic_tac_toe","input":"center"}}"#;
    let (session, outcomes) = run(GameKind::Sudoku, Difficulty::Easy, script);

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].kind, OutcomeKind::Invalid);
    assert!(!session.is_terminal());
}

#[test]
fn test_tic_tac_toe_script_gets_computer_replies() {
    let script = r#"
{"act":{"game":"tic_tac_toe","input":"center"}}
{"act":{"game":"tic_tac_toe","input":"center"}}
"#;
    let (_, outcomes) = run(GameKind::TicTacToe, Difficulty::Extreme, script);

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].kind, OutcomeKind::Accepted);
    // The centre is now taken.
    assert!(outcomes[1].kind.is_rejection());
}

#[test]
fn test_bad_line_reports_line_number() {
    let config = ArcadeConfig::default();
    let mut session = Session::start(GameKind::Chess, Difficulty::Easy, &config, &mut seeded_rng(3));
    let script = "# header\n\n{\"tick\": \"soon\"}\n";
    let error = run_script(&mut session, Cursor::new(script), Vec::new()).unwrap_err();
    assert!(error.message.contains("line 3"), "{}", error.message);
}

#[test]
fn test_out_of_range_cells_are_rejected_not_fatal() {
    let cases = [
        (GameKind::NumberGrid, r#"{"act":{"game":"matching","input":{"op":"select","index":999}}}"#),
        (
            GameKind::Sudoku,
            r#"{"act":{"game":"sudoku","input":{"op":"place","row":9,"col":0,"digit":5}}}"#,
        ),
        (
            GameKind::Crossword,
            r#"{"act":{"game":"crossword","input":{"op":"enter","row":7,"col":7,"letter":"a"}}}"#,
        ),
    ];
    for (kind, line) in cases {
        let script = format!("{line}\n{line}\n");
        let (session, outcomes) = run(kind, Difficulty::Easy, &script);
        assert_eq!(outcomes.len(), 2, "{kind}");
        for outcome in &outcomes {
            assert_eq!(outcome.kind, OutcomeKind::Invalid, "{kind}");
            assert!(!outcome.terminal, "{kind}");
        }
        assert_eq!(session.score(), 0, "{kind}");
        assert!(!session.is_terminal(), "{kind}");
    }
}
