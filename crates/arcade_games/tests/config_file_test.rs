//! Config files on disk feeding sessions.

use arcade_core::Difficulty;
use arcade_core::random::rng_from;
use arcade_games::{ArcadeConfig, GameKind, Session};
use arcade_matching::MismatchRule;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(
        r#"
        difficulty = "extreme"
        seed = 42

        [matching]
        rule = "penalized"

        [tictactoe]
        simulation_games = 7
        "#,
    );
    let config = ArcadeConfig::load(Some(file.path())).unwrap();
    assert_eq!(*config.difficulty(), Difficulty::Extreme);
    assert_eq!(*config.seed(), Some(42));
    assert_eq!(*config.matching().rule(), MismatchRule::Penalized);
    assert_eq!(*config.tictactoe().simulation_games(), 7);
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ArcadeConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_overrides_replace_file_values() {
    let file = write_config("difficulty = \"easy\"\nseed = 1\n");
    let config = ArcadeConfig::load(Some(file.path()))
        .unwrap()
        .with_difficulty(Difficulty::Hard)
        .with_seed(9);
    assert_eq!(*config.difficulty(), Difficulty::Hard);
    assert_eq!(*config.seed(), Some(9));
}

#[test]
fn test_same_seed_deals_same_session() {
    let file = write_config("seed = 2024\n");
    let config = ArcadeConfig::load(Some(file.path())).unwrap();

    let deal = || {
        let mut rng = rng_from(*config.seed());
        match Session::start(GameKind::ColorGrid, *config.difficulty(), &config, &mut rng) {
            Session::Matching(game) => game.grid().clone(),
            other => panic!("expected a matching session, got {:?}", other.kind()),
        }
    };
    assert_eq!(deal(), deal());
}
