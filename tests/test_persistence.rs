use std::path::PathBuf;

use centipede::entities::{Bullet, CentipedeChain, ChainDirection, GameState, Position};
use centipede::persistence;
use centipede::settings::Settings;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn snapshot_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("centipede-test-{}-{}.json", name, std::process::id()))
}

#[test]
fn snapshot_round_trips() {
    let mut state = GameState::new(Settings::default(), &mut StdRng::seed_from_u64(3));
    state.tick = 421;
    state.round = 4;
    state.score = 1234;
    state.centipede_slowdown = 6;
    state.bullets.push(Bullet { position: Position::new(9, 9) });
    state
        .centipedes
        .push(CentipedeChain::spawn(Position::new(0, 20), ChainDirection::Left, 5));

    let path = snapshot_path("roundtrip");
    persistence::save(&state, &path).expect("save");
    let loaded = persistence::load(&path).expect("load");
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.tick, 421);
    assert_eq!(loaded.round, 4);
    assert_eq!(loaded.score, 1234);
    assert_eq!(loaded.centipede_slowdown, 6);
    assert_eq!(loaded.lives(), state.lives());
    assert_eq!(loaded.bullets, state.bullets);
    assert_eq!(loaded.centipedes, state.centipedes);
    assert_eq!(loaded.mushrooms, state.mushrooms);
    assert_eq!(loaded.starship, state.starship);
    assert_eq!(loaded.settings, state.settings);
}

#[test]
fn loaded_lives_counter_is_an_independent_atomic() {
    let state = GameState::new(Settings::default(), &mut StdRng::seed_from_u64(3));
    let path = snapshot_path("atomic");
    persistence::save(&state, &path).expect("save");
    let loaded = persistence::load(&path).expect("load");
    let _ = std::fs::remove_file(&path);

    loaded
        .lives
        .store(0, std::sync::atomic::Ordering::Release);
    // The original game's counter is untouched.
    assert!(state.alive());
}

#[test]
fn loading_a_missing_file_is_an_error() {
    let path = snapshot_path("missing");
    assert!(persistence::load(&path).is_err());
}
