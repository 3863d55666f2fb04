use std::sync::Arc;

use centipede::display::Theme;
use centipede::entities::{Direction, GameState, MushroomMap};
use centipede::game::{
    calculate_centipede_size, calculate_centipede_slowdown, lose_live, start_next_round,
    BreakoutMenu, Game, InputSource, Presenter,
};
use centipede::score::{increase_score, ScoreKind};
use centipede::settings::Settings;

use crossterm::style::Color;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    let settings = Settings::default();
    let mut state = GameState::new(settings.clone(), &mut StdRng::seed_from_u64(1));
    state.mushrooms = MushroomMap::empty(&settings);
    state
}

// ── Round formulas ───────────────────────────────────────────────────────────

#[test]
fn slowdown_formula_matches_round_six() {
    let settings = Settings {
        initial_centipede_slowdown: 5,
        centipede_speedup_round_interval: 3,
        centipede_speedup_amount: 1,
        ..Settings::default()
    };
    assert_eq!(calculate_centipede_slowdown(&settings, 6), 3);
}

#[test]
fn slowdown_floors_at_one() {
    let settings = Settings {
        initial_centipede_slowdown: 5,
        centipede_speedup_round_interval: 1,
        centipede_speedup_amount: 2,
        ..Settings::default()
    };
    assert_eq!(calculate_centipede_slowdown(&settings, 50), 1);
}

#[test]
fn size_formula_matches_round_nine() {
    let settings = Settings {
        initial_centipede_size: 10,
        centipede_size_round_interval: 4,
        centipede_size_increment: 2,
        ..Settings::default()
    };
    assert_eq!(calculate_centipede_size(&settings, 9), 14);
}

// ── Round start ──────────────────────────────────────────────────────────────

#[test]
fn round_start_spawns_one_chain_and_updates_pace() {
    let mut state = make_state();
    state.died_this_round = true;
    let mut rng = StdRng::seed_from_u64(7);

    start_next_round(&mut state, &mut rng);

    assert_eq!(state.round, 1);
    assert!(!state.died_this_round);
    assert_eq!(state.centipedes.len(), 1);
    let chain = &state.centipedes[0];
    assert_eq!(
        chain.segments.len() as u32,
        calculate_centipede_size(&state.settings, 1)
    );
    assert_eq!(
        chain.head().line,
        state.settings.centipede_spawn_line
    );
    assert_eq!(
        state.centipede_slowdown,
        calculate_centipede_slowdown(&state.settings, 1)
    );
}

#[test]
fn tick_counter_is_not_reset_by_round_start() {
    let mut state = make_state();
    state.tick = 1234;
    start_next_round(&mut state, &mut StdRng::seed_from_u64(7));
    assert_eq!(state.tick, 1234);
}

// ── Life loss ────────────────────────────────────────────────────────────────

#[test]
fn lose_live_decrements_and_clears_chains() {
    let mut state = make_state();
    start_next_round(&mut state, &mut StdRng::seed_from_u64(7));
    let before = state.lives();

    lose_live(&mut state);

    assert_eq!(state.lives(), before - 1);
    assert!(state.died_this_round);
    assert!(state.centipedes.is_empty());
}

// ── Scoring ──────────────────────────────────────────────────────────────────

#[test]
fn score_deltas_come_from_settings() {
    let mut state = make_state();
    increase_score(&mut state, ScoreKind::CentipedeHit);
    increase_score(&mut state, ScoreKind::MushroomKill);
    increase_score(&mut state, ScoreKind::RoundEnd);
    let s = &state.settings;
    assert_eq!(
        state.score,
        s.points_centipede_hit + s.points_mushroom_kill + s.points_round_end
    );
}

#[test]
fn score_saturates_at_the_counter_limit() {
    let mut state = make_state();
    state.score = u32::MAX - 1;
    increase_score(&mut state, ScoreKind::RoundEnd);
    assert_eq!(state.score, u32::MAX);
}

proptest! {
    /// Final score depends only on event counts, never on ordering.
    #[test]
    fn score_is_order_independent(events in proptest::collection::vec(0u8..3, 0..200)) {
        let mut state = make_state();
        let mut kills = 0u32;
        let mut hits = 0u32;
        let mut rounds = 0u32;
        for &e in &events {
            match e {
                0 => { increase_score(&mut state, ScoreKind::MushroomKill); kills += 1; }
                1 => { increase_score(&mut state, ScoreKind::CentipedeHit); hits += 1; }
                _ => { increase_score(&mut state, ScoreKind::RoundEnd); rounds += 1; }
            }
        }
        let s = &state.settings;
        prop_assert_eq!(
            state.score,
            kills * s.points_mushroom_kill
                + hits * s.points_centipede_hit
                + rounds * s.points_round_end
        );
    }
}

// ── Full game run with stub collaborators ────────────────────────────────────

/// Requests the breakout menu on the first tick; never moves or shoots.
struct QuitInput {
    asked: bool,
}

impl InputSource for QuitInput {
    fn consume_shot(&mut self) -> bool {
        false
    }
    fn consume_direction(&mut self) -> Direction {
        Direction::None
    }
    fn consume_breakout(&mut self) -> bool {
        !std::mem::replace(&mut self.asked, true)
    }
}

#[derive(Default)]
struct RecordingUi {
    frames: usize,
    menus: Vec<String>,
}

impl Presenter for RecordingUi {
    fn render_frame(&mut self, _state: &GameState, _theme: &Theme) {
        self.frames += 1;
    }
    fn render_menu(
        &mut self,
        title: &str,
        _colour: Color,
        _body: &[String],
        _options: &[String],
        _selected: Option<usize>,
        _theme: &Theme,
    ) {
        self.menus.push(title.to_string());
    }
}

/// Always chooses Quit.
struct QuitMenu;

impl BreakoutMenu for QuitMenu {
    fn run_breakout_menu(&mut self, _ui: &mut dyn Presenter, _delay: &mut dyn FnMut()) -> bool {
        false
    }
}

#[test]
fn quitting_from_the_breakout_menu_drains_lives_to_game_over() {
    let settings = Settings {
        game_tick_ms: 1,
        life_lost_break_ms: 0,
        initial_lives: 3,
        ..Settings::default()
    };
    let mut game = Game::new(
        QuitInput { asked: false },
        RecordingUi::default(),
        QuitMenu,
        Theme::default(),
    );

    let final_state = game.start_new_game(settings).expect("clock starts once");

    assert_eq!(final_state.lives(), 0);
    assert!(final_state.died_this_round);
    assert!(final_state.centipedes.is_empty());
    assert_eq!(final_state.round, 1);
    assert!(game.ui.frames >= 1);
    assert_eq!(game.ui.menus, vec!["Game Over".to_string()]);
}

#[test]
fn games_can_be_played_back_to_back() {
    // The clock joins at game over, so a second game must start cleanly.
    let settings = Settings {
        game_tick_ms: 1,
        life_lost_break_ms: 0,
        initial_lives: 1,
        ..Settings::default()
    };
    let mut game = Game::new(
        QuitInput { asked: false },
        RecordingUi::default(),
        QuitMenu,
        Theme::default(),
    );

    game.start_new_game(settings.clone()).expect("first game");
    game.input.asked = false;
    game.start_new_game(settings).expect("second game");
    assert_eq!(game.ui.menus.len(), 2);
}
