/// Round loop and lifecycle control.
///
/// `Game` owns the collaborators (input, presentation, breakout menu) and
/// drives the whole state machine: round start, the tick loop, life loss,
/// round end, game over. All game-state mutation happens on the caller's
/// thread; the clock thread only sleeps, raises the tick signal, and reads
/// the shared lives counter.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::style::Color;
use rand::Rng;

use crate::clock::{ClockError, GameClock, Signal};
use crate::collision;
use crate::display::Theme;
use crate::entities::{CentipedeChain, ChainDirection, Direction, GameState, Position};
use crate::movement;
use crate::persistence;
use crate::scheduler::PathScheduler;
use crate::score::{increase_score, ScoreKind};
use crate::settings::Settings;

// ── Collaborator contracts ───────────────────────────────────────────────────

/// Buffered player input. Each `consume_*` atomically reads and clears the
/// corresponding flag.
pub trait InputSource {
    fn consume_shot(&mut self) -> bool;
    fn consume_direction(&mut self) -> Direction;
    fn consume_breakout(&mut self) -> bool;
}

/// Presentation layer. Calls are infallible from the core's point of view;
/// implementations deal with their own I/O failures.
pub trait Presenter {
    fn render_frame(&mut self, state: &GameState, theme: &Theme);
    fn render_menu(
        &mut self,
        title: &str,
        colour: Color,
        body: &[String],
        options: &[String],
        selected: Option<usize>,
        theme: &Theme,
    );
}

/// The pause overlay. Returns true to resume play, false to quit the game.
pub trait BreakoutMenu {
    fn run_breakout_menu(&mut self, ui: &mut dyn Presenter, delay: &mut dyn FnMut()) -> bool;
}

// ── Lifecycle transitions ────────────────────────────────────────────────────

/// Centipede-path slowdown for a round, floored at 1 so modulo gating stays
/// defined however far the game goes.
pub fn calculate_centipede_slowdown(settings: &Settings, round: u32) -> u32 {
    let speedups = round / settings.centipede_speedup_round_interval;
    settings
        .initial_centipede_slowdown
        .saturating_sub(speedups * settings.centipede_speedup_amount)
        .max(1)
}

/// Segment count of the chain spawned for a round.
pub fn calculate_centipede_size(settings: &Settings, round: u32) -> u32 {
    let increments = round / settings.centipede_size_round_interval;
    settings.initial_centipede_size + increments * settings.centipede_size_increment
}

/// Advance to the next round: bump the round counter, recompute the
/// centipede slowdown and size, spawn one chain at the configured cell with
/// a 50/50 random initial direction, and clear the died-this-round flag.
pub fn start_next_round(state: &mut GameState, rng: &mut impl Rng) {
    state.round += 1;
    state.centipede_slowdown = calculate_centipede_slowdown(&state.settings, state.round);
    let size = calculate_centipede_size(&state.settings, state.round);
    let direction = if rng.gen_bool(0.5) {
        ChainDirection::Left
    } else {
        ChainDirection::Right
    };
    let spawn = Position::new(
        state.settings.centipede_spawn_line,
        state.settings.centipede_spawn_column,
    );
    state.centipedes.push(CentipedeChain::spawn(spawn, direction, size));
    state.died_this_round = false;
}

/// Take one life, remember the death for round-end scoring, and clear every
/// chain — which ends the running round on its next continuation check.
pub fn lose_live(state: &mut GameState) {
    state.lives.fetch_sub(1, std::sync::atomic::Ordering::AcqRel);
    state.died_this_round = true;
    state.centipedes.clear();
    log::info!("life lost, {} remaining", state.lives());
}

// ── Orchestrator ─────────────────────────────────────────────────────────────

pub struct Game<I, P, M> {
    pub input: I,
    pub ui: P,
    pub menu: M,
    pub theme: Theme,
    clock: GameClock,
    save_path: Option<PathBuf>,
}

impl<I: InputSource, P: Presenter, M: BreakoutMenu> Game<I, P, M> {
    pub fn new(input: I, ui: P, menu: M, theme: Theme) -> Game<I, P, M> {
        Game {
            input,
            ui,
            menu,
            theme,
            clock: GameClock::new(),
            save_path: None,
        }
    }

    /// Snapshot the game state to this path at every round start.
    pub fn with_save_path(mut self, path: PathBuf) -> Game<I, P, M> {
        self.save_path = Some(path);
        self
    }

    /// Run a fresh game; blocks until game over and returns the final state.
    pub fn start_new_game(&mut self, settings: Settings) -> Result<GameState, ClockError> {
        let mut rng = rand::thread_rng();
        let mut state = GameState::new(settings, &mut rng);
        self.game_loop(&mut state, &mut rng)?;
        Ok(state)
    }

    /// Pick up a previously saved state; blocks until game over.
    pub fn resume_game(&mut self, mut state: GameState) -> Result<GameState, ClockError> {
        let mut rng = rand::thread_rng();
        self.game_loop(&mut state, &mut rng)?;
        Ok(state)
    }

    fn game_loop(&mut self, state: &mut GameState, rng: &mut impl Rng) -> Result<(), ClockError> {
        let signal = self
            .clock
            .start(state.settings.game_tick_ms, Arc::clone(&state.lives))?;

        while state.alive() {
            start_next_round(state, rng);
            log::info!(
                "round {} started: slowdown {}, chain size {}",
                state.round,
                state.centipede_slowdown,
                state.centipedes.last().map_or(0, |c| c.segments.len())
            );
            self.autosave(state);

            while state.alive() && !state.centipedes.is_empty() {
                state.tick += 1;
                signal.wait();
                self.run_tick(state);
                self.ui.render_frame(state, &self.theme);
                self.break_game_if_requested(state, &signal);
            }

            if !state.died_this_round {
                increase_score(state, ScoreKind::RoundEnd);
            } else {
                // Give the player a breather after losing the starship.
                thread::sleep(Duration::from_millis(state.settings.life_lost_break_ms));
            }
        }

        self.clock.join();
        log::info!("game over at round {}, final score {}", state.round, state.score);
        self.present_game_over(state);
        Ok(())
    }

    /// One simulation step. Movement always finishes before collision
    /// checks, and the collision path runs whenever either movement path
    /// did.
    fn run_tick(&mut self, state: &mut GameState) {
        let scheduler = PathScheduler::new(state.settings.starship_slowdown, state.centipede_slowdown);

        if scheduler.starship_due(state.tick) {
            if self.input.consume_shot() {
                movement::spawn_bullet(state);
            }
            movement::move_bullets(state);
            collision::collide_bullets_mushrooms(state);
            let direction = self.input.consume_direction();
            movement::move_starship(state, direction);
        }

        if scheduler.centipede_due(state.tick) {
            movement::move_centipedes(state);
        }

        if scheduler.collision_due(state.tick) {
            collision::collide_bullets_centipedes(state);
            let rammed = collision::collide_centipedes_starship(state);
            for _ in 0..rammed {
                lose_live(state);
            }
        }
    }

    fn break_game_if_requested(&mut self, state: &mut GameState, signal: &Arc<Signal>) {
        if !self.input.consume_breakout() {
            return;
        }
        let resume = self
            .menu
            .run_breakout_menu(&mut self.ui, &mut || signal.wait());
        if resume {
            return;
        }
        // Quit: drain the remaining lives so the loop falls through to the
        // game-over transition.
        while state.alive() {
            lose_live(state);
        }
    }

    fn autosave(&mut self, state: &GameState) {
        if let Some(path) = &self.save_path {
            if let Err(e) = persistence::save(state, path) {
                log::warn!("autosave to {} failed: {e}", path.display());
            }
        }
    }

    fn present_game_over(&mut self, state: &GameState) {
        let body = vec![format!("Your score was {}", state.score)];
        self.ui
            .render_menu("Game Over", Color::Red, &body, &[], None, &self.theme);
    }
}
