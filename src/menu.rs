/// Menus: the breakout (pause) overlay reachable mid-round and the start
/// menu shown between games. Both draw through the `Presenter` and read the
/// shared input buffer.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::style::Color;

use crate::display::Theme;
use crate::entities::Direction;
use crate::game::{BreakoutMenu, Presenter};
use crate::input::InputBuffer;

/// Polling interval for menus that run without the game clock.
const MENU_POLL_MS: u64 = 50;

pub struct MenuLogic {
    input: Arc<InputBuffer>,
    theme: Theme,
}

impl MenuLogic {
    pub fn new(input: Arc<InputBuffer>, theme: Theme) -> MenuLogic {
        MenuLogic { input, theme }
    }
}

impl BreakoutMenu for MenuLogic {
    /// Suspend play until the player picks Resume (true) or Quit (false).
    /// `delay` is supplied by the round loop and waits on the game clock, so
    /// the menu polls at tick rate and ticking stays suspended.
    fn run_breakout_menu(&mut self, ui: &mut dyn Presenter, delay: &mut dyn FnMut()) -> bool {
        let options = ["Resume".to_string(), "Quit".to_string()];
        let body = ["↑↓ select, SPACE confirm".to_string()];
        let mut selected = 0usize;
        loop {
            ui.render_menu(
                "Paused",
                Color::Cyan,
                &body,
                &options,
                Some(selected),
                &self.theme,
            );
            delay();

            // A second breakout press resumes directly.
            if self.input.take_breakout() {
                return true;
            }
            match self.input.take_direction() {
                Direction::Up => selected = selected.saturating_sub(1),
                Direction::Down => selected = (selected + 1).min(options.len() - 1),
                _ => {}
            }
            if self.input.take_shot() {
                return selected == 0;
            }
        }
    }
}

// ── Start menu ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartChoice {
    NewGame,
    Continue,
    Quit,
}

/// Blocking start menu; `has_save` adds the Continue entry. Runs without the
/// game clock, so it sleeps between input polls.
pub fn run_start_menu(
    ui: &mut impl Presenter,
    input: &InputBuffer,
    theme: &Theme,
    has_save: bool,
) -> StartChoice {
    let mut options = vec!["New Game".to_string()];
    if has_save {
        options.push("Continue".to_string());
    }
    options.push("Quit".to_string());
    let choices: Vec<StartChoice> = if has_save {
        vec![StartChoice::NewGame, StartChoice::Continue, StartChoice::Quit]
    } else {
        vec![StartChoice::NewGame, StartChoice::Quit]
    };
    let body = ["↑↓ select, SPACE confirm".to_string()];
    let mut selected = 0usize;

    loop {
        ui.render_menu(
            "☘  CENTIPEDE  ☘",
            Color::Green,
            &body,
            &options,
            Some(selected),
            theme,
        );
        thread::sleep(Duration::from_millis(MENU_POLL_MS));

        if input.take_breakout() {
            return StartChoice::Quit;
        }
        match input.take_direction() {
            Direction::Up => selected = selected.saturating_sub(1),
            Direction::Down => selected = (selected + 1).min(options.len() - 1),
            _ => {}
        }
        if input.take_shot() {
            return choices[selected];
        }
    }
}
