use std::io::{stdout, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use crossterm::{cursor, terminal, ExecutableCommand};

use centipede::display::{TerminalUi, Theme};
use centipede::game::Game;
use centipede::input::{spawn_input_thread, InputBuffer};
use centipede::menu::{run_start_menu, MenuLogic, StartChoice};
use centipede::persistence;
use centipede::settings::Settings;

fn home_file(name: &str) -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(name)
}

fn save_path() -> PathBuf {
    home_file(".centipede_save.json")
}

fn high_score_path() -> PathBuf {
    home_file(".centipede_score")
}

fn load_high_score() -> u32 {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(score: u32) {
    let _ = std::fs::write(high_score_path(), score.to_string());
}

/// Block until the player fires or presses the breakout key.
fn wait_for_key(input: &InputBuffer) {
    // Drop anything still buffered from the game.
    input.take_shot();
    input.take_breakout();
    loop {
        thread::sleep(Duration::from_millis(50));
        if input.take_shot() || input.take_breakout() {
            return;
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; redirect with `RUST_LOG=debug centipede 2>game.log`.
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path.as_ref())
            .with_context(|| format!("loading settings from {path}"))?,
        None => Settings::default(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let input = Arc::new(InputBuffer::new());
    spawn_input_thread(Arc::clone(&input));

    let result = run(out, Arc::clone(&input), settings);

    // Always restore the terminal.
    let mut raw_out = stdout();
    let _ = raw_out.execute(cursor::Show);
    let _ = raw_out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run(
    out: BufWriter<std::io::Stdout>,
    input: Arc<InputBuffer>,
    settings: Settings,
) -> anyhow::Result<()> {
    let theme = Theme::default();
    let ui = TerminalUi::new(out);
    let menu = MenuLogic::new(Arc::clone(&input), theme.clone());
    let mut game =
        Game::new(Arc::clone(&input), ui, menu, theme.clone()).with_save_path(save_path());
    let mut high_score = load_high_score();

    loop {
        let has_save = save_path().exists();
        let choice = run_start_menu(&mut game.ui, &input, &theme, has_save);

        let final_state = match choice {
            StartChoice::Quit => break,
            StartChoice::NewGame => game.start_new_game(settings.clone())?,
            StartChoice::Continue => {
                let state = persistence::load(&save_path()).context("loading saved game")?;
                game.resume_game(state)?
            }
        };

        if final_state.score > high_score {
            high_score = final_state.score;
            save_high_score(high_score);
        }
        wait_for_key(&input);
    }
    Ok(())
}
