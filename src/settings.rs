/// Immutable game configuration.
///
/// A `Settings` value is built once (defaults or a JSON file) and never
/// changes for the lifetime of a game; every tunable the simulation reads
/// lives here so tests can shrink intervals and fields at will.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds between clock ticks.
    pub game_tick_ms: u64,
    /// Playfield width in columns.
    pub field_width: i32,
    /// Playfield height in lines (line 0 is the top).
    pub field_height: i32,

    /// The player path runs once every this many ticks (constant).
    pub starship_slowdown: u32,
    /// Centipede slowdown in round 0; shrinks as rounds pass.
    pub initial_centipede_slowdown: u32,
    /// Every this many rounds the centipede slowdown drops.
    pub centipede_speedup_round_interval: u32,
    /// How much the slowdown drops per speedup step.
    pub centipede_speedup_amount: u32,

    /// Segment count of the round-0 centipede.
    pub initial_centipede_size: u32,
    /// Every this many rounds the spawned chain grows.
    pub centipede_size_round_interval: u32,
    /// How many segments each growth step adds.
    pub centipede_size_increment: u32,

    /// Spawn cell for new chains.
    pub centipede_spawn_line: i32,
    pub centipede_spawn_column: i32,
    /// Starting cell for the starship.
    pub initial_starship_line: i32,
    pub initial_starship_column: i32,

    /// Per-cell percentage chance of seeding a mushroom on a new game.
    pub mushroom_spawn_percent: u32,
    /// Durability of a freshly grown mushroom.
    pub mushroom_durability: i32,

    pub points_centipede_hit: u32,
    pub points_mushroom_kill: u32,
    pub points_round_end: u32,

    pub initial_lives: i32,
    /// Pause after the starship is hit, before the next round starts.
    pub life_lost_break_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            game_tick_ms: 50,
            field_width: 40,
            field_height: 20,
            starship_slowdown: 1,
            initial_centipede_slowdown: 8,
            centipede_speedup_round_interval: 3,
            centipede_speedup_amount: 1,
            initial_centipede_size: 8,
            centipede_size_round_interval: 4,
            centipede_size_increment: 1,
            centipede_spawn_line: 0,
            centipede_spawn_column: 20,
            initial_starship_line: 18,
            initial_starship_column: 20,
            mushroom_spawn_percent: 8,
            mushroom_durability: 3,
            points_centipede_hit: 10,
            points_mushroom_kill: 5,
            points_round_end: 100,
            initial_lives: 3,
            life_lost_break_ms: 1200,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults on any
    /// missing field (`serde(default)` fills the gaps).
    pub fn load(path: &Path) -> Result<Settings, SettingsError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
