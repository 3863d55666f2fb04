/// Game-state snapshots on disk, JSON via serde.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::entities::GameState;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub fn save(state: &GameState, path: &Path) -> Result<(), PersistError> {
    let raw = serde_json::to_string(state)?;
    fs::write(path, raw)?;
    Ok(())
}

pub fn load(path: &Path) -> Result<GameState, PersistError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
