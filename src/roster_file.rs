use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::Player;

/// Reads players from a JSON array, keeping file order
pub fn load_players<P: AsRef<Path>>(path: P) -> Result<Vec<Player>> {
    let path = path.as_ref();
    let players: Vec<Player> = read_json(path)?;

    info!("Loaded {} players from {}", players.len(), path.display());
    Ok(players)
}

pub fn save_players<P: AsRef<Path>>(path: P, players: &[Player]) -> Result<()> {
    let path = path.as_ref();
    write_json(path, players)?;

    info!("Saved {} players to {}", players.len(), path.display());
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file {}", path.display()))?;

    serde_json::from_str(&json).with_context(|| {
        format!(
            "Failed to parse JSON from {:?}. First 200 chars: {}",
            path,
            json.chars().take(200).collect::<String>()
        )
    })
}
