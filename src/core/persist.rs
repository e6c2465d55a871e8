//! # History Persistence
//!
//! Save/load the navigation history to `~/.wayfinder/history.json` so a
//! restart lands where the user left off.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::core::config::wayfinder_dir;
use crate::core::history::NavigationState;

/// Returns `~/.wayfinder/history.json`.
pub fn history_path() -> Option<PathBuf> {
    wayfinder_dir().map(|d| d.join("history.json"))
}

/// Atomically write the state as JSON to `path` (via `.tmp` + rename).
pub fn save_history(path: &Path, state: &NavigationState) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(state).map_err(io::Error::other)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    debug!("Saved {} history entries to {}", state.routes().len(), path.display());
    Ok(())
}

/// Load a previously saved state.
///
/// A missing file is `Ok(None)`. Unparseable JSON, or a state whose index
/// does not fit its entries, is `InvalidData`.
pub fn load_history(path: &Path) -> io::Result<Option<NavigationState>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    let state: NavigationState = serde_json::from_str(&contents)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    debug!("Loaded {} history entries from {}", state.routes().len(), path.display());
    Ok(Some(state))
}
