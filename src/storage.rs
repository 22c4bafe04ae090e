//! Durable per-symbol signal state
//!
//! One JSON object keyed by symbol, rewritten whole at the end of each run.
//! The file is committed next to the scheduler workflow, so writes must be
//! atomic and the layout deterministic (BTreeMap keeps key order stable).
//! Unknown symbol keys survive load/save untouched, even when no longer
//! tracked.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::StateError;
use crate::models::SignalState;

pub struct SignalStore {
    path: PathBuf,
}

impl SignalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole mapping. A missing file is an empty mapping; a file
    /// that exists but does not parse is fatal. Signal history matters more
    /// than availability, so a corrupt file is never silently replaced.
    pub fn load_all(&self) -> Result<BTreeMap<String, SignalState>, StateError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no state file yet, starting empty");
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        let states = serde_json::from_str(&raw).map_err(|source| StateError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(states)
    }

    /// Atomically rewrites the whole mapping: write a temp file in the same
    /// directory, then rename over the target. An interrupted run leaves
    /// the previous file intact.
    pub fn save_all(&self, states: &BTreeMap<String, SignalState>) -> Result<(), StateError> {
        let json = serde_json::to_string_pretty(states).map_err(StateError::Serialize)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json.as_bytes())?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(StateError::Io(e));
        }

        info!(path = %self.path.display(), entries = states.len(), "state saved");
        Ok(())
    }
}

/// The symbol's slot in the mapping, inserting the zero state on first
/// sight.
pub fn state_for<'a>(
    states: &'a mut BTreeMap<String, SignalState>,
    symbol: &str,
) -> &'a mut SignalState {
    states
        .entry(symbol.to_string())
        .or_insert_with(|| SignalState::new(symbol))
}
