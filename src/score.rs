//! Score keeping: the per-session counter and the persisted high score.
//!
//! The high score lives in a plain text file holding one decimal integer.
//! It is only ever raised, never lowered.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{GameError, Result};

/// In-memory score for the running session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    current: u32,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_enemy_destroyed(&mut self) {
        self.current = self.current.saturating_add(1);
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

/// File-backed high score.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    /// Open the store, creating the file with `0` if it does not exist yet.
    ///
    /// An existing file that cannot be read or does not hold a number is an
    /// error; the caller is expected to treat it as fatal.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };
        match fs::metadata(&store.path) {
            Ok(_) => {
                let value = store.read()?;
                tracing::info!(path = %store.path.display(), high_score = value, "loaded high score");
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    path = %store.path.display(),
                    "high score file missing, starting from 0"
                );
                store.write(0)?;
            }
            Err(e) => return Err(store.storage_error(format!("stat failed: {e}"))),
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<u32> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| self.storage_error(format!("read failed: {e}")))?;
        text.trim()
            .parse::<u32>()
            .map_err(|e| self.storage_error(format!("not a score ({:?}): {e}", text.trim())))
    }

    /// Compare `score` against the stored value, persist it if it is higher
    /// and return whichever is now on disk.
    pub fn finalize(&self, score: u32) -> Result<u32> {
        let stored = self.read()?;
        if score > stored {
            self.write(score)?;
            tracing::info!(previous = stored, high_score = score, "new high score");
            return self.read();
        }
        Ok(stored)
    }

    fn write(&self, value: u32) -> Result<()> {
        fs::write(&self.path, value.to_string())
            .map_err(|e| self.storage_error(format!("write failed: {e}")))
    }

    fn storage_error(&self, reason: String) -> GameError {
        GameError::HighScoreStorage {
            path: self.path.clone(),
            reason,
        }
    }
}
