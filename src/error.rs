//! Error taxonomy for the shooter.
//!
//! Game logic (movement, collisions, spawning) cannot fail.  Everything here is
//! an I/O or configuration problem and is fatal to the process.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// Config file could not be read, parsed or failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The persisted high score could not be read, parsed or written.
    #[error("high score storage '{}': {reason}", path.display())]
    HighScoreStorage { path: PathBuf, reason: String },

    /// Terminal setup, drawing or event reading failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
