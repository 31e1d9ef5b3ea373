//! Game configuration.
//!
//! All geometry is expressed in logical pixels on an 800×600 canvas; the
//! renderer scales it to whatever terminal it finds.  Every field has a
//! default so a TOML override file only needs the keys it changes.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{GameError, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub screen_width: i32,
    pub screen_height: i32,
    pub fps: u32,

    pub player_width: i32,
    pub player_height: i32,
    /// Distance from the bottom edge to the player's top row.
    pub player_bottom_offset: i32,
    pub player_velocity: i32,

    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_velocity: i32,
    pub max_bullets: usize,

    pub enemy_width: i32,
    pub enemy_height: i32,
    pub enemy_velocity: i32,
    pub max_enemies: usize,
    /// Enemies spawn with `y` in `[0, screen_height - spawn_band_margin]`.
    pub spawn_band_margin: i32,

    pub game_over_pause_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Space Invaders Original!".into(),
            screen_width: 800,
            screen_height: 600,
            fps: 60,
            player_width: 64,
            player_height: 64,
            player_bottom_offset: 100,
            player_velocity: 5,
            bullet_width: 13,
            bullet_height: 15,
            bullet_velocity: 5,
            max_bullets: 3,
            enemy_width: 64,
            enemy_height: 64,
            enemy_velocity: 2,
            max_enemies: 10,
            spawn_band_margin: 400,
            game_over_pause_ms: 2000,
        }
    }
}

impl GameConfig {
    /// Read a TOML file and validate it.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("read {}: {e}", path.display())))?;
        let cfg: Self = toml::from_str(&data)
            .map_err(|e| GameError::Config(format!("parse {}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject geometry the game loop cannot honour.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if self.screen_width <= 0 || self.screen_height <= 0 {
            problems.push("screen dimensions must be > 0".to_string());
        }
        if self.fps == 0 {
            problems.push("fps must be > 0".to_string());
        }
        for (name, w, h) in [
            ("player", self.player_width, self.player_height),
            ("bullet", self.bullet_width, self.bullet_height),
            ("enemy", self.enemy_width, self.enemy_height),
        ] {
            if w <= 0 || h <= 0 {
                problems.push(format!("{name} size must be > 0"));
            }
        }
        if self.player_width > self.screen_width {
            problems.push("player is wider than the screen".to_string());
        }
        if self.enemy_width > self.screen_width {
            problems.push("enemy is wider than the screen".to_string());
        }
        if self.spawn_band_margin < 0 || self.spawn_band_margin > self.screen_height {
            problems.push(format!(
                "spawn_band_margin must be in [0, {}]",
                self.screen_height
            ));
        }
        if self.player_bottom_offset <= 0 || self.player_bottom_offset > self.screen_height {
            problems.push(format!(
                "player_bottom_offset must be in [1, {}]",
                self.screen_height
            ));
        }
        if self.player_velocity < 0 || self.bullet_velocity <= 0 || self.enemy_velocity <= 0 {
            problems.push("velocities must be positive".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(GameError::Config(problems.join("; ")))
        }
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    pub fn game_over_pause(&self) -> Duration {
        Duration::from_millis(self.game_over_pause_ms)
    }

    /// Largest `y` an enemy may spawn at.
    pub fn spawn_band_bottom(&self) -> i32 {
        self.screen_height - self.spawn_band_margin
    }

    pub fn player_max_x(&self) -> i32 {
        self.screen_width - self.player_width
    }
}

