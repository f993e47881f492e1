//! Game configuration
//!
//! Tunables that are not part of the level schedule. Loaded from JSON on
//! native builds; every field falls back to its default when absent.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LEVEL_COUNT, MAX_SCREEN_SIZE, SPAWN_X, SPAWN_Y, START_RESERVE};
use crate::error::ConfigError;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Display ===
    /// Physical screen width in pixels (viewport width)
    pub screen_width: i32,
    /// Physical screen height in pixels (viewport height)
    pub screen_height: i32,

    // === Actor ===
    pub character_width: i32,
    pub character_height: i32,

    // === Levels ===
    /// Number of levels in a run
    pub level_count: usize,
    /// Hard cap on obstacles per level
    pub max_obstacles: usize,
    /// Placement retries per obstacle before generation fails
    pub placement_attempts: u32,
    /// Run seed (None = pick one at startup)
    pub seed: Option<u64>,

    // === Timing (milliseconds) ===
    /// Fixed frame step
    pub frame_ms: u64,
    /// Button settle window
    pub debounce_ms: u64,
    /// How long the level-complete screen blocks input
    pub level_complete_ms: u64,
    /// How long the game-complete screen shows before restart
    pub game_complete_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // 128x64 OLED
            screen_width: 128,
            screen_height: 64,

            character_width: 5,
            character_height: 5,

            level_count: 10,
            max_obstacles: 20,
            placement_attempts: 1000,
            seed: None,

            frame_ms: 20,
            debounce_ms: 30,
            level_complete_ms: 2000,
            game_complete_ms: 3000,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the sim cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.screen_width > MAX_SCREEN_SIZE || self.screen_height > MAX_SCREEN_SIZE {
            return Err(ConfigError::Invalid(format!(
                "screen size {}x{} exceeds {}",
                self.screen_width, self.screen_height, MAX_SCREEN_SIZE
            )));
        }
        if self.character_width <= 0 || self.character_height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "character size must be positive, got {}x{}",
                self.character_width, self.character_height
            )));
        }
        // The spawn square is the only area guaranteed obstacle-free
        if self.character_width > START_RESERVE - SPAWN_X
            || self.character_height > START_RESERVE - SPAWN_Y
        {
            return Err(ConfigError::Invalid(format!(
                "character {}x{} does not fit the spawn reservation",
                self.character_width, self.character_height
            )));
        }
        if self.level_count == 0 || self.level_count > MAX_LEVEL_COUNT {
            return Err(ConfigError::Invalid(format!(
                "level_count must be in 1..={}, got {}",
                MAX_LEVEL_COUNT, self.level_count
            )));
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::Invalid("frame_ms must be at least 1".into()));
        }
        if self.placement_attempts == 0 {
            return Err(ConfigError::Invalid(
                "placement_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
