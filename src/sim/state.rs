//! Game state and core simulation types
//!
//! Levels are generated once per run and held in order; the front level is
//! the one being played and is dropped as soon as the player advances.

use std::collections::VecDeque;

use glam::IVec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{Level, generate_levels};
use super::viewport::Viewport;
use crate::error::GenerationError;
use crate::report::RunReport;
use crate::settings::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Splash screen, waiting for any button
    Idle,
    /// Active gameplay
    Playing,
    /// Level cleared, showing the time (input blocked)
    LevelComplete,
    /// All levels cleared, restart pending
    GameComplete,
}

/// Something the platform layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Idle -> Playing
    GameStarted,
    /// A tentative move was rejected by an obstacle
    Blocked,
    /// Viewport clamping pushed the actor back
    BoundaryHit,
    LevelCompleted { level: usize, elapsed_ms: u64 },
    LevelStarted { level: usize },
    GameCompleted { total_ms: u64 },
    /// Full reset with freshly generated levels
    Restarted { seed: u64 },
}

/// The player-controlled rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner in level coordinates
    pub pos: IVec2,
    pub size: IVec2,
}

impl Actor {
    pub fn new(pos: IVec2, size: IVec2) -> Self {
        Self { pos, size }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub phase: GamePhase,
    /// 0-based index of the level being played
    pub level_index: usize,
    /// Remaining levels; front is the current one
    pub(super) levels: VecDeque<Level>,
    pub actor: Actor,
    pub viewport: Viewport,
    /// Time spent in the current level
    pub elapsed_ms: u64,
    /// Remaining time in a timed phase (LevelComplete / GameComplete)
    pub phase_timer_ms: u64,
    /// Per-level times for this run
    pub report: RunReport,
    /// Source of restart seeds
    rng: Pcg32,
}

impl GameState {
    /// Create a new run, generating every level up front
    pub fn new(seed: u64, config: GameConfig) -> Result<Self, GenerationError> {
        let levels = generate_levels(seed, &config)?;
        Ok(Self::from_levels(seed, config, levels))
    }

    /// Create a run around prebuilt levels
    pub fn from_levels(seed: u64, config: GameConfig, levels: Vec<Level>) -> Self {
        let spawn = levels.first().map(|l| l.spawn).unwrap_or_default();
        let actor_size = IVec2::new(config.character_width, config.character_height);
        let viewport = Viewport::new(config.screen_width, config.screen_height);
        Self {
            seed,
            phase: GamePhase::Idle,
            level_index: 0,
            levels: levels.into(),
            actor: Actor::new(spawn, actor_size),
            viewport,
            elapsed_ms: 0,
            phase_timer_ms: 0,
            report: RunReport::new(),
            rng: Pcg32::seed_from_u64(seed),
            config,
        }
    }

    /// The level being played (None once every level has been released)
    pub fn level(&self) -> Option<&Level> {
        self.levels.front()
    }

    /// Levels not yet released, including the current one
    pub fn levels_remaining(&self) -> usize {
        self.levels.len()
    }

    /// True if another level follows the current one
    pub fn has_next_level(&self) -> bool {
        self.levels.len() > 1
    }

    /// Drop the current level and move to the next one.
    /// Returns false if there was no next level.
    pub fn advance_level(&mut self) -> bool {
        if !self.has_next_level() {
            return false;
        }
        self.levels.pop_front();
        self.level_index += 1;
        self.elapsed_ms = 0;
        self.viewport.reset();
        if let Some(level) = self.levels.front() {
            self.actor.pos = level.spawn;
        }
        log::info!("Level {} started", self.level_index + 1);
        true
    }

    /// Start a fresh run as if the process had restarted
    pub fn restart(&mut self) -> Result<u64, GenerationError> {
        let seed = self.rng.next_u64();
        let config = self.config.clone();
        let rng = self.rng.clone();
        *self = Self::new(seed, config)?;
        // Keep drawing restart seeds from the same stream
        self.rng = rng;
        log::info!("Restarted with seed {}", seed);
        Ok(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> GameConfig {
        GameConfig {
            level_count: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(7, small_config()).unwrap();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.levels_remaining(), 3);
        assert_eq!(state.actor.pos, IVec2::new(10, 10));
        assert_eq!(state.actor.size, IVec2::new(5, 5));
        assert_eq!(state.level().unwrap().width, 150);
    }

    #[test]
    fn test_advance_releases_level() {
        let mut state = GameState::new(7, small_config()).unwrap();
        state.actor.pos = IVec2::new(100, 100);
        state.viewport.origin = IVec2::new(20, 30);
        state.elapsed_ms = 5000;

        assert!(state.advance_level());
        assert_eq!(state.level_index, 1);
        assert_eq!(state.levels_remaining(), 2);
        assert_eq!(state.level().unwrap().index, 1);
        assert_eq!(state.level().unwrap().width, 170);
        assert_eq!(state.actor.pos, IVec2::new(10, 10));
        assert_eq!(state.viewport.origin, IVec2::ZERO);
        assert_eq!(state.elapsed_ms, 0);

        assert!(state.advance_level());
        assert!(!state.advance_level());
        assert_eq!(state.level_index, 2);
    }

    #[test]
    fn test_restart_regenerates() {
        let mut state = GameState::new(7, small_config()).unwrap();
        state.advance_level();
        state.phase = GamePhase::GameComplete;

        let seed = state.restart().unwrap();
        assert_eq!(state.seed, seed);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.levels_remaining(), 3);

        // Restart seeds keep changing
        let next = state.restart().unwrap();
        assert_ne!(seed, next);
    }
}
