//! Mono Runner - a scrolling obstacle course for small monochrome displays
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, collisions, viewport, game phases)
//! - `input`: Debounced button state
//! - `renderer`: Display contract, scene composition and a headless framebuffer
//! - `platform`: Collaborators outside the core (buttons, network services, intro animation)
//! - `settings`: Data-driven configuration
//! - `game`: Per-frame driver tying the above together

pub mod error;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod report;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, GenerationError};
pub use game::Game;
pub use report::RunReport;
pub use settings::GameConfig;

/// Level schedule constants
pub mod consts {
    /// Level extents at index 0 (both axes)
    pub const BASE_LEVEL_SIZE: i32 = 150;
    /// Extent growth per level (both axes)
    pub const LEVEL_SIZE_GROWTH: i32 = 20;

    /// Obstacles in level 0
    pub const BASE_OBSTACLE_COUNT: usize = 3;
    /// Extra obstacles per level
    pub const OBSTACLE_COUNT_GROWTH: usize = 1;

    /// Obstacle side lengths are drawn from [MIN, MAX)
    pub const OBSTACLE_MIN_SIZE: i32 = 10;
    pub const OBSTACLE_MAX_SIZE: i32 = 30;

    /// No obstacle may start inside the top-left START_RESERVE square
    pub const START_RESERVE: i32 = 20;
    /// ...nor inside the bottom-right EXIT_RESERVE square
    pub const EXIT_RESERVE: i32 = 40;

    /// Exit zone sits this far in from the bottom-right corner
    pub const EXIT_INSET: i32 = 20;
    /// Side length of the square exit zone
    pub const EXIT_BOUNDING: i32 = 10;

    /// Largest accepted screen extent (either axis)
    pub const MAX_SCREEN_SIZE: i32 = 4096;
    /// Largest accepted level count
    pub const MAX_LEVEL_COUNT: usize = 10_000;

    /// Actor spawn point, identical for every level
    pub const SPAWN_X: i32 = 10;
    pub const SPAWN_Y: i32 = 10;
}

/// Sign of a step toward `target` (-1, 0 or 1)
#[inline]
pub fn step_toward(from: i32, target: i32) -> i32 {
    (target - from).signum()
}
