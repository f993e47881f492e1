//! Deterministic simulation module
//!
//! Level generation, collisions, camera and the phase machine. Given the
//! same seed and the same input per frame, a run replays exactly: levels come
//! from per-level seeded RNGs, obstacles are checked in generation order, and
//! nothing here touches the display or the platform.

pub mod autopilot;
pub mod collision;
pub mod level;
pub mod state;
pub mod tick;
pub mod viewport;

pub use autopilot::Autopilot;
pub use collision::{in_exit_zone, is_blocked};
pub use level::{Level, Obstacle, ShapeKind, generate_level, generate_levels};
pub use state::{Actor, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use viewport::Viewport;
