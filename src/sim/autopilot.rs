//! Demo mode - steers the actor toward the exit
//!
//! Greedy: take the best unblocked step toward the exit. When every step
//! that makes progress is blocked, commit to a sideways detour for a few
//! frames to slide around the obstacle.

use glam::IVec2;

use super::collision::is_blocked;
use super::level::Level;
use super::state::{GamePhase, GameState};
use super::tick::TickInput;
use crate::step_toward;

/// Frames to keep following a detour before retrying the direct route
const DETOUR_FRAMES: u32 = 20;

/// All eight unit steps
const DIRECTIONS: [IVec2; 8] = [
    IVec2::new(1, 0),
    IVec2::new(1, 1),
    IVec2::new(0, 1),
    IVec2::new(-1, 1),
    IVec2::new(-1, 0),
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
];

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    detour: Option<IVec2>,
    detour_frames: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buttons to hold this frame
    pub fn steer(&mut self, state: &GameState) -> TickInput {
        match state.phase {
            // Any press starts the game
            GamePhase::Idle => TickInput::from_direction(IVec2::X),
            GamePhase::Playing => match state.level() {
                Some(level) => TickInput::from_direction(self.next_step(state, level)),
                None => TickInput::default(),
            },
            GamePhase::LevelComplete | GamePhase::GameComplete => {
                self.detour = None;
                TickInput::default()
            }
        }
    }

    fn next_step(&mut self, state: &GameState, level: &Level) -> IVec2 {
        let pos = state.actor.pos;
        let size = state.actor.size;
        let free = |dir: IVec2| {
            let next = pos + dir;
            next.x >= 0
                && next.y >= 0
                && next.x + size.x <= level.width
                && next.y + size.y <= level.height
                && !is_blocked(level, next, size)
        };

        if let Some(dir) = self.detour {
            if self.detour_frames > 0 && free(dir) {
                self.detour_frames -= 1;
                return dir;
            }
            self.detour = None;
        }

        let target = level.exit + IVec2::splat(level.exit_bounding / 2);
        let toward = IVec2::new(step_toward(pos.x, target.x), step_toward(pos.y, target.y));

        let direct = [toward, IVec2::new(toward.x, 0), IVec2::new(0, toward.y)];
        if let Some(dir) = direct.into_iter().find(|&d| d != IVec2::ZERO && free(d)) {
            return dir;
        }

        // Stuck: best remaining direction by alignment with the target
        let mut options = DIRECTIONS;
        options.sort_by_key(|d| -d.dot(toward));
        match options.into_iter().find(|&d| d.dot(toward) <= 0 && free(d)) {
            Some(dir) => {
                log::debug!("Autopilot detour {:?} at {:?}", dir, pos);
                self.detour = Some(dir);
                self.detour_frames = DETOUR_FRAMES;
                dir
            }
            None => IVec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::level::{Obstacle, ShapeKind};
    use crate::sim::tick;

    fn run(state: &mut GameState, frames: usize) -> bool {
        let mut pilot = Autopilot::new();
        for _ in 0..frames {
            let input = pilot.steer(state);
            tick(state, &input, 20).unwrap();
            if state.phase == GamePhase::LevelComplete {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_reaches_exit_on_empty_level() {
        let level = Level::with_obstacles(0, 150, 150, Vec::new());
        let mut state = GameState::from_levels(1, GameConfig::default(), vec![level]);
        assert!(run(&mut state, 200));
    }

    #[test]
    fn test_slides_around_box() {
        let block = Obstacle::new(ShapeKind::Box, IVec2::new(60, 40), IVec2::new(20, 20));
        let level = Level::with_obstacles(0, 150, 150, vec![block]);
        let mut state = GameState::from_levels(1, GameConfig::default(), vec![level]);
        assert!(run(&mut state, 400));
    }

    #[test]
    fn test_idle_presses_to_start() {
        let level = Level::with_obstacles(0, 150, 150, Vec::new());
        let state = GameState::from_levels(1, GameConfig::default(), vec![level]);
        assert!(Autopilot::new().steer(&state).any());
    }
}
