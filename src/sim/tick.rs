//! Per-frame state machine update
//!
//! One call per frame: debounced buttons in, events out. Timed screens
//! (level complete, game complete) count down here instead of blocking.

use glam::IVec2;

use super::collision::{in_exit_zone, is_blocked};
use super::state::{GameEvent, GamePhase, GameState};
use crate::error::GenerationError;

/// Debounced button levels for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// True if any button is held
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Buttons that would produce the given step
    pub fn from_direction(dir: IVec2) -> Self {
        Self {
            up: dir.y < 0,
            down: dir.y > 0,
            left: dir.x < 0,
            right: dir.x > 0,
        }
    }

    /// Unit step per held direction; opposite buttons cancel out
    pub fn direction(&self) -> IVec2 {
        IVec2::new(
            self.right as i32 - self.left as i32,
            self.down as i32 - self.up as i32,
        )
    }
}

/// Advance the game by one frame of `dt_ms`
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: u64,
) -> Result<Vec<GameEvent>, GenerationError> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Idle => {
            if input.any() {
                state.phase = GamePhase::Playing;
                state.elapsed_ms = 0;
                log::info!("Game started (seed {})", state.seed);
                events.push(GameEvent::GameStarted);
                events.push(GameEvent::LevelStarted {
                    level: state.level_index,
                });
            }
        }
        GamePhase::Playing => {
            state.elapsed_ms += dt_ms;
            // Idle frame: nothing moves, only the clock advances
            if input.any() {
                play_frame(state, input, &mut events);
            }
        }
        GamePhase::LevelComplete => {
            state.phase_timer_ms = state.phase_timer_ms.saturating_sub(dt_ms);
            if state.phase_timer_ms == 0 {
                if state.advance_level() {
                    state.phase = GamePhase::Playing;
                    events.push(GameEvent::LevelStarted {
                        level: state.level_index,
                    });
                } else {
                    let total_ms = state.report.total_ms();
                    state.phase = GamePhase::GameComplete;
                    state.phase_timer_ms = state.config.game_complete_ms;
                    log::info!("All levels cleared in {} ms", total_ms);
                    events.push(GameEvent::GameCompleted { total_ms });
                }
            }
        }
        GamePhase::GameComplete => {
            state.phase_timer_ms = state.phase_timer_ms.saturating_sub(dt_ms);
            if state.phase_timer_ms == 0 {
                let seed = state.restart()?;
                events.push(GameEvent::Restarted { seed });
            }
        }
    }

    Ok(events)
}

/// Move, gate on collisions, check the exit, follow with the camera
fn play_frame(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let Some(level) = state.levels.front() else {
        return;
    };
    let actor = &mut state.actor;
    let admissible = actor.pos;

    let candidate = actor.pos + input.direction();
    if is_blocked(level, candidate, actor.size) {
        events.push(GameEvent::Blocked);
    } else {
        actor.pos = candidate;
    }

    if state.viewport.follow(&mut actor.pos, actor.size, level) {
        // The clamped position was never collision checked
        if is_blocked(level, actor.pos, actor.size) {
            actor.pos = admissible;
        }
        events.push(GameEvent::BoundaryHit);
    }

    let completed = in_exit_zone(level, actor.pos);

    if completed {
        let elapsed_ms = state.elapsed_ms;
        state.report.record(state.level_index, elapsed_ms);
        state.phase = GamePhase::LevelComplete;
        state.phase_timer_ms = state.config.level_complete_ms;
        log::info!("Level {} complete in {} ms", state.level_index + 1, elapsed_ms);
        events.push(GameEvent::LevelCompleted {
            level: state.level_index,
            elapsed_ms,
        });
    }
}
