//! Runtime driver
//!
//! One `frame` call per display refresh: sample the buttons, advance the
//! sim by a fixed step, react to events on the platform side, then draw.

use crate::error::GenerationError;
use crate::input::ButtonBank;
use crate::platform::{ButtonSource, NetworkHandle, StartupAnimation};
use crate::renderer::{Renderer, draw_scene, draw_timer};
use crate::settings::GameConfig;
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// Game instance holding state and every collaborator
pub struct Game<R: Renderer, B: ButtonSource> {
    state: GameState,
    bank: ButtonBank,
    buttons: B,
    renderer: R,
    network: NetworkHandle,
    animation: Box<dyn StartupAnimation>,
    /// Panel is inverted for the current boundary-hit flash
    flashing: bool,
    frames: u64,
}

impl<R: Renderer, B: ButtonSource> Game<R, B> {
    /// Generate every level for `seed` and play the startup animation
    pub fn new(
        config: GameConfig,
        seed: u64,
        renderer: R,
        buttons: B,
        network: NetworkHandle,
        animation: Box<dyn StartupAnimation>,
    ) -> Result<Self, GenerationError> {
        let state = GameState::new(seed, config)?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(Self::with_state(state, renderer, buttons, network, animation))
    }

    /// Wrap an existing state
    pub fn with_state(
        state: GameState,
        mut renderer: R,
        buttons: B,
        network: NetworkHandle,
        mut animation: Box<dyn StartupAnimation>,
    ) -> Self {
        animation.play(&mut renderer);
        Self {
            bank: ButtonBank::new(state.config.debounce_ms),
            state,
            buttons,
            renderer,
            network,
            animation,
            flashing: false,
            frames: 0,
        }
    }

    /// Run one frame at wall-clock time `now_ms`
    pub fn frame(&mut self, now_ms: u64) -> Result<Vec<GameEvent>, GenerationError> {
        if self.state.phase == GamePhase::Idle {
            self.network.poll();
        }

        let input = self.bank.poll(&mut self.buttons, now_ms);
        let was_playing = self.state.phase == GamePhase::Playing;
        let dt = self.state.config.frame_ms;
        let events = tick(&mut self.state, &input, dt)?;

        let mut boundary_hit = false;
        for event in &events {
            match event {
                GameEvent::GameStarted => {
                    self.network.close();
                }
                GameEvent::BoundaryHit => boundary_hit = true,
                GameEvent::Restarted { .. } => {
                    self.animation.play(&mut self.renderer);
                }
                _ => {}
            }
        }

        // Nothing moved: only the timer changes
        if was_playing && self.state.phase == GamePhase::Playing && !input.any() {
            draw_timer(&self.state, &mut self.renderer);
        } else {
            draw_scene(&self.state, &mut self.renderer);
        }
        if boundary_hit {
            self.renderer.invert(true);
            self.flashing = true;
        } else if self.flashing {
            self.renderer.invert(false);
            self.flashing = false;
        }
        self.renderer.present();

        self.frames += 1;
        Ok(events)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn buttons_mut(&mut self) -> &mut B {
        &mut self.buttons
    }

    pub fn network(&self) -> &NetworkHandle {
        &self.network
    }

    /// Frames run since construction
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
