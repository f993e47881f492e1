//! Mono Runner entry point
//!
//! Headless native build: runs the game against an in-memory framebuffer
//! with the autopilot on the buttons, logging each cleared level.
//!
//! Usage: `mono-runner [config.json]`

use std::process::ExitCode;

use mono_runner::input::Button;
use mono_runner::platform::{BootWipe, ButtonSource, NetworkHandle, NetworkServices};
use mono_runner::renderer::Framebuffer;
use mono_runner::report::format_time;
use mono_runner::sim::{Autopilot, GameEvent, TickInput};
use mono_runner::{Game, GameConfig};

const DEFAULT_SEED: u64 = 0x5EED;
/// Stop after this many frames even if the run is not over
const MAX_FRAMES: u64 = 200_000;

/// Buttons held by the autopilot
#[derive(Default)]
struct AutopilotButtons {
    held: TickInput,
}

impl ButtonSource for AutopilotButtons {
    fn is_pressed(&mut self, button: Button) -> bool {
        match button {
            Button::Up => self.held.up,
            Button::Down => self.held.down,
            Button::Left => self.held.left,
            Button::Right => self.held.right,
        }
    }
}

/// Stand-in for the update channel and network presence
struct LoggingNetwork {
    polls: u64,
}

impl NetworkServices for LoggingNetwork {
    fn poll(&mut self) {
        self.polls += 1;
    }

    fn shutdown(&mut self) {
        log::info!("Network stopped after {} idle polls", self.polls);
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Mono Runner (native) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: GameConfig) -> Result<(), mono_runner::GenerationError> {
    let seed = config.seed.unwrap_or(DEFAULT_SEED);
    let frame_ms = config.frame_ms;
    let renderer = Framebuffer::new(config.screen_width, config.screen_height);
    let animation = Box::new(BootWipe::new(config.screen_width, config.screen_height));
    let network = NetworkHandle::new(Box::new(LoggingNetwork { polls: 0 }));

    let mut game = Game::new(config, seed, renderer, AutopilotButtons::default(), network, animation)?;
    let mut pilot = Autopilot::new();
    let mut now_ms = 0;

    while game.frames() < MAX_FRAMES {
        game.buttons_mut().held = pilot.steer(game.state());
        for event in game.frame(now_ms)? {
            match event {
                GameEvent::LevelCompleted { level, elapsed_ms } => {
                    log::info!("Level {} cleared in {}", level + 1, format_time(elapsed_ms));
                    log::debug!("\n{}", game.renderer().to_ascii());
                }
                GameEvent::GameCompleted { total_ms } => {
                    let report = &game.state().report;
                    if let Some(best) = report.fastest() {
                        log::info!(
                            "Fastest level: {} ({})",
                            best.level + 1,
                            format_time(best.elapsed_ms)
                        );
                    }
                    log::info!("Run complete in {}", format_time(total_ms));
                }
                // One full run is enough for the demo
                GameEvent::Restarted { .. } => return Ok(()),
                _ => {}
            }
        }
        now_ms += frame_ms;
    }

    log::warn!("Stopped after {} frames at level {}", MAX_FRAMES, game.state().level_index + 1);
    Ok(())
}
