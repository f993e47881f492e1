//! Scene composition
//!
//! Turns game state into renderer calls for the current phase. Everything
//! in the level is translated into screen space through the viewport.

use glam::IVec2;

use super::{Renderer, TEXT_HEIGHT};
use crate::report::format_time;
use crate::sim::{GamePhase, GameState, Level, Obstacle, ShapeKind, Viewport};

pub const TITLE: &str = "MONO RUNNER";
pub const PROMPT: &str = "PRESS ANY BUTTON";

/// Draw the whole frame for the current phase (does not present)
pub fn draw_scene(state: &GameState, renderer: &mut dyn Renderer) {
    renderer.clear();
    let screen = state.viewport.size;

    match state.phase {
        GamePhase::Idle => {
            let mid = screen.y / 2;
            draw_centered(renderer, screen.x, mid - TEXT_HEIGHT - 2, TITLE);
            draw_centered(renderer, screen.x, mid + 2, PROMPT);
        }
        GamePhase::Playing => {
            if let Some(level) = state.level() {
                draw_level(level, &state.viewport, renderer);
            }
            let actor = state.viewport.to_screen(state.actor.pos);
            renderer.fill_rect(actor.x, actor.y, state.actor.size.x, state.actor.size.y);
            draw_hud(state, renderer);
        }
        GamePhase::LevelComplete => {
            let elapsed = state
                .report
                .last()
                .map(|t| t.elapsed_ms)
                .unwrap_or(state.elapsed_ms);
            let mid = screen.y / 2;
            let title = format!("LEVEL {} CLEAR", state.level_index + 1);
            draw_centered(renderer, screen.x, mid - TEXT_HEIGHT - 2, &title);
            draw_centered(renderer, screen.x, mid + 2, &format!("TIME {}", format_time(elapsed)));
        }
        GamePhase::GameComplete => {
            let mid = screen.y / 2;
            draw_centered(renderer, screen.x, mid - TEXT_HEIGHT - 2, "ALL CLEAR!");
            let total = format!("TOTAL {}", format_time(state.report.total_ms()));
            draw_centered(renderer, screen.x, mid + 2, &total);
        }
    }
}

/// Obstacles and exit that overlap the viewport
pub fn draw_level(level: &Level, view: &Viewport, renderer: &mut dyn Renderer) {
    for obstacle in level.obstacles() {
        if view.intersects(obstacle.pos, obstacle.size) {
            draw_obstacle(obstacle, view.to_screen(obstacle.pos), renderer);
        }
    }

    let exit_size = IVec2::splat(level.exit_bounding);
    if view.intersects(level.exit, exit_size) {
        let exit = view.to_screen(level.exit);
        renderer.draw_frame(exit.x, exit.y, exit_size.x, exit_size.y);
    }
}

fn draw_obstacle(obstacle: &Obstacle, at: IVec2, renderer: &mut dyn Renderer) {
    let (w, h) = (obstacle.width(), obstacle.height());
    match obstacle.kind {
        ShapeKind::Box => renderer.fill_rect(at.x, at.y, w, h),
        ShapeKind::Circle => {
            let r = w / 2;
            renderer.draw_circle(at.x + r, at.y + r, r);
        }
        ShapeKind::Ellipse => renderer.draw_ellipse(at.x + w / 2, at.y + h / 2, w / 2, h / 2),
    }
}

/// Level number top-left, running time top-right
fn draw_hud(state: &GameState, renderer: &mut dyn Renderer) {
    renderer.draw_text(0, 0, &format!("L{}", state.level_index + 1));
    draw_time(state, renderer);
}

fn draw_time(state: &GameState, renderer: &mut dyn Renderer) {
    let time = format_time(state.elapsed_ms);
    let x = state.viewport.size.x - renderer.text_width(&time);
    renderer.draw_text(x, 0, &time);
}

/// Refresh only the running time of a Playing frame.
///
/// The time string never gets shorter within a level, so blanking the area
/// of the new string also covers the old one.
pub fn draw_timer(state: &GameState, renderer: &mut dyn Renderer) {
    let width = renderer.text_width(&format_time(state.elapsed_ms));
    let x = state.viewport.size.x - width;
    renderer.clear_rect(x, 0, width, TEXT_HEIGHT);
    draw_time(state, renderer);
}

fn draw_centered(renderer: &mut dyn Renderer, screen_width: i32, y: i32, text: &str) {
    let x = ((screen_width - renderer.text_width(text)) / 2).max(0);
    renderer.draw_text(x, y, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Framebuffer;
    use crate::settings::GameConfig;
    use crate::sim::Level;

    fn state_with(obstacles: Vec<Obstacle>) -> GameState {
        let level = Level::with_obstacles(0, 300, 300, obstacles);
        GameState::from_levels(1, GameConfig::default(), vec![level])
    }

    #[test]
    fn test_idle_splash_is_centered() {
        let state = state_with(Vec::new());
        let mut fb = Framebuffer::new(128, 64);
        draw_scene(&state, &mut fb);
        let (x, _, text) = &fb.labels()[0];
        assert_eq!(text, TITLE);
        assert_eq!(*x, (128 - 11 * 6) / 2);
        assert!(fb.has_label(PROMPT));
    }

    #[test]
    fn test_playing_draws_relative_to_viewport() {
        let block = Obstacle::new(ShapeKind::Box, IVec2::new(110, 40), IVec2::new(10, 10));
        let far = Obstacle::new(ShapeKind::Box, IVec2::new(250, 250), IVec2::new(10, 10));
        let mut state = state_with(vec![block, far]);
        state.phase = GamePhase::Playing;
        state.viewport.origin = IVec2::new(100, 30);
        state.actor.pos = IVec2::new(150, 60);
        state.elapsed_ms = 1500;

        let mut fb = Framebuffer::new(128, 64);
        draw_scene(&state, &mut fb);

        // Block lands at (10, 10) on screen
        assert!(fb.pixel(10, 10) && fb.pixel(19, 19));
        assert!(!fb.pixel(20, 20));
        // Actor at (50, 30)
        assert!(fb.pixel(50, 30) && fb.pixel(54, 34));
        assert_eq!(fb.lit_pixels(), 100 + 25);
        assert!(fb.has_label("L1"));
        assert!(fb.has_label("1.5s"));
    }

    #[test]
    fn test_round_obstacles_use_outlines() {
        let circle = Obstacle::new(ShapeKind::Circle, IVec2::new(20, 20), IVec2::new(20, 20));
        let ellipse = Obstacle::new(ShapeKind::Ellipse, IVec2::new(60, 20), IVec2::new(20, 10));
        let mut state = state_with(vec![circle, ellipse]);
        state.phase = GamePhase::Playing;

        let mut fb = Framebuffer::new(128, 64);
        draw_scene(&state, &mut fb);
        assert!(fb.pixel(40, 30) && !fb.pixel(30, 30));
        assert!(fb.pixel(80, 25) && !fb.pixel(70, 25));
    }

    #[test]
    fn test_timer_refresh_leaves_scene() {
        let block = Obstacle::new(ShapeKind::Box, IVec2::new(40, 30), IVec2::new(10, 10));
        let mut state = state_with(vec![block]);
        state.phase = GamePhase::Playing;
        state.elapsed_ms = 9_900;

        let mut fb = Framebuffer::new(128, 64);
        draw_scene(&state, &mut fb);
        let lit = fb.lit_pixels();

        state.elapsed_ms = 10_000;
        draw_timer(&state, &mut fb);
        assert_eq!(fb.clears(), 1);
        assert_eq!(fb.lit_pixels(), lit);
        assert!(fb.has_label("L1"));
        assert!(fb.has_label("10.0s"));
        assert!(!fb.has_label("9.9s"));
    }

    #[test]
    fn test_level_complete_shows_time() {
        let mut state = state_with(Vec::new());
        state.phase = GamePhase::LevelComplete;
        state.report.record(0, 12_345);
        let mut fb = Framebuffer::new(128, 64);
        draw_scene(&state, &mut fb);
        assert!(fb.has_label("LEVEL 1 CLEAR"));
        assert!(fb.has_label("TIME 12.3s"));
    }

    #[test]
    fn test_game_complete_shows_total() {
        let mut state = state_with(Vec::new());
        state.phase = GamePhase::GameComplete;
        state.report.record(0, 1000);
        state.report.record(1, 2500);
        let mut fb = Framebuffer::new(128, 64);
        draw_scene(&state, &mut fb);
        assert!(fb.has_label("ALL CLEAR!"));
        assert!(fb.has_label("TOTAL 3.5s"));
    }
}
