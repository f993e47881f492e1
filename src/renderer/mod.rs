//! Display output
//!
//! The game draws through the `Renderer` trait: a handful of monochrome
//! primitives in screen coordinates. `scene` turns game state into those
//! calls; `framebuffer` is an in-memory 1-bit display for headless runs.

pub mod framebuffer;
pub mod scene;

pub use framebuffer::Framebuffer;
pub use scene::{draw_scene, draw_timer};

/// Line height used for text layout
pub const TEXT_HEIGHT: i32 = 8;

/// Monochrome display contract. All coordinates are screen-relative.
pub trait Renderer {
    /// Blank the back buffer
    fn clear(&mut self);
    /// Blank one region, including any text anchored inside it
    fn clear_rect(&mut self, x: i32, y: i32, w: i32, h: i32);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32);
    fn draw_circle(&mut self, cx: i32, cy: i32, r: i32);
    fn draw_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32);
    /// Rectangle outline
    fn draw_frame(&mut self, x: i32, y: i32, w: i32, h: i32);
    /// Text with its top-left corner at (x, y)
    fn draw_text(&mut self, x: i32, y: i32, text: &str);
    fn text_width(&self, text: &str) -> i32;
    /// Push the back buffer to the panel
    fn present(&mut self);
    /// Invert the whole panel (hardware toggle, survives `clear`)
    fn invert(&mut self, inverted: bool);
}
