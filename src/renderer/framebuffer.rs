//! 1-bit framebuffer
//!
//! Software implementation of the display contract. Text is not rasterized;
//! labels are kept alongside the pixels so headless runs can log them.

use super::{Renderer, TEXT_HEIGHT};

/// Fixed glyph advance (6x8 font)
pub const CHAR_WIDTH: i32 = 6;

#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: i32,
    height: i32,
    pixels: Vec<bool>,
    labels: Vec<(i32, i32, String)>,
    inverted: bool,
    presented: u32,
    cleared: u32,
}

impl Framebuffer {
    pub fn new(width: i32, height: i32) -> Self {
        let len = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            pixels: vec![false; len],
            labels: Vec::new(),
            inverted: false,
            presented: 0,
            cleared: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32) {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            self.pixels[(y * self.width + x) as usize] = true;
        }
    }

    fn hline(&mut self, x0: i32, x1: i32, y: i32) {
        if y < 0 || y >= self.height {
            return;
        }
        let xa = x0.max(0);
        let xb = x1.min(self.width);
        let off = (y * self.width) as usize;
        for x in xa..xb {
            self.pixels[off + x as usize] = true;
        }
    }

    /// Lit state of a pixel as stored (ignores inversion)
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        x >= 0
            && x < self.width
            && y >= 0
            && y < self.height
            && self.pixels[(y * self.width + x) as usize]
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    pub fn labels(&self) -> &[(i32, i32, String)] {
        &self.labels
    }

    /// True if any label contains `needle`
    pub fn has_label(&self, needle: &str) -> bool {
        self.labels.iter().any(|(_, _, text)| text.contains(needle))
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn frames_presented(&self) -> u32 {
        self.presented
    }

    /// Full-screen clears so far
    pub fn clears(&self) -> u32 {
        self.cleared
    }

    /// Render as text, one character per pixel, labels listed underneath
    pub fn to_ascii(&self) -> String {
        let (on, off) = if self.inverted { ('.', '#') } else { ('#', '.') };
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.pixel(x, y) { on } else { off });
            }
            out.push('\n');
        }
        for (x, y, text) in &self.labels {
            out.push_str(&format!("[{},{}] {}\n", x, y, text));
        }
        out
    }

    fn plot4(&mut self, cx: i32, cy: i32, x: i32, y: i32) {
        self.put(cx + x, cy + y);
        self.put(cx - x, cy + y);
        self.put(cx + x, cy - y);
        self.put(cx - x, cy - y);
    }
}

impl Renderer for Framebuffer {
    fn clear(&mut self) {
        self.pixels.fill(false);
        self.labels.clear();
        self.cleared += 1;
    }

    fn clear_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let (x1, x2) = (x.max(0), (x + w).min(self.width));
        for row in y.max(0)..(y + h).min(self.height) {
            let off = (row * self.width) as usize;
            for col in x1..x2 {
                self.pixels[off + col as usize] = false;
            }
        }
        self.labels
            .retain(|&(lx, ly, _)| lx < x || lx >= x + w || ly < y || ly >= y + h);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let y1 = y.max(0);
        let y2 = (y + h).min(self.height);
        for row in y1..y2 {
            self.hline(x, x + w, row);
        }
    }

    /// Midpoint circle
    fn draw_circle(&mut self, cx: i32, cy: i32, r: i32) {
        if r <= 0 {
            self.put(cx, cy);
            return;
        }
        let mut x = r;
        let mut y = 0;
        let mut err = 1 - r;
        while x >= y {
            self.plot4(cx, cy, x, y);
            self.plot4(cx, cy, y, x);
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Midpoint ellipse (two regions)
    fn draw_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32) {
        if rx <= 0 || ry <= 0 {
            self.hline(cx - rx.max(0), cx + rx.max(0) + 1, cy);
            return;
        }
        let rx2 = (rx * rx) as i64;
        let ry2 = (ry * ry) as i64;
        let mut x: i64 = 0;
        let mut y: i64 = ry as i64;
        let mut px: i64 = 0;
        let mut py: i64 = 2 * rx2 * y;

        // Region 1: slope > -1
        let mut p = ry2 - rx2 * ry as i64 + rx2 / 4;
        while px < py {
            self.plot4(cx, cy, x as i32, y as i32);
            x += 1;
            px += 2 * ry2;
            if p < 0 {
                p += ry2 + px;
            } else {
                y -= 1;
                py -= 2 * rx2;
                p += ry2 + px - py;
            }
        }

        // Region 2: slope <= -1
        p = (ry2 * (2 * x + 1) * (2 * x + 1)) / 4 + rx2 * (y - 1) * (y - 1) - rx2 * ry2;
        while y >= 0 {
            self.plot4(cx, cy, x as i32, y as i32);
            y -= 1;
            py -= 2 * rx2;
            if p > 0 {
                p += rx2 - py;
            } else {
                x += 1;
                px += 2 * ry2;
                p += rx2 - py + px;
            }
        }
    }

    fn draw_frame(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.hline(x, x + w, y);
        self.hline(x, x + w, y + h - 1);
        for row in y..y + h {
            self.put(x, row);
            self.put(x + w - 1, row);
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        if y + TEXT_HEIGHT <= 0 || y >= self.height {
            return;
        }
        self.labels.push((x, y, text.to_string()));
    }

    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * CHAR_WIDTH
    }

    fn present(&mut self) {
        self.presented += 1;
    }

    fn invert(&mut self, inverted: bool) {
        self.inverted = inverted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = Framebuffer::new(16, 8);
        fb.fill_rect(-2, -2, 4, 4);
        assert_eq!(fb.lit_pixels(), 4);
        assert!(fb.pixel(0, 0) && fb.pixel(1, 1));
        assert!(!fb.pixel(2, 0));

        fb.clear();
        fb.fill_rect(14, 6, 10, 10);
        assert_eq!(fb.lit_pixels(), 4);
    }

    #[test]
    fn test_frame_outline() {
        let mut fb = Framebuffer::new(16, 16);
        fb.draw_frame(2, 2, 4, 3);
        // 4 + 4 top/bottom, 1 middle row x 2 sides
        assert_eq!(fb.lit_pixels(), 10);
        assert!(!fb.pixel(3, 3));
    }

    #[test]
    fn test_circle_outline() {
        let mut fb = Framebuffer::new(32, 32);
        fb.draw_circle(16, 16, 5);
        for (x, y) in [(21, 16), (11, 16), (16, 21), (16, 11)] {
            assert!(fb.pixel(x, y), "({}, {})", x, y);
        }
        assert!(!fb.pixel(16, 16));
        assert!(!fb.pixel(22, 16));
    }

    #[test]
    fn test_ellipse_outline() {
        let mut fb = Framebuffer::new(40, 20);
        fb.draw_ellipse(20, 10, 8, 4);
        for (x, y) in [(28, 10), (12, 10), (20, 14), (20, 6)] {
            assert!(fb.pixel(x, y), "({}, {})", x, y);
        }
        assert!(!fb.pixel(20, 10));
        assert!(!fb.pixel(29, 10));
        assert!(!fb.pixel(20, 15));
    }

    #[test]
    fn test_clear_rect_keeps_outside() {
        let mut fb = Framebuffer::new(16, 8);
        fb.fill_rect(0, 0, 16, 8);
        fb.draw_text(0, 0, "A");
        fb.draw_text(10, 0, "B");
        fb.clear_rect(8, 0, 8, 8);
        assert_eq!(fb.lit_pixels(), 64);
        assert!(fb.pixel(7, 7) && !fb.pixel(8, 0));
        assert!(fb.has_label("A") && !fb.has_label("B"));
        assert_eq!(fb.clears(), 0);
    }

    #[test]
    fn test_text_and_invert() {
        let mut fb = Framebuffer::new(128, 64);
        assert_eq!(fb.text_width("LEVEL 1"), 42);
        fb.draw_text(0, 0, "LEVEL 1");
        fb.draw_text(0, 100, "off screen");
        assert!(fb.has_label("LEVEL"));
        assert_eq!(fb.labels().len(), 1);

        fb.invert(true);
        fb.clear();
        assert!(fb.is_inverted());
        assert!(fb.labels().is_empty());
        assert!(fb.to_ascii().starts_with("####"));
    }
}
