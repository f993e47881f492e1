//! Scrolling camera into a level larger than the screen
//!
//! The actor roams freely inside the middle half of the view. Crossing into
//! the outer quarter drags the view along; the view is then clamped to the
//! level and the actor is clamped back into the view.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::level::Level;

/// Screen-sized window into level coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Top-left corner in level coordinates
    pub origin: IVec2,
    /// Fixed to the physical screen size
    pub size: IVec2,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            origin: IVec2::ZERO,
            size: IVec2::new(width, height),
        }
    }

    /// Back to the level's top-left corner
    pub fn reset(&mut self) {
        self.origin = IVec2::ZERO;
    }

    /// Recenter on the actor, clamp to the level, then pin the actor inside
    /// the view. Returns true when the actor had to be pushed back (boundary hit).
    pub fn follow(&mut self, actor_pos: &mut IVec2, actor_size: IVec2, level: &Level) -> bool {
        let level_size = level.size();
        for axis in 0..2 {
            self.origin[axis] = recenter(self.origin[axis], self.size[axis], actor_pos[axis]);
            // max(0) guards levels narrower than the screen
            let max_origin = (level_size[axis] - self.size[axis]).max(0);
            self.origin[axis] = self.origin[axis].clamp(0, max_origin);
        }

        let before = *actor_pos;
        for axis in 0..2 {
            let low = self.origin[axis];
            let right = (self.origin[axis] + self.size[axis]).min(level_size[axis]);
            let high = (right - actor_size[axis]).max(low);
            actor_pos[axis] = actor_pos[axis].clamp(low, high);
        }

        *actor_pos != before
    }

    /// Level coordinates to screen coordinates
    #[inline]
    pub fn to_screen(&self, pos: IVec2) -> IVec2 {
        pos - self.origin
    }

    /// True if any part of the rect is on screen
    pub fn intersects(&self, pos: IVec2, size: IVec2) -> bool {
        let end = self.origin + self.size;
        pos.x < end.x
            && pos.x + size.x > self.origin.x
            && pos.y < end.y
            && pos.y + size.y > self.origin.y
    }
}

/// Dead-zone recenter along one axis
#[inline]
fn recenter(origin: i32, span: i32, actor: i32) -> i32 {
    let quarter = span / 4;
    if actor < origin + quarter {
        actor - quarter
    } else if actor > origin + 3 * span / 4 {
        actor - 3 * span / 4
    } else {
        origin
    }
}
