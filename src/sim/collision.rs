//! Collision detection between the actor and level obstacles
//!
//! The actor is an axis-aligned rectangle whose top-left corner is the
//! candidate position. Each obstacle shape has its own overlap test; a
//! candidate is blocked as soon as any obstacle reports a hit.

use glam::{IVec2, Vec2};

use super::level::{Level, Obstacle, ShapeKind};

/// Standard AABB overlap between the actor rect and a box obstacle
#[inline]
pub fn box_overlaps(candidate: IVec2, size: IVec2, obstacle: &Obstacle) -> bool {
    let o = obstacle.pos;
    candidate.x < o.x + obstacle.width()
        && candidate.x + size.x > o.x
        && candidate.y < o.y + obstacle.height()
        && candidate.y + size.y > o.y
}

/// Circle-vs-rectangle test
///
/// Compares the squared distance between centers with
/// `(r + w/2) * (r + h/2)`. Exact only for square actors.
#[inline]
pub fn circle_overlaps(candidate: IVec2, size: IVec2, obstacle: &Obstacle) -> bool {
    let radius = obstacle.width() as f32 / 2.0;
    let half = size.as_vec2() / 2.0;
    circle_distance_sq(candidate, size, obstacle) < (radius + half.x) * (radius + half.y)
}

/// Ellipse test by sampling every integer point of the actor rect
///
/// Edges are inclusive on both sides. Cost is O(w * h) per obstacle, so this
/// is the hot path if the actor ever grows.
pub fn ellipse_overlaps(candidate: IVec2, size: IVec2, obstacle: &Obstacle) -> bool {
    // No sampled point can be strictly inside the ellipse unless the
    // rects overlap, so reject on bounds first
    let o = obstacle.pos;
    if candidate.x + size.x <= o.x
        || candidate.x >= o.x + obstacle.width()
        || candidate.y + size.y <= o.y
        || candidate.y >= o.y + obstacle.height()
    {
        return false;
    }

    let center = obstacle.center();
    let radii = obstacle.radii();
    let inv_rx2 = 1.0 / (radii.x * radii.x);
    let inv_ry2 = 1.0 / (radii.y * radii.y);

    for py in candidate.y..=candidate.y + size.y {
        let dy = py as f32 - center.y;
        let ny = dy * dy * inv_ry2;
        if ny >= 1.0 {
            continue;
        }
        for px in candidate.x..=candidate.x + size.x {
            let dx = px as f32 - center.x;
            if dx * dx * inv_rx2 + ny < 1.0 {
                return true;
            }
        }
    }
    false
}

/// Shape-dispatched overlap test for one obstacle
#[inline]
pub fn overlaps(candidate: IVec2, size: IVec2, obstacle: &Obstacle) -> bool {
    match obstacle.kind {
        ShapeKind::Box => box_overlaps(candidate, size, obstacle),
        ShapeKind::Circle => circle_overlaps(candidate, size, obstacle),
        ShapeKind::Ellipse => ellipse_overlaps(candidate, size, obstacle),
    }
}

/// First obstacle (in generation order) that blocks the candidate
pub fn blocking_obstacle(level: &Level, candidate: IVec2, size: IVec2) -> Option<&Obstacle> {
    level
        .obstacles()
        .iter()
        .find(|o| overlaps(candidate, size, o))
}

/// True if the actor may not move to `candidate`
#[inline]
pub fn is_blocked(level: &Level, candidate: IVec2, size: IVec2) -> bool {
    blocking_obstacle(level, candidate, size).is_some()
}

/// True if the actor's top-left corner is inside the exit zone
#[inline]
pub fn in_exit_zone(level: &Level, pos: IVec2) -> bool {
    let rel = pos - level.exit;
    rel.x >= 0 && rel.x < level.exit_bounding && rel.y >= 0 && rel.y < level.exit_bounding
}

/// Squared distance between actor and obstacle centers
pub fn circle_distance_sq(candidate: IVec2, size: IVec2, obstacle: &Obstacle) -> f32 {
    let actor_center: Vec2 = candidate.as_vec2() + size.as_vec2() / 2.0;
    (actor_center - obstacle.center()).length_squared()
}
