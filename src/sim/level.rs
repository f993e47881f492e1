//! Procedural level generation
//!
//! Level extents and obstacle counts follow a fixed schedule; obstacle shapes,
//! sizes and positions come from a per-level seeded RNG. Placement uses
//! rejection sampling with an explicit retry budget.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GenerationError;
use crate::settings::GameConfig;

/// Obstacle shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Axis-aligned filled rectangle
    Box,
    /// Circle inscribed in a square bounding box
    Circle,
    /// Axis-aligned ellipse inscribed in its bounding box
    Ellipse,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Box, ShapeKind::Circle, ShapeKind::Ellipse];
}

/// A static obstacle. Position is the top-left of its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ShapeKind,
    pub pos: IVec2,
    pub size: IVec2,
}

impl Obstacle {
    pub fn new(kind: ShapeKind, pos: IVec2, size: IVec2) -> Self {
        debug_assert!(size.x > 0 && size.y > 0);
        debug_assert!(kind != ShapeKind::Circle || size.x == size.y);
        Self { kind, pos, size }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Center of the bounding box
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos.as_vec2() + self.size.as_vec2() / 2.0
    }

    /// Half extents (radius for circles, semi-axes for ellipses)
    #[inline]
    pub fn radii(&self) -> Vec2 {
        self.size.as_vec2() / 2.0
    }
}

/// One generated level. Obstacle storage is fixed at generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// 0-based level index
    pub index: usize,
    pub width: i32,
    pub height: i32,
    obstacles: Vec<Obstacle>,
    /// Top-left of the exit zone
    pub exit: IVec2,
    /// Side length of the square exit zone
    pub exit_bounding: i32,
    /// Actor spawn point
    pub spawn: IVec2,
}

impl Level {
    /// Build a level around an explicit obstacle list (exit and spawn follow the schedule)
    pub fn with_obstacles(index: usize, width: i32, height: i32, obstacles: Vec<Obstacle>) -> Self {
        Self {
            index,
            width,
            height,
            obstacles,
            exit: IVec2::new(width - EXIT_INSET, height - EXIT_INSET),
            exit_bounding: EXIT_BOUNDING,
            spawn: IVec2::new(SPAWN_X, SPAWN_Y),
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }
}

/// Level extents for a given index
pub fn level_size(index: usize) -> IVec2 {
    let index = i32::try_from(index).unwrap_or(i32::MAX);
    let side = BASE_LEVEL_SIZE.saturating_add(LEVEL_SIZE_GROWTH.saturating_mul(index));
    IVec2::splat(side)
}

/// Obstacle count for a given index, capped at `max_obstacles`
pub fn obstacle_count(index: usize, max_obstacles: usize) -> usize {
    BASE_OBSTACLE_COUNT
        .saturating_add(OBSTACLE_COUNT_GROWTH.saturating_mul(index))
        .min(max_obstacles)
}

/// True if a top-left corner falls in the start or exit reservation
pub fn in_reserved_corner(pos: IVec2, level_width: i32, level_height: i32) -> bool {
    let start = pos.x < START_RESERVE && pos.y < START_RESERVE;
    let exit = pos.x > level_width - EXIT_RESERVE && pos.y > level_height - EXIT_RESERVE;
    start || exit
}

/// Deterministic RNG for one level of a run
pub fn level_rng(seed: u64, index: usize) -> Pcg32 {
    // Golden ratio hash keeps neighbouring levels decorrelated
    let level_seed = (index as u64).wrapping_mul(2654435761).wrapping_add(seed);
    Pcg32::seed_from_u64(level_seed)
}

/// Generate a single level
pub fn generate_level<R: Rng + ?Sized>(
    index: usize,
    rng: &mut R,
    config: &GameConfig,
) -> Result<Level, GenerationError> {
    let size = level_size(index);
    let (width, height) = (size.x, size.y);
    let count = obstacle_count(index, config.max_obstacles);

    let mut obstacles = Vec::new();
    obstacles
        .try_reserve_exact(count)
        .map_err(|source| GenerationError::Allocation { level: index, source })?;

    for i in 0..count {
        let kind = ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())];
        let w = rng.random_range(OBSTACLE_MIN_SIZE..OBSTACLE_MAX_SIZE);
        let h = match kind {
            ShapeKind::Circle => w,
            _ => rng.random_range(OBSTACLE_MIN_SIZE..OBSTACLE_MAX_SIZE),
        };

        if width - w < 1 || height - h < 1 {
            return Err(GenerationError::LevelTooSmall {
                level: index,
                width,
                height,
            });
        }

        let pos = place(rng, width - w, height - h, width, height, config.placement_attempts)
            .ok_or(GenerationError::PlacementExhausted {
                level: index,
                obstacle: i,
                attempts: config.placement_attempts,
            })?;

        obstacles.push(Obstacle::new(kind, pos, IVec2::new(w, h)));
    }

    log::debug!(
        "Level {}: {}x{}, {} obstacles",
        index,
        width,
        height,
        obstacles.len()
    );

    Ok(Level::with_obstacles(index, width, height, obstacles))
}

/// Rejection-sample a top-left corner in [0, max_x) x [0, max_y)
fn place<R: Rng + ?Sized>(
    rng: &mut R,
    max_x: i32,
    max_y: i32,
    level_width: i32,
    level_height: i32,
    attempts: u32,
) -> Option<IVec2> {
    for attempt in 0..attempts {
        let pos = IVec2::new(rng.random_range(0..max_x), rng.random_range(0..max_y));
        if !in_reserved_corner(pos, level_width, level_height) {
            if attempt > 100 {
                log::warn!("Obstacle placed after {} rejected candidates", attempt);
            }
            return Some(pos);
        }
    }
    None
}

/// Generate every level of a run up front
pub fn generate_levels(seed: u64, config: &GameConfig) -> Result<Vec<Level>, GenerationError> {
    let mut levels = Vec::with_capacity(config.level_count);
    for index in 0..config.level_count {
        let mut rng = level_rng(seed, index);
        levels.push(generate_level(index, &mut rng, config)?);
    }
    log::info!("Generated {} levels (seed {})", levels.len(), seed);
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_schedule() {
        assert_eq!(level_size(0), IVec2::new(150, 150));
        assert_eq!(level_size(9), IVec2::new(330, 330));
        // Absurd indices saturate instead of overflowing
        assert_eq!(level_size(usize::MAX), IVec2::splat(i32::MAX));
        assert_eq!(obstacle_count(usize::MAX, 20), 20);
        assert_eq!(obstacle_count(0, 20), 3);
        assert_eq!(obstacle_count(9, 20), 12);
        assert_eq!(obstacle_count(9, 5), 5);
    }

    #[test]
    fn test_exit_and_spawn_placement() {
        let config = GameConfig::default();
        let level = generate_level(0, &mut level_rng(1, 0), &config).unwrap();
        assert_eq!(level.exit, IVec2::new(130, 130));
        assert_eq!(level.exit_bounding, 10);
        assert_eq!(level.spawn, IVec2::new(10, 10));
        assert_eq!(level.obstacles().len(), 3);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = GameConfig::default();
        let a = generate_levels(42, &config).unwrap();
        let b = generate_levels(42, &config).unwrap();
        for (la, lb) in a.iter().zip(&b) {
            assert_eq!(la.obstacles(), lb.obstacles());
        }
    }

    #[test]
    fn test_circles_are_round() {
        let config = GameConfig::default();
        for level in generate_levels(3, &config).unwrap() {
            for o in level.obstacles() {
                if o.kind == ShapeKind::Circle {
                    assert_eq!(o.width(), o.height());
                }
            }
        }
    }

    #[test]
    fn test_reserved_corners() {
        assert!(in_reserved_corner(IVec2::new(19, 19), 150, 150));
        assert!(!in_reserved_corner(IVec2::new(20, 0), 150, 150));
        assert!(in_reserved_corner(IVec2::new(111, 111), 150, 150));
        assert!(!in_reserved_corner(IVec2::new(110, 111), 150, 150));
    }

    struct ZeroRng;

    impl rand::RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn test_exhausted_budget_fails_fast() {
        // Always draws from the start corner: every candidate is rejected
        let mut rng = ZeroRng;
        let config = GameConfig {
            placement_attempts: 50,
            ..Default::default()
        };
        let err = generate_level(0, &mut rng, &config).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::PlacementExhausted { level: 0, obstacle: 0, attempts: 50 }
        ));
    }

    proptest! {
        #[test]
        fn prop_obstacles_inside_level_and_outside_corners(seed in any::<u64>(), index in 0usize..10) {
            let config = GameConfig::default();
            let level = generate_level(index, &mut level_rng(seed, index), &config).unwrap();
            prop_assert_eq!(level.obstacles().len(), obstacle_count(index, config.max_obstacles));
            for o in level.obstacles() {
                prop_assert!(o.width() > 0 && o.height() > 0);
                prop_assert!(o.pos.x >= 0 && o.pos.y >= 0);
                prop_assert!(o.pos.x + o.width() <= level.width);
                prop_assert!(o.pos.y + o.height() <= level.height);
                prop_assert!(!in_reserved_corner(o.pos, level.width, level.height));
            }
        }
    }
}
