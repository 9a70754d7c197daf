use glam::Vec2;
use corridor_grid::TileGrid;

use crate::cache::{RayCache, RayKey};

/// March increment in grid units. Small enough that a single-cell-thick wall
/// cannot sit between two consecutive samples.
pub const RAY_STEP: f32 = 0.05;

/// Number of rays fanned across a cone cast.
pub const CONE_RAYS: usize = 5;

/// Slack added to line-of-sight horizons so a target standing exactly on a
/// cell edge is not reported occluded by its own cell.
const LOS_EPSILON: f32 = 1e-3;

/// Result of a single cast.
///
/// `hit == false` means the ray reached `distance` (the requested horizon)
/// without striking a wall. The two cases are never conflated: a wall sitting
/// exactly at the horizon still reports `hit == true`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub hit: bool,
}

impl RayHit {
    /// A wall was struck after traveling `distance`.
    pub fn wall(distance: f32) -> Self {
        Self {
            distance,
            hit: true,
        }
    }

    /// The ray traveled the full horizon without striking anything.
    pub fn clear(distance: f32) -> Self {
        Self {
            distance,
            hit: false,
        }
    }
}

/// Ray marcher with a memoizing cache over quantized queries.
///
/// Holds no grid reference; the grid is passed per call so independent
/// worlds (and tests) can share one caster or own one each. The cache must
/// be cleared when the caller swaps grids.
#[derive(Debug)]
pub struct Raycaster {
    cache: RayCache,
}

impl Raycaster {
    /// Caster with the default cache capacity.
    pub fn new() -> Self {
        Self {
            cache: RayCache::default(),
        }
    }

    /// Caster with an explicit cache capacity (0 disables caching).
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            cache: RayCache::new(capacity),
        }
    }

    /// March a ray from `origin` along `angle` until a wall or the horizon.
    ///
    /// Edge cases: a non-positive horizon returns `{0, clear}` immediately;
    /// an origin already inside a wall returns `{0, hit}` (the first sample
    /// is taken at distance zero).
    pub fn cast(
        &mut self,
        grid: &TileGrid,
        origin: Vec2,
        angle: f32,
        max_distance: f32,
    ) -> RayHit {
        if max_distance <= 0.0 {
            return RayHit::clear(0.0);
        }

        let key = RayKey::quantize(origin, angle);
        if let Some(hit) = self.cache.lookup(key, max_distance) {
            return hit;
        }

        let hit = march(grid, origin, angle, max_distance);
        self.cache.insert(key, hit, max_distance);
        hit
    }

    /// Approximate a finite-radius probe with a small fan of rays.
    ///
    /// `CONE_RAYS` rays are spread evenly across
    /// `[angle - half_spread, angle + half_spread]`; the closest result wins.
    pub fn cone_cast(
        &mut self,
        grid: &TileGrid,
        origin: Vec2,
        angle: f32,
        half_spread: f32,
        max_distance: f32,
    ) -> RayHit {
        let mut best = RayHit::clear(max_distance.max(0.0));
        for i in 0..CONE_RAYS {
            let t = i as f32 / (CONE_RAYS - 1) as f32;
            let a = angle - half_spread + 2.0 * half_spread * t;
            let hit = self.cast(grid, origin, a, max_distance);
            if hit.distance < best.distance {
                best = hit;
            }
        }
        best
    }

    /// Whether a straight segment from `from` to `to` crosses no wall.
    ///
    /// Zero-length queries are visible by definition.
    pub fn line_of_sight(&mut self, grid: &TileGrid, from: Vec2, to: Vec2) -> bool {
        let delta = to - from;
        let distance = delta.length();
        if distance <= f32::EPSILON {
            return true;
        }
        let bearing = delta.y.atan2(delta.x);
        let hit = self.cast(grid, from, bearing, distance + LOS_EPSILON);
        !hit.hit || hit.distance >= distance
    }

    /// Drop all memoized casts. Must be called when the grid is replaced.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of memoized casts currently held.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

impl Default for Raycaster {
    fn default() -> Self {
        Self::new()
    }
}

/// The raw march: sample every `RAY_STEP` grid units, floor to a cell, stop
/// on the first solid or out-of-bounds cell.
fn march(grid: &TileGrid, origin: Vec2, angle: f32, max_distance: f32) -> RayHit {
    let (sin, cos) = angle.sin_cos();
    let mut traveled = 0.0_f32;
    while traveled < max_distance {
        let x = origin.x + cos * traveled;
        let y = origin.y + sin * traveled;
        if grid.is_solid_at(x, y) {
            return RayHit::wall(traveled);
        }
        traveled += RAY_STEP;
    }
    RayHit::clear(max_distance)
}
