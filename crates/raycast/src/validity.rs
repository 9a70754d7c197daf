//! Position validity and unstick search against the occupancy grid.
//!
//! The circle test samples 8 ring points rather than sweeping the true
//! circle against cell edges. Walls thin enough to fit entirely between two
//! samples at very small radii are missed; with one-unit cells and the body
//! radii in use this does not occur. The approximation is deliberate and
//! should not be silently "fixed" here.

use std::f32::consts::TAU;

use glam::Vec2;
use corridor_grid::TileGrid;

/// cos(45°), the diagonal sample scale.
const DIAGONAL: f32 = 0.707;

/// Whether a body of `radius` can stand at `point`.
///
/// `radius == 0` degenerates to a single-cell occupancy check.
pub fn is_valid_position(grid: &TileGrid, point: Vec2, radius: f32) -> bool {
    if grid.is_solid_at(point.x, point.y) {
        return false;
    }
    if radius <= 0.0 {
        return true;
    }
    let d = radius * DIAGONAL;
    let offsets = [
        Vec2::new(radius, 0.0),
        Vec2::new(-radius, 0.0),
        Vec2::new(0.0, radius),
        Vec2::new(0.0, -radius),
        Vec2::new(d, d),
        Vec2::new(d, -d),
        Vec2::new(-d, d),
        Vec2::new(-d, -d),
    ];
    offsets
        .iter()
        .all(|o| !grid.is_solid_at(point.x + o.x, point.y + o.y))
}

/// Search outward from `point` for the nearest position where a body of
/// `radius` fits.
///
/// Probes concentric rings (`step_size` apart, out to `max_search_radius`),
/// sampling each ring evenly around its circumference. Returns the input
/// unchanged when it is already valid, and `None` when the search exhausts —
/// the caller decides whether to block the move, teleport, or log; this
/// function never displaces beyond the search radius.
pub fn find_nearest_valid_position(
    grid: &TileGrid,
    point: Vec2,
    radius: f32,
    max_search_radius: f32,
    step_size: f32,
) -> Option<Vec2> {
    if is_valid_position(grid, point, radius) {
        return Some(point);
    }
    if step_size <= 0.0 || max_search_radius <= 0.0 {
        return None;
    }

    let mut ring = step_size;
    while ring <= max_search_radius {
        let samples = ((TAU * ring / step_size).ceil() as usize).max(8);
        for i in 0..samples {
            let a = TAU * i as f32 / samples as f32;
            let candidate = point + Vec2::new(a.cos(), a.sin()) * ring;
            if is_valid_position(grid, candidate, radius) {
                tracing::debug!(
                    from = ?point,
                    to = ?candidate,
                    ring,
                    "unstick search found free position"
                );
                return Some(candidate);
            }
        }
        ring += step_size;
    }
    tracing::debug!(from = ?point, max_search_radius, "unstick search exhausted");
    None
}
