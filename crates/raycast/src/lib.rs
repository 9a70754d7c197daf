//! Raycaster: fixed-step ray marching over the occupancy grid.
//!
//! # Invariants
//! - A cast never returns a negative distance or exceeds its horizon.
//! - Monotonicity: widening the horizon never shortens a reported hit.
//! - Cached results are only reused for horizons they actually answer.

mod cache;
mod caster;
pub mod validity;

pub use cache::{RayCache, RayKey};
pub use caster::{CONE_RAYS, RAY_STEP, RayHit, Raycaster};
pub use validity::{find_nearest_valid_position, is_valid_position};

pub fn crate_info() -> &'static str {
    "corridor-raycast v0.1.0"
}
