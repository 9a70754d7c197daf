//! Shared types for the corridor spatial core.
//!
//! # Invariants
//! - Value types here are cheap to copy and carry no behavior beyond queries.
//! - Everything that crosses the entity/scene boundary serializes with serde.

pub mod math;
pub mod types;

pub use math::normalize_angle;
pub use types::{Aabb, EntityId, LayerFilter};
