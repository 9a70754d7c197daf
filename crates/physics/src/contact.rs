use glam::Vec2;
use serde::{Deserialize, Serialize};

use corridor_common::EntityId;

/// Narrow-phase result for one colliding pair, valid for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Unit vector pointing from body A toward body B.
    pub normal: Vec2,
    /// Overlap depth along the normal, never negative.
    pub penetration: f32,
    /// Representative contact point in world space.
    pub point: Vec2,
}

impl Contact {
    /// The same contact seen from B's side.
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Per-tick notification handed back to the entity/scene layer.
///
/// Trigger pairs report with `trigger == true` and receive no impulse or
/// positional response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub a: EntityId,
    pub b: EntityId,
    pub contact: Contact,
    pub trigger: bool,
}
