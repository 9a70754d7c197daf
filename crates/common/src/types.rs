use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an entity known to the spatial core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Collision layer membership plus the set of layers this entity collides with.
///
/// An empty mask means "collides with every layer". A non-empty mask is an
/// allowlist of layer names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerFilter {
    pub layer: String,
    pub mask: BTreeSet<String>,
}

impl LayerFilter {
    /// Filter on the given layer that collides with everything.
    pub fn on_layer(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            mask: BTreeSet::new(),
        }
    }

    /// Restrict the mask to the given layers.
    pub fn with_mask<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mask = layers.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this filter accepts contacts with `other`'s layer.
    pub fn accepts(&self, other: &LayerFilter) -> bool {
        self.mask.is_empty() || self.mask.contains(&other.layer)
    }

    /// Whether the pair collides: both sides must accept the other.
    pub fn pair_collides(&self, other: &LayerFilter) -> bool {
        self.accepts(other) && other.accepts(self)
    }
}

impl Default for LayerFilter {
    fn default() -> Self {
        Self::on_layer("default")
    }
}

/// Axis-aligned bounding box used for broad rejection before narrow-phase tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` extending `half_extents` in each direction.
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Whether two boxes overlap (touching edges count as overlap).
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Clamp a point to lie inside the box.
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}
