use std::collections::BTreeMap;

use glam::Vec2;

use corridor_common::EntityId;
use corridor_grid::TileGrid;
use corridor_raycast::{find_nearest_valid_position, is_valid_position};

use crate::body::{BodyError, RigidBody};
use crate::contact::{CollisionEvent, Contact};
use crate::narrow::collide;

/// Tuning knobs for resolution and the wall unstick search.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Fraction of the penetration corrected per tick. Partial correction is
    /// deliberate: correcting fully every frame makes resting contacts jitter.
    pub correction_percent: f32,
    /// Overlap tolerated before positional correction kicks in.
    pub slop: f32,
    /// A contact surface normal steeper than this (screen-space up) grounds
    /// the body it supports.
    pub ground_normal_threshold: f32,
    /// How far the unstick search probes away from an embedded body.
    pub unstick_radius: f32,
    /// Ring spacing of the unstick search.
    pub unstick_step: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            correction_percent: 0.2,
            slop: 0.01,
            ground_normal_threshold: 0.5,
            unstick_radius: 2.0,
            unstick_step: 0.25,
        }
    }
}

/// Errors from world-level body operations.
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("unknown body {0:?}")]
    UnknownBody(EntityId),
    #[error(transparent)]
    Body(#[from] BodyError),
}

/// All rigid bodies of one world plus the per-tick pipeline.
///
/// Bodies live in a `BTreeMap` so pair iteration order is deterministic.
/// The grid is injected per call rather than owned; one `PhysicsWorld` can
/// therefore follow its level through wholesale grid replacement.
#[derive(Debug, Default)]
pub struct PhysicsWorld {
    bodies: BTreeMap<EntityId, RigidBody>,
    events: Vec<CollisionEvent>,
    config: PhysicsConfig,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: BTreeMap::new(),
            events: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Add a body under a fresh id.
    pub fn insert(&mut self, body: RigidBody) -> EntityId {
        let id = EntityId::new();
        self.bodies.insert(id, body);
        id
    }

    /// Add a body under a caller-chosen id (entity layer owns identity).
    pub fn insert_with_id(&mut self, id: EntityId, body: RigidBody) {
        self.bodies.insert(id, body);
    }

    pub fn remove(&mut self, id: EntityId) -> Option<RigidBody> {
        self.bodies.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&RigidBody> {
        self.bodies.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut RigidBody> {
        self.bodies.get_mut(&id)
    }

    pub fn bodies(&self) -> &BTreeMap<EntityId, RigidBody> {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn apply_force(&mut self, id: EntityId, force: Vec2) -> Result<(), PhysicsError> {
        let body = self
            .bodies
            .get_mut(&id)
            .ok_or(PhysicsError::UnknownBody(id))?;
        body.apply_force(force)?;
        Ok(())
    }

    pub fn apply_timed_force(
        &mut self,
        id: EntityId,
        force: Vec2,
        duration: f32,
    ) -> Result<(), PhysicsError> {
        let body = self
            .bodies
            .get_mut(&id)
            .ok_or(PhysicsError::UnknownBody(id))?;
        body.apply_timed_force(force, duration)?;
        Ok(())
    }

    pub fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) -> Result<(), PhysicsError> {
        let body = self
            .bodies
            .get_mut(&id)
            .ok_or(PhysicsError::UnknownBody(id))?;
        body.apply_impulse(impulse)?;
        Ok(())
    }

    /// Take the collision events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only access to pending collision events.
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// One simulation tick: integrate, detect and resolve pairs, then keep
    /// every body out of the walls.
    pub fn step(&mut self, grid: &TileGrid, dt: f32) {
        let _span = tracing::debug_span!("physics_step", bodies = self.bodies.len()).entered();

        // Pre-integration positions are the fallback when unstick fails.
        let previous: BTreeMap<EntityId, Vec2> = self
            .bodies
            .iter()
            .map(|(id, b)| (*id, b.position))
            .collect();

        for body in self.bodies.values_mut() {
            body.grounded = false;
            body.integrate(dt);
        }

        let pairs = self.detect_pairs();
        tracing::trace!(contacts = pairs.len(), "narrow phase complete");
        for (a, b, contact) in pairs {
            self.resolve(a, b, contact);
        }

        self.enforce_wall_validity(grid, &previous);
    }

    /// All colliding pairs this tick. Static-static pairs are skipped, layer
    /// masks filter the rest, and the AABB early-out lives inside `collide`.
    fn detect_pairs(&self) -> Vec<(EntityId, EntityId, Contact)> {
        let ids: Vec<EntityId> = self.bodies.keys().copied().collect();
        let mut found = Vec::new();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let (Some(a), Some(b)) = (self.bodies.get(&ids[i]), self.bodies.get(&ids[j]))
                else {
                    continue;
                };
                if a.is_static && b.is_static {
                    continue;
                }
                if !a.layers.pair_collides(&b.layers) {
                    continue;
                }
                if let Some(contact) = collide(a, b) {
                    found.push((ids[i], ids[j], contact));
                }
            }
        }
        found
    }

    /// Impulse plus positional correction for one contact, and the grounded
    /// side effect. Trigger pairs only report.
    fn resolve(&mut self, id_a: EntityId, id_b: EntityId, contact: Contact) {
        let (Some(a), Some(b)) = (self.bodies.get(&id_a), self.bodies.get(&id_b)) else {
            return;
        };

        let trigger = a.is_trigger || b.is_trigger;
        self.events.push(CollisionEvent {
            a: id_a,
            b: id_b,
            contact,
            trigger,
        });
        if trigger {
            return;
        }

        let inv_a = a.inv_mass();
        let inv_b = b.inv_mass();
        let inv_sum = inv_a + inv_b;
        if inv_sum == 0.0 {
            return;
        }

        let normal = contact.normal;
        let vel_along_normal = (b.velocity - a.velocity).dot(normal);
        // Already separating: leave the pair to drift apart on its own.
        if vel_along_normal > 0.0 {
            return;
        }

        let restitution = a.restitution().min(b.restitution());
        let j = -(1.0 + restitution) * vel_along_normal / inv_sum;
        let impulse = normal * j;

        let correction_depth = (contact.penetration - self.config.slop).max(0.0);
        let correction =
            normal * (correction_depth / inv_sum * self.config.correction_percent);

        let threshold = self.config.ground_normal_threshold;
        tracing::trace!(?id_a, ?id_b, j, penetration = contact.penetration, "resolving contact");

        if let Some(a) = self.bodies.get_mut(&id_a) {
            a.velocity -= impulse * inv_a;
            a.position -= correction * inv_a;
            // Surface normal for A is -normal; pointing up means supported.
            if normal.y > threshold {
                a.grounded = true;
            }
        }
        if let Some(b) = self.bodies.get_mut(&id_b) {
            b.velocity += impulse * inv_b;
            b.position += correction * inv_b;
            if normal.y < -threshold {
                b.grounded = true;
            }
        }
    }

    /// Clamp every dynamic body to a valid (non-wall) position. Bodies the
    /// unstick search cannot free revert to where the tick started and stop.
    fn enforce_wall_validity(&mut self, grid: &TileGrid, previous: &BTreeMap<EntityId, Vec2>) {
        for (id, body) in self.bodies.iter_mut() {
            if body.is_static {
                continue;
            }
            let radius = body.collider().bounding_radius(body.scale());
            if is_valid_position(grid, body.position, radius) {
                continue;
            }
            match find_nearest_valid_position(
                grid,
                body.position,
                radius,
                self.config.unstick_radius,
                self.config.unstick_step,
            ) {
                Some(free) => body.position = free,
                None => {
                    tracing::debug!(?id, "unstick failed, blocking move");
                    if let Some(prev) = previous.get(id) {
                        body.position = *prev;
                    }
                    body.velocity = Vec2::ZERO;
                }
            }
        }
    }
}
