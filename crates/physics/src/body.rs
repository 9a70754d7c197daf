use glam::Vec2;
use serde::{Deserialize, Serialize};

use corridor_common::LayerFilter;

/// Collision shape attached to a body, in local units before world scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
}

impl Collider {
    /// Half extents of the bounding box after world scale.
    pub fn half_extents(&self, scale: f32) -> Vec2 {
        match *self {
            Collider::Circle { radius } => Vec2::splat(radius * scale),
            Collider::Rect { width, height } => Vec2::new(width, height) * 0.5 * scale,
        }
    }

    /// Radius of the circle that encloses the shape after world scale.
    /// Used for the sampled wall-validity test.
    pub fn bounding_radius(&self, scale: f32) -> f32 {
        match *self {
            Collider::Circle { radius } => radius * scale,
            Collider::Rect { width, height } => width.max(height) * 0.5 * scale,
        }
    }

    fn validate(&self) -> Result<(), BodyError> {
        let ok = match *self {
            Collider::Circle { radius } => radius.is_finite() && radius > 0.0,
            Collider::Rect { width, height } => {
                width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
            }
        };
        if ok {
            Ok(())
        } else {
            Err(BodyError::InvalidCollider(*self))
        }
    }
}

/// Errors from body construction and misuse.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),
    #[error("drag must be in [0, 1), got {0}")]
    InvalidDrag(f32),
    #[error("restitution must be in [0, 1], got {0}")]
    InvalidRestitution(f32),
    #[error("collider extents must be positive, got {0:?}")]
    InvalidCollider(Collider),
    #[error("scale must be positive and finite, got {0}")]
    InvalidScale(f32),
    #[error("static bodies do not accept forces or impulses")]
    StaticBody,
}

/// A force accumulated on a body. Untimed forces last one tick; timed forces
/// expire as their remaining duration runs out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Force {
    vector: Vec2,
    remaining: Option<f32>,
}

/// Kinematic and dynamic state for one entity.
///
/// Invariant-bearing parameters (mass, drag, restitution, scale, collider)
/// are validated at construction and behind setters; motion state is public
/// because the entity layer writes it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Recomputed from the force sum every tick, zeroed afterwards.
    pub acceleration: Vec2,
    pub rotation: f32,
    pub angular_velocity: f32,
    /// Zeroed after each integration, like linear acceleration.
    pub angular_acceleration: f32,
    /// Downward (+y, screen-space) acceleration contribution per unit mass.
    pub gravity: f32,
    /// Set during resolution when a contact supports the body from below.
    pub grounded: bool,
    pub is_static: bool,
    /// Kinematic bodies integrate velocity but their position and rotation
    /// are caller-owned.
    pub is_kinematic: bool,
    /// Trigger bodies report contacts but receive no response.
    pub is_trigger: bool,
    pub layers: LayerFilter,
    mass: f32,
    drag: f32,
    angular_drag: f32,
    restitution: f32,
    scale: f32,
    collider: Collider,
    forces: Vec<Force>,
    impulses: Vec<Vec2>,
}

impl RigidBody {
    pub fn new(position: Vec2, collider: Collider, mass: f32) -> Result<Self, BodyError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(BodyError::InvalidMass(mass));
        }
        collider.validate()?;
        Ok(Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            gravity: 0.0,
            grounded: false,
            is_static: false,
            is_kinematic: false,
            is_trigger: false,
            layers: LayerFilter::default(),
            mass,
            drag: 0.0,
            angular_drag: 0.0,
            restitution: 0.0,
            scale: 1.0,
            collider,
            forces: Vec::new(),
            impulses: Vec::new(),
        })
    }

    pub fn with_drag(mut self, drag: f32, angular_drag: f32) -> Result<Self, BodyError> {
        for d in [drag, angular_drag] {
            if !d.is_finite() || !(0.0..1.0).contains(&d) {
                return Err(BodyError::InvalidDrag(d));
            }
        }
        self.drag = drag;
        self.angular_drag = angular_drag;
        Ok(self)
    }

    pub fn with_restitution(mut self, restitution: f32) -> Result<Self, BodyError> {
        if !restitution.is_finite() || !(0.0..=1.0).contains(&restitution) {
            return Err(BodyError::InvalidRestitution(restitution));
        }
        self.restitution = restitution;
        Ok(self)
    }

    pub fn with_scale(mut self, scale: f32) -> Result<Self, BodyError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(BodyError::InvalidScale(scale));
        }
        self.scale = scale;
        Ok(self)
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_layers(mut self, layers: LayerFilter) -> Self {
        self.layers = layers;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn kinematic(mut self) -> Self {
        self.is_kinematic = true;
        self
    }

    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Inverse mass; zero for static bodies so impulses vanish on them.
    pub fn inv_mass(&self) -> f32 {
        if self.is_static { 0.0 } else { 1.0 / self.mass }
    }

    pub fn drag(&self) -> f32 {
        self.drag
    }

    pub fn angular_drag(&self) -> f32 {
        self.angular_drag
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn collider(&self) -> Collider {
        self.collider
    }

    /// Accumulate a force for the next integration only.
    pub fn apply_force(&mut self, force: Vec2) -> Result<(), BodyError> {
        if self.is_static {
            return Err(BodyError::StaticBody);
        }
        self.forces.push(Force {
            vector: force,
            remaining: None,
        });
        Ok(())
    }

    /// Accumulate a force that persists for `duration` seconds of simulation.
    pub fn apply_timed_force(&mut self, force: Vec2, duration: f32) -> Result<(), BodyError> {
        if self.is_static {
            return Err(BodyError::StaticBody);
        }
        self.forces.push(Force {
            vector: force,
            remaining: Some(duration),
        });
        Ok(())
    }

    /// Apply an instantaneous velocity change, consumed by the next
    /// integration.
    pub fn apply_impulse(&mut self, impulse: Vec2) -> Result<(), BodyError> {
        if self.is_static {
            return Err(BodyError::StaticBody);
        }
        self.impulses.push(impulse);
        Ok(())
    }

    /// Advance the body by `dt` seconds.
    ///
    /// Force sum (plus gravity) becomes acceleration; impulses hit velocity
    /// directly; drag damps per tick; kinematic bodies stop short of the
    /// position update. Static bodies never reach this path.
    pub fn integrate(&mut self, dt: f32) {
        if self.is_static {
            return;
        }

        let mut total = Vec2::new(0.0, self.gravity * self.mass);
        for force in &self.forces {
            total += force.vector;
        }
        self.acceleration = total / self.mass;

        for impulse in self.impulses.drain(..) {
            self.velocity += impulse / self.mass;
        }

        self.velocity += self.acceleration * dt;
        self.velocity *= 1.0 - self.drag;

        self.angular_velocity += self.angular_acceleration * dt;
        self.angular_velocity *= 1.0 - self.angular_drag;

        if !self.is_kinematic {
            self.position += self.velocity * dt;
            self.rotation += self.angular_velocity * dt;
        }

        // Untimed forces last exactly one tick; timed ones burn down.
        self.forces.retain_mut(|f| match f.remaining.as_mut() {
            Some(remaining) => {
                *remaining -= dt;
                *remaining > 0.0
            }
            None => false,
        });

        self.acceleration = Vec2::ZERO;
        self.angular_acceleration = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(radius: f32) -> Collider {
        Collider::Circle { radius }
    }

    #[test]
    fn construction_validates_mass() {
        assert!(matches!(
            RigidBody::new(Vec2::ZERO, circle(0.5), 0.0),
            Err(BodyError::InvalidMass(_))
        ));
        assert!(matches!(
            RigidBody::new(Vec2::ZERO, circle(0.5), -2.0),
            Err(BodyError::InvalidMass(_))
        ));
        assert!(matches!(
            RigidBody::new(Vec2::ZERO, circle(0.5), f32::NAN),
            Err(BodyError::InvalidMass(_))
        ));
    }

    #[test]
    fn construction_validates_collider() {
        assert!(matches!(
            RigidBody::new(Vec2::ZERO, circle(0.0), 1.0),
            Err(BodyError::InvalidCollider(_))
        ));
        assert!(matches!(
            RigidBody::new(Vec2::ZERO, Collider::Rect { width: 1.0, height: -1.0 }, 1.0),
            Err(BodyError::InvalidCollider(_))
        ));
    }

    #[test]
    fn drag_and_restitution_ranges() {
        let body = RigidBody::new(Vec2::ZERO, circle(0.5), 1.0).unwrap();
        assert!(body.clone().with_drag(1.0, 0.0).is_err());
        assert!(body.clone().with_restitution(1.5).is_err());
        assert!(body.clone().with_drag(0.1, 0.05).is_ok());
        assert!(body.with_restitution(1.0).is_ok());
    }

    #[test]
    fn gravity_accelerates_downward() {
        let mut body = RigidBody::new(Vec2::ZERO, circle(0.5), 2.0)
            .unwrap()
            .with_gravity(10.0);
        body.integrate(0.5);
        // v = g * dt, independent of mass
        assert!((body.velocity.y - 5.0).abs() < 1e-5);
        assert!((body.position.y - 2.5).abs() < 1e-5);
    }

    #[test]
    fn untimed_force_lasts_one_tick() {
        let mut body = RigidBody::new(Vec2::ZERO, circle(0.5), 1.0).unwrap();
        body.apply_force(Vec2::new(10.0, 0.0)).unwrap();
        body.integrate(0.1);
        let after_one = body.velocity.x;
        assert!(after_one > 0.0);
        body.integrate(0.1);
        assert!((body.velocity.x - after_one).abs() < 1e-6);
    }

    #[test]
    fn timed_force_expires_by_duration() {
        let mut body = RigidBody::new(Vec2::ZERO, circle(0.5), 1.0).unwrap();
        body.apply_timed_force(Vec2::new(1.0, 0.0), 0.25).unwrap();
        body.integrate(0.1);
        body.integrate(0.1);
        body.integrate(0.1); // expires during this tick
        let settled = body.velocity.x;
        body.integrate(0.1);
        assert!((body.velocity.x - settled).abs() < 1e-6);
        assert!((settled - 0.3).abs() < 1e-5);
    }

    #[test]
    fn impulse_consumed_once() {
        let mut body = RigidBody::new(Vec2::ZERO, circle(0.5), 2.0).unwrap();
        body.apply_impulse(Vec2::new(4.0, 0.0)).unwrap();
        body.integrate(0.1);
        assert!((body.velocity.x - 2.0).abs() < 1e-6);
        body.integrate(0.1);
        assert!((body.velocity.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn drag_damps_velocity_per_tick() {
        let mut body = RigidBody::new(Vec2::ZERO, circle(0.5), 1.0)
            .unwrap()
            .with_drag(0.5, 0.0)
            .unwrap();
        body.velocity = Vec2::new(8.0, 0.0);
        body.integrate(0.1);
        assert!((body.velocity.x - 4.0).abs() < 1e-5);
    }

    #[test]
    fn static_body_rejects_application() {
        let mut body = RigidBody::new(Vec2::ZERO, circle(0.5), 1.0).unwrap().fixed();
        assert!(matches!(
            body.apply_force(Vec2::X),
            Err(BodyError::StaticBody)
        ));
        assert!(matches!(
            body.apply_impulse(Vec2::X),
            Err(BodyError::StaticBody)
        ));
        assert_eq!(body.inv_mass(), 0.0);
    }

    #[test]
    fn static_body_never_integrates() {
        let mut body = RigidBody::new(Vec2::new(3.0, 4.0), circle(0.5), 1.0)
            .unwrap()
            .with_gravity(100.0)
            .fixed();
        body.velocity = Vec2::new(5.0, 5.0);
        for _ in 0..100 {
            body.integrate(0.1);
        }
        assert_eq!(body.position, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn kinematic_body_keeps_position() {
        let mut body = RigidBody::new(Vec2::new(1.0, 1.0), circle(0.5), 1.0)
            .unwrap()
            .kinematic();
        body.apply_force(Vec2::new(10.0, 0.0)).unwrap();
        body.integrate(0.1);
        assert!(body.velocity.x > 0.0);
        assert_eq!(body.position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn collider_bounding_radius_scales() {
        let c = Collider::Circle { radius: 0.5 };
        assert!((c.bounding_radius(2.0) - 1.0).abs() < 1e-6);
        let r = Collider::Rect { width: 2.0, height: 1.0 };
        assert!((r.bounding_radius(1.0) - 1.0).abs() < 1e-6);
    }
}
