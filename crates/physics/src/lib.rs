//! Rigid Body layer: integration, narrow-phase collision, impulse response.
//!
//! # Invariants
//! - Static bodies never move and never accept forces or impulses.
//! - Contacts are ephemeral: produced, resolved, and reported within one tick.
//! - A failed unstick reverts the body; the pipeline never embeds a body in
//!   a wall and never panics mid-tick.

mod body;
mod contact;
mod narrow;
mod world;

pub use body::{BodyError, Collider, RigidBody};
pub use contact::{CollisionEvent, Contact};
pub use narrow::{body_aabb, collide};
pub use world::{PhysicsConfig, PhysicsError, PhysicsWorld};

pub fn crate_info() -> &'static str {
    "corridor-physics v0.1.0"
}
