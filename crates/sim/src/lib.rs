//! Simulation context: the explicit world bundle (grid + bodies + raycaster)
//! passed to every call, level loading, and frame pacing.
//!
//! # Invariants
//! - No global state: independent worlds run side by side.
//! - Replacing the grid always clears the ray cache in the same operation.
//! - The frame gate is advisory; a slow frame runs late, never aborts.

mod clock;
mod context;
mod level;

pub use clock::{FrameGate, FrameTimer};
pub use context::Simulation;
pub use level::{LevelError, LevelFile, Spawn};

pub fn crate_info() -> &'static str {
    "corridor-sim v0.1.0"
}
