use glam::Vec2;

use corridor_grid::TileGrid;
use corridor_physics::{Collider, PhysicsWorld, RigidBody};
use corridor_raycast::{RayHit, Raycaster, is_valid_position};

use crate::level::{LevelError, LevelFile};

/// One independent world: grid, bodies, and the memoizing raycaster.
///
/// Everything the tick and render phases need is owned here and passed down
/// explicitly, so multiple simulations (and tests) can run side by side with
/// no shared state.
#[derive(Debug)]
pub struct Simulation {
    grid: TileGrid,
    physics: PhysicsWorld,
    raycaster: Raycaster,
}

impl Simulation {
    pub fn new(grid: TileGrid) -> Self {
        Self {
            grid,
            physics: PhysicsWorld::new(),
            raycaster: Raycaster::new(),
        }
    }

    /// Build a simulation from a level document, spawning a unit-mass circle
    /// body per spawn point.
    pub fn from_level(level: &LevelFile) -> Result<Self, LevelError> {
        let grid = level.to_grid()?;
        let mut sim = Self::new(grid);
        for spawn in &level.spawns {
            let body = RigidBody::new(
                Vec2::new(spawn.x, spawn.y),
                Collider::Circle {
                    radius: spawn.radius,
                },
                1.0,
            )?;
            sim.physics.insert(body);
        }
        tracing::info!(
            name = %level.name,
            spawns = level.spawns.len(),
            "simulation loaded from level"
        );
        Ok(sim)
    }

    /// Replace the grid wholesale (level transition). Always drops the ray
    /// cache in the same operation; stale distances from the previous level
    /// must not survive.
    pub fn load_level(&mut self, grid: TileGrid) {
        self.grid = grid;
        self.raycaster.clear_cache();
        tracing::info!("grid replaced, ray cache cleared");
    }

    /// The update phase of one tick: integrate, resolve, validate.
    pub fn update(&mut self, dt: f32) {
        self.physics.step(&self.grid, dt);
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    /// Split borrow for the render phase, which needs the grid immutably and
    /// the raycaster mutably at once.
    pub fn render_parts(&mut self) -> (&TileGrid, &mut Raycaster) {
        (&self.grid, &mut self.raycaster)
    }

    /// AI-layer query: march a single ray.
    pub fn cast(&mut self, origin: Vec2, angle: f32, max_distance: f32) -> RayHit {
        self.raycaster.cast(&self.grid, origin, angle, max_distance)
    }

    /// AI-layer query: finite-radius probe approximated by a ray fan.
    pub fn cone_cast(
        &mut self,
        origin: Vec2,
        angle: f32,
        half_spread: f32,
        max_distance: f32,
    ) -> RayHit {
        self.raycaster
            .cone_cast(&self.grid, origin, angle, half_spread, max_distance)
    }

    /// AI-layer query: is the segment wall-free.
    pub fn line_of_sight(&mut self, from: Vec2, to: Vec2) -> bool {
        self.raycaster.line_of_sight(&self.grid, from, to)
    }

    /// Movement query: can a body of `radius` stand at `point`.
    pub fn is_open(&self, point: Vec2, radius: f32) -> bool {
        is_valid_position(&self.grid, point, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Spawn;

    fn ring_level() -> LevelFile {
        LevelFile {
            name: "ring".into(),
            rows: vec![
                "#####".into(),
                "#...#".into(),
                "#...#".into(),
                "#...#".into(),
                "#####".into(),
            ],
            spawns: vec![Spawn {
                x: 2.5,
                y: 2.5,
                radius: 0.3,
            }],
        }
    }

    #[test]
    fn from_level_spawns_bodies() {
        let sim = Simulation::from_level(&ring_level()).unwrap();
        assert_eq!(sim.physics().body_count(), 1);
        let body = sim.physics().bodies().values().next().unwrap();
        assert_eq!(body.position, Vec2::new(2.5, 2.5));
    }

    #[test]
    fn invalid_spawn_radius_is_rejected() {
        let mut level = ring_level();
        level.spawns[0].radius = 0.0;
        assert!(matches!(
            Simulation::from_level(&level),
            Err(LevelError::Spawn(_))
        ));
    }

    #[test]
    fn eastward_cast_in_ring_level() {
        let mut sim = Simulation::from_level(&ring_level()).unwrap();
        let hit = sim.cast(Vec2::new(2.5, 2.5), 0.0, 10.0);
        assert!(hit.hit);
        assert!((hit.distance - 1.5).abs() <= corridor_raycast::RAY_STEP);
    }

    #[test]
    fn grid_replacement_invalidates_cached_casts() {
        let mut sim = Simulation::from_level(&ring_level()).unwrap();
        let before = sim.cast(Vec2::new(2.5, 2.5), 0.0, 10.0);
        assert!(before.hit);

        // Same footprint, but the interior wall ring is far away now.
        sim.load_level(TileGrid::walled(50, 50).unwrap());
        let after = sim.cast(Vec2::new(2.5, 2.5), 0.0, 10.0);
        assert!(!after.hit);
        assert_eq!(after.distance, 10.0);
    }

    #[test]
    fn update_advances_bodies() {
        let mut sim = Simulation::from_level(&ring_level()).unwrap();
        let id = *sim.physics().bodies().keys().next().unwrap();
        sim.physics_mut()
            .apply_impulse(id, Vec2::new(0.5, 0.0))
            .unwrap();
        sim.update(0.1);
        let body = sim.physics().get(id).unwrap();
        assert!(body.position.x > 2.5);
    }

    #[test]
    fn validity_passthrough() {
        let sim = Simulation::from_level(&ring_level()).unwrap();
        assert!(sim.is_open(Vec2::new(2.5, 2.5), 0.3));
        assert!(!sim.is_open(Vec2::new(4.5, 2.5), 0.3));
    }

    #[test]
    fn line_of_sight_passthrough() {
        let mut sim = Simulation::from_level(&ring_level()).unwrap();
        assert!(sim.line_of_sight(Vec2::new(1.5, 1.5), Vec2::new(3.5, 3.5)));
    }
}
