use std::cmp::Ordering;

use glam::Vec2;

use corridor_common::normalize_angle;
use corridor_grid::TileGrid;
use corridor_raycast::Raycaster;

use crate::camera::{Camera, RenderConfig, Viewport};

/// Floor applied to every distance before the perspective divide. Without it
/// a body pressed against the eye produces an unbounded slab height.
pub const MIN_DEPTH: f32 = 1e-4;

/// A billboard entity handed in by the scene layer.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub position: Vec2,
    /// Apparent size multiplier; 1.0 renders wall-height at one unit away.
    pub size: f32,
    /// Glyph used by the ASCII backend to fill the quad.
    pub glyph: char,
}

/// One vertical wall strip for a single screen column.
#[derive(Debug, Clone, Copy)]
pub struct WallSlab {
    pub column: u32,
    pub distance: f32,
    /// On-screen strip height in pixels.
    pub height: f32,
    /// Top edge of the strip (slabs are vertically centered).
    pub top: f32,
    /// Column strip width in pixels.
    pub width: f32,
    /// 0 (horizon) to 1 (at the eye), linear in distance.
    pub shade: f32,
}

/// A projected sprite billboard.
#[derive(Debug, Clone, Copy)]
pub struct SpriteQuad {
    pub screen_x: f32,
    pub distance: f32,
    pub height: f32,
    pub shade: f32,
    pub glyph: char,
}

/// A single draw command; the list mixes walls and sprites so one sort
/// yields correct overdraw.
#[derive(Debug, Clone, Copy)]
pub enum DrawCmd {
    Wall(WallSlab),
    Sprite(SpriteQuad),
}

impl DrawCmd {
    pub fn distance(&self) -> f32 {
        match self {
            DrawCmd::Wall(slab) => slab.distance,
            DrawCmd::Sprite(quad) => quad.distance,
        }
    }
}

/// Frame output: draw commands ordered farthest-first.
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Builds the per-frame draw list from the grid and the sprite set.
#[derive(Debug, Clone, Default)]
pub struct ProjectionRenderer {
    pub config: RenderConfig,
}

impl ProjectionRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Project one frame.
    ///
    /// Casts one ray per column for wall slabs, projects and culls sprites,
    /// then sorts everything by descending distance.
    pub fn compose(
        &self,
        grid: &TileGrid,
        caster: &mut Raycaster,
        camera: &Camera,
        viewport: Viewport,
        sprites: &[Sprite],
    ) -> DrawList {
        let _span = tracing::debug_span!("compose_frame", sprites = sprites.len()).entered();

        let ray_count = self.config.ray_count.max(1);
        let column_width = viewport.width as f32 / ray_count as f32;
        let half_height = viewport.height as f32 / 2.0;

        let mut commands = Vec::with_capacity(ray_count as usize + sprites.len());

        for column in 0..ray_count {
            let t = column as f32 / ray_count as f32;
            let angle = camera.angle - camera.fov / 2.0 + camera.fov * t;
            let hit = caster.cast(grid, camera.position, angle, self.config.max_depth);
            if !hit.hit {
                // Clear to the horizon: nothing to draw in this column.
                continue;
            }
            let distance = hit.distance.max(MIN_DEPTH);
            let height = half_height / distance;
            commands.push(DrawCmd::Wall(WallSlab {
                column,
                distance,
                height,
                top: half_height - height / 2.0,
                width: column_width,
                shade: self.shade(distance),
            }));
        }

        for sprite in sprites {
            if let Some(quad) =
                self.project_sprite(grid, caster, camera, viewport, half_height, sprite)
            {
                commands.push(DrawCmd::Sprite(quad));
            }
        }

        // Farthest first; nearer commands overdraw.
        commands.sort_by(|a, b| {
            b.distance()
                .partial_cmp(&a.distance())
                .unwrap_or(Ordering::Equal)
        });

        tracing::trace!(commands = commands.len(), "frame composed");
        DrawList { commands }
    }

    /// Project one sprite, or cull it: outside the half-FOV, past the
    /// horizon, or with a wall between it and the eye.
    fn project_sprite(
        &self,
        grid: &TileGrid,
        caster: &mut Raycaster,
        camera: &Camera,
        viewport: Viewport,
        half_height: f32,
        sprite: &Sprite,
    ) -> Option<SpriteQuad> {
        let delta = sprite.position - camera.position;
        let distance = delta.length();
        if distance > self.config.max_depth {
            return None;
        }

        let bearing = delta.y.atan2(delta.x);
        let relative = normalize_angle(bearing - camera.angle);
        if relative.abs() > camera.fov / 2.0 {
            return None;
        }

        if !caster.line_of_sight(grid, camera.position, sprite.position) {
            return None;
        }

        let distance = distance.max(MIN_DEPTH);
        let screen_x = (relative + camera.fov / 2.0) / camera.fov * viewport.width as f32;
        Some(SpriteQuad {
            screen_x,
            distance,
            height: half_height / distance * sprite.size,
            shade: self.shade(distance),
            glyph: sprite.glyph,
        })
    }

    /// Linear distance falloff faking depth.
    fn shade(&self, distance: f32) -> f32 {
        (1.0 - distance / self.config.max_depth).clamp(0.0, 1.0)
    }
}
