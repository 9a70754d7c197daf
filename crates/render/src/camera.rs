use std::f32::consts::FRAC_PI_3;

use glam::Vec2;

/// Viewer configuration for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Eye position in grid units.
    pub position: Vec2,
    /// Facing direction in radians.
    pub angle: f32,
    /// Horizontal field of view in radians.
    pub fov: f32,
}

impl Camera {
    pub fn new(position: Vec2, angle: f32) -> Self {
        Self {
            position,
            angle,
            fov: FRAC_PI_3,
        }
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }
}

/// Output surface dimensions in pixels (or character cells for the ASCII
/// backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

/// Projection tuning shared across frames.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Number of view rays (screen columns). Column pixel width is
    /// `viewport.width / ray_count`.
    pub ray_count: u32,
    /// Render horizon in grid units; rays and sprites beyond it are dropped.
    pub max_depth: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ray_count: 80,
            max_depth: 24.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_defaults_to_sixty_degree_fov() {
        let cam = Camera::new(Vec2::ZERO, 0.0);
        assert!((cam.fov - FRAC_PI_3).abs() < 1e-6);
    }

    #[test]
    fn config_defaults() {
        let cfg = RenderConfig::default();
        assert_eq!(cfg.ray_count, 80);
        assert!(cfg.max_depth > 0.0);
    }
}
