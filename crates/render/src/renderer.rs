use crate::camera::Viewport;
use crate::project::{DrawCmd, DrawList};

/// Backend-agnostic compositing interface. All backends implement this.
///
/// The backend consumes an ordered draw list; it never reaches back into the
/// world. Swapping in a GPU backend changes no producer code.
pub trait Renderer {
    /// The output type produced by this backend.
    type Output;

    /// Composite one frame from an ordered draw list.
    fn render(&self, list: &DrawList, viewport: Viewport) -> Self::Output;
}

/// Shade bands from near to far.
const WALL_RAMP: [char; 5] = ['@', '#', '=', '-', ':'];

/// Character-cell compositor.
///
/// Paints the draw list back-to-front into a text frame: top half sky,
/// bottom half floor, wall strips shaded by distance band, sprites as
/// glyph blocks. Serves the CLI and tests; pixel backends implement the
/// same trait.
#[derive(Debug, Default)]
pub struct AsciiRenderer;

impl AsciiRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for AsciiRenderer {
    type Output = String;

    fn render(&self, list: &DrawList, viewport: Viewport) -> String {
        let width = viewport.width as usize;
        let height = viewport.height as usize;
        let mut frame = vec![vec![' '; width]; height];

        // Floor under the horizon line.
        for row in frame.iter_mut().skip(height / 2) {
            row.fill('.');
        }

        // The list arrives farthest-first; later commands overdraw.
        for cmd in &list.commands {
            match cmd {
                DrawCmd::Wall(slab) => {
                    let glyph = ramp_glyph(slab.shade);
                    let x0 = (slab.column as f32 * slab.width) as usize;
                    let x1 = (((slab.column + 1) as f32 * slab.width).ceil() as usize).min(width);
                    let y0 = slab.top.max(0.0) as usize;
                    let y1 = ((slab.top + slab.height).ceil() as usize).min(height);
                    for row in frame.iter_mut().take(y1).skip(y0.min(height)) {
                        for cell in row.iter_mut().take(x1).skip(x0) {
                            *cell = glyph;
                        }
                    }
                }
                DrawCmd::Sprite(quad) => {
                    let half_w = (quad.height / 4.0).max(0.5);
                    let x0 = (quad.screen_x - half_w).max(0.0) as usize;
                    let x1 = ((quad.screen_x + half_w).ceil() as usize).min(width);
                    let top = height as f32 / 2.0 - quad.height / 2.0;
                    let y0 = top.max(0.0) as usize;
                    let y1 = ((top + quad.height).ceil() as usize).min(height);
                    for row in frame.iter_mut().take(y1).skip(y0.min(height)) {
                        for cell in row.iter_mut().take(x1).skip(x0) {
                            *cell = quad.glyph;
                        }
                    }
                }
            }
        }

        let mut out = String::with_capacity(height * (width + 1));
        for row in &frame {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

fn ramp_glyph(shade: f32) -> char {
    let band = ((1.0 - shade.clamp(0.0, 1.0)) * (WALL_RAMP.len() - 1) as f32).round() as usize;
    WALL_RAMP[band.min(WALL_RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, RenderConfig};
    use crate::project::{ProjectionRenderer, Sprite};
    use corridor_grid::TileGrid;
    use corridor_raycast::Raycaster;
    use glam::Vec2;

    fn frame_lines(frame: &str) -> Vec<&str> {
        frame.lines().collect()
    }

    #[test]
    fn frame_matches_viewport_dimensions() {
        let grid = TileGrid::walled(8, 8).unwrap();
        let mut caster = Raycaster::new();
        let projector = ProjectionRenderer::new(RenderConfig {
            ray_count: 40,
            max_depth: 16.0,
        });
        let viewport = Viewport {
            width: 40,
            height: 12,
        };
        let list = projector.compose(
            &grid,
            &mut caster,
            &Camera::new(Vec2::new(4.0, 4.0), 0.0),
            viewport,
            &[],
        );
        let frame = AsciiRenderer::new().render(&list, viewport);
        let lines = frame_lines(&frame);
        assert_eq!(lines.len(), 12);
        assert!(lines.iter().all(|l| l.chars().count() == 40));
    }

    #[test]
    fn empty_list_renders_sky_and_floor() {
        let viewport = Viewport {
            width: 10,
            height: 4,
        };
        let frame = AsciiRenderer::new().render(&DrawList::default(), viewport);
        let lines = frame_lines(&frame);
        assert_eq!(lines[0], "          ");
        assert_eq!(lines[3], "..........");
    }

    #[test]
    fn nearer_sprite_overdraws_wall() {
        let grid = TileGrid::walled(8, 8).unwrap();
        let mut caster = Raycaster::new();
        let projector = ProjectionRenderer::new(RenderConfig {
            ray_count: 20,
            max_depth: 16.0,
        });
        let viewport = Viewport {
            width: 20,
            height: 10,
        };
        let sprite = Sprite {
            position: Vec2::new(5.0, 4.0),
            size: 0.8,
            glyph: 'e',
        };
        let list = projector.compose(
            &grid,
            &mut caster,
            &Camera::new(Vec2::new(4.0, 4.0), 0.0),
            viewport,
            &[sprite],
        );
        let frame = AsciiRenderer::new().render(&list, viewport);
        // The sprite sits between the eye and the east wall: its glyph
        // must survive compositing near screen center.
        assert!(frame.contains('e'));
    }

    #[test]
    fn ramp_spans_near_to_far() {
        assert_eq!(ramp_glyph(1.0), '@');
        assert_eq!(ramp_glyph(0.0), ':');
    }
}
