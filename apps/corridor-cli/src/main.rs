use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

use corridor_render::{
    AsciiRenderer, Camera, ProjectionRenderer, RenderConfig, Renderer, Sprite, Viewport,
};
use corridor_sim::{FrameTimer, LevelFile, Simulation};

#[derive(Parser)]
#[command(name = "corridor-cli", about = "CLI for the corridor spatial core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Cast a single ray through a level
    Cast {
        /// Level file (JSON); a built-in demo level when omitted
        #[arg(short, long)]
        level: Option<PathBuf>,
        /// Ray origin x in grid units
        #[arg(short, long)]
        x: f32,
        /// Ray origin y in grid units
        #[arg(short, long)]
        y: f32,
        /// Ray angle in degrees
        #[arg(short, long, default_value = "0")]
        angle: f32,
        /// Horizon in grid units
        #[arg(short, long, default_value = "32")]
        max: f32,
        /// Half spread in degrees; fans a cone cast when non-zero
        #[arg(short, long, default_value = "0")]
        spread: f32,
    },
    /// Render one ASCII frame from a viewpoint
    Render {
        /// Level file (JSON); a built-in demo level when omitted
        #[arg(short, long)]
        level: Option<PathBuf>,
        #[arg(short, long)]
        x: f32,
        #[arg(short, long)]
        y: f32,
        /// View angle in degrees
        #[arg(short, long, default_value = "0")]
        angle: f32,
        #[arg(long, default_value = "80")]
        width: u32,
        #[arg(long, default_value = "24")]
        height: u32,
    },
    /// Step the physics world and report body positions
    Simulate {
        /// Level file (JSON); a built-in demo level when omitted
        #[arg(short, long)]
        level: Option<PathBuf>,
        /// Number of ticks to run
        #[arg(short, long, default_value = "60")]
        ticks: u32,
        /// Fixed timestep in seconds
        #[arg(short, long, default_value = "0.016")]
        dt: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("corridor-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("raycast: {}", corridor_raycast::crate_info());
            println!("physics: {}", corridor_physics::crate_info());
            println!("render: {}", corridor_render::crate_info());
            println!("sim: {}", corridor_sim::crate_info());
        }
        Commands::Cast {
            level,
            x,
            y,
            angle,
            max,
            spread,
        } => {
            let level = load_level(level)?;
            let mut sim = Simulation::from_level(&level)?;
            let origin = Vec2::new(x, y);
            let angle = angle.to_radians();
            let hit = if spread > 0.0 {
                sim.cone_cast(origin, angle, spread.to_radians(), max)
            } else {
                sim.cast(origin, angle, max)
            };
            if hit.hit {
                println!("hit wall at distance {:.3}", hit.distance);
            } else {
                println!("clear to horizon ({:.3})", hit.distance);
            }
        }
        Commands::Render {
            level,
            x,
            y,
            angle,
            width,
            height,
        } => {
            let level = load_level(level)?;
            let mut sim = Simulation::from_level(&level)?;
            let camera = Camera::new(Vec2::new(x, y), angle.to_radians());
            let viewport = Viewport { width, height };
            let projector = ProjectionRenderer::new(RenderConfig {
                ray_count: width,
                max_depth: 32.0,
            });

            // Every spawned body shows up as a billboard.
            let sprites: Vec<Sprite> = level
                .spawns
                .iter()
                .map(|s| Sprite {
                    position: Vec2::new(s.x, s.y),
                    size: s.radius * 2.0,
                    glyph: 'e',
                })
                .collect();

            let (grid, caster) = sim.render_parts();
            let list = projector.compose(grid, caster, &camera, viewport, &sprites);
            print!("{}", AsciiRenderer::new().render(&list, viewport));
        }
        Commands::Simulate { level, ticks, dt } => {
            let level = load_level(level)?;
            let mut sim = Simulation::from_level(&level)?;
            println!(
                "Simulating '{}': {} bodies, {ticks} ticks at dt={dt}",
                level.name,
                sim.physics().body_count()
            );

            let mut timer = FrameTimer::new(ticks.max(1) as usize);
            let mut collisions = 0usize;
            for _ in 0..ticks {
                let start = std::time::Instant::now();
                sim.update(dt);
                collisions += sim.physics_mut().drain_events().len();
                timer.record(start.elapsed());
            }

            for (id, body) in sim.physics().bodies() {
                println!(
                    "  [{:.8}] pos=({:.2}, {:.2}) vel=({:.2}, {:.2}){}",
                    &id.0.to_string()[..8],
                    body.position.x,
                    body.position.y,
                    body.velocity.x,
                    body.velocity.y,
                    if body.grounded { " grounded" } else { "" }
                );
            }
            println!(
                "collisions={} tick avg={:?} max={:?}",
                collisions,
                timer.average(),
                timer.max()
            );
        }
    }

    Ok(())
}

/// Load the level file, or fall back to a small built-in arena.
fn load_level(path: Option<PathBuf>) -> anyhow::Result<LevelFile> {
    match path {
        Some(path) => Ok(LevelFile::from_path(path)?),
        None => Ok(demo_level()),
    }
}

fn demo_level() -> LevelFile {
    LevelFile {
        name: "demo-arena".into(),
        rows: vec![
            "############".into(),
            "#..........#".into(),
            "#..##......#".into(),
            "#..........#".into(),
            "#......##..#".into(),
            "#..........#".into(),
            "############".into(),
        ],
        spawns: vec![
            corridor_sim::Spawn {
                x: 2.5,
                y: 1.5,
                radius: 0.3,
            },
            corridor_sim::Spawn {
                x: 9.5,
                y: 5.5,
                radius: 0.3,
            },
        ],
    }
}
