use std::hint::black_box;
use std::time::Instant;

use glam::Vec2;
use corridor_grid::TileGrid;
use corridor_raycast::Raycaster;

fn make_grid(side: usize) -> TileGrid {
    TileGrid::walled(side, side).unwrap()
}

fn bench_cast(side: usize, iterations: usize) {
    let grid = make_grid(side);
    let mut caster = Raycaster::with_cache_capacity(0);
    let origin = Vec2::splat(side as f32 / 2.0);

    let start = Instant::now();
    for i in 0..iterations {
        let angle = i as f32 * 0.017;
        let _ = black_box(caster.cast(&grid, black_box(origin), black_box(angle), 64.0));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  uncached cast ({side}x{side} grid, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_cached_cast(side: usize, iterations: usize) {
    let grid = make_grid(side);
    let mut caster = Raycaster::new();
    let origin = Vec2::splat(side as f32 / 2.0);

    // Repeat a fixed fan so the cache absorbs everything after round one.
    let start = Instant::now();
    for i in 0..iterations {
        let angle = (i % 360) as f32 * 0.017;
        let _ = black_box(caster.cast(&grid, black_box(origin), black_box(angle), 64.0));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  cached cast ({side}x{side} grid, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_cone(side: usize, iterations: usize) {
    let grid = make_grid(side);
    let mut caster = Raycaster::new();
    let origin = Vec2::splat(side as f32 / 2.0);

    let start = Instant::now();
    for i in 0..iterations {
        let angle = i as f32 * 0.017;
        let _ = black_box(caster.cone_cast(&grid, origin, black_box(angle), 0.1, 64.0));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  cone cast ({side}x{side} grid, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Raycast Benchmarks ===\n");

    println!("Single casts:");
    bench_cast(16, 10000);
    bench_cast(64, 10000);
    bench_cast(256, 1000);

    println!("\nCached fan:");
    bench_cached_cast(64, 100000);

    println!("\nCone casts:");
    bench_cone(64, 10000);

    println!("\n=== Done ===");
}
