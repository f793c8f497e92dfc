//! Streaming simulation command
//!
//! Flies a camera through the chunk grid and reports load/rebuild/unload
//! churn, LOD distribution, and collider bookkeeping - the quickest way to
//! sanity-check band distances in a config before wiring it to a renderer.

use anyhow::Result;
use scarp_physics::{PhysicsWorld, TerrainColliderSync};
use scarp_terrain::{ChunkGrid, HeightField, LodTier, TerrainEvent};
use std::path::Path;

pub fn run(config: Option<&Path>, steps: u32, speed: f32) -> Result<()> {
    let config = super::load_config(config)?;
    let field = HeightField::new(config.clone());
    let mut grid = ChunkGrid::new(config)?;
    let mut physics = PhysicsWorld::new();
    let mut sync = TerrainColliderSync::new();

    let mut loaded = 0usize;
    let mut regenerated = 0usize;
    let mut unloaded = 0usize;
    let mut ready_step = None;

    // Diagonal flight away from the origin
    let dir = std::f32::consts::FRAC_1_SQRT_2;

    for step in 0..steps {
        let x = step as f32 * speed * dir;
        let z = step as f32 * speed * dir;

        grid.update(x, z, &field);
        let events = grid.drain_events();

        for event in &events {
            match event {
                TerrainEvent::Ready => ready_step = Some(step),
                TerrainEvent::ChunkLoaded(_) => loaded += 1,
                TerrainEvent::ChunkRegenerated(_) => regenerated += 1,
                TerrainEvent::ChunkUnloaded(_) => unloaded += 1,
            }
        }
        sync.apply(&events, &grid, &mut physics)?;

        if step % 20 == 0 {
            println!(
                "step {step:>4}  camera ({x:>8.0}, {z:>8.0})  resident {:>4}  colliders {:>4}",
                grid.loaded_count(),
                sync.collider_count()
            );
        }
    }

    let mut near = 0usize;
    let mut medium = 0usize;
    let mut far = 0usize;
    for coord in grid.loaded_coords().collect::<Vec<_>>() {
        match grid.chunk(coord).map(|c| c.lod) {
            Some(LodTier::Near) => near += 1,
            Some(LodTier::Medium) => medium += 1,
            Some(LodTier::Far) => far += 1,
            None => {}
        }
    }

    println!();
    println!("streaming over {steps} steps:");
    match ready_step {
        Some(step) => println!("  ready signal fired at step {step}"),
        None => println!("  ready signal never fired"),
    }
    println!("  {loaded} chunk loads, {regenerated} rebuilds, {unloaded} unloads");
    println!(
        "  final residency: {} chunks ({near} near / {medium} medium / {far} far), {} colliders",
        grid.loaded_count(),
        sync.collider_count()
    );

    Ok(())
}
