//! Synchronization between streamed terrain chunks and Rapier colliders
//!
//! Each loaded chunk gets one fixed body with a static trimesh collider
//! built from the chunk's cached mesh buffers - the same buffers the
//! renderer consumes, so the visual surface and the collision surface can
//! never diverge. Applied on the main thread between physics steps, a
//! regeneration removes the old collider and inserts the new one in the
//! same call, so no step ever sees a half-updated chunk.

use crate::world::PhysicsWorld;
use rapier3d::prelude::*;
use scarp_core::Result;
use scarp_terrain::{Chunk, ChunkCoord, ChunkGrid, TerrainEvent};
use std::collections::HashMap;

/// Bridges the terrain chunk grid with Rapier's body and collider sets
pub struct TerrainColliderSync {
    /// ChunkCoord -> (body, collider) for every chunk currently backed by
    /// collision geometry
    colliders: HashMap<ChunkCoord, (RigidBodyHandle, ColliderHandle)>,
    /// Surface friction applied to terrain colliders
    pub friction: f32,
}

impl Default for TerrainColliderSync {
    fn default() -> Self {
        Self::new()
    }
}

impl TerrainColliderSync {
    pub fn new() -> Self {
        Self {
            colliders: HashMap::new(),
            friction: 0.8,
        }
    }

    /// Apply one update's worth of streaming events to the physics world
    pub fn apply(
        &mut self,
        events: &[TerrainEvent],
        grid: &ChunkGrid,
        physics: &mut PhysicsWorld,
    ) -> Result<()> {
        for event in events {
            match event {
                TerrainEvent::ChunkLoaded(coord) | TerrainEvent::ChunkRegenerated(coord) => {
                    self.remove_chunk(*coord, physics);
                    if let Some(chunk) = grid.chunk(*coord) {
                        self.insert_chunk(chunk, physics)?;
                    }
                }
                TerrainEvent::ChunkUnloaded(coord) => {
                    self.remove_chunk(*coord, physics);
                }
                TerrainEvent::Ready => {}
            }
        }
        Ok(())
    }

    /// Number of chunks currently backed by a collider
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Whether a chunk has collision geometry
    pub fn has_chunk(&self, coord: ChunkCoord) -> bool {
        self.colliders.contains_key(&coord)
    }

    fn insert_chunk(&mut self, chunk: &Chunk, physics: &mut PhysicsWorld) -> Result<()> {
        let (verts, tris) = chunk.mesh.trimesh_data();
        let vertices: Vec<Point<Real>> = verts
            .iter()
            .map(|v| point![v[0], v[1], v[2]])
            .collect();

        // Vertices are already in world space; the body sits at the origin.
        let shape = SharedShape::trimesh(vertices, tris);

        let body_handle = physics.insert_rigid_body(RigidBodyBuilder::fixed().build());
        let collider = ColliderBuilder::new(shape).friction(self.friction).build();
        let collider_handle = physics.insert_collider_with_parent(collider, body_handle);

        log::debug!("terrain collider for chunk {} inserted", chunk.coord);
        self.colliders
            .insert(chunk.coord, (body_handle, collider_handle));
        Ok(())
    }

    fn remove_chunk(&mut self, coord: ChunkCoord, physics: &mut PhysicsWorld) {
        if let Some((body_handle, _collider)) = self.colliders.remove(&coord) {
            // Removing the body takes its attached collider with it
            physics.remove_rigid_body(body_handle);
            log::debug!("terrain collider for chunk {coord} removed");
        }
    }
}

/// Build one monolithic static collider from a baked (non-streamed) world.
/// Used by scenes small enough to skip streaming entirely.
pub fn insert_baked_world(
    bake: &scarp_terrain::WorldBake,
    friction: f32,
    physics: &mut PhysicsWorld,
) -> Result<(RigidBodyHandle, ColliderHandle)> {
    let (verts, tris) = bake.trimesh_data();
    let vertices: Vec<Point<Real>> = verts
        .iter()
        .map(|v| point![v[0], v[1], v[2]])
        .collect();

    let shape = SharedShape::trimesh(vertices, tris);

    let body_handle = physics.insert_rigid_body(RigidBodyBuilder::fixed().build());
    let collider = ColliderBuilder::new(shape).friction(friction).build();
    let collider_handle = physics.insert_collider_with_parent(collider, body_handle);
    Ok((body_handle, collider_handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scarp_terrain::config::StreamingParams;
    use scarp_terrain::{HeightSource, TerrainConfig};

    struct Flat;

    impl HeightSource for Flat {
        fn height(&self, _x: f32, _z: f32) -> f32 {
            0.0
        }
    }

    fn small_config() -> TerrainConfig {
        TerrainConfig {
            streaming: StreamingParams {
                chunk_size: 100.0,
                segments: 4,
                view_distance: 150.0,
                lod_medium_distance: 80.0,
                lod_far_distance: 120.0,
                world_chunks: 2,
            },
            ..TerrainConfig::default()
        }
    }

    #[test]
    fn test_colliders_track_loaded_chunks() {
        let mut grid = ChunkGrid::new(small_config()).unwrap();
        let mut physics = PhysicsWorld::new();
        let mut sync = TerrainColliderSync::new();

        grid.update(0.0, 0.0, &Flat);
        let events = grid.drain_events();
        sync.apply(&events, &grid, &mut physics).unwrap();

        assert_eq!(sync.collider_count(), grid.loaded_count());
        assert_eq!(physics.collider_set.len(), grid.loaded_count());
    }

    #[test]
    fn test_eviction_removes_colliders() {
        let mut grid = ChunkGrid::new(small_config()).unwrap();
        let mut physics = PhysicsWorld::new();
        let mut sync = TerrainColliderSync::new();

        grid.update(-150.0, -150.0, &Flat);
        sync.apply(&grid.drain_events(), &grid, &mut physics)
            .unwrap();

        grid.update(150.0, 150.0, &Flat);
        sync.apply(&grid.drain_events(), &grid, &mut physics)
            .unwrap();

        assert_eq!(sync.collider_count(), grid.loaded_count());
        assert_eq!(physics.collider_set.len(), grid.loaded_count());
        assert!(!sync.has_chunk(ChunkCoord::new(-2, -2)));
    }

    #[test]
    fn test_regeneration_replaces_not_duplicates() {
        let mut config = small_config();
        config.streaming.view_distance = 2000.0;
        config.streaming.world_chunks = 1;
        let mut grid = ChunkGrid::new(config).unwrap();
        let mut physics = PhysicsWorld::new();
        let mut sync = TerrainColliderSync::new();

        grid.update(50.0, 50.0, &Flat);
        sync.apply(&grid.drain_events(), &grid, &mut physics)
            .unwrap();
        let before = physics.collider_set.len();

        // Push every chunk to a coarser tier
        grid.update(1500.0, 50.0, &Flat);
        sync.apply(&grid.drain_events(), &grid, &mut physics)
            .unwrap();

        assert_eq!(physics.collider_set.len(), before);
        assert_eq!(sync.collider_count(), grid.loaded_count());
    }

    #[test]
    fn test_baked_world_builds_one_collider() {
        let mut config = small_config();
        config.streaming.world_chunks = 1;
        let bake = scarp_terrain::WorldBake::generate(&config, &Flat);

        let mut physics = PhysicsWorld::new();
        insert_baked_world(&bake, 0.8, &mut physics).unwrap();

        assert_eq!(physics.rigid_body_set.len(), 1);
        assert_eq!(physics.collider_set.len(), 1);
    }

    #[test]
    fn test_ball_rests_on_terrain_collider() {
        let mut grid = ChunkGrid::new(small_config()).unwrap();
        let mut physics = PhysicsWorld::new();
        let mut sync = TerrainColliderSync::new();

        grid.update(0.0, 0.0, &Flat);
        sync.apply(&grid.drain_events(), &grid, &mut physics)
            .unwrap();

        let ball = RigidBodyBuilder::dynamic()
            .translation(vector![10.0, 5.0, 10.0])
            .build();
        let handle = physics.insert_rigid_body(ball);
        physics.insert_collider_with_parent(ColliderBuilder::ball(0.5).build(), handle);

        for _ in 0..180 {
            physics.step(1.0 / 60.0);
        }

        let y = physics.get_rigid_body(handle).unwrap().translation().y;
        assert!(
            y > 0.2 && y < 1.0,
            "ball should come to rest on the flat terrain surface, got y={y}"
        );
    }
}
