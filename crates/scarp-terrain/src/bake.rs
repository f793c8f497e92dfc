//! Non-streamed world baking
//!
//! Small scenes and map exports don't need distance streaming: this bakes
//! every chunk of the bounded world at one resolution in a single call, and
//! can merge the result into one trimesh for a monolithic collider. The
//! per-chunk geometry is identical to what the streaming grid would produce
//! at the same tier, because both go through the same builder and the same
//! height source.

use crate::chunk::ChunkCoord;
use crate::config::TerrainConfig;
use crate::mesh::{build_chunk_mesh, ChunkMesh};
use crate::query::HeightSource;

/// A fully generated, non-streamed world
pub struct WorldBake {
    /// Chunks in row-major order over the world grid
    pub chunks: Vec<(ChunkCoord, ChunkMesh)>,
    /// Chunks along one side of the world
    pub side: u32,
}

impl WorldBake {
    /// Generate every chunk of the configured world at the base resolution
    pub fn generate(config: &TerrainConfig, source: &dyn HeightSource) -> Self {
        let config = config.clone().sanitized();
        let s = &config.streaming;
        let half = s.world_chunks as i32;
        let side = s.world_chunks * 2;

        let mut chunks = Vec::with_capacity((side * side) as usize);
        for cz in -half..half {
            for cx in -half..half {
                let coord = ChunkCoord::new(cx, cz);
                let mesh = build_chunk_mesh(coord, s.chunk_size, s.segments, source);
                chunks.push((coord, mesh));
            }
        }

        log::info!(
            "baked {} chunks at {} segments",
            chunks.len(),
            s.segments
        );
        Self { chunks, side }
    }

    /// Merge all chunk geometry into a single trimesh for physics.
    /// Returns (vertices, triangle indices).
    pub fn trimesh_data(&self) -> (Vec<[f32; 3]>, Vec<[u32; 3]>) {
        let total_verts: usize = self.chunks.iter().map(|(_, m)| m.positions.len()).sum();
        let total_tris: usize = self.chunks.iter().map(|(_, m)| m.indices.len() / 3).sum();

        let mut vertices = Vec::with_capacity(total_verts);
        let mut triangles = Vec::with_capacity(total_tris);
        let mut base_index: u32 = 0;

        for (_, mesh) in &self.chunks {
            vertices.extend_from_slice(&mesh.positions);

            for tri in mesh.indices.chunks(3) {
                triangles.push([
                    tri[0] + base_index,
                    tri[1] + base_index,
                    tri[2] + base_index,
                ]);
            }

            base_index += mesh.positions.len() as u32;
        }

        (vertices, triangles)
    }

    /// Total triangle count across the bake
    pub fn triangle_count(&self) -> usize {
        self.chunks.iter().map(|(_, m)| m.indices.len() / 3).sum()
    }
}
