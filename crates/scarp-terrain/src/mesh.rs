//! Chunk mesh generation
//!
//! Samples a height source on a regular grid anchored at the chunk's
//! absolute world coordinates and triangulates it. Vertices are placed at
//! `(coord + i/segments) * chunk_size`, so a boundary vertex evaluates to the
//! bit-identical world position in both chunks that share it - seams carry no
//! chunk-local offset.

use crate::chunk::ChunkCoord;
use crate::query::HeightSource;
use scarp_core::Vec3;

/// Geometry and cached samples for one terrain chunk.
///
/// The raw height grid is kept alongside the mesh buffers: it is the single
/// source of truth for this chunk, reused by collider rebuilds and in-bounds
/// height lookups without re-sampling the noise stack.
pub struct ChunkMesh {
    /// Segments per edge this mesh was built at
    pub segments: u32,
    /// Row-major `(segments + 1)^2` sampled heights
    pub height_grid: Vec<f32>,
    /// Vertex positions in world space
    pub positions: Vec<[f32; 3]>,
    /// Smooth vertex normals
    pub normals: Vec<[f32; 3]>,
    /// Chunk-local UVs in [0..1]
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices (CCW winding seen from above)
    pub indices: Vec<u32>,
    /// AABB minimum corner
    pub aabb_min: [f32; 3],
    /// AABB maximum corner
    pub aabb_max: [f32; 3],
}

impl ChunkMesh {
    /// Cached height at grid position (gx, gz)
    pub fn grid_height(&self, gx: u32, gz: u32) -> f32 {
        self.height_grid[(gz * (self.segments + 1) + gx) as usize]
    }

    /// Vertex and triangle buffers for a static trimesh collider.
    /// Built from the same cached buffers as the render mesh, so the two
    /// can never diverge.
    pub fn trimesh_data(&self) -> (Vec<[f32; 3]>, Vec<[u32; 3]>) {
        let vertices = self.positions.clone();
        let triangles = self
            .indices
            .chunks(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect();
        (vertices, triangles)
    }
}

/// Build the mesh for one chunk at the given resolution.
///
/// Cost is O(segments^2), dominated by height sampling - the reason distant
/// chunks are built at coarser LOD tiers.
pub fn build_chunk_mesh(
    coord: ChunkCoord,
    chunk_size: f32,
    segments: u32,
    source: &dyn HeightSource,
) -> ChunkMesh {
    let segments = segments.max(2);
    let verts_per_edge = segments + 1;
    let vert_count = (verts_per_edge * verts_per_edge) as usize;

    let mut height_grid = Vec::with_capacity(vert_count);
    let mut positions = Vec::with_capacity(vert_count);
    let mut uvs = Vec::with_capacity(vert_count);

    let mut aabb_min = [f32::MAX; 3];
    let mut aabb_max = [f32::MIN; 3];

    for vz in 0..verts_per_edge {
        for vx in 0..verts_per_edge {
            let fx = vx as f32 / segments as f32;
            let fz = vz as f32 / segments as f32;

            // Absolute world anchoring: boundary vertices land on the exact
            // same world coordinate in adjacent chunks.
            let world_x = (coord.x as f32 + fx) * chunk_size;
            let world_z = (coord.z as f32 + fz) * chunk_size;
            let height = source.height(world_x, world_z);

            let pos = [world_x, height, world_z];
            for i in 0..3 {
                aabb_min[i] = aabb_min[i].min(pos[i]);
                aabb_max[i] = aabb_max[i].max(pos[i]);
            }

            height_grid.push(height);
            positions.push(pos);
            uvs.push([fx, fz]);
        }
    }

    // Two triangles per cell, CCW
    let index_count = (segments * segments * 6) as usize;
    let mut indices = Vec::with_capacity(index_count);

    for qz in 0..segments {
        for qx in 0..segments {
            let tl = qz * verts_per_edge + qx;
            let tr = tl + 1;
            let bl = tl + verts_per_edge;
            let br = bl + 1;

            indices.push(tl);
            indices.push(bl);
            indices.push(br);

            indices.push(tl);
            indices.push(br);
            indices.push(tr);
        }
    }

    let normals = smooth_normals(&positions, &indices);

    ChunkMesh {
        segments,
        height_grid,
        positions,
        normals,
        uvs,
        indices,
        aabb_min,
        aabb_max,
    }
}

/// Area-weighted smooth vertex normals: each face's unnormalized cross
/// product (magnitude = twice its area) is accumulated into its three
/// vertices, then each sum is normalized.
fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accum = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks(3) {
        let a = Vec3::from_array(positions[tri[0] as usize]);
        let b = Vec3::from_array(positions[tri[1] as usize]);
        let c = Vec3::from_array(positions[tri[2] as usize]);

        let face = (b - a).cross(&(c - a));
        for &i in tri {
            accum[i as usize] = accum[i as usize] + face;
        }
    }

    accum
        .into_iter()
        .map(|n| {
            let n = n.normalized();
            if n == Vec3::ZERO {
                Vec3::UP.to_array()
            } else {
                n.to_array()
            }
        })
        .collect()
}
