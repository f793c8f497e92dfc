//! Chunk identity and level-of-detail tiers

use crate::config::StreamingParams;
use crate::mesh::ChunkMesh;
use scarp_core::{ContentHash, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer grid coordinates identifying a chunk
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World-space origin corner of this chunk
    pub fn world_origin(&self, chunk_size: f32) -> (f32, f32) {
        (self.x as f32 * chunk_size, self.z as f32 * chunk_size)
    }

    /// World-space footprint rectangle
    pub fn footprint(&self, chunk_size: f32) -> Rect {
        let (ox, oz) = self.world_origin(chunk_size);
        Rect::from_origin_size(ox, oz, chunk_size)
    }

    /// The chunk containing the given world position
    pub fn containing(x: f32, z: f32, chunk_size: f32) -> Self {
        Self {
            x: (x / chunk_size).floor() as i32,
            z: (z / chunk_size).floor() as i32,
        }
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Resolution tier assigned to a chunk by camera distance.
///
/// Ordering matters: `Near < Medium < Far`, and a chunk closer than another
/// never receives a coarser tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LodTier {
    Near,
    Medium,
    Far,
}

impl LodTier {
    /// Tier for a camera-to-chunk distance, measured to the nearest point of
    /// the chunk's footprint.
    pub fn for_distance(distance: f32, streaming: &StreamingParams) -> Self {
        if distance <= streaming.lod_medium_distance {
            LodTier::Near
        } else if distance <= streaming.lod_far_distance {
            LodTier::Medium
        } else {
            LodTier::Far
        }
    }

    /// Segment count at this tier: full, half, or quarter of the base count
    pub fn segments(&self, base_segments: u32) -> u32 {
        let segments = match self {
            LodTier::Near => base_segments,
            LodTier::Medium => base_segments / 2,
            LodTier::Far => base_segments / 4,
        };
        segments.max(2)
    }
}

/// A resident chunk: its identity, current tier, and generated geometry
pub struct Chunk {
    pub coord: ChunkCoord,
    pub lod: LodTier,
    pub mesh: ChunkMesh,
    /// Hash of the config the mesh was built against; a mismatch marks the
    /// chunk stale
    pub config_hash: ContentHash,
}
