//! Chunk grid streaming and LOD selection
//!
//! Runs once per frame. Re-checking the still-valid set is a hash lookup and
//! a distance test per chunk; the expensive O(segments^2) mesh build only
//! happens on visibility or LOD *changes*, and rebuilds are memoized against
//! the config hash so parameter tweaks invalidate exactly the chunks that
//! depend on them.

use crate::chunk::{Chunk, ChunkCoord, LodTier};
use crate::config::TerrainConfig;
use crate::events::TerrainEvent;
use crate::mesh::build_chunk_mesh;
use crate::query::HeightSource;
use scarp_core::{ContentHash, Result};
use std::collections::HashMap;

/// The dynamically streamed grid of terrain chunks.
///
/// The world is a fixed, bounded grid of `2 * world_chunks` chunks per side
/// centered on the origin. Per-chunk state moves Unloaded -> Visible(LOD) ->
/// Visible(LOD') -> Unloaded, driven by the camera position each update.
pub struct ChunkGrid {
    config: TerrainConfig,
    config_hash: ContentHash,
    chunks: HashMap<ChunkCoord, Chunk>,
    events: Vec<TerrainEvent>,
    ready_fired: bool,
}

impl ChunkGrid {
    pub fn new(config: TerrainConfig) -> Result<Self> {
        let config = config.sanitized();
        let config_hash = config.content_hash()?;
        Ok(Self {
            config,
            config_hash,
            chunks: HashMap::new(),
            events: Vec::new(),
            ready_fired: false,
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Swap in a new configuration. Resident chunks are not rebuilt here;
    /// the hash mismatch marks them stale and the next update regenerates
    /// the ones still in range.
    pub fn set_config(&mut self, config: TerrainConfig) -> Result<()> {
        let config = config.sanitized();
        self.config_hash = config.content_hash()?;
        self.config = config;
        Ok(())
    }

    /// Whether the initial chunk set has been generated
    pub fn is_ready(&self) -> bool {
        self.ready_fired
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// The resident chunk containing a world position, if loaded
    pub fn chunk_at_world(&self, x: f32, z: f32) -> Option<&Chunk> {
        let coord = ChunkCoord::containing(x, z, self.config.streaming.chunk_size);
        self.chunks.get(&coord)
    }

    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn loaded_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Recompute the visible chunk set for the given camera position.
    ///
    /// `source` must be the same height source the rest of the system
    /// queries; chunks sample it at absolute world coordinates, which is
    /// what keeps their shared edges seamless.
    pub fn update(&mut self, camera_x: f32, camera_z: f32, source: &dyn HeightSource) {
        let s = self.config.streaming.clone();
        let half = s.world_chunks as i32;

        // Pass 1: evict chunks that left the streaming radius (or the world,
        // after a config shrink).
        let mut evicted = Vec::new();
        self.chunks.retain(|coord, _| {
            let in_world =
                coord.x >= -half && coord.x < half && coord.z >= -half && coord.z < half;
            let dist = coord
                .footprint(s.chunk_size)
                .distance_to_point(camera_x, camera_z);
            let keep = in_world && dist <= s.view_distance;
            if !keep {
                evicted.push(*coord);
            }
            keep
        });
        for coord in &evicted {
            log::debug!("unloading chunk {coord}");
            self.events.push(TerrainEvent::ChunkUnloaded(*coord));
        }

        // Pass 2: load or re-tier chunks in range.
        let mut loaded = 0usize;
        let mut regenerated = 0usize;
        for cz in -half..half {
            for cx in -half..half {
                let coord = ChunkCoord::new(cx, cz);
                // Nearest-point distance: a chunk the camera stands inside
                // of is at distance zero, whatever its size.
                let dist = coord
                    .footprint(s.chunk_size)
                    .distance_to_point(camera_x, camera_z);
                if dist > s.view_distance {
                    continue;
                }

                let lod = LodTier::for_distance(dist, &s);

                if let Some(chunk) = self.chunks.get(&coord) {
                    if chunk.lod == lod && chunk.config_hash == self.config_hash {
                        continue;
                    }
                }

                let was_resident = self.chunks.contains_key(&coord);
                let mesh = build_chunk_mesh(coord, s.chunk_size, lod.segments(s.segments), source);
                self.chunks.insert(
                    coord,
                    Chunk {
                        coord,
                        lod,
                        mesh,
                        config_hash: self.config_hash,
                    },
                );

                if was_resident {
                    log::debug!("rebuilding chunk {coord} at {lod:?}");
                    regenerated += 1;
                    self.events.push(TerrainEvent::ChunkRegenerated(coord));
                } else {
                    log::debug!("loading chunk {coord} at {lod:?}");
                    loaded += 1;
                    self.events.push(TerrainEvent::ChunkLoaded(coord));
                }
            }
        }

        if loaded + regenerated + evicted.len() > 0 {
            log::info!(
                "chunk streaming: {loaded} loaded, {regenerated} rebuilt, {} unloaded, {} resident",
                evicted.len(),
                self.chunks.len()
            );
        }

        if !self.ready_fired {
            self.ready_fired = true;
            log::info!(
                "terrain ready: {} chunks generated (config {})",
                self.chunks.len(),
                self.config_hash.short()
            );
            self.events.push(TerrainEvent::Ready);
        }
    }

    /// Drain all pending events, returning them
    pub fn drain_events(&mut self) -> Vec<TerrainEvent> {
        std::mem::take(&mut self.events)
    }
}
