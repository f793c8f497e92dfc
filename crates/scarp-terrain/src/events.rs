//! Streaming events emitted by the chunk grid
//!
//! Consumers (renderer upload, collider sync) drain these after each update
//! instead of diffing the chunk set themselves.

use crate::chunk::ChunkCoord;

/// Something the chunk grid did during an update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerrainEvent {
    /// Fired exactly once, after the initial update has generated the
    /// starting chunk set. Systems that need collision geometry before they
    /// may start (character spawning) wait for this.
    Ready,
    /// A chunk entered the streaming radius and its mesh was generated
    ChunkLoaded(ChunkCoord),
    /// A resident chunk was rebuilt (LOD change or config change)
    ChunkRegenerated(ChunkCoord),
    /// A chunk left the streaming radius and its cache was dropped
    ChunkUnloaded(ChunkCoord),
}
