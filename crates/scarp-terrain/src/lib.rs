//! Scarp Terrain - Procedural height field and chunk streaming
//!
//! Provides the layered noise height field, distance-based chunk/LOD
//! streaming, chunk mesh generation, and the shared height-query interface.
//! Does not depend on any renderer - chunks carry raw vertex data
//! (positions, normals, UVs, indices) for a renderer or a physics adapter to
//! consume.

pub mod bake;
pub mod chunk;
pub mod coloring;
pub mod config;
pub mod events;
pub mod heightfield;
pub mod mesh;
pub mod query;
pub mod raster;
pub mod scatter;
pub mod streaming;

pub use bake::WorldBake;
pub use chunk::{Chunk, ChunkCoord, LodTier};
pub use coloring::{terrain_color, terrain_color_rgb8, ColorBands};
pub use config::TerrainConfig;
pub use events::TerrainEvent;
pub use heightfield::HeightField;
pub use mesh::{build_chunk_mesh, ChunkMesh};
pub use query::{ground_normal, HeightSource, SharedHeightSource};
pub use raster::RasterHeightField;
pub use scatter::{scatter_in_rect, ScatterInstance, ScatterParams};
pub use streaming::ChunkGrid;
