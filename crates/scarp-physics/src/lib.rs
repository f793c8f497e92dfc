//! Scarp Physics - Rapier 3D integration for streamed terrain
//!
//! Consumes the terrain crate's streaming events to keep one static trimesh
//! collider per loaded chunk, built from the same cached mesh buffers the
//! renderer uses, and resolves spawn positions against the shared height
//! query.

pub mod spawn;
pub mod terrain_sync;
pub mod world;

pub use spawn::spawn_position;
pub use terrain_sync::{insert_baked_world, TerrainColliderSync};
pub use world::PhysicsWorld;
