//! Scarp Core - Foundational types for the Scarp terrain engine
//!
//! This crate provides the types that all other Scarp crates depend on:
//! - `ContentHash` - SHA-256 based content hashing (chunk rebuild memoization)
//! - `Vec3`, `Rect` - Spatial types
//! - Error types and Result alias

mod error;
mod hash;
mod types;

pub use error::{Result, ScarpError};
pub use hash::ContentHash;
pub use types::{Rect, Vec3};
