//! Scarp Noise - Seeded gradient noise and fractal composition
//!
//! Provides the two building blocks the terrain layers are made of:
//! - `NoiseSource` - a seeded, deterministic 2D gradient noise generator
//! - `fbm` - fractional Brownian motion over a `NoiseSource`
//!
//! Every value is a pure function of (seed, coordinates). Nothing here holds
//! mutable state after construction, so sources can be shared freely and
//! sampled from any thread.

mod fbm;
mod source;

pub use fbm::{fbm, ridge, FbmParams};
pub use source::NoiseSource;
