//! Layered procedural height field
//!
//! The height at a world (x, z) is composed from independent frequency
//! bands: a low-frequency region mask gates between plains and mountains,
//! ridged noise supplies the mountains, and progressively higher-frequency
//! layers add undulation, valleys, hills, and fine detail. Each band is
//! tunable on its own; fBm inside each band keeps the result fractal rather
//! than single-frequency bumps.
//!
//! `height` is a pure function: identical inputs always produce identical
//! outputs, and there is no mutable state after construction. That purity is
//! what lets independently generated chunks tile seamlessly and lets physics,
//! meshing, and gameplay queries share one field without drift.

use crate::config::TerrainConfig;
use crate::query::HeightSource;
use scarp_noise::{fbm, ridge, FbmParams, NoiseSource};

/// Blend weights for the two decorrelated ridge sub-layers
const RIDGE_PRIMARY_WEIGHT: f64 = 0.75;
const RIDGE_SECONDARY_WEIGHT: f64 = 0.25;

/// Monotonic damp applied to the composed field before vertical scaling.
/// Tames extreme local curvature without reshaping the terrain.
const SPIKE_DAMP: f64 = 0.99;

/// A deterministic height field over the XZ plane.
///
/// Construction derives four decorrelated noise channels from the seed;
/// sampling allocates nothing and takes `&self`, so a field can be shared
/// behind an `Arc` and queried from any thread.
pub struct HeightField {
    config: TerrainConfig,
    base_channel: NoiseSource,
    region_channel: NoiseSource,
    ridge_a: NoiseSource,
    ridge_b: NoiseSource,
    /// Region-channel fBm at half frequency, drives slow elevation drift
    variation_fbm: FbmParams,
    /// Mountain fBm at doubled frequency for the secondary ridge sub-layer
    ridge_b_fbm: FbmParams,
}

impl HeightField {
    /// Build a height field from a (sanitized) configuration
    pub fn new(config: TerrainConfig) -> Self {
        let config = config.sanitized();
        let seed = config.seed;

        let variation_fbm = FbmParams {
            octaves: 2,
            frequency: config.region.fbm.frequency * 0.5,
            ..config.region.fbm
        };
        let ridge_b_fbm = FbmParams {
            frequency: config.mountains.fbm.frequency * 2.0,
            ..config.mountains.fbm
        };

        Self {
            base_channel: NoiseSource::channel(seed, 0),
            region_channel: NoiseSource::channel(seed, 1),
            ridge_a: NoiseSource::channel(seed, 2),
            ridge_b: NoiseSource::channel(seed, 3),
            variation_fbm,
            ridge_b_fbm,
            config,
        }
    }

    /// The configuration this field was built from
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Region mask in [0, 1]: low values are plains, high values mountains
    pub fn region_mask(&self, x: f32, z: f32) -> f64 {
        if !x.is_finite() || !z.is_finite() {
            return 0.0;
        }
        let raw = fbm(
            &self.region_channel,
            x as f64,
            z as f64,
            &self.config.region.fbm,
        );
        ((raw * self.config.region.mask_contrast + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Terrain height at world (x, z).
    ///
    /// Always finite and within `[-max_height, max_height]`; numerical
    /// failures collapse to 0 rather than propagating.
    pub fn sample_height(&self, x: f32, z: f32) -> f32 {
        if !x.is_finite() || !z.is_finite() {
            return 0.0;
        }

        let c = &self.config;
        let xf = x as f64;
        let zf = z as f64;

        let region = self.region_mask(x, z);

        // Smooth gate, never a hard cutoff: a hard threshold here would show
        // up as a visible seam between biomes.
        let gate = smooth_unit_step(
            region,
            c.region.flatness_threshold,
            c.region.flatness_smooth,
        );
        let flatness_factor =
            c.region.plains_variation + (1.0 - c.region.plains_variation) * gate;
        let mountain_mask = (region - c.region.flatness_threshold)
            .max(0.0)
            .powf(c.region.mountain_exponent);

        // Ridged mountains: fold the noise so zero-crossings become creases,
        // sharpen, blend two decorrelated sub-layers, then damp needles.
        let r_primary =
            ridge(fbm(&self.ridge_a, xf, zf, &c.mountains.fbm)).powf(c.mountains.ridge_sharpness);
        let r_secondary =
            ridge(fbm(&self.ridge_b, xf, zf, &self.ridge_b_fbm)).powf(c.mountains.ridge_sharpness);
        let ridges = (r_primary * RIDGE_PRIMARY_WEIGHT + r_secondary * RIDGE_SECONDARY_WEIGHT)
            .powf(c.mountains.spike_power);

        // Broad undulation
        let base = fbm(&self.base_channel, xf, zf, &c.base.fbm) * c.base.amplitude;

        // Valleys only carve downward
        let valleys = fbm(&self.base_channel, xf, zf, &c.valleys.fbm).min(0.0) * c.valleys.depth;

        // Mid- and small-scale variation; detail fades out on the plains
        let hills = fbm(&self.base_channel, xf, zf, &c.hills.fbm) * c.hills.amplitude;
        let detail =
            fbm(&self.base_channel, xf, zf, &c.detail.fbm) * c.detail.amplitude * flatness_factor;

        // Slow drift so distant plains don't all sit at one elevation
        let variation =
            fbm(&self.region_channel, xf, zf, &self.variation_fbm) * c.region.variation_amplitude;

        let combined = base
            + ridges * mountain_mask * c.mountains.amplitude
            + valleys
            + hills
            + detail
            + variation;

        let mut height = combined * flatness_factor * SPIKE_DAMP * c.height_scale as f64;
        height *= self.edge_fade(xf, zf);

        let height = height as f32;
        if !height.is_finite() || height.abs() > c.max_height {
            return 0.0;
        }
        height
    }

    /// Falloff toward zero beyond the configured radius from the world
    /// origin, so a bounded world ends in a soft skirt instead of a cliff.
    fn edge_fade(&self, x: f64, z: f64) -> f64 {
        let fade = &self.config.edge_fade;
        if fade.end_radius <= fade.start_radius {
            return 1.0;
        }
        let dist = (x * x + z * z).sqrt();
        let start = fade.start_radius as f64;
        let end = fade.end_radius as f64;
        let t = ((dist - start) / (end - start)).clamp(0.0, 1.0);
        1.0 - (t * t * (3.0 - 2.0 * t))
    }
}

impl HeightSource for HeightField {
    fn height(&self, x: f32, z: f32) -> f32 {
        self.sample_height(x, z)
    }
}

/// Smoothstep of `v` across the band `edge ± width`. Zero width degenerates
/// to a step.
fn smooth_unit_step(v: f64, edge: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return if v >= edge { 1.0 } else { 0.0 };
    }
    let t = ((v - (edge - width)) / (2.0 * width)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
