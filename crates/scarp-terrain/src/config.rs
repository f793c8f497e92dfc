//! Terrain configuration

use scarp_core::{ContentHash, Result};
use scarp_noise::FbmParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest allowed chunk edge, in world units
const MIN_CHUNK_SIZE: f32 = 1.0;
/// Smallest allowed segment count per chunk edge
const MIN_SEGMENTS: u32 = 2;

/// All tunable parameters of the terrain, parsed from TOML.
///
/// The config is a plain value object: building a [`crate::HeightField`]
/// captures it, and any change means constructing a new field. Chunk rebuilds
/// are memoized against [`TerrainConfig::content_hash`], so visible chunks
/// only regenerate when a field they depend on actually changed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// World seed. Every noise channel derives from this.
    pub seed: u32,
    /// Global vertical scale applied after layer composition
    pub height_scale: f32,
    /// Heights beyond this magnitude are treated as numerical failures and
    /// collapse to 0
    pub max_height: f32,

    pub region: RegionParams,
    pub mountains: MountainParams,
    pub base: LayerParams,
    pub valleys: ValleyParams,
    pub hills: LayerParams,
    pub detail: LayerParams,
    pub edge_fade: EdgeFadeParams,
    pub streaming: StreamingParams,
}

/// Low-frequency mask deciding where plains end and mountains begin
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionParams {
    pub fbm: FbmParams,
    /// Contrast stretch applied to the raw mask noise before thresholding.
    /// Values above 1 push more of the world firmly into one regime.
    pub mask_contrast: f64,
    /// Mask value above which terrain turns mountainous
    pub flatness_threshold: f64,
    /// Half-width of the smooth transition band around the threshold
    pub flatness_smooth: f64,
    /// Exponent shaping how quickly mountains ramp up past the threshold
    pub mountain_exponent: f64,
    /// Fraction of full variation that survives in flat regions
    pub plains_variation: f64,
    /// Amplitude of slow per-region elevation drift
    pub variation_amplitude: f64,
}

/// Ridged mountain layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountainParams {
    pub fbm: FbmParams,
    pub amplitude: f64,
    /// Exponent sharpening ridge creases
    pub ridge_sharpness: f64,
    /// Secondary exponent applied after blending, damps needle-like peaks
    pub spike_power: f64,
}

/// A generic fBm layer with an output amplitude
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerParams {
    pub fbm: FbmParams,
    pub amplitude: f64,
}

/// Negative-only layer carving depressions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValleyParams {
    pub fbm: FbmParams,
    pub depth: f64,
}

/// Soft falloff toward zero height near the world boundary.
/// `end_radius <= start_radius` disables the fade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeFadeParams {
    pub start_radius: f32,
    pub end_radius: f32,
}

/// Chunk grid and level-of-detail parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingParams {
    /// Chunk edge length in world units
    pub chunk_size: f32,
    /// Segments per chunk edge at the nearest LOD tier
    pub segments: u32,
    /// Chunks farther than this from the camera are unloaded
    pub view_distance: f32,
    /// Distance past which chunks drop to the medium tier
    pub lod_medium_distance: f32,
    /// Distance past which chunks drop to the far tier
    pub lod_far_distance: f32,
    /// World half-extent in chunks; the grid is fixed and bounded
    pub world_chunks: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            height_scale: 120.0,
            max_height: 1000.0,
            region: RegionParams::default(),
            mountains: MountainParams::default(),
            base: LayerParams {
                fbm: FbmParams {
                    octaves: 3,
                    frequency: 0.001,
                    ..FbmParams::default()
                },
                amplitude: 0.25,
            },
            valleys: ValleyParams::default(),
            hills: LayerParams {
                fbm: FbmParams {
                    octaves: 4,
                    frequency: 0.008,
                    ..FbmParams::default()
                },
                amplitude: 0.12,
            },
            detail: LayerParams {
                fbm: FbmParams {
                    octaves: 3,
                    frequency: 0.04,
                    ..FbmParams::default()
                },
                amplitude: 0.035,
            },
            edge_fade: EdgeFadeParams::default(),
            streaming: StreamingParams::default(),
        }
    }
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            fbm: FbmParams {
                octaves: 3,
                frequency: 0.0008,
                ..FbmParams::default()
            },
            mask_contrast: 2.0,
            flatness_threshold: 0.35,
            flatness_smooth: 0.2,
            mountain_exponent: 1.6,
            plains_variation: 0.15,
            variation_amplitude: 0.05,
        }
    }
}

impl Default for MountainParams {
    fn default() -> Self {
        Self {
            fbm: FbmParams {
                octaves: 5,
                frequency: 0.004,
                ..FbmParams::default()
            },
            amplitude: 1.0,
            ridge_sharpness: 2.2,
            spike_power: 1.15,
        }
    }
}

impl Default for LayerParams {
    fn default() -> Self {
        Self {
            fbm: FbmParams::default(),
            amplitude: 1.0,
        }
    }
}

impl Default for ValleyParams {
    fn default() -> Self {
        Self {
            fbm: FbmParams {
                octaves: 2,
                frequency: 0.002,
                ..FbmParams::default()
            },
            depth: 0.35,
        }
    }
}

impl Default for EdgeFadeParams {
    fn default() -> Self {
        Self {
            start_radius: 0.0,
            end_radius: 0.0,
        }
    }
}

impl Default for StreamingParams {
    fn default() -> Self {
        Self {
            chunk_size: 500.0,
            segments: 64,
            view_distance: 1600.0,
            lod_medium_distance: 500.0,
            lod_far_distance: 1000.0,
            world_chunks: 8,
        }
    }
}

impl TerrainConfig {
    /// Load a config from a TOML file and sanitize it
    pub fn from_toml_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: TerrainConfig = toml::from_str(&text)?;
        Ok(config.sanitized())
    }

    /// Clamp degenerate values to safe minimums.
    ///
    /// This is a tunable visual system: a zero octave count or a tiny chunk
    /// size is corrected silently rather than raised as a fault, so terrain
    /// never blocks the rest of the scene.
    pub fn sanitized(mut self) -> Self {
        for fbm in [
            &mut self.region.fbm,
            &mut self.mountains.fbm,
            &mut self.base.fbm,
            &mut self.valleys.fbm,
            &mut self.hills.fbm,
            &mut self.detail.fbm,
        ] {
            fbm.octaves = fbm.octaves.max(1);
            if !fbm.frequency.is_finite() || fbm.frequency <= 0.0 {
                fbm.frequency = FbmParams::default().frequency;
            }
        }

        let s = &mut self.streaming;
        s.chunk_size = if s.chunk_size.is_finite() {
            s.chunk_size.max(MIN_CHUNK_SIZE)
        } else {
            StreamingParams::default().chunk_size
        };
        s.segments = s.segments.max(MIN_SEGMENTS);
        s.world_chunks = s.world_chunks.max(1);
        s.view_distance = s.view_distance.max(s.chunk_size);
        // Distance bands must be ordered near < medium < far <= view
        s.lod_medium_distance = s.lod_medium_distance.max(0.0);
        s.lod_far_distance = s.lod_far_distance.max(s.lod_medium_distance);
        s.view_distance = s.view_distance.max(s.lod_far_distance);

        if !self.max_height.is_finite() || self.max_height <= 0.0 {
            self.max_height = TerrainConfig::default().max_height;
        }
        if !self.region.mask_contrast.is_finite() || self.region.mask_contrast <= 0.0 {
            self.region.mask_contrast = RegionParams::default().mask_contrast;
        }

        self
    }

    /// Hash of the canonical TOML form, used to memoize chunk rebuilds
    pub fn content_hash(&self) -> Result<ContentHash> {
        let text = toml::to_string(self)?;
        Ok(ContentHash::from_str(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = TerrainConfig::default();
        assert_eq!(config.seed, 12345);
        assert!(config.region.flatness_threshold > 0.0);
        assert!(config.streaming.lod_medium_distance < config.streaming.lod_far_distance);
        assert!(config.streaming.lod_far_distance < config.streaming.view_distance);
    }

    #[test]
    fn test_sanitize_clamps_degenerate_values() {
        let mut config = TerrainConfig::default();
        config.base.fbm.octaves = 0;
        config.streaming.chunk_size = 0.0;
        config.streaming.segments = 1;
        config.streaming.world_chunks = 0;

        let config = config.sanitized();
        assert_eq!(config.base.fbm.octaves, 1);
        assert_eq!(config.streaming.chunk_size, MIN_CHUNK_SIZE);
        assert_eq!(config.streaming.segments, MIN_SEGMENTS);
        assert_eq!(config.streaming.world_chunks, 1);
    }

    #[test]
    fn test_sanitize_orders_lod_bands() {
        let mut config = TerrainConfig::default();
        config.streaming.lod_medium_distance = 900.0;
        config.streaming.lod_far_distance = 400.0;
        config.streaming.view_distance = 100.0;

        let s = config.sanitized().streaming;
        assert!(s.lod_medium_distance <= s.lod_far_distance);
        assert!(s.lod_far_distance <= s.view_distance);
    }

    #[test]
    fn test_content_hash_tracks_changes() {
        let a = TerrainConfig::default();
        let mut b = TerrainConfig::default();
        assert_eq!(a.content_hash().unwrap(), b.content_hash().unwrap());

        b.seed = 54321;
        assert_ne!(a.content_hash().unwrap(), b.content_hash().unwrap());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = TerrainConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: TerrainConfig = toml::from_str(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: TerrainConfig = toml::from_str(
            r#"
            seed = 99
            [streaming]
            chunk_size = 250.0
            "#,
        )
        .unwrap();
        assert_eq!(parsed.seed, 99);
        assert_eq!(parsed.streaming.chunk_size, 250.0);
        assert_eq!(parsed.height_scale, TerrainConfig::default().height_scale);
    }
}
