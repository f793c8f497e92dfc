//! Height-and-slope based terrain coloring
//!
//! A pure function of the already-computed height: the same bands a shader
//! would evaluate, kept in one place so CPU previews and GPU materials can
//! never disagree about what "snow line" means.

use serde::{Deserialize, Serialize};

/// Elevation band thresholds, expressed as fractions of the config's
/// `height_scale` so one palette works across vertical exaggerations
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorBands {
    /// Below this fraction: water
    pub water_level: f32,
    /// Below this fraction: grass
    pub grass_level: f32,
    /// Below this fraction: rock; above: snow
    pub rock_level: f32,
    /// Surfaces with normal Y below this read as rock regardless of height
    pub cliff_up: f32,
}

impl Default for ColorBands {
    fn default() -> Self {
        Self {
            water_level: -0.02,
            grass_level: 0.25,
            rock_level: 0.6,
            cliff_up: 0.55,
        }
    }
}

const WATER: [f32; 3] = [0.16, 0.30, 0.50];
const SAND: [f32; 3] = [0.70, 0.65, 0.44];
const GRASS: [f32; 3] = [0.28, 0.46, 0.22];
const ROCK: [f32; 3] = [0.42, 0.39, 0.36];
const SNOW: [f32; 3] = [0.92, 0.93, 0.95];

/// Color for a surface point, from its height, its normal's Y component,
/// and the field's vertical scale. Returns linear RGB in [0, 1].
pub fn terrain_color(height: f32, normal_y: f32, height_scale: f32, bands: &ColorBands) -> [f32; 3] {
    let scale = height_scale.max(1e-3);
    let h = height / scale;

    // Steep faces are bare rock whatever their elevation
    if normal_y < bands.cliff_up && h > bands.water_level {
        return ROCK;
    }

    if h < bands.water_level {
        WATER
    } else if h < bands.water_level + 0.03 {
        SAND
    } else if h < bands.grass_level {
        blend(GRASS, ROCK, band_t(h, bands.water_level + 0.03, bands.grass_level) * 0.35)
    } else if h < bands.rock_level {
        blend(GRASS, ROCK, band_t(h, bands.grass_level, bands.rock_level))
    } else {
        blend(ROCK, SNOW, band_t(h, bands.rock_level, bands.rock_level + 0.25).min(1.0))
    }
}

/// 8-bit variant for image export
pub fn terrain_color_rgb8(
    height: f32,
    normal_y: f32,
    height_scale: f32,
    bands: &ColorBands,
) -> [u8; 3] {
    let c = terrain_color(height, normal_y, height_scale, bands);
    [
        (c[0].clamp(0.0, 1.0) * 255.0) as u8,
        (c[1].clamp(0.0, 1.0) * 255.0) as u8,
        (c[2].clamp(0.0, 1.0) * 255.0) as u8,
    ]
}

fn band_t(h: f32, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return 1.0;
    }
    ((h - lo) / (hi - lo)).clamp(0.0, 1.0)
}

fn blend(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_in_order() {
        let bands = ColorBands::default();
        let scale = 100.0;

        assert_eq!(terrain_color(-10.0, 1.0, scale, &bands), WATER);
        assert_eq!(terrain_color(90.0, 1.0, scale, &bands), SNOW);
    }

    #[test]
    fn test_cliffs_read_as_rock() {
        let bands = ColorBands::default();
        // High enough for snow, but nearly vertical
        assert_eq!(terrain_color(90.0, 0.2, 100.0, &bands), ROCK);
        // Underwater stays water even when steep
        assert_eq!(terrain_color(-10.0, 0.2, 100.0, &bands), WATER);
    }

    #[test]
    fn test_pure_function() {
        let bands = ColorBands::default();
        assert_eq!(
            terrain_color(37.5, 0.9, 120.0, &bands),
            terrain_color(37.5, 0.9, 120.0, &bands)
        );
    }

    #[test]
    fn test_rgb8_in_range() {
        let bands = ColorBands::default();
        for i in -20..40 {
            let c = terrain_color_rgb8(i as f32 * 5.0, 0.9, 120.0, &bands);
            // u8 cannot overflow, but the blend endpoints should stay sane
            assert!(c.iter().all(|&v| v > 0));
        }
    }
}
