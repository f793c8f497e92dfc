//! Fractional Brownian motion over a noise source

use crate::source::NoiseSource;
use serde::{Deserialize, Serialize};

/// Parameters for one fBm field: how many octaves to sum and how frequency
/// and amplitude evolve between them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FbmParams {
    /// Number of octaves to composite. More octaves add finer detail at the
    /// cost of additional samples per call.
    pub octaves: u32,
    /// Frequency of the first (lowest) octave.
    pub frequency: f64,
    /// Amplitude multiplier between successive octaves. 0.5 typical.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves. 2.0 typical.
    pub lacunarity: f64,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            frequency: 1.0,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Composite `params.octaves` octaves of `source` at (x, y).
///
/// The accumulated value is divided by the accumulated maximum amplitude, so
/// the result stays in roughly [-1, 1] regardless of octave count. A single
/// octave degenerates to exactly `source.sample(x * frequency, y * frequency)`;
/// zero octaves return 0.0 rather than dividing by zero.
pub fn fbm(source: &NoiseSource, x: f64, y: f64, params: &FbmParams) -> f64 {
    if params.octaves == 0 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut max_amplitude = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = params.frequency;

    for _ in 0..params.octaves {
        total += source.sample(x * frequency, y * frequency) * amplitude;
        max_amplitude += amplitude;
        amplitude *= params.persistence;
        frequency *= params.lacunarity;
    }

    total / max_amplitude
}

/// Fold a noise value into a ridge: creases where the field crosses zero.
pub fn ridge(v: f64) -> f64 {
    1.0 - v.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_octaves_returns_zero() {
        let source = NoiseSource::new(1);
        let params = FbmParams {
            octaves: 0,
            ..Default::default()
        };
        assert_eq!(fbm(&source, 10.0, 20.0, &params), 0.0);
    }

    #[test]
    fn test_single_octave_degenerates_to_raw_sample() {
        let source = NoiseSource::new(12345);
        let params = FbmParams {
            octaves: 1,
            frequency: 0.01,
            persistence: 0.5,
            lacunarity: 2.0,
        };
        for &(x, y) in &[(0.0, 0.0), (256.0, 0.0), (31.7, -8.2)] {
            let composed = fbm(&source, x, y, &params);
            let raw = source.sample(x * 0.01, y * 0.01);
            assert_eq!(composed, raw, "one octave must equal the raw sample");
        }
    }

    #[test]
    fn test_output_normalized() {
        let source = NoiseSource::new(99);
        let params = FbmParams {
            octaves: 8,
            frequency: 0.05,
            ..Default::default()
        };
        for i in 0..400 {
            let x = i as f64 * 3.1;
            let y = i as f64 * -2.7;
            let v = fbm(&source, x, y, &params);
            assert!(
                (-1.0..=1.0).contains(&v),
                "normalized fbm {v} out of range at ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_more_octaves_add_detail() {
        let source = NoiseSource::new(7);
        let one = FbmParams {
            octaves: 1,
            frequency: 0.02,
            ..Default::default()
        };
        let eight = FbmParams {
            octaves: 8,
            frequency: 0.02,
            ..Default::default()
        };

        let step = 0.5;
        let count = 1000;
        let mut diff_one = 0.0;
        let mut diff_eight = 0.0;
        for i in 0..count {
            let x = i as f64 * step;
            diff_one += (fbm(&source, x + step, 0.0, &one) - fbm(&source, x, 0.0, &one)).abs();
            diff_eight +=
                (fbm(&source, x + step, 0.0, &eight) - fbm(&source, x, 0.0, &eight)).abs();
        }

        assert!(
            diff_eight > diff_one,
            "eight octaves should vary faster than one: {diff_eight} vs {diff_one}"
        );
    }

    #[test]
    fn test_ridge_folds_to_unit_interval() {
        assert_eq!(ridge(0.0), 1.0);
        assert_eq!(ridge(1.0), 0.0);
        assert_eq!(ridge(-1.0), 0.0);
        assert_eq!(ridge(-0.5), 0.5);
    }

    #[test]
    fn test_deterministic_across_constructions() {
        let params = FbmParams {
            octaves: 5,
            frequency: 0.003,
            ..Default::default()
        };
        let a = fbm(&NoiseSource::new(42), 123.0, 456.0, &params);
        let b = fbm(&NoiseSource::new(42), 123.0, 456.0, &params);
        assert_eq!(a, b);
    }
}
