//! Deterministic vegetation placement
//!
//! Scatters decoration anchor points (grass tufts, rocks, trees) over a
//! region by hashing a coarse cell grid: one candidate per cell, jittered
//! inside it, accepted by density noise and a slope limit. Everything
//! derives from (seed, cell), so the same region always scatters the same
//! way regardless of chunk streaming order.

use crate::query::{ground_normal, HeightSource};
use scarp_core::{Rect, Vec3};
use serde::{Deserialize, Serialize};

/// Tunables for one scatter pass
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterParams {
    pub seed: u32,
    /// Candidate cell edge in world units; one candidate per cell
    pub cell_size: f32,
    /// Overall acceptance in [0..1], shaped further by patch noise
    pub density: f32,
    /// Minimum surface-normal Y; rejects slopes steeper than this allows
    pub min_up: f32,
    /// Finite-difference step for the surface normal
    pub normal_step: f32,
    pub scale_min: f32,
    pub scale_max: f32,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self {
            seed: 0,
            cell_size: 4.0,
            density: 0.6,
            min_up: 0.7,
            normal_step: 1.0,
            scale_min: 0.8,
            scale_max: 1.3,
        }
    }
}

/// One placed decoration anchor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatterInstance {
    pub position: Vec3,
    pub normal: Vec3,
    /// Yaw in radians
    pub rotation: f32,
    pub scale: f32,
}

/// Integer hash producing a value in [0, 1]
fn hash_2d(ix: i32, iz: i32, seed: u32) -> f32 {
    let mut h = (ix as u32)
        .wrapping_mul(374761393)
        .wrapping_add((iz as u32).wrapping_mul(668265263))
        .wrapping_add(seed.wrapping_mul(1274126177));
    h = (h ^ (h >> 13)).wrapping_mul(1103515245);
    h ^= h >> 16;
    (h & 0x7FFFFFFF) as f32 / 0x7FFFFFFF_u32 as f32
}

/// Smooth cell-hash noise with bilinear interpolation, in [0, 1].
/// Drives clearings and density patches at a scale above the cell grid.
fn patch_noise(x: f32, z: f32, scale: f32, seed: u32) -> f32 {
    let sx = x / scale;
    let sz = z / scale;

    let ix = sx.floor() as i32;
    let iz = sz.floor() as i32;
    let fx = sx - sx.floor();
    let fz = sz - sz.floor();

    // Smoothstep for C1 continuity across cell borders
    let fx = fx * fx * (3.0 - 2.0 * fx);
    let fz = fz * fz * (3.0 - 2.0 * fz);

    let h00 = hash_2d(ix, iz, seed);
    let h10 = hash_2d(ix + 1, iz, seed);
    let h01 = hash_2d(ix, iz + 1, seed);
    let h11 = hash_2d(ix + 1, iz + 1, seed);

    let a = h00 + (h10 - h00) * fx;
    let b = h01 + (h11 - h01) * fx;
    a + (b - a) * fz
}

/// Scatter instances over a rectangle of the world.
///
/// Heights come from the shared height source, never from mesh caches, so
/// placement works the same for loaded and unloaded chunks.
pub fn scatter_in_rect(
    rect: Rect,
    params: &ScatterParams,
    source: &dyn HeightSource,
) -> Vec<ScatterInstance> {
    let cell = if params.cell_size.is_finite() && params.cell_size > 0.01 {
        params.cell_size
    } else {
        ScatterParams::default().cell_size
    };
    let density = params.density.clamp(0.0, 1.0);
    if density == 0.0 {
        return Vec::new();
    }

    let min_ix = (rect.min_x / cell).floor() as i32;
    let max_ix = (rect.max_x / cell).floor() as i32;
    let min_iz = (rect.min_z / cell).floor() as i32;
    let max_iz = (rect.max_z / cell).floor() as i32;

    let mut instances = Vec::new();

    for iz in min_iz..=max_iz {
        for ix in min_ix..=max_ix {
            let accept = hash_2d(ix, iz, params.seed);
            let x = (ix as f32 + hash_2d(ix, iz, params.seed.wrapping_add(1))) * cell;
            let z = (iz as f32 + hash_2d(ix, iz, params.seed.wrapping_add(2))) * cell;

            if !rect.contains(x, z) {
                continue;
            }

            // Clearings at ~8 cells scale
            let patch = patch_noise(x, z, cell * 8.0, params.seed.wrapping_add(3));
            if accept > density * patch {
                continue;
            }

            let normal = ground_normal(source, x, z, params.normal_step);
            if normal.y < params.min_up {
                continue;
            }

            let rotation =
                hash_2d(ix, iz, params.seed.wrapping_add(4)) * std::f32::consts::TAU;
            let t = hash_2d(ix, iz, params.seed.wrapping_add(5));
            let scale = params.scale_min + (params.scale_max - params.scale_min) * t;

            instances.push(ScatterInstance {
                position: Vec3::new(x, source.height(x, z), z),
                normal,
                rotation,
                scale,
            });
        }
    }

    instances
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flat;

    impl HeightSource for Flat {
        fn height(&self, _x: f32, _z: f32) -> f32 {
            3.0
        }
    }

    struct Cliff;

    impl HeightSource for Cliff {
        fn height(&self, x: f32, _z: f32) -> f32 {
            x * 10.0
        }
    }

    fn region() -> Rect {
        Rect::new(0.0, 0.0, 200.0, 200.0)
    }

    #[test]
    fn test_scatter_is_deterministic() {
        let params = ScatterParams::default();
        let a = scatter_in_rect(region(), &params, &Flat);
        let b = scatter_in_rect(region(), &params, &Flat);
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_instances_sit_on_the_ground() {
        let instances = scatter_in_rect(region(), &ScatterParams::default(), &Flat);
        for inst in &instances {
            assert_eq!(inst.position.y, 3.0);
            assert!(region().contains(inst.position.x, inst.position.z));
            assert!(inst.scale >= 0.8 && inst.scale <= 1.3);
        }
    }

    #[test]
    fn test_zero_density_places_nothing() {
        let params = ScatterParams {
            density: 0.0,
            ..ScatterParams::default()
        };
        assert!(scatter_in_rect(region(), &params, &Flat).is_empty());
    }

    #[test]
    fn test_slope_limit_rejects_cliffs() {
        let instances = scatter_in_rect(region(), &ScatterParams::default(), &Cliff);
        assert!(
            instances.is_empty(),
            "a 10:1 grade is far past any min_up of 0.7"
        );
    }

    #[test]
    fn test_seeds_change_the_layout() {
        let a = scatter_in_rect(region(), &ScatterParams::default(), &Flat);
        let b = scatter_in_rect(
            region(),
            &ScatterParams {
                seed: 99,
                ..ScatterParams::default()
            },
            &Flat,
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_density_scales_population() {
        let sparse = scatter_in_rect(
            region(),
            &ScatterParams {
                density: 0.1,
                ..ScatterParams::default()
            },
            &Flat,
        );
        let dense = scatter_in_rect(
            region(),
            &ScatterParams {
                density: 1.0,
                ..ScatterParams::default()
            },
            &Flat,
        );
        assert!(dense.len() > sparse.len());
    }
}
