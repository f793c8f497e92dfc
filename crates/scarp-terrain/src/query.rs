//! Shared height-query interface
//!
//! Physics collider generation, vegetation placement, and spawn-position
//! resolution all need the ground height at arbitrary, possibly off-grid,
//! world coordinates. They must all see the *same* field instance that the
//! chunk mesher samples: two fields built from nominally equal parameters
//! are not guaranteed bit-identical, so the query handle is one shared
//! `Arc`, never reconstructed per consumer.

use scarp_core::Vec3;
use std::sync::Arc;

/// Anything that can answer a ground-height query at world (x, z).
///
/// Implementations must be pure: repeated calls with the same arguments
/// return the same value, with no interior mutability, so a source can be
/// sampled concurrently.
pub trait HeightSource: Send + Sync {
    fn height(&self, x: f32, z: f32) -> f32;
}

/// The single shared handle consumers hold on to
pub type SharedHeightSource = Arc<dyn HeightSource>;

/// Surface normal at (x, z) from central differences of the height field.
///
/// Used by consumers that orient decorations to the ground without access
/// to chunk mesh normals (off-grid positions, unloaded chunks).
pub fn ground_normal(source: &dyn HeightSource, x: f32, z: f32, step: f32) -> Vec3 {
    let step = if step.is_finite() && step > 1e-3 {
        step
    } else {
        1e-3
    };

    let h_left = source.height(x - step, z);
    let h_right = source.height(x + step, z);
    let h_near = source.height(x, z - step);
    let h_far = source.height(x, z + step);

    let dx = (h_right - h_left) / (2.0 * step);
    let dz = (h_far - h_near) / (2.0 * step);

    Vec3::new(-dx, 1.0, -dz).normalized()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flat(f32);

    impl HeightSource for Flat {
        fn height(&self, _x: f32, _z: f32) -> f32 {
            self.0
        }
    }

    struct Ramp;

    impl HeightSource for Ramp {
        fn height(&self, x: f32, _z: f32) -> f32 {
            x
        }
    }

    #[test]
    fn test_flat_ground_normal_points_up() {
        let n = ground_normal(&Flat(12.0), 3.0, 4.0, 0.5);
        assert!((n.x).abs() < 1e-6);
        assert!((n.y - 1.0).abs() < 1e-6);
        assert!((n.z).abs() < 1e-6);
    }

    #[test]
    fn test_ramp_normal_tilts_against_slope() {
        let n = ground_normal(&Ramp, 0.0, 0.0, 0.5);
        assert!(n.x < 0.0, "normal should lean against the +x slope");
        assert!(n.y > 0.0);
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_step_is_clamped() {
        let n = ground_normal(&Flat(0.0), 0.0, 0.0, 0.0);
        assert!((n.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_shared_handle_is_one_instance() {
        let shared: SharedHeightSource = Arc::new(Flat(7.0));
        let clone = Arc::clone(&shared);
        assert_eq!(shared.height(0.0, 0.0), clone.height(100.0, -3.5));
        assert_eq!(Arc::strong_count(&shared), 2);
    }
}
