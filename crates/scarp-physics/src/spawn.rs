//! Spawn-position resolution above the terrain

use scarp_core::Vec3;
use scarp_terrain::HeightSource;

/// Resolve a spawn position at (x, z), `clearance` units above the ground.
///
/// Callers should wait for the terrain's ready signal before spawning a
/// physics-driven entity here: the height answer is valid immediately, but
/// the collider that will catch the entity only exists once the initial
/// chunk set is generated.
pub fn spawn_position(source: &dyn HeightSource, x: f32, z: f32, clearance: f32) -> Vec3 {
    let clearance = if clearance.is_finite() {
        clearance.max(0.0)
    } else {
        0.0
    };
    Vec3::new(x, source.height(x, z) + clearance, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scarp_terrain::{HeightField, TerrainConfig};

    struct Flat(f32);

    impl HeightSource for Flat {
        fn height(&self, _x: f32, _z: f32) -> f32 {
            self.0
        }
    }

    #[test]
    fn test_spawn_sits_clearance_above_ground() {
        let pos = spawn_position(&Flat(12.0), 3.0, -4.0, 2.0);
        assert_eq!(pos, Vec3::new(3.0, 14.0, -4.0));
    }

    #[test]
    fn test_negative_clearance_clamped() {
        let pos = spawn_position(&Flat(5.0), 0.0, 0.0, -10.0);
        assert_eq!(pos.y, 5.0);
    }

    #[test]
    fn test_spawn_matches_shared_field() {
        let field = HeightField::new(TerrainConfig::default());
        let pos = spawn_position(&field, 137.0, -42.0, 1.8);
        assert_eq!(pos.y, field.sample_height(137.0, -42.0) + 1.8);
    }
}
