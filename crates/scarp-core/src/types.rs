//! Spatial and common types

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::ZERO
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

/// An axis-aligned rectangle in the XZ plane.
///
/// Chunk footprints are rectangles; distance from the camera to a chunk is
/// measured to the nearest point on the rectangle, not to its center, so a
/// large chunk the camera stands inside of reports distance zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f32,
    pub min_z: f32,
    pub max_x: f32,
    pub max_z: f32,
}

impl Rect {
    pub fn new(min_x: f32, min_z: f32, max_x: f32, max_z: f32) -> Self {
        Self {
            min_x,
            min_z,
            max_x,
            max_z,
        }
    }

    /// Rectangle with the given origin corner and side length
    pub fn from_origin_size(origin_x: f32, origin_z: f32, size: f32) -> Self {
        Self {
            min_x: origin_x,
            min_z: origin_z,
            max_x: origin_x + size,
            max_z: origin_z + size,
        }
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) * 0.5,
            (self.min_z + self.max_z) * 0.5,
        )
    }

    /// Distance from a point to the nearest point on (or in) the rectangle.
    /// Zero when the point is inside.
    pub fn distance_to_point(&self, x: f32, z: f32) -> f32 {
        let dx = (self.min_x - x).max(0.0).max(x - self.max_x);
        let dz = (self.min_z - z).max(0.0).max(z - self.max_z);
        (dx * dx + dz * dz).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_cross_up() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let z = Vec3::new(0.0, 0.0, 1.0);
        let n = z.cross(&x);
        assert_eq!(n, Vec3::UP);
    }

    #[test]
    fn test_vec3_normalized_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }

    #[test]
    fn test_rect_distance_inside_is_zero() {
        let r = Rect::from_origin_size(0.0, 0.0, 100.0);
        assert_eq!(r.distance_to_point(50.0, 50.0), 0.0);
        assert_eq!(r.distance_to_point(0.0, 100.0), 0.0);
    }

    #[test]
    fn test_rect_distance_to_edge_and_corner() {
        let r = Rect::from_origin_size(0.0, 0.0, 100.0);
        // Straight out from an edge
        assert!((r.distance_to_point(150.0, 50.0) - 50.0).abs() < 1e-6);
        // Diagonal from a corner
        let d = r.distance_to_point(103.0, 104.0);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_rect_contains_border() {
        let r = Rect::new(-10.0, -10.0, 10.0, 10.0);
        assert!(r.contains(10.0, -10.0));
        assert!(!r.contains(10.1, 0.0));
    }
}
