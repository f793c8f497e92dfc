//! Raster-image height source
//!
//! An alternate height source backed by a grayscale image rather than noise.
//! It answers the same height-query contract as the procedural field, so
//! chunk meshing, colliders, and placement work unchanged on painted maps.

use crate::query::HeightSource;
use scarp_core::{Result, ScarpError};
use std::path::Path;

/// A grayscale heightmap with bilinear sampling over a world extent
pub struct RasterHeightField {
    /// Row-major height values normalized to [0..1]
    heights: Vec<f32>,
    width: u32,
    depth: u32,
    /// World-space X extent covered by the raster
    extent_x: f32,
    /// World-space Z extent covered by the raster
    extent_z: f32,
    /// World height that a raster value of 1.0 maps to
    height_scale: f32,
}

impl RasterHeightField {
    /// Load from a grayscale PNG. Values are normalized to [0..1] regardless
    /// of bit depth.
    pub fn from_png(
        path: &Path,
        extent_x: f32,
        extent_z: f32,
        height_scale: f32,
    ) -> Result<Self> {
        let img = image::open(path).map_err(|e| {
            ScarpError::ImageError(format!(
                "failed to load heightmap '{}': {}",
                path.display(),
                e
            ))
        })?;

        let gray = img.into_luma16();
        let width = gray.width();
        let depth = gray.height();

        let heights: Vec<f32> = gray.pixels().map(|p| p.0[0] as f32 / 65535.0).collect();

        Self::from_raw(heights, width, depth, extent_x, extent_z, height_scale)
    }

    /// Create from raw normalized values (row-major, width * depth entries)
    pub fn from_raw(
        heights: Vec<f32>,
        width: u32,
        depth: u32,
        extent_x: f32,
        extent_z: f32,
        height_scale: f32,
    ) -> Result<Self> {
        if width < 2 || depth < 2 {
            return Err(ScarpError::HeightmapError(format!(
                "raster must be at least 2x2, got {width}x{depth}"
            )));
        }
        if heights.len() != (width * depth) as usize {
            return Err(ScarpError::HeightmapError(format!(
                "expected {} height values, got {}",
                width * depth,
                heights.len()
            )));
        }
        if extent_x <= 0.0 || extent_z <= 0.0 {
            return Err(ScarpError::HeightmapError(
                "raster world extent must be positive".into(),
            ));
        }

        Ok(Self {
            heights,
            width,
            depth,
            extent_x,
            extent_z,
            height_scale,
        })
    }

    /// Bilinear sample at normalized UV coordinates (0..1, 0..1).
    /// Returns interpolated height in [0..1]; out-of-range UVs clamp to the
    /// border.
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
        let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };

        let fx = u * (self.width - 1) as f32;
        let fz = v * (self.depth - 1) as f32;

        let x0 = (fx as u32).min(self.width - 2);
        let z0 = (fz as u32).min(self.depth - 2);
        let x1 = x0 + 1;
        let z1 = z0 + 1;

        let tx = fx - x0 as f32;
        let tz = fz - z0 as f32;

        let h00 = self.get(x0, z0);
        let h10 = self.get(x1, z0);
        let h01 = self.get(x0, z1);
        let h11 = self.get(x1, z1);

        let h0 = h00 * (1.0 - tx) + h10 * tx;
        let h1 = h01 * (1.0 - tx) + h11 * tx;

        h0 * (1.0 - tz) + h1 * tz
    }

    /// Raster dimensions in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.depth)
    }

    fn get(&self, x: u32, z: u32) -> f32 {
        self.heights[(z * self.width + x) as usize]
    }
}

impl HeightSource for RasterHeightField {
    /// World-space height at (x, z). The raster covers the rectangle from
    /// the origin to (extent_x, extent_z); queries outside clamp to the
    /// border row or column.
    fn height(&self, x: f32, z: f32) -> f32 {
        let u = x / self.extent_x;
        let v = z / self.extent_z;
        self.sample(u, v) * self.height_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_sample_interpolates() {
        // 3x3 raster: center pixel 1.0, edges 0.0
        let heights = vec![
            0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0,
        ];
        let raster = RasterHeightField::from_raw(heights, 3, 3, 10.0, 10.0, 1.0).unwrap();

        assert!((raster.sample(0.5, 0.5) - 1.0).abs() < 0.01);
        assert!((raster.sample(0.0, 0.0)).abs() < 0.01);
    }

    #[test]
    fn test_world_height_scales() {
        let raster = RasterHeightField::from_raw(vec![0.5; 4], 2, 2, 100.0, 100.0, 40.0).unwrap();
        let h = raster.height(0.0, 0.0);
        assert!((h - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_out_of_extent_clamps() {
        let heights = vec![0.0, 1.0, 0.0, 1.0];
        let raster = RasterHeightField::from_raw(heights, 2, 2, 10.0, 10.0, 5.0).unwrap();
        // Far beyond the right edge clamps to the right column
        assert!((raster.height(500.0, 0.0) - 5.0).abs() < 0.01);
        // Negative clamps to the left column
        assert!((raster.height(-500.0, 0.0)).abs() < 0.01);
    }

    #[test]
    fn test_rejects_degenerate_rasters() {
        assert!(RasterHeightField::from_raw(vec![0.0], 1, 1, 10.0, 10.0, 1.0).is_err());
        assert!(RasterHeightField::from_raw(vec![0.0; 3], 2, 2, 10.0, 10.0, 1.0).is_err());
        assert!(RasterHeightField::from_raw(vec![0.0; 4], 2, 2, 0.0, 10.0, 1.0).is_err());
    }

    #[test]
    fn test_nan_uv_falls_back_to_origin() {
        let raster = RasterHeightField::from_raw(vec![0.25; 4], 2, 2, 10.0, 10.0, 8.0).unwrap();
        assert_eq!(raster.sample(f32::NAN, 0.5), raster.sample(0.0, 0.5));
    }
}
