//! Heightmap PNG export command

use anyhow::{Context, Result};
use image::{ImageBuffer, Luma, Rgb};
use scarp_terrain::{
    ground_normal, terrain_color_rgb8, ColorBands, HeightField, HeightSource, RasterHeightField,
};
use std::path::Path;

pub fn run(
    out: &Path,
    config: Option<&Path>,
    size: u32,
    radius: f32,
    color: bool,
    heightmap: Option<&Path>,
) -> Result<()> {
    let size = size.clamp(16, 8192);
    let config = super::load_config(config)?;
    let height_scale = config.height_scale;

    // A raster covers [0, 2r]^2 from its origin corner; the noise field is
    // sampled symmetrically around the world origin.
    let (source, origin): (Box<dyn HeightSource>, f32) = match heightmap {
        Some(path) => {
            let raster =
                RasterHeightField::from_png(path, radius * 2.0, radius * 2.0, height_scale)?;
            (Box::new(raster), 0.0)
        }
        None => (Box::new(HeightField::new(config)), -radius),
    };

    log::info!("sampling {size}x{size} preview over radius {radius}");

    let world_at = |px: u32, pz: u32| {
        let t_x = px as f32 / (size - 1) as f32;
        let t_z = pz as f32 / (size - 1) as f32;
        (origin + t_x * 2.0 * radius, origin + t_z * 2.0 * radius)
    };

    let mut heights = vec![0.0f32; (size * size) as usize];
    let mut min = f32::MAX;
    let mut max = f32::MIN;

    for pz in 0..size {
        for px in 0..size {
            let (x, z) = world_at(px, pz);
            let h = source.height(x, z);
            heights[(pz * size + px) as usize] = h;
            min = min.min(h);
            max = max.max(h);
        }
    }

    if color {
        let bands = ColorBands::default();
        // Normal step matched to the pixel footprint so slopes read correctly
        let step = (radius * 2.0 / size as f32).max(0.5);
        let img = ImageBuffer::from_fn(size, size, |px, pz| {
            let (x, z) = world_at(px, pz);
            let h = heights[(pz * size + px) as usize];
            let n = ground_normal(source.as_ref(), x, z, step);
            Rgb(terrain_color_rgb8(h, n.y, height_scale, &bands))
        });
        img.save(out)
            .with_context(|| format!("writing preview '{}'", out.display()))?;
    } else {
        let range = (max - min).max(1e-6);
        let img = ImageBuffer::from_fn(size, size, |px, pz| {
            let h = heights[(pz * size + px) as usize];
            Luma([((h - min) / range * 65535.0) as u16])
        });
        img.save(out)
            .with_context(|| format!("writing preview '{}'", out.display()))?;
    }

    println!(
        "wrote {}: {}x{} px covering {:.0} world units, heights {:.2}..{:.2}",
        out.display(),
        size,
        size,
        radius * 2.0,
        min,
        max
    );
    Ok(())
}
