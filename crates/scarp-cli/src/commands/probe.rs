//! Height query command

use anyhow::{bail, Result};
use scarp_terrain::{ground_normal, HeightField, HeightSource};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct Probe {
    x: f32,
    z: f32,
    height: f32,
    region_mask: f64,
    normal: [f32; 3],
}

pub fn run(
    x: f32,
    z: f32,
    config: Option<&Path>,
    format: &str,
    grid: Option<u32>,
    spacing: f32,
) -> Result<()> {
    let config = super::load_config(config)?;
    let field = HeightField::new(config);

    let mut probes = Vec::new();
    match grid {
        Some(n) if n > 1 => {
            let half = (n - 1) as f32 * 0.5;
            for iz in 0..n {
                for ix in 0..n {
                    let px = x + (ix as f32 - half) * spacing;
                    let pz = z + (iz as f32 - half) * spacing;
                    probes.push(sample(&field, px, pz));
                }
            }
        }
        _ => probes.push(sample(&field, x, z)),
    }

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&probes)?),
        "text" => {
            for p in &probes {
                println!(
                    "({:>10.2}, {:>10.2})  height {:>9.3}  region {:.3}  normal ({:.2}, {:.2}, {:.2})",
                    p.x, p.z, p.height, p.region_mask, p.normal[0], p.normal[1], p.normal[2]
                );
            }
        }
        other => bail!("unknown format '{other}' (expected text or json)"),
    }

    Ok(())
}

fn sample(field: &HeightField, x: f32, z: f32) -> Probe {
    Probe {
        x,
        z,
        height: field.height(x, z),
        region_mask: field.region_mask(x, z),
        normal: ground_normal(field, x, z, 1.0).to_array(),
    }
}
