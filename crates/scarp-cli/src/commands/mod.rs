//! CLI command implementations

pub mod preview;
pub mod probe;
pub mod stream;

use anyhow::{Context, Result};
use scarp_terrain::TerrainConfig;
use std::path::Path;

/// Load a config from a TOML file, or fall back to the defaults
pub fn load_config(path: Option<&Path>) -> Result<TerrainConfig> {
    match path {
        Some(path) => TerrainConfig::from_toml_path(path)
            .with_context(|| format!("loading terrain config '{}'", path.display())),
        None => Ok(TerrainConfig::default()),
    }
}
