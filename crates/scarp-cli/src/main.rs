//! Scarp CLI - Command-line tooling for the Scarp terrain engine

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{preview, probe, stream};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scarp")]
#[command(about = "Procedural terrain inspection and streaming tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query terrain heights at world coordinates
    Probe {
        /// World X coordinate
        x: f32,

        /// World Z coordinate
        z: f32,

        /// Path to a terrain config TOML; defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Probe an N x N grid centered on (x, z) instead of a single point
        #[arg(long)]
        grid: Option<u32>,

        /// Spacing between grid probes in world units
        #[arg(long, default_value_t = 100.0)]
        spacing: f32,
    },

    /// Export a grayscale heightmap PNG of a region around the origin
    Preview {
        /// Output PNG path
        #[arg(long, default_value = "heightmap.png")]
        out: PathBuf,

        /// Path to a terrain config TOML
        #[arg(long)]
        config: Option<PathBuf>,

        /// Image edge in pixels
        #[arg(long, default_value_t = 512)]
        size: u32,

        /// World-unit half-extent the image covers
        #[arg(long, default_value_t = 2000.0)]
        radius: f32,

        /// Render banded terrain colors instead of grayscale heights
        #[arg(long)]
        color: bool,

        /// Preview a raster heightmap PNG instead of the noise field
        #[arg(long)]
        heightmap: Option<PathBuf>,
    },

    /// Fly a camera through the chunk grid and report streaming churn
    Stream {
        /// Path to a terrain config TOML
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of update steps to simulate
        #[arg(long, default_value_t = 120)]
        steps: u32,

        /// Camera speed in world units per step
        #[arg(long, default_value_t = 25.0)]
        speed: f32,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Probe {
            x,
            z,
            config,
            format,
            grid,
            spacing,
        } => probe::run(x, z, config.as_deref(), &format, grid, spacing),
        Commands::Preview {
            out,
            config,
            size,
            radius,
            color,
            heightmap,
        } => preview::run(
            &out,
            config.as_deref(),
            size,
            radius,
            color,
            heightmap.as_deref(),
        ),
        Commands::Stream {
            config,
            steps,
            speed,
        } => stream::run(config.as_deref(), steps, speed),
    }
}
