use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wayfarer_core::catalog::{AssetProvider, DirectoryAssets, NoAssets};
use wayfarer_core::WorldId;
use wayfarer_tools::{WorldSummary, load_config};

/// Generates one world and prints it as ASCII with a chunk and portal summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// World id to generate; defaults to the configured starting world
    #[arg(short, long)]
    world: Option<String>,
    /// Directory holding `<asset>.json` map documents; omit to force procedural fallback
    #[arg(short, long)]
    maps: Option<PathBuf>,
    /// TOML file with `[sim]` settings and `[worlds.<id>]` overrides
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the summary as JSON instead of the ASCII view
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).with_target(false).init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let id = args.world.as_deref().map_or_else(|| config.sim.starting_world.clone(), WorldId::new);

    let assets: Box<dyn AssetProvider> = match &args.maps {
        Some(dir) => Box::new(DirectoryAssets::new(dir)),
        None => Box::new(NoAssets),
    };
    let mut catalog = config.catalog(args.seed)?;
    let world = catalog
        .generate_world(&id, assets.as_ref())
        .with_context(|| format!("Failed to generate world '{id}'"))?;
    let summary = WorldSummary::of(world);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print!("{}", world.ascii());
    println!();
    println!("World: {} ({}) from {}", summary.name, summary.id, summary.source);
    println!(
        "Size: {}x{} tiles of {} px, {} chunks, {} solid tiles",
        summary.width, summary.height, summary.tile_size, summary.chunks, summary.solid_tiles
    );
    for portal in &summary.portals {
        println!(
            "Portal '{}' -> {} at ({}, {}) {}x{}",
            portal.name, portal.target, portal.x, portal.y, portal.width, portal.height
        );
    }
    println!("Fingerprint: {}", summary.fingerprint);
    Ok(())
}
