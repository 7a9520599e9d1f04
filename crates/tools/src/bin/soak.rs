use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use wayfarer_core::catalog::{AssetProvider, DirectoryAssets, NoAssets};
use wayfarer_core::{Game, PlayerInput};
use wayfarer_tools::{event_name, load_config, random_input};

/// Runs the simulation with seeded random inputs and checks collision invariants every tick.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 10_000)]
    ticks: u32,
    /// Seed for the input stream; defaults to the run seed
    #[arg(long)]
    input_seed: Option<u64>,
    /// Ticks each random input is held for
    #[arg(long, default_value_t = 8)]
    hold: u32,
    #[arg(short, long)]
    maps: Option<PathBuf>,
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).with_target(false).init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let tick_ms = config.sim.tick_ms;
    let catalog = config.catalog(args.seed)?;

    let assets: Box<dyn AssetProvider> = match &args.maps {
        Some(dir) => Box::new(DirectoryAssets::new(dir)),
        None => Box::new(NoAssets),
    };
    let mut game = Game::with_catalog(args.seed, config.sim, catalog, assets)?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.input_seed.unwrap_or(args.seed));
    let mut input = PlayerInput::default();
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();

    println!("Soaking seed {} for {} ticks...", args.seed, args.ticks);
    for tick in 0..args.ticks {
        if tick % args.hold.max(1) == 0 {
            input = random_input(&mut rng);
        }
        game.advance(&input, tick_ms);
        for event in game.drain_log() {
            *counts.entry(event_name(&event)).or_default() += 1;
        }

        let player = game.state().player.rect();
        if game.check_collision(None, player) {
            bail!(
                "Invariant failed: player overlaps a solid tile in '{}' at tick {tick}",
                game.active_world_id()
            );
        }
        for enemy in game.state().enemies.values() {
            if !enemy.dying && game.check_collision(None, enemy.rect()) {
                bail!("Invariant failed: enemy inside a solid tile at tick {tick}");
            }
        }
    }

    println!("Final world: {}", game.active_world_id());
    for (name, count) in &counts {
        println!("  {name}: {count}");
    }
    println!("Snapshot Hash: 0x{:016x}", game.snapshot_hash());
    Ok(())
}
