//! Seeded procedural worlds. This module exists to build a playable world when no authored
//! map is available. It does not own map import or entity spawning.

use tracing::debug;

use crate::random::Dice;
use crate::types::{Rect, TilePos};
use crate::world::{
    BaseTile, DEFAULT_GROUND_TILE_ID, Portal, PortalRegistry, Theme, Tile, TileStore, TileType,
    World, WorldDef, WorldSource,
};

use super::seed::derive_world_seed;

pub const EXIT_PORTAL_SIZE: f32 = 64.0;

const FOREST_TREE_CHANCE: f32 = 0.08;
const CAVE_ROCK_CHANCE: f32 = 0.12;
const CAVE_WATER_CHANCE: f32 = 0.06;

pub struct ProceduralGenerator {
    run_seed: u64,
}

impl ProceduralGenerator {
    pub fn new(run_seed: u64) -> Self {
        Self { run_seed }
    }

    pub fn generate(&self, def: &WorldDef) -> World {
        let seed = derive_world_seed(self.run_seed, &def.id);
        let mut dice = Dice::seeded(seed);
        let (width, height) = (def.width.max(1), def.height.max(1));

        let mut kinds = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                kinds.push(if border { TileType::Wall } else { roll_interior(def.theme, &mut dice) });
            }
        }

        let ground = ground_for(def.theme);
        let mut carve = |pos: TilePos| {
            let interior = pos.x > 0
                && pos.y > 0
                && (pos.x as usize) < width - 1
                && (pos.y as usize) < height - 1;
            if interior {
                kinds[pos.y as usize * width + pos.x as usize] = ground;
            }
        };

        carve(def.spawn);

        let mut portals = Vec::new();
        if let Some(exit) = &def.exit_portal {
            let corner = TilePos { y: height as i32 - 3, x: width as i32 - 3 };
            for (dy, dx) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
                carve(TilePos { y: corner.y + dy, x: corner.x + dx });
            }
            let ts = def.tile_size as f32;
            portals.push(Portal {
                rect: Rect::new(
                    corner.x as f32 * ts,
                    corner.y as f32 * ts,
                    EXIT_PORTAL_SIZE,
                    EXIT_PORTAL_SIZE,
                ),
                name: exit.name.clone(),
                teleport_to: exit.target.canonical(),
            });
        }

        let tiles = kinds
            .iter()
            .enumerate()
            .map(|(idx, &kind)| {
                let pos = TilePos { y: (idx / width) as i32, x: (idx % width) as i32 };
                let base = BaseTile::of(kind).with_graphic(&def.tileset, graphic_id(kind));
                Tile::plain(pos, def.tile_size, base)
            })
            .collect();

        debug!(world = %def.id, seed, width, height, "generated procedural world");
        World::assemble(
            def.clone(),
            TileStore::from_rows(width, height, def.tile_size, tiles),
            PortalRegistry::new(portals),
            WorldSource::Procedural { seed },
        )
    }
}

fn roll_interior(theme: Theme, dice: &mut Dice) -> TileType {
    match theme {
        Theme::Plain => TileType::Grass,
        Theme::Forest => {
            if dice.chance(FOREST_TREE_CHANCE) {
                TileType::Tree
            } else {
                TileType::Grass
            }
        }
        Theme::Cave => {
            let roll = dice.unit();
            if roll < CAVE_ROCK_CHANCE {
                TileType::Rock
            } else if roll < CAVE_ROCK_CHANCE + CAVE_WATER_CHANCE {
                TileType::Water
            } else {
                TileType::CaveFloor
            }
        }
    }
}

fn ground_for(theme: Theme) -> TileType {
    match theme {
        Theme::Cave => TileType::CaveFloor,
        Theme::Plain | Theme::Forest => TileType::Grass,
    }
}

fn graphic_id(kind: TileType) -> u32 {
    match kind {
        TileType::Tree => 0,
        TileType::Rock => 1,
        TileType::Water => 2,
        TileType::Wall => 3,
        TileType::CaveFloor => 4,
        _ => DEFAULT_GROUND_TILE_ID,
    }
}
