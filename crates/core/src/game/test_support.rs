//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating world and actor setup across many tests.
//! It does not own production gameplay logic.

use super::*;
use crate::catalog::NoAssets;
use crate::world::{ExitPortalDef, Theme, WorldDef};

/// Open 12x12 grass room with a wall ring, spawn at tile (2, 2) and no seeded entities.
pub(super) fn open_room_def(id: &str) -> WorldDef {
    WorldDef {
        id: WorldId::new(id),
        name: id.to_owned(),
        theme: Theme::Plain,
        width: 12,
        height: 12,
        spawn: TilePos { y: 2, x: 2 },
        ..WorldDef::default()
    }
}

pub(super) fn game_with_worlds(defs: Vec<WorldDef>) -> Game {
    let start = defs.first().map(|def| def.id.clone()).unwrap_or_else(WorldId::overworld);
    let config = SimConfig { starting_world: start, ..SimConfig::default() };
    let catalog = WorldCatalog::with_definitions(7, defs);
    Game::with_catalog(7, config, catalog, Box::new(NoAssets)).expect("starting world exists")
}

pub(super) fn open_room_game() -> Game {
    game_with_worlds(vec![open_room_def("room")])
}

/// `west` and `east` rooms whose exit portals at tile (9, 9) lead to each other.
pub(super) fn two_room_game() -> Game {
    let link = |id: &str, target: &str| WorldDef {
        exit_portal: Some(ExitPortalDef {
            name: format!("to {target}"),
            target: WorldId::new(target),
        }),
        ..open_room_def(id)
    };
    game_with_worlds(vec![link("west", "east"), link("east", "west")])
}

/// Inserts a default enemy at `pos` and returns its id.
pub(super) fn place_enemy(game: &mut Game, pos: Vec2) -> EnemyId {
    game.spawn_enemy(pos)
}

pub(super) fn idle_ticks(game: &mut Game, ticks: usize) {
    for _ in 0..ticks {
        game.advance(&PlayerInput::default(), 16);
    }
}
