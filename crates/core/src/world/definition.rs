//! Static per-world definitions. This module exists to describe a world before it is built.
//! It does not own generation or live entity state.

use serde::{Deserialize, Serialize};

use crate::types::{TilePos, Vec2, WorldId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Plain,
    Forest,
    Cave,
}

/// Where a player lands when entering the world through a portal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ArrivalAnchor {
    #[default]
    SpawnPoint,
    /// Tile `(width - inset, height - inset)`.
    NearFarCorner { inset: i32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExitPortalDef {
    pub name: String,
    pub target: WorldId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NpcDef {
    pub name: String,
    /// Pixel offset from the world's spawn point.
    pub offset: Vec2,
    pub width: f32,
    pub height: f32,
    pub dialogue: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldDef {
    pub id: WorldId,
    pub name: String,
    pub theme: Theme,
    pub width: usize,
    pub height: usize,
    pub tile_size: u32,
    pub spawn: TilePos,
    pub enemy_density: f32,
    pub item_density: f32,
    pub map_asset: Option<String>,
    pub force_procedural: bool,
    pub base_layer: String,
    pub tileset: String,
    pub arrival: ArrivalAnchor,
    /// Portal synthesized near the far corner when the world is generated procedurally.
    /// Imported maps author their own portals and ignore it.
    pub exit_portal: Option<ExitPortalDef>,
    pub npcs: Vec<NpcDef>,
}

impl Default for WorldDef {
    fn default() -> Self {
        Self {
            id: WorldId::overworld(),
            name: String::new(),
            theme: Theme::Plain,
            width: 30,
            height: 30,
            tile_size: 32,
            spawn: TilePos { y: 15, x: 15 },
            enemy_density: 0.0,
            item_density: 0.0,
            map_asset: None,
            force_procedural: false,
            base_layer: "grass".to_owned(),
            tileset: "forest".to_owned(),
            arrival: ArrivalAnchor::SpawnPoint,
            exit_portal: None,
            npcs: Vec::new(),
        }
    }
}

impl WorldDef {
    pub fn overworld() -> Self {
        Self {
            id: WorldId::overworld(),
            name: "Overworld".to_owned(),
            theme: Theme::Forest,
            spawn: TilePos { y: 25, x: 15 },
            enemy_density: 0.12,
            item_density: 0.08,
            map_asset: Some("overworld_map".to_owned()),
            exit_portal: Some(ExitPortalDef {
                name: "Cave Entrance".to_owned(),
                target: WorldId::cave(),
            }),
            npcs: vec![NpcDef {
                name: "Village Elder".to_owned(),
                offset: Vec2::new(80.0, 20.0),
                width: 32.0,
                height: 32.0,
                dialogue: vec![
                    "Greetings, traveler!".to_owned(),
                    "The world is full of adventure, but also great peril.".to_owned(),
                    "Seek out the lost ruins to the east if you dare.".to_owned(),
                ],
            }],
            ..Self::default()
        }
    }

    pub fn cave() -> Self {
        Self {
            id: WorldId::cave(),
            name: "Cave".to_owned(),
            theme: Theme::Cave,
            width: 40,
            height: 40,
            spawn: TilePos { y: 35, x: 20 },
            enemy_density: 0.25,
            item_density: 0.15,
            force_procedural: true,
            tileset: "cave".to_owned(),
            arrival: ArrivalAnchor::NearFarCorner { inset: 5 },
            exit_portal: Some(ExitPortalDef {
                name: "Cave Exit".to_owned(),
                target: WorldId::overworld(),
            }),
            ..Self::default()
        }
    }

    pub fn spawn_pixel(&self) -> Vec2 {
        let ts = self.tile_size as f32;
        Vec2::new(self.spawn.x as f32 * ts, self.spawn.y as f32 * ts)
    }
}
