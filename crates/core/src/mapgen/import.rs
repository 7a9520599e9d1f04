//! Layered map import. This module exists to turn an authored Tiled-style JSON document into a
//! world. It does not own fallback policy; callers decide what to do with an import error.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::MapImportError;
use crate::types::{Rect, TilePos, WorldId};
use crate::world::{
    BaseTile, DEFAULT_GROUND_TILE_ID, Overlay, Portal, PortalRegistry, Tile, TileGraphic,
    TileStore, TileType, World, WorldDef, WorldSource,
};

/// Size given to portal objects authored as points.
pub const DEFAULT_PORTAL_SIZE: f32 = 64.0;

/// Largest width or height, in tiles, an imported map may declare.
pub const MAX_MAP_SIDE: usize = 1024;

const FLIP_FLAGS_MASK: u32 = 0xE000_0000;

#[derive(Debug, Deserialize)]
struct MapDocument {
    width: usize,
    height: usize,
    #[serde(default)]
    tilesets: Vec<TilesetRef>,
    layers: Vec<Layer>,
}

#[derive(Debug, Deserialize)]
struct TilesetRef {
    #[serde(alias = "firstGid")]
    firstgid: u32,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Layer {
    #[serde(rename = "tilelayer")]
    Tiles(TileLayer),
    #[serde(rename = "objectgroup")]
    Objects(ObjectLayer),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct TileLayer {
    name: String,
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default = "visible_default")]
    visible: bool,
    #[serde(default)]
    properties: Vec<Property>,
}

#[derive(Debug, Deserialize)]
struct ObjectLayer {
    #[serde(default)]
    objects: Vec<MapObject>,
}

#[derive(Debug, Deserialize)]
struct MapObject {
    #[serde(default)]
    name: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    properties: Vec<Property>,
}

#[derive(Debug, Deserialize)]
struct Property {
    name: String,
    #[serde(default)]
    value: Value,
}

fn visible_default() -> bool {
    true
}

fn property<'a>(properties: &'a [Property], name: &str) -> Option<&'a Value> {
    properties.iter().find(|p| p.name == name).map(|p| &p.value)
}

/// Semantic type and solidity a tile layer contributes, keyed by layer name.
pub fn layer_rule(layer_name: &str) -> (TileType, bool) {
    match layer_name {
        "rocks" => (TileType::Rock, true),
        "cave tiles" => (TileType::Cave, true),
        "water" => (TileType::Water, true),
        "walkways" => (TileType::Path, false),
        _ => (TileType::Decoration, false),
    }
}

struct GidResolver<'a> {
    tilesets: &'a [TilesetRef],
    fallback_name: &'a str,
}

impl GidResolver<'_> {
    /// Tileset name and local index for a non-empty gid.
    fn resolve(&self, raw_gid: u32) -> Option<TileGraphic> {
        let gid = raw_gid & !FLIP_FLAGS_MASK;
        if gid == 0 {
            return None;
        }
        let owner =
            self.tilesets.iter().filter(|ts| ts.firstgid <= gid).max_by_key(|ts| ts.firstgid);
        let (tileset, first) = match owner {
            Some(ts) => (tileset_name(ts).unwrap_or(self.fallback_name), ts.firstgid),
            None => (self.fallback_name, 1),
        };
        Some(TileGraphic { tileset: tileset.to_owned(), tile_id: gid - first })
    }
}

fn tileset_name(tileset: &TilesetRef) -> Option<&str> {
    if let Some(name) = tileset.name.as_deref() {
        return Some(name);
    }
    let source = tileset.source.as_deref()?;
    let file = source.rsplit(['/', '\\']).next().unwrap_or(source);
    Some(file.split('.').next().unwrap_or(file))
}

fn require_fields(raw: &Value) -> Result<(), MapImportError> {
    for field in ["width", "height", "layers"] {
        if raw.get(field).is_none_or(Value::is_null) {
            return Err(MapImportError::MissingField(field));
        }
    }
    Ok(())
}

pub fn import_world(def: &WorldDef, asset: &str, document: &str) -> Result<World, MapImportError> {
    let raw: Value = serde_json::from_str(document)?;
    require_fields(&raw)?;
    let map: MapDocument = serde_json::from_value(raw)?;
    if map.width == 0 || map.height == 0 {
        return Err(MapImportError::EmptyDimensions { width: map.width, height: map.height });
    }

    let cells = map
        .width
        .checked_mul(map.height)
        .filter(|_| map.width <= MAX_MAP_SIDE && map.height <= MAX_MAP_SIDE)
        .ok_or(MapImportError::TooLarge { width: map.width, height: map.height })?;

    let resolver = GidResolver { tilesets: &map.tilesets, fallback_name: &def.tileset };
    let ground = TileGraphic { tileset: def.tileset.clone(), tile_id: DEFAULT_GROUND_TILE_ID };

    let base_layer = map.layers.iter().find_map(|layer| match layer {
        Layer::Tiles(tiles) if tiles.name == def.base_layer => Some(tiles),
        _ => None,
    });

    let mut bases: Vec<BaseTile> = (0..cells)
        .map(|idx| {
            let gid = base_layer.and_then(|layer| layer.data.get(idx).copied()).unwrap_or(0);
            let graphic = resolver.resolve(gid).unwrap_or_else(|| ground.clone());
            BaseTile { kind: TileType::Grass, solid: false, graphic: Some(graphic) }
        })
        .collect();
    let mut overlays: Vec<Vec<Overlay>> = vec![Vec::new(); cells];
    let mut portals = Vec::new();

    for (z_order, layer) in map.layers.iter().enumerate() {
        match layer {
            Layer::Tiles(tiles) if tiles.name == def.base_layer => {
                if let Some(solid) = property(&tiles.properties, "solid").and_then(Value::as_bool) {
                    bases.iter_mut().for_each(|base| base.solid = solid);
                }
            }
            Layer::Tiles(tiles) if tiles.visible => {
                let (kind, rule_solid) = layer_rule(&tiles.name);
                let solid = property(&tiles.properties, "solid")
                    .and_then(Value::as_bool)
                    .unwrap_or(rule_solid);
                for (idx, &gid) in tiles.data.iter().take(cells).enumerate() {
                    if let Some(graphic) = resolver.resolve(gid) {
                        overlays[idx].push(Overlay {
                            layer: tiles.name.clone(),
                            graphic,
                            kind,
                            solid,
                            z_order,
                        });
                    }
                }
            }
            Layer::Objects(group) => {
                portals.extend(group.objects.iter().filter_map(portal_from_object));
            }
            Layer::Tiles(_) | Layer::Other => {}
        }
    }

    let tiles: Vec<Tile> = bases
        .into_iter()
        .zip(overlays)
        .enumerate()
        .map(|(idx, (base, stack))| {
            let pos = TilePos { y: (idx / map.width) as i32, x: (idx % map.width) as i32 };
            Tile::layered(pos, def.tile_size, base, stack)
        })
        .collect();

    debug!(world = %def.id, asset, width = map.width, height = map.height, portals = portals.len(), "imported map");
    Ok(World::assemble(
        def.clone(),
        TileStore::from_rows(map.width, map.height, def.tile_size, tiles),
        PortalRegistry::new(portals),
        WorldSource::Imported { asset: asset.to_owned() },
    ))
}

fn portal_from_object(object: &MapObject) -> Option<Portal> {
    let target = property(&object.properties, "teleportTo")?.as_str()?;
    let name = property(&object.properties, "name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .or_else(|| (!object.name.is_empty()).then_some(object.name.as_str()))
        .unwrap_or("Portal");
    let (width, height) = if object.width > 0.0 && object.height > 0.0 {
        (object.width, object.height)
    } else {
        (DEFAULT_PORTAL_SIZE, DEFAULT_PORTAL_SIZE)
    };
    Some(Portal {
        rect: Rect::new(object.x, object.y, width, height),
        name: name.to_owned(),
        teleport_to: WorldId::new(target).canonical(),
    })
}
