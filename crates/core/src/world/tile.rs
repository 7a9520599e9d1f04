//! Tile and overlay values. A tile is built once from its base layer and the ordered overlays
//! stacked on it; effective type and solidity are derived at construction.

use serde::{Deserialize, Serialize};

use crate::types::{TilePos, Vec2};

/// Local tile index used for walkable ground when a base cell is empty.
pub const DEFAULT_GROUND_TILE_ID: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    Grass,
    Tree,
    Rock,
    Water,
    Wall,
    Path,
    CaveFloor,
    Cave,
    Decoration,
}

impl TileType {
    pub fn is_solid_by_default(self) -> bool {
        matches!(self, Self::Tree | Self::Rock | Self::Water | Self::Wall | Self::Cave)
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Grass => '.',
            Self::Tree => 'T',
            Self::Rock => '^',
            Self::Water => '~',
            Self::Wall => '#',
            Self::Path => '=',
            Self::CaveFloor => ',',
            Self::Cave => 'C',
            Self::Decoration => '*',
        }
    }
}

/// Tileset reference for rendering: which sheet and which cell in it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGraphic {
    pub tileset: String,
    pub tile_id: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    pub layer: String,
    pub graphic: TileGraphic,
    pub kind: TileType,
    pub solid: bool,
    pub z_order: usize,
}

/// The base layer contribution for a cell before overlays are applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseTile {
    pub kind: TileType,
    pub solid: bool,
    pub graphic: Option<TileGraphic>,
}

impl BaseTile {
    pub fn of(kind: TileType) -> Self {
        Self { kind, solid: kind.is_solid_by_default(), graphic: None }
    }

    pub fn with_graphic(mut self, tileset: &str, tile_id: u32) -> Self {
        self.graphic = Some(TileGraphic { tileset: tileset.to_owned(), tile_id });
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub pos: TilePos,
    pub origin: Vec2,
    pub kind: TileType,
    pub solid: bool,
    pub base_kind: TileType,
    pub base_solid: bool,
    /// Primary graphic; a solid overlay takes over from the base layer.
    pub graphic: Option<TileGraphic>,
    pub overlays: Vec<Overlay>,
}

impl Tile {
    pub fn plain(pos: TilePos, tile_size: u32, base: BaseTile) -> Self {
        Self::layered(pos, tile_size, base, Vec::new())
    }

    /// Builds a tile from its base and overlays. Overlays are sorted into authoring order; a
    /// path overlay makes the tile walkable no matter what else is stacked on it.
    pub fn layered(pos: TilePos, tile_size: u32, base: BaseTile, mut overlays: Vec<Overlay>) -> Self {
        overlays.sort_by_key(|overlay| overlay.z_order);

        let has_path = overlays.iter().any(|overlay| overlay.kind == TileType::Path);
        let last_solid = overlays.iter().rev().find(|overlay| overlay.solid);

        let (kind, solid, graphic) = if has_path {
            (TileType::Path, false, base.graphic)
        } else if let Some(overlay) = last_solid {
            (overlay.kind, true, Some(overlay.graphic.clone()))
        } else {
            (base.kind, base.solid, base.graphic)
        };

        let size = tile_size as f32;
        Self {
            pos,
            origin: Vec2::new(pos.x as f32 * size, pos.y as f32 * size),
            kind,
            solid,
            base_kind: base.kind,
            base_solid: base.solid,
            graphic,
            overlays,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay(kind: TileType, solid: bool, z_order: usize) -> Overlay {
        Overlay {
            layer: format!("{kind:?}"),
            graphic: TileGraphic { tileset: "forest".to_owned(), tile_id: z_order as u32 },
            kind,
            solid,
            z_order,
        }
    }

    #[test]
    fn path_overlay_overrides_solid_base_and_solid_overlays() {
        let tile = Tile::layered(
            TilePos { y: 1, x: 1 },
            32,
            BaseTile::of(TileType::Wall),
            vec![overlay(TileType::Rock, true, 1), overlay(TileType::Path, false, 2)],
        );
        assert!(!tile.solid);
        assert_eq!(tile.kind, TileType::Path);
        assert!(tile.base_solid);
    }

    #[test]
    fn path_overlay_below_a_solid_overlay_still_wins() {
        let tile = Tile::layered(
            TilePos { y: 0, x: 0 },
            32,
            BaseTile::of(TileType::Grass),
            vec![overlay(TileType::Water, true, 5), overlay(TileType::Path, false, 1)],
        );
        assert!(!tile.solid);
    }

    #[test]
    fn solid_overlay_sets_type_and_graphic() {
        let tile = Tile::layered(
            TilePos { y: 2, x: 3 },
            32,
            BaseTile::of(TileType::Grass).with_graphic("forest", DEFAULT_GROUND_TILE_ID),
            vec![overlay(TileType::Rock, true, 1), overlay(TileType::Decoration, false, 2)],
        );
        assert!(tile.solid);
        assert_eq!(tile.kind, TileType::Rock);
        assert_eq!(tile.graphic.as_ref().map(|g| g.tile_id), Some(1));
        assert_eq!(tile.origin, Vec2::new(96.0, 64.0));
    }

    #[test]
    fn overlays_are_kept_in_authoring_order() {
        let tile = Tile::layered(
            TilePos { y: 0, x: 0 },
            32,
            BaseTile::of(TileType::Grass),
            vec![overlay(TileType::Decoration, false, 3), overlay(TileType::Decoration, false, 1)],
        );
        let orders: Vec<usize> = tile.overlays.iter().map(|o| o.z_order).collect();
        assert_eq!(orders, vec![1, 3]);
    }
}
