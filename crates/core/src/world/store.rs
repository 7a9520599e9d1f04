//! Row-major tile storage for one world. Tiles are fixed once the store is built.

use crate::types::TilePos;

use super::tile::Tile;
#[cfg(test)]
use super::tile::{BaseTile, TileType};

#[derive(Clone, Debug, PartialEq)]
pub struct TileStore {
    width: usize,
    height: usize,
    tile_size: u32,
    tiles: Vec<Tile>,
}

impl TileStore {
    /// `tiles` must hold exactly `width * height` entries in row-major order.
    pub(crate) fn from_rows(width: usize, height: usize, tile_size: u32, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self { width, height, tile_size, tiles }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn pixel_width(&self) -> f32 {
        (self.width as u32 * self.tile_size) as f32
    }

    pub fn pixel_height(&self) -> f32 {
        (self.height as u32 * self.tile_size) as f32
    }

    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn index(&self, pos: TilePos) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.y as usize * self.width + pos.x as usize)
    }

    pub fn get(&self, pos: TilePos) -> Option<&Tile> {
        self.index(pos).map(|idx| &self.tiles[idx])
    }

    pub fn tile_at_index(&self, idx: usize) -> Option<&Tile> {
        self.tiles.get(idx)
    }

    pub fn is_solid(&self, pos: TilePos) -> bool {
        self.get(pos).is_none_or(|tile| tile.solid)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width.max(1))
    }

    /// Test grid from text rows: `#` is wall, anything else grass.
    #[cfg(test)]
    pub(crate) fn from_pattern(rows: &[&str], tile_size: u32) -> Self {
        let width = rows.first().map_or(0, |row| row.len());
        let tiles = rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.chars().enumerate().map(move |(x, glyph)| {
                    let kind = if glyph == '#' { TileType::Wall } else { TileType::Grass };
                    let pos = TilePos { y: y as i32, x: x as i32 };
                    Tile::plain(pos, tile_size, BaseTile::of(kind))
                })
            })
            .collect();
        Self::from_rows(width, rows.len(), tile_size, tiles)
    }

    #[cfg(test)]
    pub(crate) fn open_field(width: usize, height: usize, tile_size: u32) -> Self {
        let row = ".".repeat(width);
        Self::from_pattern(&vec![row.as_str(); height], tile_size)
    }
}
