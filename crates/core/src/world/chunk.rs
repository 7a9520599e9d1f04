//! Spatial partition of a tile store into fixed-size chunks with per-chunk entity buckets.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{EnemyId, ItemId, NpcId, Rect, TilePos, Vec2};

use super::store::TileStore;

pub const CHUNK_SIZE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkId {
    pub cx: usize,
    pub cy: usize,
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.cx, self.cy)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkBuckets {
    pub enemies: Vec<EnemyId>,
    pub items: Vec<ItemId>,
    pub npcs: Vec<NpcId>,
}

impl ChunkBuckets {
    pub fn clear(&mut self) {
        self.enemies.clear();
        self.items.clear();
        self.npcs.clear();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    pub id: ChunkId,
    /// Top-left tile covered by this chunk.
    pub origin: TilePos,
    pub width: usize,
    pub height: usize,
    /// Indices into the owning world's tile store.
    pub tile_indices: Vec<usize>,
    pub active: bool,
    pub buckets: ChunkBuckets,
}

impl Chunk {
    pub fn pixel_bounds(&self, tile_size: u32) -> Rect {
        let ts = tile_size as f32;
        Rect::new(
            self.origin.x as f32 * ts,
            self.origin.y as f32 * ts,
            self.width as f32 * ts,
            self.height as f32 * ts,
        )
    }
}

/// Splits a store into `CHUNK_SIZE`-aligned chunks, clipping the last row and column.
pub fn partition(store: &TileStore) -> Vec<Chunk> {
    let chunks_x = store.width().div_ceil(CHUNK_SIZE);
    let chunks_y = store.height().div_ceil(CHUNK_SIZE);
    let mut chunks = Vec::with_capacity(chunks_x * chunks_y);

    for cy in 0..chunks_y {
        for cx in 0..chunks_x {
            let x0 = cx * CHUNK_SIZE;
            let y0 = cy * CHUNK_SIZE;
            let width = CHUNK_SIZE.min(store.width() - x0);
            let height = CHUNK_SIZE.min(store.height() - y0);

            let mut tile_indices = Vec::with_capacity(width * height);
            for y in y0..y0 + height {
                for x in x0..x0 + width {
                    tile_indices.push(y * store.width() + x);
                }
            }

            chunks.push(Chunk {
                id: ChunkId { cx, cy },
                origin: TilePos { y: y0 as i32, x: x0 as i32 },
                width,
                height,
                tile_indices,
                active: false,
                buckets: ChunkBuckets::default(),
            });
        }
    }
    chunks
}

/// Chunk containing a pixel position, if it lies inside the world.
pub fn chunk_id_at(store: &TileStore, point: Vec2) -> Option<ChunkId> {
    if point.x < 0.0 || point.y < 0.0 {
        return None;
    }
    let ts = store.tile_size() as f32;
    let tx = (point.x / ts) as usize;
    let ty = (point.y / ts) as usize;
    (tx < store.width() && ty < store.height())
        .then_some(ChunkId { cx: tx / CHUNK_SIZE, cy: ty / CHUNK_SIZE })
}
