//! Generated worlds: tiles, chunks, and portals for one world id.

pub mod chunk;
pub mod collision;
pub mod definition;
pub mod portal;
pub mod store;
pub mod tile;

use std::hash::Hasher;

use tracing::debug;
use xxhash_rust::xxh3::Xxh3;

use crate::random::Dice;
use crate::types::{EnemyId, ItemId, NpcId, Rect, TilePos, Vec2, WorldId};

pub use chunk::{CHUNK_SIZE, Chunk, ChunkBuckets, ChunkId};
pub use definition::{ArrivalAnchor, ExitPortalDef, NpcDef, Theme, WorldDef};
pub use portal::{Portal, PortalRegistry};
pub use store::TileStore;
pub use tile::{BaseTile, DEFAULT_GROUND_TILE_ID, Overlay, Tile, TileGraphic, TileType};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldSource {
    Imported { asset: String },
    Procedural { seed: u64 },
}

/// Bounded random search around an anchor for a clear placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnSearch {
    pub attempts: u32,
    pub radius: f32,
}

/// Pool positions used to rebuild chunk buckets.
#[derive(Clone, Debug, Default)]
pub struct ChunkOccupants {
    pub enemies: Vec<(EnemyId, Vec2)>,
    pub items: Vec<(ItemId, Vec2)>,
    pub npcs: Vec<(NpcId, Vec2)>,
}

#[derive(Clone, Debug)]
pub struct World {
    def: WorldDef,
    store: TileStore,
    chunks: Vec<Chunk>,
    portals: PortalRegistry,
    source: WorldSource,
}

impl World {
    pub(crate) fn assemble(
        def: WorldDef,
        store: TileStore,
        portals: PortalRegistry,
        source: WorldSource,
    ) -> Self {
        let chunks = chunk::partition(&store);
        Self { def, store, chunks, portals, source }
    }

    pub fn id(&self) -> &WorldId {
        &self.def.id
    }

    pub fn def(&self) -> &WorldDef {
        &self.def
    }

    pub fn store(&self) -> &TileStore {
        &self.store
    }

    pub fn width(&self) -> usize {
        self.store.width()
    }

    pub fn height(&self) -> usize {
        self.store.height()
    }

    pub fn tile_size(&self) -> u32 {
        self.store.tile_size()
    }

    pub fn tile(&self, pos: TilePos) -> Option<&Tile> {
        self.store.get(pos)
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn chunk(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.iter().find(|chunk| chunk.id == id)
    }

    pub fn portals(&self) -> &PortalRegistry {
        &self.portals
    }

    pub fn source(&self) -> &WorldSource {
        &self.source
    }

    pub fn pixel_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.store.pixel_width(), self.store.pixel_height())
    }

    pub fn spawn_pixel(&self) -> Vec2 {
        let ts = self.tile_size() as f32;
        Vec2::new(self.def.spawn.x as f32 * ts, self.def.spawn.y as f32 * ts)
    }

    /// Pixel position of the given arrival anchor.
    pub fn anchor_pixel(&self, anchor: ArrivalAnchor) -> Vec2 {
        match anchor {
            ArrivalAnchor::SpawnPoint => self.spawn_pixel(),
            ArrivalAnchor::NearFarCorner { inset } => {
                let ts = self.tile_size() as f32;
                Vec2::new(
                    (self.width() as i32 - inset) as f32 * ts,
                    (self.height() as i32 - inset) as f32 * ts,
                )
            }
        }
    }

    pub fn check_collision(&self, body: Rect) -> bool {
        collision::check_collision(&self.store, body)
    }

    /// The spawn point if a `width x height` body fits there, else the first clear random offset
    /// around it, else the spawn point regardless.
    pub fn find_safe_spawn_position(
        &self,
        width: f32,
        height: f32,
        search: SpawnSearch,
        dice: &mut Dice,
    ) -> Vec2 {
        self.find_safe_position_near(self.spawn_pixel(), width, height, search, dice)
    }

    pub fn find_safe_position_near(
        &self,
        anchor: Vec2,
        width: f32,
        height: f32,
        search: SpawnSearch,
        dice: &mut Dice,
    ) -> Vec2 {
        if !self.check_collision(Rect::at(anchor, width, height)) {
            return anchor;
        }
        for _ in 0..search.attempts {
            let candidate =
                Vec2::new(anchor.x + dice.offset(search.radius), anchor.y + dice.offset(search.radius));
            if !self.check_collision(Rect::at(candidate, width, height)) {
                return candidate;
            }
        }
        debug!(world = %self.id(), x = anchor.x, y = anchor.y, "no clear spot near anchor, using it anyway");
        anchor
    }

    /// Tiles overlapping `view`, in row order.
    pub fn tiles_in_view(&self, view: Rect) -> impl Iterator<Item = &Tile> {
        let (start, end) = collision::covered_tiles(self.tile_size(), view);
        let x0 = start.x.max(0);
        let y0 = start.y.max(0);
        let x1 = end.x.min(self.width() as i32 - 1);
        let y1 = end.y.min(self.height() as i32 - 1);
        (y0..=y1)
            .flat_map(move |y| (x0..=x1).filter_map(move |x| self.store.get(TilePos { y, x })))
    }

    /// Flags chunks overlapping `view` as active and rebuilds every chunk's buckets.
    pub(crate) fn refresh_chunks(&mut self, view: Rect, occupants: &ChunkOccupants) {
        let tile_size = self.tile_size();
        for chunk in &mut self.chunks {
            chunk.active = chunk.pixel_bounds(tile_size).intersects(view);
            chunk.buckets.clear();
        }

        for &(id, pos) in &occupants.enemies {
            if let Some(chunk) = self.chunk_at_mut(pos) {
                chunk.buckets.enemies.push(id);
            }
        }
        for &(id, pos) in &occupants.items {
            if let Some(chunk) = self.chunk_at_mut(pos) {
                chunk.buckets.items.push(id);
            }
        }
        for &(id, pos) in &occupants.npcs {
            if let Some(chunk) = self.chunk_at_mut(pos) {
                chunk.buckets.npcs.push(id);
            }
        }
    }

    fn chunk_at_mut(&mut self, point: Vec2) -> Option<&mut Chunk> {
        let id = chunk::chunk_id_at(&self.store, point)?;
        self.chunks.iter_mut().find(|chunk| chunk.id == id)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.store.tiles().len() * 3 + 64);
        bytes.extend_from_slice(self.id().as_str().as_bytes());
        bytes.push(0);
        bytes.extend_from_slice(&(self.width() as u32).to_le_bytes());
        bytes.extend_from_slice(&(self.height() as u32).to_le_bytes());
        bytes.extend_from_slice(&self.tile_size().to_le_bytes());
        for tile in self.store.tiles() {
            bytes.push(tile.kind as u8);
            bytes.push(u8::from(tile.solid));
            bytes.push(tile.overlays.len() as u8);
        }
        for portal in self.portals.iter() {
            for value in [portal.rect.x, portal.rect.y, portal.rect.width, portal.rect.height] {
                bytes.extend_from_slice(&value.to_le_bytes());
            }
            bytes.extend_from_slice(portal.teleport_to.as_str().as_bytes());
            bytes.push(0);
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write(&self.canonical_bytes());
        hasher.finish()
    }

    /// One character per tile, one line per row.
    pub fn ascii(&self) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for row in self.store.rows() {
            out.extend(row.iter().map(|tile| tile.kind.glyph()));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn world_from(store: TileStore) -> World {
        let def = WorldDef {
            width: store.width(),
            height: store.height(),
            tile_size: store.tile_size(),
            spawn: TilePos { y: 1, x: 1 },
            ..WorldDef::default()
        };
        World::assemble(def, store, PortalRegistry::new(Vec::new()), WorldSource::Procedural {
            seed: 0,
        })
    }

    fn active_ids(world: &World) -> Vec<String> {
        let active = world.chunks().iter().filter(|chunk| chunk.active);
        active.map(|chunk| chunk.id.to_string()).collect()
    }

    #[test]
    fn refresh_flags_chunks_in_view_and_rebuilds_buckets() {
        let mut world = world_from(TileStore::open_field(40, 40, 32));
        let mut enemies: SlotMap<EnemyId, ()> = SlotMap::with_key();
        let near = enemies.insert(());
        let far = enemies.insert(());

        let occupants = ChunkOccupants {
            enemies: vec![(near, Vec2::new(40.0, 40.0)), (far, Vec2::new(1100.0, 600.0))],
            ..ChunkOccupants::default()
        };
        world.refresh_chunks(Rect::new(0.0, 0.0, 800.0, 600.0), &occupants);
        assert_eq!(active_ids(&world), ["0_0", "1_0", "0_1", "1_1"]);
        let origin = world.chunk(ChunkId { cx: 0, cy: 0 }).expect("chunk");
        assert_eq!(origin.buckets.enemies, [near]);
        let far_chunk = world.chunk(ChunkId { cx: 2, cy: 1 }).expect("chunk");
        assert!(!far_chunk.active);
        assert_eq!(far_chunk.buckets.enemies, [far]);

        let moved = ChunkOccupants {
            enemies: vec![(near, Vec2::new(1200.0, 1200.0))],
            ..ChunkOccupants::default()
        };
        world.refresh_chunks(Rect::new(640.0, 640.0, 800.0, 600.0), &moved);
        assert_eq!(active_ids(&world), ["1_1", "2_1", "1_2", "2_2"]);
        assert!(world.chunk(ChunkId { cx: 0, cy: 0 }).expect("chunk").buckets.enemies.is_empty());
        assert!(world.chunk(ChunkId { cx: 2, cy: 1 }).expect("chunk").buckets.enemies.is_empty());
        assert_eq!(world.chunk(ChunkId { cx: 2, cy: 2 }).expect("chunk").buckets.enemies, [near]);
    }

    #[test]
    fn clear_anchor_is_returned_unchanged() {
        let world = world_from(TileStore::open_field(10, 10, 32));
        let search = SpawnSearch { attempts: 20, radius: 80.0 };
        let anchor = Vec2::new(100.0, 120.0);
        let mut dice = Dice::seeded(1);
        let placed = world.find_safe_position_near(anchor, 24.0, 24.0, search, &mut dice);
        assert_eq!(placed, anchor);
    }

    #[test]
    fn blocked_anchor_moves_to_a_clear_spot_within_the_radius() {
        let world = world_from(TileStore::from_pattern(
            &["......", "......", "..#...", "......", "......", "......"],
            32,
        ));
        let search = SpawnSearch { attempts: 20, radius: 80.0 };
        let anchor = Vec2::new(64.0, 64.0);
        let mut dice = Dice::seeded(4);
        let placed = world.find_safe_position_near(anchor, 24.0, 24.0, search, &mut dice);
        assert!(!world.check_collision(Rect::at(placed, 24.0, 24.0)));
        assert!((placed.x - anchor.x).abs() <= 80.0 && (placed.y - anchor.y).abs() <= 80.0);
    }

    #[test]
    fn anchor_is_kept_when_every_retry_collides() {
        let world = world_from(TileStore::from_pattern(&["####", "####", "####", "####"], 32));
        let search = SpawnSearch { attempts: 20, radius: 80.0 };
        let anchor = Vec2::new(40.0, 40.0);
        let mut dice = Dice::seeded(9);
        let placed = world.find_safe_position_near(anchor, 24.0, 24.0, search, &mut dice);
        assert_eq!(placed, anchor);
    }

    #[test]
    fn tiles_in_view_are_clipped_to_the_grid_in_row_order() {
        let world = world_from(TileStore::open_field(5, 4, 32));
        let view = Rect::new(-50.0, 40.0, 120.0, 200.0);
        let seen: Vec<TilePos> = world.tiles_in_view(view).map(|tile| tile.pos).collect();
        assert_eq!(seen.first(), Some(&TilePos { y: 1, x: 0 }));
        assert_eq!(seen.last(), Some(&TilePos { y: 3, x: 2 }));
        assert_eq!(seen.len(), 9);
    }
}
