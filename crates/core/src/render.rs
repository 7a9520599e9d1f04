//! Read-only frame views and drawing hints for renderer backends.
//! This module exists so hosts can draw a tick without touching simulation state.
//! It does not own any drawing primitives; those belong to the host crate.

use slotmap::SlotMap;

use crate::game::TransitionState;
use crate::state::{AiMode, Camera, Dialogue, Enemy, Inventory, Item, Npc, Player, Projectile};
use crate::types::{EnemyId, ItemId, NpcId, ProjectileId, Rect};
use crate::world::{Tile, World};

/// Everything a renderer may read for one frame.
pub struct FrameView<'a> {
    pub world: &'a World,
    pub camera: &'a Camera,
    pub player: &'a Player,
    pub enemies: &'a SlotMap<EnemyId, Enemy>,
    pub projectiles: &'a SlotMap<ProjectileId, Projectile>,
    pub items: &'a SlotMap<ItemId, Item>,
    pub npcs: &'a SlotMap<NpcId, Npc>,
    pub inventory: &'a Inventory,
    pub dialogue: Option<&'a Dialogue>,
    pub transition: TransitionState,
    pub tick: u64,
}

impl<'a> FrameView<'a> {
    /// Tiles overlapping the camera, row by row.
    pub fn visible_tiles(&self) -> impl Iterator<Item = &'a Tile> + use<'a> {
        self.world.tiles_in_view(self.camera.view())
    }

    pub fn is_visible(&self, rect: Rect) -> bool {
        self.camera.view().intersects(rect)
    }
}

pub trait Renderer {
    fn draw_frame(&mut self, frame: &FrameView<'_>);
}

/// Counts frames and draws nothing; used by headless hosts.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames: u64,
}

impl Renderer for NullRenderer {
    fn draw_frame(&mut self, _frame: &FrameView<'_>) {
        self.frames += 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyTint {
    Flash,
    Chase,
    Patrol,
    Dying,
}

/// How an enemy should look this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyLook {
    pub alpha: f32,
    /// Size multiplier applied around the enemy's center.
    pub scale: f32,
    pub tint: EnemyTint,
    pub show_health_bar: bool,
}

pub fn enemy_look(enemy: &Enemy) -> EnemyLook {
    let t = enemy.death_progress();
    let tint = if enemy.dying {
        EnemyTint::Dying
    } else if enemy.is_flashing() {
        EnemyTint::Flash
    } else if enemy.ai.mode == AiMode::Chase {
        EnemyTint::Chase
    } else {
        EnemyTint::Patrol
    };
    EnemyLook { alpha: 1.0 - t, scale: 1.0 - t / 2.0, tint, show_health_bar: !enemy.dying }
}

/// Filled part of a health bar drawn across `bar`.
pub fn health_bar_fill(bar: Rect, fraction: f32) -> Rect {
    Rect::new(bar.x, bar.y, bar.width * fraction.clamp(0.0, 1.0), bar.height)
}
