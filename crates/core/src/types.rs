use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
    pub struct ProjectileId;
    pub struct ItemId;
    pub struct NpcId;
}

/// Legacy world ids still found in authored maps, paired with their canonical id.
const LEGACY_WORLD_ALIASES: [(&str, &str); 1] = [("dungeon", "cave")];

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(String);

impl WorldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn overworld() -> Self {
        Self::new("overworld")
    }

    pub fn cave() -> Self {
        Self::new("cave")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Remaps a legacy alias to the id the catalog knows; other ids pass through.
    pub fn canonical(&self) -> Self {
        LEGACY_WORLD_ALIASES
            .iter()
            .find(|(alias, _)| *alias == self.0)
            .map(|(_, canonical)| Self::new(*canonical))
            .unwrap_or_else(|| self.clone())
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grid coordinate in tile units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub y: i32,
    pub x: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        Self::new(other.x - self.x, other.y - self.y).length()
    }

    /// Unit vector from `self` toward `other`, or `None` when the points coincide.
    pub fn direction_to(self, other: Self) -> Option<Self> {
        let delta = Self::new(other.x - self.x, other.y - self.y);
        let length = delta.length();
        (length > 0.0).then(|| Self::new(delta.x / length, delta.y / length))
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// Axis-aligned rectangle in world pixels, origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn at(pos: Vec2, width: f32, height: f32) -> Self {
        Self::new(pos.x, pos.y, width, height)
    }

    pub fn right(self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    pub fn center(self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap; rectangles that only share an edge do not intersect.
    pub fn intersects(self, other: Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn contains_point(self, point: Vec2) -> bool {
        point.x > self.x && point.x < self.right() && point.y > self.y && point.y < self.bottom()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub fn unit(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    HealthPotion,
    ManaPotion,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::HealthPotion => "Health Potion",
            Self::ManaPotion => "Mana Potion",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectileEnd {
    Tile,
    Enemy(EnemyId),
    Expired,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    MeleeSwing { hits: usize },
    ProjectileFired { projectile: ProjectileId, damage: i32, mana_cost: i32 },
    ProjectileEnded { projectile: ProjectileId, cause: ProjectileEnd },
    SpellFizzled { mana_cost: i32, mana: i32 },
    EnemyDamaged { enemy: EnemyId, amount: i32, hp: i32 },
    EnemyKilled { enemy: EnemyId, xp: u32 },
    EnemyRemoved { enemy: EnemyId },
    PlayerDamaged { amount: i32, hp: i32 },
    PlayerRespawned { pos: Vec2 },
    LevelUp { level: u32 },
    LootDropped { item: ItemId, kind: ItemKind },
    ItemPickedUp { kind: ItemKind },
    ItemUsed { kind: ItemKind },
    DialogueOpened { npc: NpcId },
    DialogueAdvanced { npc: NpcId, line: usize },
    DialogueClosed { npc: NpcId },
    WorldEntered { world: WorldId, enemies: usize, items: usize, npcs: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_alias_maps_to_canonical_world() {
        assert_eq!(WorldId::new("dungeon").canonical(), WorldId::cave());
        assert_eq!(WorldId::overworld().canonical(), WorldId::overworld());
        assert_eq!(WorldId::new("somewhere").canonical(), WorldId::new("somewhere"));
    }

    #[test]
    fn rect_edges_touching_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(a.intersects(Rect::new(9.5, 9.5, 5.0, 5.0)));
    }

    #[test]
    fn direction_to_self_is_none() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(p.direction_to(p), None);
        let dir = Vec2::ZERO.direction_to(p).expect("distinct points");
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }
}
