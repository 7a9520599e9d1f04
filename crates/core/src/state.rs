use std::collections::{BTreeMap, VecDeque};

use slotmap::SlotMap;

use crate::types::*;

pub const PLAYER_SIZE: f32 = 24.0;
pub const ENEMY_SIZE: f32 = 20.0;
pub const ITEM_SIZE: f32 = 16.0;
pub const TRAIL_LEN: usize = 5;
pub const PROJECTILE_LIFE: u32 = 120;

/// Decaying forced velocity applied after a hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Knockback {
    pub active: bool,
    pub velocity: Vec2,
    pub elapsed_ms: u32,
    pub duration_ms: u32,
    pub friction: f32,
}

impl Knockback {
    pub fn idle(duration_ms: u32, friction: f32) -> Self {
        Self { active: false, velocity: Vec2::ZERO, elapsed_ms: 0, duration_ms, friction }
    }

    pub fn launch(&mut self, velocity: Vec2) {
        self.active = true;
        self.velocity = velocity;
        self.elapsed_ms = 0;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.velocity = Vec2::ZERO;
        self.elapsed_ms = 0;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub attack_damage: i32,
    pub attack_range: f32,
    pub attack_cooldown_ms: u32,
    pub attack_interval_ms: u32,
    pub attacking: bool,
    pub attack_elapsed_ms: u32,
    pub attack_duration_ms: u32,
    pub facing: Facing,
    pub invulnerable_ms: u32,
    pub invulnerability_ms: u32,
    pub flash_ms: u32,
    pub flash_duration_ms: u32,
    pub knockback: Knockback,
    pub charging: bool,
    pub charge: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            speed: 2.5,
            hp: 100,
            max_hp: 100,
            mana: 100,
            max_mana: 100,
            level: 1,
            xp: 0,
            xp_to_next: 100,
            attack_damage: 25,
            attack_range: 40.0,
            attack_cooldown_ms: 0,
            attack_interval_ms: 500,
            attacking: false,
            attack_elapsed_ms: 0,
            attack_duration_ms: 200,
            facing: Facing::Down,
            invulnerable_ms: 0,
            invulnerability_ms: 1000,
            flash_ms: 0,
            flash_duration_ms: 100,
            knockback: Knockback::idle(200, 0.88),
            charging: false,
            charge: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ms > 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AiMode {
    #[default]
    Patrol,
    Chase,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyAi {
    pub mode: AiMode,
    pub alert_range: f32,
    /// Patrol heading in radians.
    pub heading: f32,
    pub patrol_timer_ms: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub damage: i32,
    pub attack_range: f32,
    pub attack_cooldown_ms: u32,
    pub attack_interval_ms: u32,
    pub flash_ms: u32,
    pub flash_duration_ms: u32,
    pub knockback: Knockback,
    pub dying: bool,
    pub death_elapsed_ms: u32,
    pub death_duration_ms: u32,
    pub ai: EnemyAi,
}

impl Enemy {
    pub fn new(pos: Vec2, heading: f32) -> Self {
        Self {
            pos,
            width: ENEMY_SIZE,
            height: ENEMY_SIZE,
            speed: 1.5,
            hp: 50,
            max_hp: 50,
            damage: 15,
            attack_range: 30.0,
            attack_cooldown_ms: 0,
            attack_interval_ms: 1000,
            flash_ms: 0,
            flash_duration_ms: 150,
            knockback: Knockback::idle(300, 0.85),
            dying: false,
            death_elapsed_ms: 0,
            death_duration_ms: 500,
            ai: EnemyAi { mode: AiMode::Patrol, alert_range: 80.0, heading, patrol_timer_ms: 0 },
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_ms > 0
    }

    /// Death animation progress in `[0, 1]`; zero while alive.
    pub fn death_progress(&self) -> f32 {
        if !self.dying || self.death_duration_ms == 0 {
            return 0.0;
        }
        (self.death_elapsed_ms as f32 / self.death_duration_ms as f32).min(1.0)
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp.max(0) as f32 / self.max_hp as f32).min(1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChargeTier {
    Low,
    Mid,
    High,
}

impl ChargeTier {
    /// Tier for a charge percentage; below 33% is the low tier.
    pub fn for_percent(percent: f32) -> Self {
        if percent >= 67.0 {
            Self::High
        } else if percent >= 33.0 {
            Self::Mid
        } else {
            Self::Low
        }
    }

    pub fn size(self) -> f32 {
        match self {
            Self::Low => 6.0,
            Self::Mid => 10.0,
            Self::High => 14.0,
        }
    }

    pub fn damage(self) -> i32 {
        match self {
            Self::Low => 15,
            Self::Mid => 30,
            Self::High => 50,
        }
    }

    pub fn speed(self) -> f32 {
        match self {
            Self::Low => 6.0,
            Self::Mid => 5.0,
            Self::High => 4.0,
        }
    }

    pub fn mana_cost(self) -> i32 {
        match self {
            Self::Low => 0,
            Self::Mid => 15,
            Self::High => 30,
        }
    }

    /// RGB color used to draw the projectile.
    pub fn color(self) -> u32 {
        match self {
            Self::Low => 0x87_ce_eb,
            Self::Mid => 0x41_69_e1,
            Self::High => 0xff_d7_00,
        }
    }
}

/// A projectile's `pos` is its center.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub tier: ChargeTier,
    pub size: f32,
    pub damage: i32,
    pub life: u32,
    pub trail: VecDeque<Vec2>,
}

impl Projectile {
    pub fn new(pos: Vec2, facing: Facing, tier: ChargeTier) -> Self {
        Self {
            pos,
            velocity: facing.unit().scaled(tier.speed()),
            tier,
            size: tier.size(),
            damage: tier.damage(),
            life: PROJECTILE_LIFE,
            trail: VecDeque::with_capacity(TRAIL_LEN),
        }
    }

    pub fn rect(&self) -> Rect {
        let half = self.size / 2.0;
        Rect::new(self.pos.x - half, self.pos.y - half, self.size, self.size)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Item {
    pub fn new(kind: ItemKind, pos: Vec2) -> Self {
        Self { kind, pos, width: ITEM_SIZE, height: ITEM_SIZE }
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Npc {
    pub name: String,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub dialogue: Vec<String>,
    pub can_interact: bool,
    pub talking: bool,
    pub line: usize,
}

impl Npc {
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub fn view(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x - self.x, point.y - self.y)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: BTreeMap<ItemKind, u32>,
}

impl Inventory {
    pub fn add(&mut self, kind: ItemKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    pub fn count(&self, kind: ItemKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Removes one of `kind`; false when none are held.
    pub fn take(&mut self, kind: ItemKind) -> bool {
        match self.counts.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemKind, u32)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }
}

/// Open dialogue line shown by the HUD.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialogue {
    pub npc: NpcId,
    pub speaker: String,
    pub text: String,
}

pub struct GameState {
    pub active_world: WorldId,
    pub player: Player,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub projectiles: SlotMap<ProjectileId, Projectile>,
    pub items: SlotMap<ItemId, Item>,
    pub npcs: SlotMap<NpcId, Npc>,
    pub camera: Camera,
    pub inventory: Inventory,
    pub dialogue: Option<Dialogue>,
}
