//! Shared helpers for the `worldgen` and `soak` binaries.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand_chacha::{ChaCha8Rng, rand_core::Rng};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wayfarer_core::catalog::default_definitions;
use wayfarer_core::world::{World, WorldSource};
use wayfarer_core::{GameEvent, PlayerInput, SimConfig, WorldCatalog, WorldDef, WorldId};

/// Tool settings: a `[sim]` table and optional `[worlds.<id>]` tables.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub sim: SimConfig,
    /// Keys set here override the built-in definition of the same id; unknown ids add a world.
    pub worlds: BTreeMap<String, toml::Table>,
}

impl ToolConfig {
    pub fn definitions(&self) -> Result<Vec<WorldDef>> {
        let mut definitions: BTreeMap<WorldId, WorldDef> =
            default_definitions().into_iter().map(|def| (def.id.clone(), def)).collect();
        for (raw_id, overrides) in &self.worlds {
            let id = WorldId::new(raw_id.as_str()).canonical();
            let base = definitions.remove(&id);
            let def = merge_definition(&id, base, overrides)
                .with_context(|| format!("Invalid [worlds.{raw_id}] table"))?;
            definitions.insert(id, def);
        }
        Ok(definitions.into_values().collect())
    }

    pub fn catalog(&self, run_seed: u64) -> Result<WorldCatalog> {
        Ok(WorldCatalog::with_definitions(run_seed, self.definitions()?))
    }
}

fn merge_definition(
    id: &WorldId,
    base: Option<WorldDef>,
    overrides: &toml::Table,
) -> Result<WorldDef> {
    let base = base.unwrap_or_else(|| WorldDef { id: id.clone(), ..WorldDef::default() });
    let mut merged = serde_json::to_value(&base)?;
    if let (Value::Object(fields), Value::Object(patch)) =
        (&mut merged, serde_json::to_value(overrides)?)
    {
        fields.extend(patch);
    }
    let mut def: WorldDef = serde_json::from_value(merged)?;
    def.id = id.clone();
    Ok(def)
}

/// Reads a TOML `ToolConfig`; missing keys keep their defaults. `None` gives the defaults.
pub fn load_config(path: Option<&Path>) -> Result<ToolConfig> {
    let Some(path) = path else {
        return Ok(ToolConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
}

#[derive(Debug, Serialize)]
pub struct PortalSummary {
    pub name: String,
    pub target: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct WorldSummary {
    pub id: String,
    pub name: String,
    pub source: String,
    pub width: usize,
    pub height: usize,
    pub tile_size: u32,
    pub chunks: usize,
    pub solid_tiles: usize,
    pub portals: Vec<PortalSummary>,
    pub fingerprint: String,
}

impl WorldSummary {
    pub fn of(world: &World) -> Self {
        let source = match world.source() {
            WorldSource::Imported { asset } => format!("imported:{asset}"),
            WorldSource::Procedural { seed } => format!("procedural:{seed}"),
        };
        Self {
            id: world.id().to_string(),
            name: world.def().name.clone(),
            source,
            width: world.width(),
            height: world.height(),
            tile_size: world.tile_size(),
            chunks: world.chunks().len(),
            solid_tiles: world.store().tiles().iter().filter(|tile| tile.solid).count(),
            portals: world
                .portals()
                .iter()
                .map(|portal| PortalSummary {
                    name: portal.name.clone(),
                    target: portal.teleport_to.to_string(),
                    x: portal.rect.x,
                    y: portal.rect.y,
                    width: portal.rect.width,
                    height: portal.rect.height,
                })
                .collect(),
            fingerprint: format!("0x{:016x}", world.fingerprint()),
        }
    }
}

/// Random held directions and charge, with rarer presses.
pub fn random_input(rng: &mut ChaCha8Rng) -> PlayerInput {
    let bits = rng.next_u64();
    PlayerInput {
        up: bits & 1 != 0,
        down: bits & 2 != 0,
        left: bits & 4 != 0,
        right: bits & 8 != 0,
        charge: bits & 0x30 != 0,
        interact: bits & 0x3C0 == 0x3C0,
        use_health_potion: bits & 0xC00 == 0xC00,
        use_mana_potion: bits & 0x3000 == 0x3000,
    }
}

pub fn event_name(event: &GameEvent) -> &'static str {
    match event {
        GameEvent::MeleeSwing { .. } => "melee_swing",
        GameEvent::ProjectileFired { .. } => "projectile_fired",
        GameEvent::ProjectileEnded { .. } => "projectile_ended",
        GameEvent::SpellFizzled { .. } => "spell_fizzled",
        GameEvent::EnemyDamaged { .. } => "enemy_damaged",
        GameEvent::EnemyKilled { .. } => "enemy_killed",
        GameEvent::EnemyRemoved { .. } => "enemy_removed",
        GameEvent::PlayerDamaged { .. } => "player_damaged",
        GameEvent::PlayerRespawned { .. } => "player_respawned",
        GameEvent::LevelUp { .. } => "level_up",
        GameEvent::LootDropped { .. } => "loot_dropped",
        GameEvent::ItemPickedUp { .. } => "item_picked_up",
        GameEvent::ItemUsed { .. } => "item_used",
        GameEvent::DialogueOpened { .. } => "dialogue_opened",
        GameEvent::DialogueAdvanced { .. } => "dialogue_advanced",
        GameEvent::DialogueClosed { .. } => "dialogue_closed",
        GameEvent::WorldEntered { .. } => "world_entered",
    }
}
