use std::mem;

use slotmap::SlotMap;
use tracing::debug;

use crate::catalog::{AssetProvider, WorldCatalog};
use crate::config::SimConfig;
use crate::error::{CatalogError, TransitionError};
use crate::random::Dice;
use crate::render::FrameView;
use crate::state::*;
use crate::types::*;
use crate::world::{ChunkOccupants, Portal, SpawnSearch, World};

mod camera;
mod combat;
mod enemy;
mod hash;
mod items;
mod movement;
mod npc;
mod player;
mod projectile;
mod spawning;
mod transition;

#[cfg(test)]
mod test_support;

pub use combat::melee_hitbox;
pub use enemy::next_ai_mode;
pub use transition::TransitionState;

/// Input sampled for one tick. `charge` is a held state; the other actions are presses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub charge: bool,
    pub interact: bool,
    pub use_health_potion: bool,
    pub use_mana_potion: bool,
}

pub struct Game {
    seed: u64,
    tick: u64,
    config: SimConfig,
    catalog: WorldCatalog,
    assets: Box<dyn AssetProvider>,
    rng: Dice,
    state: GameState,
    transition: TransitionState,
    log: Vec<GameEvent>,
}

impl Game {
    pub fn new(
        seed: u64,
        config: SimConfig,
        assets: Box<dyn AssetProvider>,
    ) -> Result<Self, CatalogError> {
        Self::with_catalog(seed, config, WorldCatalog::new(seed), assets)
    }

    /// Generates the starting world, places the player at its safe spawn, and seeds its pools.
    pub fn with_catalog(
        seed: u64,
        config: SimConfig,
        mut catalog: WorldCatalog,
        assets: Box<dyn AssetProvider>,
    ) -> Result<Self, CatalogError> {
        let mut rng = Dice::seeded(seed);
        let start = config.starting_world.canonical();
        let world = catalog.generate_world(&start, assets.as_ref())?;
        let spawn = world.find_safe_spawn_position(
            PLAYER_SIZE,
            PLAYER_SIZE,
            spawn_search(&config),
            &mut rng,
        );

        let mut game = Self {
            seed,
            tick: 0,
            state: GameState {
                active_world: start.clone(),
                player: Player::new(spawn),
                enemies: SlotMap::with_key(),
                projectiles: SlotMap::with_key(),
                items: SlotMap::with_key(),
                npcs: SlotMap::with_key(),
                camera: Camera {
                    width: config.view_width,
                    height: config.view_height,
                    ..Camera::default()
                },
                inventory: Inventory::default(),
                dialogue: None,
            },
            config,
            catalog,
            assets,
            rng,
            transition: TransitionState::Idle,
            log: Vec::new(),
        };
        game.enter_world(start, spawn);
        Ok(game)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn catalog(&self) -> &WorldCatalog {
        &self.catalog
    }

    pub fn transition_state(&self) -> TransitionState {
        self.transition
    }

    pub fn active_world_id(&self) -> &WorldId {
        &self.state.active_world
    }

    pub fn active_world(&self) -> Option<&World> {
        self.catalog.world(&self.state.active_world)
    }

    pub fn log(&self) -> &[GameEvent] {
        &self.log
    }

    pub fn drain_log(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.log)
    }

    pub fn is_paused(&self) -> bool {
        self.state.dialogue.is_some()
    }

    /// Runs one simulation tick of `dt_ms` milliseconds.
    pub fn advance(&mut self, input: &PlayerInput, dt_ms: u32) {
        self.tick += 1;
        self.transition.tick(dt_ms);

        if input.interact {
            self.interact();
        }
        self.update_npcs();
        if self.is_paused() {
            return;
        }

        if input.use_health_potion {
            self.use_item(ItemKind::HealthPotion);
        }
        if input.use_mana_potion {
            self.use_item(ItemKind::ManaPotion);
        }

        self.update_player(input, dt_ms);
        self.update_enemies(dt_ms);
        self.update_projectiles();
        self.collect_items();

        if self.transition == TransitionState::Idle
            && let Err(err) = self.try_portal_transition()
        {
            debug!(%err, "portal transition not taken");
        }

        self.follow_camera();
        self.refresh_chunks();
    }

    /// Collision query against `world`, or the active world when `None`. Worlds that are not
    /// generated block everything.
    pub fn check_collision(&self, world: Option<&WorldId>, body: Rect) -> bool {
        let id = world.unwrap_or(&self.state.active_world);
        self.catalog.world(id).is_none_or(|world| world.check_collision(body))
    }

    pub fn find_safe_spawn_position(&mut self, width: f32, height: f32) -> Vec2 {
        let search = spawn_search(&self.config);
        match self.catalog.world(&self.state.active_world) {
            Some(world) => world.find_safe_spawn_position(width, height, search, &mut self.rng),
            None => Vec2::ZERO,
        }
    }

    /// Portal in the active world overlapping `body`, if any.
    pub fn portal_at(&self, body: Rect) -> Option<&Portal> {
        self.active_world()?.portals().find_overlapping(body)
    }

    /// Moves the player without collision checks; used by hosts and tests for placement.
    pub fn set_player_position(&mut self, pos: Vec2) {
        self.state.player.pos = pos;
        self.follow_camera();
    }

    pub fn frame_view(&self) -> Option<FrameView<'_>> {
        let world = self.active_world()?;
        Some(FrameView {
            world,
            camera: &self.state.camera,
            player: &self.state.player,
            enemies: &self.state.enemies,
            projectiles: &self.state.projectiles,
            items: &self.state.items,
            npcs: &self.state.npcs,
            inventory: &self.state.inventory,
            dialogue: self.state.dialogue.as_ref(),
            transition: self.transition,
            tick: self.tick,
        })
    }

    fn refresh_chunks(&mut self) {
        let occupants = ChunkOccupants {
            enemies: self.state.enemies.iter().map(|(id, e)| (id, e.center())).collect(),
            items: self.state.items.iter().map(|(id, i)| (id, i.rect().center())).collect(),
            npcs: self.state.npcs.iter().map(|(id, n)| (id, n.rect().center())).collect(),
        };
        let view = self.state.camera.view();
        if let Some(world) = self.catalog.world_mut(&self.state.active_world) {
            world.refresh_chunks(view, &occupants);
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        self.log.push(event);
    }
}

fn spawn_search(config: &SimConfig) -> SpawnSearch {
    SpawnSearch { attempts: config.spawn_search_attempts, radius: config.spawn_search_radius_px }
}
