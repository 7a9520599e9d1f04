//! World transitions through portals.
//! This module exists to swap the active world and reseed its pools as one step.
//! It does not own world generation or spawn placement rules.

use tracing::{info, warn};

use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionState {
    #[default]
    Idle,
    Transitioning,
    Cooldown { remaining_ms: u32 },
}

impl TransitionState {
    pub(super) fn tick(&mut self, dt_ms: u32) {
        if let Self::Cooldown { remaining_ms } = *self {
            let remaining_ms = remaining_ms.saturating_sub(dt_ms);
            *self = if remaining_ms == 0 { Self::Idle } else { Self::Cooldown { remaining_ms } };
        }
    }
}

impl Game {
    /// Takes the first portal the player overlaps. `Ok(None)` when no portal is touched.
    pub fn try_portal_transition(&mut self) -> Result<Option<WorldId>, TransitionError> {
        let body = self.state.player.rect();
        let Some(target) = self.portal_at(body).map(|portal| portal.teleport_to.clone()) else {
            return Ok(None);
        };
        self.teleport_to(&target).map(Some)
    }

    /// Moves the player into `target`, generating it on first visit. Rejected without any
    /// mutation while another transition or the cooldown is running.
    pub fn teleport_to(&mut self, target: &WorldId) -> Result<WorldId, TransitionError> {
        match self.transition {
            TransitionState::Idle => {}
            TransitionState::Transitioning => return Err(TransitionError::InProgress),
            TransitionState::Cooldown { remaining_ms } => {
                return Err(TransitionError::CoolingDown { remaining_ms });
            }
        }

        self.transition = TransitionState::Transitioning;
        let target = target.canonical();
        let search = spawn_search(&self.config);
        let (width, height) = (self.state.player.width, self.state.player.height);

        let world = match self.catalog.generate_world(&target, self.assets.as_ref()) {
            Ok(world) => world,
            Err(err) => {
                self.transition = TransitionState::Idle;
                warn!(from = %self.state.active_world, to = %target, %err, "world transition aborted");
                return Err(err.into());
            }
        };
        let anchor = world.anchor_pixel(world.def().arrival);
        let arrival = world.find_safe_position_near(anchor, width, height, search, &mut self.rng);

        let from = self.state.active_world.clone();
        self.enter_world(target.clone(), arrival);
        self.transition = if self.config.portal_cooldown_ms == 0 {
            TransitionState::Idle
        } else {
            TransitionState::Cooldown { remaining_ms: self.config.portal_cooldown_ms }
        };
        info!(%from, to = %target, x = arrival.x, y = arrival.y, "world transition complete");
        Ok(target)
    }

    /// Makes `world` active with the player at `arrival`: pools are discarded and reseeded,
    /// transient player state is cleared, and the camera snaps.
    pub(super) fn enter_world(&mut self, world: WorldId, arrival: Vec2) {
        self.state.active_world = world.clone();
        self.state.projectiles.clear();
        self.state.dialogue = None;

        let player = &mut self.state.player;
        player.pos = arrival;
        player.invulnerable_ms = 0;
        player.flash_ms = 0;
        player.knockback.stop();
        player.attacking = false;
        player.attack_elapsed_ms = 0;
        player.charging = false;
        player.charge = 0.0;

        self.respawn_enemies();
        self.seed_items();
        self.seed_npcs();
        self.follow_camera();
        self.refresh_chunks();

        self.push_event(GameEvent::WorldEntered {
            world,
            enemies: self.state.enemies.len(),
            items: self.state.items.len(),
            npcs: self.state.npcs.len(),
        });
    }
}
