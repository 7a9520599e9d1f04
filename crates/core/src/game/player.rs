//! Player control, charge, attacks, damage intake and progression.
//! This module exists to keep the player's per-tick rules in one place.
//! It does not own enemy behavior or projectile flight.

use tracing::debug;

use super::combat::MELEE_KNOCKBACK;
use super::movement::{slide, step_knockback};
use super::*;

pub(super) const CHARGE_RATE: f32 = 1.8;
pub(super) const CHARGE_DECAY: f32 = 1.0;
pub(super) const MAX_CHARGE: f32 = 100.0;
const PLAYER_KNOCKBACK: f32 = 2.5;

impl Game {
    pub(super) fn update_player(&mut self, input: &PlayerInput, dt_ms: u32) {
        let Some(world) = self.catalog.world(&self.state.active_world) else {
            return;
        };
        let player = &mut self.state.player;

        if player.knockback.active {
            let (width, height) = (player.width, player.height);
            player.pos =
                step_knockback(world, player.pos, width, height, &mut player.knockback, dt_ms);
        } else {
            let mut delta = Vec2::ZERO;
            if input.up {
                delta.y -= player.speed;
                player.facing = Facing::Up;
            }
            if input.down {
                delta.y += player.speed;
                player.facing = Facing::Down;
            }
            if input.left {
                delta.x -= player.speed;
                player.facing = Facing::Left;
            }
            if input.right {
                delta.x += player.speed;
                player.facing = Facing::Right;
            }
            if delta != Vec2::ZERO {
                player.pos = slide(world, player.pos, player.width, player.height, delta).pos;
            }
        }

        player.attack_cooldown_ms = player.attack_cooldown_ms.saturating_sub(dt_ms);
        if player.attacking {
            player.attack_elapsed_ms += dt_ms;
            if player.attack_elapsed_ms >= player.attack_duration_ms {
                player.attacking = false;
                player.attack_elapsed_ms = 0;
            }
        }
        player.invulnerable_ms = player.invulnerable_ms.saturating_sub(dt_ms);
        player.flash_ms = player.flash_ms.saturating_sub(dt_ms);

        if input.charge && !player.charging && player.attack_cooldown_ms == 0 && !player.attacking
        {
            player.charging = true;
        }
        if !input.charge && player.charging {
            player.charging = false;
            self.player_attack();
            return;
        }

        player.charge = if player.charging {
            (player.charge + CHARGE_RATE).min(MAX_CHARGE)
        } else {
            (player.charge - CHARGE_DECAY).max(0.0)
        };
    }

    /// Releases the current charge: a projectile at 33% and above, a melee swing below.
    pub fn player_attack(&mut self) {
        let percent = self.state.player.charge / MAX_CHARGE * 100.0;
        match ChargeTier::for_percent(percent) {
            ChargeTier::Low => self.melee_attack(),
            tier => self.fire_projectile(tier),
        }
        let player = &mut self.state.player;
        player.attack_cooldown_ms = player.attack_interval_ms;
    }

    fn melee_attack(&mut self) {
        let player = &mut self.state.player;
        player.attacking = true;
        player.attack_elapsed_ms = 0;
        let hitbox = melee_hitbox(player);
        let (damage, source) = (player.attack_damage, player.center());

        let targets: Vec<EnemyId> = self
            .state
            .enemies
            .iter()
            .filter(|(_, enemy)| !enemy.dying && enemy.rect().intersects(hitbox))
            .map(|(id, _)| id)
            .collect();
        for &id in &targets {
            self.hit_enemy(id, damage, source, MELEE_KNOCKBACK);
        }
        self.push_event(GameEvent::MeleeSwing { hits: targets.len() });
    }

    fn fire_projectile(&mut self, tier: ChargeTier) {
        let player = &mut self.state.player;
        let cost = tier.mana_cost();
        player.charge = 0.0;
        if player.mana < cost {
            let mana = player.mana;
            debug!(cost, mana, "not enough mana to fire");
            self.push_event(GameEvent::SpellFizzled { mana_cost: cost, mana });
            return;
        }
        player.mana -= cost;
        let projectile = Projectile::new(player.center(), player.facing, tier);
        let damage = projectile.damage;
        let id = self.state.projectiles.insert(projectile);
        self.push_event(GameEvent::ProjectileFired { projectile: id, damage, mana_cost: cost });
    }

    /// Applies an enemy hit unless the player is invulnerable; a lethal hit respawns the player.
    pub(super) fn damage_player(&mut self, amount: i32, attacker_center: Vec2) {
        let player = &mut self.state.player;
        if player.is_invulnerable() {
            return;
        }
        player.hp -= amount;
        player.invulnerable_ms = player.invulnerability_ms;
        player.flash_ms = player.flash_duration_ms;
        if let Some(direction) = attacker_center.direction_to(player.center()) {
            player.knockback.launch(direction.scaled(PLAYER_KNOCKBACK));
        }
        let hp = player.hp;
        self.push_event(GameEvent::PlayerDamaged { amount, hp });

        if hp <= 0 {
            self.respawn_player();
        }
    }

    fn respawn_player(&mut self) {
        let pos = self.find_safe_spawn_position(PLAYER_SIZE, PLAYER_SIZE);
        let player = &mut self.state.player;
        player.hp = player.max_hp;
        player.pos = pos;
        player.invulnerable_ms = 0;
        player.flash_ms = 0;
        player.knockback.stop();
        self.push_event(GameEvent::PlayerRespawned { pos });
    }

    pub(super) fn award_xp(&mut self, xp: u32) {
        let player = &mut self.state.player;
        player.xp += xp;
        if player.xp >= player.xp_to_next {
            player.level += 1;
            player.xp -= player.xp_to_next;
            player.xp_to_next = (player.xp_to_next as f32 * 1.5).floor() as u32;
            player.max_hp += 20;
            player.hp = player.max_hp;
            player.attack_damage += 5;
            let level = player.level;
            self.push_event(GameEvent::LevelUp { level });
        }
    }
}
