//! Projectile flight and termination.
//! This module exists to advance projectiles and end each one for exactly one cause per tick.
//! It does not own firing rules or mana costs.

use super::combat::PROJECTILE_KNOCKBACK;
use super::*;

impl Game {
    pub(super) fn update_projectiles(&mut self) {
        let Some(world) = self.catalog.world(&self.state.active_world) else {
            return;
        };
        let mut ended = Vec::new();

        for (id, projectile) in &mut self.state.projectiles {
            projectile.trail.push_back(projectile.pos);
            while projectile.trail.len() > TRAIL_LEN {
                projectile.trail.pop_front();
            }
            projectile.pos = Vec2::new(
                projectile.pos.x + projectile.velocity.x,
                projectile.pos.y + projectile.velocity.y,
            );
            projectile.life = projectile.life.saturating_sub(1);

            let cause = if world.check_collision(projectile.rect()) {
                Some(ProjectileEnd::Tile)
            } else if let Some((enemy, _)) = self
                .state
                .enemies
                .iter()
                .find(|(_, enemy)| !enemy.dying && enemy.rect().contains_point(projectile.pos))
            {
                Some(ProjectileEnd::Enemy(enemy))
            } else if projectile.life == 0 {
                Some(ProjectileEnd::Expired)
            } else {
                None
            };
            if let Some(cause) = cause {
                ended.push((id, cause, projectile.damage, projectile.pos));
            }
        }

        for (id, cause, damage, pos) in ended {
            self.state.projectiles.remove(id);
            if let ProjectileEnd::Enemy(enemy) = cause {
                self.hit_enemy(enemy, damage, pos, PROJECTILE_KNOCKBACK);
            }
            self.push_event(GameEvent::ProjectileEnded { projectile: id, cause });
        }
    }

    /// Spawns a projectile directly; used for non-player sources and tests.
    pub fn spawn_projectile(&mut self, projectile: Projectile) -> ProjectileId {
        self.state.projectiles.insert(projectile)
    }
}
