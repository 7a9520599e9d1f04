//! Enemy AI: patrol/chase with a hysteresis band, contact attacks, knockback and death timing.

use super::movement::{slide, step_knockback};
use super::*;

const PATROL_REROLL_MS: u32 = 2000;
const PATROL_SPEED_FACTOR: f32 = 0.5;

/// Enters chase within `alert_range`; leaves it only beyond twice that.
pub fn next_ai_mode(mode: AiMode, distance: f32, alert_range: f32) -> AiMode {
    if distance <= alert_range {
        AiMode::Chase
    } else if mode == AiMode::Chase && distance > alert_range * 2.0 {
        AiMode::Patrol
    } else {
        mode
    }
}

impl Game {
    pub(super) fn update_enemies(&mut self, dt_ms: u32) {
        let Some(world) = self.catalog.world(&self.state.active_world) else {
            return;
        };
        let player_pos = self.state.player.pos;
        let mut finished = Vec::new();
        let mut attacks = Vec::new();

        for (id, enemy) in &mut self.state.enemies {
            enemy.attack_cooldown_ms = enemy.attack_cooldown_ms.saturating_sub(dt_ms);
            enemy.flash_ms = enemy.flash_ms.saturating_sub(dt_ms);

            if enemy.dying {
                enemy.death_elapsed_ms += dt_ms;
                if enemy.death_elapsed_ms >= enemy.death_duration_ms {
                    finished.push(id);
                }
                continue;
            }

            if enemy.knockback.active {
                let (width, height) = (enemy.width, enemy.height);
                enemy.pos =
                    step_knockback(world, enemy.pos, width, height, &mut enemy.knockback, dt_ms);
                continue;
            }

            let distance = enemy.pos.distance(player_pos);
            enemy.ai.mode = next_ai_mode(enemy.ai.mode, distance, enemy.ai.alert_range);

            let delta = match enemy.ai.mode {
                AiMode::Chase => {
                    if distance <= enemy.attack_range && enemy.attack_cooldown_ms == 0 {
                        attacks.push((enemy.damage, enemy.center()));
                        enemy.attack_cooldown_ms = enemy.attack_interval_ms;
                    }
                    enemy
                        .pos
                        .direction_to(player_pos)
                        .map_or(Vec2::ZERO, |direction| direction.scaled(enemy.speed))
                }
                AiMode::Patrol => {
                    enemy.ai.patrol_timer_ms += dt_ms;
                    if enemy.ai.patrol_timer_ms > PATROL_REROLL_MS {
                        enemy.ai.heading = self.rng.angle();
                        enemy.ai.patrol_timer_ms = 0;
                    }
                    let speed = enemy.speed * PATROL_SPEED_FACTOR;
                    Vec2::new(enemy.ai.heading.cos() * speed, enemy.ai.heading.sin() * speed)
                }
            };
            enemy.pos = slide(world, enemy.pos, enemy.width, enemy.height, delta).pos;
        }

        for id in finished {
            self.state.enemies.remove(id);
            self.push_event(GameEvent::EnemyRemoved { enemy: id });
        }
        for (damage, center) in attacks {
            self.damage_player(damage, center);
        }
    }
}
