//! Hit resolution against enemies.
//! This module exists to apply damage, flash, knockback and death the same way for every
//! attack source. It does not own attack input or projectile flight.

use super::*;

pub(super) const MELEE_KNOCKBACK: f32 = 4.0;
pub(super) const PROJECTILE_KNOCKBACK: f32 = 3.0;
pub(super) const XP_PER_KILL: u32 = 25;
const MELEE_PADDING: f32 = 8.0;

/// Hit-box projected from the player's facing: `attack_range` deep, padded on the cross axis.
pub fn melee_hitbox(player: &Player) -> Rect {
    let reach = player.attack_range;
    let Player { pos, width, height, .. } = *player;
    match player.facing {
        Facing::Up => {
            Rect::new(pos.x - MELEE_PADDING, pos.y - reach, width + 2.0 * MELEE_PADDING, reach)
        }
        Facing::Down => {
            Rect::new(pos.x - MELEE_PADDING, pos.y + height, width + 2.0 * MELEE_PADDING, reach)
        }
        Facing::Left => {
            Rect::new(pos.x - reach, pos.y - MELEE_PADDING, reach, height + 2.0 * MELEE_PADDING)
        }
        Facing::Right => {
            Rect::new(pos.x + width, pos.y - MELEE_PADDING, reach, height + 2.0 * MELEE_PADDING)
        }
    }
}

/// Applies damage and a push away from `source`. Returns true when this hit killed the enemy.
pub(super) fn apply_hit(enemy: &mut Enemy, damage: i32, source: Vec2, force: f32) -> bool {
    enemy.hp -= damage;
    enemy.flash_ms = enemy.flash_duration_ms;
    if let Some(direction) = source.direction_to(enemy.center()) {
        enemy.knockback.launch(direction.scaled(force));
    }
    if enemy.hp <= 0 && !enemy.dying {
        enemy.dying = true;
        enemy.death_elapsed_ms = 0;
        return true;
    }
    false
}

impl Game {
    /// Hits one enemy and settles a kill: loot roll and XP happen here, not at removal.
    pub(super) fn hit_enemy(&mut self, id: EnemyId, damage: i32, source: Vec2, force: f32) {
        let Some(enemy) = self.state.enemies.get_mut(id) else {
            return;
        };
        if enemy.dying {
            return;
        }
        let killed = apply_hit(enemy, damage, source, force);
        let (hp, center) = (enemy.hp, enemy.center());
        self.push_event(GameEvent::EnemyDamaged { enemy: id, amount: damage, hp });

        if killed {
            self.push_event(GameEvent::EnemyKilled { enemy: id, xp: XP_PER_KILL });
            self.drop_loot(center);
            self.award_xp(XP_PER_KILL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn hitbox_extends_from_the_facing_side() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        player.facing = Facing::Right;
        assert_eq!(melee_hitbox(&player), Rect::new(124.0, 92.0, 40.0, 40.0));
        player.facing = Facing::Up;
        assert_eq!(melee_hitbox(&player), Rect::new(92.0, 60.0, 40.0, 40.0));
    }

    #[test]
    fn killing_hit_marks_dying_and_pushes_away_from_the_source() {
        let mut enemy = Enemy::new(Vec2::new(100.0, 100.0), 0.0);
        enemy.hp = 10;
        assert!(apply_hit(&mut enemy, 25, Vec2::new(90.0, 110.0), MELEE_KNOCKBACK));
        assert!(enemy.dying);
        assert!(enemy.is_flashing());
        assert!(enemy.knockback.active);
        assert!((enemy.knockback.velocity.x - 4.0).abs() < 1e-4);
        assert!(!apply_hit(&mut enemy, 25, Vec2::ZERO, MELEE_KNOCKBACK));
    }

    #[test]
    fn kill_awards_xp_once() {
        let mut game = open_room_game();
        let id = place_enemy(&mut game, Vec2::new(150.0, 150.0));
        game.state.enemies[id].hp = 5;
        game.hit_enemy(id, 25, Vec2::new(140.0, 160.0), MELEE_KNOCKBACK);
        game.hit_enemy(id, 25, Vec2::new(140.0, 160.0), MELEE_KNOCKBACK);
        assert_eq!(game.state().player.xp, XP_PER_KILL);
        let kills =
            game.log().iter().filter(|e| matches!(e, GameEvent::EnemyKilled { .. })).count();
        assert_eq!(kills, 1);
    }
}
