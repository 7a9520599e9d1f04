//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from the tick loop.
//! It does not own world fingerprints; those live on `World`.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

fn write_vec2(hasher: &mut Xxh3, point: Vec2) {
    hasher.write_u32(point.x.to_bits());
    hasher.write_u32(point.y.to_bits());
}

impl Game {
    /// Digest of the run identity and every mutable pool. Equal seeds and inputs give equal
    /// hashes on every platform.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write(self.state.active_world.as_str().as_bytes());
        hasher.write_u8(match self.transition {
            TransitionState::Idle => 0,
            TransitionState::Transitioning => 1,
            TransitionState::Cooldown { .. } => 2,
        });

        let player = &self.state.player;
        write_vec2(&mut hasher, player.pos);
        hasher.write_i32(player.hp);
        hasher.write_i32(player.mana);
        hasher.write_u32(player.level);
        hasher.write_u32(player.xp);
        hasher.write_u32(player.charge.to_bits());
        hasher.write_u8(player.facing as u8);

        hasher.write_usize(self.state.enemies.len());
        for enemy in self.state.enemies.values() {
            write_vec2(&mut hasher, enemy.pos);
            hasher.write_i32(enemy.hp);
            hasher.write_u8(u8::from(enemy.dying));
            hasher.write_u8(enemy.ai.mode as u8);
        }
        hasher.write_usize(self.state.projectiles.len());
        for projectile in self.state.projectiles.values() {
            write_vec2(&mut hasher, projectile.pos);
            hasher.write_u32(projectile.life);
        }
        hasher.write_usize(self.state.items.len());
        for item in self.state.items.values() {
            write_vec2(&mut hasher, item.pos);
            hasher.write_u8(item.kind as u8);
        }
        for (kind, count) in self.state.inventory.iter() {
            hasher.write_u8(kind as u8);
            hasher.write_u32(count);
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn identical_runs_hash_identically() {
        let mut a = open_room_game();
        let mut b = open_room_game();
        place_enemy(&mut a, Vec2::new(200.0, 200.0));
        place_enemy(&mut b, Vec2::new(200.0, 200.0));
        idle_ticks(&mut a, 30);
        idle_ticks(&mut b, 30);
        assert_eq!(a.snapshot_hash(), b.snapshot_hash());

        a.state.player.hp -= 1;
        assert_ne!(a.snapshot_hash(), b.snapshot_hash());
    }
}
