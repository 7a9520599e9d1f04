//! Density-driven pool seeding for the active world.
//! This module exists to fill enemy, item and NPC pools when a world becomes active.
//! It does not own world generation or entity behavior.

use tracing::debug;

use super::*;

/// Inputs shared by the random placement passes.
struct PlacementContext<'a> {
    world: &'a World,
    target: usize,
    max_attempts: usize,
    size: f32,
    /// Positions at or within this distance of the spawn point are rejected.
    min_spawn_distance: f32,
}

/// Up to `max_attempts` uniform draws over the inner area `[2, n - 2)` tiles; keeps clear spots.
fn place_randomly(context: &PlacementContext<'_>, dice: &mut Dice) -> (Vec<Vec2>, usize) {
    let ts = context.world.tile_size() as f32;
    let (min_x, max_x) = (2.0 * ts, (context.world.width() as f32 - 2.0) * ts);
    let (min_y, max_y) = (2.0 * ts, (context.world.height() as f32 - 2.0) * ts);
    let spawn = context.world.spawn_pixel();

    let mut placed = Vec::with_capacity(context.target);
    let mut attempts = 0;
    while placed.len() < context.target && attempts < context.max_attempts {
        attempts += 1;
        let candidate = Vec2::new(dice.range(min_x, max_x), dice.range(min_y, max_y));
        if context.world.check_collision(Rect::at(candidate, context.size, context.size)) {
            continue;
        }
        if candidate.distance(spawn) <= context.min_spawn_distance {
            continue;
        }
        placed.push(candidate);
    }
    (placed, attempts)
}

impl Game {
    /// Clears the enemy pool and refills it for the active world's density.
    pub fn respawn_enemies(&mut self) {
        self.state.enemies.clear();
        let Some(world) = self.catalog.world(&self.state.active_world) else {
            return;
        };
        let target = self.config.target_count(world.def().enemy_density);
        let context = PlacementContext {
            world,
            target,
            max_attempts: target * self.config.spawn_attempt_multiplier as usize,
            size: ENEMY_SIZE,
            min_spawn_distance: self.config.enemy_spawn_min_distance_px,
        };
        let (positions, attempts) = place_randomly(&context, &mut self.rng);
        debug!(world = %world.id(), target, spawned = positions.len(), attempts, "enemies seeded");

        for pos in positions {
            let heading = self.rng.angle();
            self.state.enemies.insert(Enemy::new(pos, heading));
        }
    }

    /// Inserts one enemy at `pos` without placement checks.
    pub fn spawn_enemy(&mut self, pos: Vec2) -> EnemyId {
        let heading = self.rng.angle();
        self.state.enemies.insert(Enemy::new(pos, heading))
    }

    pub(super) fn seed_items(&mut self) {
        self.state.items.clear();
        let Some(world) = self.catalog.world(&self.state.active_world) else {
            return;
        };
        let target = self.config.target_count(world.def().item_density);
        let context = PlacementContext {
            world,
            target,
            max_attempts: target * self.config.spawn_attempt_multiplier as usize,
            size: ITEM_SIZE,
            min_spawn_distance: 0.0,
        };
        let (positions, attempts) = place_randomly(&context, &mut self.rng);
        debug!(world = %world.id(), target, spawned = positions.len(), attempts, "items seeded");

        let health_count = target.div_ceil(2);
        for (index, pos) in positions.into_iter().enumerate() {
            let kind =
                if index < health_count { ItemKind::HealthPotion } else { ItemKind::ManaPotion };
            self.state.items.insert(Item::new(kind, pos));
        }
    }

    /// Places the active world's NPCs relative to its safe spawn position.
    pub(super) fn seed_npcs(&mut self) {
        self.state.npcs.clear();
        let search = spawn_search(&self.config);
        let Some(world) = self.catalog.world(&self.state.active_world) else {
            return;
        };
        if world.def().npcs.is_empty() {
            return;
        }
        let anchor = world.find_safe_spawn_position(PLAYER_SIZE, PLAYER_SIZE, search, &mut self.rng);
        for def in &world.def().npcs {
            self.state.npcs.insert(Npc {
                name: def.name.clone(),
                pos: Vec2::new(anchor.x + def.offset.x, anchor.y + def.offset.y),
                width: def.width,
                height: def.height,
                dialogue: def.dialogue.clone(),
                can_interact: false,
                talking: false,
                line: 0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::world::WorldDef;

    fn crowded_room() -> Game {
        let def = WorldDef {
            width: 20,
            height: 20,
            enemy_density: 0.1,
            item_density: 0.05,
            ..open_room_def("crowded")
        };
        game_with_worlds(vec![def])
    }

    #[test]
    fn enemies_fill_the_target_away_from_spawn() {
        let game = crowded_room();
        let world = game.active_world().expect("active world");
        let spawn = world.spawn_pixel();
        assert_eq!(game.state().enemies.len(), 8);
        for (_, enemy) in &game.state().enemies {
            assert!(enemy.pos.distance(spawn) > 100.0);
            assert!(!world.check_collision(enemy.rect()));
            assert!(enemy.pos.x >= 64.0 && enemy.pos.x < 18.0 * 32.0);
        }
    }

    #[test]
    fn items_split_between_health_and_mana() {
        let game = crowded_room();
        assert_eq!(game.state().items.len(), 4);
        assert_eq!(
            game.state().items.values().filter(|i| i.kind == ItemKind::HealthPotion).count(),
            2
        );
    }

    #[test]
    fn respawn_replaces_the_pool() {
        let mut game = crowded_room();
        let before: Vec<EnemyId> = game.state().enemies.keys().collect();
        game.respawn_enemies();
        assert_eq!(game.state().enemies.len(), 8);
        assert!(before.iter().all(|id| !game.state().enemies.contains_key(*id)));
    }

    #[test]
    fn impossible_placement_spawns_fewer_without_failing() {
        let def = WorldDef { width: 5, height: 5, enemy_density: 0.5, ..open_room_def("tiny") };
        let game = game_with_worlds(vec![def]);
        assert!(game.state().enemies.is_empty());
    }

    #[test]
    fn overworld_npc_stands_beside_the_spawn() {
        let def = WorldDef { force_procedural: true, ..WorldDef::overworld() };
        let game = game_with_worlds(vec![def]);
        let (_, npc) = game.state().npcs.iter().next().expect("village elder");
        assert_eq!(npc.name, "Village Elder");
        assert_eq!(npc.dialogue.len(), 3);
        let spawn = game.active_world().expect("active world").spawn_pixel();
        assert_eq!(npc.pos, Vec2::new(spawn.x + 80.0, spawn.y + 20.0));
    }
}
