//! Loot drops, pickups and potion use.

use super::*;

const LOOT_DROP_CHANCE: f32 = 0.6;
const LOOT_HEALTH_SHARE: f32 = 0.7;
const LOOT_JITTER: f32 = 10.0;
const HEALTH_POTION_HEAL: i32 = 25;
const MANA_POTION_RESTORE: i32 = 30;

impl Game {
    /// Rolls for a drop centered near `at`.
    pub(super) fn drop_loot(&mut self, at: Vec2) {
        if !self.rng.chance(LOOT_DROP_CHANCE) {
            return;
        }
        let jitter = Vec2::new(self.rng.offset(LOOT_JITTER), self.rng.offset(LOOT_JITTER));
        let pos = Vec2::new(at.x + jitter.x, at.y + jitter.y);
        let kind = if self.rng.chance(LOOT_HEALTH_SHARE) {
            ItemKind::HealthPotion
        } else {
            ItemKind::ManaPotion
        };
        let item = self.state.items.insert(Item::new(kind, pos));
        self.push_event(GameEvent::LootDropped { item, kind });
    }

    pub(super) fn collect_items(&mut self) {
        let body = self.state.player.rect();
        let touched: Vec<ItemId> = self
            .state
            .items
            .iter()
            .filter(|(_, item)| item.rect().intersects(body))
            .map(|(id, _)| id)
            .collect();
        for id in touched {
            if let Some(item) = self.state.items.remove(id) {
                self.state.inventory.add(item.kind);
                self.push_event(GameEvent::ItemPickedUp { kind: item.kind });
            }
        }
    }

    /// Drinks one potion of `kind`. Nothing is consumed when none is held or the stat is full.
    pub fn use_item(&mut self, kind: ItemKind) -> bool {
        if self.state.inventory.count(kind) == 0 {
            return false;
        }
        let player = &mut self.state.player;
        let applied = match kind {
            ItemKind::HealthPotion if player.hp < player.max_hp => {
                player.hp = (player.hp + HEALTH_POTION_HEAL).min(player.max_hp);
                true
            }
            ItemKind::ManaPotion if player.mana < player.max_mana => {
                player.mana = (player.mana + MANA_POTION_RESTORE).min(player.max_mana);
                true
            }
            _ => false,
        };
        if applied {
            self.state.inventory.take(kind);
            self.push_event(GameEvent::ItemUsed { kind });
        }
        applied
    }
}
