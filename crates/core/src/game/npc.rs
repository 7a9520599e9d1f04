//! NPC proximity and dialogue flow.

use super::*;

const INTERACT_RANGE_TILES: f32 = 1.5;
const DIALOGUE_BREAK_TILES: f32 = 3.5;

impl Game {
    /// Refreshes interaction flags and closes dialogue once the player walks away.
    pub(super) fn update_npcs(&mut self) {
        let Some(world) = self.catalog.world(&self.state.active_world) else {
            return;
        };
        let ts = world.tile_size() as f32;
        let player = &self.state.player;
        let player_center = player.center();
        let player_half = player.width.min(player.height) / 2.0;

        let mut walked_away = None;
        for (id, npc) in &mut self.state.npcs {
            let distance = npc.rect().center().distance(player_center);
            let reach = INTERACT_RANGE_TILES * ts + player_half + npc.width.min(npc.height) / 2.0;
            npc.can_interact = distance <= reach;
            if npc.talking && distance >= DIALOGUE_BREAK_TILES * ts {
                walked_away = Some(id);
            }
        }
        if let Some(id) = walked_away {
            self.close_dialogue(id);
        }
    }

    /// Advances the open dialogue, or starts one with the first NPC in reach.
    pub fn interact(&mut self) {
        if let Some(open) = &self.state.dialogue {
            let id = open.npc;
            self.advance_dialogue(id);
            return;
        }
        let Some((id, npc)) = self.state.npcs.iter_mut().find(|(_, npc)| npc.can_interact) else {
            return;
        };
        let Some(first) = npc.dialogue.first() else {
            return;
        };
        npc.talking = true;
        npc.line = 0;
        self.state.dialogue =
            Some(Dialogue { npc: id, speaker: npc.name.clone(), text: first.clone() });
        self.push_event(GameEvent::DialogueOpened { npc: id });
    }

    fn advance_dialogue(&mut self, id: NpcId) {
        let Some(npc) = self.state.npcs.get_mut(id) else {
            self.state.dialogue = None;
            return;
        };
        let next = npc.line + 1;
        let Some(text) = npc.dialogue.get(next) else {
            self.close_dialogue(id);
            return;
        };
        npc.line = next;
        if let Some(open) = &mut self.state.dialogue {
            open.text = text.clone();
        }
        self.push_event(GameEvent::DialogueAdvanced { npc: id, line: next });
    }

    fn close_dialogue(&mut self, id: NpcId) {
        if let Some(npc) = self.state.npcs.get_mut(id) {
            npc.talking = false;
            npc.line = 0;
        }
        self.state.dialogue = None;
        self.push_event(GameEvent::DialogueClosed { npc: id });
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn press() -> PlayerInput {
        PlayerInput { interact: true, ..PlayerInput::default() }
    }

    fn game_with_elder() -> (Game, NpcId) {
        let mut game = open_room_game();
        let id = game.state.npcs.insert(Npc {
            name: "Elder".to_owned(),
            pos: Vec2::new(120.0, 64.0),
            width: 32.0,
            height: 32.0,
            dialogue: vec!["one".to_owned(), "two".to_owned()],
            can_interact: false,
            talking: false,
            line: 0,
        });
        (game, id)
    }

    #[test]
    fn interaction_range_includes_both_half_bodies() {
        let (mut game, id) = game_with_elder();
        // Player center (76, 76), NPC center (136, 80): 60.1 px apart, reach 48 + 12 + 16.
        game.advance(&PlayerInput::default(), 16);
        assert!(game.state().npcs[id].can_interact);

        game.set_player_position(Vec2::new(300.0, 300.0));
        game.advance(&PlayerInput::default(), 16);
        assert!(!game.state().npcs[id].can_interact);
    }

    #[test]
    fn dialogue_walks_through_lines_and_pauses_the_world() {
        let (mut game, id) = game_with_elder();
        game.advance(&PlayerInput::default(), 16);

        game.advance(&press(), 16);
        assert!(game.is_paused());
        assert_eq!(game.state().dialogue.as_ref().map(|d| d.text.as_str()), Some("one"));

        let before = game.state().player.pos;
        game.advance(&PlayerInput { right: true, ..PlayerInput::default() }, 16);
        assert_eq!(game.state().player.pos, before);

        game.advance(&press(), 16);
        assert_eq!(game.state().dialogue.as_ref().map(|d| d.text.as_str()), Some("two"));
        game.advance(&press(), 16);
        assert!(!game.is_paused());
        assert!(!game.state().npcs[id].talking);
        assert!(game.log().iter().any(|e| matches!(e, GameEvent::DialogueClosed { npc } if *npc == id)));
    }

    #[test]
    fn leaving_the_npc_closes_the_dialogue() {
        let (mut game, id) = game_with_elder();
        game.advance(&PlayerInput::default(), 16);
        game.advance(&press(), 16);
        assert!(game.state().npcs[id].talking);

        game.set_player_position(Vec2::new(300.0, 300.0));
        game.advance(&PlayerInput::default(), 16);
        assert!(game.state().dialogue.is_none());
        assert!(!game.state().npcs[id].talking);
    }

    #[test]
    fn interact_without_anyone_in_reach_does_nothing() {
        let mut game = open_room_game();
        game.advance(&press(), 16);
        assert!(!game.is_paused());
    }
}
