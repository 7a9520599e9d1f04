//! Text for the HUD line, dialogue box, and transition notice.

use wayfarer_core::state::Dialogue;
use wayfarer_core::{FrameView, Game, ItemKind, TransitionState};

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Seed, tick and snapshot hash, for reproducing a run from the window.
pub fn run_status_line(game: &Game) -> String {
    format!(
        "Seed {}  Tick {}  Hash {}",
        game.seed(),
        game.current_tick(),
        format_snapshot_hash(game.snapshot_hash())
    )
}

pub fn hud_line(frame: &FrameView<'_>) -> String {
    let player = frame.player;
    format!(
        "HP {}/{}  MP {}/{}  Lv {} ({}/{} xp)  Potions H:{} M:{}  {}",
        player.hp.max(0),
        player.max_hp,
        player.mana,
        player.max_mana,
        player.level,
        player.xp,
        player.xp_to_next,
        frame.inventory.count(ItemKind::HealthPotion),
        frame.inventory.count(ItemKind::ManaPotion),
        frame.world.def().name,
    )
}

/// Speaker line followed by the current text.
pub fn dialogue_lines(dialogue: &Dialogue) -> [String; 2] {
    [format!("{}:", dialogue.speaker), dialogue.text.clone()]
}

pub fn transition_notice(state: TransitionState) -> Option<String> {
    match state {
        TransitionState::Idle => None,
        TransitionState::Transitioning => Some("Travelling...".to_string()),
        TransitionState::Cooldown { remaining_ms } => {
            Some(format!("Portal recharging ({:.1}s)", remaining_ms as f32 / 1000.0))
        }
    }
}
