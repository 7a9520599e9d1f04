use std::time::Duration;

use tracing::debug;
use wayfarer_core::{FixedStepScheduler, Game, PlayerInput, StepPlan};

/// Keyboard state sampled once per rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub charge_held: bool,
    pub interact_pressed: bool,
    pub health_potion_pressed: bool,
    pub mana_potion_pressed: bool,
}

/// Presses seen on frames that ran no tick. Each one reaches exactly one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct PendingPresses {
    interact: bool,
    health_potion: bool,
    mana_potion: bool,
}

impl PendingPresses {
    fn latch(&mut self, keys: &FrameKeys) {
        self.interact |= keys.interact_pressed;
        self.health_potion |= keys.health_potion_pressed;
        self.mana_potion |= keys.mana_potion_pressed;
    }
}

pub struct AppState {
    pub game: Game,
    scheduler: FixedStepScheduler,
    pending: PendingPresses,
    tick_ms: u32,
}

impl AppState {
    pub fn new(game: Game) -> Self {
        let tick_ms = game.config().tick_ms;
        Self {
            game,
            scheduler: FixedStepScheduler::new(tick_ms),
            pending: PendingPresses::default(),
            tick_ms,
        }
    }

    /// Feeds one frame of keys and elapsed time, running as many fixed ticks as are due.
    pub fn frame(&mut self, keys: &FrameKeys, frame_dt: Duration) -> StepPlan {
        self.pending.latch(keys);
        let plan = self.scheduler.plan(frame_dt);
        if !plan.dropped_backlog.is_zero() {
            debug!(dropped_ms = plan.dropped_backlog.as_millis() as u64, "frame backlog dropped");
        }

        for _ in 0..plan.ticks_to_run {
            let input = PlayerInput {
                up: keys.up,
                down: keys.down,
                left: keys.left,
                right: keys.right,
                charge: keys.charge_held,
                interact: self.pending.interact,
                use_health_potion: self.pending.health_potion,
                use_mana_potion: self.pending.mana_potion,
            };
            self.pending = PendingPresses::default();
            self.game.advance(&input, self.tick_ms);
        }
        plan
    }
}
